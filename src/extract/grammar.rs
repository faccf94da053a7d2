use super::RawLineItem;
use crate::categories::CategoryTable;
use regex::Regex;

/// Version tag of the recognized line shape. The shape is a contract
/// with the upstream document layout: when the layout changes, bump the
/// version and revise the pattern in lock-step rather than tweaking it
/// in place.
pub const GRAMMAR_VERSION: u32 = 1;

/// Compiled recognizer for one data-line shape, anchored at the start
/// of the line: integer code, a token of letters/digits/spaces, three
/// decimals, an integer, the quantity decimal, a trailing integer, all
/// whitespace-separated.
pub struct LineGrammar {
    line: Regex,
}

impl LineGrammar {
    pub fn new() -> Self {
        let line = Regex::new(
            r"^(\d+)\s+[A-Za-z0-9\s]+\s+\d+\.\d+\s+\d+\.\d+\s+\d+\.\d+\s+\d+\s+(\d+\.\d+)\s+\d+",
        )
        .expect("line grammar pattern is valid");
        Self { line }
    }

    /// Match one line. `None` on a shape mismatch; mismatches are silent
    /// by design, the line is presumed not to be a data row.
    pub fn match_line(&self, line: &str) -> Option<RawLineItem> {
        let cap = self.line.captures(line)?;
        let value = cap[2].parse::<f64>().ok()?;
        Some(RawLineItem {
            code: cap[1].to_string(),
            value,
        })
    }

    /// Lazy scan over a located section: matched lines whose code is in
    /// the table, in line order. A code appearing on several lines is
    /// emitted once per occurrence; the caller sums.
    pub fn line_items<'a>(
        &'a self,
        section: &'a str,
        table: &'a CategoryTable,
    ) -> impl Iterator<Item = RawLineItem> + 'a {
        section
            .lines()
            .filter_map(|line| self.match_line(line))
            .filter(|item| table.contains_code(&item.code))
    }
}

impl Default for LineGrammar {
    fn default() -> Self {
        Self::new()
    }
}
