// src/extract/mod.rs

mod grammar;

pub use grammar::{GRAMMAR_VERSION, LineGrammar};

/// Marker line that opens the data section of an order document.
pub const SECTION_MARKER: &str = "Informacje dodatkowe:";

/// One matched data line: the category code and the raw quantity,
/// before adjustment. Consumed immediately by the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct RawLineItem {
    pub code: String,
    pub value: f64,
}

/// Everything after the first line containing `marker` as a substring,
/// to end of text. Lines after the marker are kept wholesale, including
/// lines that themselves contain the marker. Absence of the marker is a
/// normal zero-yield outcome, not a failure.
pub fn locate_section<'a>(text: &'a str, marker: &str) -> &'a str {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        offset += line.len();
        if line.contains(marker) {
            return &text[offset..];
        }
    }
    ""
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_follows_the_marker_line() {
        let text = "header\nInformacje dodatkowe:\n1 ABC 1.00\nlast";
        assert_eq!(locate_section(text, SECTION_MARKER), "1 ABC 1.00\nlast");
    }

    #[test]
    fn marker_as_substring_counts() {
        let text = "noise Informacje dodatkowe: trailing\ndata";
        assert_eq!(locate_section(text, SECTION_MARKER), "data");
    }

    #[test]
    fn missing_marker_yields_empty_section() {
        assert_eq!(locate_section("no marker here\nat all", SECTION_MARKER), "");
    }

    #[test]
    fn later_marker_lines_are_kept_as_data() {
        let text = "Informacje dodatkowe:\nrow 1\nInformacje dodatkowe:\nrow 2";
        assert_eq!(
            locate_section(text, SECTION_MARKER),
            "row 1\nInformacje dodatkowe:\nrow 2"
        );
    }

    #[test]
    fn marker_on_final_line_yields_empty_section() {
        assert_eq!(locate_section("only Informacje dodatkowe:", SECTION_MARKER), "");
    }
}
