use std::collections::BTreeMap;
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CategoryTableError {
    #[error("cannot read category table {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("category table {path} has no code=label entries")]
    Empty { path: String },
}

/// Immutable snapshot of the `code=label` lookup, loaded once per batch
/// run and shared read-only across all workers.
///
/// Codes are unique; labels need not be. Two codes mapping to the same
/// label share one category in every result.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    labels: BTreeMap<String, String>,
}

impl CategoryTable {
    /// Parse the line-oriented artifact: one `code=label` entry per line,
    /// both sides trimmed. Blank lines and lines without `=` are ignored.
    pub fn parse(content: &str) -> Self {
        let mut labels = BTreeMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((code, label)) = line.split_once('=') else {
                continue;
            };
            labels.insert(code.trim().to_string(), label.trim().to_string());
        }
        Self { labels }
    }

    /// Load from disk. Absent or entry-free artifacts are fatal: without
    /// a table the whole batch could only produce an empty report.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CategoryTableError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CategoryTableError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::parse(&content);
        if table.is_empty() {
            return Err(CategoryTableError::Empty {
                path: path.display().to_string(),
            });
        }
        Ok(table)
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.labels.contains_key(code)
    }

    pub fn label_for(&self, code: &str) -> Option<&str> {
        self.labels.get(code).map(String::as_str)
    }

    /// All labels, in code order. May contain duplicates when several
    /// codes share a label.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_entries_and_skips_noise() {
        let table = CategoryTable::parse("1=Red\n\n# a comment line\n 2 = Blue \nnot an entry\n");
        assert_eq!(table.len(), 2);
        assert_eq!(table.label_for("1"), Some("Red"));
        assert_eq!(table.label_for("2"), Some("Blue"));
        assert!(!table.contains_code("3"));
    }

    #[test]
    fn duplicate_labels_are_allowed() {
        let table = CategoryTable::parse("14=szary\n18=szary");
        assert_eq!(table.len(), 2);
        assert_eq!(table.label_for("14"), table.label_for("18"));
    }

    #[test]
    fn load_rejects_entry_free_artifact() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "just text, no separator").unwrap();
        let err = CategoryTable::load(file.path()).unwrap_err();
        assert!(matches!(err, CategoryTableError::Empty { .. }));
    }

    #[test]
    fn load_reads_entries_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1=Red\n2=Blue").unwrap();
        let table = CategoryTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = CategoryTable::load("/nonexistent/kolory.txt").unwrap_err();
        assert!(matches!(err, CategoryTableError::Read { .. }));
    }
}
