//! Processing log returned to the caller under the `logs` metadata key.

/// Append-only, ordered list of human-readable progress entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingLog {
    entries: Vec<String>,
}

impl ProcessingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// JSON array of strings in append order, e.g. `["a","b"]`
    pub fn to_json_array(&self) -> String {
        // Serializing a Vec<String> cannot fail
        serde_json::to_string(&self.entries).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_log_is_empty_array() {
        assert_eq!(ProcessingLog::new().to_json_array(), "[]");
    }

    #[test]
    fn test_entries_keep_append_order_and_duplicates() {
        let mut log = ProcessingLog::new();
        log.append("first");
        log.append("second \"quoted\"");
        log.append("first");

        let parsed: Vec<String> = serde_json::from_str(&log.to_json_array()).unwrap();
        assert_eq!(parsed, vec!["first", "second \"quoted\"", "first"]);
        assert_eq!(log.len(), 3);
    }
}
