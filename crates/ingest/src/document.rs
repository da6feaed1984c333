use serde::{Deserialize, Serialize};

/// Only documents in this state are handed to extraction.
pub const PROCESSED_STATUS: &str = "processed";

/// Documents shorter than this (in characters) are not worth running NER on.
pub const MIN_TEXT_CHARS: usize = 50;

/// A document as fetched from the store. Never mutated after fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub dataset: String,
    pub filepath: String,
    pub filename: String,
    pub full_text: String,
}

impl Document {
    /// Full text with surrounding whitespace removed. Extraction offsets are
    /// relative to this view of the text.
    pub fn trimmed_text(&self) -> &str {
        self.full_text.trim()
    }

    pub fn has_text(&self) -> bool {
        !self.trimmed_text().is_empty()
    }
}

/// Selection criteria for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFilter {
    pub dataset: Option<String>,
    pub document_id: Option<i64>,
    pub limit: usize,
    pub offset: usize,
}

impl DocumentFilter {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self {
            dataset: None,
            document_id: None,
            limit,
            offset,
        }
    }

    pub fn with_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = Some(dataset.into());
        self
    }

    pub fn with_document_id(mut self, id: i64) -> Self {
        self.document_id = Some(id);
        self
    }

    /// Rejects a zero limit; every source calls this before touching the store.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.limit == 0 {
            anyhow::bail!("limit must be > 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed_text() {
        let doc = Document {
            id: 1,
            dataset: "d".to_string(),
            filepath: "/tmp/a.txt".to_string(),
            filename: "a.txt".to_string(),
            full_text: "  \n hello world \t".to_string(),
        };

        assert_eq!(doc.trimmed_text(), "hello world");
        assert!(doc.has_text());
    }

    #[test]
    fn test_whitespace_only_has_no_text() {
        let doc = Document {
            id: 2,
            dataset: "d".to_string(),
            filepath: String::new(),
            filename: String::new(),
            full_text: " \n\t ".to_string(),
        };

        assert!(!doc.has_text());
    }

    #[test]
    fn test_zero_limit_rejected() {
        assert!(DocumentFilter::new(0, 0).validate().is_err());
        assert!(DocumentFilter::new(1, 0).validate().is_ok());
    }
}
