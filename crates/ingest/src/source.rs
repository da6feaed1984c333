use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::document::{Document, DocumentFilter, MIN_TEXT_CHARS, PROCESSED_STATUS};

/// Anything that can hand out eligible documents for a run.
///
/// Implementations must only return documents that are processed, carry
/// non-null text of at least [`MIN_TEXT_CHARS`] characters and match the
/// filter, ordered by ascending id and paginated by `offset`/`limit`.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, filter: &DocumentFilter) -> Result<Vec<Document>>;
}

/// A row as the store holds it, before eligibility filtering.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: i64,
    pub dataset: String,
    pub filepath: String,
    pub filename: String,
    pub status: String,
    pub full_text: Option<String>,
}

impl StoredDocument {
    pub fn processed(id: i64, dataset: &str, filename: &str, full_text: &str) -> Self {
        Self {
            id,
            dataset: dataset.to_string(),
            filepath: format!("{}/{}", dataset, filename),
            filename: filename.to_string(),
            status: PROCESSED_STATUS.to_string(),
            full_text: Some(full_text.to_string()),
        }
    }

    fn is_eligible(&self, filter: &DocumentFilter) -> bool {
        let text_ok = self
            .full_text
            .as_deref()
            .is_some_and(|t| t.chars().count() >= MIN_TEXT_CHARS);

        self.status == PROCESSED_STATUS
            && text_ok
            && filter.dataset.as_deref().is_none_or(|d| d == self.dataset)
            && filter.document_id.is_none_or(|id| id == self.id)
    }

    fn to_document(&self) -> Document {
        Document {
            id: self.id,
            dataset: self.dataset.clone(),
            filepath: self.filepath.clone(),
            filename: self.filename.clone(),
            full_text: self.full_text.clone().unwrap_or_default(),
        }
    }
}

/// In-process store with the same selection rules as the Postgres source.
#[derive(Default)]
pub struct MemoryDocumentSource {
    rows: Vec<StoredDocument>,
}

impl MemoryDocumentSource {
    pub fn new(rows: Vec<StoredDocument>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl DocumentSource for MemoryDocumentSource {
    async fn fetch(&self, filter: &DocumentFilter) -> Result<Vec<Document>> {
        filter.validate()?;

        let mut eligible: Vec<&StoredDocument> = self
            .rows
            .iter()
            .filter(|row| row.is_eligible(filter))
            .collect();
        eligible.sort_by_key(|row| row.id);

        let documents: Vec<Document> = eligible
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .map(StoredDocument::to_document)
            .collect();

        debug!(count = documents.len(), "Fetched documents from memory source");
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_text(prefix: &str) -> String {
        format!("{} {}", prefix, "lorem ipsum dolor sit amet ".repeat(3))
    }

    fn source() -> MemoryDocumentSource {
        let mut draft = StoredDocument::processed(4, "alpha", "draft.txt", &long_text("draft"));
        draft.status = "pending".to_string();

        let mut null_text = StoredDocument::processed(5, "alpha", "null.txt", "");
        null_text.full_text = None;

        MemoryDocumentSource::new(vec![
            StoredDocument::processed(3, "beta", "c.txt", &long_text("c")),
            StoredDocument::processed(1, "alpha", "a.txt", &long_text("a")),
            StoredDocument::processed(2, "alpha", "short.txt", "too short"),
            draft,
            null_text,
            StoredDocument::processed(6, "alpha", "f.txt", &long_text("f")),
        ])
    }

    #[tokio::test]
    async fn test_eligibility_and_order() {
        let docs = source().fetch(&DocumentFilter::new(25, 0)).await.unwrap();
        let ids: Vec<i64> = docs.iter().map(|d| d.id).collect();

        assert_eq!(ids, vec![1, 3, 6]);
    }

    #[tokio::test]
    async fn test_dataset_and_id_filters() {
        let docs = source()
            .fetch(&DocumentFilter::new(25, 0).with_dataset("alpha"))
            .await
            .unwrap();
        let ids: Vec<i64> = docs.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 6]);

        let docs = source()
            .fetch(&DocumentFilter::new(25, 0).with_document_id(3))
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].filename, "c.txt");
    }

    #[tokio::test]
    async fn test_pagination() {
        let docs = source().fetch(&DocumentFilter::new(1, 1)).await.unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, 3);
    }

    #[tokio::test]
    async fn test_zero_limit_is_error() {
        assert!(source().fetch(&DocumentFilter::new(0, 0)).await.is_err());
    }
}
