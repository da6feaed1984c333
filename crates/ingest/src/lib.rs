pub mod document;
pub mod source;
pub mod postgres;

pub use document::{Document, DocumentFilter, MIN_TEXT_CHARS, PROCESSED_STATUS};
pub use source::{DocumentSource, MemoryDocumentSource, StoredDocument};
pub use postgres::PgDocumentSource;

use anyhow::Result;
use tracing::info;

/// Fetch the batch for one run. Results are returned whole; nothing is streamed.
pub async fn fetch_documents(
    source: &dyn DocumentSource,
    filter: &DocumentFilter,
) -> Result<Vec<Document>> {
    let documents = source.fetch(filter).await?;

    info!(
        dataset = filter.dataset.as_deref().unwrap_or("*"),
        document_id = ?filter.document_id,
        limit = filter.limit,
        offset = filter.offset,
        count = documents.len(),
        "Document batch ready"
    );

    Ok(documents)
}
