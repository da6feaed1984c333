use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{FromRow, Postgres, QueryBuilder};
use tracing::{debug, info};

use crate::document::{Document, DocumentFilter, MIN_TEXT_CHARS, PROCESSED_STATUS};
use crate::source::DocumentSource;

#[derive(Debug, FromRow)]
struct FileRow {
    id: i64,
    dataset: String,
    filepath: String,
    filename: String,
    full_text: Option<String>,
}

impl From<FileRow> for Document {
    fn from(row: FileRow) -> Self {
        Self {
            id: row.id,
            dataset: row.dataset,
            filepath: row.filepath,
            filename: row.filename,
            full_text: row.full_text.unwrap_or_default(),
        }
    }
}

/// Reads documents from the `files` table.
pub struct PgDocumentSource {
    pool: PgPool,
}

impl PgDocumentSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self> {
        // Strictly sequential run: one connection is all we ever use.
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await
            .context("Failed to connect to Postgres (check DATABASE_URL)")?;

        info!("Connected to document store");
        Ok(Self::new(pool))
    }
}

/// Build the selection query for a filter. Status and length rules are fixed;
/// dataset and id are optional exact matches.
pub(crate) fn files_query(filter: &DocumentFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(
        "SELECT id::bigint AS id, dataset::text AS dataset, filepath, filename, full_text FROM files WHERE ",
    );
    query.push(format!(
        "status = '{}' AND full_text IS NOT NULL AND length(full_text) >= {}",
        PROCESSED_STATUS, MIN_TEXT_CHARS
    ));

    if let Some(dataset) = &filter.dataset {
        query.push(" AND dataset::text = ").push_bind(dataset.clone());
    }
    if let Some(id) = filter.document_id {
        query.push(" AND id = ").push_bind(id);
    }

    query
        .push(" ORDER BY id ASC LIMIT ")
        .push_bind(filter.limit as i64)
        .push(" OFFSET ")
        .push_bind(filter.offset as i64);

    query
}

#[async_trait]
impl DocumentSource for PgDocumentSource {
    async fn fetch(&self, filter: &DocumentFilter) -> Result<Vec<Document>> {
        filter.validate()?;

        let mut query = files_query(filter);
        debug!(sql = query.sql(), "Querying document store");

        let rows: Vec<FileRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .context("Failed to query files table")?;

        info!(count = rows.len(), "Fetched documents");
        Ok(rows.into_iter().map(Document::from).collect())
    }
}
