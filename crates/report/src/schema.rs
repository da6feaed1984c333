use chrono::{DateTime, Utc};
use extract::{DocumentMentions, Mention, TypeCounts};
use ingest::{Document, DocumentFilter};
use serde::{Deserialize, Serialize};

use crate::stats::RunStats;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResult {
    pub id: i64,
    pub dataset: String,
    pub filepath: String,
    pub filename: String,
    pub text_chars: usize,
    pub mentions_raw_count: usize,
    pub mentions_deduped_count: usize,
    pub counts_by_type: TypeCounts,
    pub mentions: Vec<Mention>,
}

impl DocumentResult {
    pub fn new(document: &Document, extraction: DocumentMentions) -> Self {
        Self {
            id: document.id,
            dataset: document.dataset.clone(),
            filepath: document.filepath.clone(),
            filename: document.filename.clone(),
            text_chars: document.trimmed_text().chars().count(),
            mentions_raw_count: extraction.raw_count,
            mentions_deduped_count: extraction.deduped_count(),
            counts_by_type: extraction.counts_by_type,
            mentions: extraction.mentions,
        }
    }
}

/// Everything written for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub engine_identifier: String,
    pub filters: DocumentFilter,
    pub stats: RunStats,
    pub files: Vec<DocumentResult>,
}
