use anyhow::Result;
use chrono::Utc;
use extract::{DocumentMentions, Extractor};
use ingest::{Document, DocumentFilter};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::schema::{DocumentResult, RunReport};
use crate::stats::RunStats;

/// In-progress report state for one batch.
#[derive(Debug)]
pub struct BatchAccumulator {
    stats: RunStats,
    files: Vec<DocumentResult>,
}

impl BatchAccumulator {
    pub fn new(total_files: usize) -> Self {
        Self {
            stats: RunStats::new(total_files),
            files: Vec::with_capacity(total_files),
        }
    }

    pub fn skip(&mut self) {
        self.stats.record_skipped();
    }

    pub fn record(&mut self, document: &Document, extraction: DocumentMentions) {
        self.stats.record_processed(&extraction);
        self.files.push(DocumentResult::new(document, extraction));
    }

    pub fn finish(self, source: &str, engine_identifier: &str, filters: DocumentFilter) -> RunReport {
        RunReport {
            generated_at: Utc::now(),
            source: source.to_string(),
            engine_identifier: engine_identifier.to_string(),
            filters,
            stats: self.stats,
            files: self.files,
        }
    }
}

/// Drives a fetched batch through the extractor, one document at a time.
pub struct Aggregator<'a> {
    extractor: &'a Extractor,
}

impl<'a> Aggregator<'a> {
    pub fn new(extractor: &'a Extractor) -> Self {
        Self { extractor }
    }

    /// Any extraction error aborts the whole run; no partial report is built.
    pub async fn run(&self, documents: &[Document], filters: DocumentFilter) -> Result<RunReport> {
        let mut batch = BatchAccumulator::new(documents.len());

        for document in documents {
            // Blank documents never reach the engine
            if !document.has_text() {
                warn!(document_id = document.id, "Skipping document without text");
                batch.skip();
                continue;
            }

            // Extract, then fold into the run totals
            let started = Instant::now();
            let extraction = self.extractor.extract_document(document).await?;
            debug!(
                document_id = document.id,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Document processed"
            );

            batch.record(document, extraction);
        }

        // Stamp engine and filters onto the finished report
        let engine = self.extractor.engine();
        let report = batch.finish(engine.kind(), engine.identifier(), filters);

        info!(
            total = report.stats.total_files,
            processed = report.stats.processed,
            skipped = report.stats.skipped_no_text,
            mentions_raw = report.stats.total_mentions_raw,
            mentions_deduped = report.stats.total_mentions_deduped,
            "Batch complete"
        );

        Ok(report)
    }
}
