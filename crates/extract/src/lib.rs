pub mod schema;
pub mod labels;
pub mod normalizer;
pub mod engine;
pub mod http_engine;

pub use schema::{DocumentMentions, EntityType, Mention, RawSpan, TypeCounts};
pub use labels::LabelMap;
pub use normalizer::{normalize_text, CharIndexedText, CONTEXT_RADIUS};
pub use engine::{FixtureEngine, RecognitionEngine};
pub use http_engine::HttpNerEngine;

use anyhow::{Context, Result};
use ingest::Document;
use std::collections::HashSet;
use tracing::debug;

/// Turns engine spans for one document into deduplicated mentions.
pub struct Extractor {
    engine: Box<dyn RecognitionEngine>,
    labels: LabelMap,
    context_radius: usize,
}

impl Extractor {
    pub fn new(engine: Box<dyn RecognitionEngine>) -> Self {
        Self {
            engine,
            labels: LabelMap::spacy(),
            context_radius: CONTEXT_RADIUS,
        }
    }

    pub fn with_labels(mut self, labels: LabelMap) -> Self {
        self.labels = labels;
        self
    }

    pub fn engine(&self) -> &dyn RecognitionEngine {
        self.engine.as_ref()
    }

    /// Run the engine over the document's trimmed text and build its mentions.
    pub async fn extract_document(&self, document: &Document) -> Result<DocumentMentions> {
        let text = document.trimmed_text();

        // Offsets from the engine refer to the trimmed text
        let spans = self.engine
            .process(text)
            .await
            .with_context(|| format!("Entity recognition failed for document {}", document.id))?;

        let result = self.mentions_from_spans(text, spans);
        debug!(
            document_id = document.id,
            raw = result.raw_count,
            deduped = result.deduped_count(),
            "Extracted mentions"
        );

        Ok(result)
    }

    /// Map, filter and deduplicate spans over `text`. Pure; no engine call.
    pub fn mentions_from_spans(&self, text: &str, spans: Vec<RawSpan>) -> DocumentMentions {
        // Char -> byte index built once per document
        let indexed = CharIndexedText::new(text);

        // Map labels, drop blanks, build snippets
        let raw: Vec<Mention> = spans
            .into_iter()
            .filter_map(|span| self.to_mention(&indexed, span))
            .collect();
        let raw_count = raw.len();

        // Collapse repeats, then tally what survived
        let mentions = dedup_mentions(raw);
        let counts_by_type = TypeCounts::from_mentions(&mentions);

        DocumentMentions {
            mentions,
            counts_by_type,
            raw_count,
        }
    }

    fn to_mention(&self, text: &CharIndexedText<'_>, span: RawSpan) -> Option<Mention> {
        let entity_type = self.labels.map(&span.label)?;

        let surface = span.text.trim();
        if surface.is_empty() {
            return None;
        }

        Some(Mention {
            text: surface.to_string(),
            entity_type,
            normalized_text: normalize_text(surface),
            context: text
                .context(span.start_char, span.end_char, self.context_radius)
                .to_string(),
            source_label: span.label,
            start_char: span.start_char,
            end_char: span.end_char,
            position: span.start_char,
        })
    }
}

/// Keep the first mention for each (type, normalized text, position), in order.
pub fn dedup_mentions(mentions: Vec<Mention>) -> Vec<Mention> {
    let mut seen: HashSet<(EntityType, String, usize)> = HashSet::new();

    mentions
        .into_iter()
        .filter(|m| {
            let (entity_type, normalized, position) = m.dedup_key();
            seen.insert((entity_type, normalized.to_string(), position))
        })
        .collect()
}
