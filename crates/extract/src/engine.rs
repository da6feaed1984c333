use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::schema::RawSpan;

/// A loaded named-entity recognition model.
#[async_trait]
pub trait RecognitionEngine: Send + Sync {
    /// Engine family, e.g. "spacy".
    fn kind(&self) -> &str;

    /// Model identifier, e.g. "en_core_web_sm".
    fn identifier(&self) -> &str;

    /// Run recognition over `text`, returning spans in engine order.
    async fn process(&self, text: &str) -> Result<Vec<RawSpan>>;
}

/// Replays canned spans. Deterministic stand-in for a real model.
#[derive(Default)]
pub struct FixtureEngine {
    by_text: HashMap<String, Vec<RawSpan>>,
    fallback: Vec<RawSpan>,
    fail_on: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl FixtureEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spans returned when the engine sees exactly `text`.
    pub fn with_text(mut self, text: &str, spans: Vec<RawSpan>) -> Self {
        self.by_text.insert(text.to_string(), spans);
        self
    }

    /// Spans returned for any text without a specific entry.
    pub fn with_fallback(mut self, spans: Vec<RawSpan>) -> Self {
        self.fallback = spans;
        self
    }

    /// Fail when the processed text contains `needle`.
    pub fn failing_on(mut self, needle: &str) -> Self {
        self.fail_on = Some(needle.to_string());
        self
    }

    /// Shared counter of `process` invocations.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl RecognitionEngine for FixtureEngine {
    fn kind(&self) -> &str {
        "fixture"
    }

    fn identifier(&self) -> &str {
        "fixture"
    }

    async fn process(&self, text: &str) -> Result<Vec<RawSpan>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(needle) = &self.fail_on {
            if text.contains(needle.as_str()) {
                anyhow::bail!("fixture engine failure on {:?}", needle);
            }
        }

        Ok(self
            .by_text
            .get(text)
            .unwrap_or(&self.fallback)
            .clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixture_replays_and_counts() {
        let engine = FixtureEngine::new()
            .with_text("a", vec![RawSpan::new("PERSON", "a", 0, 1)])
            .with_fallback(vec![]);
        let calls = engine.call_counter();

        assert_eq!(engine.process("a").await.unwrap().len(), 1);
        assert!(engine.process("b").await.unwrap().is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fixture_failure() {
        let engine = FixtureEngine::new().failing_on("boom");

        assert!(engine.process("it goes boom").await.is_err());
        assert!(engine.process("quiet").await.is_ok());
    }
}
