use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::RecognitionEngine;
use crate::schema::RawSpan;

pub const DEFAULT_MODEL: &str = "en_core_web_sm";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Client for a spaCy model served over HTTP.
#[derive(Clone)]
pub struct HttpNerEngine {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct NerRequest<'a> {
    model: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct NerResponse {
    ents: Vec<WireSpan>,
}

#[derive(Deserialize)]
struct WireSpan {
    label: String,
    text: String,
    start_char: usize,
    end_char: usize,
}

impl From<WireSpan> for RawSpan {
    fn from(span: WireSpan) -> Self {
        Self {
            label: span.label,
            text: span.text,
            start_char: span.start_char,
            end_char: span.end_char,
        }
    }
}

#[derive(Deserialize)]
struct ModelsResponse {
    models: Vec<String>,
}

fn model_missing_hint(model: &str) -> String {
    format!(
        "spaCy model '{}' not installed. Try:\n  python3 -m spacy download {}\nor install a different model and pass --model.",
        model, model
    )
}

impl HttpNerEngine {
    pub fn new(base_url: String, model: String) -> Self {
        Self::with_client(base_url, model, reqwest::Client::new())
    }

    pub fn with_client(base_url: String, model: String, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            client,
        }
    }

    /// Connect to the service and make sure it serves `model`.
    pub async fn load(base_url: &str, model: &str) -> Result<Self> {
        let engine = Self::new(base_url.to_string(), model.to_string());
        engine.check_model().await?;
        Ok(engine)
    }

    /// Fails with an install hint when the service does not list our model.
    pub async fn check_model(&self) -> Result<()> {
        let url = format!("{}/models", self.base_url);

        let response = self.client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Recognition service unreachable at {} (check NER_URL)", self.base_url))?;

        if !response.status().is_success() {
            anyhow::bail!("Recognition service model listing failed: {}", response.status());
        }

        let listing: ModelsResponse = response
            .json()
            .await
            .context("Failed to parse model listing")?;

        if !listing.models.iter().any(|m| *m == self.model) {
            anyhow::bail!(model_missing_hint(&self.model));
        }

        info!(model = %self.model, base_url = %self.base_url, "Recognition model loaded");
        Ok(())
    }
}

#[async_trait]
impl RecognitionEngine for HttpNerEngine {
    fn kind(&self) -> &str {
        "spacy"
    }

    fn identifier(&self) -> &str {
        &self.model
    }

    async fn process(&self, text: &str) -> Result<Vec<RawSpan>> {
        let url = format!("{}/ner", self.base_url);

        let request = NerRequest {
            model: &self.model,
            text,
        };

        let response = self.client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to recognition service")?;

        if !response.status().is_success() {
            anyhow::bail!("Recognition request failed: {}", response.status());
        }

        let ner_response: NerResponse = response
            .json()
            .await
            .context("Failed to parse recognition response")?;

        debug!(spans = ner_response.ents.len(), "Recognition response received");
        Ok(ner_response.ents.into_iter().map(RawSpan::from).collect())
    }
}
