use chrono::{DateTime, Local};
use clap::Parser;
use extract::http_engine::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use ingest::DocumentFilter;
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// File whose presence marks the host project root (where `.env` lives).
const ROOT_MARKER: &str = "prisma/schema.prisma";

/// Extract named entities from stored documents and write a JSON report.
#[derive(Parser, Debug)]
#[command(name = "ner-extract")]
pub struct Args {
    /// Only process a single dataset
    #[arg(long)]
    pub dataset: Option<String>,

    /// Only process a single document id
    #[arg(long, alias = "file-id")]
    pub document_id: Option<i64>,

    /// Max documents to process
    #[arg(long, default_value_t = 25, allow_negative_numbers = true)]
    pub limit: i64,

    /// Offset for pagination
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub offset: i64,

    /// Recognition model name
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Output JSON path (default: <project>/output/ner-entities-<timestamp>.json)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Recognition service base URL (overrides NER_URL)
    #[arg(long)]
    pub ner_url: Option<String>,
}

/// Settings read from the process environment at the boundary.
#[derive(Debug, Clone, Default)]
pub struct EnvVars {
    pub database_url: Option<String>,
    pub ner_url: Option<String>,
    pub output_dir: Option<String>,
}

impl EnvVars {
    pub fn from_process() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").ok(),
            ner_url: std::env::var("NER_URL").ok(),
            output_dir: std::env::var("NER_OUTPUT_DIR").ok(),
        }
    }
}

/// Everything a run needs, resolved once.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub database_url: String,
    pub ner_url: String,
    pub model: String,
    pub filter: DocumentFilter,
    pub output_path: PathBuf,
}

impl RunConfig {
    pub fn resolve(
        args: Args,
        env: EnvVars,
        project_root: &Path,
        now: DateTime<Local>,
    ) -> Result<Self, CliError> {
        if args.limit <= 0 {
            return Err(CliError::Config("--limit must be > 0".to_string()));
        }
        if args.offset < 0 {
            return Err(CliError::Config("--offset must be >= 0".to_string()));
        }

        let database_url = non_empty(env.database_url).ok_or_else(|| {
            CliError::Config(
                "DATABASE_URL missing. Set it in your environment or in the project .env".to_string(),
            )
        })?;

        let mut filter = DocumentFilter::new(args.limit as usize, args.offset as usize);
        if let Some(dataset) = non_empty(args.dataset) {
            filter = filter.with_dataset(dataset);
        }
        if let Some(id) = args.document_id {
            filter = filter.with_document_id(id);
        }

        let ner_url = non_empty(args.ner_url)
            .or_else(|| non_empty(env.ner_url))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let output_path = args.output.unwrap_or_else(|| {
            let dir = non_empty(env.output_dir)
                .map(PathBuf::from)
                .unwrap_or_else(|| project_root.join("output"));
            report::default_output_path(&dir, now)
        });

        Ok(Self {
            database_url,
            ner_url,
            model: args.model,
            filter,
            output_path,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Walk up from `start` looking for the project marker; fall back to `start`.
pub fn find_project_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .take(10)
        .find(|dir| dir.join(ROOT_MARKER).exists())
        .unwrap_or(start)
        .to_path_buf()
}

/// Load `<root>/.env` if present, returning the path that was loaded.
/// Runs before logging is set up, so callers report the outcome.
pub fn load_dotenv(project_root: &Path) -> Option<PathBuf> {
    let path = project_root.join(".env");
    dotenvy::from_path(&path).ok().map(|()| path)
}
