mod config;
mod error;

use chrono::Local;
use clap::Parser;
use extract::{Extractor, HttpNerEngine};
use ingest::{PgDocumentSource, fetch_documents};
use report::{Aggregator, write_report};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::{Args, EnvVars, RunConfig};
use error::CliError;

struct RunSummary {
    files_written: usize,
    output_path: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // .env first so RUST_LOG from the file reaches the filter
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let project_root = config::find_project_root(&cwd);
    let dotenv = config::load_dotenv(&project_root);

    // Logs go to stderr; stdout carries only the summary line.
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();

    match &dotenv {
        Some(path) => debug!(path = %path.display(), "Loaded .env"),
        None => debug!(root = %project_root.display(), "No .env loaded"),
    }

    let args = Args::parse();

    match run(args, EnvVars::from_process(), &project_root).await {
        Ok(summary) => {
            println!(
                "Wrote {} file result(s) to: {}",
                summary.files_written,
                summary.output_path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            e.exit_code()
        }
    }
}

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"))
}

async fn run(args: Args, env: EnvVars, project_root: &Path) -> Result<RunSummary, CliError> {
    let config = RunConfig::resolve(args, env, project_root, Local::now())?;
    info!(
        model = %config.model,
        ner_url = %config.ner_url,
        output = %config.output_path.display(),
        "Starting entity extraction run"
    );

    let source = PgDocumentSource::connect(&config.database_url).await?;
    let documents = fetch_documents(&source, &config.filter).await?;

    let engine = HttpNerEngine::load(&config.ner_url, &config.model).await?;
    let extractor = Extractor::new(Box::new(engine));

    let report = Aggregator::new(&extractor)
        .run(&documents, config.filter.clone())
        .await?;

    write_report(&report, &config.output_path).await?;

    Ok(RunSummary {
        files_written: report.files.len(),
        output_path: config.output_path,
    })
}
