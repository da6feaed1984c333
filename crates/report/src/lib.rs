pub mod stats;
pub mod schema;
pub mod aggregator;
pub mod writer;

pub use stats::RunStats;
pub use schema::{DocumentResult, RunReport};
pub use aggregator::{Aggregator, BatchAccumulator};
pub use writer::{default_output_path, render_report, write_report};
