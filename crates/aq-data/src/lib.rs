//! Data model and ingestion for the aquascope explorer

pub mod dataset;
pub mod rank;
pub mod record;
pub mod sources;

use thiserror::Error;

// Re-exports
pub use dataset::Dataset;
pub use rank::{rank, RankResult};
pub use record::{columns, Record};
pub use sources::CsvSource;

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown metric column '{0}'")]
    InvalidMetric(String),

    #[error("no records survived ingestion")]
    EmptyDataset,
}
