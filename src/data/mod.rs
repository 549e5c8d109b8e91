//! Dataset container, schema, and CSV ingest.
//!
//! The reference dataset is a small CSV of already-encoded insurance records.
//! It is loaded once at startup and used for two things only: drawing the
//! fixed background sample for attribution, and computing the dataset-wide
//! average charge for the comparison sentence.

mod csv;
mod dataset;
mod schema;

pub use self::csv::{read_csv, FEATURE_COLUMNS, TARGET_COLUMN};
pub use dataset::Dataset;
pub use schema::DatasetSchema;

/// Errors produced while loading or sampling the reference dataset.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse dataset CSV: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("dataset contains no rows")]
    Empty,

    #[error("non-finite value in column '{column}' at row {row}")]
    NonFinite { column: String, row: usize },

    #[error("schema has {schema} columns but features matrix has {features}")]
    SchemaMismatch { schema: usize, features: usize },

    #[error("target length {target} does not match sample count {samples}")]
    TargetLengthMismatch { target: usize, samples: usize },

    #[error("requested sample of {requested} rows but dataset has only {available}")]
    SampleTooLarge { requested: usize, available: usize },

    #[error("dataset has no target column")]
    MissingTarget,
}
