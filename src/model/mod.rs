//! Loaded regression models: metadata, validation, and single-row inference.

mod meta;
mod regressor;

pub use meta::ModelMeta;
pub use regressor::{ModelError, ModelKind, ModelRepr, Regressor};

/// Schema mismatch between an encoded row and a model's training schema.
///
/// Raised before inference so that a wrong column set or order fails the
/// request with a diagnostic instead of producing silently wrong numbers.
#[derive(Debug, Clone, thiserror::Error)]
#[error(
    "encoded row schema does not match model '{model}': \
     expected column {position} to be '{expected}', found '{found}'"
)]
pub struct SchemaError {
    /// Model whose schema was violated.
    pub model: String,
    /// First mismatching column position.
    pub position: usize,
    /// Column name the model was trained with.
    pub expected: String,
    /// Column name the encoded row supplied (empty if the row is shorter).
    pub found: String,
}
