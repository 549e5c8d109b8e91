//! Model artifact serialization.
//!
//! Each pre-trained model lives in its own JSON file: a versioned envelope
//! holding the model kind, metadata, and a payload of plain arrays. Payload
//! types are deserialized as-is and then converted into the validated
//! representations in [`crate::repr`]; nothing is trusted until that
//! conversion passes.

mod payload;

pub use payload::{Artifact, ForestPayload, LinearPayload, ModelPayload, TreePayload};

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::model::{ModelError, Regressor};
use crate::repr::TreeValidationError;

/// Current artifact format version. Artifacts with a newer version are
/// rejected rather than misread.
pub const FORMAT_VERSION: u32 = 1;

/// Errors loading or saving a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model artifact: {0}")]
    Json(#[from] serde_json::Error),

    #[error("artifact format version {found} is not supported (current: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("invalid tree in artifact: {0}")]
    Tree(#[from] TreeValidationError),

    #[error("invalid model in artifact: {0}")]
    Model(#[from] ModelError),
}

/// Load and validate a model artifact from disk.
pub fn load_model(path: impl AsRef<Path>) -> Result<Regressor, PersistError> {
    let file = File::open(path.as_ref())?;
    let artifact: Artifact = serde_json::from_reader(BufReader::new(file))?;
    artifact.into_regressor()
}

/// Write a model artifact to disk.
///
/// Used for fixture generation and round-trip tests; the application itself
/// never writes artifacts.
pub fn save_model(path: impl AsRef<Path>, model: &Regressor) -> Result<(), PersistError> {
    let artifact = Artifact::from_regressor(model);
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(BufWriter::new(file), &artifact)?;
    Ok(())
}
