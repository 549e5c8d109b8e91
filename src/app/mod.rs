//! The request pipeline: profile in, cost report out.
//!
//! [`AppContext`] holds everything loaded at startup (models, background
//! sample, average charge). [`estimate`] runs the five pipeline stages for
//! one request: encode, validate schema, predict with all three models,
//! attribute the primary prediction, assemble the report. Requests are
//! stateless and synchronous; a failed request returns an [`AppError`]
//! without touching the context.

mod context;
mod encode;
mod pipeline;
mod profile;

pub use context::{AppConfig, AppContext, BACKGROUND_ROWS, BACKGROUND_SEED};
pub use encode::EncodedRow;
pub use pipeline::{estimate, CostBand, CostReport, Deviation, ModelComparison, RankedModel};
pub use profile::{PatientProfile, ProfileError, Region, Sex, Smoker};

use crate::data::DataError;
use crate::explain::ExplainError;
use crate::model::SchemaError;
use crate::persist::PersistError;

/// Errors from context loading or request handling.
///
/// Startup errors (data, persist) are fatal to the caller that is building
/// the context; request-time errors (schema, explain) fail only the request.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Explain(#[from] ExplainError),
}
