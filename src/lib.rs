//! chargecast: healthcare charge estimation with per-feature attribution.
//!
//! Loads three pre-trained regression models (gradient-boosted trees, random
//! forest, linear regression) and a reference dataset, encodes a patient
//! profile into the models' training schema, and produces a charge estimate
//! together with an additive explanation of which features drove it.
//!
//! # Key Types
//!
//! - [`AppContext`] - Models, background sample, and average charge, loaded once
//! - [`PatientProfile`] / [`EncodedRow`] - Raw input and its model-ready encoding
//! - [`CostReport`] - One estimate: prediction, deviation, attribution, ranking
//! - [`Regressor`] - A loaded model with metadata and single-row inference
//! - [`Explanation`] - Base value plus signed per-feature contributions
//!
//! # Pipeline
//!
//! Build an [`AppContext`] from artifact paths, then call [`estimate`] per
//! request. Every request re-runs encoding, inference, and attribution from
//! scratch; the context itself is read-only for the process lifetime.

pub mod app;
pub mod data;
pub mod explain;
pub mod model;
pub mod persist;
pub mod report;
pub mod repr;
pub mod testing;

// High-level pipeline types
pub use app::{
    estimate, AppConfig, AppContext, AppError, CostBand, CostReport, Deviation, EncodedRow,
    ModelComparison, PatientProfile, ProfileError, Region, Sex, Smoker,
};

// Model and data types (for loading artifacts directly)
pub use data::{DataError, Dataset, DatasetSchema};
pub use explain::{Explanation, FeatureContribution};
pub use model::{ModelKind, ModelMeta, Regressor, SchemaError};
pub use persist::{load_model, save_model, PersistError};
