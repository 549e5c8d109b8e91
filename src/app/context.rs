//! Process-wide application context.

use std::path::PathBuf;

use tracing::info;

use crate::data::{read_csv, Dataset};
use crate::model::{ModelKind, Regressor};
use crate::persist::load_model;

use super::AppError;

/// Rows in the attribution background sample.
pub const BACKGROUND_ROWS: usize = 100;

/// Seed for drawing the background sample.
pub const BACKGROUND_SEED: u64 = 42;

/// Artifact locations.
///
/// Defaults mirror the deployed layout: `models/<kind>.json` next to
/// `data/insurance_cleaned.csv`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the three model artifacts.
    pub models_dir: PathBuf,
    /// Path to the reference dataset CSV.
    pub data_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("models"),
            data_path: PathBuf::from("data/insurance_cleaned.csv"),
        }
    }
}

impl AppConfig {
    /// Artifact path for a model kind.
    pub fn model_path(&self, kind: ModelKind) -> PathBuf {
        self.models_dir.join(format!("{}.json", kind.as_str()))
    }
}

/// Everything loaded once at startup, read-only afterwards.
///
/// Holds the three models, the fixed background sample, and the dataset-wide
/// average charge. Built with [`AppContext::load`]; any missing or corrupt
/// artifact makes the load fail, and the process must not serve requests
/// without a context.
#[derive(Debug)]
pub struct AppContext {
    gbdt: Regressor,
    random_forest: Regressor,
    linear: Regressor,
    background: Dataset,
    average_charge: f64,
}

impl AppContext {
    /// Load all artifacts and derive the startup state.
    ///
    /// # Errors
    ///
    /// Any I/O, parse, or validation failure is returned as-is; there is no
    /// retry or fallback.
    pub fn load(config: &AppConfig) -> Result<Self, AppError> {
        let dataset = read_csv(&config.data_path)?;
        info!(
            path = %config.data_path.display(),
            rows = dataset.n_samples(),
            "loaded reference dataset"
        );

        let background = dataset.sample(BACKGROUND_ROWS, BACKGROUND_SEED)?;
        let average_charge = dataset.target_mean()?;
        info!(
            rows = background.n_samples(),
            seed = BACKGROUND_SEED,
            average_charge,
            "prepared background sample"
        );

        let gbdt = Self::load_one(config, ModelKind::Gbdt)?;
        let random_forest = Self::load_one(config, ModelKind::RandomForest)?;
        let linear = Self::load_one(config, ModelKind::Linear)?;

        Ok(Self {
            gbdt,
            random_forest,
            linear,
            background,
            average_charge,
        })
    }

    fn load_one(config: &AppConfig, kind: ModelKind) -> Result<Regressor, AppError> {
        let path = config.model_path(kind);
        let model = load_model(&path)?;
        info!(path = %path.display(), kind = %model.kind(), "loaded model artifact");
        Ok(model)
    }

    /// Build a context directly from its parts. Test seam; production code
    /// goes through [`AppContext::load`].
    pub fn from_parts(
        gbdt: Regressor,
        random_forest: Regressor,
        linear: Regressor,
        background: Dataset,
        average_charge: f64,
    ) -> Self {
        Self {
            gbdt,
            random_forest,
            linear,
            background,
            average_charge,
        }
    }

    /// The primary model (the one whose prediction gets attributed).
    pub fn primary(&self) -> &Regressor {
        &self.gbdt
    }

    /// All three models, in canonical order.
    pub fn models(&self) -> [&Regressor; 3] {
        [&self.gbdt, &self.random_forest, &self.linear]
    }

    /// The fixed background sample.
    pub fn background(&self) -> &Dataset {
        &self.background
    }

    /// Dataset-wide mean of the charges column.
    pub fn average_charge(&self) -> f64 {
        self.average_charge
    }
}
