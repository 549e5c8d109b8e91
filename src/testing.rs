//! Deterministic fixtures for tests.
//!
//! Small hand-built models over the real 8-column schema, a synthetic
//! insurance dataset, and helpers to materialize both as on-disk artifacts.
//! The numbers are arbitrary but shaped like the real problem: smoking
//! dominates, age and BMI matter, region barely does.

use std::fs;
use std::path::Path;

use ndarray::{Array1, Array2};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::app::AppConfig;
use crate::data::{Dataset, DatasetSchema, FEATURE_COLUMNS};
use crate::model::{ModelKind, ModelMeta, ModelRepr, Regressor};
use crate::persist::save_model;
use crate::repr::{Aggregation, Forest, LinearModel, Tree};

/// Metadata over the canonical 8-column schema.
pub fn fixture_meta() -> ModelMeta {
    ModelMeta::from_names(FEATURE_COLUMNS)
}

/// A stump splitting one feature: `feature < threshold` -> `low`, else `high`.
pub fn stump(feature: u32, threshold: f32, low: f32, high: f32) -> Tree {
    Tree::from_arrays(
        vec![feature, 0, 0],
        vec![threshold, 0.0, 0.0],
        vec![true, false, false],
        vec![1, 0, 0],
        vec![2, 0, 0],
        vec![false, true, true],
        vec![0.0, low, high],
    )
    .expect("fixture stump is structurally valid")
}

/// Boosted-tree fixture: smoking dominates, then age and BMI.
pub fn fixture_gbdt() -> Regressor {
    let trees = vec![
        stump(7, 0.5, -2000.0, 18000.0), // smoker_yes
        stump(0, 42.5, -1500.0, 2500.0), // age
        stump(1, 30.0, -500.0, 1200.0),  // bmi
    ];
    Regressor::new(
        ModelKind::Gbdt,
        fixture_meta(),
        ModelRepr::Forest(Forest::new(trees, 9500.0, Aggregation::Sum)),
    )
    .expect("fixture gbdt is valid")
}

/// Random-forest fixture: three full-range trees averaged.
pub fn fixture_random_forest() -> Regressor {
    let trees = vec![
        stump(7, 0.5, 8000.0, 32000.0),
        stump(7, 0.5, 7000.0, 30000.0),
        stump(0, 39.5, 6500.0, 14500.0),
    ];
    Regressor::new(
        ModelKind::RandomForest,
        fixture_meta(),
        ModelRepr::Forest(Forest::new(trees, 0.0, Aggregation::Mean)),
    )
    .expect("fixture random forest is valid")
}

/// Linear fixture with plausible per-column weights.
pub fn fixture_linear() -> Regressor {
    let weights = vec![
        255.0,   // age
        330.0,   // bmi
        470.0,   // children
        -130.0,  // sex_male
        -350.0,  // region_northwest
        -1035.0, // region_southeast
        -960.0,  // region_southwest
        23800.0, // smoker_yes
    ];
    Regressor::new(
        ModelKind::Linear,
        fixture_meta(),
        ModelRepr::Linear(LinearModel::new(weights, -11900.0)),
    )
    .expect("fixture linear model is valid")
}

/// Synthetic insurance dataset with `n_samples` rows, deterministic per seed.
pub fn fixture_dataset(n_samples: usize, seed: u64) -> Dataset {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut features = Array2::<f32>::zeros((FEATURE_COLUMNS.len(), n_samples));
    let mut charges = Array1::<f32>::zeros(n_samples);

    for s in 0..n_samples {
        let age = rng.gen_range(18..=64) as f32;
        let bmi = rng.gen_range(16.0..=45.0_f32);
        let children = rng.gen_range(0..=5) as f32;
        let sex_male = rng.gen_range(0..=1) as f32;
        let smoker_yes = if rng.gen_range(0..5) == 0 { 1.0 } else { 0.0 };
        let region = rng.gen_range(0..4);
        let row = [
            age,
            bmi,
            children,
            sex_male,
            if region == 1 { 1.0 } else { 0.0 },
            if region == 2 { 1.0 } else { 0.0 },
            if region == 3 { 1.0 } else { 0.0 },
            smoker_yes,
        ];
        for (f, &v) in row.iter().enumerate() {
            features[(f, s)] = v;
        }
        charges[s] =
            2500.0 + 240.0 * age + 320.0 * bmi + 450.0 * children + 22000.0 * smoker_yes;
    }

    Dataset::new(
        features,
        DatasetSchema::from_names(FEATURE_COLUMNS),
        Some(charges),
    )
    .expect("fixture dataset is valid")
}

/// Serialize a dataset back to the CSV layout `read_csv` expects.
pub fn dataset_to_csv(dataset: &Dataset) -> String {
    let target = dataset.target().expect("fixture dataset has charges");
    let mut out = String::new();
    out.push_str(&FEATURE_COLUMNS.join(","));
    out.push_str(",charges\n");
    for s in 0..dataset.n_samples() {
        let row = dataset.sample_row(s);
        let fields: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        out.push_str(&fields.join(","));
        out.push_str(&format!(",{}\n", target[s]));
    }
    out
}

/// Write the three model artifacts and the dataset CSV under `root`,
/// returning the matching [`AppConfig`].
pub fn write_fixture_artifacts(root: &Path) -> AppConfig {
    let models_dir = root.join("models");
    let data_dir = root.join("data");
    fs::create_dir_all(&models_dir).expect("create models dir");
    fs::create_dir_all(&data_dir).expect("create data dir");

    let config = AppConfig {
        models_dir,
        data_path: data_dir.join("insurance_cleaned.csv"),
    };

    save_model(config.model_path(ModelKind::Gbdt), &fixture_gbdt()).expect("write gbdt");
    save_model(
        config.model_path(ModelKind::RandomForest),
        &fixture_random_forest(),
    )
    .expect("write random forest");
    save_model(config.model_path(ModelKind::Linear), &fixture_linear()).expect("write linear");

    let dataset = fixture_dataset(150, 7);
    fs::write(&config.data_path, dataset_to_csv(&dataset)).expect("write dataset csv");

    config
}
