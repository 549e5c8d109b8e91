//! End-to-end pipeline tests over fixture artifacts.

use approx::assert_relative_eq;

use chargecast::testing::{
    dataset_to_csv, fixture_dataset, fixture_gbdt, fixture_linear, fixture_random_forest,
    write_fixture_artifacts,
};
use chargecast::{
    estimate, AppContext, AppError, DataError, Deviation, EncodedRow, PatientProfile, Region, Sex,
    Smoker,
};
use chargecast::model::{ModelMeta, ModelRepr, Regressor};
use chargecast::repr::LinearModel;

fn baseline_profile() -> PatientProfile {
    PatientProfile::new(30, 25.0, Sex::Male, 0, Smoker::No, Region::Northeast).unwrap()
}

fn loaded_context(dir: &std::path::Path) -> AppContext {
    let config = write_fixture_artifacts(dir);
    AppContext::load(&config).expect("context loads from fixture artifacts")
}

#[test]
fn context_loads_and_derives_startup_state() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = loaded_context(dir.path());

    assert_eq!(ctx.background().n_samples(), 100);
    assert_eq!(ctx.background().n_features(), 8);
    assert!(ctx.background().target().is_none());
    assert!(ctx.average_charge() > 0.0);
    assert_eq!(ctx.models().len(), 3);
}

#[test]
fn background_sample_is_reproducible_across_loads() {
    let dir = tempfile::tempdir().unwrap();
    let a = loaded_context(dir.path());
    let b = loaded_context(dir.path());
    for i in 0..100 {
        assert_eq!(a.background().sample_row(i), b.background().sample_row(i));
    }
}

#[test]
fn end_to_end_estimate() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = loaded_context(dir.path());
    let report = estimate(&ctx, &baseline_profile()).unwrap();

    // Prediction is the primary model's output for the encoded row.
    let row = EncodedRow::from_profile(&baseline_profile());
    assert_eq!(row.as_slice(), &[30.0, 25.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
    assert_relative_eq!(
        report.prediction,
        ctx.primary().predict_row(row.as_slice()),
        max_relative = 1e-12
    );

    // Attribution sums back to the prediction.
    assert_relative_eq!(
        report.explanation.base_value + report.explanation.sum_contributions(),
        report.prediction,
        max_relative = 1e-6
    );
    assert_eq!(report.explanation.contributions.len(), 8);

    // Ranking is ascending over the three models.
    let ranked = report.comparison.ranked();
    assert!(ranked[0].prediction <= ranked[1].prediction);
    assert!(ranked[1].prediction <= ranked[2].prediction);

    // The deviation branch matches the sign of (prediction - average).
    match report.deviation {
        Deviation::Higher(percent) => {
            assert!(report.prediction > report.average_charge);
            assert!(percent > 0.0);
        }
        Deviation::Lower(percent) => {
            assert!(report.prediction < report.average_charge);
            assert!(percent > 0.0);
        }
        Deviation::Same => assert_eq!(report.prediction, report.average_charge),
    }
}

#[test]
fn repeated_estimates_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = loaded_context(dir.path());
    let profile =
        PatientProfile::new(52, 31.2, Sex::Female, 2, Smoker::Yes, Region::Southeast).unwrap();

    let a = estimate(&ctx, &profile).unwrap();
    let b = estimate(&ctx, &profile).unwrap();
    assert_eq!(a.prediction, b.prediction);
    assert_eq!(a.explanation.base_value, b.explanation.base_value);
    assert_eq!(a.explanation.contributions, b.explanation.contributions);
}

#[test]
fn smoking_raises_the_estimate() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = loaded_context(dir.path());

    let non_smoker =
        PatientProfile::new(40, 28.0, Sex::Male, 1, Smoker::No, Region::Northwest).unwrap();
    let smoker =
        PatientProfile::new(40, 28.0, Sex::Male, 1, Smoker::Yes, Region::Northwest).unwrap();

    let a = estimate(&ctx, &non_smoker).unwrap();
    let b = estimate(&ctx, &smoker).unwrap();
    assert!(b.prediction > a.prediction);

    // smoker_yes carries the dominant contribution in the smoker's report
    let top = &b.explanation.top_k(1)[0];
    assert_eq!(top.name, "smoker_yes");
    assert!(top.contribution > 0.0);
}

#[test]
fn schema_mismatch_fails_the_request_not_the_process() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = loaded_context(dir.path());

    // A model trained on differently named columns.
    let wrong = Regressor::new(
        chargecast::ModelKind::Linear,
        ModelMeta::from_names(["a", "b", "c", "d", "e", "f", "g", "h"]),
        ModelRepr::Linear(LinearModel::new(vec![0.0; 8], 1000.0)),
    )
    .unwrap();
    let bad_ctx = AppContext::from_parts(
        fixture_gbdt(),
        fixture_random_forest(),
        wrong,
        ctx.background().clone(),
        ctx.average_charge(),
    );

    let err = estimate(&bad_ctx, &baseline_profile()).unwrap_err();
    match err {
        AppError::Schema(schema) => {
            assert_eq!(schema.position, 0);
            assert_eq!(schema.found, "age");
        }
        other => panic!("expected schema error, got {other}"),
    }

    // The context is still usable afterwards.
    assert!(estimate(&ctx, &baseline_profile()).is_ok());
}

#[test]
fn undersized_dataset_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture_artifacts(dir.path());
    // Overwrite the CSV with fewer rows than the background sample needs.
    std::fs::write(&config.data_path, dataset_to_csv(&fixture_dataset(10, 3))).unwrap();

    let err = AppContext::load(&config).unwrap_err();
    assert!(matches!(
        err,
        AppError::Data(DataError::SampleTooLarge {
            requested: 100,
            available: 10
        })
    ));
}

#[test]
fn all_three_fixture_models_agree_on_schema() {
    let columns = EncodedRow::schema();
    for model in [fixture_gbdt(), fixture_random_forest(), fixture_linear()] {
        model.validate_schema(&columns).unwrap();
    }
}
