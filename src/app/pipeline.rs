//! The per-request estimation pipeline.

use std::time::Instant;

use tracing::debug;

use crate::explain::{attribute, Explanation};
use crate::model::ModelKind;

use super::context::AppContext;
use super::encode::EncodedRow;
use super::profile::PatientProfile;
use super::AppError;

/// How the prediction sits relative to the dataset-wide average charge.
///
/// Branching is strict (`>`, `<`, exact `==` with no tolerance), matching
/// the deployed behavior; `Same` is practically unreachable but defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Deviation {
    /// Prediction above average; holds the percent above.
    Higher(f64),
    /// Prediction below average; holds the (positive) percent below.
    Lower(f64),
    /// Prediction exactly equal to the average.
    Same,
}

impl Deviation {
    /// Compare a prediction against the average charge.
    pub fn compute(prediction: f64, average: f64) -> Self {
        let diff = prediction - average;
        let percent = diff / average * 100.0;
        if diff > 0.0 {
            Self::Higher(percent)
        } else if diff < 0.0 {
            Self::Lower(percent.abs())
        } else {
            Self::Same
        }
    }
}

/// Position of a model in the ranked comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostBand {
    Lowest,
    Middle,
    Highest,
}

impl CostBand {
    /// Human-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Lowest => "cheapest",
            Self::Middle => "middle",
            Self::Highest => "priciest",
        }
    }
}

/// One model's entry in the ranked comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedModel {
    pub kind: ModelKind,
    pub prediction: f64,
    pub band: CostBand,
}

/// The three models' predictions, ranked cheapest to priciest.
///
/// No reconciliation between models is attempted; exact ties are ordered by
/// model identifier so the ranking stays a deterministic total order.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelComparison {
    ranked: [RankedModel; 3],
}

impl ModelComparison {
    /// Rank three predictions ascending by value, ties broken by kind name.
    pub fn rank(mut predictions: [(ModelKind, f64); 3]) -> Self {
        predictions.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.as_str().cmp(b.0.as_str()))
        });
        let bands = [CostBand::Lowest, CostBand::Middle, CostBand::Highest];
        let ranked = std::array::from_fn(|i| RankedModel {
            kind: predictions[i].0,
            prediction: predictions[i].1,
            band: bands[i],
        });
        Self { ranked }
    }

    /// Entries, cheapest first.
    pub fn ranked(&self) -> &[RankedModel; 3] {
        &self.ranked
    }
}

/// The complete result of one estimation request.
#[derive(Debug, Clone)]
pub struct CostReport {
    /// The primary model's predicted charge.
    pub prediction: f64,
    /// Dataset-wide average charge.
    pub average_charge: f64,
    /// Prediction relative to the average.
    pub deviation: Deviation,
    /// Attribution of the primary prediction.
    pub explanation: Explanation,
    /// All three models, ranked.
    pub comparison: ModelComparison,
}

/// Run the full pipeline for one profile.
///
/// Stages: encode, validate schema against every model, predict with all
/// three, attribute the primary prediction against the background sample,
/// assemble the report. Nothing is cached; identical inputs re-run the whole
/// pipeline. Errors fail this request only.
pub fn estimate(ctx: &AppContext, profile: &PatientProfile) -> Result<CostReport, AppError> {
    let started = Instant::now();

    let row = EncodedRow::from_profile(profile);
    let columns = EncodedRow::schema();
    for model in ctx.models() {
        model.validate_schema(&columns)?;
    }

    let [gbdt, random_forest, linear] = ctx.models();
    let predictions = [
        (gbdt.kind(), gbdt.predict_row(row.as_slice())),
        (random_forest.kind(), random_forest.predict_row(row.as_slice())),
        (linear.kind(), linear.predict_row(row.as_slice())),
    ];
    let comparison = ModelComparison::rank(predictions);

    let explanation = attribute(ctx.primary(), ctx.background(), row.as_slice())?;
    let prediction = explanation.prediction;
    let deviation = Deviation::compute(prediction, ctx.average_charge());

    debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        prediction, "estimate complete"
    );

    Ok(CostReport {
        prediction,
        average_charge: ctx.average_charge(),
        deviation,
        explanation,
        comparison,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deviation_branches_follow_sign() {
        assert_eq!(Deviation::compute(150.0, 100.0), Deviation::Higher(50.0));
        assert_eq!(Deviation::compute(75.0, 100.0), Deviation::Lower(25.0));
        assert_eq!(Deviation::compute(100.0, 100.0), Deviation::Same);
    }

    #[test]
    fn ranking_is_ascending() {
        let comparison = ModelComparison::rank([
            (ModelKind::Gbdt, 300.0),
            (ModelKind::RandomForest, 100.0),
            (ModelKind::Linear, 200.0),
        ]);
        let ranked = comparison.ranked();
        assert_eq!(ranked[0].kind, ModelKind::RandomForest);
        assert_eq!(ranked[0].band, CostBand::Lowest);
        assert_eq!(ranked[1].kind, ModelKind::Linear);
        assert_eq!(ranked[1].band, CostBand::Middle);
        assert_eq!(ranked[2].kind, ModelKind::Gbdt);
        assert_eq!(ranked[2].band, CostBand::Highest);
    }

    #[test]
    fn exact_ties_order_by_kind_name() {
        let comparison = ModelComparison::rank([
            (ModelKind::RandomForest, 100.0),
            (ModelKind::Linear, 100.0),
            (ModelKind::Gbdt, 100.0),
        ]);
        let kinds: Vec<ModelKind> = comparison.ranked().iter().map(|r| r.kind).collect();
        // "gbdt" < "linear" < "random_forest"
        assert_eq!(
            kinds,
            vec![ModelKind::Gbdt, ModelKind::Linear, ModelKind::RandomForest]
        );
    }
}
