//! Additive per-feature attribution.
//!
//! Decomposes one prediction into a base value plus signed per-feature
//! contributions that sum back to the prediction. The computation sits
//! behind the narrow [`attribute`] seam; the rest of the pipeline never
//! sees the algorithm, only the [`Explanation`] it returns.

mod permutation;

pub use permutation::PermutationExplainer;

use crate::data::Dataset;
use crate::model::Regressor;

/// One feature's share of a prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureContribution {
    /// Feature index in the encoded row.
    pub index: usize,
    /// Feature name.
    pub name: String,
    /// The feature's value in the explained row.
    pub value: f32,
    /// Signed contribution to the prediction.
    pub contribution: f64,
}

/// Additive explanation of a single prediction.
///
/// Invariant: `base_value + sum(contributions) == prediction` up to
/// floating-point summation error.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Expected prediction over the background sample.
    pub base_value: f64,
    /// The model's actual prediction for the explained row.
    pub prediction: f64,
    /// Per-feature contributions, in encoded-row order.
    pub contributions: Vec<FeatureContribution>,
}

impl Explanation {
    /// Sum of all contributions.
    pub fn sum_contributions(&self) -> f64 {
        self.contributions.iter().map(|c| c.contribution).sum()
    }

    /// Contributions sorted by absolute value, largest first.
    pub fn sorted_contributions(&self) -> Vec<&FeatureContribution> {
        let mut sorted: Vec<&FeatureContribution> = self.contributions.iter().collect();
        sorted.sort_by(|a, b| {
            b.contribution
                .abs()
                .partial_cmp(&a.contribution.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sorted
    }

    /// The `k` largest-magnitude contributions.
    pub fn top_k(&self, k: usize) -> Vec<&FeatureContribution> {
        self.sorted_contributions().into_iter().take(k).collect()
    }

    /// Check the additivity invariant within `tolerance`.
    pub fn is_additive(&self, tolerance: f64) -> bool {
        (self.base_value + self.sum_contributions() - self.prediction).abs() <= tolerance
    }
}

/// Errors computing an attribution.
#[derive(Debug, thiserror::Error)]
pub enum ExplainError {
    #[error("row has {row} features but background has {background}")]
    RowLengthMismatch { row: usize, background: usize },

    #[error("background sample is empty")]
    EmptyBackground,
}

/// Attribute one prediction to its features.
///
/// The one entry point the pipeline uses: given a model, the fixed
/// background sample, and one encoded row, produce the additive
/// decomposition. Deterministic for a given `(model, background, row)`.
pub fn attribute(
    model: &Regressor,
    background: &Dataset,
    row: &[f32],
) -> Result<Explanation, ExplainError> {
    PermutationExplainer::new(model, background).explain(row)
}
