//! Permutation-based interventional attribution.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::data::Dataset;
use crate::model::Regressor;

use super::{Explanation, ExplainError, FeatureContribution};

/// Seed for the permutation draws. Fixed so a given (model, background, row)
/// always yields the same explanation.
const PERMUTATION_SEED: u64 = 42;

/// Interventional Shapley-value explainer over a background sample.
///
/// For every background row, one random feature permutation is walked from
/// the background row toward the explained row, accumulating each feature's
/// marginal effect on the prediction; contributions are averaged over all
/// background rows. Because every walk telescopes from the background
/// prediction to the row prediction, the contributions sum to
/// `prediction - base_value` exactly (up to float summation), where the base
/// value is the mean prediction over the background.
pub struct PermutationExplainer<'a> {
    model: &'a Regressor,
    background: &'a Dataset,
    seed: u64,
}

impl<'a> PermutationExplainer<'a> {
    /// Create an explainer for a model and background sample.
    pub fn new(model: &'a Regressor, background: &'a Dataset) -> Self {
        Self {
            model,
            background,
            seed: PERMUTATION_SEED,
        }
    }

    /// Override the permutation seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Explain one encoded row.
    ///
    /// # Errors
    ///
    /// Fails if the row length does not match the background's feature count
    /// or the background is empty.
    pub fn explain(&self, row: &[f32]) -> Result<Explanation, ExplainError> {
        let n_features = self.background.n_features();
        if row.len() != n_features {
            return Err(ExplainError::RowLengthMismatch {
                row: row.len(),
                background: n_features,
            });
        }
        let n_background = self.background.n_samples();
        if n_background == 0 {
            return Err(ExplainError::EmptyBackground);
        }

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(self.seed);
        let prediction = self.model.predict_row(row);

        let mut base_sum = 0.0f64;
        let mut contributions = vec![0.0f64; n_features];
        let mut order: Vec<usize> = (0..n_features).collect();

        for b in 0..n_background {
            let mut x = self.background.sample_row(b);
            let mut before = self.model.predict_row(&x);
            base_sum += before;

            order.shuffle(&mut rng);
            for &f in &order {
                x[f] = row[f];
                let after = self.model.predict_row(&x);
                contributions[f] += after - before;
                before = after;
            }
        }

        let scale = 1.0 / n_background as f64;
        let base_value = base_sum * scale;
        let contributions = contributions
            .into_iter()
            .enumerate()
            .map(|(index, total)| FeatureContribution {
                index,
                name: self
                    .background
                    .schema()
                    .name(index)
                    .unwrap_or_default()
                    .to_string(),
                value: row[index],
                contribution: total * scale,
            })
            .collect();

        Ok(Explanation {
            base_value,
            prediction,
            contributions,
        })
    }
}
