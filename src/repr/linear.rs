//! Linear regression model.

/// Linear model: `prediction = intercept + weights . features`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearModel {
    weights: Vec<f32>,
    intercept: f32,
}

impl LinearModel {
    /// Create a linear model from per-feature weights and an intercept.
    pub fn new(weights: Vec<f32>, intercept: f32) -> Self {
        Self { weights, intercept }
    }

    /// Number of features the model expects.
    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    /// Per-feature weights.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Intercept term.
    pub fn intercept(&self) -> f32 {
        self.intercept
    }

    /// Predict for one sample.
    ///
    /// The dot product accumulates in f64; extra sample values beyond the
    /// weight vector are ignored, missing ones contribute zero.
    pub fn predict_row(&self, sample: &[f32]) -> f64 {
        let dot: f64 = self
            .weights
            .iter()
            .zip(sample)
            .map(|(&w, &x)| w as f64 * x as f64)
            .sum();
        self.intercept as f64 + dot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn predicts_dot_plus_intercept() {
        let model = LinearModel::new(vec![2.0, -1.0, 0.5], 10.0);
        assert_relative_eq!(model.predict_row(&[1.0, 2.0, 4.0]), 12.0);
    }

    #[test]
    fn empty_weights_predict_intercept() {
        let model = LinearModel::new(vec![], 3.0);
        assert_eq!(model.predict_row(&[1.0, 2.0]), 3.0);
    }
}
