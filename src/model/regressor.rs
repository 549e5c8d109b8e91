//! The three pre-trained model kinds behind one inference surface.

use serde::{Deserialize, Serialize};

use crate::repr::{Aggregation, Forest, LinearModel};

use super::meta::ModelMeta;
use super::SchemaError;

/// Which of the three pre-trained models this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Gradient-boosted decision trees (the primary model).
    Gbdt,
    /// Random forest.
    RandomForest,
    /// Ordinary linear regression.
    Linear,
}

impl ModelKind {
    /// Stable identifier used in artifacts and tie-breaking.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gbdt => "gbdt",
            Self::RandomForest => "random_forest",
            Self::Linear => "linear",
        }
    }

    /// Human-facing name for reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gbdt => "Gradient Boosted Trees",
            Self::RandomForest => "Random Forest",
            Self::Linear => "Linear Regression",
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated model representation.
#[derive(Clone, Debug)]
pub enum ModelRepr {
    /// Tree ensemble (boosted or bagged, per its aggregation).
    Forest(Forest),
    /// Linear model.
    Linear(LinearModel),
}

/// Errors constructing a [`Regressor`] from its parts.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("feature_names has {names} entries but n_features is {n_features}")]
    FeatureNamesLength { names: usize, n_features: usize },

    #[error("tree split references feature {feature} but model has {n_features} features")]
    SplitOutOfRange { feature: u32, n_features: usize },

    #[error("linear model has {weights} weights but n_features is {n_features}")]
    WeightLength { weights: usize, n_features: usize },

    #[error("model kind '{kind}' cannot hold a {payload} payload")]
    KindPayloadMismatch { kind: ModelKind, payload: &'static str },

    #[error("model kind '{kind}' requires {expected:?} aggregation, found {found:?}")]
    AggregationMismatch {
        kind: ModelKind,
        expected: Aggregation,
        found: Aggregation,
    },
}

/// A loaded, validated regression model.
///
/// Inference is deterministic and uncached: every call traverses the model
/// from scratch. There is no batching - the pipeline only ever predicts one
/// encoded row at a time.
#[derive(Clone, Debug)]
pub struct Regressor {
    kind: ModelKind,
    meta: ModelMeta,
    repr: ModelRepr,
}

impl Regressor {
    /// Assemble and validate a model from its parts.
    ///
    /// # Errors
    ///
    /// Fails if metadata is internally inconsistent, if the representation
    /// references features outside the metadata's range, or if the kind and
    /// representation disagree (e.g. a linear payload under a tree kind, or
    /// a boosted-sum forest under the random-forest kind).
    pub fn new(kind: ModelKind, meta: ModelMeta, repr: ModelRepr) -> Result<Self, ModelError> {
        if meta.feature_names.len() != meta.n_features {
            return Err(ModelError::FeatureNamesLength {
                names: meta.feature_names.len(),
                n_features: meta.n_features,
            });
        }

        match (&kind, &repr) {
            (ModelKind::Linear, ModelRepr::Linear(linear)) => {
                if linear.n_features() != meta.n_features {
                    return Err(ModelError::WeightLength {
                        weights: linear.n_features(),
                        n_features: meta.n_features,
                    });
                }
            }
            (ModelKind::Linear, ModelRepr::Forest(_)) => {
                return Err(ModelError::KindPayloadMismatch {
                    kind,
                    payload: "forest",
                });
            }
            (ModelKind::Gbdt | ModelKind::RandomForest, ModelRepr::Linear(_)) => {
                return Err(ModelError::KindPayloadMismatch {
                    kind,
                    payload: "linear",
                });
            }
            (ModelKind::Gbdt | ModelKind::RandomForest, ModelRepr::Forest(forest)) => {
                let expected = match kind {
                    ModelKind::Gbdt => Aggregation::Sum,
                    _ => Aggregation::Mean,
                };
                if forest.aggregation() != expected {
                    return Err(ModelError::AggregationMismatch {
                        kind,
                        expected,
                        found: forest.aggregation(),
                    });
                }
                if let Some(feature) = forest.max_split_feature() {
                    if feature as usize >= meta.n_features {
                        return Err(ModelError::SplitOutOfRange {
                            feature,
                            n_features: meta.n_features,
                        });
                    }
                }
            }
        }

        Ok(Self { kind, meta, repr })
    }

    /// Model kind.
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Model metadata.
    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    /// Model representation.
    pub fn repr(&self) -> &ModelRepr {
        &self.repr
    }

    /// Check an encoded row's column names against the training schema.
    ///
    /// Exact name-and-order equality; the first mismatch is reported.
    pub fn validate_schema(&self, columns: &[&str]) -> Result<(), SchemaError> {
        let expected = &self.meta.feature_names;
        let len = expected.len().max(columns.len());
        for position in 0..len {
            let want = expected.get(position).map(String::as_str).unwrap_or("");
            let got = columns.get(position).copied().unwrap_or("");
            if want != got {
                return Err(SchemaError {
                    model: self.kind.as_str().to_string(),
                    position,
                    expected: want.to_string(),
                    found: got.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Predict one encoded row.
    pub fn predict_row(&self, sample: &[f32]) -> f64 {
        match &self.repr {
            ModelRepr::Forest(forest) => forest.predict_row(sample),
            ModelRepr::Linear(linear) => linear.predict_row(sample),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::Tree;

    fn meta2() -> ModelMeta {
        ModelMeta::from_names(["a", "b"])
    }

    fn forest(aggregation: Aggregation) -> Forest {
        Forest::new(vec![Tree::single_leaf(1.0)], 0.0, aggregation)
    }

    #[test]
    fn linear_weight_length_checked() {
        let err = Regressor::new(
            ModelKind::Linear,
            meta2(),
            ModelRepr::Linear(LinearModel::new(vec![1.0], 0.0)),
        );
        assert!(matches!(err, Err(ModelError::WeightLength { .. })));

        let ok = Regressor::new(
            ModelKind::Linear,
            meta2(),
            ModelRepr::Linear(LinearModel::new(vec![1.0, 2.0], 0.5)),
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn kind_payload_mismatch() {
        let err = Regressor::new(
            ModelKind::Gbdt,
            meta2(),
            ModelRepr::Linear(LinearModel::new(vec![1.0, 2.0], 0.0)),
        );
        assert!(matches!(err, Err(ModelError::KindPayloadMismatch { .. })));
    }

    #[test]
    fn aggregation_must_match_kind() {
        let err = Regressor::new(
            ModelKind::RandomForest,
            meta2(),
            ModelRepr::Forest(forest(Aggregation::Sum)),
        );
        assert!(matches!(err, Err(ModelError::AggregationMismatch { .. })));

        let ok = Regressor::new(
            ModelKind::RandomForest,
            meta2(),
            ModelRepr::Forest(forest(Aggregation::Mean)),
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn split_out_of_range_rejected() {
        let tree = Tree::from_arrays(
            vec![5, 0, 0],
            vec![0.5, 0.0, 0.0],
            vec![true, false, false],
            vec![1, 0, 0],
            vec![2, 0, 0],
            vec![false, true, true],
            vec![0.0, -1.0, 1.0],
        )
        .unwrap();
        let err = Regressor::new(
            ModelKind::Gbdt,
            meta2(),
            ModelRepr::Forest(Forest::new(vec![tree], 0.0, Aggregation::Sum)),
        );
        assert!(matches!(
            err,
            Err(ModelError::SplitOutOfRange {
                feature: 5,
                n_features: 2
            })
        ));
    }

    #[test]
    fn schema_validation_reports_first_mismatch() {
        let model = Regressor::new(
            ModelKind::Linear,
            meta2(),
            ModelRepr::Linear(LinearModel::new(vec![1.0, 2.0], 0.0)),
        )
        .unwrap();

        assert!(model.validate_schema(&["a", "b"]).is_ok());

        let err = model.validate_schema(&["a", "c"]).unwrap_err();
        assert_eq!(err.position, 1);
        assert_eq!(err.expected, "b");
        assert_eq!(err.found, "c");

        // shorter row fails too
        let err = model.validate_schema(&["a"]).unwrap_err();
        assert_eq!(err.position, 1);
        assert_eq!(err.found, "");

        // longer row fails
        let err = model.validate_schema(&["a", "b", "c"]).unwrap_err();
        assert_eq!(err.position, 2);
        assert_eq!(err.expected, "");
    }
}
