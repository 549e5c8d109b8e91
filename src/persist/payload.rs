//! Artifact payload types and conversion to validated models.

use serde::{Deserialize, Serialize};

use crate::model::{ModelKind, ModelMeta, ModelRepr, Regressor};
use crate::repr::{Aggregation, Forest, LinearModel, NodeId, Tree};

use super::{PersistError, FORMAT_VERSION};

/// One serialized tree: parallel node arrays, root at index 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreePayload {
    pub split_feature: Vec<u32>,
    pub threshold: Vec<f32>,
    pub default_left: Vec<bool>,
    pub left: Vec<NodeId>,
    pub right: Vec<NodeId>,
    pub leaf: Vec<bool>,
    pub value: Vec<f32>,
}

impl TreePayload {
    fn into_tree(self) -> Result<Tree, PersistError> {
        Ok(Tree::from_arrays(
            self.split_feature,
            self.threshold,
            self.default_left,
            self.left,
            self.right,
            self.leaf,
            self.value,
        )?)
    }

    fn from_tree(tree: &Tree) -> Self {
        Self {
            split_feature: tree.split_features().to_vec(),
            threshold: tree.thresholds().to_vec(),
            default_left: tree.default_lefts().to_vec(),
            left: tree.left_children().to_vec(),
            right: tree.right_children().to_vec(),
            leaf: tree.leaf_flags().to_vec(),
            value: tree.values().to_vec(),
        }
    }
}

/// Serialized tree ensemble.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestPayload {
    pub trees: Vec<TreePayload>,
    pub base_score: f32,
    pub aggregation: Aggregation,
}

/// Serialized linear model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearPayload {
    pub weights: Vec<f32>,
    pub intercept: f32,
}

/// Model payload, discriminated by a `type` tag in JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelPayload {
    Forest(ForestPayload),
    Linear(LinearPayload),
}

/// The on-disk artifact envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub format_version: u32,
    pub kind: ModelKind,
    pub meta: ModelMeta,
    pub payload: ModelPayload,
}

impl Artifact {
    /// Convert a parsed artifact into a validated [`Regressor`].
    pub fn into_regressor(self) -> Result<Regressor, PersistError> {
        if self.format_version > FORMAT_VERSION {
            return Err(PersistError::UnsupportedVersion {
                found: self.format_version,
                supported: FORMAT_VERSION,
            });
        }

        let repr = match self.payload {
            ModelPayload::Forest(forest) => {
                let trees = forest
                    .trees
                    .into_iter()
                    .map(TreePayload::into_tree)
                    .collect::<Result<Vec<_>, _>>()?;
                ModelRepr::Forest(Forest::new(trees, forest.base_score, forest.aggregation))
            }
            ModelPayload::Linear(linear) => {
                ModelRepr::Linear(LinearModel::new(linear.weights, linear.intercept))
            }
        };

        Ok(Regressor::new(self.kind, self.meta, repr)?)
    }

    /// Build the artifact envelope for a model.
    pub fn from_regressor(model: &Regressor) -> Self {
        let payload = match model.repr() {
            ModelRepr::Forest(forest) => ModelPayload::Forest(ForestPayload {
                trees: forest.trees().map(TreePayload::from_tree).collect(),
                base_score: forest.base_score(),
                aggregation: forest.aggregation(),
            }),
            ModelRepr::Linear(linear) => ModelPayload::Linear(LinearPayload {
                weights: linear.weights().to_vec(),
                intercept: linear.intercept(),
            }),
        };
        Self {
            format_version: FORMAT_VERSION,
            kind: model.kind(),
            meta: model.meta().clone(),
            payload,
        }
    }
}
