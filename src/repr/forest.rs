//! Tree ensemble with configurable aggregation.

use super::tree::Tree;

/// How tree outputs combine into the ensemble prediction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Boosted ensemble: prediction = base_score + sum of tree outputs.
    Sum,
    /// Bagged ensemble: prediction = base_score + mean of tree outputs.
    Mean,
}

/// An ordered collection of regression trees.
///
/// Covers both of the tree-based model kinds: gradient-boosted trees
/// ([`Aggregation::Sum`]) and random forests ([`Aggregation::Mean`]).
#[derive(Clone, Debug)]
pub struct Forest {
    trees: Vec<Tree>,
    base_score: f32,
    aggregation: Aggregation,
}

impl Forest {
    /// Create a forest from trees.
    pub fn new(trees: Vec<Tree>, base_score: f32, aggregation: Aggregation) -> Self {
        Self {
            trees,
            base_score,
            aggregation,
        }
    }

    /// Number of trees.
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// The ensemble's base score.
    pub fn base_score(&self) -> f32 {
        self.base_score
    }

    /// The aggregation mode.
    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    /// Iterate over trees in order.
    pub fn trees(&self) -> impl Iterator<Item = &Tree> {
        self.trees.iter()
    }

    /// Largest feature index referenced by any tree, if any split exists.
    pub fn max_split_feature(&self) -> Option<u32> {
        self.trees.iter().filter_map(Tree::max_split_feature).max()
    }

    /// Predict the ensemble output for one sample.
    pub fn predict_row(&self, sample: &[f32]) -> f64 {
        let total: f64 = self
            .trees
            .iter()
            .map(|t| t.predict_row(sample) as f64)
            .sum();
        let aggregated = match self.aggregation {
            Aggregation::Sum => total,
            Aggregation::Mean if self.trees.is_empty() => 0.0,
            Aggregation::Mean => total / self.trees.len() as f64,
        };
        self.base_score as f64 + aggregated
    }
}
