//! SoA regression tree storage and traversal.

use super::NodeId;

/// Structural validation errors for [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeValidationError {
    #[error("tree has no nodes")]
    EmptyTree,

    #[error("node array '{array}' has length {len}, expected {expected}")]
    LengthMismatch {
        array: &'static str,
        len: usize,
        expected: usize,
    },

    #[error("node {node} references {side} child {child} but tree has {n_nodes} nodes")]
    ChildOutOfBounds {
        node: NodeId,
        side: &'static str,
        child: NodeId,
        n_nodes: usize,
    },

    #[error("node {node} references itself as a child")]
    SelfLoop { node: NodeId },

    #[error("node {node} is reachable by more than one path")]
    DuplicateVisit { node: NodeId },

    #[error("node {node} is unreachable from the root")]
    UnreachableNode { node: NodeId },
}

/// Immutable regression tree with numeric splits.
///
/// Stored as parallel arrays indexed by [`NodeId`], root at node 0. Missing
/// feature values (NaN) follow the per-node default direction; otherwise
/// `value < threshold` goes left.
#[derive(Clone, Debug, PartialEq)]
pub struct Tree {
    /// Split feature index per node (unused for leaves).
    split_feature: Vec<u32>,
    /// Split threshold per node (unused for leaves).
    threshold: Vec<f32>,
    /// Default direction for missing values (unused for leaves).
    default_left: Vec<bool>,
    /// Left child per node (unused for leaves).
    left: Vec<NodeId>,
    /// Right child per node (unused for leaves).
    right: Vec<NodeId>,
    /// Leaf flag per node.
    leaf: Vec<bool>,
    /// Output value per node (meaningful for leaves only).
    value: Vec<f32>,
}

impl Tree {
    /// Build a tree from parallel node arrays, validating structure.
    ///
    /// # Errors
    ///
    /// Returns a [`TreeValidationError`] for mismatched array lengths,
    /// out-of-bounds or self-referential children, nodes reachable by more
    /// than one path, or nodes unreachable from the root.
    #[allow(clippy::too_many_arguments)]
    pub fn from_arrays(
        split_feature: Vec<u32>,
        threshold: Vec<f32>,
        default_left: Vec<bool>,
        left: Vec<NodeId>,
        right: Vec<NodeId>,
        leaf: Vec<bool>,
        value: Vec<f32>,
    ) -> Result<Self, TreeValidationError> {
        let n_nodes = leaf.len();
        if n_nodes == 0 {
            return Err(TreeValidationError::EmptyTree);
        }
        for (name, len) in [
            ("split_feature", split_feature.len()),
            ("threshold", threshold.len()),
            ("default_left", default_left.len()),
            ("left", left.len()),
            ("right", right.len()),
            ("value", value.len()),
        ] {
            if len != n_nodes {
                return Err(TreeValidationError::LengthMismatch {
                    array: name,
                    len,
                    expected: n_nodes,
                });
            }
        }

        let tree = Self {
            split_feature,
            threshold,
            default_left,
            left,
            right,
            leaf,
            value,
        };
        tree.validate_reachability()?;
        Ok(tree)
    }

    /// Build a single-leaf tree.
    pub fn single_leaf(value: f32) -> Self {
        Self {
            split_feature: vec![0],
            threshold: vec![0.0],
            default_left: vec![false],
            left: vec![0],
            right: vec![0],
            leaf: vec![true],
            value: vec![value],
        }
    }

    /// Check every node is reached exactly once from the root.
    fn validate_reachability(&self) -> Result<(), TreeValidationError> {
        let n_nodes = self.n_nodes();
        let mut visited = vec![false; n_nodes];
        let mut stack: Vec<NodeId> = vec![0];

        while let Some(node) = stack.pop() {
            let idx = node as usize;
            if visited[idx] {
                return Err(TreeValidationError::DuplicateVisit { node });
            }
            visited[idx] = true;

            if self.leaf[idx] {
                continue;
            }
            for (side, child) in [("left", self.left[idx]), ("right", self.right[idx])] {
                if child as usize >= n_nodes {
                    return Err(TreeValidationError::ChildOutOfBounds {
                        node,
                        side,
                        child,
                        n_nodes,
                    });
                }
                if child == node {
                    return Err(TreeValidationError::SelfLoop { node });
                }
                stack.push(child);
            }
        }

        if let Some(node) = visited.iter().position(|&v| !v) {
            return Err(TreeValidationError::UnreachableNode {
                node: node as NodeId,
            });
        }
        Ok(())
    }

    /// Number of nodes.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.leaf.len()
    }

    /// Check if a node is a leaf.
    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.leaf[node as usize]
    }

    /// Per-node split feature indices.
    pub fn split_features(&self) -> &[u32] {
        &self.split_feature
    }

    /// Per-node split thresholds.
    pub fn thresholds(&self) -> &[f32] {
        &self.threshold
    }

    /// Per-node default directions for missing values.
    pub fn default_lefts(&self) -> &[bool] {
        &self.default_left
    }

    /// Per-node left children.
    pub fn left_children(&self) -> &[NodeId] {
        &self.left
    }

    /// Per-node right children.
    pub fn right_children(&self) -> &[NodeId] {
        &self.right
    }

    /// Per-node leaf flags.
    pub fn leaf_flags(&self) -> &[bool] {
        &self.leaf
    }

    /// Per-node output values.
    pub fn values(&self) -> &[f32] {
        &self.value
    }

    /// Largest feature index referenced by any split.
    pub fn max_split_feature(&self) -> Option<u32> {
        (0..self.n_nodes())
            .filter(|&i| !self.leaf[i])
            .map(|i| self.split_feature[i])
            .max()
    }

    /// Traverse from the root to a leaf for one sample.
    ///
    /// Feature indices beyond the sample length read as NaN and follow the
    /// default direction.
    #[inline]
    pub fn traverse_to_leaf(&self, sample: &[f32]) -> NodeId {
        let mut node = 0 as NodeId;

        while !self.leaf[node as usize] {
            let idx = node as usize;
            let fvalue = sample
                .get(self.split_feature[idx] as usize)
                .copied()
                .unwrap_or(f32::NAN);

            node = if fvalue.is_nan() {
                if self.default_left[idx] {
                    self.left[idx]
                } else {
                    self.right[idx]
                }
            } else if fvalue < self.threshold[idx] {
                self.left[idx]
            } else {
                self.right[idx]
            };
        }

        node
    }

    /// Predict the tree output for one sample.
    #[inline]
    pub fn predict_row(&self, sample: &[f32]) -> f32 {
        self.value[self.traverse_to_leaf(sample) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// feature 0 < 0.5 -> -1.0, else 1.0; missing goes left.
    fn stump() -> Tree {
        Tree::from_arrays(
            vec![0, 0, 0],
            vec![0.5, 0.0, 0.0],
            vec![true, false, false],
            vec![1, 0, 0],
            vec![2, 0, 0],
            vec![false, true, true],
            vec![0.0, -1.0, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn traversal_left_and_right() {
        let tree = stump();
        assert_eq!(tree.predict_row(&[0.3]), -1.0);
        assert_eq!(tree.predict_row(&[0.7]), 1.0);
        // threshold is exclusive on the left
        assert_eq!(tree.predict_row(&[0.5]), 1.0);
    }

    #[test]
    fn missing_value_uses_default_direction() {
        let tree = stump();
        assert_eq!(tree.predict_row(&[f32::NAN]), -1.0);
        // out-of-range feature index reads as missing
        assert_eq!(tree.predict_row(&[]), -1.0);
    }

    #[test]
    fn single_leaf_predicts_constant() {
        let tree = Tree::single_leaf(3.5);
        assert_eq!(tree.predict_row(&[1.0, 2.0]), 3.5);
    }

    #[test]
    fn rejects_empty_tree() {
        let err = Tree::from_arrays(vec![], vec![], vec![], vec![], vec![], vec![], vec![]);
        assert_eq!(err, Err(TreeValidationError::EmptyTree));
    }

    #[test]
    fn rejects_out_of_bounds_child() {
        let err = Tree::from_arrays(
            vec![0],
            vec![0.5],
            vec![true],
            vec![7],
            vec![8],
            vec![false],
            vec![0.0],
        );
        assert!(matches!(
            err,
            Err(TreeValidationError::ChildOutOfBounds { node: 0, .. })
        ));
    }

    #[test]
    fn rejects_self_loop() {
        let err = Tree::from_arrays(
            vec![0, 0],
            vec![0.5, 0.0],
            vec![true, false],
            vec![0, 0],
            vec![1, 0],
            vec![false, true],
            vec![0.0, 1.0],
        );
        assert!(matches!(err, Err(TreeValidationError::SelfLoop { node: 0 })));
    }

    #[test]
    fn rejects_unreachable_node() {
        // node 3 exists but nothing points at it
        let err = Tree::from_arrays(
            vec![0, 0, 0, 0],
            vec![0.5, 0.0, 0.0, 0.0],
            vec![true, false, false, false],
            vec![1, 0, 0, 0],
            vec![2, 0, 0, 0],
            vec![false, true, true, true],
            vec![0.0, -1.0, 1.0, 9.0],
        );
        assert!(matches!(
            err,
            Err(TreeValidationError::UnreachableNode { node: 3 })
        ));
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = Tree::from_arrays(
            vec![0],
            vec![0.5, 0.6],
            vec![true],
            vec![0],
            vec![0],
            vec![true],
            vec![0.0],
        );
        assert!(matches!(
            err,
            Err(TreeValidationError::LengthMismatch {
                array: "threshold",
                ..
            })
        ));
    }

    #[test]
    fn max_split_feature() {
        assert_eq!(stump().max_split_feature(), Some(0));
        assert_eq!(Tree::single_leaf(1.0).max_split_feature(), None);
    }
}
