//! Model representations: regression trees, forests, and linear models.
//!
//! These are the validated in-memory forms that inference runs against.
//! Artifacts on disk use the payload types in [`crate::persist`] and are
//! converted into these on load.

mod forest;
mod linear;
mod tree;

pub use forest::{Aggregation, Forest};
pub use linear::LinearModel;
pub use tree::{Tree, TreeValidationError};

/// Node index within a tree.
pub type NodeId = u32;
