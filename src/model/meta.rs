//! Model metadata.

use serde::{Deserialize, Serialize};

/// Shared metadata for all model kinds.
///
/// Feature names are mandatory here: the pre-inference schema check depends
/// on them, and an artifact without them cannot be safely served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMeta {
    /// Number of features the model was trained with.
    pub n_features: usize,
    /// Feature names, in training order.
    pub feature_names: Vec<String>,
}

impl ModelMeta {
    /// Create metadata from ordered feature names.
    pub fn from_names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        let feature_names: Vec<String> = names.into_iter().map(Into::into).collect();
        Self {
            n_features: feature_names.len(),
            feature_names,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_names_sets_count() {
        let meta = ModelMeta::from_names(["age", "bmi"]);
        assert_eq!(meta.n_features, 2);
        assert_eq!(meta.feature_names, vec!["age", "bmi"]);
    }
}
