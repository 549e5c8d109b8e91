//! Column schema for the reference dataset.

use std::collections::HashMap;

/// Ordered, named numeric columns.
///
/// All columns are stored as `f32`; the schema records names and order only.
/// Column order is significant: it must match the order the models were
/// trained with, and lookups by name exist mainly for validation.
#[derive(Clone, Debug, Default)]
pub struct DatasetSchema {
    /// Column names, in storage order.
    names: Vec<String>,
    /// Name → index mapping.
    index: HashMap<String, usize>,
}

impl DatasetSchema {
    /// Create a schema from ordered column names.
    pub fn from_names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let index = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();
        Self { names, index }
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.names.len()
    }

    /// Column name at `index`.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Column index for `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// All column names, in order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Iterate over `(index, name)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names.iter().enumerate().map(|(i, n)| (i, n.as_str()))
    }
}
