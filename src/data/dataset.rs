//! Feature-major dataset container.

use ndarray::{Array1, Array2, ArrayView1};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use super::schema::DatasetSchema;
use super::DataError;

/// In-memory tabular dataset.
///
/// # Storage Layout
///
/// Features are stored **feature-major**: `[n_features, n_samples]`, so each
/// column's values are contiguous. The target column (charges), if present,
/// is stored separately with one value per sample.
#[derive(Clone, Debug)]
pub struct Dataset {
    /// Feature data: `[n_features, n_samples]`.
    features: Array2<f32>,
    /// Column metadata for the feature matrix.
    schema: DatasetSchema,
    /// Target values, length = n_samples.
    target: Option<Array1<f32>>,
}

impl Dataset {
    /// Create a dataset from a feature-major matrix.
    ///
    /// # Errors
    ///
    /// Fails if the schema column count does not match the matrix, if the
    /// target length does not match the sample count, or if there are no rows.
    pub fn new(
        features: Array2<f32>,
        schema: DatasetSchema,
        target: Option<Array1<f32>>,
    ) -> Result<Self, DataError> {
        if schema.n_columns() != features.nrows() {
            return Err(DataError::SchemaMismatch {
                schema: schema.n_columns(),
                features: features.nrows(),
            });
        }
        if features.ncols() == 0 {
            return Err(DataError::Empty);
        }
        if let Some(ref t) = target {
            if t.len() != features.ncols() {
                return Err(DataError::TargetLengthMismatch {
                    target: t.len(),
                    samples: features.ncols(),
                });
            }
        }
        Ok(Self {
            features,
            schema,
            target,
        })
    }

    /// Number of samples.
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.features.ncols()
    }

    /// Number of feature columns.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.features.nrows()
    }

    /// Column schema.
    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }

    /// View of one feature column across all samples.
    pub fn feature(&self, index: usize) -> ArrayView1<'_, f32> {
        self.features.row(index)
    }

    /// Copy one sample's feature values, in schema order.
    pub fn sample_row(&self, sample: usize) -> Vec<f32> {
        self.features.column(sample).to_vec()
    }

    /// Target values, if present.
    pub fn target(&self) -> Option<ArrayView1<'_, f32>> {
        self.target.as_ref().map(Array1::view)
    }

    /// Mean of the target column, in f64.
    ///
    /// # Errors
    ///
    /// Fails with [`DataError::MissingTarget`] for feature-only datasets.
    pub fn target_mean(&self) -> Result<f64, DataError> {
        let target = self.target.as_ref().ok_or(DataError::MissingTarget)?;
        let sum: f64 = target.iter().map(|&v| v as f64).sum();
        Ok(sum / target.len() as f64)
    }

    /// Draw a deterministic `n`-row sample without replacement.
    ///
    /// The returned dataset is feature-only (the target column is dropped):
    /// samples exist to serve as attribution backgrounds, which never need
    /// the target. The same `(n, seed)` on the same data always selects the
    /// same rows, in the same order.
    ///
    /// # Errors
    ///
    /// Fails with [`DataError::SampleTooLarge`] if `n > n_samples`.
    pub fn sample(&self, n: usize, seed: u64) -> Result<Dataset, DataError> {
        if n > self.n_samples() {
            return Err(DataError::SampleTooLarge {
                requested: n,
                available: self.n_samples(),
            });
        }
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let indices = rand::seq::index::sample(&mut rng, self.n_samples(), n);

        let mut features = Array2::<f32>::zeros((self.n_features(), n));
        for (out_col, src_col) in indices.iter().enumerate() {
            features
                .column_mut(out_col)
                .assign(&self.features.column(src_col));
        }

        Dataset::new(features, self.schema.clone(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn small_dataset() -> Dataset {
        // 2 features, 4 samples
        let features = array![[1.0, 2.0, 3.0, 4.0], [10.0, 20.0, 30.0, 40.0]];
        let schema = DatasetSchema::from_names(["a", "b"]);
        let target = array![100.0, 200.0, 300.0, 400.0];
        Dataset::new(features, schema, Some(target)).unwrap()
    }

    #[test]
    fn accessors() {
        let ds = small_dataset();
        assert_eq!(ds.n_samples(), 4);
        assert_eq!(ds.n_features(), 2);
        assert_eq!(ds.sample_row(2), vec![3.0, 30.0]);
        assert_eq!(ds.feature(1)[0], 10.0);
    }

    #[test]
    fn target_mean() {
        let ds = small_dataset();
        assert_eq!(ds.target_mean().unwrap(), 250.0);
    }

    #[test]
    fn target_mean_missing() {
        let ds = small_dataset().sample(2, 0).unwrap();
        assert!(matches!(ds.target_mean(), Err(DataError::MissingTarget)));
    }

    #[test]
    fn sample_is_deterministic() {
        let ds = small_dataset();
        let a = ds.sample(3, 42).unwrap();
        let b = ds.sample(3, 42).unwrap();
        assert_eq!(a.n_samples(), 3);
        for i in 0..3 {
            assert_eq!(a.sample_row(i), b.sample_row(i));
        }
    }

    #[test]
    fn sample_seed_changes_selection() {
        // 1 feature, 100 samples, each row identifiable by its value.
        let features = Array2::from_shape_fn((1, 100), |(_, c)| c as f32);
        let schema = DatasetSchema::from_names(["id"]);
        let ds = Dataset::new(features, schema, None).unwrap();

        let a = ds.sample(10, 1).unwrap();
        let b = ds.sample(10, 2).unwrap();
        let rows_a: Vec<Vec<f32>> = (0..10).map(|i| a.sample_row(i)).collect();
        let rows_b: Vec<Vec<f32>> = (0..10).map(|i| b.sample_row(i)).collect();
        assert_ne!(rows_a, rows_b);
    }

    #[test]
    fn sample_drops_target() {
        let ds = small_dataset();
        let bg = ds.sample(2, 42).unwrap();
        assert!(bg.target().is_none());
    }

    #[test]
    fn sample_too_large() {
        let ds = small_dataset();
        assert!(matches!(
            ds.sample(5, 42),
            Err(DataError::SampleTooLarge {
                requested: 5,
                available: 4
            })
        ));
    }

    #[test]
    fn rejects_bad_shapes() {
        let features = array![[1.0f32, 2.0]];
        let schema = DatasetSchema::from_names(["a", "b"]);
        assert!(matches!(
            Dataset::new(features, schema, None),
            Err(DataError::SchemaMismatch { .. })
        ));

        let features = array![[1.0f32, 2.0]];
        let schema = DatasetSchema::from_names(["a"]);
        let target = array![1.0f32];
        assert!(matches!(
            Dataset::new(features, schema, Some(target)),
            Err(DataError::TargetLengthMismatch { .. })
        ));
    }
}
