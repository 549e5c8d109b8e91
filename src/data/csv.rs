//! CSV ingest for the cleaned insurance dataset.
//!
//! The file is expected to carry the already-encoded training columns; extra
//! columns are ignored, missing ones fail the load. Column order in the file
//! does not matter - rows are deserialized by header name and stored in the
//! canonical [`FEATURE_COLUMNS`] order.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use ndarray::{Array1, Array2};
use serde::Deserialize;

use super::dataset::Dataset;
use super::schema::DatasetSchema;
use super::DataError;

/// Canonical feature columns, in the order the models were trained with.
pub const FEATURE_COLUMNS: [&str; 8] = [
    "age",
    "bmi",
    "children",
    "sex_male",
    "region_northwest",
    "region_southeast",
    "region_southwest",
    "smoker_yes",
];

/// Name of the target column.
pub const TARGET_COLUMN: &str = "charges";

/// One record of the cleaned insurance CSV.
#[derive(Debug, Deserialize)]
struct InsuranceRecord {
    age: f32,
    bmi: f32,
    children: f32,
    sex_male: f32,
    region_northwest: f32,
    region_southeast: f32,
    region_southwest: f32,
    smoker_yes: f32,
    charges: f32,
}

impl InsuranceRecord {
    fn features(&self) -> [f32; 8] {
        [
            self.age,
            self.bmi,
            self.children,
            self.sex_male,
            self.region_northwest,
            self.region_southeast,
            self.region_southwest,
            self.smoker_yes,
        ]
    }
}

/// Load the insurance dataset from a CSV file.
///
/// # Errors
///
/// Fails on I/O errors, malformed CSV, missing required columns, non-finite
/// values, or an empty file.
pub fn read_csv(path: impl AsRef<Path>) -> Result<Dataset, DataError> {
    let file = File::open(path.as_ref())?;
    parse_csv(file)
}

fn parse_csv<R: Read>(reader: R) -> Result<Dataset, DataError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let mut columns: Vec<Vec<f32>> = vec![Vec::new(); FEATURE_COLUMNS.len()];
    let mut target: Vec<f32> = Vec::new();

    for (row, record) in csv_reader.deserialize::<InsuranceRecord>().enumerate() {
        let record = record?;
        let features = record.features();
        for (i, &value) in features.iter().enumerate() {
            if !value.is_finite() {
                return Err(DataError::NonFinite {
                    column: FEATURE_COLUMNS[i].to_string(),
                    row,
                });
            }
            columns[i].push(value);
        }
        if !record.charges.is_finite() {
            return Err(DataError::NonFinite {
                column: TARGET_COLUMN.to_string(),
                row,
            });
        }
        target.push(record.charges);
    }

    let n_samples = target.len();
    if n_samples == 0 {
        return Err(DataError::Empty);
    }

    let flat: Vec<f32> = columns.into_iter().flatten().collect();
    let features = Array2::from_shape_vec((FEATURE_COLUMNS.len(), n_samples), flat)
        .expect("column lengths are uniform by construction");
    let schema = DatasetSchema::from_names(FEATURE_COLUMNS);

    Dataset::new(features, schema, Some(Array1::from_vec(target)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "age,bmi,children,sex_male,region_northwest,region_southeast,region_southwest,smoker_yes,charges";

    #[test]
    fn parses_valid_csv() {
        let data = format!(
            "{HEADER}\n30,25.0,0,1,0,0,0,0,4500.5\n52,31.2,2,0,0,1,0,1,41000.0\n"
        );
        let ds = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(ds.n_samples(), 2);
        assert_eq!(ds.n_features(), 8);
        assert_eq!(ds.schema().names(), &FEATURE_COLUMNS.map(String::from));
        assert_eq!(ds.sample_row(0), vec![30.0, 25.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(ds.target().unwrap()[1], 41000.0);
    }

    #[test]
    fn column_order_in_file_does_not_matter() {
        let data = "charges,smoker_yes,age,bmi,children,sex_male,region_northwest,region_southeast,region_southwest\n\
                    4500.5,0,30,25.0,0,1,0,0,0\n";
        let ds = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(ds.sample_row(0), vec![30.0, 25.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn extra_columns_ignored() {
        let data = format!("{HEADER},extra\n30,25.0,0,1,0,0,0,0,4500.5,999\n");
        let ds = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(ds.n_features(), 8);
    }

    #[test]
    fn missing_column_fails() {
        let data = "age,bmi\n30,25.0\n";
        assert!(matches!(parse_csv(data.as_bytes()), Err(DataError::Csv(_))));
    }

    #[test]
    fn non_finite_value_fails() {
        let data = format!("{HEADER}\n30,NaN,0,1,0,0,0,0,4500.5\n");
        let err = parse_csv(data.as_bytes()).unwrap_err();
        match err {
            DataError::NonFinite { column, row } => {
                assert_eq!(column, "bmi");
                assert_eq!(row, 0);
            }
            other => panic!("expected NonFinite, got {other:?}"),
        }
    }

    #[test]
    fn empty_file_fails() {
        let data = format!("{HEADER}\n");
        assert!(matches!(parse_csv(data.as_bytes()), Err(DataError::Empty)));
    }
}
