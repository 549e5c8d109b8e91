//! Profile → model-ready feature row.

use crate::data::FEATURE_COLUMNS;

use super::profile::{PatientProfile, Region, Sex, Smoker};

/// A profile encoded into the models' training schema.
///
/// Eight columns, fixed order: `age`, `bmi`, `children`, `sex_male`,
/// `region_northwest`, `region_southeast`, `region_southwest`, `smoker_yes`.
/// Northeast and female are the reference categories: all one-hot flags zero
/// encodes a female non-smoker from the northeast. Derivation from the
/// profile is pure and deterministic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodedRow {
    values: [f32; 8],
}

impl EncodedRow {
    /// Column names, in order. Identical to the dataset's feature columns.
    pub fn schema() -> [&'static str; 8] {
        FEATURE_COLUMNS
    }

    /// Encode a validated profile.
    pub fn from_profile(profile: &PatientProfile) -> Self {
        let one_hot = |flag: bool| if flag { 1.0 } else { 0.0 };
        Self {
            values: [
                profile.age() as f32,
                profile.bmi(),
                profile.children() as f32,
                one_hot(profile.sex() == Sex::Male),
                one_hot(profile.region() == Region::Northwest),
                one_hot(profile.region() == Region::Southeast),
                one_hot(profile.region() == Region::Southwest),
                one_hot(profile.smoker() == Smoker::Yes),
            ],
        }
    }

    /// The encoded values, in schema order.
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}
