//! Patient input: raw attributes with range validation.

use std::fmt;
use std::str::FromStr;

/// Patient sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

/// Smoker status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Smoker {
    Yes,
    No,
}

/// US census region of residence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl Smoker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Northeast => "northeast",
            Self::Northwest => "northwest",
            Self::Southeast => "southeast",
            Self::Southwest => "southwest",
        }
    }
}

macro_rules! impl_display_fromstr {
    ($ty:ty, $what:literal, [$(($text:literal, $variant:expr)),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ProfileError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $($text => Ok($variant),)+
                    _ => Err(ProfileError::InvalidChoice {
                        field: $what,
                        value: s.to_string(),
                        options: [$($text),+].join(", "),
                    }),
                }
            }
        }
    };
}

impl_display_fromstr!(Sex, "sex", [("male", Sex::Male), ("female", Sex::Female)]);
impl_display_fromstr!(Smoker, "smoker", [("yes", Smoker::Yes), ("no", Smoker::No)]);
impl_display_fromstr!(
    Region,
    "region",
    [
        ("northeast", Region::Northeast),
        ("northwest", Region::Northwest),
        ("southeast", Region::Southeast),
        ("southwest", Region::Southwest),
    ]
);

/// Validation errors for patient input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid {field} '{value}' (options: {options})")]
    InvalidChoice {
        field: &'static str,
        value: String,
        options: String,
    },
}

/// A validated patient profile.
///
/// Immutable once built; every estimate consumes one by reference and the
/// profile is discarded when the request completes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatientProfile {
    age: u32,
    bmi: f32,
    sex: Sex,
    children: u32,
    smoker: Smoker,
    region: Region,
}

impl PatientProfile {
    /// Allowed age range, inclusive.
    pub const AGE_RANGE: (u32, u32) = (18, 100);
    /// Allowed BMI range, inclusive.
    pub const BMI_RANGE: (f32, f32) = (10.0, 50.0);
    /// Allowed children range, inclusive.
    pub const CHILDREN_RANGE: (u32, u32) = (0, 5);

    /// Build a profile, validating the numeric ranges.
    pub fn new(
        age: u32,
        bmi: f32,
        sex: Sex,
        children: u32,
        smoker: Smoker,
        region: Region,
    ) -> Result<Self, ProfileError> {
        let (age_min, age_max) = Self::AGE_RANGE;
        if age < age_min || age > age_max {
            return Err(ProfileError::OutOfRange {
                field: "age",
                value: age as f64,
                min: age_min as f64,
                max: age_max as f64,
            });
        }
        let (bmi_min, bmi_max) = Self::BMI_RANGE;
        if !bmi.is_finite() || bmi < bmi_min || bmi > bmi_max {
            return Err(ProfileError::OutOfRange {
                field: "bmi",
                value: bmi as f64,
                min: bmi_min as f64,
                max: bmi_max as f64,
            });
        }
        let (ch_min, ch_max) = Self::CHILDREN_RANGE;
        if children > ch_max {
            return Err(ProfileError::OutOfRange {
                field: "children",
                value: children as f64,
                min: ch_min as f64,
                max: ch_max as f64,
            });
        }
        Ok(Self {
            age,
            bmi,
            sex,
            children,
            smoker,
            region,
        })
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn bmi(&self) -> f32 {
        self.bmi
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn children(&self) -> u32 {
        self.children
    }

    pub fn smoker(&self) -> Smoker {
        self.smoker
    }

    pub fn region(&self) -> Region {
        self.region
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> PatientProfile {
        PatientProfile::new(30, 25.0, Sex::Male, 0, Smoker::No, Region::Northeast).unwrap()
    }

    #[test]
    fn accepts_valid_profile() {
        let p = valid();
        assert_eq!(p.age(), 30);
        assert_eq!(p.region(), Region::Northeast);
    }

    #[test]
    fn boundary_values_accepted() {
        assert!(PatientProfile::new(18, 10.0, Sex::Female, 0, Smoker::No, Region::Southwest).is_ok());
        assert!(PatientProfile::new(100, 50.0, Sex::Male, 5, Smoker::Yes, Region::Southeast).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(
            PatientProfile::new(17, 25.0, Sex::Male, 0, Smoker::No, Region::Northeast),
            Err(ProfileError::OutOfRange { field: "age", .. })
        ));
        assert!(matches!(
            PatientProfile::new(30, 50.5, Sex::Male, 0, Smoker::No, Region::Northeast),
            Err(ProfileError::OutOfRange { field: "bmi", .. })
        ));
        assert!(matches!(
            PatientProfile::new(30, f32::NAN, Sex::Male, 0, Smoker::No, Region::Northeast),
            Err(ProfileError::OutOfRange { field: "bmi", .. })
        ));
        assert!(matches!(
            PatientProfile::new(30, 25.0, Sex::Male, 6, Smoker::No, Region::Northeast),
            Err(ProfileError::OutOfRange {
                field: "children",
                ..
            })
        ));
    }

    #[test]
    fn enums_parse_case_insensitively() {
        assert_eq!("Male".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("YES".parse::<Smoker>().unwrap(), Smoker::Yes);
        assert_eq!("southwest".parse::<Region>().unwrap(), Region::Southwest);
        assert!(matches!(
            "north".parse::<Region>(),
            Err(ProfileError::InvalidChoice { field: "region", .. })
        ));
    }

    #[test]
    fn enums_display_lowercase() {
        assert_eq!(Sex::Female.to_string(), "female");
        assert_eq!(Region::Northeast.to_string(), "northeast");
    }
}
