use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// District de San Francisco, numéroté de 1 à 10.
///
/// Sérialisé en simple nombre JSON. La désérialisation passe par `f64` :
/// `3` et `3.0` sont acceptés, les valeurs fractionnaires ou hors bornes
/// sont refusées.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "u8")]
pub struct District(u8);

impl District {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(number: i64) -> Result<Self, ValidationError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&number) {
            Ok(District(number as u8))
        } else {
            Err(ValidationError::DistrictOutOfRange(number as f64))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = District> {
        (Self::MIN..=Self::MAX).map(District)
    }
}

impl Default for District {
    fn default() -> Self {
        District(Self::MIN)
    }
}

impl TryFrom<f64> for District {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(ValidationError::DistrictOutOfRange(value));
        }
        District::new(value as i64).map_err(|_| ValidationError::DistrictOutOfRange(value))
    }
}

impl From<District> for u8 {
    fn from(district: District) -> u8 {
        district.0
    }
}

impl FromStr for District {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| ValidationError::DistrictOutOfRange(f64::NAN))?;
        District::try_from(value)
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
