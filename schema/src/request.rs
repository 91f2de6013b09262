use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::choices::{HousingType, Laundry, Parking, PetPolicy};
use crate::district::District;
use crate::error::ValidationError;

/// Plus petite surface, en pieds carrés, acceptée par le modèle.
pub const MIN_SQFT: i64 = 100;

/// Corps de `POST /predict`.
///
/// Les champs numériques sont signés : le formulaire garde ce qui a été
/// saisi et [`PredictionRequest::validate`] décide si la demande part.
/// `sqft` et `beds` acceptent aussi un flottant entier (`800.0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(deserialize_with = "whole_number")]
    pub sqft: i64,
    #[serde(deserialize_with = "whole_number")]
    pub beds: i64,
    pub bath: f64,
    pub laundry: Laundry,
    pub pets: PetPolicy,
    pub housing_type: HousingType,
    pub parking: Parking,
    pub hood_district: District,
}

impl Default for PredictionRequest {
    fn default() -> Self {
        PredictionRequest {
            sqft: 0,
            beds: 0,
            bath: 0.0,
            laundry: Laundry::default(),
            pets: PetPolicy::default(),
            housing_type: HousingType::default(),
            parking: Parking::default(),
            hood_district: District::default(),
        }
    }
}

impl PredictionRequest {
    /// Vérifie la surface, puis les chambres, puis les salles de bain ; la première erreur l'emporte.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.sqft < MIN_SQFT {
            return Err(ValidationError::AreaTooSmall { sqft: self.sqft });
        }
        if self.beds < 0 {
            return Err(ValidationError::NegativeBedrooms { beds: self.beds });
        }
        if !self.bath.is_finite() || self.bath < 0.0 {
            return Err(ValidationError::NegativeBathrooms { bath: self.bath });
        }
        Ok(())
    }
}

/// Entier JSON, ou flottant sans partie fractionnaire.
fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct WholeNumber;

    impl Visitor<'_> for WholeNumber {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a whole number")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            // bornes exclusives : i64::MAX n'est pas représentable en f64
            if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
                Ok(v as i64)
            } else {
                Err(E::invalid_value(de::Unexpected::Float(v), &self))
            }
        }
    }

    deserializer.deserialize_any(WholeNumber)
}
