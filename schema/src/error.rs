use thiserror::Error;

/// Raison pour laquelle une demande de prédiction est refusée avant envoi.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Area must be at least 100 sqft")]
    AreaTooSmall { sqft: i64 },

    #[error("Bedrooms cannot be negative")]
    NegativeBedrooms { beds: i64 },

    #[error("Bathrooms cannot be negative")]
    NegativeBathrooms { bath: f64 },

    #[error("District must be an integer between 1 and 10 (got {0})")]
    DistrictOutOfRange(f64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{value:?} is not a valid {field} option")]
pub struct UnknownChoice {
    pub field: &'static str,
    pub value: String,
}
