use serde::{Deserialize, Serialize};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HomeResponse {
    pub message: String,
}

impl HomeResponse {
    pub fn new() -> Self {
        HomeResponse {
            message: "San Francisco Rental Price Prediction".to_string(),
        }
    }
}

impl Default for HomeResponse {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model_loaded: bool,
}

impl HealthResponse {
    pub fn ok(version: &str) -> Self {
        HealthResponse {
            status: "OK".to_string(),
            version: version.to_string(),
            model_loaded: true,
        }
    }
}

/// Réponse de `POST /predict`. Le client lit `predicted_rent`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PredictionResponse {
    pub status: String,
    pub predicted_rent: f64,
    pub message: String,
    pub model_version: String,
    pub timestamp: String,
}

impl PredictionResponse {
    pub fn success(predicted_rent: f64, model_version: &str) -> Self {
        PredictionResponse {
            status: STATUS_SUCCESS.to_string(),
            predicted_rent,
            message: "Prediction successful".to_string(),
            model_version: model_version.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorResponse {
    pub status: String,
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        ErrorResponse {
            status: STATUS_ERROR.to_string(),
            detail: detail.into(),
        }
    }
}
