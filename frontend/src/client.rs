use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use rent_schema::PredictionRequest;
use serde_json::Value;
use thiserror::Error;

/// Champs lus dans la réponse, par ordre de préférence.
const PREDICTION_FIELDS: [&str; 2] = ["predicted_rent", "prediction"];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error("Server error: {0}")]
    Status(u16),

    #[error("Failed to reach the prediction service: {0}")]
    Network(String),

    #[error("Invalid response from the prediction service: {0}")]
    InvalidResponse(String),

    #[error("Response did not contain a prediction")]
    MissingPrediction,
}

/// Envoie une demande de prédiction et renvoie le loyer mensuel.
#[async_trait]
pub trait PredictionClient: Send + Sync {
    async fn predict(&self, request: &PredictionRequest) -> Result<f64, ClientError>;
}

#[async_trait]
impl<T: PredictionClient + ?Sized> PredictionClient for Arc<T> {
    async fn predict(&self, request: &PredictionRequest) -> Result<f64, ClientError> {
        (**self).predict(request).await
    }
}

/// `POST {origin}/predict` via reqwest. Ni délai d'expiration, ni nouvel essai.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPredictionClient {
    pub fn new(origin: &str) -> Self {
        Self::with_client(reqwest::Client::new(), origin)
    }

    pub fn with_client(client: reqwest::Client, origin: &str) -> Self {
        HttpPredictionClient {
            client,
            endpoint: format!("{}/predict", origin.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PredictionClient for HttpPredictionClient {
    async fn predict(&self, request: &PredictionRequest) -> Result<f64, ClientError> {
        debug!("POST {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            info!("Prediction service answered {}", status);
            return Err(ClientError::Status(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        extract_prediction(&body)
    }
}

/// Lit `predicted_rent`, sinon `prediction`. Seules les valeurs numériques comptent.
pub fn extract_prediction(body: &Value) -> Result<f64, ClientError> {
    PREDICTION_FIELDS
        .iter()
        .find_map(|field| body.get(field).and_then(Value::as_f64))
        .ok_or(ClientError::MissingPrediction)
}
