use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rent_schema::PredictionRequest;
use serde::Deserialize;
use thiserror::Error;

use crate::mappings;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot read model file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid model file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model file has no coefficients")]
    Empty,

    #[error("model file references an ONNX graph but the `onnx` feature is disabled")]
    OnnxDisabled,

    #[error("ONNX inference failed: {0}")]
    Onnx(String),

    #[error("model produced a non-finite log rent ({0})")]
    NonFinite(f64),
}

/// Vecteur d'entrée du modèle : colonnes numériques + indicatrices `{champ}_{catégorie}`.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedFeatures {
    columns: BTreeMap<String, f64>,
}

impl EncodedFeatures {
    pub fn from_request(request: &PredictionRequest) -> Self {
        let mut columns = BTreeMap::new();
        columns.insert("const".to_string(), 1.0);
        columns.insert("sqft".to_string(), request.sqft as f64);
        columns.insert("beds".to_string(), request.beds as f64);
        columns.insert("bath".to_string(), request.bath);

        let dummies = [
            ("laundry", mappings::laundry_group(request.laundry)),
            ("pets", mappings::pet_group(request.pets)),
            ("housing_type", mappings::housing_group(request.housing_type)),
            ("parking", mappings::parking_group(request.parking)),
            ("hood_district", mappings::district_area(request.hood_district)),
        ];
        for (field, category) in dummies {
            columns.insert(format!("{field}_{category}"), 1.0);
        }

        EncodedFeatures { columns }
    }

    /// Valeur d'une colonne, 0 si la catégorie n'est pas active.
    pub fn get(&self, column: &str) -> f64 {
        self.columns.get(column).copied().unwrap_or(0.0)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Valeurs rangées dans l'ordre des colonnes du modèle.
    pub fn aligned(&self, order: &[String]) -> Vec<f64> {
        order.iter().map(|column| self.get(column)).collect()
    }
}

pub trait RentModel: Send + Sync {
    fn predict_log_rent(&self, features: &EncodedFeatures) -> Result<f64, ModelError>;

    fn version(&self) -> &str;

    /// Loyer mensuel en dollars, arrondi au centime.
    fn predict(&self, request: &PredictionRequest) -> Result<f64, ModelError> {
        let features = EncodedFeatures::from_request(request);
        let log_rent = self.predict_log_rent(&features)?;
        let rent = log_rent.exp();
        if !rent.is_finite() {
            return Err(ModelError::NonFinite(log_rent));
        }
        Ok((rent * 100.0).round() / 100.0)
    }
}

/// Régression log-linéaire : `ln(loyer) = Σ coef * x`.
#[derive(Debug, Clone)]
pub struct LinearRentModel {
    version: String,
    coefficients: BTreeMap<String, f64>,
}

impl LinearRentModel {
    pub fn new(version: impl Into<String>, coefficients: BTreeMap<String, f64>) -> Result<Self, ModelError> {
        if coefficients.is_empty() {
            return Err(ModelError::Empty);
        }
        Ok(Self {
            version: version.into(),
            coefficients,
        })
    }

    pub fn coefficient(&self, column: &str) -> Option<f64> {
        self.coefficients.get(column).copied()
    }
}

impl RentModel for LinearRentModel {
    fn predict_log_rent(&self, features: &EncodedFeatures) -> Result<f64, ModelError> {
        // Les colonnes inconnues du modèle sont ignorées
        Ok(self
            .coefficients
            .iter()
            .map(|(column, coef)| coef * features.get(column))
            .sum())
    }

    fn version(&self) -> &str {
        &self.version
    }
}

/// Contenu de `MODEL_PATH`.
#[derive(Debug, Deserialize)]
pub struct ModelManifest {
    pub version: String,
    #[serde(default)]
    pub coefficients: BTreeMap<String, f64>,
    #[serde(default)]
    pub onnx: Option<OnnxGraph>,
}

#[derive(Debug, Deserialize)]
pub struct OnnxGraph {
    /// Un chemin relatif est résolu depuis le dossier du manifeste.
    pub path: PathBuf,
    pub columns: Vec<String>,
}

impl ModelManifest {
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

pub fn load_model(path: &Path) -> Result<Arc<dyn RentModel>, ModelError> {
    let manifest = ModelManifest::from_path(path)?;

    match manifest.onnx {
        Some(graph) => load_onnx(path, manifest.version, graph),
        None => Ok(Arc::new(LinearRentModel::new(
            manifest.version,
            manifest.coefficients,
        )?)),
    }
}

#[cfg(feature = "onnx")]
fn load_onnx(manifest_path: &Path, version: String, graph: OnnxGraph) -> Result<Arc<dyn RentModel>, ModelError> {
    let graph_path = match manifest_path.parent() {
        Some(dir) if graph.path.is_relative() => dir.join(&graph.path),
        _ => graph.path.clone(),
    };
    Ok(Arc::new(onnx::OnnxRentModel::load(graph_path, graph.columns, version)?))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(_manifest_path: &Path, _version: String, _graph: OnnxGraph) -> Result<Arc<dyn RentModel>, ModelError> {
    Err(ModelError::OnnxDisabled)
}

#[cfg(feature = "onnx")]
pub mod onnx {
    use std::path::Path;

    use tract_onnx::prelude::*;

    use super::{EncodedFeatures, ModelError, RentModel};

    /// Graphe ONNX prenant le vecteur encodé `[1, n]` et renvoyant `ln(loyer)`.
    pub struct OnnxRentModel {
        model: SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>,
        columns: Vec<String>,
        version: String,
    }

    impl OnnxRentModel {
        pub fn load<P: AsRef<Path>>(model_path: P, columns: Vec<String>, version: String) -> Result<Self, ModelError> {
            let model = tract_onnx::onnx()
                .model_for_path(model_path)
                .and_then(|m| {
                    m.with_input_fact(
                        0,
                        InferenceFact::dt_shape(f32::datum_type(), tvec!(1, columns.len())),
                    )
                })
                .and_then(|m| m.into_optimized())
                .and_then(|m| m.into_runnable())
                .map_err(|e| ModelError::Onnx(e.to_string()))?;

            Ok(Self { model, columns, version })
        }

        fn run(&self, features: &EncodedFeatures) -> TractResult<f32> {
            let row: Vec<f32> = features
                .aligned(&self.columns)
                .into_iter()
                .map(|v| v as f32)
                .collect();
            let input = Tensor::from_shape(&[1, self.columns.len()], &row)?;
            let outputs = self.model.run(tvec!(input.into()))?;

            let log_rent = *outputs[0]
                .to_array_view::<f32>()?
                .iter()
                .next()
                .ok_or_else(|| anyhow::anyhow!("model returned no output"))?;
            Ok(log_rent)
        }
    }

    impl RentModel for OnnxRentModel {
        fn predict_log_rent(&self, features: &EncodedFeatures) -> Result<f64, ModelError> {
            self.run(features)
                .map(f64::from)
                .map_err(|e| ModelError::Onnx(e.to_string()))
        }

        fn version(&self) -> &str {
            &self.version
        }
    }
}
