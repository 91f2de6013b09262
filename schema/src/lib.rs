//! Types partagés entre le formulaire et l'API de prédiction de loyer.
//!
//! Le format JSON est celui attendu par `POST /predict` : les champs
//! catégoriels voyagent sous leur libellé étiqueté (`"(a) in-unit"`), le
//! district sous forme de nombre entre 1 et 10.

pub mod choices;
pub mod district;
pub mod error;
pub mod request;

pub use choices::{HousingType, Laundry, Parking, PetPolicy};
pub use district::District;
pub use error::{UnknownChoice, ValidationError};
pub use request::{PredictionRequest, MIN_SQFT};
