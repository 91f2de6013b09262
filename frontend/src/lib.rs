//! Formulaire de prédiction de loyer, sans interface graphique.
//!
//! [`view::FormView`] tient l'état saisi, valide avant envoi, n'autorise
//! qu'une requête à la fois et expose le bandeau d'erreur, le résultat
//! formaté et les notifications à afficher.

pub mod cli;
pub mod client;
pub mod config;
pub mod form;
pub mod format;
pub mod view;

pub use client::{ClientError, HttpPredictionClient, PredictionClient};
pub use form::{Field, FormError};
pub use view::{FormView, Notification, NotificationVariant, SubmitOutcome};
