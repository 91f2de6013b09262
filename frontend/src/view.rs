use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};
use rent_schema::{PredictionRequest, ValidationError};

use crate::client::{ClientError, PredictionClient};
use crate::form::{self, Field, FormError};
use crate::format::format_rent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// Message éphémère (toast) affiché après une soumission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    fn prediction_ready() -> Self {
        Notification {
            title: "Prediction Complete!".to_string(),
            description: "Your rental price prediction is ready.".to_string(),
            variant: NotificationVariant::Default,
        }
    }

    fn prediction_failed(description: &str) -> Self {
        Notification {
            title: "Prediction Failed".to_string(),
            description: description.to_string(),
            variant: NotificationVariant::Destructive,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Predicted(f64),
    /// Refusée localement, rien n'a été envoyé.
    Invalid(ValidationError),
    Failed(ClientError),
    /// Une requête est déjà en cours ; le bouton d'envoi est désactivé.
    Busy,
}

#[derive(Debug, Default)]
struct ViewState {
    form: PredictionRequest,
    error: Option<String>,
    prediction: Option<f64>,
    notifications: VecDeque<Notification>,
}

/// Remet le drapeau à `false` quelle que soit l'issue de la requête.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Formulaire et résultat pour un logement.
///
/// La vue est `Sync` : la partager derrière un `Arc` entre la saisie et la
/// tâche qui soumet. Une seule requête à la fois ; le verrou d'état n'est
/// jamais tenu pendant l'appel réseau.
pub struct FormView<C> {
    client: C,
    state: Mutex<ViewState>,
    submitting: AtomicBool,
}

impl<C: PredictionClient> FormView<C> {
    pub fn new(client: C) -> Self {
        Self::with_form(client, PredictionRequest::default())
    }

    pub fn with_form(client: C, form: PredictionRequest) -> Self {
        FormView {
            client,
            state: Mutex::new(ViewState {
                form,
                ..ViewState::default()
            }),
            submitting: AtomicBool::new(false),
        }
    }

    pub fn form(&self) -> PredictionRequest {
        self.lock().form.clone()
    }

    /// Applique une saisie. Une saisie acceptée ferme le bandeau d'erreur.
    pub fn set_field(&self, field: Field, raw: &str) -> Result<(), FormError> {
        let mut state = self.lock();
        form::apply(&mut state.form, field, raw)?;
        state.error = None;
        Ok(())
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn prediction(&self) -> Option<f64> {
        self.lock().prediction
    }

    /// Prédiction telle qu'affichée, par ex. `$3,200`.
    pub fn rendered_prediction(&self) -> Option<String> {
        self.prediction().map(format_rent)
    }

    pub fn is_submit_enabled(&self) -> bool {
        !self.submitting.load(Ordering::Acquire)
    }

    pub fn take_notifications(&self) -> Vec<Notification> {
        self.lock().notifications.drain(..).collect()
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_in_flight) = InFlight::acquire(&self.submitting) else {
            debug!("Submit ignored: a prediction request is already in flight");
            return SubmitOutcome::Busy;
        };

        let request = {
            let mut state = self.lock();
            if let Err(e) = state.form.validate() {
                debug!("Form rejected: {}", e);
                state.error = Some(e.to_string());
                return SubmitOutcome::Invalid(e);
            }
            state.error = None;
            state.prediction = None;
            state.form.clone()
        };

        info!(
            "Requesting prediction for {} sqft, {} bd / {} ba, district {}",
            request.sqft, request.beds, request.bath, request.hood_district
        );

        match self.client.predict(&request).await {
            Ok(rent) => {
                info!("Predicted rent: {:.2}", rent);
                let mut state = self.lock();
                state.prediction = Some(rent);
                state.notifications.push_back(Notification::prediction_ready());
                SubmitOutcome::Predicted(rent)
            }
            Err(e) => {
                warn!("Prediction failed: {}", e);
                let message = e.to_string();
                let mut state = self.lock();
                state.notifications.push_back(Notification::prediction_failed(&message));
                state.error = Some(message);
                SubmitOutcome::Failed(e)
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
