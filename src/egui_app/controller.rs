//! Prediction form controller.
//!
//! Owns the form state and mediates between raw user text and the remote
//! classifier. All transitions mutate one [`UiState`] snapshot; the renderer
//! only reads it. The HTTP call runs on a worker thread and its outcome is
//! drained by [`PredictionController::poll_background_jobs`] from the UI loop.

pub(crate) mod jobs;

use crate::classifier::{PredictClient, PredictError, Prediction};
use crate::config;
use crate::egui_app::state::*;
use crate::egui_app::view_model;
use crate::features;
use egui::Color32;

/// Maintains app state and bridges the classifier client to the egui UI.
pub struct PredictionController {
    pub ui: UiState,
    client: PredictClient,
    jobs: jobs::ControllerJobs,
}

impl PredictionController {
    pub fn new(client: PredictClient) -> Self {
        Self {
            ui: UiState::default(),
            client,
            jobs: jobs::ControllerJobs::new(),
        }
    }

    /// Build a controller against the endpoint from the persisted config.
    pub fn from_saved_config() -> Result<Self, config::ConfigError> {
        let cfg = config::load_or_default()?;
        Ok(Self::new(PredictClient::new(cfg.endpoint)))
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    /// Store new input text verbatim. Editing clears the error slot but
    /// keeps any earlier result visible.
    pub fn update_input(&mut self, text: impl Into<String>) {
        self.ui.form.input = text.into();
        self.ui.form.error = None;
    }

    /// Called by the renderer after the text edit mutated the buffer in place.
    pub fn input_edited(&mut self) {
        self.ui.form.error = None;
    }

    /// Overwrite the input with a demo sample. Leaves the error slot and any
    /// previous result untouched.
    pub fn generate_random_sample(&mut self) {
        let mut rng = rand::rng();
        self.ui.form.input = features::random_sample(&mut rng);
        self.set_status("Random sample generated", StatusTone::Info);
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.ui.form.request.is_pending() && !self.ui.form.input.trim().is_empty()
    }

    /// Validate the input and dispatch one classification request.
    ///
    /// Invalid input sets the fixed validation message and issues no network
    /// call; the request state is left where it was.
    pub fn submit(&mut self) {
        if self.ui.form.request.is_pending() {
            return;
        }
        let features = match features::parse_features(&self.ui.form.input) {
            Ok(features) => features,
            Err(err) => {
                tracing::warn!("Rejected sample: {err}");
                self.ui.form.error = Some(features::VALIDATION_MESSAGE.to_string());
                self.set_status("Input rejected", StatusTone::Warning);
                return;
            }
        };
        self.ui.form.request = RequestState::Pending;
        self.ui.form.error = None;
        self.set_status("Classifying sample…", StatusTone::Busy);
        self.jobs.begin_predict(self.client.clone(), features);
    }

    /// Reset input, result and error. The request state returns to idle
    /// unless a response is still in flight.
    pub fn clear(&mut self) {
        self.ui.form.input.clear();
        self.ui.form.result = None;
        self.ui.form.error = None;
        if !self.ui.form.request.is_pending() {
            self.ui.form.request = RequestState::Idle;
        }
        self.ui.status = StatusBarState::idle();
    }

    /// Drain worker results; called once per frame by the renderer.
    pub fn poll_background_jobs(&mut self) {
        while let Ok(message) = self.jobs.try_recv_message() {
            match message {
                jobs::JobMessage::PredictFinished(outcome) => {
                    self.jobs.clear_predict();
                    self.finish_predict(outcome.result);
                }
            }
        }
    }

    /// Map one response (or failure) into UI state, always leaving Pending.
    fn finish_predict(&mut self, result: Result<Prediction, PredictError>) {
        match result {
            Ok(prediction) => {
                tracing::info!(
                    class = prediction.class.label(),
                    confidence = prediction.confidence,
                    "Sample classified"
                );
                self.ui.form.result = Some(view_model::prediction_view(&prediction));
                self.ui.form.error = None;
                self.ui.form.request = RequestState::Succeeded;
                self.set_status(
                    format!("Classified as {}", prediction.class.label()),
                    StatusTone::Info,
                );
            }
            Err(err) => {
                tracing::warn!("Prediction failed: {err}");
                self.ui.form.error = Some(format!("Error: {}", err.user_message()));
                self.ui.form.request = RequestState::Failed;
                self.set_status("Prediction failed", StatusTone::Error);
            }
        }
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        let (label, color) = status_badge(tone);
        self.ui.status.text = text.into();
        self.ui.status.badge_label = label;
        self.ui.status.badge_color = color;
    }
}

#[derive(Clone, Copy, Debug)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Warning,
    Error,
}

fn status_badge(tone: StatusTone) -> (String, Color32) {
    match tone {
        StatusTone::Idle => ("Idle".into(), Color32::from_rgb(42, 42, 42)),
        StatusTone::Busy => ("Classifying".into(), Color32::from_rgb(31, 139, 255)),
        StatusTone::Info => ("Info".into(), Color32::from_rgb(64, 140, 112)),
        StatusTone::Warning => ("Warning".into(), Color32::from_rgb(192, 138, 43)),
        StatusTone::Error => ("Error".into(), Color32::from_rgb(192, 57, 43)),
    }
}
