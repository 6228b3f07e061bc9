//! Shared state types for the egui UI.

use crate::classifier::SonarClass;
use egui::Color32;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub form: PredictionFormState,
    pub status: StatusBarState,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            form: PredictionFormState::default(),
            status: StatusBarState::idle(),
        }
    }
}

/// The four pieces of state the prediction form owns.
#[derive(Clone, Debug, Default)]
pub struct PredictionFormState {
    /// Raw comma-separated text, stored verbatim until submit.
    pub input: String,
    /// Last successful classification; replaced wholesale on each success.
    pub result: Option<PredictionView>,
    pub request: RequestState,
    /// Single error slot, overwritten on each new failure.
    pub error: Option<String>,
}

/// Lifecycle of the one in-flight request the form can have.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    /// A request is in flight; resubmission is disabled.
    Pending,
    Succeeded,
    Failed,
}

impl RequestState {
    pub fn is_pending(self) -> bool {
        self == Self::Pending
    }
}

/// Render-ready classification result.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionView {
    pub class: SonarClass,
    /// Upper-cased class label for the result headline.
    pub headline: String,
    /// Confidence rounded to two decimal places, without the `%` sign.
    pub confidence_text: String,
    /// Bar width as a fraction of the track, clamped to [0, 1] for rendering.
    pub bar_fraction: f32,
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self {
            text: "Paste 60 sonar readings to get started".into(),
            badge_label: "Idle".into(),
            badge_color: Color32::from_rgb(42, 42, 42),
        }
    }
}
