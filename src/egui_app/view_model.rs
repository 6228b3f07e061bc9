//! Helpers to convert domain data into egui-facing view structs.

use crate::classifier::Prediction;
use crate::egui_app::state::PredictionView;

/// Convert a classification into its render-ready form.
///
/// The displayed confidence keeps whatever the service reported, rounded to
/// two decimal places; only the bar fraction is clamped, so out-of-range
/// scores render a full or empty bar instead of overflowing the track.
pub fn prediction_view(prediction: &Prediction) -> PredictionView {
    PredictionView {
        class: prediction.class,
        headline: prediction.class.label().to_uppercase(),
        confidence_text: format!("{:.2}", prediction.confidence),
        bar_fraction: (prediction.confidence / 100.0).clamp(0.0, 1.0) as f32,
    }
}
