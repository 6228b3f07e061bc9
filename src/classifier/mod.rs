//! Client for the remote sonar classifier service.

pub mod api;

pub use api::{PredictClient, PredictError, Prediction, SonarClass};
