//! Library exports for reuse in integration tests.
/// Application directory helpers.
pub mod app_dirs;
/// Client for the remote sonar classifier.
pub mod classifier;
/// Persisted application settings.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Feature vector parsing and sampling.
pub mod features;
mod http_client;
/// Logging setup.
pub mod logging;
