//! Shared egui UI modules.

/// Form controller bridging user events to the classifier client.
pub mod controller;
/// Shared state types for the egui UI.
pub mod state;
/// egui renderer for the prediction form.
pub mod ui;
/// Helpers to convert domain data into egui-facing view structs.
pub mod view_model;
