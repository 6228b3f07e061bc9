//! egui renderer for the prediction form.

use crate::classifier::SonarClass;
use crate::egui_app::controller::PredictionController;
use crate::egui_app::state::PredictionView;
use eframe::egui::{self, Color32, Frame, RichText, Ui, Vec2};

/// Smallest viewport that keeps the form usable.
pub const MIN_VIEWPORT_SIZE: Vec2 = Vec2::new(620.0, 560.0);

const CARD_FILL: Color32 = Color32::from_rgb(24, 24, 24);
const TEXT_PRIMARY: Color32 = Color32::WHITE;
const TEXT_MUTED: Color32 = Color32::from_rgb(160, 160, 160);
const ERROR_TONE: Color32 = Color32::from_rgb(192, 57, 43);
const MINE_TONE: Color32 = Color32::from_rgb(192, 57, 43);
const ROCK_TONE: Color32 = Color32::from_rgb(64, 140, 112);

/// Renders the egui UI using the shared controller state.
pub struct SonarApp {
    controller: PredictionController,
    visuals_set: bool,
}

impl SonarApp {
    /// Create the app, loading the persisted endpoint configuration.
    pub fn new() -> Result<Self, String> {
        let controller = PredictionController::from_saved_config()
            .map_err(|err| format!("Failed to load config: {err}"))?;
        Ok(Self::with_controller(controller))
    }

    /// Build the app around an existing controller, e.g. one bound to a
    /// non-default endpoint.
    pub fn with_controller(controller: PredictionController) -> Self {
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        visuals.window_fill = Color32::from_rgb(12, 12, 12);
        visuals.panel_fill = Color32::from_rgb(16, 16, 16);
        visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(16, 16, 16);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar")
            .frame(Frame::none().fill(CARD_FILL))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Submarine Sonar: Rock vs Mine").color(TEXT_PRIMARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .button(RichText::new("Close").color(TEXT_PRIMARY))
                            .clicked()
                        {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::none().fill(Color32::from_rgb(0, 0, 0)))
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.painter().circle_filled(
                        ui.cursor().min + egui::vec2(9.0, 11.0),
                        9.0,
                        status.badge_color,
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(&status.badge_label).color(TEXT_PRIMARY));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(TEXT_PRIMARY));
                });
            });
    }

    fn render_form(&mut self, ui: &mut Ui) {
        let pending = self.controller.ui.form.request.is_pending();

        ui.label(RichText::new("Input Data").color(TEXT_PRIMARY).heading());
        ui.add_space(4.0);
        ui.label(
            RichText::new("Enter 60 comma-separated values from your sonar dataset:")
                .color(TEXT_MUTED),
        );
        ui.add_space(6.0);

        let response = ui.add_enabled(
            !pending,
            egui::TextEdit::multiline(&mut self.controller.ui.form.input)
                .hint_text("e.g., 0.0123, 0.0456, 0.0789, ... (60 values total)")
                .desired_width(f32::INFINITY)
                .desired_rows(5),
        );
        if response.changed() {
            self.controller.input_edited();
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!pending, egui::Button::new("Generate Random Sample"))
                .clicked()
            {
                self.controller.generate_random_sample();
            }
            if ui.button("Clear").clicked() {
                self.controller.clear();
            }
        });

        if let Some(error) = self.controller.ui.form.error.clone() {
            ui.add_space(8.0);
            ui.label(RichText::new(error).color(ERROR_TONE));
        }

        ui.add_space(10.0);
        let label = if pending { "Processing…" } else { "Predict" };
        if ui
            .add_enabled(self.controller.can_submit(), egui::Button::new(label))
            .clicked()
        {
            self.controller.submit();
        }
    }

    fn render_result(&mut self, ui: &mut Ui) {
        let Some(view) = self.controller.ui.form.result.clone() else {
            return;
        };
        ui.add_space(12.0);
        ui.label(
            RichText::new("Prediction Result")
                .color(TEXT_PRIMARY)
                .heading(),
        );
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(&view.headline)
                    .color(class_tone(view.class))
                    .strong()
                    .size(22.0),
            );
            ui.add_space(6.0);
            ui.label(
                RichText::new(format!("(Confidence: {}%)", view.confidence_text))
                    .color(TEXT_MUTED),
            );
        });
        ui.add_space(6.0);
        render_confidence_bar(ui, &view);
        ui.horizontal(|ui| {
            ui.label(RichText::new("Rock").color(TEXT_MUTED));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new("Mine").color(TEXT_MUTED));
            });
        });
    }

    fn render_how_it_works(&mut self, ui: &mut Ui) {
        ui.add_space(12.0);
        ui.label(RichText::new("How It Works").color(TEXT_PRIMARY).heading());
        ui.add_space(4.0);
        ui.label(
            RichText::new(
                "A logistic regression model, trained on the Sonar dataset, classifies \
                 60 sonar frequency readings as a rock or a metal cylinder (mine). \
                 Predictions run on a remote service; this app only submits readings \
                 and renders the returned classification.",
            )
            .color(TEXT_MUTED),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("Endpoint: {}", self.controller.endpoint()))
                .color(TEXT_MUTED)
                .small(),
        );
    }
}

fn class_tone(class: SonarClass) -> Color32 {
    match class {
        SonarClass::Mine => MINE_TONE,
        SonarClass::Rock => ROCK_TONE,
    }
}

fn render_confidence_bar(ui: &mut Ui, view: &PredictionView) {
    let height = 14.0;
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), height),
        egui::Sense::hover(),
    );
    ui.painter()
        .rect_filled(rect, 3.0, Color32::from_rgb(36, 36, 36));
    let fill_width = rect.width() * view.bar_fraction;
    if fill_width > 0.0 {
        let fill = egui::Rect::from_min_size(rect.min, egui::vec2(fill_width, height));
        ui.painter().rect_filled(fill, 3.0, class_tone(view.class));
    }
}

impl eframe::App for SonarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();

        self.render_top_bar(ctx);
        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_source("form_scroll")
                .show(ui, |ui| {
                    ui.set_min_width(MIN_VIEWPORT_SIZE.x - 40.0);
                    self.render_form(ui);
                    self.render_result(ui);
                    self.render_how_it_works(ui);
                });
        });

        if self.controller.ui.form.request.is_pending() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
