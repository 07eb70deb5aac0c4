use egui::{Color32, Sense, Vec2};

use crate::config::CaptureConfig;
use crate::diagnostics::{self, DiagnosticsReceiver};
use crate::export::ExportedPath;
use crate::input::InputHandler;
use crate::path::PathBuilder;
use crate::session::CaptureSession;
use crate::surface::LiveCanvas;

const EXPORT_PREVIEW_WIDTH: f32 = 240.0;

/// We derive Deserialize/Serialize so the capture settings survive restarts.
/// The session itself is never persisted.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct InkApp {
    config: CaptureConfig,
    #[serde(skip)]
    session: CaptureSession,
    #[serde(skip)]
    canvas: LiveCanvas,
    #[serde(skip)]
    input: InputHandler,
    #[serde(skip)]
    diagnostics: Option<DiagnosticsReceiver>,
    #[serde(skip)]
    exports: Vec<ExportedPath>,
    #[serde(skip)]
    surface_size: Vec2,
}

impl Default for InkApp {
    fn default() -> Self {
        Self::with_config(CaptureConfig::default())
    }
}

impl InkApp {
    /// Called once before the first frame.
    ///
    /// An explicit config wins over the one restored from storage.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Option<CaptureConfig>) -> Self {
        let restored = cc
            .storage
            .and_then(|storage| eframe::get_value::<InkApp>(storage, eframe::APP_KEY))
            .map(|app| app.config);
        Self::with_config(config.or(restored).unwrap_or_default())
    }

    pub fn with_config(config: CaptureConfig) -> Self {
        let (sender, receiver) = diagnostics::channel(config.diagnostics_capacity);
        Self {
            session: CaptureSession::new(&config).with_diagnostics(sender),
            canvas: LiveCanvas::new(config.ink_color),
            input: InputHandler::default(),
            diagnostics: Some(receiver),
            exports: Vec::new(),
            surface_size: Vec2::ZERO,
            config,
        }
    }

    fn export(&mut self) {
        let builder = PathBuilder::new(self.surface_size);
        self.session.export(builder, &mut self.exports);
    }

    fn reset(&mut self) {
        self.session.reset();
        self.canvas.clear();
        self.exports.clear();
    }

    fn tools_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Ink");
        ui.separator();

        if ui.button("Render SVG").clicked() {
            self.export();
        }
        let overlay_shown = self.session.overlay_shown();
        if ui
            .add_enabled(!overlay_shown, egui::Button::new("Show points"))
            .clicked()
        {
            self.session.reveal_points(&mut self.canvas);
        }
        if ui.button("Reset").clicked() {
            self.reset();
        }

        ui.separator();
        ui.label(format!("points = {}", self.session.points().len()));
        if let Some(report) = self.diagnostics.as_ref().and_then(|d| d.latest()) {
            for line in report.lines() {
                ui.label(line);
            }
        }
    }

    fn exports_panel(&self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            for export in &self.exports {
                ui.label(export.label);

                let view = export.path.view_box;
                let aspect = if view.width() > 0.0 {
                    view.height() / view.width()
                } else {
                    1.0
                };
                let size = Vec2::new(EXPORT_PREVIEW_WIDTH, EXPORT_PREVIEW_WIDTH * aspect);
                let (response, painter) = ui.allocate_painter(size, Sense::hover());
                painter.rect_filled(response.rect, 0.0, Color32::WHITE);
                export.path.paint(&painter, response.rect);

                if ui.button("Copy SVG").clicked() {
                    ui.ctx().copy_text(export.path.to_svg());
                }
                ui.separator();
            }
        });
    }
}

impl eframe::App for InkApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("tools").show(ctx, |ui| self.tools_panel(ui));

        if !self.exports.is_empty() {
            egui::SidePanel::right("exports").show(ctx, |ui| self.exports_panel(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::drag());
            let rect = response.rect;
            self.surface_size = rect.size();
            self.input.set_canvas_rect(rect);

            let events = self.input.process_input(ctx);
            self.session.pump(&mut events.into_iter(), &mut self.canvas);

            painter.rect_filled(rect, 0.0, Color32::WHITE);
            self.canvas.paint(&painter, rect.min);
        });

        // Diagnostics are picked up only after the geometry is done
        if let Some(diagnostics) = &mut self.diagnostics {
            diagnostics.drain();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Sample;
    use egui::Pos2;

    #[test]
    fn test_only_config_is_persisted() {
        let mut app = InkApp::default();
        app.config.marker_size = 8.0;
        app.session
            .record_start(&Sample::pointer(Pos2::new(1.0, 1.0)), &mut app.canvas);

        let json = serde_json::to_string(&app).unwrap();
        let restored: InkApp = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.config.marker_size, 8.0);
        assert!(restored.session.points().is_empty());
        assert!(restored.canvas.instructions().is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut app = InkApp::default();
        app.surface_size = Vec2::new(100.0, 100.0);
        app.session
            .record_start(&Sample::pointer(Pos2::new(1.0, 1.0)), &mut app.canvas);
        app.session
            .record_move(&Sample::pointer(Pos2::new(2.0, 1.0)), &mut app.canvas);
        app.export();
        assert_eq!(app.exports.len(), 3);

        app.reset();
        assert!(app.exports.is_empty());
        assert!(app.session.points().is_empty());
        assert!(app.canvas.instructions().is_empty());
    }
}
