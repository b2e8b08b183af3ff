use eframe::egui;
use std::path::{Path, PathBuf};

use crate::gui::constants::*;
use crate::render::ImageFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeAction {
    None,
    Import(PathBuf),
    ExportJson,
    ExportCsv,
    ExportImage(ImageFormat),
}

/// Import path field and export buttons
#[derive(Debug, Default)]
pub struct ExchangePanel {
    import_path: String,
}

impl ExchangePanel {
    pub fn new(initial_path: Option<&Path>) -> Self {
        Self {
            import_path: initial_path
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, export_dir: &Path) -> ExchangeAction {
        let mut action = ExchangeAction::None;

        ui.group(|ui| {
            ui.label(egui::RichText::new("Import").strong());
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.import_path)
                        .hint_text("path/to/matchup-data.json")
                        .desired_width(LEGEND_WIDTH - 70.0),
                );
                let path = self.import_path.trim();
                if ui.add_enabled(!path.is_empty(), egui::Button::new("Load")).clicked() {
                    action = ExchangeAction::Import(PathBuf::from(path));
                }
            });
        });

        ui.add_space(ITEM_SPACING);

        ui.group(|ui| {
            ui.label(egui::RichText::new("Export").strong());
            ui.label(egui::RichText::new(format!("to {}", export_dir.display())).small());
            ui.horizontal_wrapped(|ui| {
                if ui.button("PNG").clicked() {
                    action = ExchangeAction::ExportImage(ImageFormat::Png);
                }
                if ui.button("JPEG").clicked() {
                    action = ExchangeAction::ExportImage(ImageFormat::Jpeg);
                }
                if ui.button("JSON").clicked() {
                    action = ExchangeAction::ExportJson;
                }
                if ui.button("CSV").clicked() {
                    action = ExchangeAction::ExportCsv;
                }
            });
        });

        action
    }
}
