//! Grid editor window

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use eframe::{egui, CreationContext, NativeOptions};
use tracing::{error, info, warn};

use super::components::{grid_view, ExchangeAction, ExchangePanel, Legend, LegendAction};
use super::constants::*;
use crate::config::Settings;
use crate::constants::export::{CSV_FILENAME, JSON_FILENAME};
use crate::exchange::{image_filename, read_import, write_artifact};
use crate::render::{export_raster_image, GridView, ImageFormat, RasterStyle, SoftwareRasterizer};
use crate::state::{AppState, ImportSummary};
use crate::types::Mode;

struct StatusMessage {
    text: String,
    color: egui::Color32,
}

struct MatchupApp {
    state: AppState,
    settings: Settings,
    rasterizer: SoftwareRasterizer,
    legend: Legend,
    exchange: ExchangePanel,
    show_reset_confirm: bool,
    status_message: Option<StatusMessage>,
}

impl MatchupApp {
    fn new(_cc: &CreationContext<'_>, settings: Settings, open: Option<PathBuf>) -> Self {
        info!("Initializing grid editor");
        let mut app = Self::with_state(settings, AppState::default(), open.as_deref());
        if let Some(path) = open {
            app.import_from(&path);
        }
        app
    }

    fn with_state(settings: Settings, state: AppState, import_path: Option<&Path>) -> Self {
        let rasterizer = SoftwareRasterizer::new(RasterStyle::from(&settings.image));
        Self {
            state,
            settings,
            rasterizer,
            legend: Legend::new(),
            exchange: ExchangePanel::new(import_path),
            show_reset_confirm: false,
            status_message: None,
        }
    }

    fn set_status(&mut self, text: impl Into<String>, color: egui::Color32) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            color,
        });
    }

    fn report(&mut self, result: Result<String>) {
        match result {
            Ok(message) => self.set_status(message, STATUS_OK),
            Err(err) => {
                error!(error = ?err, "Action failed");
                self.set_status(format!("{err:#}"), STATUS_ERROR);
            }
        }
    }

    fn import_from(&mut self, path: &Path) {
        let result = read_import(path).and_then(|text| {
            self.state
                .import_json(&text)
                .with_context(|| format!("Failed to import {}", path.display()))
        });
        match result {
            Ok(summary) => self.import_succeeded(&summary),
            Err(err) => self.report(Err(err)),
        }
    }

    fn import_succeeded(&mut self, summary: &ImportSummary) {
        let mut text = format!(
            "Imported {} characters and {} ranks",
            summary.characters, summary.ranks
        );
        if summary.legacy {
            text.push_str(" (legacy file, dual lane reset to defaults)");
        }
        if summary.dangling_cells > 0 {
            text.push_str(&format!(
                "; {} cells reference unknown ranks",
                summary.dangling_cells
            ));
            self.set_status(text, STATUS_WARN);
        } else {
            self.set_status(text, STATUS_OK);
        }
    }

    fn export(&self, format: ExportKind) -> Result<String> {
        let dir = &self.settings.export_dir;
        let path = match format {
            ExportKind::Json => {
                let json = self.state.export_json().context("Failed to serialize export")?;
                write_artifact(dir, JSON_FILENAME, json.as_bytes())?
            }
            ExportKind::Csv => write_artifact(dir, CSV_FILENAME, self.state.export_csv().as_bytes())?,
            ExportKind::Image(format) => {
                let view = GridView::capture(&self.state);
                let bytes = export_raster_image(&self.rasterizer, &view, format)
                    .context("Failed to export image")?;
                write_artifact(dir, &image_filename(format), &bytes)?
            }
        };
        Ok(format!("Saved {}", path.display()))
    }

    fn apply_legend_action(&mut self, action: LegendAction) {
        let result = match action {
            LegendAction::None => return,
            LegendAction::Select(id) => {
                self.state.select_rank(id);
                return;
            }
            LegendAction::Add(draft) => self
                .state
                .add_rank(draft)
                .map(|rank| format!("Added rank '{}'", rank.name)),
            LegendAction::Update(rank) => {
                let name = rank.name.clone();
                self.state
                    .update_rank(rank)
                    .map(|()| format!("Updated rank '{name}'"))
            }
            LegendAction::Delete(id) => match self.state.delete_rank(&id) {
                Some(rank) => Ok(format!("Deleted rank '{}'", rank.name)),
                None => {
                    warn!(rank = %id, "Delete requested for unknown rank");
                    return;
                }
            },
        };

        match result {
            Ok(message) => {
                self.legend.edit_applied();
                self.set_status(message, STATUS_OK);
            }
            Err(err) => self.set_status(err.to_string(), STATUS_ERROR),
        }
    }

    fn apply_exchange_action(&mut self, action: ExchangeAction) {
        match action {
            ExchangeAction::None => {}
            ExchangeAction::Import(path) => self.import_from(&path),
            ExchangeAction::ExportJson => self.report(self.export(ExportKind::Json)),
            ExchangeAction::ExportCsv => self.report(self.export(ExportKind::Csv)),
            ExchangeAction::ExportImage(format) => self.report(self.export(ExportKind::Image(format))),
        }
    }

    /// Digit keys pick legend positions unless a text field has focus
    fn handle_hotkeys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let pressed: Vec<usize> = ctx.input(|i| {
            DIGIT_KEYS
                .iter()
                .enumerate()
                .filter(|(_, key)| i.key_pressed(**key))
                .map(|(index, _)| index + 1)
                .collect()
        });
        for position in pressed {
            self.state.select_position(position);
        }
    }

    fn reset_confirm_dialog(&mut self, ctx: &egui::Context) {
        let mode = self.state.active_mode();
        egui::Window::new("Confirm Reset")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Reset every {} matchup to the default rank?", mode.label()));
                ui.label("The other mode is not affected.");
                ui.add_space(ITEM_SPACING);
                ui.horizontal(|ui| {
                    if ui.button("Reset").clicked() {
                        self.state.reset_active();
                        self.show_reset_confirm = false;
                        self.status_message = Some(StatusMessage {
                            text: format!("{} reset", mode.label()),
                            color: STATUS_OK,
                        });
                    }
                    if ui.button("Cancel").clicked() {
                        self.show_reset_confirm = false;
                    }
                });
            });
    }
}

#[derive(Debug, Clone, Copy)]
enum ExportKind {
    Json,
    Csv,
    Image(ImageFormat),
}

impl eframe::App for MatchupApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_hotkeys(ctx);

        egui::TopBottomPanel::top("mode_bar").show(ctx, |ui| {
            ui.add_space(PADDING);
            ui.horizontal(|ui| {
                ui.heading("Matchup Ranker");
                ui.add_space(SECTION_SPACING);
                for mode in Mode::ALL {
                    let active = self.state.active_mode() == mode;
                    if ui.selectable_label(active, mode.label()).clicked() {
                        self.state.set_active_mode(mode);
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Reset Mode").clicked() {
                        self.show_reset_confirm = true;
                    }
                });
            });
            ui.add_space(PADDING);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.add_space(ITEM_SPACING / 2.0);
            match &self.status_message {
                Some(message) => {
                    ui.colored_label(message.color, &message.text);
                }
                None => {
                    ui.label("Ready");
                }
            }
            ui.add_space(ITEM_SPACING / 2.0);
        });

        let mut legend_action = LegendAction::None;
        let mut exchange_action = ExchangeAction::None;
        egui::SidePanel::right("legend_panel")
            .resizable(false)
            .exact_width(LEGEND_WIDTH)
            .show(ctx, |ui| {
                ui.add_space(PADDING);
                legend_action = self.legend.ui(ui, &self.state);
                ui.add_space(SECTION_SPACING);
                exchange_action = self.exchange.ui(ui, &self.settings.export_dir);
            });

        let mut clicked = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            clicked = grid_view::ui(ui, &self.state);
        });

        if let Some((row, col)) = clicked {
            self.state.paint(row, col);
        }
        self.apply_legend_action(legend_action);
        self.apply_exchange_action(exchange_action);

        if self.show_reset_confirm {
            self.reset_confirm_dialog(ctx);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Grid editor exiting");
    }
}

pub fn run_gui(settings: Settings, open: Option<PathBuf>) -> Result<()> {
    // Only the editor leaves a settings file behind; headless commands never write one
    if let Err(e) = settings.create_if_missing(&Settings::path()) {
        warn!(error = ?e, "Could not write default settings file");
    }

    let window = &settings.window;
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([window.width as f32, window.height as f32])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title("Matchup Ranker"),
        ..Default::default()
    };

    eframe::run_native(
        "Matchup Ranker",
        options,
        Box::new(move |cc| Ok(Box::new(MatchupApp::new(cc, settings, open)))),
    )
    .map_err(|err| anyhow!("Failed to launch grid editor: {err}"))
}
