use eframe::egui;

use super::rank_editor::{EditorOutcome, RankEditor};
use crate::color::rgb_for_tag;
use crate::gui::constants::*;
use crate::state::AppState;
use crate::types::{Rank, RankDraft, RankId};

/// Legend interaction for the app to apply to the state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegendAction {
    None,
    Select(RankId),
    Add(RankDraft),
    Update(Rank),
    Delete(RankId),
}

/// Rank list with selection, add/edit dialog and delete confirmation
#[derive(Debug, Default)]
pub struct Legend {
    editor: RankEditor,
    pending_delete: Option<Rank>,
}

impl Legend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called by the app once an add/update went through
    pub fn edit_applied(&mut self) {
        self.editor.close();
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, state: &AppState) -> LegendAction {
        let mut action = LegendAction::None;

        ui.group(|ui| {
            ui.label(egui::RichText::new("Legend").strong());
            ui.label("Pick a rank, then click cells. Keys 1-9 select by position.");
            ui.add_space(ITEM_SPACING);

            for (index, rank) in state.ranks().list().iter().enumerate() {
                ui.horizontal(|ui| {
                    let (rect, _) = ui.allocate_exact_size(egui::vec2(SWATCH_SIZE, SWATCH_SIZE), egui::Sense::hover());
                    ui.painter().rect_filled(rect, 3.0, color32(rgb_for_tag(&rank.color_tag)));

                    let selected = state.selection().is_selected(&rank.id);
                    let label = ui.selectable_label(selected, format!("{}  {}", index + 1, rank.name));
                    let label = if rank.description.is_empty() {
                        label
                    } else {
                        label.on_hover_text(rank.description.as_str())
                    };
                    if label.clicked() {
                        action = LegendAction::Select(rank.id.clone());
                    }

                    if ui.small_button("✏").on_hover_text("Edit").clicked() {
                        self.editor.open_edit(rank);
                    }
                    if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                        self.pending_delete = Some(rank.clone());
                    }
                });
            }

            if state.ranks().is_empty() {
                ui.label("No ranks defined");
            }

            ui.add_space(ITEM_SPACING);
            if state.can_add_rank() {
                if ui.button("➕ Add Rank").clicked() {
                    self.editor.open_new();
                }
            } else {
                ui.label("(Maximum of 9 ranks reached)");
            }
        });

        if let Some(outcome) = self.editor.show(ui.ctx()) {
            action = match outcome {
                EditorOutcome::Add(draft) => LegendAction::Add(draft),
                EditorOutcome::Update(rank) => LegendAction::Update(rank),
            };
        }

        if self.pending_delete.is_some() {
            if let Some(id) = self.delete_confirm_dialog(ui.ctx()) {
                action = LegendAction::Delete(id);
            }
        }

        action
    }

    fn delete_confirm_dialog(&mut self, ctx: &egui::Context) -> Option<RankId> {
        let rank = self.pending_delete.as_ref()?;
        let mut confirmed = None;
        let mut close = false;

        egui::Window::new("Confirm Delete")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Delete rank '{}'?", rank.name));
                ui.colored_label(STATUS_ERROR, "Cells using it are reset in both modes.");

                ui.add_space(ITEM_SPACING);

                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        confirmed = Some(rank.id.clone());
                        close = true;
                    }
                    if ui.button("Cancel").clicked() {
                        close = true;
                    }
                });
            });

        if close {
            self.pending_delete = None;
        }
        confirmed
    }
}
