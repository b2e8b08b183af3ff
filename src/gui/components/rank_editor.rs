//! Add/edit dialog for a single rank

use eframe::egui;

use crate::color::{option_for_tag, HexColor, COLOR_OPTIONS};
use crate::constants::ranks::NEW_RANK_COLOR_INDEX;
use crate::gui::constants::*;
use crate::types::{Rank, RankDraft, RankId};

/// What the dialog produced when confirmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOutcome {
    Add(RankDraft),
    Update(Rank),
}

#[derive(Debug, Default)]
pub struct RankEditor {
    open: bool,
    /// `None` while adding a new rank
    editing: Option<RankId>,
    name: String,
    description: String,
    /// `None` keeps `kept_tags` (imported tags outside the palette)
    color_index: Option<usize>,
    kept_tags: (String, String),
}

impl RankEditor {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open_new(&mut self) {
        *self = Self {
            open: true,
            color_index: Some(NEW_RANK_COLOR_INDEX),
            ..Self::default()
        };
    }

    pub fn open_edit(&mut self, rank: &Rank) {
        let color_index = option_for_tag(&rank.color_tag)
            .and_then(|option| COLOR_OPTIONS.iter().position(|o| o == option));
        *self = Self {
            open: true,
            editing: Some(rank.id.clone()),
            name: rank.name.clone(),
            description: rank.description.clone(),
            color_index,
            kept_tags: (rank.color_tag.clone(), rank.selected_color_tag.clone()),
        };
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    fn draft(&self) -> RankDraft {
        let (color_tag, selected_color_tag) = match self.color_index.and_then(|i| COLOR_OPTIONS.get(i)) {
            Some(option) => (option.color_tag.to_string(), option.selected_color_tag.to_string()),
            None => self.kept_tags.clone(),
        };
        RankDraft {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            color_tag,
            selected_color_tag,
        }
    }

    fn outcome(&self) -> EditorOutcome {
        match &self.editing {
            Some(id) => EditorOutcome::Update(self.draft().into_rank(id.clone())),
            None => EditorOutcome::Add(self.draft()),
        }
    }

    /// Show the dialog if open; returns the confirmed edit
    ///
    /// The dialog stays open on confirm so a rejected edit can be corrected;
    /// the caller closes it once the edit is applied.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<EditorOutcome> {
        if !self.open {
            return None;
        }

        let mut outcome = None;
        let title = if self.editing.is_some() { "Edit Rank" } else { "Add Rank" };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Name:");
                ui.text_edit_singleline(&mut self.name);

                ui.label("Description (optional):");
                ui.text_edit_multiline(&mut self.description);

                ui.add_space(ITEM_SPACING);
                ui.label("Color:");
                ui.horizontal_wrapped(|ui| {
                    for (index, option) in COLOR_OPTIONS.iter().enumerate() {
                        let selected = self.color_index == Some(index);
                        let stroke = if selected {
                            egui::Stroke::new(2.0, egui::Color32::WHITE)
                        } else {
                            egui::Stroke::NONE
                        };
                        let swatch = egui::Button::new("")
                            .fill(color32(option.rgb))
                            .stroke(stroke)
                            .min_size(egui::vec2(SWATCH_SIZE * 1.5, SWATCH_SIZE * 1.5));
                        let hover = format!("{} ({})", option.name, HexColor::from_rgb(option.rgb).to_hex_string());
                        if ui.add(swatch).on_hover_text(hover).clicked() {
                            self.color_index = Some(index);
                        }
                    }
                });

                ui.add_space(ITEM_SPACING);

                let name_missing = self.name.trim().is_empty();
                if name_missing {
                    ui.colored_label(STATUS_ERROR, "A name is required");
                }

                ui.horizontal(|ui| {
                    let confirm = if self.editing.is_some() { "Save" } else { "Add" };
                    if ui.add_enabled(!name_missing, egui::Button::new(confirm)).clicked() {
                        outcome = Some(self.outcome());
                    }
                    if ui.button("Cancel").clicked() {
                        self.close();
                    }
                });
            });

        outcome
    }
}
