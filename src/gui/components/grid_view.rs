use eframe::egui;

use crate::color::rgb_for_tag;
use crate::constants::labels::{OPPONENT, UNRANKED, YOUR_PICK};
use crate::constants::raster::{DIAGONAL_COLOR, UNRANKED_COLOR};
use crate::gui::constants::*;
use crate::state::AppState;

/// Draw the active matrix; returns the clicked off-diagonal cell
pub fn ui(ui: &mut egui::Ui, state: &AppState) -> Option<(usize, usize)> {
    let mut clicked = None;
    let roster = state.roster();

    if roster.is_empty() {
        ui.label("The roster is empty. Import a file to get started.");
        return None;
    }

    egui::ScrollArea::both().show(ui, |ui| {
        egui::Grid::new("matchup_grid")
            .spacing([GRID_SPACING, GRID_SPACING])
            .show(ui, |ui| {
                ui.label(egui::RichText::new(format!("{YOUR_PICK} \\ {OPPONENT}")).small());
                for character in roster {
                    ui.add_sized(
                        [GRID_CELL_SIZE, GRID_CELL_SIZE],
                        egui::Label::new(egui::RichText::new(&character.name).small()).wrap(),
                    )
                    .on_hover_text(character.image.as_str());
                }
                ui.end_row();

                for (row, character) in roster.iter().enumerate() {
                    ui.label(egui::RichText::new(&character.name).strong());
                    for col in 0..roster.len() {
                        if row == col {
                            let cell = egui::Button::new("")
                                .fill(color32(DIAGONAL_COLOR))
                                .min_size(egui::vec2(GRID_CELL_SIZE, GRID_CELL_SIZE));
                            ui.add_enabled(false, cell);
                            continue;
                        }

                        let rank = state.resolve_cell(row, col);
                        let (fill, name) = match rank {
                            Some(rank) => (rgb_for_tag(&rank.color_tag), rank.name.as_str()),
                            None => (UNRANKED_COLOR, UNRANKED),
                        };
                        let cell = egui::Button::new("")
                            .fill(color32(fill))
                            .min_size(egui::vec2(GRID_CELL_SIZE, GRID_CELL_SIZE));
                        let hover = format!("{} vs {}: {}", character.name, roster[col].name, name);
                        if ui.add(cell).on_hover_text(hover).clicked() {
                            clicked = Some((row, col));
                        }
                    }
                    ui.end_row();
                }
            });
    });

    clicked
}
