//! Application state: roster, ranks, both matrices and the armed rank
//!
//! The state is a single owned value held by one controller (GUI or CLI).
//! Every operation that touches more than one component does so inside one
//! `&mut self` call, so no caller can observe a half-applied change.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::constants::ranks::{DEFAULT_RANK_ID, MAX_RANKS};
use crate::defaults;
use crate::exchange::{self, ImportError, Imported};
use crate::matrix::MatchupMatrix;
use crate::modes::ModeStore;
use crate::registry::RankRegistry;
use crate::selection::Selection;
use crate::types::{Character, Mode, Rank, RankDraft, RankId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("a maximum of {0} ranks can be defined")]
    RankLimitReached(usize),
    #[error("rank name is required")]
    EmptyRankName,
    #[error("no rank with id {0}")]
    UnknownRank(RankId),
}

/// Outcome of a successful import, for user feedback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub characters: usize,
    pub ranks: usize,
    pub legacy: bool,
    pub dangling_cells: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    roster: Vec<Character>,
    ranks: RankRegistry,
    grids: ModeStore,
    selection: Selection,
    active_mode: Mode,
}

/// Sentinel every cell falls back to
pub fn default_rank_id() -> RankId {
    RankId::Num(DEFAULT_RANK_ID)
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(defaults::roster(), defaults::ranks())
    }
}

impl AppState {
    /// Fresh session: both matrices all-default, first rank armed
    pub fn new(roster: Vec<Character>, ranks: Vec<Rank>) -> Self {
        let grids = ModeStore::new(roster.len(), &default_rank_id());
        Self::from_parts(roster, ranks, grids)
    }

    pub fn from_parts(roster: Vec<Character>, ranks: Vec<Rank>, grids: ModeStore) -> Self {
        let ranks = RankRegistry::from_ranks(ranks);
        let selection = Selection::first_of(&ranks);
        Self {
            roster,
            ranks,
            grids,
            selection,
            active_mode: Mode::default(),
        }
    }

    /// Swap in a whole new roster; both matrices are rebuilt with defaults
    pub fn with_roster(mut self, roster: Vec<Character>) -> Self {
        self.grids.resize_for_roster(roster.len(), &default_rank_id());
        info!(characters = roster.len(), "Roster replaced");
        self.roster = roster;
        self
    }

    pub fn roster(&self) -> &[Character] {
        &self.roster
    }

    pub fn ranks(&self) -> &RankRegistry {
        &self.ranks
    }

    pub fn grids(&self) -> &ModeStore {
        &self.grids
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn active_mode(&self) -> Mode {
        self.active_mode
    }

    pub fn active_matrix(&self) -> &MatchupMatrix {
        self.grids.get(self.active_mode)
    }

    /// Rank shown in a cell of the active matrix; `None` renders as unranked
    pub fn resolve_cell(&self, row: usize, col: usize) -> Option<&Rank> {
        self.active_matrix()
            .get(row, col)
            .and_then(|id| self.ranks.by_id(id))
    }

    pub fn set_active_mode(&mut self, mode: Mode) {
        if self.active_mode != mode {
            info!(mode = %mode, "Switched mode");
            self.active_mode = mode;
        }
    }

    pub fn select_rank(&mut self, id: RankId) {
        self.selection.select(id);
    }

    /// Digit hotkey selection (1-based)
    pub fn select_position(&mut self, position: usize) -> bool {
        self.selection.select_position(position, &self.ranks)
    }

    /// Paint the armed rank into the active matrix
    ///
    /// Ignored without a selection or on the diagonal.
    pub fn paint(&mut self, row: usize, col: usize) -> bool {
        let Some(rank) = self.selection.current().cloned() else {
            return false;
        };
        let painted = self.grids.set_cell(self.active_mode, row, col, rank);
        if painted {
            debug!(mode = %self.active_mode, row, col, "Painted cell");
        }
        painted
    }

    /// Reset only the active mode's matrix
    pub fn reset_active(&mut self) {
        self.grids
            .reset(self.active_mode, self.roster.len(), &default_rank_id());
        info!(mode = %self.active_mode, "Reset matrix");
    }

    pub fn can_add_rank(&self) -> bool {
        self.ranks.len() < MAX_RANKS
    }

    pub fn add_rank(&mut self, draft: RankDraft) -> Result<Rank, StateError> {
        if !self.can_add_rank() {
            return Err(StateError::RankLimitReached(MAX_RANKS));
        }
        if draft.name.trim().is_empty() {
            return Err(StateError::EmptyRankName);
        }
        let rank = self.ranks.add(draft);
        self.selection.repair(&self.ranks);
        info!(rank = %rank.id, name = %rank.name, "Rank added");
        Ok(rank)
    }

    pub fn update_rank(&mut self, rank: Rank) -> Result<(), StateError> {
        if rank.name.trim().is_empty() {
            return Err(StateError::EmptyRankName);
        }
        let id = rank.id.clone();
        match self.ranks.update(rank) {
            Some(_) => Ok(()),
            None => Err(StateError::UnknownRank(id)),
        }
    }

    /// Remove a rank and reset every cell that referenced it, in both modes
    pub fn delete_rank(&mut self, id: &RankId) -> Option<Rank> {
        let removed = self.ranks.remove(id)?;
        let reset = self.grids.replace_rank(id, &default_rank_id());
        self.selection.repair(&self.ranks);
        info!(rank = %id, name = %removed.name, cells_reset = reset, "Rank deleted");
        Some(removed)
    }

    /// Parse an export envelope and, if valid, replace roster, ranks and grids
    ///
    /// On error the state is left untouched. The active mode is kept.
    pub fn import_json(&mut self, text: &str) -> Result<ImportSummary, ImportError> {
        let imported = exchange::import_json(text)?;
        Ok(self.apply_import(imported))
    }

    pub fn apply_import(&mut self, imported: Imported) -> ImportSummary {
        let legacy = imported.legacy;
        let mut next = Self::from_parts(imported.roster, imported.ranks, imported.grids);
        next.active_mode = self.active_mode;

        let dangling_cells = Mode::ALL
            .iter()
            .map(|mode| next.grids.get(*mode).dangling_cells(&next.ranks).len())
            .sum();
        if dangling_cells > 0 {
            warn!(dangling_cells, "Imported grids reference unknown ranks; shown as unranked");
        }

        let summary = ImportSummary {
            characters: next.roster.len(),
            ranks: next.ranks.len(),
            legacy,
            dangling_cells,
        };
        *self = next;
        info!(characters = summary.characters, ranks = summary.ranks, legacy, "Import applied");
        summary
    }

    /// Export envelope text (current dual-mode format)
    pub fn export_json(&self) -> serde_json::Result<String> {
        exchange::export_json(&self.roster, &self.ranks, &self.grids)
    }

    /// CSV table of the active mode
    pub fn export_csv(&self) -> String {
        exchange::export_csv(&self.roster, &self.ranks, self.active_matrix())
    }
}
