//! One matchup matrix per mode, sized to the roster

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matrix::MatchupMatrix;
use crate::types::{Mode, RankId};

/// Solo and dual matrices; each owns its own storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeStore {
    solo: MatchupMatrix,
    dual: MatchupMatrix,
}

impl ModeStore {
    /// Two default matrices of `size × size`
    pub fn new(size: usize, default: &RankId) -> Self {
        Self {
            solo: MatchupMatrix::create(size, default),
            dual: MatchupMatrix::create(size, default),
        }
    }

    pub fn from_parts(solo: MatchupMatrix, dual: MatchupMatrix) -> Self {
        Self { solo, dual }
    }

    pub fn get(&self, mode: Mode) -> &MatchupMatrix {
        match mode {
            Mode::Solo => &self.solo,
            Mode::Dual => &self.dual,
        }
    }

    fn get_mut(&mut self, mode: Mode) -> &mut MatchupMatrix {
        match mode {
            Mode::Solo => &mut self.solo,
            Mode::Dual => &mut self.dual,
        }
    }

    /// Paint one cell of one mode; diagonal writes are ignored
    pub fn set_cell(&mut self, mode: Mode, row: usize, col: usize, rank: RankId) -> bool {
        self.get_mut(mode).set_cell(row, col, rank)
    }

    /// Replace only `mode`'s matrix with a fresh default one
    pub fn reset(&mut self, mode: Mode, size: usize, default: &RankId) {
        debug!(mode = %mode, size, "Resetting matrix");
        *self.get_mut(mode) = MatchupMatrix::create(size, default);
    }

    /// Rebuild both matrices after a roster change; old cells are dropped
    pub fn resize_for_roster(&mut self, size: usize, default: &RankId) {
        debug!(size, "Rebuilding both matrices for new roster size");
        *self = Self::new(size, default);
    }

    /// Rewrite `old` to `new` in both matrices; returns total cells changed
    pub(crate) fn replace_rank(&mut self, old: &RankId, new: &RankId) -> usize {
        self.solo.replace_rank(old, new) + self.dual.replace_rank(old, new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: i64) -> RankId {
        RankId::Num(n)
    }

    #[test]
    fn test_new_matrices_equal_but_independent() {
        let mut store = ModeStore::new(3, &id(3));
        assert_eq!(store.get(Mode::Solo), store.get(Mode::Dual));

        store.set_cell(Mode::Solo, 0, 1, id(1));
        assert_eq!(store.get(Mode::Solo).get(0, 1), Some(&id(1)));
        assert_eq!(store.get(Mode::Dual).get(0, 1), Some(&id(3)));

        store.set_cell(Mode::Dual, 1, 0, id(5));
        assert_eq!(store.get(Mode::Solo).get(1, 0), Some(&id(3)));
    }

    #[test]
    fn test_reset_only_touches_one_mode() {
        let mut store = ModeStore::new(3, &id(3));
        store.set_cell(Mode::Solo, 0, 2, id(1));
        store.set_cell(Mode::Dual, 0, 2, id(1));

        store.reset(Mode::Solo, 3, &id(3));
        assert_eq!(store.get(Mode::Solo), &MatchupMatrix::create(3, &id(3)));
        assert_eq!(store.get(Mode::Dual).get(0, 2), Some(&id(1)));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut store = ModeStore::new(4, &id(3));
        store.set_cell(Mode::Dual, 3, 1, id(2));
        store.reset(Mode::Dual, 4, &id(3));
        let once = store.clone();
        store.reset(Mode::Dual, 4, &id(3));
        assert_eq!(store, once);
    }

    #[test]
    fn test_resize_for_roster_rebuilds_both() {
        let mut store = ModeStore::new(2, &id(3));
        store.set_cell(Mode::Solo, 0, 1, id(1));
        store.resize_for_roster(5, &id(3));
        assert!(store.get(Mode::Solo).is_square_of(5));
        assert!(store.get(Mode::Dual).is_square_of(5));
        assert_eq!(store.get(Mode::Solo).get(0, 1), Some(&id(3)));
    }

    #[test]
    fn test_replace_rank_spans_both_modes() {
        let mut store = ModeStore::new(2, &id(3));
        store.set_cell(Mode::Solo, 0, 1, id(2));
        store.set_cell(Mode::Dual, 1, 0, id(2));
        assert_eq!(store.replace_rank(&id(2), &id(3)), 2);
    }
}
