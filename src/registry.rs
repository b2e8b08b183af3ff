//! Ordered list of rank definitions with session-unique ids
//!
//! Removal is crate-private: deleting a rank must also rewrite the matrices,
//! which only [`crate::state::AppState::delete_rank`] does.

use tracing::{debug, warn};

use crate::constants::ranks::DEFAULT_RANK_ID;
use crate::types::{Rank, RankDraft, RankId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankRegistry {
    ranks: Vec<Rank>,
    /// Next numeric id to try; grows until it would overflow, then restarts at 1
    next_id: i64,
}

impl RankRegistry {
    /// Build from an existing list; the id counter starts above every numeric id present
    pub fn from_ranks(ranks: Vec<Rank>) -> Self {
        let next_id = ranks
            .iter()
            .filter_map(|rank| rank.id.as_num())
            .max()
            .map_or(1, |max| max.checked_add(1).unwrap_or(1).max(1));
        Self { ranks, next_id }
    }

    pub fn list(&self) -> &[Rank] {
        &self.ranks
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn by_id(&self, id: &RankId) -> Option<&Rank> {
        self.ranks.iter().find(|rank| rank.id == *id)
    }

    pub fn position(&self, id: &RankId) -> Option<usize> {
        self.ranks.iter().position(|rank| rank.id == *id)
    }

    pub fn at_position(&self, index: usize) -> Option<&Rank> {
        self.ranks.get(index)
    }

    pub fn first(&self) -> Option<&Rank> {
        self.ranks.first()
    }

    /// Append a new rank with a fresh id
    ///
    /// The cap on concurrent ranks is the caller's concern.
    pub fn add(&mut self, draft: RankDraft) -> Rank {
        let id = self.allocate_id();
        let rank = draft.into_rank(id);
        debug!(rank = %rank.id, name = %rank.name, "Added rank");
        self.ranks.push(rank.clone());
        rank
    }

    /// Replace the entry with the same id; returns the previous definition
    pub fn update(&mut self, rank: Rank) -> Option<Rank> {
        match self.ranks.iter_mut().find(|existing| existing.id == rank.id) {
            Some(existing) => {
                debug!(rank = %rank.id, name = %rank.name, "Updated rank");
                Some(std::mem::replace(existing, rank))
            }
            None => {
                warn!(rank = %rank.id, "Update for unknown rank ignored");
                None
            }
        }
    }

    pub(crate) fn remove(&mut self, id: &RankId) -> Option<Rank> {
        let index = self.position(id)?;
        Some(self.ranks.remove(index))
    }

    /// Never hands out the fallback id, which unpainted cells already hold
    ///
    /// Terminates because the registry is finite: after a wrap the search walks
    /// up from 1 and hits a free id within `len() + 2` steps.
    fn allocate_id(&mut self) -> RankId {
        loop {
            let value = self.next_id;
            self.next_id = value.checked_add(1).unwrap_or(1);
            if value == DEFAULT_RANK_ID {
                continue;
            }
            let candidate = RankId::Num(value);
            if self.by_id(&candidate).is_none() {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> RankDraft {
        RankDraft {
            name: name.to_string(),
            description: String::new(),
            color_tag: "bg-green-600".to_string(),
            selected_color_tag: "bg-green-600/30".to_string(),
        }
    }

    fn rank(id: RankId, name: &str) -> Rank {
        draft(name).into_rank(id)
    }

    #[test]
    fn test_add_appends_with_unique_ids() {
        let mut registry = RankRegistry::from_ranks(Vec::new());
        let a = registry.add(draft("A"));
        let b = registry.add(draft("B"));
        assert_ne!(a.id, b.id);
        assert_eq!(registry.list().iter().map(|r| r.name.as_str()).collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn test_counter_starts_above_existing_numeric_ids() {
        let mut registry = RankRegistry::from_ranks(vec![
            rank(RankId::Num(7), "Seven"),
            rank(RankId::from("1712345678901"), "Legacy"),
        ]);
        assert_eq!(registry.add(draft("New")).id, RankId::Num(8));
    }

    #[test]
    fn test_fallback_id_is_skipped() {
        let mut registry = RankRegistry::from_ranks(vec![rank(RankId::Num(1), "One")]);
        assert_eq!(registry.add(draft("A")).id, RankId::Num(2));
        assert_eq!(registry.add(draft("B")).id, RankId::Num(4));
    }

    #[test]
    fn test_max_id_wraps_to_free_low_id() {
        let mut registry = RankRegistry::from_ranks(vec![
            rank(RankId::Num(i64::MAX), "Max"),
            rank(RankId::Num(1), "One"),
        ]);
        assert_eq!(registry.add(draft("A")).id, RankId::Num(2));
        assert_eq!(registry.add(draft("B")).id, RankId::Num(4));
    }

    #[test]
    fn test_counter_at_max_does_not_stall() {
        let mut registry = RankRegistry::from_ranks(vec![rank(RankId::Num(i64::MAX - 1), "Near")]);
        assert_eq!(registry.add(draft("A")).id, RankId::Num(i64::MAX));
        assert_eq!(registry.add(draft("B")).id, RankId::Num(1));
    }

    #[test]
    fn test_ids_never_reused_after_remove() {
        let mut registry = RankRegistry::from_ranks(Vec::new());
        let a = registry.add(draft("A"));
        registry.remove(&a.id);
        let b = registry.add(draft("B"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_update_replaces_matching_entry() {
        let mut registry = RankRegistry::from_ranks(vec![rank(RankId::Num(1), "Old")]);
        let previous = registry.update(rank(RankId::Num(1), "New"));
        assert_eq!(previous.map(|r| r.name), Some("Old".to_string()));
        assert_eq!(registry.by_id(&RankId::Num(1)).map(|r| r.name.as_str()), Some("New"));
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut registry = RankRegistry::from_ranks(vec![rank(RankId::Num(1), "Only")]);
        let before = registry.clone();
        assert!(registry.update(rank(RankId::Num(2), "Ghost")).is_none());
        assert_eq!(registry, before);
    }

    #[test]
    fn test_remove_and_positions() {
        let mut registry = RankRegistry::from_ranks(vec![
            rank(RankId::Num(1), "A"),
            rank(RankId::Num(2), "B"),
            rank(RankId::Num(3), "C"),
        ]);
        assert_eq!(registry.position(&RankId::Num(3)), Some(2));
        let removed = registry.remove(&RankId::Num(2));
        assert_eq!(removed.map(|r| r.name), Some("B".to_string()));
        assert_eq!(registry.at_position(1).map(|r| r.name.as_str()), Some("C"));
        assert!(registry.remove(&RankId::Num(2)).is_none());
    }
}
