//! The rank currently armed for painting

use tracing::debug;

use crate::constants::ranks::MAX_RANKS;
use crate::registry::RankRegistry;
use crate::types::RankId;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    current: Option<RankId>,
}

impl Selection {
    /// First rank of the registry, or nothing
    pub fn first_of(registry: &RankRegistry) -> Self {
        Self {
            current: registry.first().map(|rank| rank.id.clone()),
        }
    }

    pub fn current(&self) -> Option<&RankId> {
        self.current.as_ref()
    }

    pub fn is_selected(&self, id: &RankId) -> bool {
        self.current.as_ref() == Some(id)
    }

    /// Arm `id`; callers only offer ids from the registry
    pub fn select(&mut self, id: RankId) {
        debug!(rank = %id, "Selected rank");
        self.current = Some(id);
    }

    /// Select by 1-based legend position (digit hotkeys)
    ///
    /// Returns whether the selection changed to a rank at that position.
    pub fn select_position(&mut self, position: usize, registry: &RankRegistry) -> bool {
        if position == 0 || position > MAX_RANKS {
            return false;
        }
        match registry.at_position(position - 1) {
            Some(rank) => {
                self.select(rank.id.clone());
                true
            }
            None => false,
        }
    }

    /// Re-point a dangling or empty selection at the first rank
    pub fn repair(&mut self, registry: &RankRegistry) {
        let valid = self
            .current
            .as_ref()
            .is_some_and(|id| registry.by_id(id).is_some());
        if !valid {
            *self = Self::first_of(registry);
            debug!(selected = ?self.current, "Repaired selection");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RankDraft;

    fn registry_with(names: &[&str]) -> RankRegistry {
        let mut registry = RankRegistry::from_ranks(Vec::new());
        for name in names {
            registry.add(RankDraft {
                name: name.to_string(),
                ..RankDraft::default()
            });
        }
        registry
    }

    #[test]
    fn test_first_of_empty_is_none() {
        let registry = registry_with(&[]);
        assert_eq!(Selection::first_of(&registry).current(), None);
    }

    #[test]
    fn test_select_position_maps_one_based() {
        let registry = registry_with(&["A", "B", "C"]);
        let mut selection = Selection::first_of(&registry);
        assert!(selection.select_position(3, &registry));
        assert_eq!(selection.current(), Some(&registry.list()[2].id));
    }

    #[test]
    fn test_select_position_out_of_range_ignored() {
        let registry = registry_with(&["A", "B"]);
        let mut selection = Selection::first_of(&registry);
        let before = selection.clone();
        assert!(!selection.select_position(0, &registry));
        assert!(!selection.select_position(3, &registry));
        assert!(!selection.select_position(10, &registry));
        assert_eq!(selection, before);
    }

    #[test]
    fn test_repair_dangling_selection() {
        let registry = registry_with(&["A", "B"]);
        let mut selection = Selection::default();
        selection.select(RankId::from("gone"));
        selection.repair(&registry);
        assert_eq!(selection.current(), Some(&registry.list()[0].id));
    }

    #[test]
    fn test_repair_keeps_valid_selection() {
        let registry = registry_with(&["A", "B"]);
        let mut selection = Selection::default();
        selection.select(registry.list()[1].id.clone());
        selection.repair(&registry);
        assert!(selection.is_selected(&registry.list()[1].id));
    }

    #[test]
    fn test_repair_empty_registry_clears() {
        let registry = registry_with(&[]);
        let mut selection = Selection::default();
        selection.select(RankId::Num(1));
        selection.repair(&registry);
        assert_eq!(selection.current(), None);
    }
}
