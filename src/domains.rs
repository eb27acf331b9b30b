//! The mutable part of a fill: which words each slot may still take.

use bit_set::BitSet;

use crate::grid_config::{GridConfig, SlotId};
use crate::word_list::{WordId, WordList};

/// For each slot, the set of word ids that are still candidates. Domains only ever shrink, except
/// when a caller restores a snapshot it took earlier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domains {
    by_slot: Vec<BitSet>,
}

impl Domains {
    /// Give every slot the whole word list.
    pub fn new(config: &GridConfig, words: &WordList) -> Domains {
        let full: BitSet = (0..words.len()).collect();
        Domains { by_slot: vec![full; config.slot_count()] }
    }

    pub fn get(&self, slot_id: SlotId) -> &BitSet {
        &self.by_slot[slot_id]
    }

    pub fn len(&self, slot_id: SlotId) -> usize {
        self.by_slot[slot_id].len()
    }

    pub fn is_empty(&self, slot_id: SlotId) -> bool {
        self.by_slot[slot_id].is_empty()
    }

    pub fn contains(&self, slot_id: SlotId, word_id: WordId) -> bool {
        self.by_slot[slot_id].contains(word_id)
    }

    pub fn remove(&mut self, slot_id: SlotId, word_id: WordId) -> bool {
        self.by_slot[slot_id].remove(word_id)
    }

    /// Narrow a slot to a single word.
    pub fn restrict(&mut self, slot_id: SlotId, word_id: WordId) {
        let domain = &mut self.by_slot[slot_id];
        domain.clear();
        domain.insert(word_id);
    }

    /// The first slot whose domain has no words left, if any.
    pub fn first_empty(&self) -> Option<SlotId> {
        self.by_slot.iter().position(|domain| domain.is_empty())
    }

    /// Total number of (slot, word) candidates across the grid.
    pub fn total_options(&self) -> usize {
        self.by_slot.iter().map(|domain| domain.len()).sum()
    }

    /// Remove from each slot every word whose length differs from the slot's. Returns the number
    /// of words removed. A single pass reaches the fixed point since no other slot is consulted.
    pub fn enforce_node_consistency(&mut self, config: &GridConfig, words: &WordList) -> usize {
        let mut removed = 0;

        for (slot_id, domain) in self.by_slot.iter_mut().enumerate() {
            let length = config.slot(slot_id).length;
            let mismatched: Vec<WordId> =
                domain.iter().filter(|&word_id| words.word(word_id).len() != length).collect();

            for word_id in mismatched {
                domain.remove(word_id);
                removed += 1;
            }
        }

        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid_config::{Direction, GridEntry};

    fn crossing_grid() -> GridConfig {
        GridConfig::from_entries(
            5,
            5,
            &[
                GridEntry { loc: (0, 1), len: 3, dir: Direction::Across },
                GridEntry { loc: (0, 1), len: 5, dir: Direction::Down },
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_new_domains_hold_every_word() {
        let config = crossing_grid();
        let words = WordList::from_words(["SIX", "SEVEN", "ONE"]);
        let domains = Domains::new(&config, &words);

        assert_eq!(domains.len(0), 3);
        assert_eq!(domains.len(1), 3);
        assert_eq!(domains.total_options(), 6);
    }

    #[test]
    fn test_node_consistency_filters_by_length() {
        let config = crossing_grid();
        let words = WordList::from_words(["SIX", "SEVEN", "ONE"]);
        let mut domains = Domains::new(&config, &words);

        assert_eq!(domains.enforce_node_consistency(&config, &words), 3);

        assert_eq!(domains.get(0).iter().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(domains.get(1).iter().collect::<Vec<_>>(), vec![1]);
        assert_eq!(domains.first_empty(), None);
    }

    #[test]
    fn test_node_consistency_is_idempotent() {
        let config = crossing_grid();
        let words = WordList::from_words(["SIX", "SEVEN", "ONE", "FIVE", "EIGHT"]);
        let mut domains = Domains::new(&config, &words);

        domains.enforce_node_consistency(&config, &words);
        let once = domains.clone();
        let removed_again = domains.enforce_node_consistency(&config, &words);

        assert_eq!(removed_again, 0);
        assert_eq!(domains, once);
    }

    #[test]
    fn test_missing_length_leaves_empty_domain() {
        let config = crossing_grid();
        let words = WordList::from_words(["SIX", "FIVE"]);
        let mut domains = Domains::new(&config, &words);

        domains.enforce_node_consistency(&config, &words);

        assert_eq!(domains.first_empty(), Some(1));
        assert!(domains.is_empty(1));
    }

    #[test]
    fn test_restrict_leaves_one_word() {
        let config = crossing_grid();
        let words = WordList::from_words(["SIX", "TEN", "ONE"]);
        let mut domains = Domains::new(&config, &words);

        domains.restrict(0, 2);

        assert_eq!(domains.len(0), 1);
        assert!(domains.contains(0, 2));
        assert!(!domains.contains(0, 0));
    }
}
