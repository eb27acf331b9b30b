use std::collections::HashSet;

use crate::grid_config::{GridConfig, SlotId};
use crate::word_list::{WordId, WordList};

/// A struct recording a slot assignment made during the filling process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub slot_id: SlotId,
    pub word_id: WordId,
}

/// A partial or complete mapping from slots to words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    by_slot: Vec<Option<WordId>>,
    assigned_count: usize,
}

impl Assignment {
    /// An assignment with no slots filled.
    pub fn empty(slot_count: usize) -> Assignment {
        Assignment { by_slot: vec![None; slot_count], assigned_count: 0 }
    }

    pub fn get(&self, slot_id: SlotId) -> Option<WordId> {
        self.by_slot[slot_id]
    }

    pub fn is_assigned(&self, slot_id: SlotId) -> bool {
        self.by_slot[slot_id].is_some()
    }

    pub fn assign(&mut self, choice: Choice) {
        if self.by_slot[choice.slot_id].replace(choice.word_id).is_none() {
            self.assigned_count += 1;
        }
    }

    pub fn unassign(&mut self, slot_id: SlotId) -> Option<WordId> {
        let previous = self.by_slot[slot_id].take();
        if previous.is_some() {
            self.assigned_count -= 1;
        }
        previous
    }

    /// Number of slots that have a word.
    pub fn len(&self) -> usize {
        self.assigned_count
    }

    pub fn is_empty(&self) -> bool {
        self.assigned_count == 0
    }

    /// Does every slot have a word?
    pub fn is_complete(&self) -> bool {
        self.assigned_count == self.by_slot.len()
    }

    /// The assigned slots and their words, in slot order.
    pub fn choices(&self) -> impl Iterator<Item = Choice> + '_ {
        self.by_slot
            .iter()
            .enumerate()
            .filter_map(|(slot_id, word_id)| word_id.map(|word_id| Choice { slot_id, word_id }))
    }

    /// Would adding `choice` keep the assignment consistent? The word has to fit the slot's
    /// length and agree with every assigned slot it crosses; with `distinct_words`, it also must
    /// not already be used by another slot. Slots that don't cross `choice.slot_id` are trivially
    /// compatible.
    pub fn is_consistent_with(
        &self,
        config: &GridConfig,
        words: &WordList,
        choice: Choice,
        distinct_words: bool,
    ) -> bool {
        let word = words.word(choice.word_id);
        if word.len() != config.slot(choice.slot_id).length {
            return false;
        }

        self.choices().filter(|other| other.slot_id != choice.slot_id).all(|other| {
            if distinct_words && other.word_id == choice.word_id {
                return false;
            }
            match config.overlap(choice.slot_id, other.slot_id) {
                Some(overlap) => {
                    word.chars[overlap.first] == words.word(other.word_id).chars[overlap.second]
                }
                None => true,
            }
        })
    }

    /// Check every assigned slot against every other one.
    pub fn is_consistent(&self, config: &GridConfig, words: &WordList, distinct_words: bool) -> bool {
        let mut used: HashSet<WordId> = HashSet::with_capacity(self.assigned_count);

        self.choices().all(|choice| {
            let fresh = used.insert(choice.word_id);
            (fresh || !distinct_words)
                && self.is_consistent_with(config, words, choice, false)
        })
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
                GridEntry { loc: (4, 0), len: 3, dir: Direction::Across },
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_assign_and_unassign_track_count() {
        let mut assignment = Assignment::empty(3);
        assert!(assignment.is_empty());

        assignment.assign(Choice { slot_id: 1, word_id: 4 });
        assignment.assign(Choice { slot_id: 1, word_id: 5 });
        assert_eq!(assignment.len(), 1);
        assert_eq!(assignment.get(1), Some(5));

        assert_eq!(assignment.unassign(1), Some(5));
        assert_eq!(assignment.unassign(1), None);
        assert!(assignment.is_empty());
        assert!(!assignment.is_complete());
    }

    #[test]
    fn test_consistency_checks_length_and_crossings() {
        let config = crossing_grid();
        let words = WordList::from_words(["SIX", "SEVEN", "ONE", "TEN", "VEX"]);
        let mut assignment = Assignment::empty(3);

        // Wrong length.
        assert!(!assignment.is_consistent_with(&config, &words, Choice { slot_id: 0, word_id: 1 }, true));

        assignment.assign(Choice { slot_id: 1, word_id: 1 });
        assert!(assignment.is_consistent_with(&config, &words, Choice { slot_id: 0, word_id: 0 }, true));
        assert!(!assignment.is_consistent_with(&config, &words, Choice { slot_id: 0, word_id: 2 }, true));

        // The middle letter of slot 2 shares a cell with the N at the end of SEVEN.
        assert!(assignment.is_consistent_with(&config, &words, Choice { slot_id: 2, word_id: 2 }, true));
        assert!(!assignment.is_consistent_with(&config, &words, Choice { slot_id: 2, word_id: 4 }, true));
    }

    #[test]
    fn test_distinct_words_rule() {
        let config = GridConfig::from_template_str("___\n###\n___\n").unwrap();
        let words = WordList::from_words(["CAT"]);
        let mut assignment = Assignment::empty(2);
        assignment.assign(Choice { slot_id: 0, word_id: 0 });

        let repeat = Choice { slot_id: 1, word_id: 0 };
        assert!(!assignment.is_consistent_with(&config, &words, repeat, true));
        assert!(assignment.is_consistent_with(&config, &words, repeat, false));

        assignment.assign(repeat);
        assert!(!assignment.is_consistent(&config, &words, true));
        assert!(assignment.is_consistent(&config, &words, false));
        assert!(assignment.is_complete());
    }
}
