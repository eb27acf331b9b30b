//! Variable and value ordering for the backtracking search.

use crate::assignment::Assignment;
use crate::domains::Domains;
use crate::grid_config::{GridConfig, SlotId};
use crate::word_list::{WordId, WordList};

/// The decisions the search delegates: which slot to fill next, and in which order to try its
/// words. Implementations may keep their own bookkeeping between calls as long as answers depend
/// only on the arguments.
pub trait OrderingStrategy {
    fn select_unassigned_slot(
        &mut self,
        config: &GridConfig,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Option<SlotId>;

    fn order_domain_values(
        &mut self,
        config: &GridConfig,
        words: &WordList,
        domains: &Domains,
        slot_id: SlotId,
        assignment: &Assignment,
    ) -> Vec<WordId>;
}

/// Minimum-remaining-values with a degree tie-break for slots, least-constraining-value for
/// words. Everything is recomputed from the current domains on each call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecomputingOrdering;

/// How many of the slot's neighbors are still unassigned.
fn unassigned_degree(config: &GridConfig, slot_id: SlotId, assignment: &Assignment) -> usize {
    config
        .neighbors(slot_id)
        .iter()
        .filter(|&&neighbor| !assignment.is_assigned(neighbor))
        .count()
}

impl OrderingStrategy for RecomputingOrdering {
    /// Fewest remaining words first; among those, the most unassigned neighbors; among those, the
    /// lowest slot id.
    fn select_unassigned_slot(
        &mut self,
        config: &GridConfig,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Option<SlotId> {
        (0..config.slot_count())
            .filter(|&slot_id| !assignment.is_assigned(slot_id))
            .min_by_key(|&slot_id| {
                (
                    domains.len(slot_id),
                    std::cmp::Reverse(unassigned_degree(config, slot_id, assignment)),
                )
            })
    }

    /// Every word in the slot's domain, sorted by how many words it would rule out of the domains
    /// of unassigned crossing slots. Ties keep word id order.
    fn order_domain_values(
        &mut self,
        config: &GridConfig,
        words: &WordList,
        domains: &Domains,
        slot_id: SlotId,
        assignment: &Assignment,
    ) -> Vec<WordId> {
        let mut ranked: Vec<(usize, WordId)> =
            domains.get(slot_id).iter().map(|word_id| (0, word_id)).collect();

        for &neighbor in config.neighbors(slot_id) {
            if assignment.is_assigned(neighbor) {
                continue;
            }
            let Some(overlap) = config.overlap(slot_id, neighbor) else {
                continue;
            };

            let neighbor_chars: Vec<char> = domains
                .get(neighbor)
                .iter()
                .map(|word_id| words.word(word_id).chars[overlap.second])
                .collect();

            for (eliminated, word_id) in ranked.iter_mut() {
                let own_char = words.word(*word_id).chars[overlap.first];
                *eliminated += neighbor_chars.iter().filter(|&&c| c != own_char).count();
            }
        }

        ranked.sort_by_key(|&(eliminated, _)| eliminated);
        ranked.into_iter().map(|(_, word_id)| word_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::Choice;
    use crate::grid_config::{Direction, GridEntry};

    /// Slot 0 (across, 3) crosses slot 1 (down, 3) at its first letter and slot 2 (down, 3) at
    /// its last letter. Slot 3 (across, 2) is on its own.
    fn comb_grid() -> GridConfig {
        GridConfig::from_entries(
            5,
            5,
            &[
                GridEntry { loc: (0, 0), len: 3, dir: Direction::Across },
                GridEntry { loc: (0, 0), len: 3, dir: Direction::Down },
                GridEntry { loc: (0, 2), len: 3, dir: Direction::Down },
                GridEntry { loc: (4, 3), len: 2, dir: Direction::Across },
            ],
        )
        .unwrap()
    }

    fn node_consistent(config: &GridConfig, words: &WordList) -> Domains {
        let mut domains = Domains::new(config, words);
        domains.enforce_node_consistency(config, words);
        domains
    }

    #[test]
    fn test_fewest_remaining_values_wins() {
        let config = comb_grid();
        let words = WordList::from_words(["CAT", "DOG", "OX"]);
        let domains = node_consistent(&config, &words);
        let assignment = Assignment::empty(4);

        let selected = RecomputingOrdering.select_unassigned_slot(&config, &domains, &assignment);

        assert_eq!(selected, Some(3));
    }

    #[test]
    fn test_degree_breaks_ties() {
        let config = comb_grid();
        let words = WordList::from_words(["CAT", "DOG", "OX", "AX"]);
        let domains = node_consistent(&config, &words);
        let mut assignment = Assignment::empty(4);

        // All 3-letter slots have two words; slot 0 crosses two unassigned slots.
        let mut ordering = RecomputingOrdering;
        assert_eq!(ordering.select_unassigned_slot(&config, &domains, &assignment), Some(0));

        // Once slot 0 is filled, slots 1, 2 and 3 tie on both keys and the lowest id wins.
        assignment.assign(Choice { slot_id: 0, word_id: 0 });
        assert_eq!(ordering.select_unassigned_slot(&config, &domains, &assignment), Some(1));
    }

    #[test]
    fn test_complete_assignment_has_no_slot_left() {
        let config = GridConfig::from_template_str("__\n").unwrap();
        let words = WordList::from_words(["OX"]);
        let domains = node_consistent(&config, &words);
        let mut assignment = Assignment::empty(1);
        assignment.assign(Choice { slot_id: 0, word_id: 0 });

        assert_eq!(RecomputingOrdering.select_unassigned_slot(&config, &domains, &assignment), None);
    }

    #[test]
    fn test_least_constraining_value_first() {
        let config = comb_grid();
        let words = WordList::from_words(["TAX", "CAT", "COD", "TOE", "XIS"]);
        let domains = node_consistent(&config, &words);
        let assignment = Assignment::empty(4);

        let ordered = RecomputingOrdering.order_domain_values(&config, &words, &domains, 0, &assignment);

        // Eliminations from slot 1 (first letters) plus slot 2 (first letters):
        // TAX: T vs {T,C,C,T,X} -> 3, X vs {T,C,C,T,X} -> 4, total 7.
        // CAT: 3 + 3 = 6. COD: 3 + 5 = 8. TOE: 3 + 5 = 8. XIS: 4 + 5 = 9.
        let ordered: Vec<&str> = ordered.iter().map(|&id| words.word(id).string.as_str()).collect();
        assert_eq!(ordered, vec!["CAT", "TAX", "COD", "TOE", "XIS"]);
    }

    #[test]
    fn test_words_with_no_eliminations_are_kept() {
        let config = comb_grid();
        let words = WordList::from_words(["OX", "AX", "CAT"]);
        let domains = node_consistent(&config, &words);
        let assignment = Assignment::empty(4);

        // Slot 3 has no neighbors, so nothing is ever eliminated.
        let ordered = RecomputingOrdering.order_domain_values(&config, &words, &domains, 3, &assignment);

        assert_eq!(ordered, vec![0, 1]);
    }

    #[test]
    fn test_word_with_no_eliminations_sorts_first() {
        let config = comb_grid();
        let words = WordList::from_words(["ACE", "ADD", "ABA", "OX"]);
        let domains = node_consistent(&config, &words);
        let assignment = Assignment::empty(4);

        // Every 3-letter word starts with A, so ABA keeps all of both crossing domains while ACE
        // and ADD each rule out three words of slot 2.
        let ordered = RecomputingOrdering.order_domain_values(&config, &words, &domains, 0, &assignment);

        assert_eq!(ordered, vec![2, 0, 1]);
    }

    #[test]
    fn test_assigned_neighbors_are_ignored() {
        let config = comb_grid();
        let words = WordList::from_words(["TAX", "CAT", "COD", "TOE", "XIS"]);
        let domains = node_consistent(&config, &words);
        let mut assignment = Assignment::empty(4);
        assignment.assign(Choice { slot_id: 1, word_id: 1 });
        assignment.assign(Choice { slot_id: 2, word_id: 4 });

        let ordered = RecomputingOrdering.order_domain_values(&config, &words, &domains, 0, &assignment);

        assert_eq!(ordered, vec![0, 1, 2, 3, 4]);
    }
}
