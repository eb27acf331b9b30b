//! Depth-first search over partial assignments. Instead of recursing, the search keeps an explicit
//! stack of frames, one per filled slot, each remembering which of its candidate words to try
//! next.

use instant::{Duration, Instant};
use tracing::trace;

use crate::arc_consistency::{ac3, Arc};
use crate::assignment::{Assignment, Choice};
use crate::domains::Domains;
use crate::error::FillError;
use crate::grid_config::{GridConfig, SlotId};
use crate::ordering::OrderingStrategy;
use crate::word_list::{WordId, WordList};

/// A struct tracking statistics about the filling process.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    /// Slots selected for filling, including ones we later backed out of.
    pub states: u64,
    pub backtracks: u64,
    /// Candidate words rejected because they conflicted with the assignment or, when maintaining
    /// arc consistency, because they wiped out another slot's domain.
    pub rejections: u64,
    pub initial_arc_consistency_time: Duration,
    pub choice_arc_consistency_time: Duration,
    pub duration: Duration,
}

/// The search state for one slot on the stack.
#[derive(Debug)]
struct Frame {
    slot_id: SlotId,
    candidates: Vec<WordId>,
    next_candidate: usize,

    /// Domains as they were before the current candidate was propagated, when maintaining arc
    /// consistency.
    saved_domains: Option<Domains>,
}

/// Knobs for a single search.
#[derive(Debug, Clone, Copy)]
pub struct SearchSettings {
    pub distinct_words: bool,
    pub maintain_arc_consistency: bool,
    pub max_states: Option<u64>,
}

pub struct BacktrackingSearch<'a, O: OrderingStrategy> {
    config: &'a GridConfig,
    words: &'a WordList,
    domains: Domains,
    ordering: O,
    settings: SearchSettings,
    statistics: Statistics,
}

impl<'a, O: OrderingStrategy> BacktrackingSearch<'a, O> {
    /// Set up a search over `domains`, which should already be node and arc consistent.
    pub fn new(
        config: &'a GridConfig,
        words: &'a WordList,
        domains: Domains,
        ordering: O,
        settings: SearchSettings,
    ) -> BacktrackingSearch<'a, O> {
        BacktrackingSearch {
            config,
            words,
            domains,
            ordering,
            settings,
            statistics: Statistics::default(),
        }
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Search from the empty assignment. Returns the first complete, consistent assignment found,
    /// or `None` once every branch has been exhausted.
    pub fn run(&mut self) -> Result<Option<Assignment>, FillError> {
        let start = Instant::now();
        let result = self.search();
        self.statistics.duration += start.elapsed();
        result
    }

    fn search(&mut self) -> Result<Option<Assignment>, FillError> {
        let mut assignment = Assignment::empty(self.config.slot_count());
        let mut stack: Vec<Frame> = Vec::with_capacity(self.config.slot_count());

        // Choose whichever slot the ordering prefers until all slots are filled.
        'slot_selection: while let Some(slot_id) =
            self.ordering.select_unassigned_slot(self.config, &self.domains, &assignment)
        {
            if let Some(limit) = self.settings.max_states {
                if self.statistics.states >= limit {
                    return Err(FillError::StateLimitExceeded {
                        states: self.statistics.states,
                        limit,
                    });
                }
            }
            self.statistics.states += 1;

            let candidates = self.ordering.order_domain_values(
                self.config,
                self.words,
                &self.domains,
                slot_id,
                &assignment,
            );
            trace!(slot_id, depth = stack.len(), candidates = candidates.len(), "selected slot");

            stack.push(Frame {
                slot_id,
                candidates,
                next_candidate: 0,
                saved_domains: None,
            });

            // Find the next usable candidate for the frame on top of the stack, popping frames
            // whose candidates are exhausted.
            while let Some(frame) = stack.last_mut() {
                if assignment.unassign(frame.slot_id).is_some() {
                    if let Some(saved_domains) = frame.saved_domains.take() {
                        self.domains = saved_domains;
                    }
                }

                while let Some(&word_id) = frame.candidates.get(frame.next_candidate) {
                    frame.next_candidate += 1;
                    let choice = Choice { slot_id: frame.slot_id, word_id };

                    if !assignment.is_consistent_with(
                        self.config,
                        self.words,
                        choice,
                        self.settings.distinct_words,
                    ) {
                        self.statistics.rejections += 1;
                        continue;
                    }

                    if self.settings.maintain_arc_consistency {
                        let saved_domains = self.domains.clone();
                        if !self.propagate_choice(choice, &assignment) {
                            self.domains = saved_domains;
                            self.statistics.rejections += 1;
                            continue;
                        }
                        frame.saved_domains = Some(saved_domains);
                    }

                    assignment.assign(choice);
                    continue 'slot_selection;
                }

                stack.pop();
                self.statistics.backtracks += 1;
                trace!(depth = stack.len(), "backtracking");
            }

            return Ok(None);
        }

        Ok(Some(assignment))
    }

    /// Narrow the chosen slot to its word and re-establish arc consistency for the slots that
    /// cross it. Returns false if that empties some domain.
    fn propagate_choice(&mut self, choice: Choice, assignment: &Assignment) -> bool {
        let start = Instant::now();

        self.domains.restrict(choice.slot_id, choice.word_id);
        let arcs: Vec<Arc> = self
            .config
            .neighbors(choice.slot_id)
            .iter()
            .filter(|&&neighbor| !assignment.is_assigned(neighbor))
            .map(|&neighbor| (neighbor, choice.slot_id))
            .collect();
        let result = ac3(self.config, self.words, &mut self.domains, Some(&arcs));

        self.statistics.choice_arc_consistency_time += start.elapsed();
        result.is_ok()
    }
}
