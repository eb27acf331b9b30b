//! Crossword filling as a constraint satisfaction problem.
//!
//! Each slot of the grid is a variable whose domain starts as the whole word list. Domains are
//! pruned to the slot's length (node consistency), then to words supported by every crossing slot
//! (AC-3), and a backtracking search picks one word per slot, filling the most constrained slot
//! first and trying the least constraining words first.
//!
//! ```
//! use fillcsp::{solve, GridConfig, WordList};
//!
//! let config = GridConfig::from_template_str("
//! ___
//! _##
//! _##
//! ").unwrap();
//! let words = WordList::from_words(["SIX", "SEA", "TEN"]);
//!
//! let solution = solve(&config, &words).unwrap().assignment.unwrap();
//! assert_eq!(solution.word_for(0), "SIX");
//! assert_eq!(solution.word_for(1), "SEA");
//! ```

use tracing::{debug, info};

pub mod arc_consistency;
pub mod assignment;
pub mod backtracking_search;
pub mod config;
pub mod domains;
pub mod error;
pub mod grid_config;
pub mod ordering;
pub mod render;
pub mod word_list;

pub use crate::assignment::{Assignment, Choice};
pub use crate::backtracking_search::Statistics;
pub use crate::config::{ConfigError, SolverConfig};
pub use crate::domains::Domains;
pub use crate::error::{FillError, ParseError};
pub use crate::grid_config::{Direction, GridConfig, GridEntry, Overlap, SlotConfig, SlotId};
pub use crate::ordering::{OrderingStrategy, RecomputingOrdering};
pub use crate::word_list::{Word, WordId, WordList};

use crate::arc_consistency::ac3;
use crate::backtracking_search::BacktrackingSearch;

/// The expected maximum number of slots appearing in a grid.
pub const MAX_SLOT_COUNT: usize = 256;

/// The expected maximum length for a single slot.
pub const MAX_SLOT_LENGTH: usize = 21;

/// A complete, consistent fill: one word per slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    choices: Vec<Choice>,
    words_by_slot: Vec<String>,
}

impl Solution {
    fn new(assignment: &Assignment, words: &WordList) -> Solution {
        let choices: Vec<Choice> = assignment.choices().collect();
        let words_by_slot =
            choices.iter().map(|choice| words.word(choice.word_id).string.clone()).collect();
        Solution { choices, words_by_slot }
    }

    /// The word chosen for a slot.
    pub fn word_for(&self, slot_id: SlotId) -> &str {
        &self.words_by_slot[slot_id]
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Slots and their words, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &str)> {
        self.words_by_slot.iter().map(String::as_str).enumerate()
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

/// The outcome of a fill attempt that ran to completion. `assignment` is `None` when no fill
/// exists.
#[derive(Debug, Clone)]
pub struct FillResult {
    pub assignment: Option<Solution>,
    pub statistics: Statistics,
}

impl FillResult {
    fn no_solution(statistics: Statistics) -> FillResult {
        FillResult { assignment: None, statistics }
    }
}

/// Search for a valid fill for the given grid with the default configuration.
pub fn solve(config: &GridConfig, words: &WordList) -> Result<FillResult, FillError> {
    solve_with_config(config, words, &SolverConfig::default())
}

/// Enforce node and arc consistency, then run the backtracking search.
pub fn solve_with_config(
    config: &GridConfig,
    words: &WordList,
    solver_config: &SolverConfig,
) -> Result<FillResult, FillError> {
    solve_with_ordering(config, words, solver_config, RecomputingOrdering)
}

/// Like `solve_with_config`, with a caller-provided slot and word ordering.
pub fn solve_with_ordering<O: OrderingStrategy>(
    config: &GridConfig,
    words: &WordList,
    solver_config: &SolverConfig,
    ordering: O,
) -> Result<FillResult, FillError> {
    let start = instant::Instant::now();
    let mut statistics = Statistics::default();

    info!(
        event = "solve_start",
        slots = config.slot_count(),
        words = words.len(),
        distinct_words = solver_config.distinct_words,
        maintain_arc_consistency = solver_config.maintain_arc_consistency,
    );

    let mut domains = Domains::new(config, words);
    let removed = domains.enforce_node_consistency(config, words);
    debug!(removed, remaining = domains.total_options(), "node consistency enforced");

    if let Some(slot_id) = domains.first_empty() {
        info!(event = "solve_end", slot_id, "no word has the length of slot");
        statistics.duration = start.elapsed();
        return Ok(FillResult::no_solution(statistics));
    }

    let arc_consistency_start = instant::Instant::now();
    let arc_consistency_result = ac3(config, words, &mut domains, None);
    statistics.initial_arc_consistency_time = arc_consistency_start.elapsed();

    match arc_consistency_result {
        Ok(success) => debug!(
            revisions = success.revisions,
            eliminations = success.eliminations,
            remaining = domains.total_options(),
            "arc consistency established"
        ),
        Err(failure) => {
            info!(
                event = "solve_end",
                slot_id = failure.emptied_slot_id,
                "arc consistency emptied slot"
            );
            statistics.duration = start.elapsed();
            return Ok(FillResult::no_solution(statistics));
        }
    }

    let mut search = BacktrackingSearch::new(
        config,
        words,
        domains,
        ordering,
        solver_config.search_settings(),
    );
    let assignment = search.run()?;

    let search_statistics = search.statistics();
    statistics.states = search_statistics.states;
    statistics.backtracks = search_statistics.backtracks;
    statistics.rejections = search_statistics.rejections;
    statistics.choice_arc_consistency_time = search_statistics.choice_arc_consistency_time;
    statistics.duration = start.elapsed();

    info!(
        event = "solve_end",
        solved = assignment.is_some(),
        states = statistics.states,
        backtracks = statistics.backtracks,
        duration_ms = statistics.duration.as_millis() as u64,
    );

    Ok(FillResult {
        assignment: assignment.map(|assignment| Solution::new(&assignment, words)),
        statistics,
    })
}
