//! AC-3 over the slot domains. Every word left in a slot's domain after a successful run has, for
//! each crossing slot, at least one word in that slot's domain agreeing on the shared letter.

use std::collections::{HashSet, VecDeque};

use bit_set::BitSet;

use crate::domains::Domains;
use crate::grid_config::{GridConfig, SlotId};
use crate::word_list::{WordId, WordList};

/// An arc `(x, y)` asks whether every word in `x`'s domain is supported by `y`'s domain.
pub type Arc = (SlotId, SlotId);

/// Data structure used in `ac3` to track which arcs we still need to visit. An arc that is already
/// waiting isn't enqueued a second time.
#[derive(Debug)]
struct ConsistencyQueue {
    queue: VecDeque<Arc>,
    queued: BitSet,
    slot_count: usize,
}

impl ConsistencyQueue {
    fn with_initial_queue<Items>(slot_count: usize, items: Items) -> ConsistencyQueue
    where
        Items: IntoIterator<Item = Arc>,
    {
        let mut queue = ConsistencyQueue {
            queue: VecDeque::new(),
            queued: BitSet::with_capacity(slot_count * slot_count),
            slot_count,
        };
        for arc in items {
            queue.enqueue(arc);
        }
        queue
    }

    fn key(&self, (x, y): Arc) -> usize {
        x * self.slot_count + y
    }

    fn pop_front(&mut self) -> Option<Arc> {
        let arc = self.queue.pop_front()?;
        let key = self.key(arc);
        self.queued.remove(key);
        Some(arc)
    }

    fn enqueue(&mut self, arc: Arc) {
        let key = self.key(arc);
        if self.queued.insert(key) {
            self.queue.push_back(arc);
        }
    }
}

/// Results from a call to `ac3`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArcConsistencySuccess {
    /// How many arcs were examined.
    pub revisions: usize,
    /// How many (slot, word) candidates were removed.
    pub eliminations: usize,
}

/// Returned when some slot's domain was emptied; propagation stops at that point, so other
/// domains may have been partially pruned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcConsistencyFailure {
    pub emptied_slot_id: SlotId,
}

pub type ArcConsistencyResult = Result<ArcConsistencySuccess, ArcConsistencyFailure>;

/// Make `x` arc consistent with `y`: remove every word from `x`'s domain that no word in `y`'s
/// domain agrees with at their crossing. Returns whether anything was removed. Slots that don't
/// cross are left alone.
pub fn revise(
    config: &GridConfig,
    words: &WordList,
    domains: &mut Domains,
    x: SlotId,
    y: SlotId,
) -> bool {
    let Some(overlap) = config.overlap(x, y) else {
        return false;
    };

    let supported_chars: HashSet<char> = domains
        .get(y)
        .iter()
        .map(|word_id| words.word(word_id).chars[overlap.second])
        .collect();

    let unsupported: Vec<WordId> = domains
        .get(x)
        .iter()
        .filter(|&word_id| !supported_chars.contains(&words.word(word_id).chars[overlap.first]))
        .collect();

    for &word_id in &unsupported {
        domains.remove(x, word_id);
    }

    !unsupported.is_empty()
}

/// Run AC-3 starting from `arcs`, or from every ordered pair of distinct slots if `arcs` is
/// `None`. Whenever a slot's domain shrinks, the arcs pointing at it from its other neighbors are
/// revisited. Fails as soon as any revised domain becomes empty.
pub fn ac3(
    config: &GridConfig,
    words: &WordList,
    domains: &mut Domains,
    arcs: Option<&[Arc]>,
) -> ArcConsistencyResult {
    let slot_count = config.slot_count();
    let mut queue = match arcs {
        Some(arcs) => ConsistencyQueue::with_initial_queue(slot_count, arcs.iter().copied()),
        None => ConsistencyQueue::with_initial_queue(slot_count, config.all_arcs()),
    };

    let mut success = ArcConsistencySuccess::default();

    while let Some((x, y)) = queue.pop_front() {
        let before = domains.len(x);
        success.revisions += 1;

        if revise(config, words, domains, x, y) {
            success.eliminations += before - domains.len(x);

            if domains.is_empty(x) {
                return Err(ArcConsistencyFailure { emptied_slot_id: x });
            }

            for &z in config.neighbors(x) {
                if z != y {
                    queue.enqueue((z, x));
                }
            }
        }
    }

    Ok(success)
}
