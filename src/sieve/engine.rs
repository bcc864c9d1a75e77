//! Resumable sieve step engine
//!
//! [`StepEngine`] decomposes the Sieve of Eratosthenes into a forward-only
//! sequence of [`Action`]s.  Actions are produced one at a time from a small
//! cursor, never materialized as a list, and each one performs a single
//! visualizable mutation when applied:
//!
//! ```text
//! DeclareBase(2) → Mark(2, 4) → Mark(2, 6) → … → DeclareBase(3) → Mark(3, 9) → … → LoopFinished
//! ```
//!
//! The engine reads the [`CellTable`] when choosing the next base prime, so
//! each action must be applied before the next one is requested.  Sweeping
//! the remaining Unknown cells to Prime is not part of the sequence; see
//! [`CellTable::finalize`].

use super::table::CellTable;

/// Transient highlight for the step in progress (0 = none)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Highlight {
    /// Base prime currently sieving
    pub current_p: usize,
    /// Multiple currently being marked
    pub current_k: usize,
}

impl Highlight {
    pub fn clear(&mut self) {
        *self = Highlight::default();
    }
}

/// One atomic, replayable mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Declare `p` a base prime and start sweeping its multiples
    DeclareBase { p: usize },
    /// Mark multiple `k` of base `p` composite
    MarkComposite { p: usize, k: usize },
    /// The main loop bound `p² > N` was reached
    LoopFinished,
}

impl Action {
    /// Apply this action to the table and highlight.
    ///
    /// Returns whether the table changed.  Replaying an action against the
    /// table it already mutated changes nothing.
    pub fn apply(&self, table: &mut CellTable, highlight: &mut Highlight) -> bool {
        match *self {
            Action::DeclareBase { p } => {
                highlight.current_p = p;
                highlight.current_k = 0;
                table.set_prime(p)
            }
            Action::MarkComposite { p, k } => {
                highlight.current_p = p;
                highlight.current_k = k;
                table.set_composite(k, p)
            }
            Action::LoopFinished => {
                highlight.clear();
                false
            }
        }
    }

    /// Status line describing this action, read after it has been applied
    pub fn describe(&self, table: &CellTable) -> String {
        match *self {
            Action::DeclareBase { p } => {
                format!("Base p = {p}. Marking multiples from {p}² = {}.", p * p)
            }
            Action::MarkComposite { p, k } => {
                let by = if table.marked_by(k) == p {
                    format!(" (by {p})")
                } else {
                    String::new()
                };
                format!("p = {p} → mark {k} as composite{by}")
            }
            Action::LoopFinished => "Sieve loop finished (p² > N). Finalizing primes...".to_string(),
        }
    }

    /// The base prime this action belongs to, if any
    pub fn base(&self) -> Option<usize> {
        match *self {
            Action::DeclareBase { p } | Action::MarkComposite { p, .. } => Some(p),
            Action::LoopFinished => None,
        }
    }
}

/// Progress through the sieve loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// Looking for the next base prime, starting at `p`
    Scan { p: usize },
    /// Marking multiples of `p`; `k` is the next multiple to emit
    Marking { p: usize, k: usize },
    /// Every action has been produced
    Exhausted,
}

/// Forward-only producer of sieve actions for a single table
#[derive(Debug, Clone)]
pub struct StepEngine {
    limit: usize,
    cursor: Cursor,
    emitted: usize,
}

impl StepEngine {
    /// Create an engine for a table of limit `N`
    pub fn new(limit: usize) -> Self {
        StepEngine {
            limit,
            cursor: Cursor::Scan { p: 2 },
            emitted: 0,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor == Cursor::Exhausted
    }

    /// Number of actions produced so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Produce the next action, or `None` once the sequence is exhausted.
    ///
    /// `table` must be the table every previously produced action was applied to.
    pub fn next_action(&mut self, table: &CellTable) -> Option<Action> {
        debug_assert_eq!(table.limit(), self.limit, "engine bound to a different table");

        let action = loop {
            match self.cursor {
                Cursor::Exhausted => return None,
                Cursor::Scan { mut p } => {
                    if !self.within_bound(p) {
                        self.cursor = Cursor::Exhausted;
                        break Action::LoopFinished;
                    }
                    while p <= self.limit && table.is_composite(p) {
                        p += 1;
                    }
                    if !self.within_bound(p) {
                        self.cursor = Cursor::Exhausted;
                        break Action::LoopFinished;
                    }
                    self.cursor = Cursor::Marking { p, k: p * p };
                    break Action::DeclareBase { p };
                }
                Cursor::Marking { p, k } => {
                    if k <= self.limit {
                        self.cursor = Cursor::Marking { p, k: k + p };
                        break Action::MarkComposite { p, k };
                    }
                    self.cursor = Cursor::Scan { p: p + 1 };
                }
            }
        };

        self.emitted += 1;
        Some(action)
    }

    /// Whether `p² ≤ N`
    fn within_bound(&self, p: usize) -> bool {
        p.checked_mul(p).is_some_and(|sq| sq <= self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(limit: usize) -> (Vec<Action>, CellTable) {
        let mut table = CellTable::new(limit);
        let mut highlight = Highlight::default();
        let mut engine = StepEngine::new(limit);
        let mut actions = Vec::new();
        while let Some(action) = engine.next_action(&table) {
            action.apply(&mut table, &mut highlight);
            actions.push(action);
        }
        (actions, table)
    }

    #[test]
    fn test_sequence_for_ten() {
        let (actions, _) = drain(10);
        assert_eq!(
            actions,
            vec![
                Action::DeclareBase { p: 2 },
                Action::MarkComposite { p: 2, k: 4 },
                Action::MarkComposite { p: 2, k: 6 },
                Action::MarkComposite { p: 2, k: 8 },
                Action::MarkComposite { p: 2, k: 10 },
                Action::DeclareBase { p: 3 },
                Action::MarkComposite { p: 3, k: 9 },
                Action::LoopFinished,
            ]
        );
    }

    #[test]
    fn test_small_limits_only_finish() {
        for limit in 0..4 {
            let (actions, _) = drain(limit);
            assert_eq!(actions, vec![Action::LoopFinished], "limit {limit}");
        }
    }

    #[test]
    fn test_skips_composite_bases() {
        // 4 is composite when the cursor reaches it
        let (actions, _) = drain(30);
        let bases: Vec<usize> = actions
            .iter()
            .filter_map(|a| match a {
                Action::DeclareBase { p } => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(bases, vec![2, 3, 5]);
    }

    #[test]
    fn test_exhausted_engine_stays_exhausted() {
        let mut table = CellTable::new(3);
        let mut engine = StepEngine::new(3);
        assert_eq!(engine.next_action(&table), Some(Action::LoopFinished));
        assert!(engine.is_exhausted());
        assert_eq!(engine.next_action(&table), None);
        assert_eq!(engine.next_action(&table), None);
        assert_eq!(engine.emitted(), 1);
        table.finalize();
        assert_eq!(table.primes(), vec![2, 3]);
    }

    #[test]
    fn test_replayed_action_is_a_no_op() {
        let mut table = CellTable::new(10);
        let mut highlight = Highlight::default();
        let mark = Action::MarkComposite { p: 2, k: 4 };
        assert!(mark.apply(&mut table, &mut highlight));
        let before = table.clone();
        assert!(!mark.apply(&mut table, &mut highlight));
        assert_eq!(table, before);
        assert_eq!(highlight, Highlight { current_p: 2, current_k: 4 });
    }

    #[test]
    fn test_describe_mentions_provenance() {
        let mut table = CellTable::new(12);
        let mut highlight = Highlight::default();
        let by_two = Action::MarkComposite { p: 2, k: 6 };
        by_two.apply(&mut table, &mut highlight);
        assert_eq!(by_two.describe(&table), "p = 2 → mark 6 as composite (by 2)");

        let by_three = Action::MarkComposite { p: 3, k: 6 };
        by_three.apply(&mut table, &mut highlight);
        assert_eq!(by_three.describe(&table), "p = 3 → mark 6 as composite");
        assert_eq!(
            Action::DeclareBase { p: 3 }.describe(&table),
            "Base p = 3. Marking multiples from 3² = 9."
        );
    }

    #[test]
    fn test_every_mark_belongs_to_the_last_declared_base() {
        let (actions, _) = drain(50);
        let mut current = None;
        for action in actions {
            match action {
                Action::DeclareBase { p } => current = Some(p),
                Action::MarkComposite { k, .. } => {
                    assert_eq!(action.base(), current);
                    assert_eq!(k % current.unwrap(), 0);
                }
                Action::LoopFinished => assert_eq!(action.base(), None),
            }
        }
    }

    #[test]
    fn test_loop_finished_clears_highlight() {
        let mut table = CellTable::new(10);
        let mut highlight = Highlight { current_p: 3, current_k: 9 };
        Action::LoopFinished.apply(&mut table, &mut highlight);
        assert_eq!(highlight, Highlight::default());
    }
}
