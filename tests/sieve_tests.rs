// Integration tests for the step engine and cell table

use proptest::prelude::*;
use sievetty::sieve::{Action, CellState, CellTable, Highlight, StepEngine};

/// Run the engine to exhaustion, returning every action and the final table
fn run_to_end(limit: usize) -> (Vec<Action>, CellTable) {
    let mut table = CellTable::new(limit);
    let mut highlight = Highlight::default();
    let mut engine = StepEngine::new(limit);
    let mut actions = Vec::new();

    while let Some(action) = engine.next_action(&table) {
        action.apply(&mut table, &mut highlight);
        actions.push(action);
    }
    table.finalize();
    (actions, table)
}

fn is_prime(n: usize) -> bool {
    n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

fn smallest_prime_factor(n: usize) -> usize {
    (2..=n).find(|d| n % d == 0).unwrap_or(n)
}

fn count_marks(actions: &[Action]) -> usize {
    actions
        .iter()
        .filter(|a| matches!(a, Action::MarkComposite { .. }))
        .count()
}

#[test]
fn test_scenario_n_10() {
    let (actions, table) = run_to_end(10);

    let marks: Vec<(usize, usize)> = actions
        .iter()
        .filter_map(|a| match *a {
            Action::MarkComposite { p, k } => Some((p, k)),
            _ => None,
        })
        .collect();
    assert_eq!(marks, vec![(2, 4), (2, 6), (2, 8), (2, 10), (3, 9)]);
    assert_eq!(actions.last(), Some(&Action::LoopFinished));

    assert_eq!(table.primes(), vec![2, 3, 5, 7]);
    for k in [4, 6, 8, 10] {
        assert_eq!(table.marked_by(k), 2);
    }
    assert_eq!(table.marked_by(9), 3);
}

#[test]
fn test_scenario_n_2() {
    let (actions, table) = run_to_end(2);
    assert_eq!(actions, vec![Action::LoopFinished]);
    assert_eq!(table.primes(), vec![2]);
}

#[test]
fn test_scenario_n_25() {
    let (actions, table) = run_to_end(25);

    // 11 multiples of 2 from 4, 6 of 3 from 9 and 1 of 5 from 25; repeats
    // such as 12 are emitted again but leave the first marker in place
    let mark_actions = count_marks(&actions);
    assert_eq!(mark_actions, 11 + 6 + 1);

    let composites: Vec<usize> = (2..=25).filter(|&n| !is_prime(n)).collect();
    assert_eq!(composites.len(), 15);
    assert!(composites.iter().all(|&n| smallest_prime_factor(n) <= 5));

    let mut first_marks: Vec<usize> = Vec::new();
    let mut seen = CellTable::new(25);
    for action in &actions {
        if let Action::MarkComposite { p, k } = *action {
            if seen.set_composite(k, p) {
                first_marks.push(k);
            }
        }
    }
    first_marks.sort_unstable();
    assert_eq!(first_marks, composites);

    assert_eq!(table.primes(), vec![2, 3, 5, 7, 11, 13, 17, 19, 23]);
}

#[test]
fn test_step_count_is_deterministic() {
    for limit in [2, 10, 25, 100, 997, 5000] {
        let (first, _) = run_to_end(limit);
        let (second, _) = run_to_end(limit);
        assert_eq!(first.len(), second.len(), "limit {limit}");
        assert_eq!(first, second, "limit {limit}");
    }
}

#[test]
fn test_full_replay_changes_nothing() {
    let (actions, mut table) = run_to_end(60);
    let before = table.clone();
    let mut highlight = Highlight::default();

    for action in &actions {
        assert!(!action.apply(&mut table, &mut highlight), "{action:?}");
    }
    table.finalize();
    assert_eq!(table, before);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn sieve_matches_trial_division(limit in 0usize..3000) {
        let (_, table) = run_to_end(limit);
        for n in 2..=limit {
            if is_prime(n) {
                prop_assert_eq!(table.state(n), CellState::Prime, "n = {}", n);
                prop_assert_eq!(table.marked_by(n), 0);
            } else {
                prop_assert_eq!(table.state(n), CellState::Composite, "n = {}", n);
                prop_assert_eq!(table.marked_by(n), smallest_prime_factor(n));
            }
        }
    }

    #[test]
    fn marked_by_never_changes_once_set(limit in 4usize..300) {
        let mut table = CellTable::new(limit);
        let mut highlight = Highlight::default();
        let mut engine = StepEngine::new(limit);
        let mut provenance = vec![0usize; limit + 1];

        while let Some(action) = engine.next_action(&table) {
            action.apply(&mut table, &mut highlight);
            for n in 2..=limit {
                let by = table.marked_by(n);
                if provenance[n] != 0 {
                    prop_assert_eq!(by, provenance[n]);
                }
                if by != 0 {
                    prop_assert_eq!(table.state(n), CellState::Composite);
                }
                provenance[n] = by;
            }
        }
    }

    #[test]
    fn replaying_an_action_is_idempotent(limit in 4usize..500, cut in 0usize..2000) {
        let mut table = CellTable::new(limit);
        let mut highlight = Highlight::default();
        let mut engine = StepEngine::new(limit);

        let mut last = None;
        for _ in 0..cut {
            match engine.next_action(&table) {
                Some(action) => {
                    action.apply(&mut table, &mut highlight);
                    last = Some(action);
                }
                None => break,
            }
        }

        if let Some(action) = last {
            let before = table.clone();
            prop_assert!(!action.apply(&mut table, &mut highlight));
            prop_assert_eq!(table, before);
        }
    }
}
