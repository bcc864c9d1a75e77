//! Per-number sieve state
//!
//! The [`CellTable`] holds one [`Cell`] for every integer in `[0, N]`.  Cells
//! `0` and `1` exist only so that indices line up with the numbers they
//! describe; they are never visualized.
//!
//! # Provenance
//!
//! A composite cell remembers the base prime that marked it first.  Once a
//! cell is composite its `marked_by` never changes, so replaying a marking
//! action is harmless.

/// State of a single number in the sieve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Unknown,
    Prime,
    Composite,
}

/// A single number's state and provenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub state: CellState,
    /// 0 if unmarked, otherwise the base prime that first marked this cell
    pub marked_by: usize,
}

/// Cell states for every number in `[0, N]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellTable {
    cells: Vec<Cell>,
    limit: usize,
}

impl CellTable {
    /// Create a table for `[0, limit]` with every cell Unknown
    pub fn new(limit: usize) -> Self {
        CellTable {
            cells: vec![Cell::default(); limit + 1],
            limit,
        }
    }

    /// Reallocate for a new limit and clear every cell
    pub fn reset(&mut self, limit: usize) {
        self.cells.clear();
        self.cells.resize(limit + 1, Cell::default());
        self.limit = limit;
    }

    /// The sieve upper bound `N`
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of cells, including the unused `0` and `1`
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, n: usize) -> Cell {
        self.cells[n]
    }

    pub fn state(&self, n: usize) -> CellState {
        self.cells[n].state
    }

    pub fn marked_by(&self, n: usize) -> usize {
        self.cells[n].marked_by
    }

    pub fn is_composite(&self, n: usize) -> bool {
        self.cells[n].state == CellState::Composite
    }

    /// Mark `n` prime if it is still Unknown.  Returns whether the cell changed.
    pub fn set_prime(&mut self, n: usize) -> bool {
        let cell = &mut self.cells[n];
        if cell.state != CellState::Unknown {
            return false;
        }
        cell.state = CellState::Prime;
        true
    }

    /// Mark `n` composite with provenance `by`.
    ///
    /// No-op if the cell is already composite: the first marker wins.
    /// Returns whether the cell changed.
    pub fn set_composite(&mut self, n: usize, by: usize) -> bool {
        let cell = &mut self.cells[n];
        if cell.state == CellState::Composite {
            return false;
        }
        cell.state = CellState::Composite;
        cell.marked_by = by;
        true
    }

    /// Promote every remaining Unknown cell in `[2, N]` to Prime.
    /// Returns how many cells were promoted.
    pub fn finalize(&mut self) -> usize {
        let mut promoted = 0;
        for cell in self.cells.iter_mut().skip(2) {
            if cell.state == CellState::Unknown {
                cell.state = CellState::Prime;
                promoted += 1;
            }
        }
        promoted
    }

    /// Count cells currently marked Prime
    pub fn prime_count(&self) -> usize {
        self.iter_visible()
            .filter(|(_, cell)| cell.state == CellState::Prime)
            .count()
    }

    /// Numbers currently marked Prime, ascending
    pub fn primes(&self) -> Vec<usize> {
        self.iter_visible()
            .filter(|(_, cell)| cell.state == CellState::Prime)
            .map(|(n, _)| n)
            .collect()
    }

    /// Iterate `(n, cell)` over the visualized range `[2, N]`
    pub fn iter_visible(&self) -> impl Iterator<Item = (usize, &Cell)> {
        self.cells.iter().enumerate().skip(2)
    }
}
