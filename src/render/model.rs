//! Visual cells derived from the sieve state
//!
//! A [`RenderModel`] is a complete description of one frame: grid geometry,
//! one [`VisualCell`] per number in `[2, N]`, and the counters shown in the
//! info line.  It is rebuilt from scratch after every mutation and holds no
//! state of its own.

use super::layout::{CellRect, GridGeometry};
use crate::sieve::{Cell, CellState, CellTable, Highlight};

/// How a cell is drawn, in precedence order:
/// current multiple, then current base, then the cell's own state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellStyle {
    Unknown,
    Prime,
    Composite,
    CurrentBase,
    CurrentMultiple,
}

impl CellStyle {
    pub fn resolve(n: usize, cell: &Cell, highlight: &Highlight) -> Self {
        if highlight.current_k >= 2 && n == highlight.current_k {
            return CellStyle::CurrentMultiple;
        }
        if highlight.current_p >= 2 && n == highlight.current_p {
            return CellStyle::CurrentBase;
        }
        match cell.state {
            CellState::Unknown => CellStyle::Unknown,
            CellState::Prime => CellStyle::Prime,
            CellState::Composite => CellStyle::Composite,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CellStyle::Unknown => "Unknown",
            CellStyle::Prime => "Prime",
            CellStyle::Composite => "Composite",
            CellStyle::CurrentBase => "Base p",
            CellStyle::CurrentMultiple => "Marking k",
        }
    }
}

/// Styles listed in the legend box
pub const LEGEND: [CellStyle; 3] = [CellStyle::Unknown, CellStyle::Prime, CellStyle::Composite];

/// One number's square on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualCell {
    pub n: usize,
    pub row: u32,
    pub col: u32,
    pub rect: CellRect,
    pub style: CellStyle,
    /// Provenance shown under composite numbers
    pub marked_by: Option<usize>,
}

/// Everything a drawing surface needs for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderModel {
    pub limit: usize,
    pub geometry: Option<GridGeometry>,
    pub cells: Vec<VisualCell>,
    pub highlight: Highlight,
    pub prime_count: usize,
}

impl RenderModel {
    pub fn build(table: &CellTable, highlight: Highlight, geometry: Option<GridGeometry>) -> Self {
        let cells = match geometry {
            Some(geometry) => table
                .iter_visible()
                .filter_map(|(n, cell)| {
                    let (row, col) = geometry.position_of(n)?;
                    let rect = geometry.cell_rect(n)?;
                    let marked_by = (cell.state == CellState::Composite && cell.marked_by != 0)
                        .then_some(cell.marked_by);
                    Some(VisualCell {
                        n,
                        row,
                        col,
                        rect,
                        style: CellStyle::resolve(n, cell, &highlight),
                        marked_by,
                    })
                })
                .collect(),
            None => Vec::new(),
        };

        RenderModel {
            limit: table.limit(),
            geometry,
            cells,
            highlight,
            prime_count: table.prime_count(),
        }
    }

    pub fn cell(&self, n: usize) -> Option<&VisualCell> {
        self.cells.get(n.checked_sub(2)?)
    }
}
