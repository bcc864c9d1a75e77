//! Grid geometry with adaptive cell sizing
//!
//! Geometry is computed in abstract canvas units.  The drawing surface decides
//! how units map to its own coordinates (the TUI treats them as virtual
//! pixels of a fixed-size character cell).
//!
//! # Fitting
//!
//! [`GridLayout::fit`] is a single-pass heuristic: columns are derived from
//! the viewport width; if the rows needed would overflow the viewport height
//! the cell size shrinks by one step (never below the floor) and the columns
//! are recomputed.  The shrunk size is kept, so repeated fits against a small
//! viewport keep shrinking until the grid fits or the floor is reached.

/// Fixed sizing parameters (canvas units)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutParams {
    pub margin: u32,
    pub base_cell: u32,
    pub gap: u32,
    pub min_cell: u32,
    pub shrink_step: u32,
    pub min_cols: u32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        LayoutParams {
            margin: 12,
            base_cell: 26,
            gap: 4,
            min_cell: 14,
            shrink_step: 2,
            min_cols: 5,
        }
    }
}

impl LayoutParams {
    /// Whether `[2, limit]` fits the viewport once cells reach `min_cell`
    pub fn fits_at_floor(&self, limit: usize, viewport: Viewport) -> bool {
        let count = limit.saturating_sub(1) as u32;
        let pitch = self.min_cell + self.gap;
        let available_w = viewport.width.saturating_sub(2 * self.margin);
        let available_h = viewport.height.saturating_sub(2 * self.margin);
        let cols = (available_w / pitch).max(self.min_cols);
        count.div_ceil(cols) * pitch <= available_h
    }
}

/// Size of the drawing area (canvas units)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Viewport { width, height }
    }
}

/// A cell's square on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

/// Result of fitting `[2, N]` into a viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub cols: u32,
    pub rows: u32,
    pub cell_size: u32,
    pub gap: u32,
    pub origin_x: u32,
    pub origin_y: u32,
    limit: usize,
}

impl GridGeometry {
    /// Distance between the origins of adjacent cells
    pub fn pitch(&self) -> u32 {
        self.cell_size + self.gap
    }

    /// `(row, col)` of number `n`, or `None` outside `[2, N]`
    pub fn position_of(&self, n: usize) -> Option<(u32, u32)> {
        if n < 2 || n > self.limit {
            return None;
        }
        let idx = (n - 2) as u32;
        Some((idx / self.cols, idx % self.cols))
    }

    /// Canvas square occupied by number `n`
    pub fn cell_rect(&self, n: usize) -> Option<CellRect> {
        let (row, col) = self.position_of(n)?;
        Some(CellRect {
            x: self.origin_x + col * self.pitch(),
            y: self.origin_y + row * self.pitch(),
            size: self.cell_size,
        })
    }
}

/// Stateful fitter holding the current (possibly shrunk) cell size
#[derive(Debug, Clone)]
pub struct GridLayout {
    params: LayoutParams,
    cell_size: u32,
}

impl GridLayout {
    pub fn new(params: LayoutParams) -> Self {
        GridLayout {
            params,
            cell_size: params.base_cell,
        }
    }

    pub fn params(&self) -> LayoutParams {
        self.params
    }

    /// Current cell size; only ever decreases
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Fit `[2, limit]` into the viewport.  `None` when there is nothing to draw.
    pub fn fit(&mut self, limit: usize, viewport: Viewport) -> Option<GridGeometry> {
        if limit < 2 {
            return None;
        }
        let p = self.params;
        let count = (limit - 1) as u32;
        let available_w = viewport.width.saturating_sub(2 * p.margin);
        let available_h = viewport.height.saturating_sub(2 * p.margin);

        let mut pitch = self.cell_size + p.gap;
        let mut cols = (available_w / pitch).max(p.min_cols);
        let rows_needed = count.div_ceil(cols);

        if rows_needed * pitch > available_h && self.cell_size > p.min_cell {
            self.cell_size = self.cell_size.saturating_sub(p.shrink_step).max(p.min_cell);
            pitch = self.cell_size + p.gap;
            cols = (available_w / pitch).max(p.min_cols);
        }

        Some(GridGeometry {
            cols,
            rows: count.div_ceil(cols),
            cell_size: self.cell_size,
            gap: p.gap,
            origin_x: p.margin,
            origin_y: p.margin,
            limit,
        })
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        GridLayout::new(LayoutParams::default())
    }
}
