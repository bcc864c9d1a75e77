//! Sieve grid pane and legend
//!
//! The layout model works in canvas units.  A [`Projection`] maps them onto
//! terminal characters, picking the scale per pane from N and the pane size:
//! the horizontal scale guarantees that a floor-size cell is wide enough for
//! every number up to N, and the vertical scale drops to one terminal row per
//! grid row when the floor grid would not fit otherwise.  Cells two or more
//! rows tall show the `×p` provenance on their last row; one-row cells show it
//! after the number when there is room.

use crate::render::{CellRect, LayoutParams, RenderModel, Viewport, LEGEND};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Widest horizontal scale (canvas units per terminal column)
pub const MAX_UNITS_PER_COLUMN: u32 = 6;

/// Vertical scale when the floor grid fits with it (canvas units per row)
pub const ROOMY_UNITS_PER_ROW: u32 = 12;

const LEGEND_WIDTH: u16 = 38;
const LEGEND_HEIGHT: u16 = 4;

/// Block drawn around the grid; callers project onto its inner area
pub fn grid_block(limit: usize) -> Block<'static> {
    Block::default()
        .title(format!(" Sieve of Eratosthenes (N = {limit}) "))
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        )
}

/// Scale between canvas units and the terminal cells of one pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    /// Terminal area the canvas origin maps to
    pub origin: Rect,
    pub units_per_column: u32,
    pub units_per_row: u32,
}

impl Projection {
    /// Pick the scale for drawing `[2, limit]` into `area`.
    ///
    /// Scales that leave a floor-size cell room for `n×p` are tried first,
    /// then ones that only fit the number.  Within each, two-row cells are
    /// preferred over one row per grid row.  The first scale whose floor grid
    /// fits wins; otherwise the most compact one is used.
    pub fn new(limit: usize, area: Rect, params: LayoutParams) -> Self {
        let number = digits(limit);
        let labelled = number + 1 + digits(largest_base(limit));
        let compact_row = (params.min_cell + params.gap).max(1);

        let scaled = |chars: u32, units_per_row: u32| Projection {
            origin: area,
            units_per_column: (params.min_cell / chars).clamp(1, MAX_UNITS_PER_COLUMN),
            units_per_row,
        };

        [
            scaled(labelled, ROOMY_UNITS_PER_ROW),
            scaled(labelled, compact_row),
            scaled(number, ROOMY_UNITS_PER_ROW),
        ]
        .into_iter()
        .find(|p| params.fits_at_floor(limit, p.viewport()))
        .unwrap_or_else(|| scaled(number, compact_row))
    }

    /// Canvas size covered by the pane
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            u32::from(self.origin.width) * self.units_per_column,
            u32::from(self.origin.height) * self.units_per_row,
        )
    }

    /// Terminal rectangle covered by a canvas square
    pub fn project(&self, rect: CellRect) -> Rect {
        let x0 = rect.x / self.units_per_column;
        let y0 = rect.y / self.units_per_row;
        let x1 = ((rect.x + rect.size) / self.units_per_column).max(x0 + 1);
        let y1 = ((rect.y + rect.size) / self.units_per_row).max(y0 + 1);

        let clamp = |v: u32| u16::try_from(v).unwrap_or(u16::MAX);
        Rect::new(
            self.origin.x.saturating_add(clamp(x0)),
            self.origin.y.saturating_add(clamp(y0)),
            clamp(x1 - x0),
            clamp(y1 - y0),
        )
    }
}

/// Decimal digits in `n`
fn digits(n: usize) -> u32 {
    n.checked_ilog10().map_or(1, |d| d + 1)
}

/// Largest `p` with `p² ≤ limit`; no base prime exceeds it
fn largest_base(limit: usize) -> usize {
    let mut p = 1usize;
    while (p + 1).checked_mul(p + 1).is_some_and(|sq| sq <= limit) {
        p += 1;
    }
    p
}

/// Render the grid pane; `projection` must have been made for its inner area
pub fn render_grid_pane(
    frame: &mut Frame,
    area: Rect,
    model: &RenderModel,
    projection: &Projection,
) {
    let block = grid_block(model.limit);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame
        .buffer_mut()
        .set_style(inner, Style::default().bg(DEFAULT_THEME.canvas_bg));

    if model.geometry.is_none() {
        let note = Paragraph::new("(nothing to visualize)")
            .style(Style::default().fg(DEFAULT_THEME.comment).bg(DEFAULT_THEME.canvas_bg));
        frame.render_widget(note, inner);
        return;
    }

    let buf = frame.buffer_mut();
    for cell in &model.cells {
        let target = projection.project(cell.rect).intersection(inner);
        if target.is_empty() {
            continue;
        }
        draw_cell(buf, target, cell.n, cell.marked_by, DEFAULT_THEME.style_for(cell.style));
    }

    render_legend(frame, inner);
}

fn draw_cell(buf: &mut Buffer, target: Rect, n: usize, marked_by: Option<usize>, style: Style) {
    buf.set_style(target, style);
    let width = target.width as usize;
    let number = n.to_string();
    let label_style = style
        .fg(DEFAULT_THEME.marked_by_text)
        .remove_modifier(Modifier::BOLD);

    match marked_by.map(|by| format!("×{by}")) {
        Some(label) if target.height >= 2 => {
            draw_centered(buf, target, target.y, &number, style);
            draw_centered(buf, target, target.bottom() - 1, &label, label_style);
        }
        Some(label) if number.len() + label.chars().count() <= width => {
            let len = number.len() + label.chars().count();
            let x = target.x + centered_offset(len, width);
            let (x, _) = buf.set_stringn(x, target.y, &number, width, style);
            buf.set_stringn(x, target.y, &label, width - number.len(), label_style);
        }
        _ => draw_centered(buf, target, target.y, &number, style),
    }
}

fn draw_centered(buf: &mut Buffer, target: Rect, y: u16, text: &str, style: Style) {
    let width = target.width as usize;
    let x = target.x + centered_offset(text.chars().count(), width);
    buf.set_stringn(x, y, text, width, style);
}

fn centered_offset(len: usize, width: usize) -> u16 {
    (width.saturating_sub(len) / 2) as u16
}

/// Legend box anchored to the bottom-right corner of the canvas
fn render_legend(frame: &mut Frame, canvas: Rect) {
    let x = canvas
        .right()
        .saturating_sub(LEGEND_WIDTH + 2)
        .max(canvas.x);
    let y = canvas
        .bottom()
        .saturating_sub(LEGEND_HEIGHT + 1)
        .max(canvas.y);
    let area = Rect::new(x, y, LEGEND_WIDTH, LEGEND_HEIGHT).intersection(canvas);
    if area.is_empty() {
        return;
    }

    let text_style = Style::default()
        .fg(DEFAULT_THEME.cell_text)
        .bg(DEFAULT_THEME.unknown);
    let mut items = Vec::new();
    for style in LEGEND {
        items.push(Span::styled(
            "  ",
            Style::default().bg(DEFAULT_THEME.fill(style)),
        ));
        items.push(Span::styled(format!(" {}  ", style.label()), text_style));
    }

    let block = Block::default()
        .title(" Legend ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.comment))
        .style(text_style);

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(Line::from(items)).block(block), area);
}
