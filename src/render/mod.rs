//! Layout and render model
//!
//! - [`layout`]: grid geometry and the adaptive cell-size fit
//! - [`model`]: per-cell visual state derived from the table and highlight
//!
//! Nothing here draws.  A drawing surface consumes a [`RenderModel`] and turns
//! it into whatever it paints with (see [`crate::ui::panes::grid`]).

pub mod layout;
pub mod model;

pub use layout::{CellRect, GridGeometry, GridLayout, LayoutParams, Viewport};
pub use model::{CellStyle, RenderModel, VisualCell, LEGEND};
