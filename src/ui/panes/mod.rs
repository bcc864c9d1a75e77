//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`grid`]: the number grid, drawn from a [`RenderModel`](crate::render::RenderModel),
//!   plus the legend box
//! - [`bases`]: base primes declared so far and how many composites each struck
//! - [`status`]: info line and status bar with keybindings and run state
//!
//! Each pane exports a stateless `render_*` function; scroll offsets and
//! layout state live in [`App`](crate::ui::App).

pub mod bases;
pub mod grid;
pub mod status;

pub use bases::render_bases_pane;
pub use grid::{grid_block, render_grid_pane, Projection};
pub use status::{render_info_line, render_status_bar, StatusRenderData};
