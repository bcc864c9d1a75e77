//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]** — application state, keyboard event loop, auto-play timer, frame capture
//! - **[`panes`]** — stateless render functions for each visible pane (grid, base
//!   primes, info line, status bar)
//! - **[`theme`]** — centralized color palette and the cell style lookup
//!
//! The entry point for consumers is [`App`]: construct it with a
//! [`SieveConfig`] and call [`App::run`] to start the event loop.
//!
//! [`SieveConfig`]: crate::config::SieveConfig
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
