//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, and the
//!   [`PlaybackController`] that owns the playback position
//! - **[`panes`]**: stateless render functions for each visible pane
//!   (pseudocode, state, steps, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! Construct an [`App`] with a finished [`Trace`] and call [`App::run`] to
//! start the event loop.
//!
//! [`PlaybackController`]: crate::playback::PlaybackController
//! [`Trace`]: crate::snapshot::Trace
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
