//! TUI pane rendering modules
//!
//! - [`code`]: pseudocode listing with the current line highlighted
//! - [`state`]: family-specific view of the current snapshot
//! - [`narration`]: descriptions of the steps played so far
//! - [`status`]: status bar with progress, speed, and keybindings
//! - `utils`: shared border and cell styling

mod utils;

pub mod code;
pub mod narration;
pub mod state;
pub mod status;

pub use code::render_code_pane;
pub use narration::render_narration_pane;
pub use state::{render_state_pane, state_lines};
pub use status::{render_status_bar, StatusRenderData};
