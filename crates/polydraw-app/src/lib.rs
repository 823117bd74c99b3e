//! PolyDraw Application
//!
//! The application shell providing windowing, input handling,
//! the command overlay and integration of the core and render crates.

mod app;
mod shortcuts;
mod ui;

pub use app::{App, AppConfig, AppError, RedrawPolicy};
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use ui::{render_ui, UiAction, UiState};
