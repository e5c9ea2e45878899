//! Terminal rendering of the default views with ratatui.

pub mod terminal_guard;
pub mod theme;
pub mod widget;

pub use terminal_guard::{setup_terminal, DemoTerminal, TerminalGuard};
pub use widget::{centered_rect, render_view, spinner_frame};
