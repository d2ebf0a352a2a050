//! Command implementations for focuslog.
//!
//! This module contains the implementation of all CLI commands.

mod completions;
mod config;
mod tui;

pub use completions::{
    completion_install_instructions, completions, generate_completions, shell_from_str,
};
pub use config::config;
pub use tui::{resolve_durations, tui};
