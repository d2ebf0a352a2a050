//! focuslog - a terminal time tracker
//!
//! Track work with a freeform stopwatch or Pomodoro cycles, keep a session
//! log, and summarize or export it through pluggable collaborators.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod output;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use config::{Config, Paths};
pub use error::FocuslogError;
pub use features::session::SessionOrchestrator;
