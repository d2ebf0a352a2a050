//! Configuration management for focuslog.
//!
//! This module handles loading and saving configuration from `~/.focuslog/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{Backend, CollaboratorConfig, Config, ExportConfig, LabelsConfig, TimerConfig};
