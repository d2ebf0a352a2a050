//! Path resolution for focuslog configuration and data files.
//!
//! All focuslog data is stored in `~/.focuslog/`:
//! - `config.yaml` - Main configuration file
//! - `focuslog.log` - Trace output while the terminal UI is running
//! - `exports/` - Default location for spreadsheet exports

use std::path::{Path, PathBuf};

use crate::error::FocuslogError;

/// Paths to focuslog configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.focuslog/`
    pub root: PathBuf,
    /// Config file: `~/.focuslog/config.yaml`
    pub config_file: PathBuf,
    /// Log file: `~/.focuslog/focuslog.log`
    pub log_file: PathBuf,
    /// Exports directory: `~/.focuslog/exports/`
    pub exports: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, FocuslogError> {
        let home = std::env::var("HOME").map_err(|_| {
            FocuslogError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".focuslog")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            log_file: root.join("focuslog.log"),
            exports: root.join("exports"),
            root,
        }
    }

    /// Paths whose config file is `config_file`, other locations unchanged.
    #[must_use]
    pub fn with_config_file(mut self, config_file: &Path) -> Self {
        self.config_file = config_file.to_path_buf();
        self
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), FocuslogError> {
        for dir in [&self.root, &self.exports] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    FocuslogError::Config(format!(
                        "Failed to create directory {}: {e}",
                        dir.display()
                    ))
                })?;
            }
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fallback to current directory if home cannot be determined
            Self::with_root(PathBuf::from(".focuslog"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-focuslog");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.log_file, root.join("focuslog.log"));
        assert_eq!(paths.exports, root.join("exports"));
    }

    #[test]
    fn test_config_file_override() {
        let paths = Paths::with_root(PathBuf::from("/tmp/test-focuslog"))
            .with_config_file(Path::new("/etc/focuslog.yaml"));

        assert_eq!(paths.config_file, PathBuf::from("/etc/focuslog.yaml"));
        assert_eq!(paths.exports, PathBuf::from("/tmp/test-focuslog/exports"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested"));

        paths.ensure_dirs().unwrap();

        assert!(paths.root.exists());
        assert!(paths.exports.exists());
    }
}
