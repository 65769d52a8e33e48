//! Application configuration
//!
//! Settings come from an optional TOML file and are then overridden by
//! command-line flags.
//!
//! # Example
//!
//! ```toml
//! show_history = true
//! history_key = "calc_history"
//!
//! [layout]
//! display_height = 3
//! history_width_percent = 40
//! ```

use crate::ui::layout::LayoutConfig;
use calc_core::HISTORY_KEY;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Calculator application settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Session store key holding the history
    pub history_key: String,
    /// Show the history list on startup
    pub show_history: bool,
    /// Fixed session file (a temp file removed at exit is used otherwise)
    pub session_file: Option<PathBuf>,
    /// Pane sizes
    pub layout: LayoutConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            history_key: HISTORY_KEY.to_string(),
            show_history: false,
            session_file: None,
            layout: LayoutConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document
    pub fn from_toml(source: &str) -> Result<Self, String> {
        let mut config: Self =
            toml::from_str(source).map_err(|e| format!("Invalid config: {}", e))?;
        config.layout = config.layout.normalized();
        Ok(config)
    }

    /// Load a TOML config file
    pub fn load(path: &Path) -> Result<Self, String> {
        let source = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config '{}': {}", path.display(), e))?;
        Self::from_toml(&source)
    }

    pub fn session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    pub fn show_history(mut self, show: bool) -> Self {
        self.show_history = show;
        self
    }

    pub fn history_key(mut self, key: impl Into<String>) -> Self {
        self.history_key = key.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.history_key, "calc_history");
        assert!(!config.show_history);
        assert!(config.session_file.is_none());
    }

    #[test]
    fn test_empty_toml_is_default() -> Result<(), String> {
        assert_eq!(AppConfig::from_toml("")?, AppConfig::default());
        Ok(())
    }

    #[test]
    fn test_partial_toml() -> Result<(), String> {
        let config = AppConfig::from_toml(
            r#"
show_history = true

[layout]
history_width_percent = 30
"#,
        )?;
        assert!(config.show_history);
        assert_eq!(config.layout.history_width_percent, 30);
        assert_eq!(config.layout.display_height, LayoutConfig::default().display_height);
        assert_eq!(config.history_key, "calc_history");
        Ok(())
    }

    #[test]
    fn test_layout_values_clamped() -> Result<(), String> {
        let config = AppConfig::from_toml(
            r#"
[layout]
history_width_percent = 100
display_height = 1
"#,
        )?;
        assert_eq!(config.layout.history_width_percent, 90);
        assert_eq!(config.layout.display_height, 3);
        Ok(())
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = AppConfig::from_toml("colour = \"red\"");
        assert!(err.is_err_and(|e| e.starts_with("Invalid config")));
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/calc.toml"));
        assert!(err.is_err_and(|e| e.contains("Failed to read config")));
    }

    #[test]
    fn test_load_file() -> Result<(), Box<dyn std::error::Error>> {
        let file = tempfile::NamedTempFile::new()?;
        fs::write(file.path(), "history_key = \"work\"\n")?;
        let config = AppConfig::load(file.path())?;
        assert_eq!(config.history_key, "work");
        Ok(())
    }

    #[test]
    fn test_builders() {
        let config = AppConfig::new()
            .session_file("/tmp/calc.json")
            .show_history(true)
            .history_key("k");
        assert_eq!(config.session_file, Some(PathBuf::from("/tmp/calc.json")));
        assert!(config.show_history);
        assert_eq!(config.history_key, "k");
    }
}
