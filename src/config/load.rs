//! The main config loading module for rill.
//!
//! Handles loading and deserializing settings from `rill.toml`, and writing
//! a commented default file for `rill --init`.

use crate::config::{Editor, General, Keys};

use serde::Deserialize;
use std::{fs, io, path::PathBuf};

/// Main configuration struct for rill.
///
/// Missing tables and fields take their defaults, so a partial `rill.toml`
/// is always valid.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct Config {
    general: General,
    editor: Editor,
    keys: Keys,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the file does not exist or fails to parse, returns the default
    /// configuration. Called once by the entry point at startup.
    pub fn load() -> Self {
        Self::load_path(&Self::default_path())
    }

    fn load_path(path: &PathBuf) -> Self {
        if !path.exists() {
            eprintln!(
                "No rill.toml config file found. Using internal defaults. (Tip: run 'rill --init' to generate a config file.)"
            );
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Config>(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error parsing {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Where `rill.toml` is looked for: `RILL_CONFIG` if set, otherwise
    /// `<config dir>/rill/rill.toml`.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("RILL_CONFIG") {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rill")
            .join("rill.toml")
    }

    /// Writes a commented default config to `path`, refusing to clobber an
    /// existing file.
    pub fn generate_default(path: &PathBuf) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_CONFIG)?;
        println!("Wrote {}", path.display());
        Ok(())
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &General {
        &self.general
    }

    #[inline]
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }
}

const DEFAULT_CONFIG: &str = r##"# rill.toml - configuration for rill
# Every entry is optional; missing entries keep their defaults.

[general]
# Columns shown at startup (minimum 3).
columns = 3
# "always" re-lists visible directories before every frame;
# "on-change" re-lists only when navigation changes a column.
refresh = "always"
# Pause (ms) that separates two type-ahead bursts.
select_timeout_ms = 1000
# Diagnostic log, written in the working directory. "" disables it.
log_file = "rill.log"

[editor]
# Editor for Enter / :e. Defaults to $EDITOR, then vi.
# cmd = "vim"

[keys]
up = ["up"]
down = ["down"]
enter = ["right"]
leave = ["left"]
add_column = ["+"]
remove_column = ["-"]
open = ["enter"]
command = [":"]
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RefreshPolicy;

    #[test]
    fn defaults_reproduce_stock_layout() {
        let config = Config::default();
        assert_eq!(config.general().columns(), 3);
        assert_eq!(config.general().refresh(), RefreshPolicy::Always);
        assert_eq!(config.keys().up(), ["up".to_string()]);
        assert_eq!(config.keys().command(), [":".to_string()]);
        assert!(!config.editor().cmd().is_empty());
    }

    #[test]
    fn partial_toml_keeps_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let toml_content = r#"
            [general]
            columns = 5
            refresh = "on-change"

            [keys]
            open = ["o", "enter"]
        "#;

        let config: Config = toml::from_str(toml_content)?;
        assert_eq!(config.general().columns(), 5);
        assert_eq!(config.general().refresh(), RefreshPolicy::OnChange);
        assert_eq!(config.keys().open().len(), 2);
        // Untouched sections stay at their defaults.
        assert_eq!(config.keys().down(), ["down".to_string()]);
        assert_eq!(config.general().select_timeout().as_millis(), 1000);
        Ok(())
    }

    #[test]
    fn shipped_default_config_parses() -> Result<(), Box<dyn std::error::Error>> {
        let config: Config = toml::from_str(DEFAULT_CONFIG)?;
        assert_eq!(config.general().columns(), 3);
        assert!(config.general().log_file().is_some());
        Ok(())
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("rill.toml");
        fs::write(&path, "this is not [valid toml")?;

        let config = Config::load_path(&path);
        assert_eq!(config.general().columns(), 3);
        assert_eq!(config.keys().command(), [":".to_string()]);
        Ok(())
    }

    #[test]
    fn generate_default_refuses_to_clobber() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("rill.toml");

        Config::generate_default(&path)?;
        assert!(Config::load_path(&path).general().log_file().is_some());
        assert!(Config::generate_default(&path).is_err());
        Ok(())
    }
}
