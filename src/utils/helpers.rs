//! Helpers for rill.
//!
//! Utility functions shared across the app:
//! - Handing a path to the user's editor while the TUI steps aside
//! - Shortening home-relative paths to "~" for the status line
//! - Wiring the diagnostic log file

use crate::config::{Config, Editor};

use log::LevelFilter;
use simplelog::WriteLogger;
use std::fs::OpenOptions;
use std::io;
use std::path::{MAIN_SEPARATOR, Path};

/// Opens a specified path/file in the configured editor.
///
/// Temporarily disables raw mode and exits the alternate screen while the
/// editor runs. On return, restores raw mode and the alternate screen; the
/// caller still owes a full redraw.
pub fn open_in_editor(editor: &Editor, file_path: &Path) -> io::Result<()> {
    use crossterm::{
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    };

    let mut stdout = io::stdout();
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    let status = std::process::Command::new(editor.cmd())
        .arg(file_path)
        .status();

    execute!(io::stdout(), EnterAlternateScreen)?;
    enable_raw_mode()?;
    status.map(|_| ())
}

/// Shortens the home directory prefix of a path to "~" for display.
pub fn shorten_home_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if let Some(home_dir) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home_dir)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        } else {
            let mut short = stripped.display().to_string();
            if short.starts_with(MAIN_SEPARATOR) {
                short.remove(0);
            }
            return format!("~{}{}", MAIN_SEPARATOR, short);
        }
    }
    path.display().to_string()
}

/// Starts appending diagnostics to the configured log file.
///
/// Best-effort: a file that cannot be opened simply leaves logging off, and
/// a second initialization (tests) is ignored.
pub fn init_logging(config: &Config) {
    let Some(path) = config.general().log_file() else {
        return;
    };

    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let _ = WriteLogger::init(LevelFilter::Debug, simplelog::Config::default(), file);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn shorten_leaves_foreign_paths_alone() {
        let path = PathBuf::from("/definitely/not/home");
        assert_eq!(shorten_home_path(&path), "/definitely/not/home");
    }

    #[test]
    fn shorten_collapses_home_prefix() {
        let Some(home) = dirs::home_dir() else {
            return;
        };

        assert_eq!(shorten_home_path(&home), "~");

        let nested = home.join("projects").join("rill");
        let short = shorten_home_path(&nested);
        assert!(short.starts_with('~'), "got {short:?}");
        assert!(short.ends_with("rill"));
    }
}
