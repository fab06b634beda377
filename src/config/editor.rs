//! External editor configuration for rill.

use serde::Deserialize;

/// The `[editor]` table: which command `Enter` and `:e` hand the selected
/// path to.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Editor {
    cmd: String,
}

impl Default for Editor {
    fn default() -> Self {
        Editor {
            cmd: std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string()),
        }
    }
}

impl Editor {
    pub fn cmd(&self) -> &str {
        if self.cmd.is_empty() { "vi" } else { &self.cmd }
    }
}
