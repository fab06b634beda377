//! The general configuration settings for rill.
//!
//! Defines the [General] struct deserialized from the `[general]` table of
//! `rill.toml`: the initial column count, the directory refresh policy, the
//! type-ahead timing and the diagnostic log file.

use serde::Deserialize;
use std::time::Duration;

/// How directory columns keep their listings current.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RefreshPolicy {
    /// Re-list every visible directory before each frame. Freshness over
    /// caching; this is what the browser historically did.
    Always,
    /// Re-list only when navigation replaces a column.
    OnChange,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct General {
    columns: usize,
    refresh: RefreshPolicy,
    select_timeout_ms: u64,
    log_file: String,
}

impl Default for General {
    fn default() -> Self {
        General {
            columns: 3,
            refresh: RefreshPolicy::Always,
            select_timeout_ms: 1000,
            log_file: "rill.log".to_string(),
        }
    }
}

impl General {
    /// The column count the viewer starts with. The viewer clamps this to
    /// its own minimum.
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn refresh(&self) -> RefreshPolicy {
        self.refresh
    }

    /// How long a pause splits two type-ahead bursts.
    #[inline]
    pub fn select_timeout(&self) -> Duration {
        Duration::from_millis(self.select_timeout_ms)
    }

    /// The diagnostic log file, if logging is enabled. An empty string in
    /// the config disables it.
    pub fn log_file(&self) -> Option<&str> {
        if self.log_file.is_empty() {
            None
        } else {
            Some(&self.log_file)
        }
    }
}
