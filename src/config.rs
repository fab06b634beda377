//! Configuration for rill.
//!
//! Settings load from `rill.toml` (see [Config::load] for the lookup order)
//! and fall back to built-in defaults when the file is missing or invalid.
//! The sections mirror the toml tables:
//! - [general]: column count, refresh policy, type-ahead timing, log file.
//! - [editor]: the external editor command.
//! - [keys]: key lists per action, parsed into the dispatch table.

pub mod editor;
pub mod general;
pub mod keys;
pub mod load;

pub use editor::Editor;
pub use general::{General, RefreshPolicy};
pub use keys::Keys;
pub use load::Config;
