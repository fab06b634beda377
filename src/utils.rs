//! Miscellaneous utility functions for rill.
//!
//! - [cli]: command-line argument handling for the `rill` binary.
//! - [helpers]: the editor hand-off, `~` path shortening and diagnostic
//!   logging setup.

pub mod cli;
pub mod helpers;

pub use helpers::{init_logging, open_in_editor, shorten_home_path};
