//! Core runtime pieces for rill.
//!
//! - [fsx]: the filesystem access layer behind the [Fs] trait.
//! - [terminal]: terminal setup/teardown and the main crossterm/ratatui
//!   event loop.

pub mod fsx;
pub mod terminal;

pub use fsx::{DirEntry, Fs, OsFs};
