//! The column-navigation engine of rill.
//!
//! - [column]: the polymorphic column model (empty / text / directory).
//! - [viewer]: the column stack, its screen layout and navigation.
//! - [input]: the normal/capture input state machine.
//! - [state]: the application context tying them together.

pub mod column;
pub mod input;
pub mod state;
pub mod viewer;

pub use column::{Column, DirColumn, EMPTY_DIR_MESSAGE, NO_ACCESS_MESSAGE};
pub use input::{Command, InputMachine, KeyResult, LineCommand};
pub use state::{AppState, KeypressResult};
pub use viewer::{MIN_COLUMN_WIDTH, MIN_COLUMNS, Viewer};
