//! Keybinding configuration for rill.
//!
//! Each field is a list of key names bound to one action; the input machine
//! parses them into its dispatch table at startup. The defaults reproduce
//! the stock layout: arrows navigate, `+`/`-` change the column count,
//! Enter opens the editor and `:` opens the command line.

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Keys {
    up: Vec<String>,
    down: Vec<String>,
    enter: Vec<String>,
    leave: Vec<String>,
    add_column: Vec<String>,
    remove_column: Vec<String>,
    open: Vec<String>,
    command: Vec<String>,
}

impl Default for Keys {
    fn default() -> Self {
        Keys {
            up: vec!["up".into()],
            down: vec!["down".into()],
            enter: vec!["right".into()],
            leave: vec!["left".into()],
            add_column: vec!["+".into()],
            remove_column: vec!["-".into()],
            open: vec!["enter".into()],
            command: vec![":".into()],
        }
    }
}

impl Keys {
    #[inline]
    pub fn up(&self) -> &[String] {
        &self.up
    }

    #[inline]
    pub fn down(&self) -> &[String] {
        &self.down
    }

    #[inline]
    pub fn enter(&self) -> &[String] {
        &self.enter
    }

    #[inline]
    pub fn leave(&self) -> &[String] {
        &self.leave
    }

    #[inline]
    pub fn add_column(&self) -> &[String] {
        &self.add_column
    }

    #[inline]
    pub fn remove_column(&self) -> &[String] {
        &self.remove_column
    }

    #[inline]
    pub fn open(&self) -> &[String] {
        &self.open
    }

    #[inline]
    pub fn command(&self) -> &[String] {
        &self.command
    }
}
