//! Application state and main controller module for rill.
//!
//! [AppState] is the single context object the whole program shares: it owns
//! the viewer, the input machine, the filesystem handle, the run flag and
//! the message shown in the command area. The terminal loop feeds it key
//! events; it translates them into viewer mutations and reports whether the
//! screen needs another pass.

use crate::app::input::{Command, InputMachine, KeyResult, LineCommand};
use crate::app::viewer::Viewer;
use crate::config::{Config, RefreshPolicy};
use crate::core::{Fs, OsFs};
use crate::utils::open_in_editor;

use crossterm::event::KeyEvent;
use log::debug;
use ratatui::layout::Rect;
use std::io;
use std::path::Path;

/// How one keypress affected the application.
///
/// The terminal loop uses this to decide between redrawing, resetting the
/// terminal after an editor run, and quitting.
pub enum KeypressResult {
    Continue,
    Consumed,
    Quit,
    OpenedEditor,
}

/// The application context, constructed once per session.
pub struct AppState<'a> {
    config: &'a Config,
    fs: Box<dyn Fs>,
    viewer: Viewer,
    input: InputMachine,
    message: Option<String>,
    running: bool,
}

impl<'a> AppState<'a> {
    pub fn new(config: &'a Config) -> io::Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::from_dir(config, &cwd)
    }

    pub fn from_dir(config: &'a Config, initial: &Path) -> io::Result<Self> {
        let start = std::fs::canonicalize(initial)?;
        Ok(Self::with_fs(config, Box::new(OsFs), &start))
    }

    /// Builds the state on an explicit filesystem handle. `start` must be
    /// absolute.
    pub fn with_fs(config: &'a Config, fs: Box<dyn Fs>, start: &Path) -> Self {
        // The real content area arrives with the first frame; any sane
        // placeholder works until then.
        let viewer = Viewer::new(
            fs.as_ref(),
            start,
            Rect::new(0, 0, 80, 22),
            config.general().columns(),
            config.general().select_timeout(),
        );

        AppState {
            config,
            fs,
            viewer,
            input: InputMachine::from_config(config),
            message: None,
            running: true,
        }
    }

    // Getters / accessors

    #[inline]
    pub fn config(&self) -> &Config {
        self.config
    }

    #[inline]
    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    #[inline]
    pub fn input(&self) -> &InputMachine {
        &self.input
    }

    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The run flag, checked once per loop iteration.
    #[inline]
    pub fn running(&self) -> bool {
        self.running
    }

    /// Adopts a new content area, rebuilding the viewer layout when the
    /// terminal size actually changed.
    pub fn sync_content_area(&mut self, area: Rect) {
        if self.viewer.area() != area {
            self.viewer.resize(area);
        }
    }

    /// Applies the freshness policy and pulls pending column errors into
    /// the command area. Returns true when something changed.
    pub fn refresh(&mut self) -> bool {
        let reload = self.config.general().refresh() == RefreshPolicy::Always;
        let errors = self.viewer.refresh(self.fs.as_ref(), reload);
        let changed = !errors.is_empty();
        if let Some(err) = errors.into_iter().next_back() {
            self.message = Some(err);
        }
        changed
    }

    /// Routes one keypress through the input machine and applies the
    /// outcome to the viewer.
    pub fn handle_keypress(&mut self, key: KeyEvent) -> KeypressResult {
        match self.input.handle_key(key) {
            KeyResult::Idle => {
                debug!("ignored key: {:?}", key.code);
                KeypressResult::Continue
            }
            KeyResult::Captured => {
                // The command line owns the bottom row while it is open.
                self.message = None;
                KeypressResult::Consumed
            }
            KeyResult::Dispatch { typeahead, command } => self.dispatch(typeahead, command),
            KeyResult::Line(cmd, argument) => self.run_line_command(cmd, &argument),
            KeyResult::UnknownCommand(identifier) => {
                self.message = Some(format!("ERROR: Command not found: \"{identifier}\""));
                KeypressResult::Consumed
            }
        }
    }

    /// Normal-mode application: the type-ahead character first, then the
    /// table command, mirroring the dispatch order of the key handler.
    fn dispatch(&mut self, typeahead: Option<char>, command: Option<Command>) -> KeypressResult {
        let mut changed = false;

        if let Some(ch) = typeahead {
            changed |= self.viewer.buffer_select(self.fs.as_ref(), ch);
        }

        match command {
            Some(Command::MoveUp) => changed |= self.viewer.select_rel(self.fs.as_ref(), -1),
            Some(Command::MoveDown) => changed |= self.viewer.select_rel(self.fs.as_ref(), 1),
            Some(Command::Enter) => changed |= self.viewer.enter(),
            Some(Command::Leave) => changed |= self.viewer.leave(),
            Some(Command::AddColumn) => changed |= self.viewer.add_column(),
            Some(Command::RemoveColumn) => changed |= self.viewer.remove_column(),
            Some(Command::OpenEditor) => return self.open_selected(),
            None => {}
        }

        if changed {
            KeypressResult::Consumed
        } else {
            KeypressResult::Continue
        }
    }

    fn run_line_command(&mut self, cmd: LineCommand, _argument: &str) -> KeypressResult {
        match cmd {
            LineCommand::Quit => {
                self.running = false;
                KeypressResult::Quit
            }
            LineCommand::Edit => self.open_selected(),
        }
    }

    /// Hands the previewed path to the external editor.
    fn open_selected(&mut self) -> KeypressResult {
        let Some(path) = self.viewer.selected_path().map(Path::to_path_buf) else {
            return KeypressResult::Continue;
        };

        if let Err(e) = open_in_editor(self.config.editor(), &path) {
            self.message = Some(format!("ERROR: Could not start editor: {e}"));
            return KeypressResult::Consumed;
        }
        KeypressResult::OpenedEditor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fsx::testfs::MockFs;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sample_fs() -> MockFs {
        MockFs::default()
            .with_dir("/", &[("d", true)])
            .with_dir("/d", &[("alpha", true), ("beta", true)])
            .with_dir("/d/alpha", &[("a.txt", false)])
            .with_dir("/d/beta", &[])
    }

    fn sample_app(config: &Config) -> AppState<'_> {
        AppState::with_fs(config, Box::new(sample_fs()), Path::new("/d/alpha"))
    }

    #[test]
    fn arrows_move_selection_through_the_machine() {
        let config = Config::default();
        let mut app = sample_app(&config);

        assert!(matches!(
            app.handle_keypress(press(KeyCode::Down)),
            KeypressResult::Consumed
        ));
        let active = app.viewer().active().as_dir().expect("active dir");
        assert_eq!(active.selected(), Some(0));
        assert_eq!(app.viewer().selected_path(), Some(Path::new("/d/alpha")));

        // Up past the first entry is refused: nothing consumed.
        assert!(matches!(
            app.handle_keypress(press(KeyCode::Up)),
            KeypressResult::Continue
        ));
    }

    #[test]
    fn capture_mode_locks_out_navigation() {
        let config = Config::default();
        let mut app = sample_app(&config);
        app.handle_keypress(press(KeyCode::Down));

        app.handle_keypress(press(KeyCode::Char(':')));
        assert!(app.input().is_capturing());

        app.handle_keypress(press(KeyCode::Down));
        let active = app.viewer().active().as_dir().expect("active dir");
        assert_eq!(active.selected(), Some(0), "selection must not move");
    }

    #[test]
    fn quit_line_command_clears_run_flag() {
        let config = Config::default();
        let mut app = sample_app(&config);

        app.handle_keypress(press(KeyCode::Char(':')));
        app.handle_keypress(press(KeyCode::Char('q')));
        let result = app.handle_keypress(press(KeyCode::Enter));

        assert!(matches!(result, KeypressResult::Quit));
        assert!(!app.running());
    }

    #[test]
    fn unknown_line_command_surfaces_error() {
        let config = Config::default();
        let mut app = sample_app(&config);

        app.handle_keypress(press(KeyCode::Char(':')));
        app.handle_keypress(press(KeyCode::Char('z')));
        app.handle_keypress(press(KeyCode::Enter));

        assert_eq!(
            app.message(),
            Some("ERROR: Command not found: \"z\"")
        );
        assert!(!app.input().is_capturing());

        // Opening the command line again clears the stale error.
        app.handle_keypress(press(KeyCode::Char(':')));
        assert_eq!(app.message(), None);
    }

    #[test]
    fn typeahead_reaches_the_viewer() {
        let config = Config::default();
        let mut app = sample_app(&config);

        assert!(matches!(
            app.handle_keypress(press(KeyCode::Char('b'))),
            KeypressResult::Consumed
        ));
        assert_eq!(app.viewer().selected_path(), Some(Path::new("/d/beta")));
    }

    #[test]
    fn refresh_reports_listing_errors_once() {
        let config = Config::default();
        let mut app = AppState::with_fs(
            &config,
            Box::new(
                MockFs::default()
                    .with_dir("/", &[("gone", true)])
                    .with_dir("/gone", &[("x", false)])
                    .fail_listing("/gone"),
            ),
            Path::new("/gone"),
        );

        assert!(app.refresh());
        assert!(app.message().is_some_and(|m| m.contains("/gone")));
        assert!(!app.refresh(), "inert columns stay quiet");
    }
}
