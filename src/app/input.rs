//! Input state machine for rill.
//!
//! Normal mode turns keypresses into [Command] values through a static
//! dispatch table built from the config. A trigger key (`:` by default)
//! switches into capture mode, which owns the keyboard exclusively while a
//! command line is typed, and hands back a [LineCommand] on submission.
//!
//! The machine never touches the viewer itself; it returns [KeyResult]
//! values for the application state to apply.

use crate::config::Config;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// A single-key command from the normal-mode dispatch table.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    MoveUp,
    MoveDown,
    Enter,
    Leave,
    AddColumn,
    RemoveColumn,
    OpenEditor,
}

/// A line command submitted from capture mode.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LineCommand {
    Quit,
    Edit,
}

/// Key + modifiers as used in the keymap.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

#[derive(Copy, Clone)]
enum Binding {
    Run(Command),
    BeginCapture,
}

/// Where the machine currently routes keys.
enum Mode {
    Normal,
    Capture { line: String },
}

/// What one keypress turned into.
#[derive(Debug, PartialEq)]
pub enum KeyResult {
    /// Nothing matched; the key is ignored (logged only).
    Idle,
    /// Normal-mode outcome: a character offered to the type-ahead buffer
    /// and/or a table command. Keys like `+` produce both.
    Dispatch {
        typeahead: Option<char>,
        command: Option<Command>,
    },
    /// Capture mode consumed the key; the pending line may have changed.
    Captured,
    /// Capture mode submitted a recognized command and its argument.
    Line(LineCommand, String),
    /// Capture mode submitted an identifier with no handler.
    UnknownCommand(String),
}

/// The two-state input machine plus its dispatch tables.
pub struct InputMachine {
    mode: Mode,
    keymap: HashMap<Key, Binding>,
    line_commands: HashMap<char, LineCommand>,
}

impl InputMachine {
    /// Builds both dispatch tables from the configured key lists. Unparsable
    /// key names are skipped.
    pub fn from_config(config: &Config) -> Self {
        let keys = config.keys();
        let mut keymap = HashMap::new();

        bind(keys.up(), Binding::Run(Command::MoveUp), &mut keymap);
        bind(keys.down(), Binding::Run(Command::MoveDown), &mut keymap);
        bind(keys.enter(), Binding::Run(Command::Enter), &mut keymap);
        bind(keys.leave(), Binding::Run(Command::Leave), &mut keymap);
        bind(keys.add_column(), Binding::Run(Command::AddColumn), &mut keymap);
        bind(
            keys.remove_column(),
            Binding::Run(Command::RemoveColumn),
            &mut keymap,
        );
        bind(keys.open(), Binding::Run(Command::OpenEditor), &mut keymap);
        bind(keys.command(), Binding::BeginCapture, &mut keymap);

        let line_commands = HashMap::from([('q', LineCommand::Quit), ('e', LineCommand::Edit)]);

        InputMachine {
            mode: Mode::Normal,
            keymap,
            line_commands,
        }
    }

    /// Whether capture mode currently owns the keyboard.
    pub fn is_capturing(&self) -> bool {
        matches!(self.mode, Mode::Capture { .. })
    }

    /// The command line typed so far, while capturing.
    pub fn pending_line(&self) -> Option<&str> {
        match &self.mode {
            Mode::Capture { line } => Some(line),
            Mode::Normal => None,
        }
    }

    /// Routes one keypress through the machine.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        if self.is_capturing() {
            self.handle_capture(key)
        } else {
            self.handle_normal(key)
        }
    }

    fn handle_normal(&mut self, key: KeyEvent) -> KeyResult {
        match self.lookup(key) {
            Some(Binding::BeginCapture) => {
                // The trigger opens the command line instead of dispatching.
                self.mode = Mode::Capture { line: String::new() };
                return KeyResult::Captured;
            }
            Some(Binding::Run(command)) => {
                return KeyResult::Dispatch {
                    typeahead: typeahead_char(key),
                    command: Some(command),
                };
            }
            None => {}
        }

        match typeahead_char(key) {
            Some(ch) => KeyResult::Dispatch {
                typeahead: Some(ch),
                command: None,
            },
            None => KeyResult::Idle,
        }
    }

    fn handle_capture(&mut self, key: KeyEvent) -> KeyResult {
        let Mode::Capture { line } = &mut self.mode else {
            return KeyResult::Idle;
        };

        match key.code {
            KeyCode::Char(ch) => {
                line.push(ch);
                KeyResult::Captured
            }
            KeyCode::Backspace => {
                line.pop();
                KeyResult::Captured
            }
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                KeyResult::Captured
            }
            KeyCode::Enter => {
                let line = std::mem::take(line);
                self.mode = Mode::Normal;
                self.submit(&line)
            }
            // Everything else is swallowed: capture mode is exclusive.
            _ => KeyResult::Captured,
        }
    }

    /// Parses a submitted line: the first character is the command
    /// identifier, the rest (past one optional space) the argument.
    fn submit(&self, line: &str) -> KeyResult {
        let mut chars = line.chars();
        let Some(identifier) = chars.next() else {
            return KeyResult::UnknownCommand(String::new());
        };

        let rest = chars.as_str();
        let argument = rest.strip_prefix(' ').unwrap_or(rest).to_string();

        match self.line_commands.get(&identifier) {
            Some(cmd) => KeyResult::Line(*cmd, argument),
            None => KeyResult::UnknownCommand(identifier.to_string()),
        }
    }

    fn lookup(&self, key: KeyEvent) -> Option<Binding> {
        let k = Key {
            code: key.code,
            modifiers: key.modifiers,
        };
        if let Some(binding) = self.keymap.get(&k) {
            return Some(*binding);
        }

        // Shifted characters arrive with SHIFT set; match the bare binding.
        if matches!(key.code, KeyCode::Char(_)) && key.modifiers.contains(KeyModifiers::SHIFT) {
            let k2 = Key {
                code: key.code,
                modifiers: key.modifiers - KeyModifiers::SHIFT,
            };
            return self.keymap.get(&k2).copied();
        }
        None
    }
}

/// The character a key contributes to the type-ahead buffer, if any.
/// Control-chorded keys stay out of the buffer.
fn typeahead_char(key: KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(ch) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            Some(ch)
        }
        _ => None,
    }
}

pub(crate) fn parse_key(s: &str) -> Option<Key> {
    let lower = s.to_lowercase();
    let code = match lower.as_str() {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "backspace" | "back" => KeyCode::Backspace,
        "tab" => KeyCode::Tab,
        "space" | "spc" => KeyCode::Char(' '),
        _ => {
            let mut chars = s.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(ch)
        }
    };

    Some(Key {
        code,
        modifiers: KeyModifiers::NONE,
    })
}

fn bind(key_list: &[String], binding: Binding, map: &mut HashMap<Key, Binding>) {
    for name in key_list {
        if let Some(key) = parse_key(name) {
            map.insert(key, binding);
        }
    }
}
