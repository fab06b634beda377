//! Command-line argument parsing and help for rill.
//!
//! When invoked with no args (`rill`), the TUI simply opens in the current
//! directory.

use crate::config::Config;

pub enum CliAction {
    RunApp,
    RunAppAtPath(String),
    Exit,
}

pub fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        return CliAction::RunApp;
    }

    if args.len() > 2 {
        eprintln!("Error: rill accepts only one argument at a time.");
        eprintln!("Usage: rill [PATH] or rill [OPTION]");
        return CliAction::Exit;
    }

    match args[1].as_str() {
        "--version" | "-v" => {
            print_version();
            CliAction::Exit
        }
        "-h" | "--help" => {
            print_help();
            CliAction::Exit
        }
        "--init" => {
            if let Err(e) = Config::generate_default(&Config::default_path()) {
                eprintln!("Error: {}", e);
            }
            CliAction::Exit
        }
        arg if !arg.starts_with('-') && !arg.trim().is_empty() => {
            CliAction::RunAppAtPath(arg.to_string())
        }
        arg => {
            eprintln!("Unknown argument: {}", arg);
            eprintln!("Try --help for available options");
            CliAction::Exit
        }
    }
}

fn print_version() {
    println!("rill {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"rill - rapid hierarchical file browsing in Miller columns

USAGE:
  rill [PATH]

PATH:
  Directory to open (defaults to the current directory)

OPTIONS:
      --init              Generate a default configuration file
  -h, --help              Print help information
  -v, --version           Display the installed version of rill

KEYS:
  Up / Down               Move the selection
  Right                   Enter the selected item
  Left                    Leave the current level
  + / -                   Grow / shrink the number of columns
  Enter                   Open the selected path in the editor
  :q                      Quit
  :e                      Open the selected path in the editor

ENVIRONMENT:
  RILL_CONFIG             Override the default config path
  EDITOR                  Editor used when [editor] cmd is unset
"#
    );
}
