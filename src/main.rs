//! main.rs
//! Entry point for rill

use rill_tui::app::AppState;
use rill_tui::config::Config;
use rill_tui::core::terminal;
use rill_tui::utils::cli::{CliAction, handle_args};
use rill_tui::utils::init_logging;

use std::path::PathBuf;

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[rill] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let action = handle_args();

    if let CliAction::Exit = action {
        return Ok(());
    }

    let config = Config::load();
    init_logging(&config);

    let mut app = match action {
        CliAction::RunApp => AppState::new(&config)?,
        CliAction::RunAppAtPath(path_arg) => {
            let target = PathBuf::from(&path_arg);
            if !target.is_dir() {
                eprintln!("\n[rill] Error: '{}' is not a browsable directory.", path_arg);
                std::process::exit(1);
            }
            AppState::from_dir(&config, &target)?
        }
        CliAction::Exit => unreachable!(),
    };

    terminal::run_terminal(&mut app)
}
