//! Terminal setup and the main event loop for rill.
//!
//! Handles raw mode and the alternate screen, and runs the blocking
//! read/drain/redraw cycle that drives the application until quit.

use crate::app::{AppState, KeypressResult};
use crate::ui;

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::debug;
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::{io, thread, time::Duration};

/// Breather between loop iterations so a key held down cannot peg a core.
const LOOP_PAUSE: Duration = Duration::from_millis(30);

/// Initializes the terminal in raw mode and the alternate screen and runs
/// the main event loop. Blocks until quit.
///
/// Returns an std::io::Error if terminal setup or teardown fails.
pub fn run_terminal(app: &mut AppState) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    result
}

/// The main loop: refresh column listings, draw, block for one key, drain
/// whatever else is already buffered, then redraw once if anything changed.
///
/// Batching the drain keeps held-down keys from paying one redraw per
/// keypress.
fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> io::Result<()>
where
    io::Error: From<<B as Backend>::Error>,
{
    while app.running() {
        app.refresh();
        terminal.draw(|f| ui::render(f, app))?;

        // Block until the first event of the batch.
        let mut needs_update = handle_event(terminal, app, event::read()?)?;
        let mut serviced = 1u32;
        while app.running() && event::poll(Duration::ZERO)? {
            needs_update |= handle_event(terminal, app, event::read()?)?;
            serviced += 1;
        }
        debug!("serviced {serviced} event(s)");

        if needs_update && app.running() {
            app.refresh();
            terminal.draw(|f| ui::render(f, app))?;
        }

        thread::sleep(LOOP_PAUSE);
    }
    Ok(())
}

/// Routes one terminal event; returns whether the screen needs another
/// pass.
fn handle_event<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    event: Event,
) -> io::Result<bool>
where
    io::Error: From<<B as Backend>::Error>,
{
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            match app.handle_keypress(key) {
                KeypressResult::Quit => Ok(true),
                KeypressResult::OpenedEditor => {
                    // The editor owned the screen; start from scratch.
                    terminal.clear()?;
                    Ok(true)
                }
                KeypressResult::Consumed => Ok(true),
                KeypressResult::Continue => Ok(false),
            }
        }
        // The next render adopts the new size and rebuilds every region.
        Event::Resize(_, _) => Ok(true),
        _ => Ok(false),
    }
}
