// crates/nt-cli/src/tui/mod.rs - Interactive note browser
//
// One sequential loop: draw, block for the next terminal event, feed it to
// the state machine. Storage calls happen synchronously inside that step.
//
// MODULE ORGANIZATION:
// - app: modes, transitions and store effects (no terminal access)
// - input: key bindings per mode
// - layout: viewport sizing and soft wrapping
// - ui: rendering with ratatui

pub mod app;
pub mod input;
pub mod layout;
pub mod ui;

use anyhow::{Context as AnyhowContext, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use nt_core::NoteStore;
use nt_core::config::DisplayConfig;
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::io::{self, Stdout};
use tracing::info;

use app::App;

/// Run the browser until the user quits
///
/// The terminal is restored on every exit path, including errors and
/// panics inside the loop.
pub fn run(store: &mut NoteStore, display: &DisplayConfig) -> Result<()> {
    let mut app = App::new(store, display.clone()).context("Failed to load notes")?;

    let mut session = TerminalSession::enter()?;
    install_panic_hook();
    info!("browser started");

    let result = event_loop(&mut session.terminal, &mut app, event::read);
    session.restore()?;
    info!("browser closed");
    result
}

/// Size the app to the terminal, then draw and dispatch until quit
fn event_loop<B, F>(terminal: &mut Terminal<B>, app: &mut App<'_>, mut next_event: F) -> Result<()>
where
    B: Backend,
    F: FnMut() -> io::Result<Event>,
{
    let size = terminal.size().context("Failed to read terminal size")?;
    app.handle_event(Event::Resize(size.width, size.height));

    while !app.should_quit() {
        terminal.draw(|frame| ui::draw(frame, app))?;
        let event = next_event().context("Failed to read terminal event")?;
        app.handle_event(event);
    }
    Ok(())
}

/// Raw mode plus alternate screen, undone on drop if not restored explicitly
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    active: bool,
}

impl TerminalSession {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e).context("Failed to enter alternate screen");
        }

        let mut session = Self {
            terminal: Terminal::new(CrosstermBackend::new(stdout))
                .context("Failed to create terminal")?,
            active: true,
        };
        session.terminal.hide_cursor()?;
        Ok(session)
    }

    fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(panic);
    }));
}
