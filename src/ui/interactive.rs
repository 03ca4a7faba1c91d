use std::{panic, sync::Arc};

use crate::session::Session;
use crate::ui::{tui_events, tui_render, tui_state};
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

/// Runs the tree browser until the user quits. Returns the session so the
/// caller can inspect the final selection.
pub fn browse_tui(session: Session) -> Result<Session> {
    // Restore the terminal before the previous hook prints a panic
    let original = Arc::new(panic::take_hook());
    let chained = Arc::clone(&original);
    panic::set_hook(Box::new(move |info| {
        restore_terminal();
        (*chained)(info);
    }));

    let mut state = tui_state::UiState::new(session);
    let result = run(&mut state);
    restore_terminal();

    let _ = panic::take_hook();
    panic::set_hook(Box::new(move |info| (*original)(info)));

    result.map(|()| state.session)
}

fn run(state: &mut tui_state::UiState) -> Result<()> {
    enable_raw_mode()?;
    execute!(std::io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    loop {
        terminal.draw(|f| tui_render::render(f, state))?;
        let evt = event::read()?;
        if let Some(tui_events::UiMsg::Quit) = tui_events::handle_event(state, evt) {
            terminal.show_cursor()?;
            return Ok(());
        }
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(std::io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}
