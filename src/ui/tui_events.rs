use std::path::PathBuf;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tracing::warn;

use crate::constants::{DEFAULT_OUTPUT_NAME, NOTHING_SELECTED};
use crate::context::export::ExportOutcome;
use crate::ui::tui_state::{Mode, UiState};

/// Messages from the event handler to the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMsg {
    Quit,
}

/// Applies one terminal event to the state.
pub fn handle_event(
    state: &mut UiState,
    evt: Event,
) -> Option<UiMsg> {
    match evt {
        Event::Key(key) if key.kind == KeyEventKind::Press => match state.mode {
            Mode::Browse => handle_browse_key(state, key),
            _ => {
                handle_input_key(state, key);
                None
            }
        },
        Event::Mouse(mouse) if state.mode == Mode::Browse => {
            handle_mouse(state, mouse);
            None
        }
        _ => None,
    }
}

fn handle_browse_key(
    state: &mut UiState,
    key: KeyEvent,
) -> Option<UiMsg> {
    state.message = None;
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Char('q'), _) => {
            return Some(UiMsg::Quit);
        }
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => {
            state.selected_idx = state.selected_idx.saturating_sub(1);
        }
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => {
            state.selected_idx += 1;
            state.clamp_cursor();
        }
        (KeyCode::Home, _) => state.selected_idx = 0,
        (KeyCode::End, _) => {
            state.selected_idx = usize::MAX;
            state.clamp_cursor();
        }
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => expand_or_descend(state),
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => collapse_or_ascend(state),
        (KeyCode::Char(' '), _) => {
            if let Some(id) = state.cursor_node() {
                state.session.toggle(id);
            }
        }
        (KeyCode::Char('a'), KeyModifiers::NONE) => state.session.set_all(true),
        (KeyCode::Char('A'), _) | (KeyCode::Char('u'), _) => state.session.set_all(false),
        (KeyCode::Char('/'), _) => enter_mode(state, Mode::Search, String::new()),
        (KeyCode::Char('o'), _) => {
            let current = state.session.base().display().to_string();
            enter_mode(state, Mode::Opening, current);
        }
        (KeyCode::Char('e'), _) | (KeyCode::Enter, _) => {
            if state.session.selected_paths().is_empty() {
                state.message = Some(NOTHING_SELECTED.to_string());
            } else {
                enter_mode(state, Mode::Naming, DEFAULT_OUTPUT_NAME.to_string());
            }
        }
        _ => {}
    }
    None
}

fn enter_mode(
    state: &mut UiState,
    mode: Mode,
    input: String,
) {
    state.mode = mode;
    state.input = input;
}

fn handle_input_key(
    state: &mut UiState,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc => {
            state.mode = Mode::Browse;
            state.input.clear();
        }
        KeyCode::Backspace => {
            state.input.pop();
            live_search(state);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.input.push(c);
            live_search(state);
        }
        KeyCode::Enter => {
            let input = std::mem::take(&mut state.input);
            let mode = std::mem::replace(&mut state.mode, Mode::Browse);
            match mode {
                Mode::Naming => run_export(state, input),
                Mode::Opening => open_base(state, input),
                Mode::Search | Mode::Browse => {}
            }
        }
        _ => {}
    }
}

fn live_search(state: &mut UiState) {
    if state.mode != Mode::Search {
        return;
    }
    if let Some(id) = state.search(&state.input) {
        state.reveal(id);
    }
}

fn run_export(
    state: &mut UiState,
    name: String,
) {
    let outcome = state.session.export(move |_| Some(name));
    state.message = Some(match outcome {
        Ok(ExportOutcome::Written(report)) => format!(
            "Saved {} ({} files, {} unreadable, {} tokens)",
            report.path.display(),
            report.files,
            report.unreadable,
            report.tokens
        ),
        Ok(ExportOutcome::NothingSelected) => NOTHING_SELECTED.to_string(),
        Ok(ExportOutcome::Cancelled) => "Export cancelled".to_string(),
        Err(e) => {
            warn!("Export failed: {e:#}");
            format!("Export failed: {e:#}")
        }
    });
}

fn open_base(
    state: &mut UiState,
    input: String,
) {
    let path = PathBuf::from(input.trim());
    match state.session.open(&path) {
        Ok(()) => {
            state.reset_view();
            state.message = Some(format!("Opened {}", state.session.base().display()));
        }
        Err(e) => state.message = Some(format!("{e:#}")),
    }
}

fn expand_or_descend(state: &mut UiState) {
    let Some(id) = state.cursor_node() else {
        return;
    };
    let tree = state.session.tree();
    if !tree.get(id).is_some_and(|n| n.is_dir()) {
        return;
    }
    if !state.expanded.insert(id) && !tree.children(id).is_empty() {
        state.selected_idx += 1;
    }
}

fn collapse_or_ascend(state: &mut UiState) {
    let Some(id) = state.cursor_node() else {
        return;
    };
    if state.expanded.remove(&id) {
        return;
    }
    if let Some(parent) = state.session.tree().parent(id) {
        state.reveal(parent);
    }
}

fn handle_mouse(
    state: &mut UiState,
    mouse: MouseEvent,
) {
    let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
        return;
    };
    let Some(area) = state.list_area else {
        return;
    };
    if mouse.row < area.y
        || mouse.row >= area.y + area.height
        || mouse.column < area.x
        || mouse.column >= area.x + area.width
    {
        return;
    }
    let idx = state.scroll_offset + (mouse.row - area.y) as usize;
    if let Some(id) = state.visible_rows().get(idx).copied() {
        state.selected_idx = idx;
        state.session.toggle(id);
    }
}
