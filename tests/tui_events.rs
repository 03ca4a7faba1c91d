mod common;
use common::{open_session, scenario_fs};
use context_select::constants::NOTHING_SELECTED;
use context_select::ui::tui_events::{UiMsg, handle_event};
use context_select::ui::tui_state::{Mode, UiState};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::path::Path;

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn press(
    state: &mut UiState,
    codes: &[KeyCode],
) {
    for code in codes {
        handle_event(state, key(*code));
    }
}

#[test]
fn rows_start_collapsed_and_expand_on_right() {
    let td = scenario_fs();
    let out = tempfile::tempdir().unwrap();
    let mut state = UiState::new(open_session(td.path(), out.path()));

    assert_eq!(state.visible_rows().len(), 2);
    press(&mut state, &[KeyCode::Down, KeyCode::Right]);
    let rows = state.visible_rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(state.row_label(rows[1]), "▾ [ ] src/");
    assert_eq!(state.row_label(rows[2]), "    [ ] a.py");

    press(&mut state, &[KeyCode::Right]);
    assert_eq!(state.cursor_node(), Some(rows[2]));
    press(&mut state, &[KeyCode::Left]);
    assert_eq!(state.cursor_node(), Some(rows[1]));
    press(&mut state, &[KeyCode::Left]);
    assert_eq!(state.visible_rows().len(), 2);
}

#[test]
fn space_toggles_and_marks_labels() {
    let td = scenario_fs();
    let out = tempfile::tempdir().unwrap();
    let mut state = UiState::new(open_session(td.path(), out.path()));

    press(&mut state, &[KeyCode::Down, KeyCode::Char(' ')]);
    let src = state.cursor_node().unwrap();
    assert_eq!(state.row_label(src), "▸ [✔] src/");
    let a = state.session.tree().find(Path::new("src/a.py")).unwrap();
    assert!(state.session.is_selected(a));

    press(&mut state, &[KeyCode::Char('a')]);
    assert_eq!(state.session.selection().selected_count(), 3);
    press(&mut state, &[KeyCode::Char('u')]);
    assert_eq!(state.session.selection().selected_count(), 0);
}

#[test]
fn export_without_selection_shows_message() {
    let td = scenario_fs();
    let out = tempfile::tempdir().unwrap();
    let mut state = UiState::new(open_session(td.path(), out.path()));

    press(&mut state, &[KeyCode::Char('e')]);
    assert_eq!(state.mode, Mode::Browse);
    assert_eq!(state.message.as_deref(), Some(NOTHING_SELECTED));
}

#[test]
fn naming_prompt_exports_or_cancels() {
    let td = scenario_fs();
    let out = tempfile::tempdir().unwrap();
    let mut state = UiState::new(open_session(td.path(), out.path()));

    press(&mut state, &[KeyCode::Char(' '), KeyCode::Enter]);
    assert_eq!(state.mode, Mode::Naming);
    assert_eq!(state.input, "git_ingest_output.txt");
    press(&mut state, &[KeyCode::Esc]);
    assert_eq!(state.mode, Mode::Browse);
    assert!(!out.path().join("contexts").exists());

    press(&mut state, &[KeyCode::Enter]);
    state.input.clear();
    press(
        &mut state,
        &[KeyCode::Char('r'), KeyCode::Char('e'), KeyCode::Enter],
    );
    assert_eq!(state.mode, Mode::Browse);
    assert!(state.message.as_deref().unwrap().starts_with("Saved"));
    let written = std::fs::read_to_string(out.path().join("contexts/re.txt")).unwrap();
    assert!(written.contains("==== README.md ====\n# readme\n"));
}

#[test]
fn search_reveals_matching_node() {
    let td = scenario_fs();
    let out = tempfile::tempdir().unwrap();
    let mut state = UiState::new(open_session(td.path(), out.path()));

    press(
        &mut state,
        &[
            KeyCode::Char('/'),
            KeyCode::Char('a'),
            KeyCode::Char('.'),
            KeyCode::Char('p'),
            KeyCode::Char('y'),
        ],
    );
    let a = state.session.tree().find(Path::new("src/a.py")).unwrap();
    assert_eq!(state.cursor_node(), Some(a));
    press(&mut state, &[KeyCode::Enter]);
    assert_eq!(state.mode, Mode::Browse);
}

#[test]
fn opening_another_directory_resets_the_view() {
    let td = scenario_fs();
    let other = assert_fs::TempDir::new().unwrap();
    std::fs::write(other.path().join("only.txt"), "x").unwrap();
    let out = tempfile::tempdir().unwrap();
    let mut state = UiState::new(open_session(td.path(), out.path()));
    press(&mut state, &[KeyCode::Char('a'), KeyCode::Down, KeyCode::Right]);

    press(&mut state, &[KeyCode::Char('o')]);
    assert_eq!(state.mode, Mode::Opening);
    state.input = other.path().display().to_string();
    press(&mut state, &[KeyCode::Enter]);

    assert_eq!(state.visible_rows().len(), 1);
    assert_eq!(state.selected_idx, 0);
    assert!(state.expanded.is_empty());
    assert_eq!(state.session.selection().selected_count(), 0);
}

#[test]
fn q_quits() {
    let td = scenario_fs();
    let out = tempfile::tempdir().unwrap();
    let mut state = UiState::new(open_session(td.path(), out.path()));
    assert_eq!(
        handle_event(&mut state, key(KeyCode::Char('q'))),
        Some(UiMsg::Quit)
    );
}
