use crate::ui::tui_state::{Mode, UiState, adjust_scroll_and_slice};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

/// Renders the TUI given the current state, updating scroll offsets.
pub fn render(
    frame: &mut Frame,
    state: &mut UiState,
) {
    // Layout: header (3 lines), tree area, then prompt/help bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let selected_count = state.session.selection().selected_count();
    let title = format!(
        "{} ({selected_count} selected)",
        state.session.base().display()
    );
    let header = Paragraph::new(Line::from(vec![
        Span::styled("Base: ", Style::default().fg(Color::Yellow)),
        Span::raw(title),
    ]))
    .block(Block::default().borders(Borders::ALL).title("context-select"));
    frame.render_widget(header, chunks[0]);

    let area = chunks[1];
    let max_lines = area.height.saturating_sub(2) as usize;
    let rows = state.visible_rows();
    state.clamp_cursor();
    state.list_area = Some(area.inner(ratatui::layout::Margin {
        vertical: 1,
        horizontal: 1,
    }));

    let items: Vec<ListItem> = if rows.is_empty() || max_lines == 0 {
        Vec::new()
    } else {
        let (offset, end) = adjust_scroll_and_slice(
            &mut state.selected_idx,
            &mut state.scroll_offset,
            max_lines,
            rows.len(),
        );
        rows[offset..end]
            .iter()
            .map(|&id| {
                let label = state.row_label(id);
                let style = if state.session.is_selected(id) {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(Span::styled(label, style)))
            })
            .collect()
    };

    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(state.selected_idx.saturating_sub(state.scroll_offset)));
    }
    let widget = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Files"))
        .highlight_style(Style::default().bg(Color::Blue).add_modifier(Modifier::BOLD));
    frame.render_stateful_widget(widget, area, &mut list_state);

    let bottom = match state.mode {
        Mode::Browse => {
            let line = match &state.message {
                Some(msg) => Line::from(Span::styled(
                    msg.clone(),
                    Style::default().fg(Color::Cyan),
                )),
                None => help_line(),
            };
            Paragraph::new(line).block(Block::default().borders(Borders::ALL))
        }
        mode => {
            let title = match mode {
                Mode::Search => "Search (Enter to confirm, Esc to cancel)",
                Mode::Naming => "Output file name (Enter to export, Esc to cancel)",
                _ => "Open directory (Enter to open, Esc to cancel)",
            };
            Paragraph::new(state.input.as_str())
                .block(Block::default().borders(Borders::ALL).title(title))
        }
    };
    frame.render_widget(bottom, chunks[2]);
}

fn help_line() -> Line<'static> {
    let keys = [
        "↑/↓: Move  ",
        "←/→: Fold  ",
        "Space: Toggle  ",
        "a/A: All/None  ",
        "/: Search  ",
        "o: Open  ",
        "e: Export  ",
        "q: Quit",
    ];
    Line::from(
        keys.iter()
            .map(|k| Span::styled(*k, Style::default().fg(Color::Yellow)))
            .collect::<Vec<_>>(),
    )
}
