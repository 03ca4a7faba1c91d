use std::collections::HashSet;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use path_slash::PathBufExt;
use ratatui::layout::Rect;

use crate::context::tree::NodeId;
use crate::session::Session;

/// What keystrokes currently go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Search,
    Naming,
    Opening,
}

/// View state of the tree browser. Selection lives in the session; this
/// only tracks what is expanded, where the cursor is and what is typed.
pub struct UiState {
    pub session: Session,
    pub expanded: HashSet<NodeId>,
    pub mode: Mode,
    pub input: String,
    pub message: Option<String>,
    pub selected_idx: usize,
    pub scroll_offset: usize,
    /// Inner area of the tree list as last drawn, for mouse hit-testing.
    pub list_area: Option<Rect>,
}

impl UiState {
    pub fn new(session: Session) -> Self {
        UiState {
            session,
            expanded: HashSet::new(),
            mode: Mode::Browse,
            input: String::new(),
            message: None,
            selected_idx: 0,
            scroll_offset: 0,
            list_area: None,
        }
    }

    /// Forget view state tied to the previous tree.
    pub fn reset_view(&mut self) {
        self.expanded.clear();
        self.selected_idx = 0;
        self.scroll_offset = 0;
    }

    /// Rows currently shown, collapsed directories hide their subtree.
    pub fn visible_rows(&self) -> Vec<NodeId> {
        let tree = self.session.tree();
        let mut rows = Vec::new();
        let mut stack: Vec<NodeId> = tree.roots().iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            rows.push(id);
            if self.expanded.contains(&id) {
                stack.extend(tree.children(id).iter().rev().copied());
            }
        }
        rows
    }

    pub fn cursor_node(&self) -> Option<NodeId> {
        self.visible_rows().get(self.selected_idx).copied()
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.visible_rows().len();
        if len == 0 {
            self.selected_idx = 0;
        } else if self.selected_idx >= len {
            self.selected_idx = len - 1;
        }
    }

    /// Moves the cursor onto `id`, expanding every ancestor on the way.
    pub fn reveal(
        &mut self,
        id: NodeId,
    ) {
        let mut cursor = self.session.tree().parent(id);
        while let Some(parent) = cursor {
            self.expanded.insert(parent);
            cursor = self.session.tree().parent(parent);
        }
        if let Some(pos) = self.visible_rows().iter().position(|r| *r == id) {
            self.selected_idx = pos;
        }
    }

    /// Best fuzzy match of `query` against relative paths.
    pub fn search(
        &self,
        query: &str,
    ) -> Option<NodeId> {
        if query.is_empty() {
            return None;
        }
        let tree = self.session.tree();
        let matcher = SkimMatcherV2::default();
        let mut best: Option<(i64, NodeId)> = None;
        for id in tree.depth_first() {
            let Some(rel) = tree.relative_path(id) else {
                continue;
            };
            if let Some(score) = matcher.fuzzy_match(&rel.to_slash_lossy(), query)
                && best.is_none_or(|(s, _)| score > s)
            {
                best = Some((score, id));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Checkbox label for one row: indent, fold marker, mark, name.
    pub fn row_label(
        &self,
        id: NodeId,
    ) -> String {
        let tree = self.session.tree();
        let Some(node) = tree.get(id) else {
            return String::new();
        };
        let indent = "  ".repeat(node.depth);
        let fold = if !node.is_dir() {
            "  "
        } else if self.expanded.contains(&id) {
            "▾ "
        } else {
            "▸ "
        };
        let mark = if self.session.is_selected(id) {
            "[✔]"
        } else {
            "[ ]"
        };
        let slash = if node.is_dir() { "/" } else { "" };
        format!("{indent}{fold}{mark} {}{slash}", node.display_name())
    }
}

/// Adjust scroll offset and compute visible range
pub fn adjust_scroll_and_slice(
    selected_idx: &mut usize,
    scroll_offset: &mut usize,
    max_lines: usize,
    data_len: usize,
) -> (usize, usize) {
    if *selected_idx < *scroll_offset {
        *scroll_offset = *selected_idx;
    } else if *selected_idx >= *scroll_offset + max_lines {
        *scroll_offset = selected_idx.saturating_sub(max_lines).saturating_add(1);
    }
    let end_idx = (*scroll_offset + max_lines).min(data_len);
    (*scroll_offset, end_idx)
}
