use crate::context::tree::{NodeId, Tree};

/// Aggregate of a directory's direct children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildState {
    None,
    All,
    Mixed,
}

/// Per-node selection flags for one [`Tree`].
///
/// Every mutating call leaves all flags consistent before it returns:
/// toggling a directory overwrites its whole subtree, and every toggle
/// re-aggregates the ancestor chain. Aggregation is lossy on purpose: a
/// directory whose children are mixed reads as selected, exactly like a
/// fully selected one.
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    flags: Vec<bool>,
}

impl SelectionModel {
    /// All flags cleared, one per node of `tree`.
    pub fn new(tree: &Tree) -> Self {
        Self {
            flags: vec![false; tree.len()],
        }
    }

    fn slot(
        &self,
        tree: &Tree,
        id: NodeId,
    ) -> Option<usize> {
        (tree.contains(id) && id.index() < self.flags.len()).then_some(id.index())
    }

    pub fn is_selected(
        &self,
        tree: &Tree,
        id: NodeId,
    ) -> bool {
        self.slot(tree, id).is_some_and(|i| self.flags[i])
    }

    /// Number of selected nodes, directories included.
    pub fn selected_count(&self) -> usize {
        self.flags.iter().filter(|f| **f).count()
    }

    /// Flips one node, pushes the new value through its subtree, then
    /// re-aggregates its ancestors. Ids from another tree are ignored.
    pub fn toggle(
        &mut self,
        tree: &Tree,
        id: NodeId,
    ) {
        let Some(i) = self.slot(tree, id) else {
            tracing::debug!("Ignoring toggle of stale node {:?}", id);
            return;
        };
        let value = !self.flags[i];
        self.propagate_down(tree, id, value);
        if let Some(parent) = tree.parent(id) {
            self.propagate_up(tree, parent);
        }
    }

    /// Sets `value` on the node and every descendant.
    pub fn propagate_down(
        &mut self,
        tree: &Tree,
        id: NodeId,
        value: bool,
    ) {
        if self.slot(tree, id).is_none() {
            return;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            self.flags[current.index()] = value;
            stack.extend_from_slice(tree.children(current));
        }
    }

    /// Recomputes the node from its direct children, then walks up to the
    /// root doing the same. Leaves keep their value.
    pub fn propagate_up(
        &mut self,
        tree: &Tree,
        id: NodeId,
    ) {
        let mut cursor = self.slot(tree, id).map(|_| id);
        while let Some(current) = cursor {
            match self.child_state(tree, current) {
                Some(ChildState::All) | Some(ChildState::Mixed) => {
                    self.flags[current.index()] = true;
                }
                Some(ChildState::None) => self.flags[current.index()] = false,
                None => {}
            }
            cursor = tree.parent(current);
        }
    }

    /// Applies `value` to every node under every root.
    pub fn set_all(
        &mut self,
        tree: &Tree,
        value: bool,
    ) {
        for root in tree.roots() {
            self.propagate_down(tree, *root, value);
        }
    }

    /// Aggregate of the node's direct children, `None` for childless nodes.
    pub fn child_state(
        &self,
        tree: &Tree,
        id: NodeId,
    ) -> Option<ChildState> {
        let children = tree.children(id);
        if children.is_empty() {
            return None;
        }
        let selected = children
            .iter()
            .filter(|c| self.is_selected(tree, **c))
            .count();
        Some(if selected == 0 {
            ChildState::None
        } else if selected == children.len() {
            ChildState::All
        } else {
            ChildState::Mixed
        })
    }
}
