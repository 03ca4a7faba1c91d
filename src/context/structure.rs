use std::path::Path;

use crate::constants::{TREE_BRANCH, TREE_INDENT};
use crate::context::tree::{Tree, TreeBuilder};

/// Renders the indented listing of a tree, one line per node:
/// `"│   " * depth + "├── " + name`, directories suffixed with `/`.
pub fn render(tree: &Tree) -> String {
    let mut out = String::new();
    for id in tree.depth_first() {
        let Some(node) = tree.get(id) else {
            continue;
        };
        out.push_str(&TREE_INDENT.repeat(node.depth));
        out.push_str(TREE_BRANCH);
        out.push_str(&node.name.to_string_lossy());
        if node.is_dir() {
            out.push('/');
        }
        out.push('\n');
    }
    out
}

/// Walks `base` again and renders what is on disk right now, with the same
/// filter the interactive tree was built with. An unreadable base renders
/// as nothing.
pub fn render_from_disk(
    builder: &TreeBuilder,
    base: &Path,
) -> String {
    match builder.build(base) {
        Ok(tree) => render(&tree),
        Err(e) => {
            tracing::warn!("Could not render structure: {e}");
            String::new()
        }
    }
}
