use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::context::export::{ExportOutcome, Exporter, collect_selected_paths};
use crate::context::selection::SelectionModel;
use crate::context::tree::{NodeId, Tree, TreeBuilder, check_base};

/// Base directory, its tree and the selection over it. Opening a new base
/// replaces tree and selection together.
#[derive(Debug)]
pub struct Session {
    builder: TreeBuilder,
    exporter: Exporter,
    tree: Tree,
    selection: SelectionModel,
}

impl Session {
    pub fn new(
        builder: TreeBuilder,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        let tree = Tree::empty(PathBuf::new());
        let selection = SelectionModel::new(&tree);
        Self {
            exporter: Exporter::new(builder.clone(), output_root),
            builder,
            tree,
            selection,
        }
    }

    /// Builds a fresh tree for `base`. On failure the current tree stays.
    pub fn open(
        &mut self,
        base: &Path,
    ) -> Result<()> {
        check_base(base)?;
        let base = dunce::canonicalize(base)
            .with_context(|| format!("cannot open base directory {}", base.display()))?;
        let tree = self.builder.build(&base)?;
        debug!("Opened {:?} ({} nodes)", base, tree.len());
        self.selection = SelectionModel::new(&tree);
        self.tree = tree;
        Ok(())
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn base(&self) -> &Path {
        self.tree.base()
    }

    pub fn is_selected(
        &self,
        id: NodeId,
    ) -> bool {
        self.selection.is_selected(&self.tree, id)
    }

    pub fn toggle(
        &mut self,
        id: NodeId,
    ) {
        self.selection.toggle(&self.tree, id);
    }

    pub fn set_all(
        &mut self,
        value: bool,
    ) {
        self.selection.set_all(&self.tree, value);
    }

    /// Toggles the node at `rel` (relative to the base). Returns false when
    /// no such node is in the tree.
    pub fn toggle_path(
        &mut self,
        rel: &Path,
    ) -> bool {
        match self.tree.find(rel) {
            Some(id) => {
                self.toggle(id);
                true
            }
            None => {
                warn!("{} is not in the tree; ignoring", rel.display());
                false
            }
        }
    }

    pub fn selected_paths(&self) -> Vec<PathBuf> {
        collect_selected_paths(&self.tree, &self.selection)
    }

    pub fn export<F>(
        &self,
        prompt: F,
    ) -> Result<ExportOutcome>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        self.exporter.export(&self.tree, &self.selection, prompt)
    }
}
