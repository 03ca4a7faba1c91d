use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use ignore::{DirEntry, WalkBuilder};
use tracing::{debug, warn};

use crate::constants::MAX_DEPTH;
use crate::context::filter::{EntryKind, PathFilter};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Opaque handle to a node. Handles carry the generation of the tree that
/// issued them, so a handle kept across a rebuild never resolves again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    generation: u64,
    index: usize,
}

impl NodeId {
    /// Position of the node in its tree's arena.
    pub fn index(self) -> usize {
        self.index
    }
}

/// One filesystem entry in the selection tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: OsString,
    pub kind: EntryKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub depth: usize,
}

impl Node {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn display_name(&self) -> String {
        self.name.to_string_lossy().into_owned()
    }
}

/// Arena of nodes mirroring the filtered directory structure under `base`.
#[derive(Debug, Clone)]
pub struct Tree {
    generation: u64,
    base: PathBuf,
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Tree {
    /// A tree with no nodes, e.g. before any directory was opened.
    pub fn empty(base: impl Into<PathBuf>) -> Self {
        Self {
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
            base: base.into(),
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Whether `id` was issued by this tree.
    pub fn contains(
        &self,
        id: NodeId,
    ) -> bool {
        id.generation == self.generation && id.index < self.nodes.len()
    }

    pub fn get(
        &self,
        id: NodeId,
    ) -> Option<&Node> {
        if self.contains(id) {
            self.nodes.get(id.index)
        } else {
            None
        }
    }

    pub fn parent(
        &self,
        id: NodeId,
    ) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(
        &self,
        id: NodeId,
    ) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// All node ids in arena order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|index| NodeId {
            generation: self.generation,
            index,
        })
    }

    /// Node ids in depth-first pre-order, roots in listing order.
    pub fn depth_first(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        order
    }

    /// Path of the node relative to the base directory.
    pub fn relative_path(
        &self,
        id: NodeId,
    ) -> Option<PathBuf> {
        let mut names: Vec<&OsStr> = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.get(current)?;
            names.push(&node.name);
            cursor = node.parent;
        }
        Some(names.into_iter().rev().collect())
    }

    /// Base directory joined with the chain of names down to the node.
    pub fn absolute_path(
        &self,
        id: NodeId,
    ) -> Option<PathBuf> {
        self.relative_path(id).map(|rel| self.base.join(rel))
    }

    /// Looks a node up by its path relative to the base directory.
    pub fn find(
        &self,
        rel: &Path,
    ) -> Option<NodeId> {
        let mut level: &[NodeId] = &self.roots;
        let mut found = None;
        for component in rel.components() {
            let name = match component {
                Component::CurDir => continue,
                Component::Normal(name) => name,
                _ => return None,
            };
            let id = *level
                .iter()
                .find(|id| self.get(**id).is_some_and(|n| n.name.as_os_str() == name))?;
            level = self.children(id);
            found = Some(id);
        }
        found
    }

    fn push(
        &mut self,
        name: OsString,
        kind: EntryKind,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = NodeId {
            generation: self.generation,
            index: self.nodes.len(),
        };
        let depth = match parent {
            Some(p) => self.nodes[p.index].depth + 1,
            None => 0,
        };
        self.nodes.push(Node {
            name,
            kind,
            parent,
            children: Vec::new(),
            depth,
        });
        match parent {
            Some(p) => self.nodes[p.index].children.push(id),
            None => self.roots.push(id),
        }
        id
    }
}

/// Why a base directory could not be opened.
#[derive(Debug)]
pub enum BaseDirReason {
    Missing,
    NotADirectory,
    Unreadable(io::Error),
}

#[derive(Debug)]
pub struct BaseDirError {
    pub path: PathBuf,
    pub reason: BaseDirReason,
}

impl fmt::Display for BaseDirError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match &self.reason {
            BaseDirReason::Missing => write!(f, "{} does not exist", self.path.display()),
            BaseDirReason::NotADirectory => {
                write!(f, "{} is not a directory", self.path.display())
            }
            BaseDirReason::Unreadable(e) => {
                write!(f, "cannot list {}: {}", self.path.display(), e)
            }
        }
    }
}

impl std::error::Error for BaseDirError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.reason {
            BaseDirReason::Unreadable(e) => Some(e),
            _ => None,
        }
    }
}

/// Walks a base directory into a [`Tree`], dropping whatever the
/// [`PathFilter`] excludes.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    filter: PathFilter,
    max_depth: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(PathFilter::default())
    }
}

impl TreeBuilder {
    pub fn new(filter: PathFilter) -> Self {
        Self {
            filter,
            max_depth: MAX_DEPTH,
        }
    }

    pub fn with_max_depth(
        mut self,
        max_depth: usize,
    ) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn build(
        &self,
        base: &Path,
    ) -> Result<Tree, BaseDirError> {
        check_base(base)?;
        let mut tree = Tree::empty(base);

        let filter = self.filter.clone();
        let walker = WalkBuilder::new(base)
            .standard_filters(false)
            .follow_links(true)
            .max_depth(Some(self.max_depth))
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                entry.depth() == 0 || !filter.excludes(entry.file_name(), kind_of(entry))
            })
            .build();

        // Directory ancestors of the entry being placed, one per depth level.
        let mut ancestors: Vec<NodeId> = Vec::new();
        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    report_walk_error(&err);
                    continue;
                }
            };
            let depth = entry.depth();
            if depth == 0 {
                continue;
            }
            ancestors.truncate(depth - 1);
            let kind = kind_of(&entry);
            let id = tree.push(
                entry.file_name().to_os_string(),
                kind,
                ancestors.last().copied(),
            );
            if kind == EntryKind::Directory {
                if depth == self.max_depth {
                    warn!(
                        "Not descending into {:?}: depth limit {} reached",
                        entry.path(),
                        self.max_depth
                    );
                }
                ancestors.push(id);
            }
        }

        debug!("Built tree of {} nodes under {:?}", tree.len(), base);
        Ok(tree)
    }
}

/// Fails unless `base` is an existing, listable directory.
pub fn check_base(base: &Path) -> Result<(), BaseDirError> {
    let fail = |reason| BaseDirError {
        path: base.to_path_buf(),
        reason,
    };
    match std::fs::metadata(base) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(fail(BaseDirReason::NotADirectory)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(fail(BaseDirReason::Missing)),
        Err(e) => return Err(fail(BaseDirReason::Unreadable(e))),
    }
    std::fs::read_dir(base)
        .map(|_| ())
        .map_err(|e| fail(BaseDirReason::Unreadable(e)))
}

fn kind_of(entry: &DirEntry) -> EntryKind {
    if entry.file_type().is_some_and(|ft| ft.is_dir()) {
        EntryKind::Directory
    } else {
        EntryKind::File
    }
}

fn report_walk_error(err: &ignore::Error) {
    if is_loop(err) {
        warn!("Skipping symlink loop: {err}");
        return;
    }
    match err.io_error() {
        // Unlistable directories stay in the tree with no children.
        Some(io) if io.kind() == io::ErrorKind::PermissionDenied => {
            debug!("Permission denied, treating as empty: {err}");
        }
        _ => warn!("Skipping unreadable entry: {err}"),
    }
}

fn is_loop(err: &ignore::Error) -> bool {
    match err {
        ignore::Error::Loop { .. } => true,
        ignore::Error::WithPath { err, .. }
        | ignore::Error::WithDepth { err, .. }
        | ignore::Error::WithLineNumber { err, .. } => is_loop(err),
        _ => false,
    }
}
