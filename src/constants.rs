// Centralized magic numbers & default values
pub const CONTEXTS_DIR: &str = "contexts";
pub const DEFAULT_OUTPUT_NAME: &str = "git_ingest_output.txt";
pub const DEFAULT_OUTPUT_EXTENSION: &str = "txt";

pub const STRUCTURE_HEADER: &str = "### Directory Structure:\n\n";
pub const FILES_HEADER: &str = "\n\n### Files Content:\n";
pub const TREE_INDENT: &str = "│   ";
pub const TREE_BRANCH: &str = "├── ";

/// Deepest directory level the tree builder descends into.
pub const MAX_DEPTH: usize = 256;

pub const NOTHING_SELECTED: &str = "Nothing selected: tick at least one file or folder.";
