pub mod export;
pub mod filter;
pub mod selection;
pub mod structure;
pub mod tree;

pub use export::{ExportOutcome, ExportReport, Exporter};
pub use filter::{EntryKind, PathFilter};
pub use selection::{ChildState, SelectionModel};
pub use tree::{BaseDirError, Node, NodeId, Tree, TreeBuilder};
