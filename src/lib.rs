pub mod batch;
pub mod cli;
pub mod config;
pub mod constants;
pub mod context;
pub mod session;
pub mod tokenizer;
pub mod ui;

pub use context::{export, filter, selection, structure, tree};
pub use session::Session;
