use crate::cli::Cli;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Application configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct Config {
    pub base: PathBuf,
    pub select_all: bool,
    pub select: Vec<PathBuf>,
    pub output_name: Option<String>,
    pub print_tree: bool,
    /// Directory the `contexts` folder is created in.
    pub output_root: PathBuf,
}

impl Config {
    /// Parse CLI arguments into a Config
    pub fn from_cli() -> Result<Self> {
        Self::from_args(Cli::parse())
    }

    pub fn from_args(cli: Cli) -> Result<Self> {
        let output_root = std::env::current_dir().context("cannot determine working directory")?;
        Ok(Config {
            base: cli.path,
            select_all: cli.all,
            select: cli.select,
            output_name: cli.output,
            print_tree: cli.print_tree,
            output_root,
        })
    }

    /// True when the run should not open the TUI.
    pub fn is_batch(&self) -> bool {
        self.select_all || !self.select.is_empty() || self.print_tree
    }
}
