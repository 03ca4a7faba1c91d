use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "context-select")]
#[command(
    about = "Browse a directory tree, tick files and folders, and export the structure plus \
             selected file contents into a single text file under ./contexts."
)]
pub struct Cli {
    /// Base directory to browse, defaults to "."
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Select everything and export without opening the TUI.
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Toggle the entry at this path (relative to the base) and export
    /// without opening the TUI. Repeatable.
    #[arg(short = 's', long = "select")]
    pub select: Vec<PathBuf>,

    /// Output file name inside ./contexts (".txt" appended if no extension).
    #[arg(short = 'o', long = "output")]
    pub output: Option<String>,

    /// Print the directory structure to stdout and exit.
    #[arg(short = 't', long = "print-tree")]
    pub print_tree: bool,
}
