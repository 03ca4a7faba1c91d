use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use path_slash::PathExt;
use tracing::{info, warn};

use crate::constants::{
    CONTEXTS_DIR, DEFAULT_OUTPUT_EXTENSION, DEFAULT_OUTPUT_NAME, FILES_HEADER, STRUCTURE_HEADER,
};
use crate::context::selection::SelectionModel;
use crate::context::structure;
use crate::context::tree::{Tree, TreeBuilder};
use crate::tokenizer;

/// What happened to an export request.
#[derive(Debug)]
pub enum ExportOutcome {
    NothingSelected,
    Cancelled,
    Written(ExportReport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub files: usize,
    pub unreadable: usize,
    pub tokens: usize,
}

/// Selected paths in depth-first order. Directories and files are collected
/// independently, a selected directory is listed alongside its children.
pub fn collect_selected_paths(
    tree: &Tree,
    selection: &SelectionModel,
) -> Vec<PathBuf> {
    tree.depth_first()
        .into_iter()
        .filter(|id| selection.is_selected(tree, *id))
        .filter_map(|id| tree.absolute_path(id))
        .collect()
}

/// Trims the name, falls back to the default name and appends `.txt` when
/// no extension was given. Only the final path component is kept.
pub fn normalize_file_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let Some(name) = Path::new(trimmed)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
    else {
        return DEFAULT_OUTPUT_NAME.to_string();
    };
    if Path::new(&name).extension().is_some() {
        name
    } else {
        format!("{name}.{DEFAULT_OUTPUT_EXTENSION}")
    }
}

/// Assembled artifact text plus per-file bookkeeping.
#[derive(Debug)]
pub struct Artifact {
    pub text: String,
    pub files: usize,
    pub unreadable: usize,
}

/// Lays out the header, the structure listing and every selected regular
/// file. A file that cannot be read as UTF-8 becomes a placeholder line.
pub fn build_artifact(
    base: &Path,
    structure: &str,
    paths: &[PathBuf],
) -> Artifact {
    let mut text = String::new();
    text.push_str(STRUCTURE_HEADER);
    text.push_str(structure);
    text.push_str(FILES_HEADER);

    let mut files = 0usize;
    let mut unreadable = 0usize;
    for path in paths.iter().filter(|p| p.is_file()) {
        match fs::read_to_string(path) {
            Ok(contents) => {
                let rel = path
                    .strip_prefix(base)
                    .unwrap_or(path.as_path())
                    .to_slash_lossy()
                    .into_owned();
                text.push_str(&format!("\n\n==== {rel} ====\n"));
                text.push_str(&contents);
                files += 1;
            }
            Err(e) => {
                warn!("Could not read {:?}: {e}", path);
                text.push_str(&format!("\n\n[Error al leer {}]\n", path.display()));
                unreadable += 1;
            }
        }
    }
    Artifact {
        text,
        files,
        unreadable,
    }
}

/// Writes selections out under `<output_root>/contexts`.
#[derive(Debug, Clone)]
pub struct Exporter {
    builder: TreeBuilder,
    output_root: PathBuf,
}

impl Exporter {
    pub fn new(
        builder: TreeBuilder,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            builder,
            output_root: output_root.into(),
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_root.join(CONTEXTS_DIR)
    }

    /// Runs one export. `prompt` receives the default file name and returns
    /// the user's choice, or `None` to cancel. It is not called when nothing
    /// is selected.
    pub fn export<F>(
        &self,
        tree: &Tree,
        selection: &SelectionModel,
        prompt: F,
    ) -> Result<ExportOutcome>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let paths = collect_selected_paths(tree, selection);
        if paths.is_empty() {
            return Ok(ExportOutcome::NothingSelected);
        }
        let Some(raw_name) = prompt(DEFAULT_OUTPUT_NAME) else {
            return Ok(ExportOutcome::Cancelled);
        };
        let name = normalize_file_name(&raw_name);

        let dir = self.output_dir();
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
        let dest = dir.join(name);

        let structure = structure::render_from_disk(&self.builder, tree.base());
        let artifact = build_artifact(tree.base(), &structure, &paths);
        fs::write(&dest, &artifact.text)
            .with_context(|| format!("writing {}", dest.display()))?;

        let report = ExportReport {
            path: dest,
            files: artifact.files,
            unreadable: artifact.unreadable,
            tokens: tokenizer::count(&artifact.text),
        };
        info!(
            "Exported {} files ({} unreadable) to {:?}",
            report.files, report.unreadable, report.path
        );
        Ok(ExportOutcome::Written(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_handles_blank_and_bare_names() {
        assert_eq!(normalize_file_name("   "), DEFAULT_OUTPUT_NAME);
        assert_eq!(normalize_file_name(" notes "), "notes.txt");
        assert_eq!(normalize_file_name("dump.md"), "dump.md");
        assert_eq!(normalize_file_name(".bashrc"), ".bashrc.txt");
    }

    #[test]
    fn normalize_drops_directories() {
        assert_eq!(normalize_file_name("../../etc/ctx"), "ctx.txt");
        assert_eq!(normalize_file_name(".."), DEFAULT_OUTPUT_NAME);
    }

    #[test]
    fn artifact_skips_directories_and_marks_failures() {
        let td = tempfile::tempdir().unwrap();
        let base = td.path();
        fs::create_dir(base.join("src")).unwrap();
        fs::write(base.join("src/ok.txt"), "fine").unwrap();
        fs::write(base.join("src/bad.txt"), [0xffu8, 0xfe, 0x00]).unwrap();

        let paths = vec![
            base.join("src"),
            base.join("src/bad.txt"),
            base.join("src/ok.txt"),
        ];
        let art = build_artifact(base, "├── src/\n", &paths);
        assert_eq!(art.files, 1);
        assert_eq!(art.unreadable, 1);
        let expected = format!(
            "### Directory Structure:\n\n├── src/\n\n\n### Files Content:\n\n\n[Error al leer {}]\n\n\n==== src/ok.txt ====\nfine",
            base.join("src/bad.txt").display()
        );
        assert_eq!(art.text, expected);
    }
}
