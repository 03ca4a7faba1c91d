use std::ffi::OsStr;
use std::path::Path;

/// Tooling and artifact directories that never show up in the tree.
pub const EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "__pycache__",
    "node_modules",
    ".venv",
    "env",
    ".env",
    ".tox",
    "build",
    "dist",
    ".pytest_cache",
    ".angular",
];

/// Lockfiles and secrets.
pub const EXCLUDED_FILES: &[&str] = &[
    ".env",
    "package-lock.json",
    "poetry.lock",
    "Pipfile.lock",
    ".coverage",
];

/// Binary and media extensions, lowercase, without the leading dot.
pub const EXCLUDED_EXTENSIONS: &[&str] = &[
    "pyc", "exe", "dll", "so", "zip", "tar", "gz", "rar", "png", "jpg", "jpeg", "gif", "svg",
    "ico", "pdf", "mp3", "mp4", "mov", "avi", "flv", "webm",
];

/// Kind of entry handed to [`PathFilter::excludes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Static exclusion lists shared by the tree builder and the structure
/// renderer, so both agree on what exists.
#[derive(Debug, Clone)]
pub struct PathFilter {
    dirs: &'static [&'static str],
    files: &'static [&'static str],
    extensions: &'static [&'static str],
}

impl Default for PathFilter {
    fn default() -> Self {
        Self {
            dirs: EXCLUDED_DIRS,
            files: EXCLUDED_FILES,
            extensions: EXCLUDED_EXTENSIONS,
        }
    }
}

impl PathFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the entry must be left out of the tree entirely.
    ///
    /// Directory names are matched against every entry, so a file named
    /// `build` is dropped as well. File names and extensions only apply to
    /// files. Names match exactly; extensions are compared lowercased.
    pub fn excludes(
        &self,
        name: &OsStr,
        kind: EntryKind,
    ) -> bool {
        let Some(name) = name.to_str() else {
            // Non UTF-8 names cannot match any of the lists.
            return kind == EntryKind::File && self.excludes_extension(Path::new(name));
        };
        if self.dirs.contains(&name) {
            return true;
        }
        match kind {
            EntryKind::Directory => false,
            EntryKind::File => {
                self.files.contains(&name) || self.excludes_extension(Path::new(name))
            }
        }
    }

    fn excludes_extension(
        &self,
        name: &Path,
    ) -> bool {
        name.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.extensions.contains(&ext.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn excluded(
        name: &str,
        kind: EntryKind,
    ) -> bool {
        PathFilter::new().excludes(OsStr::new(name), kind)
    }

    #[test]
    fn tooling_dirs_are_excluded() {
        assert!(excluded(".git", EntryKind::Directory));
        assert!(excluded("node_modules", EntryKind::Directory));
        assert!(!excluded("src", EntryKind::Directory));
    }

    #[test]
    fn dir_names_also_hide_files() {
        assert!(excluded("build", EntryKind::File));
        assert!(excluded(".env", EntryKind::File));
    }

    #[test]
    fn file_names_do_not_hide_dirs() {
        assert!(!excluded("poetry.lock", EntryKind::Directory));
        assert!(excluded("poetry.lock", EntryKind::File));
    }

    #[test]
    fn extensions_are_case_insensitive() {
        assert!(excluded("logo.PNG", EntryKind::File));
        assert!(excluded("bundle.tar.gz", EntryKind::File));
        assert!(!excluded("main.rs", EntryKind::File));
        // Directories are never filtered by extension.
        assert!(!excluded("assets.png", EntryKind::Directory));
    }

    #[test]
    fn names_match_exactly() {
        assert!(!excluded(".GIT", EntryKind::Directory));
        assert!(!excluded("my.git", EntryKind::Directory));
        // dotfiles have no extension
        assert!(!excluded(".gitignore", EntryKind::File));
    }
}
