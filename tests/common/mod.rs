#![allow(dead_code)]
use assert_fs::{TempDir, prelude::*};
use context_select::{Session, tree::TreeBuilder};
use std::path::Path;

/// Builds a fixture tree:
/// root/
///   .git/config        (filtered by name)
///   README.md
///   src/a.py
///   src/b.png          (filtered by extension)
pub fn scenario_fs() -> TempDir {
    let td = TempDir::new().unwrap();
    td.child(".git").create_dir_all().unwrap();
    td.child(".git/config").write_str("[core]\n").unwrap();
    td.child("README.md").write_str("# readme\n").unwrap();
    td.child("src").create_dir_all().unwrap();
    td.child("src/a.py").write_str("print('a')\n").unwrap();
    td.child("src/b.png").write_binary(&[0x89, b'P', b'N', b'G']).unwrap();
    td
}

/// Session opened on `base`, exporting under `output_root`.
pub fn open_session(
    base: &Path,
    output_root: &Path,
) -> Session {
    let mut session = Session::new(TreeBuilder::default(), output_root);
    session.open(base).unwrap();
    session
}
