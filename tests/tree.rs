mod common;
use assert_fs::prelude::*;
use common::scenario_fs;
use context_select::structure::{render, render_from_disk};
use context_select::tree::TreeBuilder;
use std::path::Path;

#[test]
fn filtered_entries_never_become_nodes() {
    let td = scenario_fs();
    let tree = TreeBuilder::default().build(td.path()).unwrap();

    assert_eq!(tree.len(), 3);
    assert!(tree.find(Path::new("src")).is_some());
    assert!(tree.find(Path::new("src/a.py")).is_some());
    assert!(tree.find(Path::new("README.md")).is_some());
    assert!(tree.find(Path::new("src/b.png")).is_none());
    assert!(tree.find(Path::new(".git")).is_none());
}

#[test]
fn every_child_links_back_to_its_parent_once() {
    let td = scenario_fs();
    td.child("src/nested/deeper").create_dir_all().unwrap();
    td.child("src/nested/deeper/x.rs").write_str("").unwrap();
    let tree = TreeBuilder::default().build(td.path()).unwrap();

    for id in tree.ids() {
        match tree.parent(id) {
            Some(parent) => {
                let hits = tree.children(parent).iter().filter(|c| **c == id).count();
                assert_eq!(hits, 1);
            }
            None => assert!(tree.roots().contains(&id)),
        }
    }
    assert_eq!(tree.depth_first().len(), tree.len());
}

#[test]
fn structure_rendering_matches_tree() {
    let td = scenario_fs();
    let tree = TreeBuilder::default().build(td.path()).unwrap();
    insta::assert_snapshot!(render(&tree), @r"
    ├── README.md
    ├── src/
    │   ├── a.py
    ");
}

#[test]
fn structure_is_regenerated_from_disk() {
    let td = scenario_fs();
    let builder = TreeBuilder::default();
    let tree = builder.build(td.path()).unwrap();

    td.child("src/new.rs").write_str("fn main() {}\n").unwrap();
    td.child("node_modules").create_dir_all().unwrap();
    td.child("node_modules/x.js").write_str("").unwrap();

    let fresh = render_from_disk(&builder, td.path());
    assert!(fresh.contains("│   ├── new.rs\n"));
    assert!(!fresh.contains("node_modules"));
    assert!(!render(&tree).contains("new.rs"));
}
