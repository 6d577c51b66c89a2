use super::{EnterOutcome, ListOptions, Navigator};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn names(nav: &Navigator) -> Vec<String> {
    nav.view()
        .entries()
        .iter()
        .map(|entry| entry.name().to_string())
        .collect()
}

fn sample_tree() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("b.txt"), "b").expect("write b");
    fs::write(dir.path().join("a.txt"), "a").expect("write a");
    fs::create_dir(dir.path().join("sub")).expect("mkdir sub");
    dir
}

#[test]
fn listing_orders_directories_before_files() {
    let dir = sample_tree();
    let nav = Navigator::open(dir.path(), ListOptions::default()).expect("open");
    assert_eq!(names(&nav), vec!["sub", "a.txt", "b.txt"]);
    assert_eq!(nav.view().selected_index(), 0);
}

#[test]
fn selection_clamps_at_both_ends() {
    let dir = sample_tree();
    let mut nav = Navigator::open(dir.path(), ListOptions::default()).expect("open");
    nav.select_previous();
    assert_eq!(nav.view().selected_index(), 0);
    for _ in 0..10 {
        nav.select_next();
    }
    assert_eq!(nav.view().selected_index(), 2);
    nav.select_first();
    assert_eq!(nav.view().selected_index(), 0);
    nav.select_last();
    assert_eq!(nav.view().selected_index(), 2);
}

#[test]
fn enter_directory_then_touch_shows_in_order() {
    let dir = sample_tree();
    let mut nav = Navigator::open(dir.path(), ListOptions::default()).expect("open");

    assert!(matches!(nav.enter(), EnterOutcome::Entered));
    assert_eq!(nav.current_dir(), dir.path().join("sub"));
    assert!(nav.view().entries().is_empty());

    nav.go_up().expect("go up");
    assert_eq!(nav.current_dir(), dir.path());
    assert_eq!(nav.view().selected().map(|e| e.name()), Some("sub"));

    fs::write(dir.path().join("c.txt"), "").expect("touch");
    nav.refresh().expect("refresh");
    assert_eq!(names(&nav), vec!["sub", "a.txt", "b.txt", "c.txt"]);
}

#[test]
fn enter_file_requests_editor() {
    let dir = sample_tree();
    let mut nav = Navigator::open(dir.path(), ListOptions::default()).expect("open");
    nav.select_next();
    match nav.enter() {
        EnterOutcome::OpenFile(path) => assert_eq!(path, dir.path().join("a.txt")),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(nav.current_dir(), dir.path());
}

#[test]
fn enter_symlink_to_directory_follows_it() {
    let dir = sample_tree();
    std::os::unix::fs::symlink(dir.path().join("sub"), dir.path().join("zlink"))
        .expect("symlink");
    let mut nav = Navigator::open(dir.path(), ListOptions::default()).expect("open");
    nav.select_last();
    assert_eq!(nav.view().selected().map(|e| e.name()), Some("zlink"));
    assert!(matches!(nav.enter(), EnterOutcome::Entered));
    assert_eq!(nav.current_dir(), dir.path().join("zlink"));
}

#[test]
fn enter_dangling_symlink_is_not_openable() {
    let dir = TempDir::new().expect("temp dir");
    std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("ln")).expect("symlink");
    let mut nav = Navigator::open(dir.path(), ListOptions::default()).expect("open");
    assert!(matches!(
        nav.enter(),
        EnterOutcome::NotOpenable { kind: None, .. }
    ));
}

#[test]
fn enter_unreadable_directory_leaves_view() {
    let dir = sample_tree();
    let mut nav = Navigator::open(dir.path(), ListOptions::default()).expect("open");
    fs::remove_dir(dir.path().join("sub")).expect("remove sub");
    // Listing still shows `sub`, but it no longer exists on disk.
    let before = names(&nav);
    assert!(matches!(nav.enter(), EnterOutcome::Unreadable(_)));
    assert_eq!(nav.current_dir(), dir.path());
    assert_eq!(names(&nav), before);
}

#[test]
fn non_utf8_names_keep_their_on_disk_path() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = TempDir::new().expect("temp dir");
    let raw = dir.path().join(OsStr::from_bytes(b"bad\xff.txt"));
    fs::write(&raw, "x").expect("write");
    let mut nav = Navigator::open(dir.path(), ListOptions::default()).expect("open");
    assert_eq!(names(&nav), vec!["bad\u{FFFD}.txt"]);
    assert_eq!(nav.view().selected_path(), Some(raw.clone()));

    match nav.enter() {
        EnterOutcome::OpenFile(path) => assert_eq!(path, raw),
        other => panic!("unexpected outcome: {other:?}"),
    }

    nav.delete_selected().expect("delete");
    assert!(!raw.exists());
    assert!(names(&nav).is_empty());
}

#[test]
fn go_up_selects_directory_just_left() {
    let dir = sample_tree();
    fs::create_dir(dir.path().join("zz")).expect("mkdir zz");
    let mut nav = Navigator::open(&dir.path().join("zz"), ListOptions::default()).expect("open");
    assert!(nav.go_up().expect("go up"));
    assert_eq!(nav.current_dir(), dir.path());
    let selected = nav.view().selected().map(|entry| entry.name().to_string());
    assert_eq!(selected.as_deref(), Some("zz"));
}

#[test]
fn go_up_at_root_is_idempotent() {
    let mut nav = Navigator::open(Path::new("/"), ListOptions::default()).expect("open root");
    let before = names(&nav);
    let index = nav.view().selected_index();
    assert!(!nav.go_up().expect("go up"));
    assert!(!nav.go_up().expect("go up again"));
    assert_eq!(nav.current_dir(), Path::new("/"));
    assert_eq!(names(&nav), before);
    assert_eq!(nav.view().selected_index(), index);
}

#[test]
fn delete_removes_and_relists() {
    let dir = sample_tree();
    fs::write(dir.path().join("sub").join("inner"), "x").expect("write inner");
    let mut nav = Navigator::open(dir.path(), ListOptions::default()).expect("open");
    let removed = nav.delete_selected().expect("delete");
    assert_eq!(removed, "sub");
    assert_eq!(names(&nav), vec!["a.txt", "b.txt"]);
    assert!(!dir.path().join("sub").exists());
}

#[test]
fn delete_last_entry_clamps_selection() {
    let dir = sample_tree();
    let mut nav = Navigator::open(dir.path(), ListOptions::default()).expect("open");
    nav.select_last();
    nav.delete_selected().expect("delete");
    assert_eq!(nav.view().selected_index(), 1);
    assert_eq!(nav.view().selected().map(|e| e.name()), Some("a.txt"));
}

#[test]
fn delete_refuses_parent_link() {
    let dir = sample_tree();
    let options = ListOptions {
        show_hidden: true,
        parent_link: true,
    };
    let mut nav = Navigator::open(dir.path(), options).expect("open");
    assert!(nav.view().selected().expect("entry").is_parent_link());
    assert!(nav.delete_selected().is_err());
    assert!(dir.path().exists());
}

#[test]
fn parent_link_enter_goes_up() {
    let dir = sample_tree();
    let options = ListOptions {
        show_hidden: true,
        parent_link: true,
    };
    let mut nav = Navigator::open(&dir.path().join("sub"), options).expect("open");
    assert!(matches!(nav.enter(), EnterOutcome::Entered));
    assert_eq!(nav.current_dir(), dir.path());
    assert_eq!(nav.view().selected().map(|e| e.name()), Some("sub"));
}

#[test]
fn refresh_keeps_order_invariant_after_external_changes() {
    let dir = sample_tree();
    let mut nav = Navigator::open(dir.path(), ListOptions::default()).expect("open");
    fs::create_dir(dir.path().join("aaa")).expect("mkdir");
    fs::write(dir.path().join("0.txt"), "").expect("write");
    nav.refresh().expect("refresh");
    let entries = nav.view().entries();
    let first_file = entries
        .iter()
        .position(|entry| !entry.kind().is_directory())
        .unwrap_or(entries.len());
    assert!(entries[..first_file].iter().all(|e| e.kind().is_directory()));
    assert!(entries[first_file..].iter().all(|e| !e.kind().is_directory()));
    assert!(entries[..first_file].windows(2).all(|w| w[0].name() <= w[1].name()));
    assert!(entries[first_file..].windows(2).all(|w| w[0].name() <= w[1].name()));
}
