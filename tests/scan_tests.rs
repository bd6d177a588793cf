//! Integration tests for the remote directory scanner: reachability, the
//! extension allow-list, and the no-recursion rule.

use std::fs;

use tempfile::tempdir;

use sharesaver::scan::{has_allowed_extension, scan};

fn exts() -> Vec<String> {
    vec![".jpg".into(), ".png".into()]
}

#[test]
fn missing_directory_is_unreachable() {
    let tmp = tempdir().unwrap();
    let listing = scan(&tmp.path().join("absent"), &exts());
    assert!(!listing.reachable);
    assert!(listing.entries.is_empty());
}

#[test]
fn plain_file_path_is_unreachable() {
    let tmp = tempdir().unwrap();
    let file = tmp.path().join("not-a-dir");
    fs::write(&file, b"x").unwrap();

    let listing = scan(&file, &exts());
    assert!(!listing.reachable);
    assert!(listing.entries.is_empty());
}

#[test]
fn empty_directory_is_reachable_with_no_entries() {
    let tmp = tempdir().unwrap();
    let listing = scan(tmp.path(), &exts());
    assert!(listing.reachable);
    assert!(listing.entries.is_empty());
}

#[test]
fn scan_filters_by_extension_and_skips_subdirectories() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("a.jpg"), b"x").unwrap();
    fs::write(tmp.path().join("B.PNG"), b"x").unwrap();
    fs::write(tmp.path().join("notes.txt"), b"x").unwrap();
    fs::create_dir_all(tmp.path().join("nested")).unwrap();
    fs::write(tmp.path().join("nested").join("deep.jpg"), b"x").unwrap();

    let listing = scan(tmp.path(), &exts());
    assert!(listing.reachable);

    let mut names: Vec<&str> = listing.entries.keys().map(String::as_str).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["B.PNG", "a.jpg"]);

    let entry = &listing.entries["a.jpg"];
    assert_eq!(entry.name, "a.jpg");
    assert_eq!(entry.path, tmp.path().join("a.jpg"));
    assert!(entry.modified.is_some(), "mtime should be readable here");
}

#[test]
fn extension_predicate_is_case_insensitive() {
    let exts = exts();
    assert!(has_allowed_extension("photo.JPG", &exts));
    assert!(has_allowed_extension("photo.jpg", &exts));
    assert!(!has_allowed_extension("photo.TXT", &exts));
    assert!(!has_allowed_extension("photo", &exts));
}
