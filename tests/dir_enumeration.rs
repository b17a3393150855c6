use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::ops::ControlFlow;

use assert_fs::prelude::*;
use assert_fs::TempDir;
use cfs::path_tools::join;
use cfs::{for_each_in_dir, Attr, DirectoryHandle, FsError, HandleState};

fn sample_tree() -> TempDir {
    let td = TempDir::new().unwrap();
    td.child("plain.txt").write_str("x").unwrap();
    td.child(".hidden").write_str("y").unwrap();
    td.child("archive.tar.gz").write_binary(&[0u8; 16]).unwrap();
    td.child("sub").create_dir_all().unwrap();
    td
}

#[test]
fn listing_matches_std_read_dir_plus_dot_entries() {
    let td = sample_tree();
    let mut dir = DirectoryHandle::open(td.path()).unwrap();

    let mut seen = BTreeSet::new();
    while let Some(entry) = dir.advance().unwrap() {
        assert!(seen.insert(entry.name().to_os_string()), "duplicate {:?}", entry.name());
    }
    assert_eq!(dir.state(), HandleState::Exhausted);
    dir.close().unwrap();

    assert!(seen.remove(&OsString::from(".")));
    assert!(seen.remove(&OsString::from("..")));
    let expected: BTreeSet<OsString> = fs::read_dir(td.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(seen, expected);
}

#[test]
fn entries_carry_path_and_attributes() {
    let td = sample_tree();
    let mut dir = DirectoryHandle::open(td.path()).unwrap();
    while let Some(entry) = dir.advance().unwrap() {
        assert_eq!(entry.path(), td.path().join(entry.name()));
        match entry.name().to_str().unwrap() {
            "plain.txt" | "archive.tar.gz" => assert_eq!(entry.attr(), Attr::REGULAR),
            ".hidden" => assert_eq!(entry.attr(), Attr::HIDDEN),
            "sub" => assert_eq!(entry.attr(), Attr::DIRECTORY),
            "." | ".." => {
                assert!(entry.is_dot_entry());
                assert!(entry.attr().is_dir() && entry.attr().is_hidden());
            }
            other => panic!("unexpected entry {other}"),
        }
    }
    dir.close().unwrap();
}

#[test]
fn first_advance_succeeds_on_empty_directory_because_of_dot_entries() {
    let td = TempDir::new().unwrap();
    let mut dir = DirectoryHandle::open(td.path()).unwrap();
    let first = dir.advance().unwrap().map(|e| e.to_owned_entry());
    let first = first.expect("'.' or '..' should be listed");
    assert!(first.name == "." || first.name == "..");
    dir.close().unwrap();
}

#[test]
fn advance_after_close_is_invalid_state() {
    let td = sample_tree();
    let mut dir = DirectoryHandle::open(td.path()).unwrap();
    dir.advance().unwrap();
    dir.close().unwrap();
    assert_eq!(dir.state(), HandleState::Closed);
    assert!(matches!(
        dir.advance().unwrap_err(),
        FsError::InvalidState { state: HandleState::Closed, .. }
    ));
    assert!(matches!(dir.close().unwrap_err(), FsError::AlreadyClosed));
}

#[test]
fn exhausted_handle_keeps_returning_none() {
    let td = TempDir::new().unwrap();
    let mut dir = DirectoryHandle::open(td.path()).unwrap();
    while dir.advance().unwrap().is_some() {}
    assert!(dir.advance().unwrap().is_none());
    assert!(dir.advance().unwrap().is_none());
    dir.close().unwrap();
}

#[test]
fn open_errors_are_classified() {
    let td = sample_tree();
    assert!(matches!(
        DirectoryHandle::open(&td.path().join("missing")).unwrap_err(),
        FsError::NotFound(_)
    ));
    assert!(matches!(
        DirectoryHandle::open(&td.path().join("plain.txt")).unwrap_err(),
        FsError::NotADirectory(_)
    ));
}

#[test]
fn joined_names_resolve() {
    let td = sample_tree();
    let base = td.path().as_os_str();
    for_each_in_dir(td.path(), |entry| {
        let joined = join(base, [entry.name()]);
        assert!(cfs::resolve(&joined).is_valid(), "{joined:?} did not resolve");
        ControlFlow::Continue(())
    })
    .unwrap();
}

#[test]
fn for_each_stops_on_break() {
    let td = sample_tree();
    let mut visited = 0;
    for_each_in_dir(td.path(), |_| {
        visited += 1;
        if visited == 2 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
    })
    .unwrap();
    assert_eq!(visited, 2);
}
