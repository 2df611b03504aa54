mod common;

use common::FakeArchive;
use photodex::engine::{filter_images, has_image_extension, is_image, path_to_archive_string};
use photodex::pipeline::{walk, walk_lenient};
use photodex::{IndexError, RemoteFile};
use std::path::PathBuf;
use std::sync::atomic::Ordering;

// --- image filter ---

#[test]
fn test_is_image_extensions_case_insensitive() {
    for name in ["a.jpg", "a.JPG", "a.jpeg", "a.JpEg", "x.y.jpg"] {
        assert!(is_image(&RemoteFile::file(format!("/p/{name}"), name)), "{}", name);
    }
}

#[test]
fn test_is_image_rejects_other_files() {
    for name in ["a.png", "a.txt", "jpg", "a.jpg.txt", "a.jpgx", ".jpeg.bak"] {
        assert!(!is_image(&RemoteFile::file(format!("/p/{name}"), name)), "{}", name);
    }
}

#[test]
fn test_is_image_rejects_directories() {
    assert!(!is_image(&RemoteFile::dir("/p/holiday.jpg", "holiday.jpg")));
}

#[test]
fn test_has_image_extension_suffix_only() {
    assert!(has_image_extension(".jpg"));
    assert!(!has_image_extension("jpg"));
    assert!(!has_image_extension(""));
}

#[test]
fn test_filter_images_keeps_order() {
    let files = vec![
        RemoteFile::file("/p/z.jpeg", "z.jpeg"),
        RemoteFile::dir("/p/sub", "sub"),
        RemoteFile::file("/p/b.txt", "b.txt"),
        RemoteFile::file("/p/a.JPG", "a.JPG"),
    ];
    let kept: Vec<_> = filter_images(files).into_iter().map(|f| f.path).collect();
    assert_eq!(kept, vec!["/p/z.jpeg", "/p/a.JPG"]);
}

// --- walker ---

fn nested_archive() -> FakeArchive {
    FakeArchive::default()
        .dir(
            "/root",
            vec![
                RemoteFile::file("/root/a.jpg", "a.jpg"),
                RemoteFile::dir("/root/c", "c"),
                RemoteFile::file("/root/b.txt", "b.txt"),
            ],
        )
        .dir(
            "/root/c",
            vec![
                RemoteFile::file("/root/c/d.jpeg", "d.jpeg"),
                RemoteFile::dir("/root/c/e", "e"),
            ],
        )
        .dir("/root/c/e", vec![RemoteFile::file("/root/c/e/f.jpg", "f.jpg")])
}

#[test]
fn test_walk_pre_order_each_entry_once() {
    let archive = nested_archive();
    let paths: Vec<_> = walk(&archive, "/root")
        .unwrap()
        .into_iter()
        .map(|f| f.path)
        .collect();
    assert_eq!(
        paths,
        vec![
            "/root/a.jpg",
            "/root/c",
            "/root/c/d.jpeg",
            "/root/c/e",
            "/root/c/e/f.jpg",
            "/root/b.txt",
        ]
    );
    // One listing per directory.
    assert_eq!(archive.list_calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_walk_empty_root() {
    let archive = FakeArchive::default().dir("/empty", vec![]);
    assert!(walk(&archive, "/empty").unwrap().is_empty());
}

#[test]
fn test_walk_aborts_on_nested_listing_error() {
    let archive = nested_archive().failing("/root/c/e");
    let err = walk(&archive, "/root").unwrap_err();
    match err {
        IndexError::Listing { path, .. } => assert_eq!(path, "/root/c/e"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_walk_lenient_skips_failing_dir_and_continues() {
    let archive = nested_archive().failing("/root/c");
    let outcome = walk_lenient(&archive, "/root");
    let paths: Vec<_> = outcome.files.into_iter().map(|f| f.path).collect();
    assert_eq!(paths, vec!["/root/a.jpg", "/root/c", "/root/b.txt"]);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].0, "/root/c");
    assert_eq!(outcome.skipped[0].1, "permission denied");
}

#[test]
fn test_walk_lenient_root_failure_yields_nothing() {
    let archive = nested_archive().failing("/root");
    let outcome = walk_lenient(&archive, "/root");
    assert!(outcome.files.is_empty());
    assert_eq!(outcome.skipped.len(), 1);
}

// --- path_to_archive_string ---

#[test]
fn test_path_to_archive_string_forward_slashes() {
    assert_eq!(
        path_to_archive_string(&PathBuf::from("photo/2020/a.jpg")),
        "photo/2020/a.jpg"
    );
}

#[test]
fn test_path_to_archive_string_normalizes_backslashes() {
    assert_eq!(
        path_to_archive_string(&PathBuf::from("photo\\2020\\a.jpg")),
        "photo/2020/a.jpg"
    );
}
