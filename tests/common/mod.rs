//! In-memory collaborators shared by the integration tests.

#![allow(dead_code)]

use crossbeam_channel::Receiver;
use image::{DynamicImage, ImageFormat, RgbImage};
use photodex::engine::{OutputSink, SqliteRecordStore, open_db_in_memory};
use photodex::remote::RemoteArchive;
use photodex::{Collaborators, IndexError, IndexResult, RemoteFile, RunSettings, ScaleTarget};
use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Archive built from a map of directory → children and path → bytes.
#[derive(Default)]
pub struct FakeArchive {
    pub tree: HashMap<String, Vec<RemoteFile>>,
    pub blobs: HashMap<String, Vec<u8>>,
    pub failing_dirs: HashSet<String>,
    /// When set, every download blocks until the paired sender is dropped.
    pub gate: Option<Receiver<()>>,
    pub list_calls: AtomicUsize,
}

impl FakeArchive {
    pub fn dir(mut self, path: &str, children: Vec<RemoteFile>) -> Self {
        self.tree.insert(path.to_string(), children);
        self
    }

    pub fn blob(mut self, path: &str, bytes: Vec<u8>) -> Self {
        self.blobs.insert(path.to_string(), bytes);
        self
    }

    pub fn failing(mut self, dir: &str) -> Self {
        self.failing_dirs.insert(dir.to_string());
        self
    }

    pub fn gated(mut self, gate: Receiver<()>) -> Self {
        self.gate = Some(gate);
        self
    }
}

impl RemoteArchive for FakeArchive {
    fn list(&self, dir: &str) -> IndexResult<Vec<RemoteFile>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_dirs.contains(dir) {
            return Err(IndexError::listing(dir, "permission denied"));
        }
        Ok(self.tree.get(dir).cloned().unwrap_or_default())
    }

    fn download(&self, path: &str) -> IndexResult<Vec<u8>> {
        if let Some(gate) = &self.gate {
            let _ = gate.recv();
        }
        self.blobs
            .get(path)
            .cloned()
            .ok_or_else(|| IndexError::download(path, "404 not found"))
    }
}

/// Sink keeping saved bytes in memory.
#[derive(Default)]
pub struct MemorySink {
    pub saved: Mutex<HashMap<String, Vec<u8>>>,
}

impl OutputSink for MemorySink {
    fn save(&self, record_id: &str, bytes: &[u8]) -> IndexResult<()> {
        self.saved
            .lock()
            .unwrap()
            .insert(record_id.to_string(), bytes.to_vec());
        Ok(())
    }
}

pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(RgbImage::new(width, height))
        .write_to(&mut out, ImageFormat::Jpeg)
        .unwrap();
    out.into_inner()
}

pub fn settings(base: &str, num_workers: usize) -> RunSettings {
    RunSettings {
        base_directory: base.to_string(),
        target: ScaleTarget {
            width: 100.0,
            height: 100.0,
        },
        num_workers,
        queue_cap: 12,
        strict: true,
    }
}

pub fn records() -> Arc<SqliteRecordStore> {
    Arc::new(SqliteRecordStore::new(open_db_in_memory().unwrap()))
}

pub fn collaborators(
    archive: Arc<FakeArchive>,
    records: Arc<SqliteRecordStore>,
    sink: Arc<MemorySink>,
) -> Collaborators {
    Collaborators {
        archive,
        records,
        sink,
    }
}

/// `/photo` holding `a.jpg`, `b.txt` and `c/` with `c/d.jpeg`.
pub fn sample_archive() -> FakeArchive {
    FakeArchive::default()
        .dir(
            "/photo",
            vec![
                RemoteFile::file("/photo/a.jpg", "a.jpg"),
                RemoteFile::file("/photo/b.txt", "b.txt"),
                RemoteFile::dir("/photo/c", "c"),
            ],
        )
        .dir("/photo/c", vec![RemoteFile::file("/photo/c/d.jpeg", "d.jpeg")])
        .blob("/photo/a.jpg", jpeg(200, 100))
        .blob("/photo/b.txt", b"notes".to_vec())
        .blob("/photo/c/d.jpeg", jpeg(400, 300))
}
