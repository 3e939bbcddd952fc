//! Device-local persistence of the working document.
//!
//! Both operations fail soft: a cache that cannot be read behaves as empty,
//! and a cache that cannot be written is logged and otherwise ignored. The
//! in-memory document held by the coordinator stays authoritative either way.

use crate::model::ChecklistDocument;
use crate::{io, paths};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub trait LocalCache: Send + Sync {
    /// The cached document, or `None` if absent or unusable.
    fn read(&self) -> Option<ChecklistDocument>;

    /// Persist the whole document. Returns whether the write landed.
    fn write(&self, doc: &ChecklistDocument) -> bool;
}

// ---------------------------------------------------------------------------
// FileCache
// ---------------------------------------------------------------------------

/// JSON file under `<root>/.checklist/`, named after the fixed cache key.
#[derive(Debug, Clone)]
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    pub fn new(root: &Path) -> Self {
        Self {
            path: paths::cache_path(root),
        }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LocalCache for FileCache {
    fn read(&self) -> Option<ChecklistDocument> {
        let text = match io::read_optional(&self.path) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "cannot read local cache: {e}");
                return None;
            }
        };
        parse_cached(&text)
    }

    fn write(&self, doc: &ChecklistDocument) -> bool {
        let result = doc
            .to_json()
            .and_then(|json| io::atomic_write(&self.path, json.as_bytes()));
        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "local cache write failed: {e}");
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// MemoryCache
// ---------------------------------------------------------------------------

/// Holds the serialized text in memory, the way a browser key-value slot would.
#[derive(Debug, Default)]
pub struct MemoryCache {
    slot: Mutex<Option<String>>,
    fail_writes: Mutex<bool>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the slot with arbitrary text, valid or not.
    pub fn with_raw(text: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(text.into())),
            fail_writes: Mutex::new(false),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|s| s.clone())
    }

    /// Make subsequent writes fail, as a full storage quota would.
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut f) = self.fail_writes.lock() {
            *f = fail;
        }
    }
}

impl LocalCache for MemoryCache {
    fn read(&self) -> Option<ChecklistDocument> {
        let text = self.raw()?;
        parse_cached(&text)
    }

    fn write(&self, doc: &ChecklistDocument) -> bool {
        if self.fail_writes.lock().map(|f| *f).unwrap_or(false) {
            tracing::warn!("local cache write failed: quota exceeded");
            return false;
        }
        let json = match doc.to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("local cache serialization failed: {e}");
                return false;
            }
        };
        match self.slot.lock() {
            Ok(mut slot) => {
                *slot = Some(json);
                true
            }
            Err(_) => false,
        }
    }
}

fn parse_cached(text: &str) -> Option<ChecklistDocument> {
    match ChecklistDocument::parse(text) {
        Ok(doc) => Some(doc),
        Err(e) => {
            tracing::warn!("discarding malformed local checklist: {e}");
            None
        }
    }
}
