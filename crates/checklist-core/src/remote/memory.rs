use super::{Identity, RemoteRecord, RemoteStore};
use crate::error::{ChecklistError, Result};
use crate::model::ChecklistDocument;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-process remote store with call accounting and failure injection.
#[derive(Debug, Default)]
pub struct MemoryRemoteStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<Identity, RemoteRecord>,
    upserts: Vec<(Identity, ChecklistDocument)>,
    fetches: usize,
    fetch_failure: Option<FailureKind>,
    upsert_failures: usize,
}

#[derive(Debug, Clone, Copy)]
pub enum FailureKind {
    Unavailable,
    Malformed,
}

impl MemoryRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a record without counting it as an upsert.
    pub fn insert(&self, identity: &Identity, doc: ChecklistDocument) {
        let mut inner = self.lock();
        inner.records.insert(
            identity.clone(),
            RemoteRecord {
                identity: identity.clone(),
                checklist_data: doc,
                last_updated: Utc::now(),
            },
        );
    }

    pub fn record(&self, identity: &Identity) -> Option<RemoteRecord> {
        self.lock().records.get(identity).cloned()
    }

    /// Every upsert call that succeeded, in order.
    pub fn upserts(&self) -> Vec<(Identity, ChecklistDocument)> {
        self.lock().upserts.clone()
    }

    pub fn upsert_count(&self) -> usize {
        self.lock().upserts.len()
    }

    pub fn fetch_count(&self) -> usize {
        self.lock().fetches
    }

    /// Make every fetch fail with the given kind until cleared.
    pub fn set_fetch_failure(&self, kind: Option<FailureKind>) {
        self.lock().fetch_failure = kind;
    }

    /// Make the next `n` upserts fail as unreachable.
    pub fn fail_next_upserts(&self, n: usize) {
        self.lock().upsert_failures = n;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means a test panicked mid-call; the data is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl RemoteStore for MemoryRemoteStore {
    async fn fetch(&self, identity: &Identity) -> Result<Option<RemoteRecord>> {
        let mut inner = self.lock();
        inner.fetches += 1;
        match inner.fetch_failure {
            Some(FailureKind::Unavailable) => Err(ChecklistError::RemoteUnavailable(
                "connection refused".to_string(),
            )),
            Some(FailureKind::Malformed) => Err(ChecklistError::RemoteMalformed(
                "missing field `categories`".to_string(),
            )),
            None => Ok(inner.records.get(identity).cloned()),
        }
    }

    async fn upsert(&self, identity: &Identity, doc: &ChecklistDocument) -> Result<RemoteRecord> {
        let mut inner = self.lock();
        if inner.upsert_failures > 0 {
            inner.upsert_failures -= 1;
            return Err(ChecklistError::RemoteUnavailable(
                "connection reset".to_string(),
            ));
        }
        let record = RemoteRecord {
            identity: identity.clone(),
            checklist_data: doc.clone(),
            last_updated: Utc::now(),
        };
        inner.records.insert(identity.clone(), record.clone());
        inner.upserts.push((identity.clone(), doc.clone()));
        Ok(record)
    }
}
