//! The sync coordinator: owns the working document for a session, decides
//! which source to adopt on load, and propagates every mutation to the local
//! cache immediately and to the remote store after a quiet period.
//!
//! # Load protocol
//!
//! 1. With an identity, fetch the remote record. A usable record wins and is
//!    mirrored into the local cache.
//! 2. Otherwise read the local cache.
//! 3. Otherwise take the seed document (and write it to the local cache).
//! 4. If the remote answered "no record" (or an unusable one), the adopted
//!    document is upserted as that identity's first record.
//!
//! A fetch that fails outright, or returns an unusable record, leaves a load
//! error for the caller to show. Only the unusable case seeds the remote.
//! Every load forgets the previous `last_synced_at`.
//!
//! # Remote writes
//!
//! Mutations reset a single debounce timer. When it fires, the document as it
//! is *at that moment* is upserted. Upserts are serialized by `write_gate`, so
//! at most one is in flight; a mutation that lands during an upsert simply
//! schedules the next one. Every load bumps `generation`; timers and upserts
//! carry the generation they were created under and stand down once it moves.

use crate::cache::LocalCache;
use crate::error::{ChecklistError, Result};
use crate::model::ChecklistDocument;
use crate::remote::{Identity, RemoteStore};
use crate::seed;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(3);

/// Shown to the user when the remote could not be read during load.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load your checklist data.";

/// Shown to the user when a remote write fails.
pub const SYNC_FAILED_MESSAGE: &str =
    "Failed to save your progress to the cloud. Your changes are saved locally.";

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Uninitialized,
    Loading,
    Ready,
}

/// Where the working document came from on the last load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadSource {
    Remote,
    Local,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SyncStatus {
    /// No identity (or no remote): changes only live on this device.
    Offline,
    /// Linked to a remote, but no write or read has confirmed it matches.
    NotSynced,
    Synced { at: DateTime<Utc> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SaveOutcome {
    LocalOnly,
    Synced { at: DateTime<Utc> },
}

/// Notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyncEvent {
    Loaded { source: LoadSource },
    Synced { at: DateTime<Utc> },
    SyncFailed { message: String },
    Saved { remote: bool },
    ItemsUnchecked { category_id: String },
}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

struct PendingTimer {
    ticket: u64,
    handle: JoinHandle<()>,
}

struct Session {
    phase: Phase,
    identity: Option<Identity>,
    document: Option<ChecklistDocument>,
    source: Option<LoadSource>,
    load_error: Option<String>,
    last_synced_at: Option<DateTime<Utc>>,
    generation: u64,
    timer: Option<PendingTimer>,
    next_ticket: u64,
}

impl Session {
    fn cancel_timer(&mut self) -> bool {
        match self.timer.take() {
            Some(t) => {
                t.handle.abort();
                true
            }
            None => false,
        }
    }
}

struct Inner {
    cache: Arc<dyn LocalCache>,
    remote: Option<Arc<dyn RemoteStore>>,
    debounce: Duration,
    session: Mutex<Session>,
    write_gate: tokio::sync::Mutex<()>,
    events: broadcast::Sender<SyncEvent>,
}

impl Inner {
    fn session(&self) -> MutexGuard<'_, Session> {
        // Never held across an await; a poisoned guard still holds consistent data.
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn emit(&self, event: SyncEvent) {
        let _ = self.events.send(event);
    }

    fn link(&self, session: &Session) -> Option<(Arc<dyn RemoteStore>, Identity)> {
        match (&self.remote, &session.identity) {
            (Some(remote), Some(identity)) => Some((Arc::clone(remote), identity.clone())),
            _ => None,
        }
    }

    /// Upsert the current document if `generation` is still current.
    ///
    /// Returns `Ok(None)` when the write was fenced off (a reload happened or
    /// the session is unlinked).
    async fn push(&self, generation: u64) -> Result<Option<DateTime<Utc>>> {
        let _gate = self.write_gate.lock().await;
        let (remote, identity, doc) = {
            let s = self.session();
            if s.generation != generation || s.phase != Phase::Ready {
                tracing::debug!("skipping stale remote write");
                return Ok(None);
            }
            let Some((remote, identity)) = self.link(&s) else {
                return Ok(None);
            };
            let Some(doc) = s.document.clone() else {
                return Ok(None);
            };
            (remote, identity, doc)
        };

        match remote.upsert(&identity, &doc).await {
            Ok(_) => {
                let at = Utc::now();
                {
                    let mut s = self.session();
                    if s.generation == generation {
                        s.last_synced_at = Some(at);
                    }
                }
                tracing::info!(identity = %identity, "checklist synced to remote");
                self.emit(SyncEvent::Synced { at });
                Ok(Some(at))
            }
            Err(e) => {
                tracing::warn!(identity = %identity, "remote write failed: {e}");
                self.emit(SyncEvent::SyncFailed {
                    message: SYNC_FAILED_MESSAGE.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Install the result of a load unless a newer load has started since.
    fn finish_load(
        &self,
        generation: u64,
        doc: ChecklistDocument,
        source: LoadSource,
        load_error: Option<String>,
        synced_at: Option<DateTime<Utc>>,
    ) {
        {
            let mut s = self.session();
            if s.generation != generation {
                tracing::debug!("discarding superseded load result");
                return;
            }
            s.document = Some(doc);
            s.source = Some(source);
            s.load_error = load_error;
            if synced_at.is_some() {
                s.last_synced_at = synced_at;
            }
            s.phase = Phase::Ready;
        }
        tracing::info!(?source, "checklist loaded");
        self.emit(SyncEvent::Loaded { source });
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

pub struct SyncCoordinatorBuilder {
    cache: Arc<dyn LocalCache>,
    remote: Option<Arc<dyn RemoteStore>>,
    identity: Option<Identity>,
    debounce: Duration,
}

impl SyncCoordinatorBuilder {
    pub fn remote(mut self, remote: Arc<dyn RemoteStore>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn identity(mut self, identity: Option<Identity>) -> Self {
        self.identity = identity;
        self
    }

    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn build(self) -> SyncCoordinator {
        let (events, _) = broadcast::channel(64);
        SyncCoordinator {
            inner: Arc::new(Inner {
                cache: self.cache,
                remote: self.remote,
                debounce: self.debounce,
                session: Mutex::new(Session {
                    phase: Phase::Uninitialized,
                    identity: self.identity,
                    document: None,
                    source: None,
                    load_error: None,
                    last_synced_at: None,
                    generation: 0,
                    timer: None,
                    next_ticket: 0,
                }),
                write_gate: tokio::sync::Mutex::new(()),
                events,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// SyncCoordinator
// ---------------------------------------------------------------------------

/// One per session. Dropping it discards any pending (not yet fired) remote
/// write; call [`SyncCoordinator::flush`] first to keep it.
///
/// Mutations spawn the debounce timer, so they must run inside a Tokio runtime.
pub struct SyncCoordinator {
    inner: Arc<Inner>,
}

impl SyncCoordinator {
    pub fn builder(cache: Arc<dyn LocalCache>) -> SyncCoordinatorBuilder {
        SyncCoordinatorBuilder {
            cache,
            remote: None,
            identity: None,
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    // -----------------------------------------------------------------------
    // Load
    // -----------------------------------------------------------------------

    /// Run the load protocol and return the source that was adopted.
    pub async fn load(&self) -> LoadSource {
        let generation = {
            let mut s = self.inner.session();
            s.cancel_timer();
            s.generation += 1;
            s.phase = Phase::Loading;
            s.document = None;
            s.source = None;
            s.load_error = None;
            s.last_synced_at = None;
            s.generation
        };

        // A write started before this load must land before the remote is read.
        let _gate = self.inner.write_gate.lock().await;
        let link = {
            let s = self.inner.session();
            self.inner.link(&s)
        };

        let mut remote_absent = false;
        let mut load_error = None;
        if let Some((remote, identity)) = &link {
            match remote.fetch(identity).await {
                Ok(Some(record)) => {
                    self.inner.cache.write(&record.checklist_data);
                    self.inner.finish_load(
                        generation,
                        record.checklist_data,
                        LoadSource::Remote,
                        None,
                        Some(Utc::now()),
                    );
                    return LoadSource::Remote;
                }
                Ok(None) => {
                    tracing::debug!(identity = %identity, "no remote checklist yet");
                    remote_absent = true;
                }
                Err(e) if e.is_malformed() => {
                    tracing::warn!(identity = %identity, "ignoring unusable remote checklist: {e}");
                    remote_absent = true;
                    load_error = Some(LOAD_ERROR_MESSAGE.to_string());
                }
                Err(e) => {
                    tracing::warn!(identity = %identity, "remote fetch failed: {e}");
                    load_error = Some(LOAD_ERROR_MESSAGE.to_string());
                }
            }
        }

        let (doc, source) = match self.inner.cache.read() {
            Some(doc) => (doc, LoadSource::Local),
            None => {
                let doc = seed::default_document();
                self.inner.cache.write(&doc);
                (doc, LoadSource::Default)
            }
        };

        let mut synced_at = None;
        if remote_absent {
            if let Some((remote, identity)) = &link {
                match remote.upsert(identity, &doc).await {
                    Ok(_) => {
                        tracing::info!(identity = %identity, ?source, "seeded remote checklist");
                        synced_at = Some(Utc::now());
                    }
                    Err(e) => {
                        tracing::warn!(identity = %identity, "seeding remote failed: {e}");
                        self.inner.emit(SyncEvent::SyncFailed {
                            message: SYNC_FAILED_MESSAGE.to_string(),
                        });
                    }
                }
            }
        }

        self.inner
            .finish_load(generation, doc, source, load_error, synced_at);
        if let Some(at) = synced_at {
            self.inner.emit(SyncEvent::Synced { at });
        }
        source
    }

    /// Discard the working document and any pending write, then load again.
    pub async fn reload(&self) -> LoadSource {
        self.load().await
    }

    /// Switch the session's identity (sign-in / sign-out) and reload.
    ///
    /// If the new identity already has a remote record it wins; otherwise the
    /// current local document becomes that identity's first record.
    pub async fn set_identity(&self, identity: Option<Identity>) -> LoadSource {
        {
            let mut s = self.inner.session();
            s.cancel_timer();
            s.generation += 1;
            s.identity = identity;
            s.last_synced_at = None;
        }
        self.load().await
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Flip one item's completion. Returns false if no item has that id.
    pub fn toggle_item(&self, item_id: &str) -> Result<bool> {
        self.mutate(|doc| doc.toggle_item(item_id))
    }

    /// Uncheck every item in a category. Returns false if no such category.
    pub fn uncheck_category(&self, category_id: &str) -> Result<bool> {
        let found = self.mutate(|doc| doc.uncheck_category(category_id))?;
        if found {
            self.inner.emit(SyncEvent::ItemsUnchecked {
                category_id: category_id.to_string(),
            });
        }
        Ok(found)
    }

    fn mutate(&self, f: impl FnOnce(&mut ChecklistDocument) -> bool) -> Result<bool> {
        let mut s = self.inner.session();
        if s.phase != Phase::Ready {
            return Err(ChecklistError::NotReady);
        }
        let Some(doc) = s.document.as_mut() else {
            return Err(ChecklistError::NotReady);
        };
        let found = f(doc);
        self.inner.cache.write(doc);
        if self.inner.link(&s).is_some() {
            self.schedule_sync(&mut s);
        }
        Ok(found)
    }

    /// (Re)start the debounce timer. Held under the session lock so the
    /// spawned task cannot observe the timer slot before it is filled.
    fn schedule_sync(&self, s: &mut Session) {
        s.cancel_timer();
        let ticket = s.next_ticket;
        s.next_ticket += 1;
        let generation = s.generation;
        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(inner.debounce).await;
            {
                let mut s = inner.session();
                if !s.timer.as_ref().is_some_and(|t| t.ticket == ticket) {
                    return;
                }
                s.timer = None;
            }
            // Errors are already reported through the event channel.
            let _ = inner.push(generation).await;
        });
        s.timer = Some(PendingTimer { ticket, handle });
    }

    // -----------------------------------------------------------------------
    // Explicit writes
    // -----------------------------------------------------------------------

    /// Write the local cache and, when linked, upsert right away.
    pub async fn explicit_save(&self) -> Result<SaveOutcome> {
        let (generation, linked) = {
            let mut s = self.inner.session();
            if s.phase != Phase::Ready {
                return Err(ChecklistError::NotReady);
            }
            if let Some(doc) = s.document.as_ref() {
                self.inner.cache.write(doc);
            }
            let linked = self.inner.link(&s).is_some();
            if linked {
                s.cancel_timer();
            }
            (s.generation, linked)
        };

        if !linked {
            self.inner.emit(SyncEvent::Saved { remote: false });
            return Ok(SaveOutcome::LocalOnly);
        }
        match self.inner.push(generation).await? {
            Some(at) => {
                self.inner.emit(SyncEvent::Saved { remote: true });
                Ok(SaveOutcome::Synced { at })
            }
            None => Ok(SaveOutcome::LocalOnly),
        }
    }

    /// Run a pending debounced write now instead of waiting for the timer,
    /// and wait for any write already in flight.
    pub async fn flush(&self) -> Result<Option<DateTime<Utc>>> {
        let pending = {
            let mut s = self.inner.session();
            s.cancel_timer().then_some(s.generation)
        };
        match pending {
            Some(generation) => self.inner.push(generation).await,
            None => {
                let _gate = self.inner.write_gate.lock().await;
                Ok(None)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn document(&self) -> Option<ChecklistDocument> {
        self.inner.session().document.clone()
    }

    pub fn phase(&self) -> Phase {
        self.inner.session().phase
    }

    pub fn load_error(&self) -> Option<String> {
        self.inner.session().load_error.clone()
    }

    pub fn load_source(&self) -> Option<LoadSource> {
        self.inner.session().source
    }

    pub fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        self.inner.session().last_synced_at
    }

    pub fn identity(&self) -> Option<Identity> {
        self.inner.session().identity.clone()
    }

    pub fn has_pending_sync(&self) -> bool {
        self.inner.session().timer.is_some()
    }

    pub fn sync_status(&self) -> SyncStatus {
        let s = self.inner.session();
        if self.inner.link(&s).is_none() {
            return SyncStatus::Offline;
        }
        match s.last_synced_at {
            Some(at) => SyncStatus::Synced { at },
            None => SyncStatus::NotSynced,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.inner.events.subscribe()
    }
}

impl Drop for SyncCoordinator {
    fn drop(&mut self) {
        self.inner.session().cancel_timer();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
