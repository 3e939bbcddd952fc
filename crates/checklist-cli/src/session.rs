//! Builds a `SyncCoordinator` from the on-disk config for one CLI invocation.

use anyhow::Context;
use checklist_core::cache::FileCache;
use checklist_core::config::Config;
use checklist_core::remote::HttpRemoteStore;
use checklist_core::sync::{SyncCoordinator, SyncEvent};
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Run `fut` to completion on a fresh current-thread runtime.
pub fn block_on<F: Future>(fut: F) -> anyhow::Result<F::Output> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    Ok(rt.block_on(fut))
}

pub struct Session {
    pub coordinator: SyncCoordinator,
    events: broadcast::Receiver<SyncEvent>,
}

impl Session {
    /// Build the coordinator without loading.
    pub fn connect(root: &Path) -> anyhow::Result<Self> {
        let config = Config::load_or_default(root).context("failed to load config")?;
        let identity = config.identity().context("invalid identity in config")?;

        let cache = Arc::new(FileCache::new(root));
        let mut builder = SyncCoordinator::builder(cache)
            .identity(identity)
            .debounce(config.sync.debounce());
        if let Some(url) = &config.remote.url {
            let store = HttpRemoteStore::new(url.as_str(), config.remote.token.clone())
                .context("failed to build remote client")?;
            builder = builder.remote(Arc::new(store));
        }

        let coordinator = builder.build();
        let events = coordinator.subscribe();
        Ok(Self {
            coordinator,
            events,
        })
    }

    /// Build the coordinator and run the load protocol.
    pub async fn open(root: &Path) -> anyhow::Result<Self> {
        let session = Self::connect(root)?;
        session.coordinator.load().await;
        Ok(session)
    }

    /// Push any pending debounced write before the process exits, then
    /// print load and sync problems to stderr.
    pub async fn finish(mut self) {
        // A failure here is reported through the event channel.
        let _ = self.coordinator.flush().await;

        if let Some(err) = self.coordinator.load_error() {
            eprintln!("warning: {err}");
        }
        while let Ok(event) = self.events.try_recv() {
            if let SyncEvent::SyncFailed { message } = event {
                eprintln!("warning: {message}");
            }
        }
    }
}
