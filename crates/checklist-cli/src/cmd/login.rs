use crate::output::print_json;
use crate::session::{block_on, Session};
use anyhow::Context;
use checklist_core::config::Config;
use checklist_core::remote::Identity;
use checklist_core::sync::{LoadSource, SyncStatus};
use checklist_core::ChecklistError;
use std::path::Path;

// ---------------------------------------------------------------------------
// login
// ---------------------------------------------------------------------------

pub fn login(root: &Path, identity: &str, json: bool) -> anyhow::Result<()> {
    let identity = Identity::new(identity)?;
    let mut config = Config::load_or_default(root).context("failed to load config")?;
    if config.remote.url.is_none() {
        return Err(ChecklistError::RemoteNotConfigured.into());
    }

    let (source, status) = block_on(async {
        // Built with the previous identity so the switch goes through the
        // coordinator's sign-in path.
        let session = Session::connect(root)?;
        let source = session.coordinator.set_identity(Some(identity.clone())).await;
        let status = session.coordinator.sync_status();
        session.finish().await;
        Ok::<_, anyhow::Error>((source, status))
    })??;

    config.identity = Some(identity.to_string());
    config.save(root).context("failed to save config")?;

    if json {
        return print_json(&serde_json::json!({
            "identity": identity,
            "source": source,
            "sync": status,
        }));
    }
    println!("Signed in as {identity}.");
    match (source, status) {
        (LoadSource::Remote, _) => println!("Loaded your checklist from the cloud."),
        (_, SyncStatus::Synced { .. }) => println!("Uploaded the progress on this device."),
        _ => println!("Cloud sync is unavailable right now; progress stays on this device."),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// logout
// ---------------------------------------------------------------------------

pub fn logout(root: &Path, json: bool) -> anyhow::Result<()> {
    let mut config = Config::load_or_default(root).context("failed to load config")?;
    let Some(previous) = config.identity.take() else {
        if json {
            return print_json(&serde_json::json!({ "identity": null }));
        }
        println!("Not signed in.");
        return Ok(());
    };

    block_on(async {
        let session = Session::connect(root)?;
        session.coordinator.set_identity(None).await;
        session.finish().await;
        Ok::<_, anyhow::Error>(())
    })??;
    config.save(root).context("failed to save config")?;

    if json {
        return print_json(&serde_json::json!({
            "identity": null,
            "previous": previous,
        }));
    }
    println!("Signed out of {previous}. Progress stays on this device.");
    Ok(())
}
