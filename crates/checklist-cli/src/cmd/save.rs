use crate::output::print_json;
use crate::session::{block_on, Session};
use anyhow::Context;
use checklist_core::sync::SaveOutcome;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    block_on(async {
        let session = Session::open(root).await?;
        let outcome = session
            .coordinator
            .explicit_save()
            .await
            .context("cloud sync failed; progress is saved on this device")?;
        session.finish().await;

        if json {
            return print_json(&outcome);
        }
        match outcome {
            SaveOutcome::LocalOnly => println!("Progress saved on this device."),
            SaveOutcome::Synced { .. } => println!("Progress saved and synced to the cloud."),
        }
        Ok::<_, anyhow::Error>(())
    })?
}
