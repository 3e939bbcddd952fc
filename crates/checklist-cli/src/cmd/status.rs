use crate::output::{print_json, source_label, sync_label};
use crate::session::{block_on, Session};
use anyhow::Context;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    block_on(async {
        let session = Session::open(root).await?;
        let c = &session.coordinator;
        let doc = c.document().context("checklist did not load")?;
        let identity = c.identity();
        let status = c.sync_status();
        let source = c.load_source();
        let load_error = c.load_error();
        session.finish().await;

        let progress = doc.progress();
        if json {
            return print_json(&serde_json::json!({
                "identity": identity,
                "sync": status,
                "source": source,
                "load_error": load_error,
                "progress": progress,
            }));
        }

        match &identity {
            Some(id) => println!("Signed in as {id}"),
            None => println!("Not signed in"),
        }
        println!("Sync: {}", sync_label(status, chrono::Utc::now()));
        if let Some(source) = source {
            println!("Loaded from {}", source_label(source));
        }
        println!("Progress: {progress}");
        if progress.is_complete() {
            println!("Every item is done.");
        }
        Ok::<_, anyhow::Error>(())
    })?
}
