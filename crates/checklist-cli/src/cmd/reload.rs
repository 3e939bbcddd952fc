use crate::output::{print_json, source_label, sync_label};
use crate::session::{block_on, Session};
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    block_on(async {
        let session = Session::connect(root)?;
        let source = session.coordinator.reload().await;
        let status = session.coordinator.sync_status();
        session.finish().await;

        if json {
            return print_json(&serde_json::json!({
                "source": source,
                "sync": status,
            }));
        }
        println!("Loaded from {}", source_label(source));
        println!("Sync: {}", sync_label(status, chrono::Utc::now()));
        Ok::<_, anyhow::Error>(())
    })?
}
