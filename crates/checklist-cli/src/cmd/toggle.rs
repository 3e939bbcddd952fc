use crate::cmd::show::checkbox;
use crate::output::print_json;
use crate::session::{block_on, Session};
use anyhow::{bail, Context};
use std::path::Path;

pub fn run(root: &Path, item_id: &str, json: bool) -> anyhow::Result<()> {
    block_on(async {
        let session = Session::open(root).await?;
        let found = session.coordinator.toggle_item(item_id)?;
        let doc = session.coordinator.document();
        session.finish().await;

        if !found {
            bail!("no item with id '{item_id}'");
        }
        let item = doc
            .as_ref()
            .and_then(|d| d.item(item_id))
            .with_context(|| format!("item '{item_id}' disappeared after toggle"))?;

        if json {
            print_json(&serde_json::json!({
                "id": item.id,
                "completed": item.completed,
            }))?;
        } else {
            println!("{} {}", checkbox(item), item.title);
        }
        Ok::<_, anyhow::Error>(())
    })?
}
