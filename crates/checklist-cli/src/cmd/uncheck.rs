use crate::output::print_json;
use crate::session::{block_on, Session};
use anyhow::{bail, Context};
use std::path::Path;

pub fn run(root: &Path, category_id: &str, json: bool) -> anyhow::Result<()> {
    block_on(async {
        let session = Session::open(root).await?;
        let found = session.coordinator.uncheck_category(category_id)?;
        let doc = session.coordinator.document();
        session.finish().await;

        if !found {
            bail!("no category with id '{category_id}'");
        }
        let category = doc
            .as_ref()
            .and_then(|d| d.category(category_id))
            .with_context(|| format!("category '{category_id}' disappeared after uncheck"))?;

        if json {
            print_json(&serde_json::json!({
                "id": category.id,
                "progress": category.progress(),
            }))?;
        } else {
            println!("Unchecked every item in {}", category.title);
        }
        Ok::<_, anyhow::Error>(())
    })?
}
