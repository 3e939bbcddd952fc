use crate::output::{print_json, print_table};
use crate::session::{block_on, Session};
use anyhow::Context;
use checklist_core::model::{Category, ChecklistDocument, Item};
use checklist_core::sync::LoadSource;
use std::path::Path;

pub fn run(root: &Path, category: Option<&str>, json: bool) -> anyhow::Result<()> {
    block_on(async {
        let session = Session::open(root).await?;
        let doc = session
            .coordinator
            .document()
            .context("checklist did not load")?;
        let source = session.coordinator.load_source();
        session.finish().await;
        render(&doc, category, source, json)
    })?
}

pub fn checkbox(item: &Item) -> &'static str {
    if item.completed {
        "[x]"
    } else {
        "[ ]"
    }
}

fn render(
    doc: &ChecklistDocument,
    category: Option<&str>,
    source: Option<LoadSource>,
    json: bool,
) -> anyhow::Result<()> {
    let categories: Vec<&Category> = match category {
        Some(id) => vec![doc
            .category(id)
            .with_context(|| format!("no category with id '{id}'"))?],
        None => doc.categories.iter().collect(),
    };

    if json {
        let categories: Vec<serde_json::Value> = categories
            .iter()
            .map(|c| {
                serde_json::json!({
                    "id": c.id,
                    "title": c.title,
                    "progress": c.progress(),
                    "items": c.items,
                })
            })
            .collect();
        return print_json(&serde_json::json!({
            "title": doc.title,
            "source": source,
            "progress": doc.progress(),
            "categories": categories,
        }));
    }

    println!("{}", doc.title);
    println!("Overall progress: {}", doc.progress());
    for c in categories {
        println!();
        println!("{} [{}]  {}", c.title, c.id, c.progress());
        let rows = c
            .items
            .iter()
            .map(|i| {
                vec![
                    checkbox(i).to_string(),
                    i.id.clone(),
                    i.title.clone(),
                    i.priority.to_string(),
                ]
            })
            .collect();
        print_table(&["", "ID", "TASK", "PRIORITY"], rows);
    }
    Ok(())
}
