use crate::output::print_json;
use crate::session::{block_on, Session};
use anyhow::Context;
use checklist_core::report;
use std::path::{Path, PathBuf};

/// `out` is `None` for stdout and `Some(None)` for the default file name in
/// the working directory.
pub fn run(
    root: &Path,
    detailed: bool,
    out: Option<Option<PathBuf>>,
    json: bool,
) -> anyhow::Result<()> {
    let doc = block_on(async {
        let session = Session::open(root).await?;
        let doc = session.coordinator.document();
        session.finish().await;
        doc.context("checklist did not load")
    })??;

    let today = chrono::Local::now().date_naive();
    let text = if detailed {
        report::detailed_report(&doc, today)
    } else {
        report::summary_report(&doc, today)
    };

    let Some(out) = out else {
        if json {
            return print_json(&serde_json::json!({ "report": text }));
        }
        print!("{text}");
        return Ok(());
    };
    let path = out.unwrap_or_else(|| {
        PathBuf::from(if detailed {
            report::DETAILED_FILE_NAME
        } else {
            report::SUMMARY_FILE_NAME
        })
    });

    checklist_core::io::atomic_write(&path, text.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    if json {
        print_json(&serde_json::json!({
            "path": path,
            "detailed": detailed,
        }))
    } else {
        let kind = if detailed { "detailed" } else { "summary" };
        println!("Wrote {kind} report to {}", path.display());
        Ok(())
    }
}
