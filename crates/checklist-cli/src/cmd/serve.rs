use anyhow::Context;
use checklist_core::paths;
use std::path::{Path, PathBuf};

pub fn run(root: &Path, port: u16, db: Option<PathBuf>, token: Option<String>) -> anyhow::Result<()> {
    let db_path = db.unwrap_or_else(|| paths::record_db_path(root));
    let rt = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    rt.block_on(checklist_server::serve(db_path, port, token))
}
