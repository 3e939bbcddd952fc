use checklist_core::record_db::RecordDb;
use std::sync::Arc;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<RecordDb>,
}

impl AppState {
    pub fn new(db: Arc<RecordDb>) -> Self {
        Self { db }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn clones_share_one_database() {
        let dir = TempDir::new().unwrap();
        let db = RecordDb::open(&dir.path().join("remote.redb")).unwrap();
        let state = AppState::new(Arc::new(db));
        let copy = state.clone();
        assert!(Arc::ptr_eq(&state.db, &copy.db));
    }
}
