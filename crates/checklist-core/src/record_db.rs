//! Server-side storage of remote records using redb.
//!
//! A single `RECORDS` table maps the identity string to a JSON-encoded
//! [`RemoteRecord`]. Upserts replace the whole value and stamp
//! `last_updated`; there is no partial update path.

use std::path::Path;

use chrono::Utc;
use redb::{Database, ReadableTable, TableDefinition};

use crate::error::{ChecklistError, Result};
use crate::model::ChecklistDocument;
use crate::remote::{Identity, RemoteRecord};

/// Key: identity string. Value: JSON-encoded `RemoteRecord`.
const RECORDS: TableDefinition<&str, &[u8]> = TableDefinition::new("checklist_records");

fn db_err(e: impl std::fmt::Display) -> ChecklistError {
    ChecklistError::RecordDb(e.to_string())
}

pub struct RecordDb {
    db: Database,
}

impl RecordDb {
    /// Open or create the database at `path`, creating the table if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            crate::io::ensure_dir(parent)?;
        }
        let db = Database::create(path).map_err(db_err)?;
        let wt = db.begin_write().map_err(db_err)?;
        wt.open_table(RECORDS).map_err(db_err)?;
        wt.commit().map_err(db_err)?;
        Ok(Self { db })
    }

    pub fn get(&self, identity: &Identity) -> Result<Option<RemoteRecord>> {
        let rt = self.db.begin_read().map_err(db_err)?;
        let table = rt.open_table(RECORDS).map_err(db_err)?;
        let Some(guard) = table.get(identity.as_str()).map_err(db_err)? else {
            return Ok(None);
        };
        let record: RemoteRecord = serde_json::from_slice(guard.value()).map_err(db_err)?;
        Ok(Some(record))
    }

    /// Insert or replace the identity's record and stamp `last_updated`.
    pub fn upsert(&self, identity: &Identity, doc: &ChecklistDocument) -> Result<RemoteRecord> {
        let record = RemoteRecord {
            identity: identity.clone(),
            checklist_data: doc.clone(),
            last_updated: Utc::now(),
        };
        let value = serde_json::to_vec(&record)?;
        let wt = self.db.begin_write().map_err(db_err)?;
        {
            let mut table = wt.open_table(RECORDS).map_err(db_err)?;
            table
                .insert(identity.as_str(), value.as_slice())
                .map_err(db_err)?;
        }
        wt.commit().map_err(db_err)?;
        tracing::debug!(identity = %identity, "stored checklist record");
        Ok(record)
    }

    /// All identities with a record, in key order.
    pub fn identities(&self) -> Result<Vec<String>> {
        let rt = self.db.begin_read().map_err(db_err)?;
        let table = rt.open_table(RECORDS).map_err(db_err)?;
        let mut out = Vec::new();
        for entry in table.iter().map_err(db_err)? {
            let (k, _) = entry.map_err(db_err)?;
            out.push(k.value().to_string());
        }
        Ok(out)
    }
}
