//! Identity-scoped persistence of the document in a shared backend.

pub mod http;
pub mod memory;

pub use http::HttpRemoteStore;
pub use memory::MemoryRemoteStore;

use crate::error::{ChecklistError, Result};
use crate::model::ChecklistDocument;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// The authenticated user key that scopes a remote record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        crate::paths::validate_identity(&id)?;
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Identity {
    type Error = ChecklistError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Identity> for String {
    fn from(id: Identity) -> Self {
        id.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// RemoteRecord
// ---------------------------------------------------------------------------

/// One row per identity: the document plus a server-maintained timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteRecord {
    #[serde(rename = "user_id")]
    pub identity: Identity,
    pub checklist_data: ChecklistDocument,
    pub last_updated: DateTime<Utc>,
}

impl RemoteRecord {
    /// Decode the record fetched for `expected`, rejecting any payload whose
    /// document fails validation or that belongs to another identity.
    pub fn from_value(value: serde_json::Value, expected: &Identity) -> Result<Self> {
        let record: RemoteRecord = serde_json::from_value(value)
            .map_err(|e| ChecklistError::RemoteMalformed(e.to_string()))?;
        if record.identity != *expected {
            return Err(ChecklistError::RemoteMalformed(format!(
                "record for '{}' returned for '{expected}'",
                record.identity
            )));
        }
        record
            .checklist_data
            .validate()
            .map_err(|e| ChecklistError::RemoteMalformed(e.to_string()))?;
        Ok(record)
    }
}

// ---------------------------------------------------------------------------
// RemoteStore
// ---------------------------------------------------------------------------

#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// The identity's record, `None` if it has none yet.
    ///
    /// Errors are never "not found": they are `RemoteUnavailable`,
    /// `RemoteBackend`, or `RemoteMalformed`.
    async fn fetch(&self, identity: &Identity) -> Result<Option<RemoteRecord>>;

    /// Create or fully replace the identity's record.
    async fn upsert(&self, identity: &Identity, doc: &ChecklistDocument) -> Result<RemoteRecord>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_document;

    #[test]
    fn identity_rejects_invalid_keys() {
        assert!(Identity::new("ok-user").is_ok());
        assert!(matches!(
            Identity::new("bad user"),
            Err(ChecklistError::InvalidIdentity(_))
        ));
    }

    #[test]
    fn record_uses_user_id_on_the_wire() {
        let record = RemoteRecord {
            identity: Identity::new("u1").unwrap(),
            checklist_data: default_document(),
            last_updated: Utc::now(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["user_id"], "u1");
        assert_eq!(RemoteRecord::from_value(value, &record.identity).unwrap(), record);
    }

    #[test]
    fn record_with_bad_document_is_malformed() {
        let value = serde_json::json!({
            "user_id": "u1",
            "checklist_data": { "title": "x" },
            "last_updated": "2025-01-01T00:00:00Z",
        });
        let err = RemoteRecord::from_value(value, &Identity::new("u1").unwrap()).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn record_for_another_identity_is_malformed() {
        let value = serde_json::json!({
            "user_id": "someone-else",
            "checklist_data": default_document(),
            "last_updated": "2025-01-01T00:00:00Z",
        });
        let err = RemoteRecord::from_value(value, &Identity::new("u1").unwrap()).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("someone-else"));
    }

    #[test]
    fn record_with_invalid_identity_is_malformed() {
        let value = serde_json::json!({
            "user_id": "no spaces allowed",
            "checklist_data": default_document(),
            "last_updated": "2025-01-01T00:00:00Z",
        });
        let err = RemoteRecord::from_value(value, &Identity::new("u1").unwrap()).unwrap_err();
        assert!(err.is_malformed());
    }
}
