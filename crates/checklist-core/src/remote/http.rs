//! `RemoteStore` over the checklist server's REST API.
//!
//! ```text
//! GET /api/checklists/{user_id}   200 record | 404
//! PUT /api/checklists/{user_id}   { "checklist_data": doc } -> 200 record
//! ```

use super::{Identity, RemoteRecord, RemoteStore};
use crate::error::{ChecklistError, Result};
use crate::model::ChecklistDocument;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct HttpRemoteStore {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpRemoteStore {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ChecklistError::RemoteUnavailable(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    fn record_url(&self, identity: &Identity) -> String {
        format!("{}/api/checklists/{}", self.base_url, identity.as_str())
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn fetch(&self, identity: &Identity) -> Result<Option<RemoteRecord>> {
        let url = self.record_url(identity);
        tracing::debug!(%url, "fetching remote checklist");
        let resp = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| ChecklistError::RemoteUnavailable(e.to_string()))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = check_status(resp).await?;
        let value: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ChecklistError::RemoteMalformed(e.to_string()))?;
        RemoteRecord::from_value(value, identity).map(Some)
    }

    async fn upsert(&self, identity: &Identity, doc: &ChecklistDocument) -> Result<RemoteRecord> {
        let url = self.record_url(identity);
        tracing::debug!(%url, "upserting remote checklist");
        let body = serde_json::json!({ "checklist_data": doc });
        let resp = self
            .authorize(self.client.put(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| ChecklistError::RemoteUnavailable(e.to_string()))?;
        let resp = check_status(resp).await?;

        // The status decides success; the echoed record is only informational.
        let echoed = match resp.json::<serde_json::Value>().await {
            Ok(value) => RemoteRecord::from_value(value, identity),
            Err(e) => Err(ChecklistError::RemoteMalformed(e.to_string())),
        };
        Ok(echoed.unwrap_or_else(|e| {
            tracing::warn!(%url, "write accepted but response unreadable: {e}");
            RemoteRecord {
                identity: identity.clone(),
                checklist_data: doc.clone(),
                last_updated: Utc::now(),
            }
        }))
    }
}

/// Turn a non-success response into `RemoteBackend`, keeping the server's
/// `{"error": ...}` message when there is one.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or(text);
    Err(ChecklistError::RemoteBackend {
        status: status.as_u16(),
        message,
    })
}
