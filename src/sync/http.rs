use async_trait::async_trait;

use super::{PullPayload, PushPayload, RemoteStore, SyncError};
use crate::gate::Credential;
use crate::models::Project;

/// Remote store reached over plain HTTP + JSON.
pub struct HttpRemote {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRemote {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl RemoteStore for HttpRemote {
    async fn fetch(&self) -> Result<Vec<Project>, SyncError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("t", cache_buster())])
            .send()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(SyncError::Status(resp.status().as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;
        let payload: PullPayload =
            serde_json::from_str(&body).map_err(|e| SyncError::Malformed(e.to_string()))?;
        Ok(payload.into_projects())
    }

    async fn store(&self, projects: &[Project], auth: &Credential) -> Result<(), SyncError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&PushPayload {
                auth: auth.as_str(),
                data: projects,
            })
            .send()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        // Opaque acknowledgements count as success; only explicit errors fail.
        let status = resp.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(SyncError::Status(status.as_u16()));
        }
        Ok(())
    }
}

pub(crate) fn cache_buster() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}
