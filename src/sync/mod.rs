pub mod http;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::gate::Credential;
use crate::models::Project;

pub use http::HttpRemote;

#[derive(Debug, Clone, PartialEq)]
pub enum SyncError {
    NotConfigured,
    Transport(String),
    Status(u16),
    Malformed(String),
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::NotConfigured => write!(f, "No sync endpoint configured"),
            SyncError::Transport(msg) => write!(f, "Sync request failed: {msg}"),
            SyncError::Status(code) => write!(f, "Sync endpoint returned status {code}"),
            SyncError::Malformed(msg) => write!(f, "Malformed sync payload: {msg}"),
        }
    }
}

impl std::error::Error for SyncError {}

/// Body accepted from a pull: the `{ data }` envelope or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PullPayload {
    Envelope { data: Vec<Project> },
    Bare(Vec<Project>),
}

impl PullPayload {
    pub fn into_projects(self) -> Vec<Project> {
        match self {
            PullPayload::Envelope { data } => data,
            PullPayload::Bare(data) => data,
        }
    }
}

/// Body sent on a push.
#[derive(Debug, Serialize)]
pub struct PushPayload<'a> {
    pub auth: &'a str,
    pub data: &'a [Project],
}

/// Opaque JSON store holding the whole board.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Project>, SyncError>;
    async fn store(&self, projects: &[Project], auth: &Credential) -> Result<(), SyncError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum PushOutcome {
    Pushed,
    Skipped(&'static str),
}

/// Last-writer-wins mirror of the board to an optional remote store.
#[derive(Clone)]
pub struct SyncClient {
    remote: Option<Arc<dyn RemoteStore>>,
}

impl SyncClient {
    pub fn new(remote: Option<Arc<dyn RemoteStore>>) -> Self {
        Self { remote }
    }

    pub fn is_enabled(&self) -> bool {
        self.remote.is_some()
    }

    /// Read the remote board. The caller decides what to do on failure.
    pub async fn pull(&self) -> Result<Vec<Project>, SyncError> {
        let remote = self.remote.as_ref().ok_or(SyncError::NotConfigured)?;
        let projects = remote.fetch().await?;
        tracing::info!("Pulled {} projects from remote", projects.len());
        Ok(projects)
    }

    /// Send the full board. Never retried.
    pub async fn push(
        &self,
        snapshot: &[Project],
        credential: Option<&Credential>,
    ) -> Result<PushOutcome, SyncError> {
        let Some(remote) = self.remote.as_ref() else {
            tracing::debug!("Push skipped: no sync endpoint configured");
            return Ok(PushOutcome::Skipped("no sync endpoint configured"));
        };
        let Some(credential) = credential else {
            tracing::debug!("Push skipped: not authenticated");
            return Ok(PushOutcome::Skipped("not authenticated"));
        };

        match remote.store(snapshot, credential).await {
            Ok(()) => {
                tracing::info!("Pushed {} projects to remote", snapshot.len());
                Ok(PushOutcome::Pushed)
            }
            Err(e) => {
                tracing::warn!("{e}");
                Err(e)
            }
        }
    }
}
