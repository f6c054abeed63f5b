use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::gate::{AuthOutcome, Credential, SessionGate};
use crate::models::project::default_projects;
use crate::models::{Lane, LaneSet, Project};
use crate::storage::{KvStore, PROJECTS_KEY};
use crate::store::BoardStore;
use crate::sync::{PushOutcome, SyncClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncState {
    Pulled,
    Pushed,
    Skipped,
    Failed,
    Fallback,
}

/// Transient status signal of the last sync attempt.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub state: SyncState,
    pub message: Option<String>,
    pub at: DateTime<Utc>,
}

impl SyncReport {
    fn new(state: SyncState, message: Option<String>) -> Self {
        Self {
            state,
            message,
            at: Utc::now(),
        }
    }
}

/// Result of a board mutation, including the push it triggered (if any).
#[derive(Debug, Clone, Serialize)]
pub struct Mutation {
    pub project: Option<Project>,
    pub changed: bool,
    pub sync: Option<SyncReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub lanes: Vec<Lane>,
    pub admin: bool,
    pub sync_enabled: bool,
    pub sync: Option<SyncReport>,
}

/// The board as seen by the UI: store, session gate and sync client wired together.
pub struct Board {
    store: RwLock<BoardStore>,
    gate: SessionGate,
    sync: SyncClient,
    cache: Arc<dyn KvStore>,
    last_sync: RwLock<Option<SyncReport>>,
}

impl Board {
    pub fn new(lanes: LaneSet, gate: SessionGate, sync: SyncClient, cache: Arc<dyn KvStore>) -> Self {
        Self {
            store: RwLock::new(BoardStore::new(lanes)),
            gate,
            sync,
            cache,
            last_sync: RwLock::new(None),
        }
    }

    pub fn gate(&self) -> &SessionGate {
        &self.gate
    }

    /// Restore the session, then load the board from the remote, the local cache,
    /// or the embedded defaults, in that order.
    pub async fn init(&self) -> SyncReport {
        self.gate.restore();

        let report = match self.sync.pull().await {
            Ok(projects) => {
                self.replace_and_cache(projects).await;
                SyncReport::new(SyncState::Pulled, None)
            }
            Err(e) => {
                if self.sync.is_enabled() {
                    tracing::warn!("Initial pull failed, using fallback board: {e}");
                }
                let (projects, source) = match self.read_cache() {
                    Some(projects) => (projects, "local cache"),
                    None => (default_projects(), "embedded defaults"),
                };
                tracing::info!("Loaded {} projects from {source}", projects.len());
                self.store.write().await.replace_all(projects);
                SyncReport::new(SyncState::Fallback, Some(format!("{e}; using {source}")))
            }
        };

        self.record(report.clone()).await;
        report
    }

    /// Pull again. A failed pull leaves the board untouched.
    pub async fn reload(&self) -> SyncReport {
        let report = match self.sync.pull().await {
            Ok(projects) => {
                self.replace_and_cache(projects).await;
                SyncReport::new(SyncState::Pulled, None)
            }
            Err(e) => {
                tracing::warn!("Pull failed: {e}");
                SyncReport::new(SyncState::Failed, Some(e.to_string()))
            }
        };
        self.record(report.clone()).await;
        report
    }

    /// Logout: drop the admin session.
    pub fn teardown(&self) {
        self.gate.revoke();
        tracing::info!("Admin session revoked");
    }

    pub fn authenticate(&self, password: &str) -> AuthOutcome {
        self.gate.authenticate(password)
    }

    /// `admin` reflects the caller, not whether anyone holds the session.
    pub async fn view(&self, admin: bool) -> BoardView {
        let lanes = self.store.read().await.lanes();
        let sync = self.last_sync.read().await.clone();
        BoardView {
            lanes,
            admin,
            sync_enabled: self.sync.is_enabled(),
            sync,
        }
    }

    pub async fn projects(&self) -> Vec<Project> {
        self.store.read().await.snapshot()
    }

    pub async fn find(&self, id: &str) -> Option<Project> {
        self.store.read().await.find(id).cloned()
    }

    pub async fn create(
        &self,
        credential: &Credential,
        title: &str,
        link: Option<&str>,
        desc: Option<&str>,
    ) -> Result<Mutation, AppError> {
        let (project, snapshot) = {
            let mut store = self.store.write().await;
            let project = store.create(title, link, desc)?;
            (project, self.snapshot_locked(&store))
        };
        tracing::info!("Created project '{}'", project.id);
        Ok(self.commit(credential, Some(project), snapshot).await)
    }

    pub async fn update(
        &self,
        credential: &Credential,
        id: &str,
        title: &str,
        link: Option<&str>,
        desc: Option<&str>,
    ) -> Result<Mutation, AppError> {
        let (project, snapshot) = {
            let mut store = self.store.write().await;
            let project = store.update(id, title, link, desc)?;
            (project, self.snapshot_locked(&store))
        };
        tracing::info!("Updated project '{id}'");
        Ok(self.commit(credential, Some(project), snapshot).await)
    }

    pub async fn delete(&self, credential: &Credential, id: &str) -> Result<Mutation, AppError> {
        let snapshot = {
            let mut store = self.store.write().await;
            if !store.delete(id) {
                return Ok(unchanged(None));
            }
            self.snapshot_locked(&store)
        };
        tracing::info!("Deleted project '{id}'");
        Ok(self.commit(credential, None, snapshot).await)
    }

    pub async fn move_project(
        &self,
        credential: &Credential,
        id: &str,
        section: &str,
    ) -> Result<Mutation, AppError> {
        let (project, snapshot) = {
            let mut store = self.store.write().await;
            let moved = store.move_to(id, section)?;
            let project = store.find(id).cloned();
            if !moved {
                return Ok(unchanged(project));
            }
            (project, self.snapshot_locked(&store))
        };
        tracing::info!("Moved project '{id}' to '{section}'");
        Ok(self.commit(credential, project, snapshot).await)
    }

    /// Snapshot and cache while the write guard is held, so cache writes follow mutation order.
    fn snapshot_locked(&self, store: &BoardStore) -> Vec<Project> {
        let snapshot = store.snapshot();
        self.write_snapshot(&snapshot);
        snapshot
    }

    /// Push a snapshot taken while the store lock was held.
    async fn commit(
        &self,
        credential: &Credential,
        project: Option<Project>,
        snapshot: Vec<Project>,
    ) -> Mutation {
        let report = match self.sync.push(&snapshot, Some(credential)).await {
            Ok(PushOutcome::Pushed) => SyncReport::new(SyncState::Pushed, None),
            Ok(PushOutcome::Skipped(reason)) => {
                SyncReport::new(SyncState::Skipped, Some(reason.to_string()))
            }
            Err(e) => SyncReport::new(SyncState::Failed, Some(e.to_string())),
        };
        self.record(report.clone()).await;

        Mutation {
            project,
            changed: true,
            sync: Some(report),
        }
    }

    async fn record(&self, report: SyncReport) {
        *self.last_sync.write().await = Some(report);
    }

    async fn replace_and_cache(&self, projects: Vec<Project>) {
        let mut store = self.store.write().await;
        store.replace_all(projects);
        self.snapshot_locked(&store);
    }

    fn write_snapshot(&self, snapshot: &[Project]) {
        let result = serde_json::to_string(snapshot)
            .map_err(|e| e.to_string())
            .and_then(|json| self.cache.set(PROJECTS_KEY, &json));
        if let Err(e) = result {
            tracing::warn!("Failed to write local board cache: {e}");
        }
    }

    fn read_cache(&self) -> Option<Vec<Project>> {
        let raw = match self.cache.get(PROJECTS_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!("Failed to read local board cache: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(projects) => Some(projects),
            Err(e) => {
                tracing::warn!("Ignoring malformed local board cache: {e}");
                None
            }
        }
    }
}

fn unchanged(project: Option<Project>) -> Mutation {
    Mutation {
        project,
        changed: false,
        sync: None,
    }
}
