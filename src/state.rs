use std::sync::Arc;

use crate::board::Board;
use crate::bridge::FileBridge;
use crate::config::Config;
use crate::gate::SessionGate;
use crate::storage::{FileStore, KvStore, MemoryStore};
use crate::sync::{HttpRemote, RemoteStore, SyncClient};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub board: Board,
    pub files: Option<FileBridge>,
}

impl AppState {
    /// Wire up storage, gate, sync and bridge from configuration.
    /// The board is not loaded yet; call `Board::init` afterwards.
    pub fn from_config(config: Config) -> Result<Self, String> {
        let cache = open_store(config.cache_dir.as_ref())?;
        let session = open_store(config.session_dir.as_ref())?;

        let remote: Option<Arc<dyn RemoteStore>> = match &config.sync_endpoint {
            Some(endpoint) => {
                tracing::info!("Remote sync enabled: {endpoint}");
                Some(Arc::new(HttpRemote::new(endpoint.clone())?))
            }
            None => {
                tracing::info!("Remote sync disabled");
                None
            }
        };

        let files = match &config.files_endpoint {
            Some(endpoint) => Some(FileBridge::new(endpoint.clone())?),
            None => None,
        };

        if config.admin_digest.is_none() {
            tracing::warn!("No admin digest configured, admin mode is unavailable");
        }

        let gate = SessionGate::new(config.admin_digest, session);
        let board = Board::new(config.lanes.clone(), gate, SyncClient::new(remote), cache);

        Ok(AppState {
            config,
            board,
            files,
        })
    }
}

fn open_store(dir: Option<&std::path::PathBuf>) -> Result<Arc<dyn KvStore>, String> {
    Ok(match dir {
        Some(dir) => Arc::new(FileStore::open(dir)?),
        None => Arc::new(MemoryStore::new()),
    })
}
