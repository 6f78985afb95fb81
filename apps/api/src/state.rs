use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::{Config, StorageBackend};
use crate::errors::AppError;
use crate::storage::{FileStore, Storage};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
    pub config: Config,
}

impl AppState {
    /// Opens the configured backend.
    pub fn from_config(config: Config) -> Result<Self> {
        let storage = match config.storage_backend {
            StorageBackend::File => {
                let store = FileStore::open(&config.data_dir).with_context(|| {
                    format!("Failed to open data directory {}", config.data_dir.display())
                })?;
                Storage::new(Box::new(store), config.history_cap)
            }
            StorageBackend::Memory => Storage::in_memory(config.history_cap),
        };
        Ok(Self::new(storage, config))
    }

    pub fn new(storage: Storage, config: Config) -> Self {
        Self {
            storage: Arc::new(storage),
            config,
        }
    }

    /// Runs a store operation on the blocking pool.
    ///
    /// File writes fsync while the storage write lock is held, so they must stay off the
    /// async worker threads.
    pub async fn with_storage<T, E, F>(&self, op: F) -> Result<T, AppError>
    where
        F: FnOnce(&Storage) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: Into<AppError> + Send + 'static,
    {
        let storage = Arc::clone(&self.storage);
        tokio::task::spawn_blocking(move || op(&storage))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in store operation: {e}"))
            })?
            .map_err(Into::into)
    }
}
