pub mod auth;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod ids;
pub mod models;
pub mod storage;
pub mod types;

use axum::extract::FromRef;

use crate::config::{Config, StorageKind};
use crate::db::Database;
use crate::storage::{AnyStorage, FileStorage, MemoryStorage};

pub use error::{ApiError, ApiResult};

#[derive(Clone, FromRef)]
pub struct App {
    pub config: Config,
    pub database: Database,
    pub storage: AnyStorage,
}

impl App {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let database = Database::connect(&config.database.url).await?;

        let storage = match config.storage.kind {
            StorageKind::File => FileStorage::new(&config.storage.dir).await?.into(),
            StorageKind::Memory => MemoryStorage::new().into(),
        };

        Ok(App {
            config,
            database,
            storage,
        })
    }
}
