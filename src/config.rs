use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub database: Database,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default)]
    pub limits: Limits,
}

impl Config {
    /// Load from `config.toml` (optional) layered with `PASTEVAULT_*`
    /// environment variables.
    pub fn load() -> anyhow::Result<Self> {
        ::config::Config::builder()
            .add_source(::config::File::with_name("config.toml").required(false))
            .add_source(::config::Environment::with_prefix("PASTEVAULT").separator("__"))
            .build()
            .context("failed to read config")?
            .try_deserialize()
            .context("failed to deserialize config")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Database {
    pub url: String,
}

impl Default for Database {
    fn default() -> Self {
        Database {
            url: "sqlite://pastevault.db?mode=rwc".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
    pub kind: StorageKind,
    pub dir: PathBuf,
}

impl Default for Storage {
    fn default() -> Self {
        Storage {
            kind: StorageKind::File,
            dir: "uploads".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    File,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Limits {
    /// Hard cap on request bodies, enforced before any policy check.
    pub max_upload_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_upload_size: 64 * 1024 * 1024,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".into()
}

fn default_port() -> u16 {
    8080
}
