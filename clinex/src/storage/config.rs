//! Configuration structures for note storage

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// SurrealDB engine used for note storage
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageEngine {
    /// In-memory storage (for testing and ephemeral runs)
    Memory,
    /// RocksDB on-disk storage (embedded)
    RocksDb,
}

/// Note storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage engine
    pub engine: StorageEngine,

    /// Directory for on-disk engines
    pub path: PathBuf,

    /// SurrealDB namespace
    pub namespace: String,

    /// SurrealDB database name
    pub database: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let path = directories::ProjectDirs::from("org", "clinex", "clinex")
            .map(|dirs| dirs.data_dir().join("notes"))
            .unwrap_or_else(|| PathBuf::from("./data/notes"));

        Self {
            engine: StorageEngine::Memory,
            path,
            namespace: "clinex".to_string(),
            database: "notes".to_string(),
        }
    }
}

impl StorageConfig {
    /// In-memory storage with default namespace and database.
    pub fn memory() -> Self {
        Self {
            engine: StorageEngine::Memory,
            ..Self::default()
        }
    }

    /// RocksDB storage rooted at `path`.
    pub fn rocksdb(path: impl Into<PathBuf>) -> Self {
        Self {
            engine: StorageEngine::RocksDb,
            path: path.into(),
            ..Self::default()
        }
    }
}
