use clinex::config::{ClinexConfig, ConfigLoader};
use clinex::prelude::*;
use clinex::storage::StorageConfig;
use std::path::Path;

pub struct ClinexCliContext {
    pub note_manager: NoteManager,
}

impl ClinexCliContext {
    /// Load configuration from `config_file` (or the default locations) and
    /// the environment. `data_dir` switches storage to RocksDB at that path.
    pub async fn new(config_file: Option<&Path>, data_dir: Option<String>) -> clinex::Result<Self> {
        let mut loader = ConfigLoader::new();
        match config_file {
            Some(path) => {
                loader.load_file(path)?;
            }
            None => {
                loader.load_default_files();
            }
        }
        let mut config = loader.load_env().extract()?;

        if let Some(dir) = data_dir {
            config.storage = StorageConfig::rocksdb(dir);
        }

        Self::from_config(config).await
    }

    pub async fn from_config(config: ClinexConfig) -> clinex::Result<Self> {
        let note_manager = NoteManager::from_config(config).await?;
        Ok(Self { note_manager })
    }
}
