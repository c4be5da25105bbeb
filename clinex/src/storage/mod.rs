//! Storage for extracted clinical notes.
//!
//! Notes are persisted only after extraction succeeds, together with their
//! reconciled entity set. SurrealDB runs embedded, either in memory or on
//! RocksDB.

pub mod config;
pub mod errors;
pub mod models;
pub mod surreal;
pub mod traits;

pub use config::{StorageConfig, StorageEngine};
pub use errors::StorageError;
pub use models::ClinicalNote;
pub use surreal::SurrealNoteStore;
pub use traits::NoteStore;

use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::{Mem, RocksDb};

/// Create a note store for the configured engine.
pub async fn create_note_store(config: &StorageConfig) -> Result<Arc<dyn NoteStore>, StorageError> {
    match config.engine {
        StorageEngine::Memory => {
            tracing::info!("Creating note store with in-memory engine");
            let client = Surreal::new::<Mem>(()).await.map_err(|e| {
                StorageError::Connection(format!("Failed to create memory client: {}", e))
            })?;
            let store = SurrealNoteStore::new(client, &config.namespace, &config.database).await?;
            Ok(Arc::new(store))
        }
        StorageEngine::RocksDb => {
            tracing::info!(
                "Creating note store with RocksDB engine at {}",
                config.path.display()
            );
            if let Some(parent) = config.path.parent()
                && !parent.exists()
            {
                std::fs::create_dir_all(parent)?;
            }
            let path = config.path.to_string_lossy().to_string();
            let client = Surreal::new::<RocksDb>(path.as_str())
                .await
                .map_err(|e| {
                    StorageError::Connection(format!("Failed to create RocksDB client: {}", e))
                })?;
            let store = SurrealNoteStore::new(client, &config.namespace, &config.database).await?;
            Ok(Arc::new(store))
        }
    }
}
