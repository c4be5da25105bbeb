//! Storage traits

use async_trait::async_trait;

use super::errors::StorageError;
use super::models::ClinicalNote;

/// Persistence for extracted notes.
#[async_trait]
pub trait NoteStore: Send + Sync + std::fmt::Debug {
    /// Persist a note and return it as stored.
    async fn create_note(&self, note: ClinicalNote) -> Result<ClinicalNote, StorageError>;

    /// Get a note by its identifier.
    async fn get_note(&self, id: &str) -> Result<Option<ClinicalNote>, StorageError>;

    /// List notes, newest first.
    async fn list_notes(&self, limit: Option<usize>) -> Result<Vec<ClinicalNote>, StorageError>;

    /// Number of stored notes.
    async fn count_notes(&self) -> Result<usize, StorageError>;

    /// Check the backend is reachable.
    async fn health_check(&self) -> Result<bool, StorageError>;
}
