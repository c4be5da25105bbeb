//! SurrealDB-backed note store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use surrealdb::{Connection, Surreal};

use super::errors::StorageError;
use super::models::ClinicalNote;
use super::traits::NoteStore;

/// Internal representation of a note record
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SurrealNote {
    note_id: String,
    text: String,
    entities: Value,
    created_at: DateTime<Utc>,
}

impl TryFrom<SurrealNote> for ClinicalNote {
    type Error = StorageError;

    fn try_from(record: SurrealNote) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.note_id,
            text: record.text,
            entities: serde_json::from_value(record.entities)?,
            created_at: record.created_at,
        })
    }
}

#[derive(Debug, Deserialize)]
struct CountRow {
    count: usize,
}

/// Note store over any SurrealDB connection
#[derive(Debug, Clone)]
pub struct SurrealNoteStore<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    client: Surreal<C>,
}

impl<C> SurrealNoteStore<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    /// Select the namespace and database and define the note table.
    pub async fn new(
        client: Surreal<C>,
        namespace: &str,
        database: &str,
    ) -> Result<Self, StorageError> {
        client.use_ns(namespace).use_db(database).await.map_err(|e| {
            StorageError::Connection(format!("Failed to set namespace/database: {}", e))
        })?;

        let store = Self { client };
        store.initialize_schema().await?;
        Ok(store)
    }

    async fn initialize_schema(&self) -> Result<(), StorageError> {
        let schema = r#"
            DEFINE TABLE IF NOT EXISTS note SCHEMALESS
            COMMENT "Clinical notes with reconciled entities";

            DEFINE FIELD IF NOT EXISTS note_id ON note TYPE string;
            DEFINE FIELD IF NOT EXISTS text ON note TYPE string;
            DEFINE FIELD IF NOT EXISTS entities ON note TYPE object DEFAULT {};
            DEFINE FIELD IF NOT EXISTS created_at ON note TYPE datetime DEFAULT time::now();

            DEFINE INDEX IF NOT EXISTS note_id_idx ON note FIELDS note_id UNIQUE;
            DEFINE INDEX IF NOT EXISTS note_created_idx ON note FIELDS created_at;
        "#;

        self.client
            .query(schema)
            .await
            .map_err(|e| StorageError::Query(format!("Failed to define note schema: {}", e)))?
            .check()
            .map_err(|e| StorageError::Query(format!("Failed to define note schema: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl<C> NoteStore for SurrealNoteStore<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn create_note(&self, note: ClinicalNote) -> Result<ClinicalNote, StorageError> {
        let query = r#"
            CREATE note CONTENT {
                note_id: $note_id,
                text: $text,
                entities: $entities,
                created_at: type::datetime($created_at)
            }
        "#;

        let entities = serde_json::to_value(&note.entities)?;

        let mut result = self
            .client
            .query(query)
            .bind(("note_id", note.id.clone()))
            .bind(("text", note.text.clone()))
            .bind(("entities", entities))
            .bind(("created_at", note.created_at.to_rfc3339()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to create note: {}", e)))?;

        let created: Vec<SurrealNote> = result
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract created note: {}", e)))?;

        let created = created
            .into_iter()
            .next()
            .ok_or_else(|| StorageError::Internal("No note created".to_string()))?;

        tracing::debug!(note_id = %note.id, "Stored note");
        ClinicalNote::try_from(created)
    }

    async fn get_note(&self, id: &str) -> Result<Option<ClinicalNote>, StorageError> {
        let mut result = self
            .client
            .query("SELECT * FROM note WHERE note_id = $note_id LIMIT 1")
            .bind(("note_id", id.to_string()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to get note: {}", e)))?;

        let notes: Vec<SurrealNote> = result
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract note: {}", e)))?;

        notes.into_iter().next().map(ClinicalNote::try_from).transpose()
    }

    async fn list_notes(&self, limit: Option<usize>) -> Result<Vec<ClinicalNote>, StorageError> {
        let mut query = "SELECT * FROM note ORDER BY created_at DESC".to_string();
        if let Some(limit) = limit {
            query.push_str(&format!(" LIMIT {}", limit));
        }

        let mut result = self
            .client
            .query(&query)
            .await
            .map_err(|e| StorageError::Query(format!("Failed to list notes: {}", e)))?;

        let notes: Vec<SurrealNote> = result
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract notes: {}", e)))?;

        notes.into_iter().map(ClinicalNote::try_from).collect()
    }

    async fn count_notes(&self) -> Result<usize, StorageError> {
        let mut result = self
            .client
            .query("SELECT count() AS count FROM note GROUP ALL")
            .await
            .map_err(|e| StorageError::Query(format!("Failed to count notes: {}", e)))?;

        let rows: Vec<CountRow> = result
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract note count: {}", e)))?;

        Ok(rows.first().map(|row| row.count).unwrap_or(0))
    }

    async fn health_check(&self) -> Result<bool, StorageError> {
        self.client
            .query("INFO FOR DB")
            .await
            .map_err(|e| StorageError::Connection(format!("Health check failed: {}", e)))?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{Category, EntitySet};
    use surrealdb::engine::local::Mem;

    async fn memory_store() -> SurrealNoteStore<surrealdb::engine::local::Db> {
        let client = Surreal::new::<Mem>(()).await.unwrap();
        SurrealNoteStore::new(client, "test", "notes").await.unwrap()
    }

    fn sample_note(text: &str) -> ClinicalNote {
        let mut entities = EntitySet::new();
        entities.insert(Category::Drug, "Aspirin");
        entities.insert(Category::Strength, "81mg");
        ClinicalNote::new(text, entities)
    }

    #[tokio::test]
    async fn test_create_and_get_note() {
        let store = memory_store().await;
        let note = sample_note("Patient takes Aspirin 81mg");

        let created = store.create_note(note.clone()).await.unwrap();
        assert_eq!(created.id, note.id);
        assert_eq!(created.entities, note.entities);

        let fetched = store.get_note(&note.id).await.unwrap().unwrap();
        assert_eq!(fetched.text, "Patient takes Aspirin 81mg");
        assert!(fetched.entities.contains(Category::Drug, "Aspirin"));
        assert!(fetched.entities.get(Category::Person).is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_note() {
        let store = memory_store().await;
        assert!(store.get_note("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_notes_newest_first() {
        let store = memory_store().await;

        let mut first = sample_note("first");
        first.created_at = Utc::now() - chrono::Duration::minutes(5);
        let second = sample_note("second");

        store.create_note(first).await.unwrap();
        store.create_note(second).await.unwrap();

        let notes = store.list_notes(None).await.unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].text, "second");
        assert_eq!(notes[1].text, "first");

        let limited = store.list_notes(Some(1)).await.unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(store.count_notes().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_health_check() {
        let store = memory_store().await;
        assert!(store.health_check().await.unwrap());
    }
}
