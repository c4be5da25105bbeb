//! Integration tests for the Clinex CLI handlers
//!
//! These run the handlers against an in-memory store with the built-in
//! rule taggers, so no external services are needed.

use clinex::ClinexError;
use clinex::config::ConfigBuilder;
use clinex_cli::ClinexCliContext;
use clinex_cli::args::{ExtractArgs, GetNoteArgs, ListNotesArgs};
use clinex_cli::handlers::*;
use clinex_cli::{read_input, resolve_note_id};
use std::io::Write;
use tempfile::NamedTempFile;

const NOTE: &str = "A 45-year-old man was given Aspirin 81mg once daily.";

async fn create_test_context() -> ClinexCliContext {
    let config = ConfigBuilder::testing()
        .build()
        .expect("Failed to build config");

    ClinexCliContext::from_config(config)
        .await
        .expect("Failed to create CLI context")
}

fn extract_args(text: &str, store: bool) -> ExtractArgs {
    ExtractArgs {
        text: Some(text.to_string()),
        file: None,
        store,
    }
}

#[tokio::test]
async fn test_extract_without_store_persists_nothing() {
    let ctx = create_test_context().await;

    let stored = handle_extract_command(extract_args(NOTE, false), &ctx, "json")
        .await
        .unwrap();

    assert!(stored.is_none());
    assert_eq!(ctx.note_manager.count_notes().await.unwrap(), 0);
}

#[tokio::test]
async fn test_extract_with_store_persists_note() {
    let ctx = create_test_context().await;

    let stored = handle_extract_command(extract_args(NOTE, true), &ctx, "table")
        .await
        .unwrap()
        .expect("note should be stored");

    let note = ctx.note_manager.get_note(&stored).await.unwrap().unwrap();
    assert_eq!(note.text, NOTE);
    assert!(note.entities.contains(clinex::extraction::Category::Drug, "Aspirin"));
    assert!(note.entities.contains(clinex::extraction::Category::Age, "45"));
}

#[tokio::test]
async fn test_extract_empty_text_fails() {
    let ctx = create_test_context().await;

    let result = handle_extract_command(extract_args("", true), &ctx, "json").await;

    assert!(matches!(result, Err(ClinexError::EmptyInput)));
    assert_eq!(ctx.note_manager.count_notes().await.unwrap(), 0);
}

#[test]
fn test_read_input_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", NOTE).unwrap();

    let text = read_input(None, Some(file.path())).unwrap();
    assert_eq!(text, NOTE);
}

#[test]
fn test_read_input_missing_file() {
    let result = read_input(None, Some(std::path::Path::new("/nonexistent/note.txt")));
    assert!(matches!(result, Err(ClinexError::Other(_))));
}

mod notes {
    use super::*;

    #[tokio::test]
    async fn test_list_and_get_notes() {
        let ctx = create_test_context().await;
        let id = handle_extract_command(extract_args(NOTE, true), &ctx, "json")
            .await
            .unwrap()
            .unwrap();

        handle_list_notes_command(ListNotesArgs { limit: 10 }, &ctx, "json")
            .await
            .unwrap();
        handle_get_note_command(GetNoteArgs { id: id.clone() }, &ctx, "table")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_get_missing_note() {
        let ctx = create_test_context().await;

        let result = handle_get_note_command(
            GetNoteArgs {
                id: "does-not-exist".to_string(),
            },
            &ctx,
            "json",
        )
        .await;

        assert!(matches!(result, Err(ClinexError::NoteNotFound(_))));
    }

    #[tokio::test]
    async fn test_resolve_note_id_by_prefix() {
        let ctx = create_test_context().await;
        let id = handle_extract_command(extract_args(NOTE, true), &ctx, "json")
            .await
            .unwrap()
            .unwrap();

        let resolved = resolve_note_id(&ctx, &id[..8]).await.unwrap();
        assert_eq!(resolved, id);

        let resolved = resolve_note_id(&ctx, &id).await.unwrap();
        assert_eq!(resolved, id);
    }
}
