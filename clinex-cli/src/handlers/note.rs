//! Stored note handlers

use crate::args::{GetNoteArgs, ListNotesArgs};
use crate::context::ClinexCliContext;
use crate::output::*;
use crate::utils::resolve_note_id;
use clinex::ClinexError;

pub async fn handle_list_notes_command(
    args: ListNotesArgs,
    ctx: &ClinexCliContext,
    output_format: &str,
) -> clinex::Result<()> {
    let notes = ctx.note_manager.list_notes(Some(args.limit)).await?;

    if output_format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&notes).unwrap_or_else(|_| "[]".to_string())
        );
    } else {
        print_note_list(&notes);
    }

    Ok(())
}

pub async fn handle_get_note_command(
    args: GetNoteArgs,
    ctx: &ClinexCliContext,
    output_format: &str,
) -> clinex::Result<()> {
    let id = resolve_note_id(ctx, &args.id).await?;
    let note = ctx
        .note_manager
        .get_note(&id)
        .await?
        .ok_or(ClinexError::NoteNotFound(id))?;

    if output_format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&note).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        print_note(&note);
    }

    Ok(())
}
