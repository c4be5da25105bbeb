//! Extract command handler

use crate::args::ExtractArgs;
use crate::context::ClinexCliContext;
use crate::output::*;
use crate::utils::read_input;
use serde_json::json;

/// Run extraction on the resolved input. Returns the stored note ID when
/// `--store` was given.
pub async fn handle_extract_command(
    args: ExtractArgs,
    ctx: &ClinexCliContext,
    output_format: &str,
) -> clinex::Result<Option<String>> {
    let text = read_input(args.text, args.file.as_deref())?;

    if args.store {
        let note = ctx.note_manager.submit_note(&text).await?;

        if output_format == "json" {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "note_id": note.id,
                    "created_at": note.created_at,
                    "entities": note.entities,
                }))
                .unwrap_or_else(|_| "{}".to_string())
            );
        } else {
            println!("{}", format_success(&format!("Note stored with ID: {}", note.id)));
            print_entities(&note.entities);
        }
        return Ok(Some(note.id));
    }

    let entities = ctx.note_manager.extract(&text).await?;

    if output_format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "entities": entities }))
                .unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        if entities.is_empty() {
            println!("{}", format_info("No entities found."));
        }
        print_entities(&entities);
    }

    Ok(None)
}
