use crate::context::ClinexCliContext;
use clinex::ClinexError;
use is_terminal::IsTerminal;
use std::io::Read;
use std::path::Path;

/// Resolve the note text from a file, an argument, or stdin.
pub fn read_input(text: Option<String>, file: Option<&Path>) -> clinex::Result<String> {
    if let Some(path) = file {
        return std::fs::read_to_string(path).map_err(|e| {
            ClinexError::Other(format!("Failed to read {}: {}", path.display(), e))
        });
    }

    match text {
        Some(text) if text != "-" => Ok(text),
        _ => {
            let mut stdin = std::io::stdin();
            if stdin.is_terminal() {
                return Err(ClinexError::EmptyInput);
            }
            let mut buffer = String::new();
            stdin
                .read_to_string(&mut buffer)
                .map_err(|e| ClinexError::Other(format!("Failed to read stdin: {}", e)))?;
            Ok(buffer)
        }
    }
}

/// Accept a full note ID or an unambiguous prefix of one.
pub async fn resolve_note_id(ctx: &ClinexCliContext, id: &str) -> clinex::Result<String> {
    if ctx.note_manager.get_note(id).await?.is_some() {
        return Ok(id.to_string());
    }

    // Full UUIDs are 36 characters; anything that long is not a prefix
    if id.len() >= 36 {
        return Err(ClinexError::NoteNotFound(id.to_string()));
    }

    let notes = ctx.note_manager.list_notes(None).await?;
    let matches: Vec<_> = notes.iter().filter(|n| n.id.starts_with(id)).collect();

    match matches.len() {
        0 => Err(ClinexError::NoteNotFound(id.to_string())),
        1 => Ok(matches[0].id.clone()),
        _ => {
            let suggestions: Vec<String> = matches
                .iter()
                .take(5)
                .map(|n| format!("  - {} ({})", n.id, preview(&n.text, 50)))
                .collect();
            Err(ClinexError::Other(format!(
                "Ambiguous ID prefix '{}': {} matches found.\nSuggestions:\n{}",
                id,
                matches.len(),
                suggestions.join("\n")
            )))
        }
    }
}

/// Truncate to at most `max` characters, appending "..." when cut.
pub fn preview(text: &str, max: usize) -> String {
    let flattened = text.replace('\n', " ");
    if flattened.chars().count() <= max {
        return flattened;
    }
    let cut: String = flattened.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut)
}
