//! Command enum definitions

use crate::args::*;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Display version information
    Version,

    /// Check storage and tagger availability
    Diagnose,

    /// Extract entities from a clinical note
    #[command(long_about = r#"
Run both taggers and the age pass over a note and print the reconciled
entities for every category.

The note text comes from the TEXT argument, from --file, or from stdin
when TEXT is omitted or "-".

EXAMPLES:
  # Extract from an argument
  clinex-cli extract "A 45-year-old man was given Aspirin 81mg once daily."

  # Extract from a file and store the note
  clinex-cli extract --file note.txt --store

  # Pipe a note in and get JSON back
  cat note.txt | clinex-cli --output json extract
"#)]
    Extract(ExtractArgs),

    /// List stored notes, newest first
    Notes(ListNotesArgs),

    /// Show one stored note
    #[command(alias = "show")]
    Note(GetNoteArgs),

    /// Print the entity categories
    Categories,

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}
