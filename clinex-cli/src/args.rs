//! Command argument structures

use clap::Args;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub struct ExtractArgs {
    /// Note text. Use "-" or omit to read from stdin
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the note text from a file
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Persist the note and its entities after extraction
    #[arg(long, short)]
    pub store: bool,
}

#[derive(Args, Debug)]
pub struct ListNotesArgs {
    /// Maximum number of notes to show
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct GetNoteArgs {
    /// Note ID or a unique prefix of one
    pub id: String,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
