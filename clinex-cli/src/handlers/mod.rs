//! Command handlers for the Clinex CLI

pub mod extract;
pub mod note;

pub use extract::handle_extract_command;
pub use note::{handle_get_note_command, handle_list_notes_command};
