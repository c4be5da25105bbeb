//! Core note-processing functionality

pub mod note_manager;

pub use note_manager::{HealthReport, NoteManager, TaggerStatus};
