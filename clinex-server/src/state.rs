//! Application state management

use clinex::core::NoteManager;

use crate::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Debug)]
pub struct AppState {
    /// Extraction and note storage
    pub note_manager: NoteManager,

    /// Server configuration
    pub config: ServerConfig,
}

impl AppState {
    /// Create new application state
    pub fn new(note_manager: NoteManager, config: ServerConfig) -> Self {
        Self {
            note_manager,
            config,
        }
    }
}
