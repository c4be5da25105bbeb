pub mod args;
pub mod commands;
pub mod context;
pub mod handlers;
pub mod output;
pub mod utils;

pub use context::ClinexCliContext;
pub use output::{
    CliColors, format_error, format_info, format_success, format_warning, output_error_json,
    print_categories, print_entities, print_health, print_note, print_note_list,
};
pub use utils::{read_input, resolve_note_id};
