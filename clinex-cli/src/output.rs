use clinex::ClinexError;
use clinex::core::HealthReport;
use clinex::extraction::{Category, EntitySet};
use clinex::storage::ClinicalNote;
use colored::*;
use serde_json::json;

use crate::utils::preview;

pub struct CliColors;

impl CliColors {
    pub fn success() -> Color {
        Color::TrueColor {
            r: 34,
            g: 197,
            b: 94,
        }
    }

    pub fn error() -> Color {
        Color::TrueColor {
            r: 239,
            g: 68,
            b: 68,
        }
    }

    pub fn warning() -> Color {
        Color::TrueColor {
            r: 245,
            g: 158,
            b: 11,
        }
    }

    pub fn info() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }

    pub fn category() -> Color {
        Color::TrueColor {
            r: 168,
            g: 85,
            b: 247,
        }
    }

    pub fn muted() -> Color {
        Color::TrueColor {
            r: 148,
            g: 163,
            b: 184,
        }
    }

    pub fn primary() -> Color {
        Color::White
    }

    pub fn accent() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }
}

/// Stable machine-readable code for an error.
pub fn error_code(error: &ClinexError) -> &'static str {
    match error {
        ClinexError::EmptyInput => "EMPTY_INPUT",
        ClinexError::TaggerUnavailable { .. } => "TAGGER_UNAVAILABLE",
        ClinexError::Tagger(_) => "TAGGER_ERROR",
        ClinexError::NoteNotFound(_) => "NOTE_NOT_FOUND",
        ClinexError::Storage(_) => "STORAGE_ERROR",
        ClinexError::Configuration(_) => "CONFIGURATION_ERROR",
        ClinexError::Logging(_) => "LOGGING_ERROR",
        ClinexError::Other(_) => "OTHER_ERROR",
    }
}

/// Output a ClinexError in structured JSON format
pub fn output_error_json(error: &ClinexError, output_format: &str) {
    if output_format == "json" {
        let mut error_response = json!({
            "error": true,
            "code": error_code(error),
            "message": error.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        match error {
            ClinexError::TaggerUnavailable { name, .. } => {
                error_response["details"] = json!({ "tagger": name });
            }
            ClinexError::NoteNotFound(id) => {
                error_response["details"] = json!({ "id": id });
            }
            _ => {}
        }

        eprintln!(
            "{}",
            serde_json::to_string_pretty(&error_response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        eprintln!("{}", format_error(&error.to_string()));
    }
}

pub fn format_success(msg: &str) -> String {
    format!(
        "{} {}",
        "✓".color(CliColors::success()).bold(),
        msg.color(CliColors::success())
    )
}

pub fn format_error(msg: &str) -> String {
    format!(
        "{} {}",
        "✗".color(CliColors::error()).bold(),
        msg.color(CliColors::error())
    )
}

pub fn format_warning(msg: &str) -> String {
    format!(
        "{} {}",
        "⚠".color(CliColors::warning()).bold(),
        msg.color(CliColors::warning())
    )
}

pub fn format_info(msg: &str) -> String {
    format!(
        "{} {}",
        "ℹ".color(CliColors::info()).bold(),
        msg.color(CliColors::info())
    )
}

pub fn print_entities(entities: &EntitySet) {
    for (category, values) in entities.iter() {
        let rendered = if values.is_empty() {
            "-".color(CliColors::muted())
        } else {
            values
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
                .color(CliColors::primary())
        };
        println!(
            "  {:<12} {}",
            category.as_str().color(CliColors::category()),
            rendered
        );
    }
}

pub fn print_note(note: &ClinicalNote) {
    println!("{}", "━━━ Note Details ━━━".color(CliColors::accent()).bold());
    println!(
        "{}: {}",
        "ID".color(CliColors::muted()),
        note.id.color(CliColors::accent()).bold()
    );
    println!(
        "{}: {}",
        "Created".color(CliColors::muted()),
        note.created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .color(CliColors::primary())
    );
    println!("{}: {}", "Text".color(CliColors::muted()), note.text);
    println!("{}:", "Entities".color(CliColors::muted()));
    print_entities(&note.entities);
}

pub fn print_note_list(notes: &[ClinicalNote]) {
    if notes.is_empty() {
        println!("{}", format_info("No notes found."));
        return;
    }

    println!("{}", format_info(&format!("Found {} notes:", notes.len())));
    println!();

    println!(
        "{:<36} {:<20} {:<8} {}",
        "ID".color(CliColors::muted()).bold(),
        "Created".color(CliColors::muted()).bold(),
        "Entities".color(CliColors::muted()).bold(),
        "Text".color(CliColors::muted()).bold()
    );
    println!("{}", "─".repeat(100).color(CliColors::muted()));

    for note in notes {
        println!(
            "{:<36} {:<20} {:<8} {}",
            note.id.color(CliColors::accent()),
            note.created_at
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .color(CliColors::muted()),
            note.entities.total(),
            preview(&note.text, 40)
        );
    }
}

pub fn print_categories() {
    for category in Category::ALL {
        println!("{}", category.as_str().color(CliColors::category()));
    }
}

pub fn print_health(report: &HealthReport) {
    if report.storage {
        println!("{}", format_success("Storage: Healthy"));
    } else {
        println!("{}", format_error("Storage: Unhealthy"));
    }

    if let Some(count) = report.note_count {
        println!("{}", format_info(&format!("Stored notes: {}", count)));
    }

    for tagger in &report.taggers {
        let line = format!("Tagger {} ({})", tagger.role, tagger.provider);
        if tagger.loaded {
            println!("{}", format_success(&format!("{}: Loaded", line)));
        } else {
            let reason = tagger.error.as_deref().unwrap_or("unknown error");
            println!("{}", format_error(&format!("{}: {}", line, reason)));
        }
    }
}
