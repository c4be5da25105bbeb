use clap::{CommandFactory, Parser};
use clap_complete::generate;
use clinex_cli::commands::Commands;
use clinex_cli::handlers::*;
use clinex_cli::{ClinexCliContext, output_error_json, print_categories, print_health};
use is_terminal::IsTerminal;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "clinex-cli")]
#[command(about = "Clinical note entity extraction CLI", long_about = None)]
#[command(version = clinex::VERSION)]
struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Store notes in a RocksDB database at this directory
    #[arg(long, short, global = true)]
    data_dir: Option<String>,

    /// Output format (table, json) - use json for tool integration
    #[arg(long, short, default_value = "table", global = true)]
    output: String,

    /// Use machine-readable output (alias for --output json)
    #[arg(long, global = true)]
    machine: bool,

    /// Verbose output (debug level logging)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Quiet mode (suppress all logging output)
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli_args = Cli::parse();

    // Priority: machine flag > env var > cli arg
    let output_format = if cli_args.machine {
        "json".to_string()
    } else if let Ok(env_output) = std::env::var("CLINEX_OUTPUT") {
        env_output
    } else {
        cli_args.output.clone()
    };

    let is_quiet = cli_args.quiet
        || std::env::var("CLINEX_QUIET")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

    let log_level = if is_quiet || cli_args.machine {
        Level::ERROR
    } else if cli_args.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    if let Err(e) = run(cli_args, &output_format).await {
        output_error_json(&e, &output_format);
        std::process::exit(1);
    }
}

async fn run(cli_args: Cli, output_format: &str) -> clinex::Result<()> {
    match &cli_args.command {
        Commands::Version => {
            println!("Clinex CLI v{}", clinex::VERSION);
            return Ok(());
        }
        Commands::Categories => {
            print_categories();
            return Ok(());
        }
        Commands::Completions(args) => {
            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "clinex-cli", &mut std::io::stdout());
            return Ok(());
        }
        _ => {}
    }

    let ctx = ClinexCliContext::new(cli_args.config.as_deref(), cli_args.data_dir).await?;

    match cli_args.command {
        Commands::Diagnose => {
            let report = ctx.note_manager.health().await;
            if output_format == "json" {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
                );
            } else {
                print_health(&report);
            }
        }
        Commands::Extract(args) => {
            handle_extract_command(args, &ctx, output_format).await?;
        }
        Commands::Notes(args) => {
            handle_list_notes_command(args, &ctx, output_format).await?;
        }
        Commands::Note(args) => {
            handle_get_note_command(args, &ctx, output_format).await?;
        }
        Commands::Version | Commands::Categories | Commands::Completions(_) => {}
    }

    Ok(())
}
