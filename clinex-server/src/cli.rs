use clap::{Arg, ArgAction, Command, ValueHint};
use std::path::PathBuf;

/// CLI arguments for clinex-server
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub config_file: Option<PathBuf>,
    pub cors_origins: Vec<String>,
    pub max_request_size: Option<usize>,
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Parse command line arguments
    pub fn parse() -> Self {
        let matches = Command::new("clinex-server")
            .version(clinex::VERSION)
            .about("HTTP API server for clinical note entity extraction")
            .long_about(
                r#"Clinex Server accepts free-text clinical notes, extracts people, ages,
medications and clinical findings from them, and stores each note with its
entities.

The server can be configured through command line arguments or environment
variables. Command line arguments take precedence over environment variables.

Examples:
  clinex-server --port 8000
  clinex-server --config clinex.toml --cors-origin http://localhost:5173
  clinex-server --log-level debug"#,
            )
            .arg(
                Arg::new("host")
                    .long("host")
                    .value_name("HOST")
                    .help("Address to bind")
                    .long_help(
                        "Address for the HTTP server to bind.
Environment variable: CLINEX_HOST",
                    )
                    .value_hint(ValueHint::Hostname),
            )
            .arg(
                Arg::new("port")
                    .short('p')
                    .long("port")
                    .value_name("PORT")
                    .help("Port to listen on")
                    .long_help(
                        "Port number for the HTTP server to listen on.
Environment variable: CLINEX_PORT",
                    )
                    .value_hint(ValueHint::Other)
                    .value_parser(clap::value_parser!(u16)),
            )
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path")
                    .long_help(
                        "Path to a TOML, YAML or JSON file with tagger, extraction,
storage and logging settings. CLINEX_* environment variables are applied
on top of it.
Environment variable: CLINEX_CONFIG_FILE",
                    )
                    .value_hint(ValueHint::FilePath)
                    .value_parser(clap::value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("cors_origin")
                    .long("cors-origin")
                    .value_name("ORIGIN")
                    .help("Allowed CORS origin (repeatable, \"*\" for any)")
                    .long_help(
                        "Origin allowed to call the API from a browser. May be given
more than once. Defaults to http://localhost:5173.
Environment variable: CLINEX_CORS_ORIGINS (comma-separated)",
                    )
                    .action(ArgAction::Append),
            )
            .arg(
                Arg::new("max_request_size")
                    .long("max-request-size")
                    .value_name("BYTES")
                    .help("Maximum request body size in bytes")
                    .long_help(
                        "Maximum size allowed for HTTP request bodies.
Larger requests will be rejected.
Environment variable: CLINEX_MAX_REQUEST_SIZE",
                    )
                    .value_parser(clap::value_parser!(usize)),
            )
            .arg(
                Arg::new("log_level")
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Logging level")
                    .long_help(
                        "Set the logging level. Valid values: error, warn, info, debug, trace
Environment variable: CLINEX_LOGGING__LEVEL or RUST_LOG",
                    )
                    .value_parser(["error", "warn", "info", "debug", "trace"]),
            )
            .arg(
                Arg::new("help_env")
                    .long("help-env")
                    .help("Show all environment variables")
                    .action(ArgAction::SetTrue),
            )
            .get_matches();

        if matches.get_flag("help_env") {
            Self::print_env_help();
            std::process::exit(0);
        }

        Self {
            host: matches.get_one::<String>("host").cloned(),
            port: matches.get_one::<u16>("port").copied(),
            config_file: matches.get_one::<PathBuf>("config").cloned(),
            cors_origins: matches
                .get_many::<String>("cors_origin")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            max_request_size: matches.get_one::<usize>("max_request_size").copied(),
            log_level: matches.get_one::<String>("log_level").cloned(),
        }
    }

    /// Print environment variable help
    fn print_env_help() {
        println!("Clinex Server Environment Variables");
        println!("===================================");
        println!();
        println!("Server:");
        println!("  CLINEX_HOST                       - Bind address (default: 0.0.0.0)");
        println!("  CLINEX_PORT                       - Server port (default: 8000)");
        println!("  CLINEX_MAX_REQUEST_SIZE           - Max request body in bytes (default: 1MB)");
        println!("  CLINEX_CORS_ORIGINS               - Comma-separated allowed origins");
        println!("  CLINEX_CONFIG_FILE                - Library configuration file");
        println!();
        println!("Library (nested keys use a double underscore):");
        println!("  CLINEX_TAGGERS__CLINICAL__TYPE    - rules | remote");
        println!("  CLINEX_TAGGERS__CLINICAL__BASE_URL - Remote clinical NER service");
        println!("  CLINEX_TAGGERS__GENERAL__TYPE     - rules | remote");
        println!("  CLINEX_TAGGERS__GENERAL__BASE_URL - Remote general NER service");
        println!("  CLINEX_EXTRACTION__AGE_CAPTURE    - number | phrase");
        println!("  CLINEX_STORAGE__ENGINE            - memory | rocksdb");
        println!("  CLINEX_STORAGE__PATH              - RocksDB directory");
        println!("  CLINEX_LOGGING__LEVEL             - error, warn, info, debug, trace");
        println!("  CLINEX_LOGGING__FORMAT            - default, json, compact, pretty");
        println!();
        println!("Logging:");
        println!("  RUST_LOG                          - Overrides the configured filter");
        println!();
        println!("Note: Command line arguments take precedence over environment variables.");
    }
}
