mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::ParamArgs;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Input-sequence language toolchain.
#[derive(Parser)]
#[command(name = "inseq", version, about = "Input-sequence language toolchain")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log parser activity to stderr (overrides RUST_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one input-sequence expression and print its intervals
    Parse {
        /// The expression, e.g. "1 3; 7 5; 0"
        #[arg(allow_hyphen_values = true)]
        text: String,
        #[command(flatten)]
        params: ParamArgs,
    },

    /// Parse every expression in a file, one per line
    Check {
        /// File of expressions; blank lines and lines starting with '#' are skipped
        file: PathBuf,
        #[command(flatten)]
        params: ParamArgs,
    },

    /// Reduce diagnostic text to its one-sentence end-user form
    Abridge {
        /// Diagnostic text as produced by `parse`
        text: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Parse { text, params } => {
            commands::parse::cmd_parse(&text, &params, cli.output, cli.quiet);
        }
        Commands::Check { file, params } => {
            commands::check::cmd_check(&file, &params, cli.output, cli.quiet);
        }
        Commands::Abridge { text } => {
            commands::abridge::cmd_abridge(&text, cli.output, cli.quiet);
        }
    }
}

/// Send `tracing` events to stderr. `--verbose` forces debug level;
/// otherwise `RUST_LOG` applies, defaulting to warnings only.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .init();
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
