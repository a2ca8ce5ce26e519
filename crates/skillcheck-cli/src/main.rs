//! skillcheck CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "skillcheck", version, about = "Assessment authoring and scoring toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an assessment against an answer sheet
    Run {
        /// Path to the assessment .toml file
        #[arg(long)]
        assessment: PathBuf,

        /// Path to the answer sheet .toml file
        #[arg(long)]
        answers: PathBuf,

        /// Seconds of session time to replay before scoring; if the time
        /// limit is exceeded, the session auto-submits
        #[arg(long)]
        elapsed_secs: Option<u64>,

        /// Output directory
        #[arg(long, default_value = "./skillcheck-results")]
        output: PathBuf,

        /// Output format: json, markdown, html, all
        #[arg(long, default_value = "json")]
        format: String,

        /// User profile JSON to record the score on
        #[arg(long)]
        profile: Option<PathBuf>,
    },

    /// Validate assessment TOML files
    Validate {
        /// Path to an assessment file or directory
        #[arg(long)]
        assessment: PathBuf,
    },

    /// Re-render a saved score report
    Report {
        /// Path to a report JSON file
        #[arg(long)]
        report: PathBuf,

        /// Output format: text, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create a starter assessment and answer sheet
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("skillcheck=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            assessment,
            answers,
            elapsed_secs,
            output,
            format,
            profile,
        } => commands::run::execute(assessment, answers, elapsed_secs, output, format, profile),
        Commands::Validate { assessment } => commands::validate::execute(assessment),
        Commands::Report { report, format } => commands::report::execute(report, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
