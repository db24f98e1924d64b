mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::calibration::CalibrationArgs;
use commands::evaluate::EvaluateArgs;
use commands::roc::RocArgs;

/// Binary classifier evaluation: discrimination and calibration
#[derive(Parser)]
#[command(
    name = "ceval",
    version,
    about = "Binary classifier evaluation: ROC/AUC and Hosmer-Lemeshow calibration",
    long_about = "Evaluate a binary classifier from observed 0/1 outcomes and predicted \
                  probabilities. Computes the empirical ROC curve, trapezoidal AUC with \
                  Hanley-McNeil and DeLong intervals, and Hosmer-Lemeshow calibration \
                  with ECE/MCE/ACE. Reads JSON or delimited text."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log debug diagnostics to stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// ROC curve, AUC, Gini and AUC confidence intervals
    Roc(RocArgs),
    /// Hosmer-Lemeshow goodness-of-fit and calibration errors
    Calibration(CalibrationArgs),
    /// ROC and calibration from one data set
    Evaluate(EvaluateArgs),
    /// Print the Hosmer-Lemeshow summary table as text
    HlReport(CalibrationArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "classeval_core={default_level},ceval={default_level}"
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Roc(args) => commands::roc::run_roc(args),
        Commands::Calibration(args) => commands::calibration::run_calibration(args),
        Commands::Evaluate(args) => commands::evaluate::run_evaluate(args),
        Commands::HlReport(args) => match commands::calibration::run_hl_report(args) {
            Ok(report) => {
                println!("{}", report);
                return;
            }
            Err(e) => Err(e),
        },
        Commands::Version => {
            println!("ceval {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
