//! CLI entry point for the data quality check.

use anyhow::{Result, anyhow};
use clap::Parser;
use quality_check::{CheckConfig, QualityCheck, QualityError, render_text};
use tracing::{debug, error};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "One-shot data quality audit for CSV datasets",
    long_about = "Scans a CSV file for missing values, duplicate rows and zero/negative\n\
                  numeric values, and writes the findings to an .xlsx workbook with one\n\
                  sheet per check.\n\n\
                  Without --input/--output the project layout is used, relative to --base-dir:\n  \
                  ../data/sample_data.csv -> ../reports/data_quality_report.xlsx\n\n\
                  EXAMPLES:\n  \
                  # Run against the project layout from the scripts directory\n  \
                  quality-check\n\n  \
                  # Explicit input and output\n  \
                  quality-check -i orders.csv -o reports/orders_quality.xlsx\n\n  \
                  # Machine-readable summary\n  \
                  quality-check -i orders.csv -o out.xlsx --json | jq .duplicate_count"
)]
struct Args {
    /// Path to the CSV file to check
    ///
    /// Defaults to ../data/sample_data.csv relative to --base-dir
    #[arg(short, long)]
    input: Option<String>,

    /// Path of the workbook to write (overwritten if it exists)
    ///
    /// Defaults to ../reports/data_quality_report.xlsx relative to --base-dir
    #[arg(short, long)]
    output: Option<String>,

    /// Base directory of the default project layout
    #[arg(long, default_value = ".")]
    base_dir: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output and the text summary
    #[arg(short, long)]
    quiet: bool,

    /// Print the summary as JSON to stdout instead of the text summary
    ///
    /// Disables all logging so stdout only contains JSON.
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is disabled entirely so that stdout
/// only carries the JSON summary.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn build_config(args: &Args) -> Result<CheckConfig> {
    let mut builder = CheckConfig::builder().base_dir(&args.base_dir);

    if let Some(ref input) = args.input {
        builder = builder.input_path(input);
    }
    if let Some(ref output) = args.output {
        builder = builder.output_path(output);
    }

    Ok(builder.build()?)
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = build_config(&args)?;
    debug!("Resolved configuration: {:?}", config);

    let outcome = match QualityCheck::new(config.clone()).run() {
        Ok(outcome) => outcome,
        Err(e) if e.is_input_not_found() => {
            report_missing_input(&e, &config, args.json)?;
            return Ok(());
        }
        Err(e) => {
            error!("Quality check failed: {}", e);
            return Err(anyhow!("Quality check failed: {}", e));
        }
    };

    let summary = outcome.summary(&config.input_path);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if !args.quiet {
        println!("{}", render_text(&summary));
    }
    println!(
        "Data quality report generated: {}",
        outcome.output_path.display()
    );

    Ok(())
}

/// A missing input is reported and the run stops without writing anything.
///
/// This uses `println!` on purpose: the message must be visible regardless of
/// the log level.
fn report_missing_input(error: &QualityError, config: &CheckConfig, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(error)?);
    } else {
        println!("Input file not found: {}", config.input_path.display());
    }
    Ok(())
}
