use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use melb_listings::capture::{probe_capture, read_capture};
use melb_listings::config::ExtractConfig;
use melb_listings::pipeline::{ExtractOutcome, Extractor};
use melb_listings::spreadsheets::OutputFormat;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Turn a browser network capture of sold-listing searches into a CSV table.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// JSON config file; flags below override it
    #[arg(long, global = true, env = "MELB_LISTINGS_CONFIG")]
    config: Option<PathBuf>,

    /// Log every matched array and skipped entry
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Extract listings from a capture file (the default)
    Extract(ExtractArgs),
    /// Summarise hosts, GraphQL operations and content types in a capture
    Probe {
        /// Capture file (HAR)
        #[arg(short, long)]
        capture: Option<PathBuf>,
    },
}

#[derive(Args, Default)]
struct ExtractArgs {
    /// Capture file (HAR)
    #[arg(short, long)]
    capture: Option<PathBuf>,

    /// Output table
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format; inferred from the output extension when omitted
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Only scan entries whose URL contains this text
    #[arg(long)]
    url_contains: Option<String>,

    /// Only scan GraphQL requests with this operation name
    #[arg(long)]
    operation: Option<String>,

    /// Skip HTML and JavaScript bodies
    #[arg(long)]
    no_markup: bool,
}

impl ExtractArgs {
    fn apply(self, config: &mut ExtractConfig) {
        if let Some(capture) = self.capture {
            config.capture_path = capture;
        }
        if let Some(output) = self.output {
            config.output_path = output;
        }
        if self.format.is_some() {
            config.format = self.format;
        }
        if self.url_contains.is_some() {
            config.filters.url_contains = self.url_contains;
        }
        if self.operation.is_some() {
            config.filters.operation_name = self.operation;
        }
        if self.no_markup {
            config.scan_markup = false;
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "info,melb_listings=debug"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config =
        ExtractConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command.unwrap_or(Command::Extract(ExtractArgs::default())) {
        Command::Extract(args) => {
            args.apply(&mut config);

            let extractor = Extractor::new(config)?;
            match extractor.run()? {
                ExtractOutcome::Written { path, report } => {
                    println!(
                        "[DONE] Wrote {} rows ({} duplicates dropped) to {}",
                        report.rows_written,
                        report.duplicates_dropped,
                        path.display()
                    );
                }
                ExtractOutcome::Empty { .. } => {
                    println!("[WARN] No listing-like data found; nothing written.");
                }
            }
        }
        Command::Probe { capture } => {
            let path = capture.unwrap_or(config.capture_path);
            let capture = read_capture(&path)?;
            let summary = probe_capture(&capture);
            print!("{summary}");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
