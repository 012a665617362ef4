//! Command-line interface for the harvester.

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::DEFAULT_DAYS_BACK;
use crate::error::Result;
use crate::harvester::harvest;
use crate::normalize::normalize;
use crate::types::NormalizedDocument;

/// Wayne State harvester - collect and normalize Digital Commons records.
#[derive(Parser)]
#[command(name = "wayne-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Harvest recent records and print normalized documents as JSON.
    Harvest {
        /// How many days back the harvest window reaches
        #[arg(short, long, default_value_t = DEFAULT_DAYS_BACK)]
        days_back: u32,

        /// Pretty-print documents instead of one JSON object per line
        #[arg(short, long)]
        pretty: bool,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Harvest { days_back, pretty } => harvest_command(days_back, pretty),
    }
}

/// Execute the harvest command.
///
/// Documents go to stdout, one JSON object each; status, the spinner and
/// the summary go to stderr so the document stream stays machine-readable.
/// A record that fails normalization is logged and skipped; a harvest-level
/// failure aborts the run.
fn harvest_command(days_back: u32, pretty: bool) -> Result<()> {
    eprintln!(
        "{} records updated in the last {} days",
        style("Harvesting").bold(),
        style(days_back).cyan()
    );
    eprintln!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Fetching ListRecords pages...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let raw_documents = match harvest(days_back) {
        Ok(documents) => documents,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Normalizing records...");

    let mut normalized = 0_usize;
    let mut filtered = 0_usize;
    let mut failed = 0_usize;

    for raw in &raw_documents {
        match normalize(raw) {
            Ok(Some(document)) => {
                if let Err(e) = print_document(&document, pretty) {
                    pb.finish_and_clear();
                    return Err(e);
                }
                normalized += 1;
            }
            Ok(None) => filtered += 1,
            Err(e) => {
                tracing::warn!(doc_id = %raw.doc_id, error = %e, "Skipping record");
                failed += 1;
            }
        }
    }

    pb.finish_and_clear();

    eprintln!();
    eprintln!("  Harvested: {}", raw_documents.len());
    eprintln!("  Normalized: {}", style(normalized).green());
    eprintln!("  Filtered: {filtered}");
    if failed > 0 {
        eprintln!("  Failed: {}", style(failed).yellow().bold());
    }

    Ok(())
}

/// Print one normalized document to stdout.
fn print_document(document: &NormalizedDocument, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    println!("{json}");
    Ok(())
}
