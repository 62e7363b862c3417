use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use khata_categorize::{categorize_batch, CategoryContext};
use khata_core::{parse_statement, ParseReport};
use khata_extract::extract_text;

mod config;
mod ledger;
mod state;

#[derive(Parser, Debug)]
#[command(name = "khata", version, about = "Local-first bank statement importer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize ~/.khata: config, cache, and the category dictionary
    Init,

    /// Import transactions from a PDF statement into the ledger
    Import {
        /// Path to the PDF statement
        file: PathBuf,

        /// Target month label (e.g. "Dec 25"); derived from the
        /// statement when omitted
        #[arg(long)]
        month: Option<String>,

        /// Password for encrypted PDFs
        #[arg(short, long)]
        password: Option<String>,

        /// Skip the Ollama categorization pass
        #[arg(long)]
        skip_categorize: bool,
    },

    /// Parse a statement and show the result without writing anything
    DryRun {
        /// Path to the PDF statement
        file: PathBuf,

        /// Password for encrypted PDFs
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Export the ledger to CSV for spreadsheet import
    Export {
        /// Output path (default: khata-export.csv)
        #[arg(long, default_value = "khata-export.csv")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Init => {
            let home = state::ensure_khata_home()?;
            config::init_config()?;
            CategoryContext::load(state::context_path()?)?;
            println!("Initialized {}", home.display());
        }

        Command::Import {
            file,
            month,
            password,
            skip_categorize,
        } => {
            let report = parse_file(&file, password.as_deref())?;
            print_report(&report);

            let mut transactions = report.transactions;
            let label = month
                .or_else(|| transactions.first().and_then(|t| derive_month_sheet(&t.date)))
                .unwrap_or_else(|| "Auto".to_string());
            for tx in &mut transactions {
                tx.month_sheet = label.clone();
            }

            if !skip_categorize {
                let cfg = config::load_config()?;
                let mut ctx = CategoryContext::load(state::context_path()?)?;
                categorize_batch(
                    &mut transactions,
                    &mut ctx,
                    &cfg.ollama.base_url,
                    &cfg.ollama.model,
                )
                .await?;
            }

            let ledger_path = state::ledger_path()?;
            let (added, skipped) = ledger::append_new(&ledger_path, &transactions)?;
            println!(
                "Imported {added} new transactions into sheet \"{label}\" ({skipped} already present)"
            );
        }

        Command::DryRun { file, password } => {
            let report = parse_file(&file, password.as_deref())?;
            print_report(&report);
            for tx in &report.transactions {
                println!(
                    "{} | {:>12} | {:6} | {}",
                    tx.date,
                    format!("{:.2}", tx.amount),
                    tx.direction.as_str(),
                    tx.description
                );
            }
            println!("\n(dry run; nothing written)");
        }

        Command::Export { out } => {
            let count = ledger::export_csv(&state::ledger_path()?, &out)?;
            println!("Exported {count} transactions to {}", out.display());
        }
    }

    Ok(())
}

fn parse_file(file: &PathBuf, password: Option<&str>) -> Result<ParseReport> {
    let text = extract_text(file, password, state::cache_dir()?)
        .with_context(|| format!("extracting {}", file.display()))?;
    Ok(parse_statement(&text)?)
}

fn print_report(report: &ParseReport) {
    println!(
        "Matched profile: {} ({} transactions)",
        report.profile_name,
        report.transactions.len()
    );
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
}

/// Derive a "Dec 23"-style sheet label from a statement date, which is
/// DD/MM/YYYY on credit-card statements and DD/MM/YY on savings ones.
fn derive_month_sheet(date: &str) -> Option<String> {
    let parsed = NaiveDate::parse_from_str(date, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(date, "%d/%m/%y"))
        .ok()?;
    Some(parsed.format("%b %y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_month_sheet_both_date_shapes() {
        assert_eq!(derive_month_sheet("20/12/2023"), Some("Dec 23".to_string()));
        assert_eq!(derive_month_sheet("01/04/25"), Some("Apr 25".to_string()));
        assert_eq!(derive_month_sheet("not a date"), None);
        assert_eq!(derive_month_sheet("31/02/2023"), None);
    }
}
