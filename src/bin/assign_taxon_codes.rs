//! Assign Taxon Codes
//!
//! Merges the vascular, bryophyte and lichen taxonomy tables and writes
//! one table with a unique short code per taxon.
//!
//! Usage:
//!   assign_taxon_codes --vascular V.csv --bryophyte B.csv --lichen L.csv \
//!       --output taxonomy.csv [--report report.json] [--overrides codes.csv]
//!
//! Exits non-zero without writing the output when any taxon cannot be coded.

use akveg_taxon_codes::{run, AssignerConfig, CodeOverrides, TaxonomySources};
use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Assign unique short codes to AKVEG taxa
#[derive(Parser, Debug)]
#[clap(name = "assign_taxon_codes")]
#[clap(about = "Assign unique short codes to AKVEG taxa")]
struct Args {
    /// Vascular plant taxonomy CSV
    #[clap(long, env = "AKVEG_VASCULAR", value_name = "FILE")]
    vascular: PathBuf,

    /// Bryophyte taxonomy CSV
    #[clap(long, env = "AKVEG_BRYOPHYTE", value_name = "FILE")]
    bryophyte: PathBuf,

    /// Lichen taxonomy CSV
    #[clap(long, env = "AKVEG_LICHEN", value_name = "FILE")]
    lichen: PathBuf,

    /// Output table (.csv or .parquet), overwritten on success
    #[clap(long, env = "AKVEG_OUTPUT", value_name = "FILE")]
    output: PathBuf,

    /// Write a JSON run report, also when rows fail code assignment
    #[clap(long, env = "AKVEG_REPORT", value_name = "FILE")]
    report: Option<PathBuf>,

    /// CSV of manual codes (name_adjudicated, code)
    #[clap(long, env = "AKVEG_OVERRIDES", value_name = "FILE")]
    overrides: Option<PathBuf>,

    /// Skip whitespace normalization and empty-row removal
    #[clap(long)]
    no_cleanup: bool,
}

fn main() -> Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "akveg_taxon_codes=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    println!("\n{}", "=".repeat(70));
    println!("AKVEG TAXON CODE ASSIGNMENT");
    println!("{}", "=".repeat(70));

    let start = Instant::now();

    let mut config = AssignerConfig {
        cleanup: !args.no_cleanup,
        ..AssignerConfig::default()
    };
    if let Some(path) = &args.overrides {
        config.overrides = CodeOverrides::load_csv(path, &config.columns.name, &config.columns.code)?;
    }

    let sources = TaxonomySources {
        vascular: args.vascular,
        bryophyte: args.bryophyte,
        lichen: args.lichen,
    };

    let report = run(&sources, &args.output, &config)?;

    if let Some(path) = &args.report {
        report.write_json(path)?;
        println!("Report: {}", path.display());
    }

    println!();
    for line in report.summary_lines() {
        println!("  {}", line);
    }

    if !report.is_clean() {
        println!("\nTaxa needing manual correction:");
        for err in &report.errors {
            println!("  - {}", err);
        }
        println!("{}", "=".repeat(70));
        return Err(anyhow!(
            "{} error(s); {} was not written",
            report.errors.len(),
            args.output.display()
        ));
    }

    println!("\nOutput: {}", args.output.display());
    println!("Total time: {:.3} ms", start.elapsed().as_secs_f64() * 1000.0);
    println!("{}", "=".repeat(70));

    Ok(())
}
