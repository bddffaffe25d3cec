//! Combine two cohort records into one
//!
//! Usage: `combine file1.yaml file2.yaml output.yaml`

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind;

use cohort_audit::utils::{log_operation_complete, log_operation_start};
use cohort_audit::{AuditConfig, Combiner, load_record, write_record};

const USAGE: &str = "Usage: combine file1.yaml file2.yaml output.yaml";

#[derive(Debug, Parser)]
#[command(name = "combine", about = "Combine two cohort records into one")]
struct Args {
    /// First record; its id, metadata and race/ethnicity schema come first
    file1: PathBuf,
    /// Second record
    file2: PathBuf,
    /// Where to write the combined record
    output: PathBuf,
    /// Optional YAML audit configuration
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(_) => {
            println!("{USAGE}");
            std::process::exit(1);
        }
    };

    let config = match &args.config {
        Some(path) => AuditConfig::from_path(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => AuditConfig::default(),
    };

    let start = Instant::now();
    log_operation_start("Combining", &args.file1);
    log_operation_start("Combining", &args.file2);

    let first = load_record(&args.file1)
        .with_context(|| format!("Failed to load {}", args.file1.display()))?;
    let second = load_record(&args.file2)
        .with_context(|| format!("Failed to load {}", args.file2.display()))?;

    let combined = Combiner::new()
        .with_config(config)
        .combine(&first, &second)
        .with_context(|| format!("Failed to combine {} and {}", first.id, second.id))?;

    write_record(&args.output, &combined)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log_operation_complete("wrote combined record", &args.output, Some(start.elapsed()));

    println!("Combined file written to {}", args.output.display());
    Ok(())
}
