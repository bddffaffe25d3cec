//! Summarize a cohort record and derive its inequity flags
//!
//! Reads `datasets/tcia_lung_ct.yaml` and writes
//! `datasets/tcia_lung_ct_summary.yaml` unless told otherwise.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use cohort_audit::utils::{log_operation_complete, log_operation_start, print_flag_report};
use cohort_audit::{AuditConfig, Summarizer, load_record, write_record};

const INPUT_FILE: &str = "datasets/tcia_lung_ct.yaml";
const OUTPUT_FILE: &str = "datasets/tcia_lung_ct_summary.yaml";

#[derive(Debug, Parser)]
#[command(name = "summarize", about = "Summarize a cohort record")]
struct Args {
    /// Record to summarize
    #[arg(long, default_value = INPUT_FILE)]
    input: PathBuf,
    /// Where to write the summary
    #[arg(long, default_value = OUTPUT_FILE)]
    output: PathBuf,
    /// Optional YAML audit configuration
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AuditConfig::from_path(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => AuditConfig::default(),
    };

    let start = Instant::now();
    log_operation_start("Summarizing", &args.input);

    let record = load_record(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    let summary = Summarizer::new().with_config(&config).summarize(&record);

    write_record(&args.output, &summary)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log_operation_complete("wrote summary", &args.output, Some(start.elapsed()));

    print_flag_report(&summary.id, &summary.inequity_flags);
    println!("Summary written to: {}", args.output.display());
    Ok(())
}
