//! Write the template cohort record for a new collection

use std::path::Path;

use anyhow::Context;

use cohort_audit::models::template::new_lung_ct;
use cohort_audit::write_record;

const OUTPUT_FILE: &str = "datasets/new_lung_ct.yaml";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let output_path = Path::new(OUTPUT_FILE);
    write_record(output_path, &new_lung_ct())
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    println!("YAML file created at: {}", output_path.display());
    Ok(())
}
