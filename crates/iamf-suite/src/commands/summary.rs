use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use iamf_coverage::{build, default_sections, sort_sections, write_reports};
use iamf_vectors::{discover, load_lenient, LenientLoad};
use tracing::{info, warn};

use crate::load_config;

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Directory containing the descriptor files.
    #[arg(long)]
    pub test_data_dir: PathBuf,
    /// Output directory for test_summary.csv and coverage.csv.
    #[arg(long)]
    pub output_dir: PathBuf,
    /// Repository tag to report on; pass an empty string to include every vector.
    #[arg(long)]
    pub test_repository_tag: Option<String>,
    /// Suite configuration YAML.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &SummaryArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(args.config.as_deref())?;
    let tag = args
        .test_repository_tag
        .clone()
        .unwrap_or_else(|| config.test_repository_tag.clone());
    // A malformed section id fails the command before the corpus is read.
    let sections = match &config.spec_sections {
        Some(sections) => sort_sections(sections)?,
        None => sort_sections(&default_sections())?,
    };

    let load = match discover(&args.test_data_dir, &config.descriptor_extension) {
        Ok(files) => load_lenient(&files),
        Err(err) if err.is_corpus_empty() => {
            warn!(dir = %args.test_data_dir.display(), "no descriptor files found");
            LenientLoad::default()
        }
        Err(err) => return Err(err.into()),
    };
    let failures = load.failures.len();
    let report = build(load.descriptors, &tag, &sections)?;
    let paths = write_reports(&args.output_dir, &report.summary, &report.coverage)?;
    info!(
        tag = %tag,
        tests = report.summary.len(),
        parse_failures = failures,
        "reports written"
    );
    println!(
        "wrote {} and {}",
        paths.summary.display(),
        paths.coverage.display()
    );
    Ok(())
}
