use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use iamf_core::MetadataFormat;
use iamf_runner::{EncodeRunner, ProcessEncoder, RunOpts};
use iamf_vectors::serde::to_canonical_json_bytes;
use iamf_vectors::{discover, load_strict, Selection};
use tracing::{error, info};

use crate::load_config;

/// Name of the JSON run report written next to the encoded streams.
pub const RUN_REPORT_FILE: &str = "encode_report.json";

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Yaml,
    Json,
}

impl From<FormatArg> for MetadataFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Yaml => MetadataFormat::Yaml,
            FormatArg::Json => MetadataFormat::Json,
        }
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Path to the encoder binary.
    #[arg(long)]
    pub encoder_bin: PathBuf,
    /// Directory containing the descriptor files.
    #[arg(long)]
    pub test_data_dir: PathBuf,
    /// Output directory for encoded streams and the run report.
    #[arg(long)]
    pub output_dir: PathBuf,
    /// Regex searched for in each descriptor file name.
    #[arg(long)]
    pub regex_filter: Option<String>,
    /// Directory holding the input WAV files (defaults to --test-data-dir).
    #[arg(long)]
    pub input_wav_dir: Option<PathBuf>,
    /// Suite configuration YAML.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Serialization of the metadata handed to the encoder.
    #[arg(long, value_enum)]
    pub metadata_format: Option<FormatArg>,
    /// Exit with an error when any vector fails to encode.
    #[arg(long, default_value_t = false)]
    pub fail_on_error: bool,
}

pub fn run(args: &EncodeArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(args.config.as_deref())?;
    let selection = Selection::file_name(args.regex_filter.as_deref())?;
    fs::create_dir_all(&args.output_dir)?;

    let files = match discover(&args.test_data_dir, &config.descriptor_extension) {
        Ok(files) => files,
        Err(err) if err.is_corpus_empty() => {
            error!(dir = %args.test_data_dir.display(), "no descriptor files found");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };
    let discovered = files.len();
    let files: Vec<PathBuf> = files
        .into_iter()
        .filter(|path| selection.matches_path(path))
        .collect();
    info!(discovered, selected = files.len(), "descriptor selection");
    let descriptors = load_strict(&files)?;

    let mut opts = RunOpts::new(
        args.input_wav_dir
            .clone()
            .unwrap_or_else(|| args.test_data_dir.clone()),
        args.output_dir.clone(),
    );
    opts.metadata_format = args
        .metadata_format
        .map(MetadataFormat::from)
        .unwrap_or(config.metadata_format);
    let mut runner = EncodeRunner::new(ProcessEncoder::new(&args.encoder_bin), opts);
    let report = runner.run_batch(&descriptors);

    fs::write(
        args.output_dir.join(RUN_REPORT_FILE),
        to_canonical_json_bytes(&report)?,
    )?;
    println!(
        "passed {} failed {} errored {} skipped {}",
        report.passed(),
        report.failed(),
        report.errored(),
        report.skipped()
    );
    if args.fail_on_error && !report.all_passed() {
        let failing: Vec<&str> = report.problems().map(|vector| vector.test.as_str()).collect();
        return Err(format!("encoding failed for: {}", failing.join(", ")).into());
    }
    Ok(())
}
