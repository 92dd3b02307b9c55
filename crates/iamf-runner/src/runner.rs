use std::io::Write;
use std::path::PathBuf;

use iamf_core::errors::{ErrorInfo, SuiteError};
use iamf_core::MetadataFormat;
use iamf_vectors::serde::{to_canonical_json_bytes, to_yaml_string};
use iamf_vectors::{TestVectorDescriptor, UserMetadata};
use tempfile::NamedTempFile;
use tracing::{error, info};

use crate::encoder::{EncodeRequest, Encoder, EncoderOutput};
use crate::report::{Outcome, RunReport, VectorOutcome};

fn metadata_error(code: &str, err: impl ToString) -> SuiteError {
    SuiteError::Encoder(ErrorInfo::new(code, err.to_string()))
}

/// Directories and encoding shared by every invocation of a batch.
#[derive(Debug, Clone)]
pub struct RunOpts {
    /// Directory holding the input WAV assets.
    pub input_wav_directory: PathBuf,
    /// Directory receiving the encoded streams.
    pub output_directory: PathBuf,
    /// Serialization of the metadata working copy.
    pub metadata_format: MetadataFormat,
}

impl RunOpts {
    /// Options with the default metadata format.
    pub fn new(
        input_wav_directory: impl Into<PathBuf>,
        output_directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_wav_directory: input_wav_directory.into(),
            output_directory: output_directory.into(),
            metadata_format: MetadataFormat::default(),
        }
    }
}

/// Sequentially feeds descriptors to an [`Encoder`].
#[derive(Debug)]
pub struct EncodeRunner<E> {
    encoder: E,
    opts: RunOpts,
}

impl<E: Encoder> EncodeRunner<E> {
    /// Creates a runner around `encoder`.
    pub fn new(encoder: E, opts: RunOpts) -> Self {
        Self { encoder, opts }
    }

    /// Borrows the wrapped encoder.
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Consumes the runner, returning the encoder.
    pub fn into_encoder(self) -> E {
        self.encoder
    }

    /// Runs a single descriptor. Never fails: every problem becomes an [`Outcome`].
    pub fn run(&mut self, descriptor: &TestVectorDescriptor) -> Outcome {
        let source = descriptor.source().display().to_string();
        if !descriptor.is_valid() {
            info!(target: "iamf_runner", source = %source, "skipping because is_valid=false");
            return Outcome::Skipped;
        }
        info!(target: "iamf_runner", source = %source, "running encoder");
        match self.encode(descriptor) {
            Ok(output) if output.success() => Outcome::Passed,
            Ok(output) => {
                error!(
                    target: "iamf_runner",
                    source = %source,
                    exit_code = ?output.exit_code,
                    stdout = %output.stdout,
                    stderr = %output.stderr,
                    "encoder failed"
                );
                Outcome::Failed {
                    exit_code: output.exit_code,
                    stdout: output.stdout,
                    stderr: output.stderr,
                }
            }
            Err(err) => {
                error!(
                    target: "iamf_runner",
                    source = %source,
                    error = %err,
                    "encoder could not run"
                );
                Outcome::Errored {
                    message: err.to_string(),
                }
            }
        }
    }

    /// Runs every descriptor in order; one bad vector never stops the rest.
    pub fn run_batch<'a, I>(&mut self, descriptors: I) -> RunReport
    where
        I: IntoIterator<Item = &'a TestVectorDescriptor>,
    {
        let vectors = descriptors
            .into_iter()
            .map(|descriptor| VectorOutcome {
                test: descriptor.prefix().to_string(),
                source: descriptor.source().to_path_buf(),
                outcome: self.run(descriptor),
            })
            .collect();
        RunReport { vectors }
    }

    fn encode(&mut self, descriptor: &TestVectorDescriptor) -> Result<EncoderOutput, SuiteError> {
        let working_copy = descriptor.encoder_working_copy();
        // Removed when dropped, whatever the encoder did.
        let metadata_file = self.write_metadata(&working_copy)?;
        let request = EncodeRequest {
            metadata: &working_copy,
            metadata_path: metadata_file.path(),
            input_wav_directory: &self.opts.input_wav_directory,
            output_directory: &self.opts.output_directory,
        };
        self.encoder.invoke(&request)
    }

    fn write_metadata(&self, metadata: &UserMetadata) -> Result<NamedTempFile, SuiteError> {
        let bytes = match self.opts.metadata_format {
            MetadataFormat::Yaml => to_yaml_string(metadata)?.into_bytes(),
            MetadataFormat::Json => to_canonical_json_bytes(metadata)?,
        };
        let mut file = tempfile::Builder::new()
            .prefix("user_metadata_")
            .suffix(self.opts.metadata_format.suffix())
            .tempfile()
            .map_err(|err| metadata_error("iamf_runner.metadata_tempfile", err))?;
        file.write_all(&bytes)
            .and_then(|_| file.flush())
            .map_err(|err| metadata_error("iamf_runner.metadata_write", err))?;
        Ok(file)
    }
}
