use std::path::{Path, PathBuf};
use std::process::Command;

use iamf_core::errors::{ErrorInfo, SuiteError};
use iamf_vectors::UserMetadata;
use serde::{Deserialize, Serialize};

/// Everything the encoder needs for a single test vector.
#[derive(Debug, Clone, Copy)]
pub struct EncodeRequest<'a> {
    /// Working copy of the metadata, loudness validation disabled.
    pub metadata: &'a UserMetadata,
    /// Serialized form of `metadata`, valid for the duration of the call.
    pub metadata_path: &'a Path,
    /// Directory holding the input WAV assets.
    pub input_wav_directory: &'a Path,
    /// Directory receiving the encoded streams.
    pub output_directory: &'a Path,
}

/// Exit status and captured streams of one encoder invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EncoderOutput {
    /// Exit code; `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl EncoderOutput {
    /// True when the process exited with status zero.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Narrow capability over the external encoder.
pub trait Encoder {
    /// Runs the encoder once and waits for it to finish.
    ///
    /// An `Err` means the encoder could not be run at all; a non-zero exit is
    /// reported through [`EncoderOutput::exit_code`].
    fn invoke(&mut self, request: &EncodeRequest<'_>) -> Result<EncoderOutput, SuiteError>;
}

/// Encoder backed by a binary on disk.
#[derive(Debug, Clone)]
pub struct ProcessEncoder {
    binary: PathBuf,
}

impl ProcessEncoder {
    /// Uses the binary at `binary`.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn command(&self, request: &EncodeRequest<'_>) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("--user_metadata_filename")
            .arg(request.metadata_path)
            .arg("--input_wav_directory")
            .arg(request.input_wav_directory)
            .arg("--output_iamf_directory")
            .arg(request.output_directory);
        cmd
    }
}

impl Encoder for ProcessEncoder {
    fn invoke(&mut self, request: &EncodeRequest<'_>) -> Result<EncoderOutput, SuiteError> {
        let output = self.command(request).output().map_err(|err| {
            SuiteError::Encoder(
                ErrorInfo::new("iamf_runner.spawn", err.to_string())
                    .with_context("binary", self.binary.display().to_string())
                    .with_hint("check that --encoder-bin points at an executable"),
            )
        })?;
        Ok(EncoderOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
