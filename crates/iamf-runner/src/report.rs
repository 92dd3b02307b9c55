use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Result of handing one descriptor to the runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum Outcome {
    /// `is_valid` was false; the encoder was not invoked.
    Skipped,
    /// The encoder exited with status zero.
    Passed,
    /// The encoder ran and exited non-zero or was killed.
    Failed {
        /// Exit code, `None` when terminated by a signal.
        exit_code: Option<i32>,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },
    /// The encoder could not be run for this vector.
    Errored {
        /// Rendered error.
        message: String,
    },
}

impl Outcome {
    /// True when the encoder was actually started for the vector.
    pub fn invoked(&self) -> bool {
        matches!(self, Outcome::Passed | Outcome::Failed { .. })
    }

    /// Short lowercase label used in logs and tallies.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Skipped => "skipped",
            Outcome::Passed => "passed",
            Outcome::Failed { .. } => "failed",
            Outcome::Errored { .. } => "errored",
        }
    }
}

/// Outcome of a single descriptor, keyed by its prefix and source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorOutcome {
    /// `file_name_prefix` of the descriptor.
    pub test: String,
    /// Descriptor file the vector was loaded from.
    pub source: PathBuf,
    /// What happened.
    pub outcome: Outcome,
}

/// Per-vector outcomes of a batch, in the order the vectors were run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// One entry per descriptor handed to the batch.
    pub vectors: Vec<VectorOutcome>,
}

impl RunReport {
    fn count(&self, label: &str) -> usize {
        self.vectors
            .iter()
            .filter(|vector| vector.outcome.label() == label)
            .count()
    }

    /// Vectors whose encode succeeded.
    pub fn passed(&self) -> usize {
        self.count("passed")
    }

    /// Vectors whose encode exited non-zero.
    pub fn failed(&self) -> usize {
        self.count("failed")
    }

    /// Vectors skipped because they are marked invalid.
    pub fn skipped(&self) -> usize {
        self.count("skipped")
    }

    /// Vectors for which the encoder could not be run.
    pub fn errored(&self) -> usize {
        self.count("errored")
    }

    /// Number of encoder invocations performed.
    pub fn invoked(&self) -> usize {
        self.vectors
            .iter()
            .filter(|vector| vector.outcome.invoked())
            .count()
    }

    /// True when no vector failed or errored.
    pub fn all_passed(&self) -> bool {
        self.failed() == 0 && self.errored() == 0
    }

    /// Iterates over the vectors that failed or errored.
    pub fn problems(&self) -> impl Iterator<Item = &VectorOutcome> {
        self.vectors.iter().filter(|vector| {
            matches!(
                vector.outcome,
                Outcome::Failed { .. } | Outcome::Errored { .. }
            )
        })
    }
}
