#![deny(missing_docs)]
#![doc = "Encoder orchestration over IAMF test-vector descriptors."]

/// Encoder capability and the process-backed implementation.
pub mod encoder;
/// Per-vector outcomes and batch tallies.
pub mod report;
/// Sequential batch runner.
pub mod runner;

pub use encoder::{EncodeRequest, Encoder, EncoderOutput, ProcessEncoder};
pub use report::{Outcome, RunReport, VectorOutcome};
pub use runner::{EncodeRunner, RunOpts};
