#![deny(missing_docs)]
#![doc = "Shared error and configuration types for the IAMF test-vector suite."]

/// Suite configuration loaded from YAML.
pub mod config;
pub mod errors;

pub use config::{MetadataFormat, SuiteConfig, DEFAULT_TEST_REPOSITORY_TAG};
pub use errors::{ErrorInfo, SuiteError, CORPUS_EMPTY};
