use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, SuiteError};

/// Repository tag selected by the summary pipeline when none is configured.
pub const DEFAULT_TEST_REPOSITORY_TAG: &str = "github/aomediacodec/libiamf/main";

fn config_error(code: &str, err: impl ToString) -> SuiteError {
    SuiteError::Config(ErrorInfo::new(code, err.to_string()))
}

/// Encoding used for the working-copy metadata file handed to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetadataFormat {
    /// YAML document, same layout as the descriptor files.
    #[default]
    Yaml,
    /// Canonical JSON with sorted keys.
    Json,
}

impl MetadataFormat {
    /// File suffix used for temporary metadata files of this format.
    pub fn suffix(&self) -> &'static str {
        match self {
            MetadataFormat::Yaml => ".yaml",
            MetadataFormat::Json => ".json",
        }
    }
}

/// Suite-wide settings shared by the encode and summary pipelines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Extension (without the leading dot) identifying descriptor files.
    #[serde(default = "SuiteConfig::default_descriptor_extension")]
    pub descriptor_extension: String,
    /// Repository tag used by the summary pipeline; empty selects every vector.
    #[serde(default = "SuiteConfig::default_test_repository_tag")]
    pub test_repository_tag: String,
    /// Serialization of the metadata working copy.
    #[serde(default)]
    pub metadata_format: MetadataFormat,
    /// Replacement for the built-in canonical section list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec_sections: Option<Vec<String>>,
}

impl SuiteConfig {
    fn default_descriptor_extension() -> String {
        "yaml".to_string()
    }
    fn default_test_repository_tag() -> String {
        DEFAULT_TEST_REPOSITORY_TAG.to_string()
    }

    /// Loads a configuration file, filling absent keys with defaults.
    pub fn load(path: &Path) -> Result<Self, SuiteError> {
        let bytes = fs::read(path).map_err(|err| {
            SuiteError::Config(
                ErrorInfo::new("iamf_core.config_read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        let config: SuiteConfig = serde_yaml::from_slice(&bytes).map_err(|err| {
            SuiteError::Config(
                ErrorInfo::new("iamf_core.config_parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that would make discovery meaningless.
    pub fn validate(&self) -> Result<(), SuiteError> {
        let extension = self.descriptor_extension.trim_start_matches('.');
        if extension.is_empty() {
            return Err(config_error(
                "iamf_core.descriptor_extension",
                "descriptor_extension must not be empty",
            ));
        }
        if let Some(sections) = &self.spec_sections {
            if sections.is_empty() {
                return Err(SuiteError::Config(
                    ErrorInfo::new(
                        "iamf_core.spec_sections",
                        "spec_sections override must list at least one section",
                    )
                    .with_hint("remove the key to use the built-in section list"),
                ));
            }
        }
        Ok(())
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            descriptor_extension: Self::default_descriptor_extension(),
            test_repository_tag: Self::default_test_repository_tag(),
            metadata_format: MetadataFormat::default(),
            spec_sections: None,
        }
    }
}
