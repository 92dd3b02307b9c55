use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::selector::Tag;

/// Test-vector bookkeeping block of a user metadata document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TestVectorMetadata {
    /// Free-text description of what the vector exercises.
    #[serde(default)]
    pub human_readable_description: String,
    /// Identifier of the vector, also the stem of the encoder outputs.
    #[serde(default)]
    pub file_name_prefix: String,
    /// Whether the vector is run through the encoder.
    #[serde(default)]
    pub is_valid: bool,
    /// Whether a conforming decoder should accept the encoded stream.
    #[serde(default)]
    pub is_valid_to_decode: bool,
    /// Whether the encoder checks user-supplied loudness against computed values.
    #[serde(default)]
    pub validate_user_loudness: bool,
    /// Prefix of the vector this one derives from, empty when standalone.
    #[serde(default)]
    pub base_test: String,
    /// Labels of the external repositories the vector belongs to.
    #[serde(default)]
    pub test_repository_tags: Vec<String>,
    /// Entries of the form `section` or `section/field`.
    #[serde(default)]
    pub primary_tested_spec_sections: Vec<String>,
    /// Remaining keys, forwarded verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl TestVectorMetadata {
    /// Returns true when the tag list contains `tag` exactly.
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.test_repository_tags
            .iter()
            .any(|candidate| candidate == tag.as_str())
    }

    /// Iterates over the tested sections split into section and field.
    pub fn tested_sections(&self) -> impl Iterator<Item = TestedSection<'_>> {
        self.primary_tested_spec_sections
            .iter()
            .map(|entry| TestedSection::parse(entry))
    }
}

/// Full user metadata document: the test-vector block plus the encoder payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    /// Bookkeeping consumed by the suite.
    #[serde(default)]
    pub test_vector_metadata: TestVectorMetadata,
    /// Codec configs, audio elements, mix presentations and everything else.
    #[serde(flatten)]
    pub payload: BTreeMap<String, Value>,
}

/// A `section` or `section/field` reference split on the first `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TestedSection<'a> {
    /// Dotted section identifier.
    pub section: &'a str,
    /// Field within the section, empty when the entry names the whole section.
    pub field: &'a str,
}

impl<'a> TestedSection<'a> {
    /// Splits an entry; a missing `/` yields an empty field.
    pub fn parse(entry: &'a str) -> Self {
        match entry.split_once('/') {
            Some((section, field)) => Self { section, field },
            None => Self {
                section: entry,
                field: "",
            },
        }
    }
}

/// One parsed descriptor file.
#[derive(Debug, Clone, PartialEq)]
pub struct TestVectorDescriptor {
    source: PathBuf,
    metadata: UserMetadata,
}

impl TestVectorDescriptor {
    /// Wraps parsed metadata together with the file it came from.
    pub fn new(source: impl Into<PathBuf>, metadata: UserMetadata) -> Self {
        Self {
            source: source.into(),
            metadata,
        }
    }

    /// Path of the descriptor file.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Base name of the descriptor file.
    pub fn file_name(&self) -> String {
        self.source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Parsed metadata document.
    pub fn metadata(&self) -> &UserMetadata {
        &self.metadata
    }

    /// Shorthand for the test-vector block.
    pub fn vector(&self) -> &TestVectorMetadata {
        &self.metadata.test_vector_metadata
    }

    /// Identifier used as the report key.
    pub fn prefix(&self) -> &str {
        &self.vector().file_name_prefix
    }

    /// Whether the vector should be encoded.
    pub fn is_valid(&self) -> bool {
        self.vector().is_valid
    }

    /// Returns a copy of the metadata with loudness validation disabled.
    ///
    /// Loudness values in hand-written vectors drift easily, so the encoder is
    /// never asked to validate them. The stored descriptor is left untouched.
    pub fn encoder_working_copy(&self) -> UserMetadata {
        let mut copy = self.metadata.clone();
        copy.test_vector_metadata.validate_user_loudness = false;
        copy
    }
}
