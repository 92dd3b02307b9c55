use std::fmt;
use std::path::Path;

use iamf_core::errors::{ErrorInfo, SuiteError};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::descriptor::TestVectorDescriptor;

/// Opaque repository label. The empty tag means "no filter".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Wraps a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the empty tag, which selects every descriptor.
    pub fn is_any(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Tag {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Tag {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Predicate deciding which descriptors take part in a run.
#[derive(Debug, Clone)]
pub enum Selection {
    /// Keep everything.
    All,
    /// Keep descriptors whose file base name contains a match of the regex.
    FileName(Regex),
    /// Keep descriptors listing the tag among their repository tags.
    RepositoryTag(Tag),
}

impl Selection {
    /// Builds a filename selection; an absent or empty pattern keeps everything.
    pub fn file_name(pattern: Option<&str>) -> Result<Self, SuiteError> {
        match pattern {
            None | Some("") => Ok(Selection::All),
            Some(pattern) => Regex::new(pattern).map(Selection::FileName).map_err(|err| {
                SuiteError::Config(
                    ErrorInfo::new("iamf_vectors.regex", err.to_string())
                        .with_context("pattern", pattern.to_string()),
                )
            }),
        }
    }

    /// Builds a tag selection; the empty tag keeps everything.
    pub fn repository_tag(tag: impl Into<Tag>) -> Self {
        let tag = tag.into();
        if tag.is_any() {
            Selection::All
        } else {
            Selection::RepositoryTag(tag)
        }
    }

    /// Decides membership of a parsed descriptor.
    pub fn matches(&self, descriptor: &TestVectorDescriptor) -> bool {
        match self {
            Selection::All => true,
            Selection::FileName(regex) => regex.is_match(&descriptor.file_name()),
            Selection::RepositoryTag(tag) => descriptor.vector().has_tag(tag),
        }
    }

    /// Decides membership from the file path alone.
    ///
    /// Strategies that need the parsed contents accept every path; the final
    /// decision is then made by [`Selection::matches`].
    pub fn matches_path(&self, path: &Path) -> bool {
        match self {
            Selection::FileName(regex) => path
                .file_name()
                .map(|name| regex.is_match(&name.to_string_lossy()))
                .unwrap_or(false),
            Selection::All | Selection::RepositoryTag(_) => true,
        }
    }

    /// Keeps the matching descriptors, preserving order.
    pub fn apply<I>(&self, descriptors: I) -> Vec<TestVectorDescriptor>
    where
        I: IntoIterator<Item = TestVectorDescriptor>,
    {
        descriptors
            .into_iter()
            .filter(|descriptor| self.matches(descriptor))
            .collect()
    }
}

/// Filters descriptors by a regex searched for in each file base name.
pub fn select<I>(
    descriptors: I,
    regex_filter: Option<&str>,
) -> Result<Vec<TestVectorDescriptor>, SuiteError>
where
    I: IntoIterator<Item = TestVectorDescriptor>,
{
    Ok(Selection::file_name(regex_filter)?.apply(descriptors))
}

/// Filters descriptors by exact repository-tag membership.
pub fn select_by_tag<I>(descriptors: I, tag: &str) -> Vec<TestVectorDescriptor>
where
    I: IntoIterator<Item = TestVectorDescriptor>,
{
    Selection::repository_tag(tag).apply(descriptors)
}
