use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use iamf_core::errors::{ErrorInfo, SuiteError, CORPUS_EMPTY};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::descriptor::{TestVectorDescriptor, UserMetadata};
use crate::serde::from_yaml_slice;

fn descriptor_error(code: &str, path: &Path, err: impl ToString) -> SuiteError {
    SuiteError::Descriptor(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}

fn extension_matcher(extension: &str) -> Result<GlobMatcher, SuiteError> {
    let pattern = format!("*.{}", extension.trim_start_matches('.'));
    Glob::new(&pattern)
        .map(|glob| glob.compile_matcher())
        .map_err(|err| {
            SuiteError::Config(
                ErrorInfo::new("iamf_vectors.extension", err.to_string())
                    .with_context("pattern", pattern.clone()),
            )
        })
}

/// Lists the descriptor files directly inside `dir`, sorted by path.
///
/// A directory without matching files yields a [`SuiteError::Corpus`] error
/// with code [`CORPUS_EMPTY`] so callers can tell it apart from a selection
/// that filtered everything out.
pub fn discover(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, SuiteError> {
    if !dir.is_dir() {
        return Err(SuiteError::Config(
            ErrorInfo::new("iamf_vectors.corpus_dir", "corpus directory does not exist")
                .with_context("path", dir.display().to_string())
                .with_hint("pass the directory holding the descriptor files"),
        ));
    }
    let matcher = extension_matcher(extension)?;
    let mut files = Vec::new();
    // Symlinked descriptors are resolved to their targets.
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() > 0 => {
                warn!(target: "iamf_vectors", error = %err, "skipping unreadable corpus entry");
                continue;
            }
            Err(err) => {
                return Err(SuiteError::Corpus(
                    ErrorInfo::new("iamf_vectors.corpus_read", err.to_string())
                        .with_context("path", dir.display().to_string()),
                ))
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if matcher.is_match(entry.file_name()) {
            files.push(entry.into_path());
        }
    }
    if files.is_empty() {
        return Err(SuiteError::Corpus(
            ErrorInfo::new(CORPUS_EMPTY, "no descriptor files found")
                .with_context("path", dir.display().to_string())
                .with_context("extension", extension.to_string()),
        ));
    }
    files.sort();
    for file in &files {
        debug!(target: "iamf_vectors", path = %file.display(), "found descriptor");
    }
    Ok(files)
}

/// Reads and parses a single descriptor file.
pub fn load_descriptor(path: &Path) -> Result<TestVectorDescriptor, SuiteError> {
    let bytes = fs::read(path).map_err(|err| descriptor_error("iamf_vectors.read", path, err))?;
    let metadata: UserMetadata = from_yaml_slice(&bytes)
        .map_err(|err| descriptor_error("iamf_vectors.parse", path, err.info().message.clone()))?;
    Ok(TestVectorDescriptor::new(path, metadata))
}

/// Parses every path, stopping at the first malformed descriptor.
pub fn load_strict(paths: &[PathBuf]) -> Result<Vec<TestVectorDescriptor>, SuiteError> {
    paths.iter().map(|path| load_descriptor(path)).collect()
}

/// Descriptors parsed in lenient mode together with the per-file failures.
#[derive(Debug, Default)]
pub struct LenientLoad {
    /// Successfully parsed descriptors, in input order.
    pub descriptors: Vec<TestVectorDescriptor>,
    /// One error per file that could not be read or parsed.
    pub failures: Vec<SuiteError>,
}

/// Parses every path, isolating failures to the offending file.
pub fn load_lenient(paths: &[PathBuf]) -> LenientLoad {
    let mut load = LenientLoad::default();
    for path in paths {
        match load_descriptor(path) {
            Ok(descriptor) => load.descriptors.push(descriptor),
            Err(err) => {
                warn!(
                    target: "iamf_vectors",
                    path = %path.display(),
                    error = %err,
                    "skipping descriptor"
                );
                load.failures.push(err);
            }
        }
    }
    load
}
