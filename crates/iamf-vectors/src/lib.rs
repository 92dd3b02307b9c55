#![deny(missing_docs)]
#![doc = "Descriptor model, corpus discovery and run selection for IAMF test vectors."]

/// User metadata documents and the descriptor wrapper.
pub mod descriptor;
/// Corpus discovery and descriptor parsing.
pub mod loader;
/// Filename and repository-tag selection.
pub mod selector;
/// YAML and canonical JSON helpers.
pub mod serde;

pub use descriptor::{TestVectorDescriptor, TestVectorMetadata, TestedSection, UserMetadata};
pub use loader::{discover, load_descriptor, load_lenient, load_strict, LenientLoad};
pub use selector::{select, select_by_tag, Selection, Tag};
