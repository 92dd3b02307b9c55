use std::path::Path;

use iamf_core::errors::SuiteError;
use iamf_vectors::{
    select, select_by_tag, Selection, Tag, TestVectorDescriptor, TestVectorMetadata,
    TestedSection, UserMetadata,
};

fn descriptor(file: &str, prefix: &str, tags: &[&str]) -> TestVectorDescriptor {
    let metadata = UserMetadata {
        test_vector_metadata: TestVectorMetadata {
            file_name_prefix: prefix.to_string(),
            is_valid: true,
            test_repository_tags: tags.iter().map(|tag| tag.to_string()).collect(),
            ..TestVectorMetadata::default()
        },
        ..UserMetadata::default()
    };
    TestVectorDescriptor::new(Path::new("vectors").join(file), metadata)
}

fn prefixes(descriptors: &[TestVectorDescriptor]) -> Vec<&str> {
    descriptors.iter().map(|d| d.prefix()).collect()
}

fn corpus() -> Vec<TestVectorDescriptor> {
    vec![
        descriptor("test_000001.yaml", "t1", &["github/aomediacodec/libiamf/main"]),
        descriptor("test_000002.yaml", "t2", &["github/aomediacodec/libiamf/main/extra"]),
        descriptor("test_000103.yaml", "t3", &[]),
        descriptor("opus_mono.yaml", "t4", &["other", "github/aomediacodec/libiamf/main"]),
    ]
}

#[test]
fn empty_tag_selects_everything_including_untagged() {
    let selected = select_by_tag(corpus(), "");
    assert_eq!(prefixes(&selected), vec!["t1", "t2", "t3", "t4"]);
}

#[test]
fn tag_membership_is_exact() {
    let selected = select_by_tag(corpus(), "github/aomediacodec/libiamf/main");
    assert_eq!(prefixes(&selected), vec!["t1", "t4"]);
    assert!(select_by_tag(corpus(), "github/aomediacodec").is_empty());
}

#[test]
fn regex_uses_search_semantics_on_base_name() {
    let selected = select(corpus(), Some("0001")).expect("valid regex");
    assert_eq!(prefixes(&selected), vec!["t1", "t3"]);
    let anchored = select(corpus(), Some("^opus")).expect("valid regex");
    assert_eq!(prefixes(&anchored), vec!["t4"]);
    // The directory part of the path is not searched.
    assert!(select(corpus(), Some("vectors")).expect("valid regex").is_empty());
}

#[test]
fn absent_or_empty_regex_keeps_everything() {
    assert_eq!(select(corpus(), None).expect("none").len(), 4);
    assert_eq!(select(corpus(), Some("")).expect("empty").len(), 4);
}

#[test]
fn bad_regex_is_a_config_error() {
    let err = select(corpus(), Some("test_(")).expect_err("unclosed group");
    assert!(matches!(err, SuiteError::Config(_)));
    assert_eq!(err.info().code, "iamf_vectors.regex");
    assert_eq!(err.info().context["pattern"], "test_(");
}

#[test]
fn path_matching_mirrors_descriptor_matching() {
    let selection = Selection::file_name(Some(r"_00000\d\.yaml$")).expect("regex");
    assert!(selection.matches_path(Path::new("/corpus/test_000002.yaml")));
    assert!(!selection.matches_path(Path::new("/corpus/test_000103.yaml")));
    let by_tag = Selection::repository_tag("other");
    assert!(by_tag.matches_path(Path::new("/corpus/anything.yaml")));
    assert!(matches!(Selection::repository_tag(Tag::default()), Selection::All));
}

#[test]
fn tested_sections_split_on_first_slash() {
    assert_eq!(
        TestedSection::parse("7.2/loudness"),
        TestedSection { section: "7.2", field: "loudness" }
    );
    assert_eq!(
        TestedSection::parse("7.2"),
        TestedSection { section: "7.2", field: "" }
    );
    assert_eq!(
        TestedSection::parse("3.6/param/definition"),
        TestedSection { section: "3.6", field: "param/definition" }
    );
}

#[test]
fn working_copy_disables_loudness_without_touching_original() {
    let mut original = descriptor("test_000001.yaml", "t1", &[]);
    let mut metadata = original.metadata().clone();
    metadata.test_vector_metadata.validate_user_loudness = true;
    original = TestVectorDescriptor::new(original.source(), metadata);

    let copy = original.encoder_working_copy();
    assert!(!copy.test_vector_metadata.validate_user_loudness);
    assert!(original.vector().validate_user_loudness);
    assert_eq!(copy.test_vector_metadata.file_name_prefix, "t1");
}
