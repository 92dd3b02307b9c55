use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use iamf_coverage::{
    build, render_list, split_list, write_reports, COVERAGE_FILE, SUMMARY_FILE,
};
use iamf_vectors::{TestVectorDescriptor, TestVectorMetadata, UserMetadata};
use proptest::prelude::*;
use tempfile::tempdir;

fn descriptor(
    prefix: &str,
    base: &str,
    sections: &[&str],
    description: &str,
) -> TestVectorDescriptor {
    let metadata = UserMetadata {
        test_vector_metadata: TestVectorMetadata {
            file_name_prefix: prefix.to_string(),
            base_test: base.to_string(),
            human_readable_description: description.to_string(),
            is_valid: true,
            primary_tested_spec_sections: sections.iter().map(|s| s.to_string()).collect(),
            ..TestVectorMetadata::default()
        },
        ..UserMetadata::default()
    };
    TestVectorDescriptor::new(Path::new("corpus").join(format!("{prefix}.yaml")), metadata)
}

#[test]
fn both_tables_are_fully_quoted() {
    let descriptors = vec![
        descriptor("t2", "", &["7.2/loudness", "7.2"], "Says \"hi\", twice"),
        descriptor("t1", "t2", &["7.2/loudness"], "plain"),
    ];
    let report = build(descriptors, "", &["7.2", "3.1"]).expect("build");
    let out = tempdir().expect("tmp dir");
    let target = out.path().join("reports/nested");
    let paths = write_reports(&target, &report.summary, &report.coverage).expect("write");
    assert_eq!(paths.summary, target.join(SUMMARY_FILE));
    assert_eq!(paths.coverage, target.join(COVERAGE_FILE));

    let summary = fs::read_to_string(&paths.summary).expect("summary");
    let lines: Vec<_> = summary.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#""test","base","primary_tested_spec_sections","is_valid","is_valid_to_decode","description""#,
            r#""t2","","7.2/loudness, 7.2","True","False","Says ""hi"", twice""#,
            r#""t1","t2","7.2/loudness","True","False","plain""#,
        ]
    );

    let coverage = fs::read_to_string(&paths.coverage).expect("coverage");
    let lines: Vec<_> = coverage.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#""primary_tested_spec_section","primary_tested_spec_section_field","tests""#,
            r#""3.1","","""#,
            r#""7.2","","t2""#,
            r#""7.2","loudness","t1, t2""#,
        ]
    );
}

#[test]
fn header_only_summary_when_nothing_is_selected() {
    let report = build(
        vec![descriptor("t1", "", &["3.1"], "d")],
        "no/such/tag",
        &["3.1"],
    )
    .expect("build");
    let out = tempdir().expect("tmp dir");
    let paths = write_reports(out.path(), &report.summary, &report.coverage).expect("write");
    let summary = fs::read_to_string(paths.summary).expect("summary");
    assert_eq!(summary.lines().count(), 1);
    let coverage = fs::read_to_string(paths.coverage).expect("coverage");
    assert_eq!(coverage.lines().count(), 2);
}

proptest! {
    #[test]
    fn rendered_test_lists_split_back(prefixes in prop::collection::vec("[a-z0-9_]{1,12}", 0..8)) {
        let expected: Vec<String> = prefixes
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let cell = render_list(&expected);
        prop_assert_eq!(split_list(&cell), expected);
    }
}
