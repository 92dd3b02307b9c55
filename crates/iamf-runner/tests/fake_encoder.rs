use std::fs;
use std::path::{Path, PathBuf};

use iamf_core::errors::{ErrorInfo, SuiteError};
use iamf_core::MetadataFormat;
use iamf_runner::{EncodeRequest, EncodeRunner, Encoder, EncoderOutput, Outcome, RunOpts};
use iamf_vectors::{TestVectorDescriptor, TestVectorMetadata, UserMetadata};
use serde_yaml::Value;

#[derive(Debug, Clone)]
struct Invocation {
    prefix: String,
    loudness_in_request: bool,
    loudness_in_file: bool,
    metadata_path: PathBuf,
    output_directory: PathBuf,
}

/// Records every request and answers with scripted exit codes by prefix.
#[derive(Debug, Default)]
struct RecordingEncoder {
    failing: Vec<&'static str>,
    unavailable: Vec<&'static str>,
    calls: Vec<Invocation>,
}

impl Encoder for RecordingEncoder {
    fn invoke(&mut self, request: &EncodeRequest<'_>) -> Result<EncoderOutput, SuiteError> {
        let prefix = request.metadata.test_vector_metadata.file_name_prefix.clone();
        let text = fs::read_to_string(request.metadata_path).expect("metadata file exists");
        let on_disk: UserMetadata = serde_yaml::from_str(&text).expect("metadata parses");
        self.calls.push(Invocation {
            prefix: prefix.clone(),
            loudness_in_request: request.metadata.test_vector_metadata.validate_user_loudness,
            loudness_in_file: on_disk.test_vector_metadata.validate_user_loudness,
            metadata_path: request.metadata_path.to_path_buf(),
            output_directory: request.output_directory.to_path_buf(),
        });
        if self.unavailable.contains(&prefix.as_str()) {
            return Err(SuiteError::Encoder(ErrorInfo::new(
                "iamf_runner.spawn",
                "encoder vanished",
            )));
        }
        let exit_code = if self.failing.contains(&prefix.as_str()) { 1 } else { 0 };
        Ok(EncoderOutput {
            exit_code: Some(exit_code),
            stdout: format!("encoded {prefix}"),
            stderr: if exit_code == 0 {
                String::new()
            } else {
                "loudness mismatch".to_string()
            },
        })
    }
}

fn descriptor(
    prefix: &str,
    is_valid: bool,
    validate_user_loudness: bool,
) -> TestVectorDescriptor {
    let mut metadata = UserMetadata {
        test_vector_metadata: TestVectorMetadata {
            file_name_prefix: prefix.to_string(),
            is_valid,
            validate_user_loudness,
            ..TestVectorMetadata::default()
        },
        ..UserMetadata::default()
    };
    metadata.payload.insert(
        "encoder_control_metadata".to_string(),
        Value::String("opaque".to_string()),
    );
    TestVectorDescriptor::new(Path::new("corpus").join(format!("{prefix}.yaml")), metadata)
}

fn runner(encoder: RecordingEncoder) -> EncodeRunner<RecordingEncoder> {
    EncodeRunner::new(encoder, RunOpts::new("corpus", "out"))
}

#[test]
fn invalid_vectors_never_reach_the_encoder() {
    let descriptors = vec![
        descriptor("t1", false, false),
        descriptor("t2", true, false),
        descriptor("t3", false, true),
    ];
    let mut runner = runner(RecordingEncoder::default());
    let report = runner.run_batch(&descriptors);
    let called: Vec<_> = runner
        .encoder()
        .calls
        .iter()
        .map(|call| call.prefix.as_str())
        .collect();
    assert_eq!(called, vec!["t2"]);
    assert_eq!(report.vectors[0].outcome, Outcome::Skipped);
    assert_eq!(report.vectors[2].outcome, Outcome::Skipped);
    assert_eq!(report.skipped(), 2);
    assert_eq!(report.passed(), 1);
}

#[test]
fn encoder_always_sees_loudness_validation_disabled() {
    let descriptors = vec![descriptor("on", true, true), descriptor("off", true, false)];
    let mut runner = runner(RecordingEncoder::default());
    runner.run_batch(&descriptors);
    for call in &runner.encoder().calls {
        assert!(!call.loudness_in_request, "{} request", call.prefix);
        assert!(!call.loudness_in_file, "{} file", call.prefix);
        assert_eq!(call.output_directory, PathBuf::from("out"));
    }
    // The loaded descriptor keeps its stored value.
    assert!(descriptors[0].vector().validate_user_loudness);
}

#[test]
fn failures_are_isolated_to_their_vector() {
    let descriptors = vec![
        descriptor("a", true, false),
        descriptor("b", true, false),
        descriptor("c", false, false),
        descriptor("d", true, false),
        descriptor("e", true, false),
    ];
    let encoder = RecordingEncoder {
        failing: vec!["a"],
        unavailable: vec!["d"],
        ..RecordingEncoder::default()
    };
    let mut runner = runner(encoder);
    let report = runner.run_batch(&descriptors);

    let valid = descriptors.iter().filter(|d| d.is_valid()).count();
    assert_eq!(runner.encoder().calls.len(), valid);
    assert_eq!(report.vectors.len(), descriptors.len());
    assert_eq!(report.failed(), 1);
    assert_eq!(report.errored(), 1);
    assert_eq!(report.passed(), 2);
    assert_eq!(report.invoked(), 3);
    assert!(!report.all_passed());

    match &report.vectors[0].outcome {
        Outcome::Failed {
            exit_code, stderr, ..
        } => {
            assert_eq!(*exit_code, Some(1));
            assert_eq!(stderr, "loudness mismatch");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(matches!(report.vectors[3].outcome, Outcome::Errored { .. }));
    let problems: Vec<_> = report.problems().map(|v| v.test.as_str()).collect();
    assert_eq!(problems, vec!["a", "d"]);
}

#[test]
fn metadata_files_are_removed_after_each_invocation() {
    let descriptors = vec![
        descriptor("ok", true, true),
        descriptor("bad", true, true),
        descriptor("gone", true, true),
    ];
    let encoder = RecordingEncoder {
        failing: vec!["bad"],
        unavailable: vec!["gone"],
        ..RecordingEncoder::default()
    };
    let mut runner = runner(encoder);
    let report = runner.run_batch(&descriptors);
    assert_eq!(report.passed(), 1);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.errored(), 1);
    let calls = &runner.encoder().calls;
    assert_eq!(calls.len(), 3);
    assert_ne!(calls[0].metadata_path, calls[1].metadata_path);
    assert_eq!(calls[2].prefix, "gone");
    for call in calls {
        assert!(!call.metadata_path.exists(), "{} left behind", call.prefix);
    }
}

#[test]
fn json_working_copy_keeps_the_payload() {
    #[derive(Default)]
    struct JsonCapture {
        documents: Vec<serde_json::Value>,
    }
    impl Encoder for JsonCapture {
        fn invoke(&mut self, request: &EncodeRequest<'_>) -> Result<EncoderOutput, SuiteError> {
            assert_eq!(
                request.metadata_path.extension().and_then(|e| e.to_str()),
                Some("json")
            );
            let bytes = fs::read(request.metadata_path).expect("metadata file");
            self.documents
                .push(serde_json::from_slice(&bytes).expect("json metadata"));
            Ok(EncoderOutput {
                exit_code: Some(0),
                ..EncoderOutput::default()
            })
        }
    }

    let mut opts = RunOpts::new("corpus", "out");
    opts.metadata_format = MetadataFormat::Json;
    let mut runner = EncodeRunner::new(JsonCapture::default(), opts);
    assert_eq!(runner.run(&descriptor("j1", true, true)), Outcome::Passed);
    let capture = runner.into_encoder();
    let document = &capture.documents[0];
    assert_eq!(document["encoder_control_metadata"], "opaque");
    assert_eq!(
        document["test_vector_metadata"]["validate_user_loudness"],
        serde_json::Value::Bool(false)
    );
}

#[test]
fn run_report_serializes_with_state_tags() {
    let descriptors = vec![descriptor("s", false, false), descriptor("p", true, false)];
    let mut runner = runner(RecordingEncoder::default());
    let report = runner.run_batch(&descriptors);
    let json = serde_json::to_value(&report).expect("json");
    assert_eq!(json["vectors"][0]["outcome"]["state"], "skipped");
    assert_eq!(json["vectors"][1]["outcome"]["state"], "passed");
}
