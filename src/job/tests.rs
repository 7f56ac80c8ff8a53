//! Tests for job module

use super::*;
use crate::client::InsertJob;
use crate::error::{Error, Result};
use crate::resources::{Job, JobConfigurationExtract, JobState, JobStatus, TableReference};
use crate::translate::{translate, Translate};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Mutex;
use test_case::test_case;

fn fixed_id() -> String {
    "r4nd0m".to_string()
}

fn table() -> TableReference {
    TableReference::new("p", "d", "t")
}

fn extract(job_id: &str, add_suffix: bool) -> ExtractConfig {
    ExtractConfig {
        job_id: job_id.into(),
        add_job_id_suffix: add_suffix,
        ..ExtractConfig::new(table(), GcsReference::new(["gs://bucket/out-*.csv"]))
    }
}

// ============================================================================
// Identity Tests
// ============================================================================

#[test_case("", false, "r4nd0m"; "no id")]
#[test_case("", true, "r4nd0m"; "no id with suffix")]
#[test_case("export_1", false, "export_1"; "explicit id")]
#[test_case("export_1", true, "export_1-r4nd0m"; "explicit id with suffix")]
fn test_resolve_job_id(job_id: &str, add_suffix: bool, expected: &str) {
    assert_eq!(resolve_job_id(job_id, add_suffix, fixed_id).unwrap(), expected);
}

#[test]
fn test_random_job_ids_are_distinct() {
    let a = random_job_id();
    let b = random_job_id();
    assert_ne!(a, b);
    assert_eq!(a.len(), 32);
    assert!(validate_job_id(&a).is_ok());
}

#[test_case("has space")]
#[test_case("dots.not.allowed")]
#[test_case("slash/no")]
fn test_invalid_job_id(job_id: &str) {
    let err = resolve_job_id(job_id, false, fixed_id).unwrap_err();
    assert_eq!(err.field(), Some("job_id"));
}

#[test]
fn test_job_id_length_limit() {
    let longest = "a".repeat(MAX_JOB_ID_LEN);
    assert!(validate_job_id(&longest).is_ok());

    let too_long = "a".repeat(MAX_JOB_ID_LEN + 1);
    assert!(matches!(
        validate_job_id(&too_long),
        Err(Error::Validation { .. })
    ));

    // the suffix can push a valid ID over the limit
    let near = "a".repeat(MAX_JOB_ID_LEN - 3);
    assert!(resolve_job_id(&near, true, fixed_id).is_err());
}

// ============================================================================
// Extract Translation Tests
// ============================================================================

#[test]
fn test_translate_absent_extract_is_zero_value() {
    assert_eq!(
        translate::<ExtractConfig>(None).unwrap(),
        JobConfigurationExtract::default()
    );
}

#[test]
fn test_translate_empty_extract_is_zero_value() {
    assert_eq!(
        translate(Some(&ExtractConfig::default())).unwrap(),
        JobConfigurationExtract::default()
    );
}

#[test]
fn test_translate_extract_defaults() {
    let wire = extract("", false).translate().unwrap();
    assert_eq!(
        serde_json::to_value(&wire).unwrap(),
        json!({
            "destinationUris": ["gs://bucket/out-*.csv"],
            "sourceTable": {"projectId": "p", "datasetId": "d", "tableId": "t"},
        })
    );
}

#[test]
fn test_translate_extract_all_options() {
    let config = ExtractConfig {
        disable_header: true,
        ..ExtractConfig::new(
            table(),
            GcsReference::new(["gs://b/a", "gs://b/b"])
                .with_compression(Compression::Gzip)
                .with_format(DataFormat::Json)
                .with_field_delimiter("\t"),
        )
    };

    assert_eq!(
        config.translate().unwrap(),
        JobConfigurationExtract {
            destination_uris: vec!["gs://b/a".into(), "gs://b/b".into()],
            compression: "GZIP".into(),
            destination_format: "NEWLINE_DELIMITED_JSON".into(),
            field_delimiter: "\t".into(),
            source_table: Some(table()),
            print_header: Some(false),
        }
    );
}

#[test]
fn test_header_is_tri_state() {
    let printed = extract("", false).translate().unwrap();
    assert_eq!(printed.print_header, None);

    let mut config = extract("", false);
    config.disable_header = true;
    assert_eq!(config.translate().unwrap().print_header, Some(false));
}

#[test]
fn test_validate_extract_requires_uris() {
    let config = ExtractConfig::new(table(), GcsReference::default());
    assert_eq!(config.validate().unwrap_err().field(), Some("dst.uris"));
    // translation alone stays total
    assert!(config.translate().is_ok());
}

#[test]
fn test_validate_extract_rejects_non_gcs_uri() {
    let config = ExtractConfig::new(table(), GcsReference::new(["s3://bucket/x"]));
    assert_eq!(config.validate().unwrap_err().field(), Some("dst.uris"));
}

#[test]
fn test_validate_extract_requires_source() {
    let config = ExtractConfig::new(
        TableReference::new("p", "", "t"),
        GcsReference::new(["gs://b/x"]),
    );
    assert_eq!(config.validate().unwrap_err().field(), Some("src"));
}

#[test]
fn test_translate_extract_copies_uris() {
    let mut config = ExtractConfig::new(table(), GcsReference::new(["gs://b/x"]));
    let wire = config.translate().unwrap();
    config.dst = GcsReference::new(["gs://b/y", "gs://b/z"]);
    assert_eq!(wire.destination_uris, vec!["gs://b/x".to_string()]);
}

#[test_case("gzip", Compression::Gzip; "gzip")]
#[test_case("SNAPPY", Compression::Snappy; "snappy upper case")]
#[test_case("none", Compression::None; "none")]
fn test_parse_compression(s: &str, expected: Compression) {
    assert_eq!(s.parse::<Compression>().unwrap(), expected);
}

#[test_case("csv", DataFormat::Csv; "csv")]
#[test_case("ndjson", DataFormat::Json; "ndjson alias")]
#[test_case("Parquet", DataFormat::Parquet; "parquet mixed case")]
fn test_parse_format(s: &str, expected: DataFormat) {
    assert_eq!(s.parse::<DataFormat>().unwrap(), expected);
}

#[test]
fn test_parse_unknown_format() {
    let err = "xml".parse::<DataFormat>().unwrap_err();
    assert_eq!(err.field(), Some("destination_format"));
}

// ============================================================================
// Submitter Tests
// ============================================================================

#[derive(Default)]
struct RecordingInserter {
    jobs: Mutex<Vec<Job>>,
    fail: bool,
}

#[async_trait]
impl InsertJob for RecordingInserter {
    async fn insert_job(&self, job: &Job) -> Result<JobHandle> {
        self.jobs.lock().unwrap().push(job.clone());
        if self.fail {
            return Err(Error::http_status("jobs.insert", 409, "duplicate"));
        }
        let mut inserted = job.clone();
        inserted.status = Some(JobStatus {
            error_result: None,
            errors: Vec::new(),
            state: JobState::Pending,
        });
        JobHandle::from_job(inserted)
    }
}

#[test]
fn test_new_job_envelope() {
    let submitter = JobSubmitter::new("proj")
        .with_location("EU")
        .with_id_source(fixed_id);
    let job = submitter
        .new_job(&extract("nightly", true).into())
        .unwrap();

    assert_eq!(
        serde_json::to_value(&job).unwrap(),
        json!({
            "jobReference": {
                "projectId": "proj",
                "jobId": "nightly-r4nd0m",
                "location": "EU",
            },
            "configuration": {
                "extract": {
                    "destinationUris": ["gs://bucket/out-*.csv"],
                    "sourceTable": {"projectId": "p", "datasetId": "d", "tableId": "t"},
                }
            }
        })
    );
}

#[test]
fn test_new_job_empty_location_is_unset() {
    let job = JobSubmitter::new("proj")
        .with_location("")
        .new_job(&extract("x", false).into())
        .unwrap();
    assert_eq!(job.job_reference.unwrap().location, None);
}

#[test]
fn test_new_job_rejects_bad_config() {
    let config = ExtractConfig::new(table(), GcsReference::default());
    let err = JobSubmitter::new("proj").new_job(&config.into()).unwrap_err();
    assert_eq!(err.field(), Some("dst.uris"));
}

#[test]
fn test_new_job_rejects_empty_extract() {
    let err = JobSubmitter::new("proj")
        .new_job(&ExtractConfig::default().into())
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[tokio::test]
async fn test_run_inserts_once() {
    let inserter = RecordingInserter::default();
    let submitter = JobSubmitter::new("proj").with_id_source(fixed_id);

    let handle = submitter
        .run(&extract("", false).into(), &inserter)
        .await
        .unwrap();

    assert_eq!(handle.job_id, "r4nd0m");
    assert_eq!(handle.project_id, "proj");
    assert!(!handle.failed());
    assert_eq!(inserter.jobs.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_run_surfaces_insert_error_unmodified() {
    let inserter = RecordingInserter {
        fail: true,
        ..RecordingInserter::default()
    };
    let err = JobSubmitter::new("proj")
        .run(&extract("dup", false).into(), &inserter)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::HttpStatus {
            operation: "jobs.insert",
            status: 409,
            ..
        }
    ));
    // no retry
    assert_eq!(inserter.jobs.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_run_validation_error_skips_insert() {
    let inserter = RecordingInserter::default();
    let config = ExtractConfig::new(table(), GcsReference::default());
    let result = JobSubmitter::new("proj")
        .run(&config.into(), &inserter)
        .await;

    assert!(result.is_err());
    assert!(inserter.jobs.lock().unwrap().is_empty());
}

#[test]
fn test_handle_requires_reference() {
    assert!(matches!(
        JobHandle::from_job(Job::default()),
        Err(Error::Decode { .. })
    ));
}
