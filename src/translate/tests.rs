//! Tests for translate module

use super::*;
use crate::error::Error;
use crate::resources::{DatasetPatch, DatasetResource};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::time::Duration;
use test_case::test_case;

const HOUR: Duration = Duration::from_secs(60 * 60);

// ============================================================================
// Duration Tests
// ============================================================================

#[test_case(Duration::ZERO, 0; "zero")]
#[test_case(Duration::from_millis(1), 1; "one millisecond")]
#[test_case(HOUR, 3_600_000; "one hour")]
#[test_case(Duration::from_secs(86_400 * 365), 31_536_000_000; "one year")]
fn test_duration_to_millis(duration: Duration, expected: i64) {
    assert_eq!(duration_to_millis("d", duration).unwrap(), expected);
}

#[test]
fn test_duration_rejects_sub_millisecond() {
    let err = duration_to_millis("expiry", Duration::from_micros(1500)).unwrap_err();
    assert_eq!(err.field(), Some("expiry"));
}

#[test]
fn test_duration_rejects_overflow() {
    let err = duration_to_millis("expiry", Duration::from_secs(u64::MAX)).unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn test_millis_to_duration() {
    assert_eq!(millis_to_duration("d", 3_600_000).unwrap(), HOUR);
    assert!(matches!(
        millis_to_duration("d", -1),
        Err(Error::Decode { .. })
    ));
}

// ============================================================================
// DatasetMetadata Tests
// ============================================================================

#[test]
fn test_translate_none_is_zero_value() {
    assert_eq!(
        translate::<DatasetMetadata>(None).unwrap(),
        DatasetResource::default()
    );
    assert_eq!(
        translate::<DatasetMetadataToUpdate>(None).unwrap(),
        DatasetPatch::default()
    );
}

#[test]
fn test_translate_default_metadata_is_zero_value() {
    let wire = translate(Some(&DatasetMetadata::default())).unwrap();
    assert_eq!(wire, DatasetResource::default());
}

#[test]
fn test_translate_name_only() {
    let meta = DatasetMetadata {
        name: "name".into(),
        ..DatasetMetadata::default()
    };
    assert_eq!(
        meta.translate().unwrap(),
        DatasetResource {
            friendly_name: "name".into(),
            ..DatasetResource::default()
        }
    );
}

#[test]
fn test_translate_all_writable_fields() {
    let meta = DatasetMetadata {
        name: "name".into(),
        description: "desc".into(),
        default_table_expiration: HOUR,
        location: "EU".into(),
        labels: HashMap::from([("x".to_string(), "y".to_string())]),
        ..DatasetMetadata::default()
    };

    assert_eq!(
        meta.translate().unwrap(),
        DatasetResource {
            friendly_name: "name".into(),
            description: "desc".into(),
            default_table_expiration_ms: 60 * 60 * 1000,
            location: "EU".into(),
            labels: HashMap::from([("x".to_string(), "y".to_string())]),
            ..DatasetResource::default()
        }
    );
}

#[test]
fn test_translate_does_not_alias_labels() {
    let mut meta = DatasetMetadata {
        labels: HashMap::from([("x".to_string(), "y".to_string())]),
        ..DatasetMetadata::default()
    };
    let wire = meta.translate().unwrap();
    meta.labels.insert("z".into(), "w".into());
    assert_eq!(wire.labels.len(), 1);
}

#[test]
fn test_translate_rejects_full_id() {
    let meta = DatasetMetadata {
        full_id: "x".into(),
        ..DatasetMetadata::default()
    };
    let err = meta.translate().unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    assert_eq!(err.field(), Some("full_id"));
}

#[test_case("full_id")]
#[test_case("creation_time")]
#[test_case("last_modified_time")]
#[test_case("etag")]
fn test_translate_rejects_each_read_only_field(field: &str) {
    let when = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let mut meta = DatasetMetadata {
        name: "still writable".into(),
        ..DatasetMetadata::default()
    };
    match field {
        "full_id" => meta.full_id = "p:d".into(),
        "creation_time" => meta.creation_time = Some(when),
        "last_modified_time" => meta.last_modified_time = Some(when),
        "etag" => meta.etag = "abc".into(),
        _ => unreachable!(),
    }

    let err = translate(Some(&meta)).unwrap_err();
    assert_eq!(err.field(), Some(field));
}

#[test]
fn test_field_table_is_complete() {
    let read_only: Vec<_> = DatasetMetadata::FIELDS
        .iter()
        .filter(|spec| spec.access == FieldAccess::ReadOnly)
        .map(|spec| spec.name)
        .collect();
    assert_eq!(
        read_only,
        vec!["full_id", "creation_time", "last_modified_time", "etag"]
    );
    assert_eq!(
        DatasetMetadata::field("location").map(|spec| spec.access),
        Some(FieldAccess::Writable)
    );
    assert!(DatasetMetadata::field("nope").is_none());
}

#[test]
fn test_present_fields() {
    let meta = DatasetMetadata {
        name: "n".into(),
        etag: "e".into(),
        ..DatasetMetadata::default()
    };
    assert_eq!(present_fields(&meta), vec!["name", "etag"]);
}

#[test]
fn test_metadata_from_resource() {
    let resource = DatasetResource {
        friendly_name: "name".into(),
        default_table_expiration_ms: 3_600_000,
        id: Some("p:d".into()),
        etag: Some("tag".into()),
        creation_time: Some(1_577_836_800_000),
        ..DatasetResource::default()
    };

    let meta = DatasetMetadata::from_resource(&resource).unwrap();
    assert_eq!(meta.name, "name");
    assert_eq!(meta.default_table_expiration, HOUR);
    assert_eq!(meta.full_id, "p:d");
    assert_eq!(meta.etag, "tag");
    assert_eq!(
        meta.creation_time,
        Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(meta.last_modified_time, None);

    // a response is not valid input
    assert_eq!(meta.translate().unwrap_err().field(), Some("full_id"));
}

// ============================================================================
// DatasetMetadataToUpdate Tests
// ============================================================================

#[test]
fn test_update_distinguishes_empty_from_unset() {
    let update = DatasetMetadataToUpdate::new().description("");
    let patch = update.translate().unwrap();
    assert_eq!(
        patch,
        DatasetPatch {
            description: Some(String::new()),
            ..DatasetPatch::default()
        }
    );
    assert_eq!(patch.friendly_name, None);
}

#[test]
fn test_update_all_fields() {
    let update = DatasetMetadataToUpdate::new()
        .name("n")
        .default_table_expiration(HOUR)
        .set_label("keep", "v")
        .delete_label("drop");

    assert_eq!(
        present_fields(&update),
        vec!["name", "default_table_expiration", "labels"]
    );

    let patch = translate(Some(&update)).unwrap();
    assert_eq!(patch.friendly_name.as_deref(), Some("n"));
    assert_eq!(patch.default_table_expiration_ms, Some(3_600_000));
    assert_eq!(
        patch.labels,
        HashMap::from([
            ("keep".to_string(), Some("v".to_string())),
            ("drop".to_string(), None),
        ])
    );
}

#[test]
fn test_update_rejects_sub_millisecond_expiration() {
    let update = DatasetMetadataToUpdate::new().default_table_expiration(Duration::from_nanos(1));
    assert_eq!(
        update.translate().unwrap_err().field(),
        Some("default_table_expiration")
    );
}
