//! Decoding tests against files on disk
//!
//! Logs are synthesized with the record encoder, written to a temp dir and
//! read back through the file API, the way the CLI reads them.

use gps_log_export::{
    decode_bytes, decode_file, encode_records, DecodeOptions, GpsLogError, GpsSample,
    OrderingPolicy, RecordSchema, TruncationPolicy,
};
use std::fs;
use tempfile::TempDir;

fn minimal_track(count: u64) -> Vec<GpsSample> {
    (0..count)
        .map(|i| GpsSample::new(1_700_000_000_000 + i * 250, -22.9 - i as f64 * 1e-5, -43.2))
        .collect()
}

#[test]
fn test_minimal_file_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("20231114221320");
    let data = encode_records(&minimal_track(50), RecordSchema::Minimal);
    assert_eq!(data.len(), 50 * 24);
    fs::write(&path, &data).unwrap();

    let log = decode_file(&path, &DecodeOptions::with_schema(RecordSchema::Minimal)).unwrap();
    assert_eq!(log.len(), data.len() / 24);
    assert_eq!(log.stats.trailing_bytes, 0);
    assert_eq!(encode_records(&log.samples, RecordSchema::Minimal), data);
}

#[test]
fn test_remainder_is_dropped_for_every_schema() {
    for schema in RecordSchema::ALL {
        let size = schema.record_size();
        for remainder in [1, size / 2, size - 1] {
            let mut data = vec![0u8; 3 * size];
            data.extend(std::iter::repeat(0xFF).take(remainder));

            let log = decode_bytes(&data, &DecodeOptions::with_schema(schema)).unwrap();
            assert_eq!(log.len(), 3, "{schema} with {remainder} trailing bytes");
            assert_eq!(log.stats.trailing_bytes, remainder);
        }
    }
}

#[test]
fn test_empty_file_decodes_to_empty_log() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("empty");
    fs::write(&path, b"").unwrap();

    for schema in RecordSchema::ALL {
        let log = decode_file(&path, &DecodeOptions::with_schema(schema)).unwrap();
        assert!(log.is_empty());
        assert_eq!(log.duration_seconds(), 0.0);
    }
}

#[test]
fn test_strict_mode_rejects_partial_record() {
    let mut data = encode_records(&minimal_track(2), RecordSchema::Minimal);
    data.extend_from_slice(&[0; 10]);

    let options = DecodeOptions {
        schema: RecordSchema::Minimal,
        truncation: TruncationPolicy::Reject,
        ..DecodeOptions::default()
    };
    assert!(matches!(
        decode_bytes(&data, &options),
        Err(GpsLogError::TruncatedRecord {
            trailing: 10,
            record_size: 24
        })
    ));
}

#[test]
fn test_validate_ordering_reports_first_regression() {
    let mut samples = minimal_track(5);
    samples[3].timestamp_ms = samples[1].timestamp_ms - 1;
    let data = encode_records(&samples, RecordSchema::Minimal);

    let options = DecodeOptions {
        schema: RecordSchema::Minimal,
        ordering: OrderingPolicy::Validate,
        ..DecodeOptions::default()
    };
    match decode_bytes(&data, &options) {
        Err(GpsLogError::OutOfOrder { index, .. }) => assert_eq!(index, 3),
        other => panic!("expected OutOfOrder, got {other:?}"),
    }
}

#[test]
fn test_wrong_schema_changes_record_count() {
    // 52-byte recorder records read as 24-byte minimal ones: no error, just
    // a different record count, since the format has no header to check.
    let mut sample = GpsSample::new(1_700_000_000_000, 10.0, 20.0);
    sample.altitude = Some(5.0);
    let data = encode_records(&[sample.clone(), sample], RecordSchema::Recorder);

    let log = decode_bytes(&data, &DecodeOptions::with_schema(RecordSchema::Minimal)).unwrap();
    assert_eq!(log.len(), 104 / 24);
    assert_eq!(log.stats.trailing_bytes, 104 % 24);
}
