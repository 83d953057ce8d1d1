//! Fixed-size record codec
//!
//! Records are flat little-endian structs laid out by [`RecordSchema::fields`].
//! Decoding walks the buffer in `record_size` steps; a remainder shorter than
//! one record is never looked at.

use crate::types::{Acceleration, GpsSample, RecordField, RecordSchema};
use byteorder::{ByteOrder, LittleEndian};

/// Decode every complete record in `data`, in file order
///
/// Bytes after the last complete record are ignored, so a buffer shorter
/// than one record decodes to an empty vector.
pub fn decode_records(data: &[u8], schema: RecordSchema) -> Vec<GpsSample> {
    data.chunks_exact(schema.record_size())
        .map(|record| decode_record(record, schema))
        .collect()
}

/// Decode a single record; `record` must be exactly `schema.record_size()` long
pub fn decode_record(record: &[u8], schema: RecordSchema) -> GpsSample {
    debug_assert_eq!(record.len(), schema.record_size());

    let mut sample = GpsSample::new(0, 0.0, 0.0);
    let mut accel = Acceleration::default();
    let mut offset = 0;

    for &field in schema.fields() {
        let bytes = &record[offset..offset + field.size()];
        match field {
            RecordField::Timestamp => sample.timestamp_ms = LittleEndian::read_u64(bytes),
            RecordField::Latitude => sample.latitude = LittleEndian::read_f64(bytes),
            RecordField::Longitude => sample.longitude = LittleEndian::read_f64(bytes),
            RecordField::Altitude32 => {
                sample.altitude = Some(LittleEndian::read_f32(bytes) as f64)
            }
            RecordField::Altitude64 => sample.altitude = Some(LittleEndian::read_f64(bytes)),
            RecordField::Bearing => sample.bearing = Some(LittleEndian::read_f32(bytes)),
            RecordField::Speed => sample.speed = Some(LittleEndian::read_f32(bytes)),
            RecordField::AccelX => accel.x = LittleEndian::read_f32(bytes),
            RecordField::AccelY => accel.y = LittleEndian::read_f32(bytes),
            RecordField::AccelZ => accel.z = LittleEndian::read_f32(bytes),
        }
        offset += field.size();
    }

    if schema.has_acceleration() {
        sample.acceleration = Some(accel);
    }
    sample
}

/// Encode one sample with the given layout, as the recorder writes it
///
/// Optional fields the sample does not carry are written as zero; fields
/// the schema does not declare are dropped.
pub fn encode_record(sample: &GpsSample, schema: RecordSchema) -> Vec<u8> {
    let mut record = vec![0u8; schema.record_size()];
    let accel = sample.acceleration.unwrap_or_default();
    let mut offset = 0;

    for &field in schema.fields() {
        let bytes = &mut record[offset..offset + field.size()];
        match field {
            RecordField::Timestamp => LittleEndian::write_u64(bytes, sample.timestamp_ms),
            RecordField::Latitude => LittleEndian::write_f64(bytes, sample.latitude),
            RecordField::Longitude => LittleEndian::write_f64(bytes, sample.longitude),
            RecordField::Altitude32 => {
                LittleEndian::write_f32(bytes, sample.altitude.unwrap_or(0.0) as f32)
            }
            RecordField::Altitude64 => {
                LittleEndian::write_f64(bytes, sample.altitude.unwrap_or(0.0))
            }
            RecordField::Bearing => LittleEndian::write_f32(bytes, sample.bearing.unwrap_or(0.0)),
            RecordField::Speed => LittleEndian::write_f32(bytes, sample.speed.unwrap_or(0.0)),
            RecordField::AccelX => LittleEndian::write_f32(bytes, accel.x),
            RecordField::AccelY => LittleEndian::write_f32(bytes, accel.y),
            RecordField::AccelZ => LittleEndian::write_f32(bytes, accel.z),
        }
        offset += field.size();
    }

    record
}

/// Encode a whole sequence back-to-back
pub fn encode_records(samples: &[GpsSample], schema: RecordSchema) -> Vec<u8> {
    let mut data = Vec::with_capacity(samples.len() * schema.record_size());
    for sample in samples {
        data.extend_from_slice(&encode_record(sample, schema));
    }
    data
}
