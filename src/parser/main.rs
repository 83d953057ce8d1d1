use crate::error::{GpsLogError, Result};
use crate::filters::{apply_ordering, OrderingPolicy};
use crate::parser::record::decode_records;
use crate::types::*;
use std::path::Path;

/// What to do when the buffer does not end on a record boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TruncationPolicy {
    /// Drop the trailing bytes and log a warning
    #[default]
    Warn,
    /// Fail with [`GpsLogError::TruncatedRecord`]
    Reject,
}

/// Options for one decoding session
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    pub schema: RecordSchema,
    pub ordering: OrderingPolicy,
    pub truncation: TruncationPolicy,
}

impl DecodeOptions {
    pub fn with_schema(schema: RecordSchema) -> Self {
        Self {
            schema,
            ..Self::default()
        }
    }
}

/// Read a GPS log file wholesale and decode it
pub fn decode_file(file_path: &Path, options: &DecodeOptions) -> Result<GpsLog> {
    if !file_path.exists() {
        return Err(GpsLogError::InputNotFound(file_path.to_path_buf()));
    }

    let data = std::fs::read(file_path)?;
    log::debug!(
        "Read {} bytes from {} ({:.2} KB)",
        data.len(),
        file_path.display(),
        data.len() as f64 / 1024.0
    );

    decode_bytes(&data, options)
}

/// Decode a GPS log held in memory
pub fn decode_bytes(data: &[u8], options: &DecodeOptions) -> Result<GpsLog> {
    let schema = options.schema;
    let record_size = schema.record_size();
    let trailing = data.len() % record_size;

    if trailing != 0 {
        match options.truncation {
            TruncationPolicy::Reject => {
                return Err(GpsLogError::TruncatedRecord {
                    trailing,
                    record_size,
                });
            }
            TruncationPolicy::Warn => log::warn!(
                "Ignoring {} trailing bytes: input length {} is not a multiple of the {}-byte {} record",
                trailing,
                data.len(),
                record_size,
                schema
            ),
        }
    }

    let mut samples = decode_records(data, schema);
    apply_ordering(&mut samples, options.ordering)?;

    log::debug!(
        "Decoded {} {} records ({} bytes each)",
        samples.len(),
        schema,
        record_size
    );

    Ok(GpsLog {
        schema,
        stats: DecodeStats {
            input_bytes: data.len(),
            record_count: samples.len(),
            trailing_bytes: trailing,
        },
        samples,
    })
}
