//! CSV export: one header row, then one row per sample
//!
//! Columns follow the schema, so a minimal log has no empty speed or
//! acceleration columns.

use super::{compute_export_paths, write_document, ExportOptions};
use crate::conversion::format_iso_utc;
use crate::error::{GpsLogError, Result};
use crate::types::{GpsLog, GpsSample, RecordSchema};
use std::path::{Path, PathBuf};

/// Column names for a schema, in output order
pub fn csv_header(schema: RecordSchema) -> Vec<&'static str> {
    let mut header = vec!["timestamp_ms", "time_utc", "latitude", "longitude"];
    if schema.has_altitude() {
        header.push("altitude_m");
    }
    if schema.has_bearing() {
        header.push("bearing_deg");
    }
    if schema.has_speed() {
        header.push("speed_mps");
    }
    if schema.has_acceleration() {
        header.extend(["accel_x", "accel_y", "accel_z"]);
    }
    header
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn csv_row(sample: &GpsSample, schema: RecordSchema) -> Result<Vec<String>> {
    let mut row = vec![
        sample.timestamp_ms.to_string(),
        format_iso_utc(sample.timestamp_ms)?,
        format!("{:.7}", sample.latitude),
        format!("{:.7}", sample.longitude),
    ];
    if schema.has_altitude() {
        row.push(optional(sample.altitude));
    }
    if schema.has_bearing() {
        row.push(optional(sample.bearing));
    }
    if schema.has_speed() {
        row.push(optional(sample.speed));
    }
    if schema.has_acceleration() {
        let accel = sample.acceleration.unwrap_or_default();
        row.extend([accel.x.to_string(), accel.y.to_string(), accel.z.to_string()]);
    }
    Ok(row)
}

/// Render the samples as CSV using the columns of `schema`
pub fn render_csv(samples: &[GpsSample], schema: RecordSchema) -> Result<String> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(csv_header(schema))?;
    for sample in samples {
        writer.write_record(csv_row(sample, schema)?)?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| GpsLogError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&data).into_owned())
}

/// Export the log as CSV
///
/// Returns `Ok(None)` without creating a file when the log is empty.
pub fn export_to_csv(
    log: &GpsLog,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<Option<PathBuf>> {
    if log.is_empty() {
        log::info!("No samples to export as CSV");
        return Ok(None);
    }

    let path = compute_export_paths(input_path, export_options).csv;
    let table = render_csv(&log.samples, log.schema)?;
    write_document(&path, table.as_bytes())?;

    log::info!("Exported {} rows to: {}", log.len(), path.display());
    Ok(Some(path))
}
