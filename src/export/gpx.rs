//! GPX 1.1 export
//!
//! One track with one segment; each sample becomes a `trkpt` with elevation,
//! UTC time, and speed/course in a Garmin `TrackPointExtension` block.

use super::xml::{end, finish, new_document, start, text_element};
use super::{compute_export_paths, export_base_name, write_document, ExportOptions};
use crate::conversion::format_iso_utc;
use crate::error::Result;
use crate::types::{GpsLog, GpsSample};
use quick_xml::events::BytesStart;
use quick_xml::Writer;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const GPX_NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";
pub const GPX_SCHEMA_LOCATION: &str =
    "http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd";
pub const TRACKPOINT_EXTENSION_NAMESPACE: &str =
    "http://www.garmin.com/xmlschemas/TrackPointExtension/v2";

const GPX_CREATOR: &str = concat!("gps_log_export ", env!("CARGO_PKG_VERSION"));

fn write_track_point<W: Write>(writer: &mut Writer<W>, sample: &GpsSample) -> Result<()> {
    let lat = format!("{:.7}", sample.latitude);
    let lon = format!("{:.7}", sample.longitude);
    let mut trkpt = BytesStart::new("trkpt");
    trkpt.push_attribute(("lat", lat.as_str()));
    trkpt.push_attribute(("lon", lon.as_str()));
    start(writer, trkpt)?;

    text_element(
        writer,
        "ele",
        &format!("{:.2}", sample.altitude.unwrap_or(0.0)),
    )?;
    text_element(writer, "time", &format_iso_utc(sample.timestamp_ms)?)?;

    if sample.speed.is_some() || sample.bearing.is_some() {
        start(writer, BytesStart::new("extensions"))?;
        start(writer, BytesStart::new("gpxtpx:TrackPointExtension"))?;
        if let Some(speed) = sample.speed {
            text_element(writer, "gpxtpx:speed", &format!("{speed:.2}"))?;
        }
        if let Some(bearing) = sample.bearing {
            text_element(writer, "gpxtpx:course", &format!("{bearing:.2}"))?;
        }
        end(writer, "gpxtpx:TrackPointExtension")?;
        end(writer, "extensions")?;
    }

    end(writer, "trkpt")
}

/// Render a complete GPX document
pub fn render_gpx(samples: &[GpsSample], name: &str) -> Result<String> {
    let mut writer = new_document()?;

    let mut gpx = BytesStart::new("gpx");
    gpx.push_attribute(("version", "1.1"));
    gpx.push_attribute(("creator", GPX_CREATOR));
    gpx.push_attribute(("xmlns", GPX_NAMESPACE));
    gpx.push_attribute(("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"));
    gpx.push_attribute(("xmlns:gpxtpx", TRACKPOINT_EXTENSION_NAMESPACE));
    gpx.push_attribute(("xsi:schemaLocation", GPX_SCHEMA_LOCATION));
    start(&mut writer, gpx)?;

    start(&mut writer, BytesStart::new("metadata"))?;
    text_element(&mut writer, "name", name)?;
    if let Some(first) = samples.first() {
        text_element(&mut writer, "time", &format_iso_utc(first.timestamp_ms)?)?;
    }
    end(&mut writer, "metadata")?;

    start(&mut writer, BytesStart::new("trk"))?;
    text_element(&mut writer, "name", name)?;
    start(&mut writer, BytesStart::new("trkseg"))?;
    for sample in samples {
        write_track_point(&mut writer, sample)?;
    }
    end(&mut writer, "trkseg")?;
    end(&mut writer, "trk")?;

    end(&mut writer, "gpx")?;
    Ok(finish(writer))
}

/// Export the log as GPX
///
/// Returns `Ok(None)` without creating a file when the log is empty.
pub fn export_to_gpx(
    log: &GpsLog,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<Option<PathBuf>> {
    if log.is_empty() {
        log::info!("No samples to export as GPX");
        return Ok(None);
    }

    let path = compute_export_paths(input_path, export_options).gpx;
    let document = render_gpx(&log.samples, export_base_name(input_path))?;
    write_document(&path, document.as_bytes())?;

    log::info!("Exported GPS track to: {}", path.display());
    Ok(Some(path))
}
