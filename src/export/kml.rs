//! KML 2.2 export
//!
//! One `LineString` placemark joins every sample, followed by one timestamped
//! point placemark per sample carrying speed and bearing as `ExtendedData`.

use super::xml::{end, finish, new_document, start, text_element};
use super::{compute_export_paths, export_base_name, write_document, ExportOptions};
use crate::conversion::format_iso_utc;
use crate::error::Result;
use crate::types::{GpsLog, GpsSample};
use quick_xml::events::BytesStart;
use quick_xml::Writer;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// `lon,lat,alt` tuple; altitude is 0 when the schema has none
fn coordinate_tuple(sample: &GpsSample) -> String {
    format!(
        "{:.7},{:.7},{:.2}",
        sample.longitude,
        sample.latitude,
        sample.altitude.unwrap_or(0.0)
    )
}

fn write_data<W: Write>(writer: &mut Writer<W>, name: &str, value: &str) -> Result<()> {
    let mut data = BytesStart::new("Data");
    data.push_attribute(("name", name));
    start(writer, data)?;
    text_element(writer, "value", value)?;
    end(writer, "Data")
}

fn write_point_placemark<W: Write>(
    writer: &mut Writer<W>,
    index: usize,
    sample: &GpsSample,
) -> Result<()> {
    start(writer, BytesStart::new("Placemark"))?;
    text_element(writer, "name", &format!("Point {}", index + 1))?;

    start(writer, BytesStart::new("TimeStamp"))?;
    text_element(writer, "when", &format_iso_utc(sample.timestamp_ms)?)?;
    end(writer, "TimeStamp")?;

    if sample.speed.is_some() || sample.bearing.is_some() {
        start(writer, BytesStart::new("ExtendedData"))?;
        if let Some(speed) = sample.speed {
            write_data(writer, "speed", &format!("{speed:.2}"))?;
        }
        if let Some(bearing) = sample.bearing {
            write_data(writer, "bearing", &format!("{bearing:.2}"))?;
        }
        end(writer, "ExtendedData")?;
    }

    start(writer, BytesStart::new("Point"))?;
    text_element(writer, "coordinates", &coordinate_tuple(sample))?;
    end(writer, "Point")?;

    end(writer, "Placemark")
}

/// Render a complete KML document
pub fn render_kml(samples: &[GpsSample], name: &str) -> Result<String> {
    let mut writer = new_document()?;

    let mut kml = BytesStart::new("kml");
    kml.push_attribute(("xmlns", KML_NAMESPACE));
    start(&mut writer, kml)?;
    start(&mut writer, BytesStart::new("Document"))?;
    text_element(&mut writer, "name", name)?;

    start(&mut writer, BytesStart::new("Placemark"))?;
    text_element(&mut writer, "name", "Track")?;
    start(&mut writer, BytesStart::new("LineString"))?;
    text_element(&mut writer, "altitudeMode", "absolute")?;
    let coordinates: Vec<String> = samples.iter().map(coordinate_tuple).collect();
    text_element(&mut writer, "coordinates", &coordinates.join(" "))?;
    end(&mut writer, "LineString")?;
    end(&mut writer, "Placemark")?;

    for (index, sample) in samples.iter().enumerate() {
        write_point_placemark(&mut writer, index, sample)?;
    }

    end(&mut writer, "Document")?;
    end(&mut writer, "kml")?;
    Ok(finish(writer))
}

/// Export the log as KML
///
/// Returns `Ok(None)` without creating a file when the log is empty.
pub fn export_to_kml(
    log: &GpsLog,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<Option<PathBuf>> {
    if log.is_empty() {
        log::info!("No samples to export as KML");
        return Ok(None);
    }

    let path = compute_export_paths(input_path, export_options).kml;
    let document = render_kml(&log.samples, export_base_name(input_path))?;
    write_document(&path, document.as_bytes())?;

    log::info!("Exported KML track to: {}", path.display());
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_are_lon_lat_alt() {
        let mut sample = GpsSample::new(0, 52.5, 13.25);
        assert_eq!(coordinate_tuple(&sample), "13.2500000,52.5000000,0.00");

        sample.altitude = Some(34.5);
        assert_eq!(coordinate_tuple(&sample), "13.2500000,52.5000000,34.50");
    }

    #[test]
    fn test_render_kml_structure() {
        let mut first = GpsSample::new(1_700_000_000_000, 52.5, 13.25);
        first.speed = Some(12.5);
        first.bearing = Some(90.0);
        let mut second = GpsSample::new(1_700_000_001_000, 52.6, 13.35);
        second.speed = Some(13.0);
        second.bearing = Some(95.0);

        let kml = render_kml(&[first, second], "drive").unwrap();

        assert!(kml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(kml.contains("<kml xmlns=\"http://www.opengis.net/kml/2.2\">"));
        assert!(kml.contains("<name>drive</name>"));
        assert!(kml.contains(
            "<coordinates>13.2500000,52.5000000,0.00 13.3500000,52.6000000,0.00</coordinates>"
        ));
        assert!(kml.contains("<when>2023-11-14T22:13:20.000Z</when>"));
        assert!(kml.contains("<when>2023-11-14T22:13:21.000Z</when>"));
        assert!(kml.contains("<Data name=\"speed\">"));
        assert!(kml.contains("<value>12.50</value>"));
        assert_eq!(kml.matches("<Point>").count(), 2);
        assert_eq!(kml.matches("<LineString>").count(), 1);
    }

    #[test]
    fn test_minimal_samples_have_no_extended_data() {
        let kml = render_kml(&[GpsSample::new(0, 1.0, 2.0)], "plain").unwrap();
        assert!(!kml.contains("ExtendedData"));
    }

    #[test]
    fn test_name_is_escaped() {
        let kml = render_kml(&[GpsSample::new(0, 1.0, 2.0)], "a&b").unwrap();
        assert!(kml.contains("<name>a&amp;b</name>"));
    }
}
