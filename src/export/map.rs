//! Interactive HTML map export
//!
//! The page is rendered from `templates/map.html` with askama. Samples are
//! subsampled by a fixed stride to bound the marker count and, when the
//! schema carries speed, coloured by [`SpeedBand`].

use super::{compute_export_paths, export_base_name, write_document, ExportOptions};
use crate::conversion::{convert_speed_to_kmh, format_text_timestamp, DisplayZone, SpeedBand};
use crate::error::{GpsLogError, Result};
use crate::filters::subsample;
use crate::types::{GpsLog, GpsSample};
use askama::Template;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

pub const DEFAULT_ZOOM: u8 = 15;

// Marker colour for samples without speed.
const NEUTRAL_FILL: &str = "#3388ff";

#[derive(Debug, Clone, Copy)]
pub struct MapOptions {
    /// Keep every Nth sample; 1 keeps all of them
    pub stride: usize,
    pub zoom: u8,
    /// Zone used for the timestamps shown in marker popups
    pub zone: DisplayZone,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            stride: 1,
            zoom: DEFAULT_ZOOM,
            zone: DisplayZone::Local,
        }
    }
}

/// One marker as embedded in the page
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub lat: f64,
    pub lon: f64,
    pub time: String,
    pub band: Option<SpeedBand>,
    pub fill: &'static str,
    pub speed_kmh: Option<f32>,
}

struct LegendEntry {
    hex: &'static str,
    label: String,
}

#[derive(Template)]
#[template(path = "map.html")]
struct MapTemplate<'a> {
    title: &'a str,
    center_lat: f64,
    center_lon: f64,
    zoom: u8,
    markers_json: String,
    legend: Vec<LegendEntry>,
}

fn build_marker(sample: &GpsSample, zone: DisplayZone) -> Result<MapMarker> {
    let band = sample.speed.map(SpeedBand::from_speed);
    Ok(MapMarker {
        lat: sample.latitude,
        lon: sample.longitude,
        time: format_text_timestamp(sample.timestamp_ms, zone)?,
        band,
        fill: band.map(SpeedBand::hex).unwrap_or(NEUTRAL_FILL),
        speed_kmh: sample.speed.map(convert_speed_to_kmh),
    })
}

/// Subsample and classify the samples that end up on the map
pub fn build_markers(samples: &[GpsSample], options: &MapOptions) -> Result<Vec<MapMarker>> {
    subsample(samples, options.stride)?
        .into_iter()
        .map(|sample| build_marker(sample, options.zone))
        .collect()
}

impl MapMarker {
    fn to_json(&self) -> Value {
        json!({
            "lat": self.lat,
            "lon": self.lon,
            "time": self.time,
            "band": self.band.map(SpeedBand::color),
            "fill": self.fill,
            "speed_kmh": self.speed_kmh,
        })
    }
}

fn legend_entries() -> Vec<LegendEntry> {
    const LABELS: [(SpeedBand, &str); 6] = [
        (SpeedBand::Green, "< 30 km/h"),
        (SpeedBand::Blue, "30 - 60 km/h"),
        (SpeedBand::Cyan, "60 - 80 km/h"),
        (SpeedBand::Magenta, "80 - 100 km/h"),
        (SpeedBand::Yellow, "100 - 120 km/h"),
        (SpeedBand::Red, ">= 120 km/h"),
    ];
    LABELS
        .iter()
        .map(|&(band, label)| LegendEntry {
            hex: band.hex(),
            label: format!("{band}: {label}"),
        })
        .collect()
}

/// Render the map page
///
/// The first kept sample frames the initial view, so an empty sequence is
/// rejected with [`GpsLogError::EmptySequence`].
pub fn render_map(samples: &[GpsSample], title: &str, options: &MapOptions) -> Result<String> {
    let markers = build_markers(samples, options)?;
    let center = markers.first().ok_or(GpsLogError::EmptySequence)?;
    let has_speed = markers.iter().any(|m| m.band.is_some());

    let template = MapTemplate {
        title,
        center_lat: center.lat,
        center_lon: center.lon,
        zoom: options.zoom,
        markers_json: serde_json::to_string(
            &markers.iter().map(MapMarker::to_json).collect::<Vec<_>>(),
        )?,
        legend: if has_speed {
            legend_entries()
        } else {
            Vec::new()
        },
    };
    Ok(template.render()?)
}

/// Export the log as an HTML map page
pub fn export_to_map(
    log: &GpsLog,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<PathBuf> {
    if log.is_empty() {
        return Err(GpsLogError::EmptySequence);
    }

    let path = compute_export_paths(input_path, export_options).map;
    let page = render_map(
        &log.samples,
        export_base_name(input_path),
        &export_options.map_options,
    )?;
    write_document(&path, page.as_bytes())?;

    log::info!(
        "Exported map with {} markers to: {}",
        log.len().div_ceil(export_options.map_options.stride),
        path.display()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc_options(stride: usize) -> MapOptions {
        MapOptions {
            stride,
            zone: DisplayZone::Utc,
            ..MapOptions::default()
        }
    }

    fn with_speed(index: u64, speed: f32) -> GpsSample {
        let mut sample = GpsSample::new(1_700_000_000_000 + index * 1000, 45.0 + index as f64, 9.0);
        sample.speed = Some(speed);
        sample
    }

    #[test]
    fn test_markers_are_banded_by_speed() {
        let samples = vec![with_speed(0, 30.0), with_speed(1, 40.0), with_speed(2, 5.0)];
        let markers = build_markers(&samples, &utc_options(1)).unwrap();

        assert_eq!(markers[0].band, Some(SpeedBand::Yellow));
        assert_eq!(markers[1].band, Some(SpeedBand::Red));
        assert_eq!(markers[2].band, Some(SpeedBand::Green));
        assert_eq!(markers[1].fill, SpeedBand::Red.hex());
    }

    #[test]
    fn test_markers_without_speed_are_neutral() {
        let markers =
            build_markers(&[GpsSample::new(0, 1.0, 2.0)], &utc_options(1)).unwrap();
        assert_eq!(markers[0].band, None);
        assert_eq!(markers[0].fill, NEUTRAL_FILL);
        assert_eq!(markers[0].time, "1970/01/01 00:00:00.000");
    }

    #[test]
    fn test_stride_selects_every_nth_sample() {
        let samples: Vec<GpsSample> = (0..10).map(|i| with_speed(i, 1.0)).collect();
        let markers = build_markers(&samples, &utc_options(4)).unwrap();
        let lats: Vec<f64> = markers.iter().map(|m| m.lat).collect();
        assert_eq!(lats, vec![45.0, 49.0, 53.0]);
    }

    #[test]
    fn test_render_map_centers_on_first_marker() {
        let samples = vec![with_speed(3, 12.0), with_speed(4, 12.0)];
        let html = render_map(&samples, "evening drive", &utc_options(1)).unwrap();

        assert!(html.contains("<title>evening drive</title>"));
        assert!(html.contains("setView([48, 9], 15)"));
        assert!(html.contains("\"band\":\"blue\""));
        assert!(html.contains("leaflet"));
    }

    #[test]
    fn test_render_map_rejects_empty() {
        assert!(matches!(
            render_map(&[], "empty", &MapOptions::default()),
            Err(GpsLogError::EmptySequence)
        ));
    }

    #[test]
    fn test_render_map_rejects_zero_stride() {
        let samples = vec![with_speed(0, 1.0)];
        assert!(matches!(
            render_map(&samples, "zero", &utc_options(0)),
            Err(GpsLogError::InvalidStride)
        ));
    }
}
