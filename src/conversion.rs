//! Data conversion utilities for GPS samples
//!
//! Contains the timestamp-to-calendar conversions used by every exporter and
//! the speed classification used for map markers.

use crate::error::{GpsLogError, Result};
use crate::types::GpsSample;
use chrono::{DateTime, Local, SecondsFormat, TimeZone, Utc};
use std::fmt;

/// Time zone used when rendering human-readable timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    /// Local time of the machine running the export
    #[default]
    Local,
    Utc,
}

const TEXT_TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.3f";

fn utc_datetime(timestamp_ms: u64) -> Result<DateTime<Utc>> {
    i64::try_from(timestamp_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .ok_or(GpsLogError::InvalidTimestamp(timestamp_ms))
}

/// Format a millisecond timestamp as `YYYY/MM/DD HH:MM:SS.mmm`
pub fn format_text_timestamp(timestamp_ms: u64, zone: DisplayZone) -> Result<String> {
    let utc = utc_datetime(timestamp_ms)?;
    Ok(match zone {
        DisplayZone::Local => format_in_zone(&utc, &Local),
        DisplayZone::Utc => format_in_zone(&utc, &Utc),
    })
}

fn format_in_zone<Tz: TimeZone>(utc: &DateTime<Utc>, zone: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    utc.with_timezone(zone)
        .format(TEXT_TIMESTAMP_FORMAT)
        .to_string()
}

/// Format a millisecond timestamp as an RFC 3339 UTC string, e.g.
/// `2023-11-14T22:13:20.000Z`
///
/// The value is converted to UTC before the `Z` suffix is attached, so the
/// output is correct regardless of the exporting machine's time zone.
pub fn format_iso_utc(timestamp_ms: u64) -> Result<String> {
    Ok(utc_datetime(timestamp_ms)?.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Format the timestamp of a sample for text output
pub fn format_sample_timestamp(sample: &GpsSample, zone: DisplayZone) -> Result<String> {
    format_text_timestamp(sample.timestamp_ms, zone)
}

/// Convert meters per second to kilometers per hour
pub fn convert_speed_to_kmh(speed_ms: f32) -> f32 {
    speed_ms * 3.6
}

/// Speed bucket used to colour map markers, in ascending severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpeedBand {
    Green,
    Blue,
    Cyan,
    Magenta,
    Yellow,
    Red,
}

// Upper bounds (exclusive) in m/s, roughly 30/60/80/100/120 km/h.
const SPEED_BAND_LIMITS: [(f32, SpeedBand); 5] = [
    (8.3, SpeedBand::Green),
    (16.6, SpeedBand::Blue),
    (22.2, SpeedBand::Cyan),
    (27.7, SpeedBand::Magenta),
    (33.3, SpeedBand::Yellow),
];

impl SpeedBand {
    /// Classify a speed in m/s. Bands are half-open: a speed equal to a
    /// limit belongs to the next band up.
    pub fn from_speed(speed_ms: f32) -> Self {
        SPEED_BAND_LIMITS
            .iter()
            .find(|(limit, _)| speed_ms < *limit)
            .map(|&(_, band)| band)
            .unwrap_or(SpeedBand::Red)
    }

    pub fn color(self) -> &'static str {
        match self {
            SpeedBand::Green => "green",
            SpeedBand::Blue => "blue",
            SpeedBand::Cyan => "cyan",
            SpeedBand::Magenta => "magenta",
            SpeedBand::Yellow => "yellow",
            SpeedBand::Red => "red",
        }
    }

    /// CSS hex colour for the marker fill
    pub fn hex(self) -> &'static str {
        match self {
            SpeedBand::Green => "#2e7d32",
            SpeedBand::Blue => "#1565c0",
            SpeedBand::Cyan => "#00acc1",
            SpeedBand::Magenta => "#c2185b",
            SpeedBand::Yellow => "#fbc02d",
            SpeedBand::Red => "#d32f2f",
        }
    }
}

impl fmt::Display for SpeedBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.color())
    }
}
