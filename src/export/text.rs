//! Plain text summary lines, one per sample

use super::{compute_export_paths, write_document, ExportOptions};
use crate::conversion::{format_sample_timestamp, DisplayZone};
use crate::error::Result;
use crate::types::{GpsLog, GpsSample};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    pub zone: DisplayZone,
    /// Print latitude/longitude unrounded instead of with 2 decimals
    pub full_precision: bool,
}

/// Render one sample as a space separated line
///
/// Layout: `timestamp lat lon [alt] [bearing] [speed] [ax ay az]`. Position,
/// altitude, bearing and acceleration use 2 decimals; speed is truncated to
/// an integer.
pub fn render_text_line(sample: &GpsSample, options: &TextOptions) -> Result<String> {
    let mut line = format_sample_timestamp(sample, options.zone)?;

    if options.full_precision {
        line.push_str(&format!(" {} {}", sample.latitude, sample.longitude));
    } else {
        line.push_str(&format!(" {:.2} {:.2}", sample.latitude, sample.longitude));
    }
    if let Some(altitude) = sample.altitude {
        line.push_str(&format!(" {altitude:.2}"));
    }
    if let Some(bearing) = sample.bearing {
        line.push_str(&format!(" {bearing:.2}"));
    }
    if let Some(speed) = sample.speed {
        line.push_str(&format!(" {}", speed as i64));
    }
    if let Some(accel) = sample.acceleration {
        line.push_str(&format!(" {:.2} {:.2} {:.2}", accel.x, accel.y, accel.z));
    }

    Ok(line)
}

/// Render every sample, in input order, newline terminated
///
/// A sample whose timestamp cannot be shown as a calendar date fails the
/// whole rendering with [`crate::error::GpsLogError::InvalidTimestamp`].
pub fn render_text(samples: &[GpsSample], options: &TextOptions) -> Result<String> {
    let mut out = String::new();
    for sample in samples {
        out.push_str(&render_text_line(sample, options)?);
        out.push('\n');
    }
    Ok(out)
}

/// Write the text rendering next to the input (or into the output directory)
///
/// Returns `Ok(None)` without creating a file when the log is empty.
pub fn export_to_text(
    log: &GpsLog,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<Option<PathBuf>> {
    if log.is_empty() {
        log::info!("No samples to write as text");
        return Ok(None);
    }

    let path = compute_export_paths(input_path, export_options).text;
    let text = render_text(&log.samples, &export_options.text_options)?;
    write_document(&path, text.as_bytes())?;

    log::info!("Exported {} text lines to: {}", log.len(), path.display());
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Acceleration;

    fn utc() -> TextOptions {
        TextOptions {
            zone: DisplayZone::Utc,
            full_precision: false,
        }
    }

    #[test]
    fn test_minimal_line() {
        let sample = GpsSample::new(1_700_000_000_000, 48.85661, 2.35222);
        assert_eq!(
            render_text_line(&sample, &utc()).unwrap(),
            "2023/11/14 22:13:20.000 48.86 2.35"
        );
    }

    #[test]
    fn test_full_line_truncates_speed() {
        let sample = GpsSample {
            timestamp_ms: 1_700_000_000_250,
            latitude: -33.8688,
            longitude: 151.2093,
            altitude: Some(58.456),
            bearing: Some(181.5),
            speed: Some(27.99),
            acceleration: Some(Acceleration {
                x: 0.5,
                y: -1.0,
                z: 9.81,
            }),
        };
        assert_eq!(
            render_text_line(&sample, &utc()).unwrap(),
            "2023/11/14 22:13:20.250 -33.87 151.21 58.46 181.50 27 0.50 -1.00 9.81"
        );
    }

    #[test]
    fn test_full_precision_position() {
        let sample = GpsSample::new(1_700_000_000_000, 48.85661, 2.35222);
        let options = TextOptions {
            full_precision: true,
            ..utc()
        };
        assert_eq!(
            render_text_line(&sample, &options).unwrap(),
            "2023/11/14 22:13:20.000 48.85661 2.35222"
        );
    }

    #[test]
    fn test_render_text_keeps_order() {
        let samples = vec![
            GpsSample::new(2_000, 1.0, 1.0),
            GpsSample::new(1_000, 2.0, 2.0),
        ];
        let text = render_text(&samples, &utc()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("1970/01/01 00:00:02.000"));
        assert!(lines[1].starts_with("1970/01/01 00:00:01.000"));
    }

    #[test]
    fn test_out_of_range_timestamp_fails_whole_rendering() {
        let samples = vec![
            GpsSample::new(1_000, 1.0, 1.0),
            GpsSample::new(u64::MAX / 2, 2.0, 2.0),
        ];
        let err = render_text(&samples, &utc()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::GpsLogError::InvalidTimestamp(ts) if ts == u64::MAX / 2
        ));
    }
}
