//! Export functionality for decoded GPS logs
//!
//! Every renderer has a pure `render_*` function that builds the complete
//! document in memory and an `export_to_*` function that writes it once to
//! the path computed by [`compute_export_paths`].

#[cfg(feature = "csv")]
pub mod csv;
pub mod gpx;
pub mod kml;
pub mod map;
pub mod text;
mod xml;

#[cfg(feature = "csv")]
pub use self::csv::*;
pub use gpx::*;
pub use kml::*;
pub use map::*;
pub use text::*;

use crate::error::Result;
use crate::types::GpsLog;
use std::path::{Path, PathBuf};

/// Fixed file names used by the older export scripts
pub const LEGACY_KML_NAME: &str = "exported_data.kml";
pub const LEGACY_GPX_NAME: &str = "exported_data.gpx";

/// Export options for controlling output formats
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub text: bool,
    pub map: bool,
    pub kml: bool,
    pub gpx: bool,
    pub csv: bool,
    /// Defaults to the input file's directory
    pub output_dir: Option<String>,
    /// Write `exported_data.kml` / `exported_data.gpx` instead of `<stem>.kml` / `<stem>.gpx`,
    /// into the working directory when `output_dir` is unset
    pub legacy_names: bool,
    pub text_options: TextOptions,
    pub map_options: MapOptions,
}

/// Output paths for every format, whether or not it is enabled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub text: PathBuf,
    pub map: PathBuf,
    pub kml: PathBuf,
    pub gpx: PathBuf,
    pub csv: PathBuf,
}

/// Files written by [`export_log`]
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub text_path: Option<PathBuf>,
    pub map_path: Option<PathBuf>,
    pub kml_path: Option<PathBuf>,
    pub gpx_path: Option<PathBuf>,
    pub csv_path: Option<PathBuf>,
}

impl ExportReport {
    pub fn written(&self) -> impl Iterator<Item = &PathBuf> {
        [
            &self.text_path,
            &self.map_path,
            &self.kml_path,
            &self.gpx_path,
            &self.csv_path,
        ]
        .into_iter()
        .flatten()
    }
}

/// Base name used for output files and document titles
pub fn export_base_name(input_path: &Path) -> &str {
    input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("gps_log")
}

/// Compute output paths consistently for all formats
pub fn compute_export_paths(input_path: &Path, export_options: &ExportOptions) -> ExportPaths {
    let base_name = export_base_name(input_path);

    let output_dir = match export_options.output_dir {
        Some(ref dir) => PathBuf::from(dir),
        None => match input_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        },
    };

    // Legacy names land in the working directory unless a directory was given
    let (kml, gpx) = if export_options.legacy_names {
        let legacy_dir = match export_options.output_dir {
            Some(ref dir) => PathBuf::from(dir),
            None => PathBuf::from("."),
        };
        (
            legacy_dir.join(LEGACY_KML_NAME),
            legacy_dir.join(LEGACY_GPX_NAME),
        )
    } else {
        (
            output_dir.join(format!("{base_name}.kml")),
            output_dir.join(format!("{base_name}.gpx")),
        )
    };

    ExportPaths {
        text: output_dir.join(format!("{base_name}.txt")),
        map: output_dir.join(format!("{base_name}.map.html")),
        kml,
        gpx,
        csv: output_dir.join(format!("{base_name}.csv")),
    }
}

/// Write a finished document, creating the output directory if needed
pub(crate) fn write_document(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir)?;
            log::debug!("Created output directory: {}", dir.display());
        }
    }
    std::fs::write(path, contents)?;
    Ok(())
}

/// Run every export enabled in `export_options`, in a fixed order
///
/// The first failing export aborts the remaining ones.
pub fn export_log(
    log: &GpsLog,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<ExportReport> {
    let mut report = ExportReport::default();

    if export_options.text {
        report.text_path = export_to_text(log, input_path, export_options)?;
    }
    if export_options.map {
        report.map_path = Some(export_to_map(log, input_path, export_options)?);
    }
    if export_options.kml {
        report.kml_path = export_to_kml(log, input_path, export_options)?;
    }
    if export_options.gpx {
        report.gpx_path = export_to_gpx(log, input_path, export_options)?;
    }
    #[cfg(feature = "csv")]
    if export_options.csv {
        report.csv_path = export_to_csv(log, input_path, export_options)?;
    }
    #[cfg(not(feature = "csv"))]
    if export_options.csv {
        log::warn!("CSV export requested but the crate was built without the `csv` feature");
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_export_paths_defaults_to_input_dir() {
        let paths = compute_export_paths(
            Path::new("/data/logs/20240501093000"),
            &ExportOptions::default(),
        );
        assert_eq!(paths.kml, PathBuf::from("/data/logs/20240501093000.kml"));
        assert_eq!(paths.gpx, PathBuf::from("/data/logs/20240501093000.gpx"));
        assert_eq!(
            paths.map,
            PathBuf::from("/data/logs/20240501093000.map.html")
        );
    }

    #[test]
    fn test_compute_export_paths_bare_file_name() {
        let paths = compute_export_paths(Path::new("track.bin"), &ExportOptions::default());
        assert_eq!(paths.csv, PathBuf::from("./track.csv"));
        assert_eq!(paths.text, PathBuf::from("./track.txt"));
    }

    #[test]
    fn test_compute_export_paths_legacy_names() {
        let options = ExportOptions {
            output_dir: Some("out".to_string()),
            legacy_names: true,
            ..ExportOptions::default()
        };
        let paths = compute_export_paths(Path::new("/tmp/track.bin"), &options);
        assert_eq!(paths.kml, PathBuf::from("out/exported_data.kml"));
        assert_eq!(paths.gpx, PathBuf::from("out/exported_data.gpx"));
        assert_eq!(paths.csv, PathBuf::from("out/track.csv"));
    }

    #[test]
    fn test_compute_export_paths_legacy_names_use_working_dir() {
        let options = ExportOptions {
            legacy_names: true,
            ..ExportOptions::default()
        };
        let paths = compute_export_paths(Path::new("/data/logs/trip"), &options);
        assert_eq!(paths.kml, PathBuf::from("./exported_data.kml"));
        assert_eq!(paths.gpx, PathBuf::from("./exported_data.gpx"));
        assert_eq!(paths.map, PathBuf::from("/data/logs/trip.map.html"));
    }
}
