//! GPS Log Export Library
//!
//! A Rust library for decoding the fixed-width binary GPS logs written by the
//! phone recorder and exporting them as text, an HTML map, KML, GPX or CSV.
//!
//! # Features
//!
//! - **`csv`** (default): Enable CSV export functionality
//! - **`cli`** (default): Build the command-line interface binary
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! Decode a log file and access the samples:
//! ```rust,no_run
//! use gps_log_export::{decode_file, DecodeOptions, RecordSchema};
//! use std::path::Path;
//!
//! let options = DecodeOptions::with_schema(RecordSchema::Recorder);
//! let log = decode_file(Path::new("20240501093000"), &options).unwrap();
//! println!("Decoded {} samples over {:.1} s", log.len(), log.duration_seconds());
//! ```
//!
//! Export to GPX and KML:
//! ```rust,no_run
//! use gps_log_export::{decode_file, export_log, DecodeOptions, ExportOptions};
//! use std::path::Path;
//!
//! let input = Path::new("20240501093000");
//! let log = decode_file(input, &DecodeOptions::default()).unwrap();
//! let export_options = ExportOptions {
//!     gpx: true,
//!     kml: true,
//!     ..ExportOptions::default()
//! };
//! let report = export_log(&log, input, &export_options).unwrap();
//! for path in report.written() {
//!     println!("Exported to: {}", path.display());
//! }
//! ```
//!
//! # Public API
//!
//! ## Decoding Functions
//! - [`decode_file`] - Read and decode a log file
//! - [`decode_bytes`] - Decode a log held in memory
//! - [`decode_records`] - Low-level record decoding without policies
//! - [`encode_records`] - Write samples back in a record layout
//!
//! ## Data Types
//! - [`GpsLog`] - Decoded samples plus decode statistics
//! - [`GpsSample`] - One decoded record
//! - [`RecordSchema`] - The fixed record layouts (`minimal`, `speed`, `full`, `recorder`)
//! - [`ExportOptions`] - Configuration for export operations
//! - [`ExportReport`] - Paths written by an export run
//!
//! ## Export Functions
//! - [`export_log`] - Run every enabled export
//! - [`export_to_text`], [`export_to_map`], [`export_to_kml`], [`export_to_gpx`] - Single formats
//! - [`compute_export_paths`] - Helper for consistent path computation
//!
//! ## Filtering Functions
//! - [`apply_ordering`] - Preserve, sort or validate sample order
//! - [`subsample`] - Keep every Nth sample for the map

// Module declarations
pub mod conversion;
pub mod error;
pub mod export;
pub mod filters;
pub mod parser;
pub mod types;

// Re-export everything from modules for convenience
#[allow(ambiguous_glob_reexports)]
pub use conversion::*;
#[allow(ambiguous_glob_reexports)]
pub use error::*;
#[allow(ambiguous_glob_reexports)]
pub use export::*;
#[allow(ambiguous_glob_reexports)]
pub use filters::*;
#[allow(ambiguous_glob_reexports)]
pub use parser::*;
#[allow(ambiguous_glob_reexports)]
pub use types::*;
