use std::path::PathBuf;

/// Custom error types for GPS log decoding and export
#[derive(Debug, thiserror::Error)]
pub enum GpsLogError {
    /// Input file does not exist
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Buffer length is not a multiple of the record size (strict mode only)
    #[error("Truncated record: {trailing} trailing bytes do not fill a {record_size}-byte record")]
    TruncatedRecord { trailing: usize, record_size: usize },
    /// Renderer needs at least one sample
    #[error("No samples to render")]
    EmptySequence,
    /// Timestamp went backwards while validating order
    #[error("Sample {index} is out of order: {timestamp_ms} ms follows {previous_ms} ms")]
    OutOfOrder {
        index: usize,
        previous_ms: u64,
        timestamp_ms: u64,
    },
    /// Schema name not recognised
    #[error("Unknown record schema '{0}' (expected minimal, speed, full or recorder)")]
    UnknownSchema(String),
    /// Ordering policy name not recognised
    #[error("Unknown ordering policy '{0}' (expected preserve, sort or validate)")]
    UnknownOrdering(String),
    /// Subsampling stride must be at least 1
    #[error("Subsampling stride must be at least 1")]
    InvalidStride,
    /// Timestamp outside the range chrono can represent
    #[error("Timestamp {0} ms cannot be represented as a calendar date")]
    InvalidTimestamp(u64),
    /// XML writer errors
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Map template errors
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// CSV writer errors
    #[cfg(feature = "csv")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, GpsLogError>;
