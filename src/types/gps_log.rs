use crate::types::{GpsSample, RecordSchema};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Counters collected while decoding one input buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecodeStats {
    pub input_bytes: usize,
    pub record_count: usize,
    /// Bytes after the last complete record that were dropped
    pub trailing_bytes: usize,
}

/// Complete decoded GPS log
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GpsLog {
    pub schema: RecordSchema,
    pub stats: DecodeStats,
    pub samples: Vec<GpsSample>,
}

impl GpsLog {
    pub fn new(schema: RecordSchema) -> Self {
        Self {
            schema,
            stats: DecodeStats::default(),
            samples: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn first_timestamp_ms(&self) -> Option<u64> {
        self.samples.first().map(|s| s.timestamp_ms)
    }

    pub fn last_timestamp_ms(&self) -> Option<u64> {
        self.samples.last().map(|s| s.timestamp_ms)
    }

    /// Get the time span between the first and last sample in seconds
    pub fn duration_seconds(&self) -> f64 {
        match (self.first_timestamp_ms(), self.last_timestamp_ms()) {
            (Some(first), Some(last)) => last.saturating_sub(first) as f64 / 1000.0,
            _ => 0.0,
        }
    }

    /// Check if this log carries speed values
    pub fn has_speed(&self) -> bool {
        self.schema.has_speed()
    }
}
