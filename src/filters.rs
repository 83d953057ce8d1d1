//! Sequence filters applied between decoding and export
//!
//! The recorder appends records as fixes arrive, so file order is normally
//! chronological, but nothing in the format guarantees it. The ordering
//! policy makes that assumption explicit. Subsampling bounds the number of
//! markers placed on the HTML map.

use crate::error::{GpsLogError, Result};
use crate::types::GpsSample;
use std::fmt;
use std::str::FromStr;

/// What to do about sample order after decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingPolicy {
    /// Keep file order as-is
    #[default]
    Preserve,
    /// Stable sort by timestamp
    Sort,
    /// Reject the log if a timestamp goes backwards
    Validate,
}

impl OrderingPolicy {
    pub fn name(self) -> &'static str {
        match self {
            OrderingPolicy::Preserve => "preserve",
            OrderingPolicy::Sort => "sort",
            OrderingPolicy::Validate => "validate",
        }
    }
}

impl fmt::Display for OrderingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OrderingPolicy {
    type Err = GpsLogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preserve" => Ok(OrderingPolicy::Preserve),
            "sort" => Ok(OrderingPolicy::Sort),
            "validate" => Ok(OrderingPolicy::Validate),
            _ => Err(GpsLogError::UnknownOrdering(s.to_string())),
        }
    }
}

/// Apply `policy` to a decoded sequence in place
pub fn apply_ordering(samples: &mut [GpsSample], policy: OrderingPolicy) -> Result<()> {
    match policy {
        OrderingPolicy::Preserve => Ok(()),
        OrderingPolicy::Sort => {
            samples.sort_by_key(|s| s.timestamp_ms);
            Ok(())
        }
        OrderingPolicy::Validate => validate_order(samples),
    }
}

/// Check that timestamps never decrease; equal timestamps are accepted
pub fn validate_order(samples: &[GpsSample]) -> Result<()> {
    for (index, pair) in samples.windows(2).enumerate() {
        if pair[1].timestamp_ms < pair[0].timestamp_ms {
            return Err(GpsLogError::OutOfOrder {
                index: index + 1,
                previous_ms: pair[0].timestamp_ms,
                timestamp_ms: pair[1].timestamp_ms,
            });
        }
    }
    Ok(())
}

/// Keep samples at indices `0, stride, 2 * stride, ...`
///
/// A stride of 1 keeps every sample; 0 is rejected.
pub fn subsample(samples: &[GpsSample], stride: usize) -> Result<Vec<&GpsSample>> {
    if stride == 0 {
        return Err(GpsLogError::InvalidStride);
    }
    Ok(samples.iter().step_by(stride).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples_at(timestamps: &[u64]) -> Vec<GpsSample> {
        timestamps
            .iter()
            .enumerate()
            .map(|(i, &ts)| GpsSample::new(ts, i as f64, 0.0))
            .collect()
    }

    #[test]
    fn test_preserve_keeps_file_order() {
        let mut samples = samples_at(&[3, 1, 2]);
        apply_ordering(&mut samples, OrderingPolicy::Preserve).unwrap();
        let order: Vec<u64> = samples.iter().map(|s| s.timestamp_ms).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut samples = samples_at(&[20, 10, 20, 5]);
        apply_ordering(&mut samples, OrderingPolicy::Sort).unwrap();
        let order: Vec<(u64, f64)> = samples
            .iter()
            .map(|s| (s.timestamp_ms, s.latitude))
            .collect();
        assert_eq!(order, vec![(5, 3.0), (10, 1.0), (20, 0.0), (20, 2.0)]);
    }

    #[test]
    fn test_validate_rejects_backwards_timestamp() {
        let mut samples = samples_at(&[1, 2, 2, 1]);
        let err = apply_ordering(&mut samples, OrderingPolicy::Validate).unwrap_err();
        assert!(matches!(
            err,
            GpsLogError::OutOfOrder {
                index: 3,
                previous_ms: 2,
                timestamp_ms: 1
            }
        ));
    }

    #[test]
    fn test_validate_accepts_empty_and_single() {
        assert!(validate_order(&[]).is_ok());
        assert!(validate_order(&samples_at(&[9])).is_ok());
    }

    #[test]
    fn test_subsample_stride() {
        let samples = samples_at(&[0, 1, 2, 3, 4, 5, 6]);
        let kept: Vec<u64> = subsample(&samples, 3)
            .unwrap()
            .iter()
            .map(|s| s.timestamp_ms)
            .collect();
        assert_eq!(kept, vec![0, 3, 6]);

        assert_eq!(subsample(&samples, 1).unwrap().len(), samples.len());
        assert!(matches!(
            subsample(&samples, 0),
            Err(GpsLogError::InvalidStride)
        ));
    }

    #[test]
    fn test_parse_ordering_policy() {
        assert_eq!("Sort".parse::<OrderingPolicy>().unwrap(), OrderingPolicy::Sort);
        assert!("random".parse::<OrderingPolicy>().is_err());
    }
}
