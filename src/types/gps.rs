use chrono::{DateTime, Local, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Linear acceleration in m/s² as reported by the phone sensor
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Acceleration {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// One decoded GPS record
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GpsSample {
    pub timestamp_ms: u64,
    pub latitude: f64,
    pub longitude: f64,
    /// Meters, widened to f64 regardless of the on-disk width
    pub altitude: Option<f64>,
    /// Degrees from north
    pub bearing: Option<f32>,
    /// Meters per second
    pub speed: Option<f32>,
    pub acceleration: Option<Acceleration>,
}

impl GpsSample {
    /// Sample carrying only the fields of the minimal schema
    pub fn new(timestamp_ms: u64, latitude: f64, longitude: f64) -> Self {
        Self {
            timestamp_ms,
            latitude,
            longitude,
            altitude: None,
            bearing: None,
            speed: None,
            acceleration: None,
        }
    }

    /// Timestamp as a UTC calendar time, `None` if out of chrono's range
    pub fn datetime_utc(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.timestamp_ms)
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    /// Timestamp in the local time zone of the machine running the export
    pub fn datetime_local(&self) -> Option<DateTime<Local>> {
        self.datetime_utc().map(|dt| dt.with_timezone(&Local))
    }

    /// Speed in km/h, if the schema carries speed
    pub fn speed_kmh(&self) -> Option<f32> {
        self.speed.map(crate::conversion::convert_speed_to_kmh)
    }
}
