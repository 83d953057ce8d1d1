use crate::error::GpsLogError;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single field inside a fixed-size record, in on-disk order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RecordField {
    /// u64 milliseconds since the Unix epoch
    Timestamp,
    /// f64 decimal degrees
    Latitude,
    /// f64 decimal degrees
    Longitude,
    /// f32 meters
    Altitude32,
    /// f64 meters
    Altitude64,
    /// f32 degrees from north
    Bearing,
    /// f32 meters per second
    Speed,
    AccelX,
    AccelY,
    AccelZ,
}

impl RecordField {
    /// Encoded width in bytes
    pub fn size(self) -> usize {
        match self {
            RecordField::Timestamp
            | RecordField::Latitude
            | RecordField::Longitude
            | RecordField::Altitude64 => 8,
            RecordField::Altitude32
            | RecordField::Bearing
            | RecordField::Speed
            | RecordField::AccelX
            | RecordField::AccelY
            | RecordField::AccelZ => 4,
        }
    }
}

const MINIMAL_FIELDS: &[RecordField] = &[
    RecordField::Timestamp,
    RecordField::Latitude,
    RecordField::Longitude,
];

const SPEED_FIELDS: &[RecordField] = &[
    RecordField::Timestamp,
    RecordField::Latitude,
    RecordField::Longitude,
    RecordField::Speed,
];

const FULL_FIELDS: &[RecordField] = &[
    RecordField::Timestamp,
    RecordField::Latitude,
    RecordField::Longitude,
    RecordField::Altitude32,
    RecordField::Bearing,
    RecordField::Speed,
    RecordField::AccelX,
    RecordField::AccelY,
    RecordField::AccelZ,
];

// Layout written by the phone recorder service: altitude is a double there.
const RECORDER_FIELDS: &[RecordField] = &[
    RecordField::Timestamp,
    RecordField::Latitude,
    RecordField::Longitude,
    RecordField::Altitude64,
    RecordField::Bearing,
    RecordField::Speed,
    RecordField::AccelX,
    RecordField::AccelY,
    RecordField::AccelZ,
];

/// Fixed record layout used for a whole decoding session
///
/// Every schema is a flat little-endian struct without padding, header or
/// version marker, so the schema cannot be detected from the data and must
/// be chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RecordSchema {
    /// timestamp, latitude, longitude (24 bytes)
    Minimal,
    /// minimal + speed (28 bytes)
    Speed,
    /// minimal + f32 altitude, bearing, speed, acceleration (44 bytes)
    Full,
    /// minimal + f64 altitude, bearing, speed, acceleration (52 bytes)
    #[default]
    Recorder,
}

impl RecordSchema {
    pub const ALL: [RecordSchema; 4] = [
        RecordSchema::Minimal,
        RecordSchema::Speed,
        RecordSchema::Full,
        RecordSchema::Recorder,
    ];

    /// Fields in on-disk order
    pub fn fields(self) -> &'static [RecordField] {
        match self {
            RecordSchema::Minimal => MINIMAL_FIELDS,
            RecordSchema::Speed => SPEED_FIELDS,
            RecordSchema::Full => FULL_FIELDS,
            RecordSchema::Recorder => RECORDER_FIELDS,
        }
    }

    /// Size of one record in bytes, derived from the field layout
    pub fn record_size(self) -> usize {
        self.fields().iter().map(|f| f.size()).sum()
    }

    pub fn name(self) -> &'static str {
        match self {
            RecordSchema::Minimal => "minimal",
            RecordSchema::Speed => "speed",
            RecordSchema::Full => "full",
            RecordSchema::Recorder => "recorder",
        }
    }

    pub fn has_altitude(self) -> bool {
        self.fields()
            .iter()
            .any(|f| matches!(f, RecordField::Altitude32 | RecordField::Altitude64))
    }

    pub fn has_bearing(self) -> bool {
        self.fields().contains(&RecordField::Bearing)
    }

    pub fn has_speed(self) -> bool {
        self.fields().contains(&RecordField::Speed)
    }

    pub fn has_acceleration(self) -> bool {
        self.fields().contains(&RecordField::AccelX)
    }
}

impl fmt::Display for RecordSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecordSchema {
    type Err = GpsLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        RecordSchema::ALL
            .into_iter()
            .find(|schema| schema.name() == lower)
            .ok_or_else(|| GpsLogError::UnknownSchema(s.to_string()))
    }
}
