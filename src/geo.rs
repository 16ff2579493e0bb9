use crate::error::{MindstampsError, MsResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A point on the globe in decimal degrees.
///
/// Construction goes through [`Coordinate::new`], so a `Coordinate` is always finite
/// with `lat` in `[-90, 90]` and `lng` in `[-180, 180]`. The scoring math relies on this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = MindstampsError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.lat, raw.lng)
    }
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> MsResult<Self> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(MindstampsError::Validation(format!(
                "Coordinate ({}, {}) is not finite",
                lat, lng
            )));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(MindstampsError::Validation(format!(
                "Latitude {} is outside [-90, 90]",
                lat
            )));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(MindstampsError::Validation(format!(
                "Longitude {} is outside [-180, 180]",
                lng
            )));
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4},{:.4}", self.lat, self.lng)
    }
}

/// Parses `"lat,lng"`, the form the CLI takes guesses in.
impl FromStr for Coordinate {
    type Err = MindstampsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| MindstampsError::Validation(format!("Expected 'lat,lng', got '{}'", s)))?;

        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| MindstampsError::Validation(format!("Invalid number '{}'", part)))
        };

        Coordinate::new(parse(lat)?, parse(lng)?)
    }
}

/// Where a memory happened: a point plus the human-readable place name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(flatten)]
    pub point: Coordinate,
    #[serde(default)]
    pub name: String,
}

impl Location {
    pub fn new(lat: f64, lng: f64, name: impl Into<String>) -> MsResult<Self> {
        Ok(Self {
            point: Coordinate::new(lat, lng)?,
            name: name.into(),
        })
    }
}
