use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named location of the active dataset. Names are unique within a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Point {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// The `[name, [lat, lng]]` shape the city service lists points in.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PointEntry(pub String, pub [f64; 2]);

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidPoint {
    #[error("Point name must not be empty")]
    EmptyName,

    #[error("Latitude {0} is outside of [-90, 90]")]
    Latitude(f64),

    #[error("Longitude {0} is outside of [-180, 180]")]
    Longitude(f64),
}

impl Point {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
        }
    }

    /// Shape check only: the service stays the authority on what a valid city is.
    pub fn validate(&self) -> Result<(), InvalidPoint> {
        if self.name.trim().is_empty() {
            return Err(InvalidPoint::EmptyName);
        }

        // NaN fails both range checks
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(InvalidPoint::Latitude(self.lat));
        }

        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(InvalidPoint::Longitude(self.lng));
        }

        Ok(())
    }

    pub fn coord(&self) -> geo::Coord<f64> {
        geo::Coord {
            x: self.lng,
            y: self.lat,
        }
    }

    pub fn display_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }
}

impl From<&Point> for geo::Coord<f64> {
    fn from(point: &Point) -> Self {
        point.coord()
    }
}

impl From<PointEntry> for Point {
    fn from(PointEntry(name, [lat, lng]): PointEntry) -> Self {
        Point { name, lat, lng }
    }
}

impl From<&Point> for PointEntry {
    fn from(point: &Point) -> Self {
        PointEntry(point.name.clone(), [point.lat, point.lng])
    }
}

pub fn find_point<'a>(points: &'a [Point], name: &str) -> Option<&'a Point> {
    points.iter().find(|point| point.name == name)
}

/// Schema of a point list file, `[[name, [lat, lng]], ...]`.
pub fn generate_points_json_schema() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&schemars::schema_for!(Vec<PointEntry>))
}
