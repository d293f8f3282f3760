use std::f64;

use crate::point::Point;

/// Padding, in pixels, kept around the route when fitting the viewport.
pub const FIT_PADDING: (u32, u32) = (50, 50);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min: geo::Coord<f64>,
    max: geo::Coord<f64>,
}

impl Bounds {
    pub fn from_points<'a, I>(points: I) -> Option<Bounds>
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut bounds = Bounds::default();
        for point in points {
            bounds.extend(point);
        }

        if bounds.is_empty() { None } else { Some(bounds) }
    }

    pub fn extend<C>(&mut self, coord: C)
    where
        C: Into<geo::Coord<f64>>,
    {
        let coord = coord.into();
        self.min.x = self.min.x.min(coord.x);
        self.min.y = self.min.y.min(coord.y);
        self.max.x = self.max.x.max(coord.x);
        self.max.y = self.max.y.max(coord.y);
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn min(&self) -> geo::Coord<f64> {
        self.min
    }

    pub fn max(&self) -> geo::Coord<f64> {
        self.max
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds {
            min: geo::Coord {
                x: f64::MAX,
                y: f64::MAX,
            },
            max: geo::Coord {
                x: f64::MIN,
                y: f64::MIN,
            },
        }
    }
}
