use std::fmt::{Debug, Formatter};

use geo::Point;

/// A single geolocated sensor sample.
///
/// Coordinates are decimal degrees, speed is in whatever unit the producer
/// reports. Neither is validated here.
#[derive(Clone, Copy, PartialEq)]
pub struct SensorPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
}

impl SensorPoint {
    pub fn new(latitude: f64, longitude: f64, speed: f64) -> Self {
        SensorPoint {
            latitude,
            longitude,
            speed,
        }
    }

    /// The sample's position as a georust point (`x` = longitude).
    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite() && self.speed.is_finite()
    }
}

impl From<(f64, f64, f64)> for SensorPoint {
    /// Format is: (Lat, Lng, Speed)
    fn from((latitude, longitude, speed): (f64, f64, f64)) -> Self {
        SensorPoint::new(latitude, longitude, speed)
    }
}

impl Debug for SensorPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "POINT({} {}) @ {}",
            self.longitude, self.latitude, self.speed
        )
    }
}
