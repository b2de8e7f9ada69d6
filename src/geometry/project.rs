//! Equirectangular projection onto a local tangent plane.

use geo::{coord, Coord, Point};

use crate::geometry::METERS_PER_DEGREE;

/// A tangent-plane frame anchored at a geographic reference point.
///
/// Error grows with latitude and with distance from the anchor, so a frame
/// should be anchored close to whatever it measures.
///
/// ```rust
/// use corridor::geometry::LocalFrame;
/// use geo::point;
///
/// let frame = LocalFrame::new(point! { x: 2.3522, y: 48.8566 });
/// let origin = frame.project(point! { x: 2.3522, y: 48.8566 });
/// assert_eq!((origin.x, origin.y), (0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    anchor: Point,
    cos_lat: f64,
}

impl LocalFrame {
    pub fn new(anchor: Point) -> Self {
        LocalFrame {
            anchor,
            cos_lat: anchor.y().to_radians().cos(),
        }
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Projects a geographic point into this frame, in meters.
    #[inline]
    pub fn project(&self, point: Point) -> Coord {
        coord! {
            x: (point.x() - self.anchor.x()) * METERS_PER_DEGREE * self.cos_lat,
            y: (point.y() - self.anchor.y()) * METERS_PER_DEGREE,
        }
    }
}

/// Projects `(lat, lon)` into the frame anchored at `(ref_lat, ref_lon)`.
///
/// Non-finite inputs are not trapped; they propagate into the output.
pub fn project(lat: f64, lon: f64, ref_lat: f64, ref_lon: f64) -> Coord {
    LocalFrame::new(Point::new(ref_lon, ref_lat)).project(Point::new(lon, lat))
}
