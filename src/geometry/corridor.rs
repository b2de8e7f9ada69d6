//! Corridors: fixed half-width buffers around a geographic segment.

use std::fmt::{Debug, Formatter};

use geo::{Coord, Line, Point};
use wkt::ToWkt;

use crate::geometry::distance::point_to_segment_distance;
use crate::geometry::project::LocalFrame;

/// A pair of geographic endpoints, `start` to `end`.
#[derive(Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Segment { start, end }
    }

    /// Format is: (Lat, Lng) for each endpoint.
    pub fn from_degrees((lat_a, lon_a): (f64, f64), (lat_b, lon_b): (f64, f64)) -> Self {
        Segment::new(Point::new(lon_a, lat_a), Point::new(lon_b, lat_b))
    }

    /// The segment spanning the first start to the last end of a chain.
    /// Only defined for chains of two or more segments.
    pub fn summary(chain: &[Segment]) -> Option<Segment> {
        match chain {
            [first, .., last] => Some(Segment::new(first.start, last.end)),
            _ => None,
        }
    }

    pub fn reversed(&self) -> Self {
        Segment::new(self.end, self.start)
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

impl Debug for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Line::new(self.start, self.end).wkt_string())
    }
}

/// A segment together with its corridor half-width, in meters.
///
/// The local frame is anchored at the segment's own start so that
/// projection error stays local to the query.
#[derive(Debug, Clone, Copy)]
pub struct Corridor {
    width: f64,
    frame: LocalFrame,
    a: Coord,
    b: Coord,
}

impl Corridor {
    pub fn new(segment: Segment, width: f64) -> Self {
        let frame = LocalFrame::new(segment.start);

        Corridor {
            width,
            frame,
            a: frame.project(segment.start),
            b: frame.project(segment.end),
        }
    }

    /// Distance in meters from `point` to the segment, measured in the
    /// segment's local frame.
    #[inline]
    pub fn distance(&self, point: Point) -> f64 {
        point_to_segment_distance(self.frame.project(point), self.a, self.b)
    }

    /// Whether `point` lies inside the corridor, boundary inclusive.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        self.distance(point) <= self.width
    }
}

/// Whether `point` lies within `width` meters of the segment `a` to `b`.
pub fn is_within_corridor(point: Point, a: Point, b: Point, width: f64) -> bool {
    Corridor::new(Segment::new(a, b), width).contains(point)
}
