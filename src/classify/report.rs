use std::fmt::{Display, Formatter};
use std::ops::Add;

use geo::Point;

use crate::geometry::Segment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentCount {
    pub on: usize,
    pub off: usize,
}

impl SegmentCount {
    pub fn new(on: usize, off: usize) -> Self {
        SegmentCount { on, off }
    }

    pub fn total(&self) -> usize {
        self.on + self.off
    }
}

impl Add for SegmentCount {
    type Output = SegmentCount;

    fn add(self, rhs: Self) -> Self::Output {
        SegmentCount::new(self.on + rhs.on, self.off + rhs.off)
    }
}

/// Detailed classification of a single corridor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CorridorReport {
    pub on_points: Vec<Point>,
    pub off_points: Vec<Point>,
    /// Mean speed of `on_points`, `0.0` when there are none.
    pub average_speed: f64,
}

/// Identifies an entry of a chain result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentLabel {
    /// Position of the segment in the submitted chain.
    Index(usize),
    /// The synthetic first-start to last-end segment.
    Summary,
}

impl Display for SegmentLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SegmentLabel::Index(index) => write!(f, "{index}"),
            SegmentLabel::Summary => write!(f, "A->Z"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainEntry {
    pub label: SegmentLabel,
    pub segment: Segment,
    pub count: SegmentCount,
}
