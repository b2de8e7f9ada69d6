//! Planar geometry over short geographic distances.
//!
//! Geographic positions are carried as [`geo::Point`] (`x` = longitude,
//! `y` = latitude, in decimal degrees). Planar positions are [`geo::Coord`]
//! values in meters, relative to a [`LocalFrame`] anchor.

/// Approximate meters per degree of latitude (WGS84, near the equator).
pub const METERS_PER_DEGREE: f64 = 111_320.0;

pub mod corridor;
pub mod distance;
pub mod project;


#[doc(inline)]
pub use corridor::{is_within_corridor, Corridor, Segment};
#[doc(inline)]
pub use distance::point_to_segment_distance;
#[doc(inline)]
pub use project::{project, LocalFrame};
