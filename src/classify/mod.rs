//! Classification of stored samples against corridors.

mod definition;
mod implementation;
#[doc(hidden)]
pub mod report;

#[doc(inline)]
pub use definition::Classify;
#[doc(inline)]
pub use report::{ChainEntry, CorridorReport, SegmentCount, SegmentLabel};

/// Corridor half-width, in meters, used when a query does not supply one.
pub const DEFAULT_CORRIDOR_WIDTH: f64 = 30.0;
