use crate::classify::report::{ChainEntry, CorridorReport, SegmentCount, SegmentLabel};
use crate::geometry::{Corridor, Segment};
#[cfg(feature = "tracing")]
use tracing::Level;

/// Trait which splits a collection of samples into those inside and
/// those outside a [`Corridor`].
///
/// Every decision is a pure function of the sample, the corridor's segment and
/// its width, so implementors are free to prune candidates (for example with a
/// spatial index) as long as the totals still cover every sample.
pub trait Classify {
    /// Counts the samples inside and outside the corridor.
    fn count(&self, corridor: &Corridor) -> SegmentCount;

    /// Lists the samples inside and outside the corridor, in insertion order,
    /// along with the mean speed of the inside samples.
    ///
    /// The mean is `0.0` when nothing lies inside.
    fn report(&self, corridor: &Corridor) -> CorridorReport;

    /// Counts every segment of a chain, tagged with its position.
    ///
    /// For chains of two or more segments a [`SegmentLabel::Summary`] entry,
    /// spanning the first segment's start to the last segment's end, is
    /// appended after the positional entries.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip(self)))]
    fn chain(&self, segments: &[Segment], width: f64) -> Vec<ChainEntry> {
        segments
            .iter()
            .copied()
            .enumerate()
            .map(|(index, segment)| (SegmentLabel::Index(index), segment))
            .chain(Segment::summary(segments).map(|segment| (SegmentLabel::Summary, segment)))
            .map(|(label, segment)| ChainEntry {
                label,
                segment,
                count: self.count(&Corridor::new(segment, width)),
            })
            .collect()
    }
}
