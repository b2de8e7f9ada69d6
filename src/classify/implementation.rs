use geo::Point;
use rayon::prelude::*;

use crate::classify::definition::Classify;
use crate::classify::report::{CorridorReport, SegmentCount};
use crate::geometry::Corridor;
use crate::store::{SensorPoint, Snapshot};
#[cfg(feature = "tracing")]
use tracing::Level;

/// Partial report over a single chunk of the snapshot.
/// On-corridor samples keep their speed so the merge can sum in insertion order.
#[derive(Default)]
struct Tally {
    on: Vec<(Point, f64)>,
    off: Vec<Point>,
}

impl Tally {
    fn of(chunk: &[SensorPoint], corridor: &Corridor) -> Self {
        chunk.iter().fold(Tally::default(), |mut tally, sample| {
            let position = sample.position();
            if corridor.contains(position) {
                tally.on.push((position, sample.speed));
            } else {
                tally.off.push(position);
            }
            tally
        })
    }
}

impl Classify for Snapshot {
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip(self)))]
    fn count(&self, corridor: &Corridor) -> SegmentCount {
        self.par_chunks()
            .map(|chunk| {
                let on = chunk
                    .iter()
                    .filter(|sample| corridor.contains(sample.position()))
                    .count();

                SegmentCount::new(on, chunk.len() - on)
            })
            .reduce(SegmentCount::default, |a, b| a + b)
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip(self)))]
    fn report(&self, corridor: &Corridor) -> CorridorReport {
        // Collecting an indexed iterator keeps chunk order,
        // so the merged lists stay in insertion order.
        let tallies = self
            .par_chunks()
            .map(|chunk| Tally::of(chunk, corridor))
            .collect::<Vec<_>>();

        let mut speed = 0.0;
        let mut report = CorridorReport::default();
        for tally in tallies {
            for (position, sample_speed) in tally.on {
                report.on_points.push(position);
                speed += sample_speed;
            }
            report.off_points.extend(tally.off);
        }

        if !report.on_points.is_empty() {
            report.average_speed = speed / report.on_points.len() as f64;
        }

        report
    }
}
