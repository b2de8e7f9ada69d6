//! The entry point used by transports: owns the [`PointStore`] and answers
//! ingestion and corridor queries against it.


use log::{debug, info};
use measure_time::debug_time;
#[cfg(feature = "tracing")]
use tracing::Level;

use crate::classify::{ChainEntry, Classify, CorridorReport, DEFAULT_CORRIDOR_WIDTH};
use crate::geometry::{Corridor, Segment};
use crate::store::{PointStore, SensorPoint};

/// An ordered chain of segments sharing one corridor width.
#[derive(Debug, Clone, PartialEq)]
pub struct CorridorQuery {
    pub segments: Vec<Segment>,
    pub width: f64,
}

impl CorridorQuery {
    pub fn new(segments: Vec<Segment>) -> Self {
        CorridorQuery {
            segments,
            width: DEFAULT_CORRIDOR_WIDTH,
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }
}

/// Ingests samples and classifies them against corridors.
///
/// All operations take `&self`; share the engine behind an `Arc` to serve
/// concurrent ingestion and queries.
#[derive(Debug, Default)]
pub struct CorridorEngine {
    store: PointStore,
}

impl CorridorEngine {
    pub fn new() -> Self {
        CorridorEngine::default()
    }

    pub fn store(&self) -> &PointStore {
        &self.store
    }

    /// Records one sample, returning the number of samples now held.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip(self)))]
    pub fn ingest(&self, latitude: f64, longitude: f64, speed: f64) -> usize {
        let point = SensorPoint::new(latitude, longitude, speed);
        let count = self.store.append(point);

        debug!("Ingested {:?}, store now holds {} points", point, count);
        count
    }

    /// Seeds the store with already-parsed samples.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::INFO, skip_all))]
    pub fn bulk_load<I>(&self, points: I) -> usize
    where
        I: IntoIterator<Item = SensorPoint>,
    {
        let before = self.store.count();
        let count = self.store.extend(points);

        info!("Bulk loaded {} points, store now holds {}", count - before, count);
        count
    }

    /// Classifies every stored sample against a single segment.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::INFO, skip(self)))]
    pub fn query_corridor(&self, segment: Segment, width: f64) -> CorridorReport {
        let snapshot = self.store.all();
        debug_time!("corridor query over {} points", snapshot.len());

        snapshot.report(&Corridor::new(segment, width))
    }

    /// Counts every stored sample against each segment of the chain,
    /// followed by the chain summary when there are two or more segments.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::INFO, skip(self)))]
    pub fn query_chain(&self, query: &CorridorQuery) -> Vec<ChainEntry> {
        let snapshot = self.store.all();
        debug_time!(
            "chain query of {} segments over {} points",
            query.segments.len(),
            snapshot.len()
        );

        snapshot.chain(&query.segments, query.width)
    }

    pub fn list_all_points(&self) -> Vec<SensorPoint> {
        self.store.all().to_vec()
    }

    pub fn count(&self) -> usize {
        self.store.count()
    }
}
