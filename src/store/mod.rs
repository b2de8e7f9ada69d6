//! The append-only store of sensor samples.
//!
//! Samples live in fixed-capacity chunks behind [`Arc`]. Taking a
//! [`Snapshot`] clones only the chunk handles, so readers hold the lock for
//! O(chunks) and scan without it. An append which finds its open chunk still
//! shared with a snapshot copies that one chunk before writing.

#[doc(hidden)]
pub mod point;
#[doc(hidden)]
pub mod snapshot;

#[doc(inline)]
pub use point::SensorPoint;
#[doc(inline)]
pub use snapshot::Snapshot;

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Number of samples held by a single chunk.
pub const CHUNK_CAPACITY: usize = 4096;

pub(crate) type Chunk = Arc<Vec<SensorPoint>>;

#[derive(Debug, Default)]
struct Chunks {
    chunks: Vec<Chunk>,
    len: usize,
}

impl Chunks {
    fn push(&mut self, point: SensorPoint) {
        match self.chunks.last_mut() {
            Some(open) if open.len() < CHUNK_CAPACITY => Arc::make_mut(open).push(point),
            _ => {
                let mut chunk = Vec::with_capacity(CHUNK_CAPACITY);
                chunk.push(point);
                self.chunks.push(Arc::new(chunk));
            }
        }

        self.len += 1;
    }
}

/// Concurrent, append-only collection of [`SensorPoint`]s.
///
/// ```rust
/// use corridor::store::{PointStore, SensorPoint};
///
/// let store = PointStore::new();
/// assert_eq!(store.append(SensorPoint::new(48.8566, 2.3522, 12.5)), 1);
/// assert_eq!(store.all().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct PointStore {
    inner: RwLock<Chunks>,
}

impl PointStore {
    pub fn new() -> Self {
        PointStore::default()
    }

    // A panicking writer can only fail inside `Vec::push`, which never
    // leaves a partially written element behind.
    fn read(&self) -> RwLockReadGuard<'_, Chunks> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Chunks> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends a single sample, returning the store size after the append.
    pub fn append(&self, point: SensorPoint) -> usize {
        let mut inner = self.write();
        inner.push(point);
        inner.len
    }

    /// Appends every sample under a single lock acquisition,
    /// returning the store size after the last append.
    pub fn extend<I>(&self, points: I) -> usize
    where
        I: IntoIterator<Item = SensorPoint>,
    {
        let mut inner = self.write();
        points.into_iter().for_each(|point| inner.push(point));
        inner.len
    }

    /// Takes a read-only view of every sample currently stored.
    /// Later appends are not visible through it.
    pub fn all(&self) -> Snapshot {
        let inner = self.read();
        Snapshot::new(inner.chunks.clone(), inner.len)
    }

    pub fn count(&self) -> usize {
        self.read().len
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}
