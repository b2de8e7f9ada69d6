use rayon::prelude::*;

use crate::store::{Chunk, SensorPoint};

/// An immutable view of the store at the instant it was taken.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    chunks: Vec<Chunk>,
    len: usize,
}

impl Snapshot {
    pub(crate) fn new(chunks: Vec<Chunk>, len: usize) -> Self {
        Snapshot { chunks, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates samples in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SensorPoint> {
        self.chunks.iter().flat_map(|chunk| chunk.iter())
    }

    /// Insertion-ordered chunks, for data-parallel scans.
    /// Collecting from this iterator preserves chunk order.
    pub fn par_chunks(&self) -> impl IndexedParallelIterator<Item = &[SensorPoint]> {
        self.chunks.par_iter().map(|chunk| chunk.as_slice())
    }

    pub fn to_vec(&self) -> Vec<SensorPoint> {
        let mut points = Vec::with_capacity(self.len);
        self.chunks
            .iter()
            .for_each(|chunk| points.extend_from_slice(chunk));
        points
    }
}
