//! Per-coordinate slot index for sparse batches.

use crate::error::{Error, Result};

/// Maps each grid coordinate to the record slot written for it in the
/// current generation.
///
/// Entries are `0` for unused coordinates and `slot + 1` otherwise, so a
/// freshly zeroed index means "nothing written".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparseUsedIndex {
    tiles_wide: u32,
    entries: Vec<u32>,
}

impl SparseUsedIndex {
    /// Index for a `tiles_wide` x `tiles_tall` grid, all coordinates unused.
    pub fn new(tiles_wide: u32, tiles_tall: u32) -> Result<Self> {
        let len = (tiles_wide as usize).saturating_mul(tiles_tall as usize);
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(len)
            .map_err(|_| Error::AllocationFailed {
                bytes: len.saturating_mul(size_of::<u32>()),
            })?;
        entries.resize(len, 0);
        Ok(Self {
            tiles_wide,
            entries,
        })
    }

    #[inline]
    fn entry(&self, x: u32, y: u32) -> usize {
        y as usize * self.tiles_wide as usize + x as usize
    }

    /// Slot previously assigned to `(x, y)`, if any.
    #[must_use]
    pub fn slot(&self, x: u32, y: u32) -> Option<usize> {
        match self.entries[self.entry(x, y)] {
            0 => None,
            stored => Some(stored as usize - 1),
        }
    }

    /// Record that `(x, y)` lives in `slot`.
    pub fn assign(&mut self, x: u32, y: u32, slot: usize) {
        let entry = self.entry(x, y);
        self.entries[entry] = slot as u32 + 1;
    }

    /// Mark every coordinate unused, keeping the allocation.
    pub fn reset(&mut self) {
        self.entries.fill(0);
    }

    /// Number of coordinates covered.
    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of coordinates currently assigned a slot.
    #[cfg(test)]
    fn used_count(&self) -> usize {
        self.entries.iter().filter(|&&e| e != 0).count()
    }
}
