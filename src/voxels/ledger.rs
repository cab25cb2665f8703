//! # Deferred Placement Ledger
//!
//! Structure writes addressed to chunks that are not loaded yet. Entries are bucketed by
//! target chunk, hold at most one block per cell, and are handed over exactly once, when that
//! chunk is constructed.

use std::collections::HashMap;

use super::block::Block;
use super::position::{ChunkPos, LocalPos};

/// A block write waiting for its chunk to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPlacement {
    /// Position inside the target chunk.
    pub local: LocalPos,
    /// Block to write.
    pub block: Block,
}

/// Pending cross-chunk writes keyed by not-yet-loaded chunk position, then by cell.
#[derive(Debug, Default)]
pub struct DeferredPlacementLedger {
    pending: HashMap<ChunkPos, HashMap<LocalPos, Block>>,
}

impl DeferredPlacementLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a write for a chunk that is not loaded.
    ///
    /// A later write to the same cell replaces the earlier one, so deferring the same write
    /// again leaves the ledger unchanged.
    pub fn defer(&mut self, chunk: ChunkPos, local: LocalPos, block: Block) {
        self.pending.entry(chunk).or_default().insert(local, block);
    }

    /// Removes and returns every write recorded for `chunk`, one per cell.
    ///
    /// A second call for the same chunk returns nothing unless new writes were deferred in
    /// between.
    pub fn take(&mut self, chunk: ChunkPos) -> Vec<PendingPlacement> {
        self.pending
            .remove(&chunk)
            .map(|cells| {
                cells
                    .into_iter()
                    .map(|(local, block)| PendingPlacement { local, block })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The block waiting for one cell of `chunk`.
    pub fn pending_at(&self, chunk: ChunkPos, local: LocalPos) -> Option<Block> {
        self.pending.get(&chunk)?.get(&local).copied()
    }

    /// Number of cells waiting in `chunk`.
    pub fn pending_count(&self, chunk: ChunkPos) -> usize {
        self.pending.get(&chunk).map_or(0, HashMap::len)
    }

    /// Number of chunks with at least one pending write.
    pub fn chunk_count(&self) -> usize {
        self.pending.len()
    }

    /// Total number of pending writes across all chunks.
    pub fn len(&self) -> usize {
        self.pending.values().map(HashMap::len).sum()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
