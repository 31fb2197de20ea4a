//! Read-only view of the node's block index
//!
//! The block index is owned by the surrounding node. Checkpoint queries only
//! need hash lookups and a block's cumulative transaction count and time.

use crate::hash::BlockHash;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Metadata the progress estimator needs from a block-index entry
pub trait IndexedBlock {
    /// Total transactions from genesis through this block, inclusive
    fn chain_tx(&self) -> u64;

    /// Block timestamp (Unix epoch)
    fn time(&self) -> i64;
}

impl<T: IndexedBlock + ?Sized> IndexedBlock for &T {
    fn chain_tx(&self) -> u64 {
        (**self).chain_tx()
    }

    fn time(&self) -> i64 {
        (**self).time()
    }
}

/// Lookup of block-index entries by hash
pub trait BlockIndex {
    /// Entry type stored in the index
    type Entry;

    /// Look up the entry for `hash`
    fn get_block(&self, hash: &BlockHash) -> Option<&Self::Entry>;
}

impl<E, S: BuildHasher> BlockIndex for HashMap<BlockHash, E, S> {
    type Entry = E;

    fn get_block(&self, hash: &BlockHash) -> Option<&E> {
        self.get(hash)
    }
}

impl<E> BlockIndex for BTreeMap<BlockHash, E> {
    type Entry = E;

    fn get_block(&self, hash: &BlockHash) -> Option<&E> {
        self.get(hash)
    }
}

/// A plain block-index entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockIndexEntry {
    /// Block hash
    pub hash: BlockHash,
    /// Chain height
    pub height: u32,
    /// Cumulative transaction count through this block
    pub chain_tx: u64,
    /// Block timestamp (Unix epoch)
    pub time: i64,
}

impl IndexedBlock for BlockIndexEntry {
    fn chain_tx(&self) -> u64 {
        self.chain_tx
    }

    fn time(&self) -> i64 {
        self.time
    }
}
