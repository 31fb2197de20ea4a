//! Checkpoint queries used while connecting blocks
//!
//! [`Checkpoints`] bundles the active network's [`CheckpointSet`] with the
//! enforcement switch. It is built once at startup and shared read-only.

use crate::block_index::{BlockIndex, IndexedBlock};
use crate::checkpoints::CheckpointSet;
use crate::config::CheckpointConfig;
use crate::hash::BlockHash;
use crate::progress::guess_verification_progress_at;
use crate::Result;

/// Active checkpoint context
#[derive(Debug, Clone)]
pub struct Checkpoints {
    set: CheckpointSet,
    enabled: bool,
}

impl Checkpoints {
    /// Wrap a checkpoint set with the enforcement flag
    pub fn new(set: CheckpointSet, enabled: bool) -> Self {
        tracing::info!(
            network = %set.network(),
            count = set.len(),
            highest = set.highest_height(),
            enabled,
            "Loaded checkpoints"
        );
        Self { set, enabled }
    }

    /// Build from configuration, selecting the network's built-in set
    pub fn from_config(config: &CheckpointConfig) -> Result<Self> {
        let set = CheckpointSet::for_network(config.network)?;
        Ok(Self::new(set, config.checkpoints))
    }

    /// Active checkpoint set
    pub fn set(&self) -> &CheckpointSet {
        &self.set
    }

    /// Whether checkpoints are enforced
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check a block hash against the checkpoint at `height`.
    ///
    /// Heights without a checkpoint are unconstrained.
    pub fn check_block(&self, height: u32, hash: &BlockHash) -> bool {
        if !self.enabled {
            return true;
        }

        match self.set.hash_at(height) {
            None => true,
            Some(expected) if expected == hash => true,
            Some(expected) => {
                tracing::warn!(
                    height,
                    %hash,
                    %expected,
                    "Block hash does not match checkpoint"
                );
                false
            }
        }
    }

    /// Height of the latest checkpoint, or 0 when checkpoints are disabled
    pub fn total_blocks_estimate(&self) -> u32 {
        if !self.enabled {
            return 0;
        }
        self.set.highest_height()
    }

    /// Highest checkpointed block present in `index`
    pub fn last_checkpoint<'a, I: BlockIndex>(&self, index: &'a I) -> Option<&'a I::Entry> {
        if !self.enabled {
            return None;
        }

        self.set.iter().rev().find_map(|cp| {
            let entry = index.get_block(&cp.hash)?;
            tracing::debug!(height = cp.height, hash = %cp.hash, "Found last checkpoint");
            Some(entry)
        })
    }

    /// Guess how far chain verification has progressed, from 0.0 to 1.0
    pub fn guess_verification_progress<B: IndexedBlock>(&self, block: Option<&B>) -> f64 {
        let now = chrono::Utc::now().timestamp();
        self.guess_verification_progress_at(block, now)
    }

    /// [`Self::guess_verification_progress`] with an explicit current time
    pub fn guess_verification_progress_at<B: IndexedBlock>(
        &self,
        block: Option<&B>,
        now: i64,
    ) -> f64 {
        guess_verification_progress_at(self.set.data(), block, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_index::BlockIndexEntry;
    use crate::network::NetworkType;
    use std::collections::HashMap;

    fn mainnet(enabled: bool) -> Checkpoints {
        Checkpoints::new(CheckpointSet::mainnet().unwrap(), enabled)
    }

    fn entry(hash: BlockHash, height: u32) -> BlockIndexEntry {
        BlockIndexEntry {
            hash,
            height,
            chain_tx: u64::from(height),
            time: 0,
        }
    }

    #[test]
    fn test_check_block_mainnet() {
        let checkpoints = mainnet(true);
        let pinned = *checkpoints.set().hash_at(1_000).unwrap();
        let other = BlockHash::from_bytes([0xab; 32]);

        assert!(checkpoints.check_block(1_000, &pinned));
        assert!(!checkpoints.check_block(1_000, &other));
        assert!(checkpoints.check_block(999, &other));
    }

    #[test]
    fn test_disabled_is_permissive() {
        let checkpoints = mainnet(false);
        let other = BlockHash::from_bytes([0xab; 32]);
        let genesis = checkpoints.set().checkpoints()[0];

        assert!(checkpoints.check_block(1_000, &other));
        assert_eq!(checkpoints.total_blocks_estimate(), 0);

        let mut index = HashMap::new();
        index.insert(genesis.hash, entry(genesis.hash, 0));
        assert!(checkpoints.last_checkpoint(&index).is_none());
    }

    #[test]
    fn test_total_blocks_estimate() {
        assert_eq!(mainnet(true).total_blocks_estimate(), 259_472);
    }

    #[test]
    fn test_last_checkpoint_prefers_highest() {
        let checkpoints = mainnet(true);
        let pins = checkpoints.set().checkpoints();

        let mut index = HashMap::new();
        for cp in &pins[..4] {
            index.insert(cp.hash, entry(cp.hash, cp.height));
        }
        // Unpinned blocks are ignored
        let stray = BlockHash::from_bytes([1; 32]);
        index.insert(stray, entry(stray, 999_999));

        let last = checkpoints.last_checkpoint(&index).unwrap();
        assert_eq!(last.height, pins[3].height);
    }

    #[test]
    fn test_last_checkpoint_none_known() {
        let checkpoints = mainnet(true);
        let index: HashMap<BlockHash, BlockIndexEntry> = HashMap::new();
        assert!(checkpoints.last_checkpoint(&index).is_none());
    }

    #[test]
    fn test_from_config() {
        let config = CheckpointConfig::for_network(NetworkType::Mainnet);
        let checkpoints = Checkpoints::from_config(&config).unwrap();
        assert!(checkpoints.is_enabled());
        assert_eq!(checkpoints.set().network(), NetworkType::Mainnet);
    }

    #[test]
    fn test_default_testnet_accepts_any_genesis() {
        let config = CheckpointConfig::for_network(NetworkType::Testnet);
        let checkpoints = Checkpoints::from_config(&config).unwrap();
        assert!(!checkpoints.is_enabled());
        assert_eq!(checkpoints.set().network(), NetworkType::Testnet);

        let own_genesis = BlockHash::from_bytes([0x5a; 32]);
        assert!(checkpoints.check_block(0, &own_genesis));
        assert_eq!(checkpoints.total_blocks_estimate(), 0);

        let mut index = HashMap::new();
        let pinned = checkpoints.set().latest().hash;
        index.insert(pinned, entry(pinned, 0));
        assert!(checkpoints.last_checkpoint(&index).is_none());
    }

    #[test]
    fn test_testnet_pin_applies_when_enabled() {
        let checkpoints = Checkpoints::new(CheckpointSet::testnet().unwrap(), true);
        let own_genesis = BlockHash::from_bytes([0x5a; 32]);
        assert!(!checkpoints.check_block(0, &own_genesis));
    }

    #[test]
    fn test_progress_none_is_zero() {
        let checkpoints = mainnet(true);
        assert_eq!(
            checkpoints.guess_verification_progress::<BlockIndexEntry>(None),
            0.0
        );
    }

    #[test]
    fn test_progress_with_wall_clock() {
        let checkpoints = mainnet(true);
        let data = *checkpoints.set().data();
        let block = BlockIndexEntry {
            hash: BlockHash::default(),
            height: 1,
            chain_tx: data.transactions_at_last_checkpoint / 2,
            time: data.last_checkpoint_time,
        };
        let p = checkpoints.guess_verification_progress(Some(&block));
        assert!(p > 0.0 && p < 0.5);
    }
}
