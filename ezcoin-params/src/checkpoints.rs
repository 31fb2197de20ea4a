//! Hard-coded block checkpoints
//!
//! What makes a good checkpoint block: it is surrounded by blocks with
//! reasonable timestamps (none before it with a later timestamp, none after
//! it with an earlier one) and it contains no strange transactions.

use crate::hash::BlockHash;
use crate::network::NetworkType;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Mainnet pins, ascending by height
const MAINNET_CHECKPOINTS: &[(u32, &str)] = &[
    (0, "61e2df0bf8cc0a43960d7d2fcfc605935f0848a6ba53ab8d46b98ab4463adc3e"),
    (1_000, "9acf0e40c53c8bd88bb292e6a9efc7e54ebdb305a12462cd7172b30e37eafecb"),
    (2_500, "d8b7d76354b1308de398073a5dfabb0f9149faf86c5442012f0e57c97fa1e3ca"),
    (4_000, "e83ee0f0d4e28e43a4d956e550521bc270db5ffc78d861df3db91d81a35cc1b6"),
    (5_000, "e3fe3e80b95fdd46299f7e8536176518d242851d495bba2ce1921b20f87a4def"),
    (10_000, "cff48972378a3f838e26de2a9386cc2eb8060f7e99d52d9bf3c642afc7d351c5"),
    (20_000, "ed164fb6b78f9f24e616bcdf61c4b716320bcf0216c4f47d2706ff8e233ac1e3"),
    (30_001, "7b444c82c92a10f253ff41c8ab2376935c97edd4e308c48bb76c9476cbf77884"),
    (44_161, "8a547e3a271034c8db2a948bc190466d7c7611e3983af6ea147e54f67cbea8d9"),
    (65_001, "481b140ca7b02cd2f3c31f3507b2cea77c30b610de87d1d26d62aa98d1c9cfdb"),
    (170_002, "e0ba190af0736b23c0a8ca15003daf76fd900f5e9936c35a5db2557f674f7d2f"),
    (259_472, "57997222d73086b043837db343cee6940b2e8882c68a21ffbdd789d6d7f926fe"),
];

const MAINNET_DATA: CheckpointData = CheckpointData {
    last_checkpoint_time: 1_386_403_871,
    transactions_at_last_checkpoint: 378_291,
    transactions_per_day: 1_200.0,
};

const TESTNET_CHECKPOINTS: &[(u32, &str)] = &[(
    0,
    "f5ae71e26c74beacc88382716aced69cddf3dffff24f384e1808905e0188f68f",
)];

const TESTNET_DATA: CheckpointData = CheckpointData {
    last_checkpoint_time: 1_317_798_646,
    transactions_at_last_checkpoint: 1,
    transactions_per_day: 300.0,
};

/// A blockchain checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Block height
    pub height: u32,
    /// Block hash
    pub hash: BlockHash,
}

/// Chain statistics at the last checkpoint, used for progress estimation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckpointData {
    /// Timestamp of the last checkpoint block (Unix epoch)
    pub last_checkpoint_time: i64,
    /// Total transactions from genesis through the last checkpoint block
    pub transactions_at_last_checkpoint: u64,
    /// Estimated transactions per day after the last checkpoint
    pub transactions_per_day: f64,
}

/// Validated, immutable set of checkpoints for one network
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointSet {
    network: NetworkType,
    checkpoints: Vec<Checkpoint>,
    data: CheckpointData,
}

impl CheckpointSet {
    /// Build a checkpoint set, rejecting empty or out-of-order input
    pub fn new(
        network: NetworkType,
        checkpoints: Vec<Checkpoint>,
        data: CheckpointData,
    ) -> Result<Self> {
        if checkpoints.is_empty() {
            return Err(Error::EmptyCheckpointSet(network));
        }

        for pair in checkpoints.windows(2) {
            if pair[1].height <= pair[0].height {
                return Err(Error::UnorderedCheckpoints {
                    previous: pair[0].height,
                    next: pair[1].height,
                });
            }
        }

        let rate = data.transactions_per_day;
        if !rate.is_finite() || rate < 0.0 {
            return Err(Error::InvalidTransactionRate(rate));
        }

        Ok(Self {
            network,
            checkpoints,
            data,
        })
    }

    /// Get mainnet checkpoints
    pub fn mainnet() -> Result<Self> {
        Self::from_table(NetworkType::Mainnet, MAINNET_CHECKPOINTS, MAINNET_DATA)
    }

    /// Get testnet checkpoints
    pub fn testnet() -> Result<Self> {
        Self::from_table(NetworkType::Testnet, TESTNET_CHECKPOINTS, TESTNET_DATA)
    }

    /// Get checkpoints by network type
    pub fn for_network(network: NetworkType) -> Result<Self> {
        match network {
            NetworkType::Mainnet => Self::mainnet(),
            NetworkType::Testnet => Self::testnet(),
        }
    }

    fn from_table(
        network: NetworkType,
        table: &[(u32, &str)],
        data: CheckpointData,
    ) -> Result<Self> {
        let checkpoints = table
            .iter()
            .map(|&(height, hash)| {
                Ok(Checkpoint {
                    height,
                    hash: BlockHash::from_hex(hash)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(network, checkpoints, data)
    }

    /// Network this set belongs to
    pub fn network(&self) -> NetworkType {
        self.network
    }

    /// Get all checkpoints, ascending by height
    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    /// Iterate checkpoints, ascending by height
    pub fn iter(&self) -> std::slice::Iter<'_, Checkpoint> {
        self.checkpoints.iter()
    }

    /// Progress estimation statistics
    pub fn data(&self) -> &CheckpointData {
        &self.data
    }

    /// Pinned hash at exactly `height`, if any
    pub fn hash_at(&self, height: u32) -> Option<&BlockHash> {
        self.checkpoints
            .binary_search_by_key(&height, |cp| cp.height)
            .ok()
            .map(|idx| &self.checkpoints[idx].hash)
    }

    /// Get latest checkpoint
    pub fn latest(&self) -> &Checkpoint {
        // Non-empty by construction
        &self.checkpoints[self.checkpoints.len() - 1]
    }

    /// Height of the latest checkpoint
    pub fn highest_height(&self) -> u32 {
        self.latest().height
    }

    /// Get checkpoint count
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    /// Always false for a constructed set
    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }
}

impl<'a> IntoIterator for &'a CheckpointSet {
    type Item = &'a Checkpoint;
    type IntoIter = std::slice::Iter<'a, Checkpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cp(height: u32, fill: u8) -> Checkpoint {
        Checkpoint {
            height,
            hash: BlockHash::from_bytes([fill; 32]),
        }
    }

    #[test]
    fn test_mainnet_checkpoints() {
        let checkpoints = CheckpointSet::mainnet().unwrap();
        assert_eq!(checkpoints.len(), 12);
        assert_eq!(checkpoints.network(), NetworkType::Mainnet);
        assert_eq!(checkpoints.highest_height(), 259_472);
        assert_eq!(
            checkpoints.latest().hash.to_string(),
            "57997222d73086b043837db343cee6940b2e8882c68a21ffbdd789d6d7f926fe"
        );
    }

    #[test]
    fn test_testnet_checkpoints() {
        let checkpoints = CheckpointSet::testnet().unwrap();
        assert_eq!(checkpoints.len(), 1);
        assert_eq!(checkpoints.highest_height(), 0);
    }

    #[test]
    fn test_hash_at() {
        let checkpoints = CheckpointSet::mainnet().unwrap();
        assert!(checkpoints.hash_at(1_000).is_some());
        assert!(checkpoints.hash_at(999).is_none());
        assert!(checkpoints.hash_at(u32::MAX).is_none());
    }

    #[test]
    fn test_rejects_empty_set() {
        let result = CheckpointSet::new(NetworkType::Mainnet, Vec::new(), MAINNET_DATA);
        assert!(matches!(result, Err(Error::EmptyCheckpointSet(NetworkType::Mainnet))));
    }

    #[test]
    fn test_rejects_unordered_heights() {
        let result = CheckpointSet::new(
            NetworkType::Mainnet,
            vec![cp(0, 1), cp(50, 2), cp(40, 3)],
            MAINNET_DATA,
        );
        assert!(matches!(
            result,
            Err(Error::UnorderedCheckpoints { previous: 50, next: 40 })
        ));
    }

    #[test]
    fn test_rejects_duplicate_heights() {
        let result = CheckpointSet::new(
            NetworkType::Mainnet,
            vec![cp(7, 1), cp(7, 2)],
            MAINNET_DATA,
        );
        assert!(matches!(
            result,
            Err(Error::UnorderedCheckpoints { previous: 7, next: 7 })
        ));
    }

    #[test]
    fn test_rejects_bad_transaction_rate() {
        for rate in [-1.0, f64::NAN, f64::INFINITY] {
            let data = CheckpointData {
                transactions_per_day: rate,
                ..MAINNET_DATA
            };
            let result = CheckpointSet::new(NetworkType::Mainnet, vec![cp(0, 1)], data);
            assert!(matches!(result, Err(Error::InvalidTransactionRate(_))));
        }
    }
}
