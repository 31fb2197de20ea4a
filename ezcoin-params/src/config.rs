//! Checkpoint configuration
//!
//! Carries the two externally owned switches: which network profile is
//! active and whether checkpoints are enforced (`-checkpoints`). When the
//! flag is omitted it follows the network's default: on for mainnet, off for
//! testnet.

use crate::network::{Network, NetworkType};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Checkpoint settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredCheckpointConfig")]
pub struct CheckpointConfig {
    /// Active network profile
    pub network: NetworkType,
    /// Enforce checkpoints
    pub checkpoints: bool,
}

/// On-disk form, where the enforcement flag may be omitted
#[derive(Debug, Deserialize)]
struct StoredCheckpointConfig {
    #[serde(default)]
    network: NetworkType,
    #[serde(default)]
    checkpoints: Option<bool>,
}

impl From<StoredCheckpointConfig> for CheckpointConfig {
    fn from(stored: StoredCheckpointConfig) -> Self {
        let defaults = Self::for_network(stored.network);
        Self {
            checkpoints: stored.checkpoints.unwrap_or(defaults.checkpoints),
            ..defaults
        }
    }
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self::for_network(NetworkType::default())
    }
}

impl CheckpointConfig {
    /// Default settings for a network
    pub const fn for_network(network: NetworkType) -> Self {
        Self {
            network,
            checkpoints: Network::from_type(network).checkpoints_by_default,
        }
    }

    /// Parse settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}
