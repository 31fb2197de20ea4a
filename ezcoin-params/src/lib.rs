//! Ezcoin network parameters and block checkpoints
//!
//! This crate provides the hard-coded checkpoint tables for each network
//! profile, the checkpoint verifier used while connecting blocks, the
//! last-checkpoint lookup used to bound reorganizations, and the
//! verification progress heuristic reported during initial block download.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod block_index;
pub mod checkpoints;
pub mod config;
pub mod hash;
pub mod network;
pub mod progress;
pub mod verifier;

pub use block_index::{BlockIndex, BlockIndexEntry, IndexedBlock};
pub use checkpoints::{Checkpoint, CheckpointData, CheckpointSet};
pub use config::CheckpointConfig;
pub use hash::BlockHash;
pub use network::{Network, NetworkType};
pub use progress::{guess_verification_progress_at, SIGCHECK_VERIFICATION_FACTOR};
pub use verifier::Checkpoints;

/// Error types for parameter operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed block hash literal
    #[error("Invalid block hash: {0}")]
    InvalidHash(String),

    /// A network profile was configured without any checkpoints
    #[error("Checkpoint set for {0} is empty")]
    EmptyCheckpointSet(NetworkType),

    /// Checkpoint heights are not strictly increasing
    #[error("Checkpoint heights out of order: {next} follows {previous}")]
    UnorderedCheckpoints {
        /// Height of the preceding checkpoint
        previous: u32,
        /// Height of the offending checkpoint
        next: u32,
    },

    /// Transactions-per-day estimate is negative or not finite
    #[error("Invalid transaction rate: {0}")]
    InvalidTransactionRate(f64),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for parameter operations
pub type Result<T> = std::result::Result<T, Error>;
