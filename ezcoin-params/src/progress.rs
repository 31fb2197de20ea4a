//! Verification progress heuristic
//!
//! Work is measured in units of "one cheap transaction". Transactions up to
//! the last checkpoint are trusted and cost one unit each; transactions after
//! it need full signature checks and cost [`SIGCHECK_VERIFICATION_FACTOR`].

use crate::block_index::IndexedBlock;
use crate::checkpoints::CheckpointData;

/// Relative cost of verifying a transaction after the last checkpoint
pub const SIGCHECK_VERIFICATION_FACTOR: f64 = 5.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Estimate verification progress of `block` as of Unix time `now`.
///
/// Returns 0.0 for `None`. Expected post-checkpoint work is floored at zero:
/// a wall clock behind the checkpoint leaves only the pre-checkpoint backlog,
/// and a clock behind a post-checkpoint block reads as complete. The result is
/// always within `[0, 1]`; a degenerate estimate (no work done and none
/// remaining, or a non-finite quotient) yields 0.0.
pub fn guess_verification_progress_at<B: IndexedBlock>(
    data: &CheckpointData,
    block: Option<&B>,
    now: i64,
) -> f64 {
    let Some(block) = block else {
        return 0.0;
    };

    let checkpoint_tx = data.transactions_at_last_checkpoint;
    let chain_tx = block.chain_tx();

    let (work_before, work_after) = if chain_tx <= checkpoint_tx {
        let cheap_before = chain_tx as f64;
        let cheap_after = (checkpoint_tx - chain_tx) as f64;
        // Pre-checkpoint work is certain even if the clock is behind the checkpoint
        let expensive_after = (days_between(now, data.last_checkpoint_time)
            * data.transactions_per_day)
            .max(0.0);
        (
            cheap_before,
            cheap_after + expensive_after * SIGCHECK_VERIFICATION_FACTOR,
        )
    } else {
        let cheap_before = checkpoint_tx as f64;
        let expensive_before = (chain_tx - checkpoint_tx) as f64;
        // A clock running behind the block leaves nothing to do
        let expensive_after =
            (days_between(now, block.time()) * data.transactions_per_day).max(0.0);
        (
            cheap_before + expensive_before * SIGCHECK_VERIFICATION_FACTOR,
            expensive_after * SIGCHECK_VERIFICATION_FACTOR,
        )
    };

    let total = work_before + work_after;
    if total <= 0.0 {
        return 0.0;
    }
    let progress = work_before / total;
    if !progress.is_finite() {
        return 0.0;
    }
    progress.clamp(0.0, 1.0)
}

fn days_between(later: i64, earlier: i64) -> f64 {
    (later as f64 - earlier as f64) / SECONDS_PER_DAY
}
