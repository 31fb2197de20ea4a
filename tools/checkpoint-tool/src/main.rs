//! CLI for inspecting the built-in checkpoint tables
//!
//! This tool allows:
//! - Listing the checkpoints of a network
//! - Checking a block hash against the checkpoint at its height
//! - Finding the last checkpoint among a set of known block hashes
//! - Estimating verification progress for a block

use anyhow::Context;
use clap::{Parser, Subcommand};
use ezcoin_params::{BlockHash, BlockIndexEntry, CheckpointConfig, Checkpoints, NetworkType};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "checkpoint-tool")]
#[command(about = "Ezcoin checkpoint inspection tool", long_about = None)]
struct Cli {
    /// JSON settings file; --testnet and --no-checkpoints take precedence over it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Use the test network with its defaults (checkpoints off unless the file enables them)
    #[arg(long, global = true)]
    testnet: bool,

    /// Disable checkpoint enforcement, whatever the file says
    #[arg(long, global = true)]
    no_checkpoints: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List checkpoints of the active network
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a block hash against the checkpoint at its height
    Check {
        /// Block height
        height: u32,
        /// Block hash (hex)
        hash: String,
    },

    /// Find the highest checkpoint among the given block hashes
    LastCheckpoint {
        /// Known block hashes (hex)
        hashes: Vec<String>,
    },

    /// Estimate verification progress for a block
    Progress {
        /// Cumulative transaction count through the block
        #[arg(long)]
        chain_tx: u64,

        /// Block timestamp (Unix epoch)
        #[arg(long)]
        time: i64,

        /// Current time (Unix epoch, defaults to the wall clock)
        #[arg(long)]
        now: Option<i64>,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let checkpoints = Checkpoints::from_config(&config).context("loading checkpoints")?;

    match cli.command {
        Commands::List { json } => run_list(&checkpoints, json)?,
        Commands::Check { height, hash } => run_check(&checkpoints, height, &hash)?,
        Commands::LastCheckpoint { hashes } => run_last_checkpoint(&checkpoints, &hashes)?,
        Commands::Progress {
            chain_tx,
            time,
            now,
        } => run_progress(&checkpoints, chain_tx, time, now),
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> anyhow::Result<CheckpointConfig> {
    let mut config = match &cli.config {
        Some(path) => CheckpointConfig::load(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => CheckpointConfig::default(),
    };
    if cli.testnet && config.network != NetworkType::Testnet {
        // Settings written for another network do not carry over
        config = CheckpointConfig::for_network(NetworkType::Testnet);
    }
    if cli.no_checkpoints {
        config.checkpoints = false;
    }
    Ok(config)
}

fn run_list(checkpoints: &Checkpoints, json: bool) -> anyhow::Result<()> {
    let set = checkpoints.set();
    if json {
        println!("{}", serde_json::to_string_pretty(set.checkpoints())?);
        return Ok(());
    }

    for cp in set {
        println!("{:>8}  {}", cp.height, cp.hash);
    }
    let data = set.data();
    println!(
        "last checkpoint time {}, {} transactions, {} tx/day after",
        data.last_checkpoint_time, data.transactions_at_last_checkpoint, data.transactions_per_day
    );
    Ok(())
}

fn run_check(checkpoints: &Checkpoints, height: u32, hash: &str) -> anyhow::Result<()> {
    let hash: BlockHash = hash.parse()?;
    if !checkpoints.check_block(height, &hash) {
        anyhow::bail!("block {} at height {} conflicts with checkpoint", hash, height);
    }
    info!("Block {} at height {} is consistent with checkpoints", hash, height);
    Ok(())
}

fn run_last_checkpoint(checkpoints: &Checkpoints, hashes: &[String]) -> anyhow::Result<()> {
    let mut index = HashMap::new();
    for hash in hashes {
        let hash: BlockHash = hash.parse()?;
        let height = checkpoints
            .set()
            .iter()
            .find(|cp| cp.hash == hash)
            .map(|cp| cp.height)
            .unwrap_or_default();
        index.insert(
            hash,
            BlockIndexEntry {
                hash,
                height,
                chain_tx: 0,
                time: 0,
            },
        );
    }

    match checkpoints.last_checkpoint(&index) {
        Some(entry) => println!("{}  {}", entry.height, entry.hash),
        None => println!("none"),
    }
    Ok(())
}

fn run_progress(checkpoints: &Checkpoints, chain_tx: u64, time: i64, now: Option<i64>) {
    let block = BlockIndexEntry {
        hash: BlockHash::default(),
        height: 0,
        chain_tx,
        time,
    };
    let progress = match now {
        Some(now) => checkpoints.guess_verification_progress_at(Some(&block), now),
        None => checkpoints.guess_verification_progress(Some(&block)),
    };
    println!("{:.6}", progress);
}
