//! dupesim-node binary.
//!
//! # Usage
//!
//! ```bash
//! # Run forever with the default pacing (3 frames, 500ms, 1s)
//! dupesim-node
//!
//! # Ten fast cycles with per-frame logging
//! RUST_LOG=debug dupesim-node --cycles 10 --frame-delay-ms 10 --cycle-delay-ms 50
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use dupesim_core::{DedupEngine, PathId, SimConfig};
use dupesim_node::{Orchestrator, SystemEnv, stop_signal};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Dual-path redundant link simulator
#[derive(Parser, Debug)]
#[command(name = "dupesim-node")]
#[command(about = "Simulate PRP-style duplicate discard over two redundant paths")]
#[command(version)]
struct Args {
    /// Frames generated per cycle
    #[arg(short, long, default_value = "3")]
    batch_size: usize,

    /// Pause between frames on each path, in milliseconds
    #[arg(long, default_value = "500")]
    frame_delay_ms: u64,

    /// Pause between cycles, in milliseconds
    #[arg(long, default_value = "1000")]
    cycle_delay_ms: u64,

    /// Stop after this many cycles (runs until Ctrl-C if omitted)
    #[arg(long)]
    cycles: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let config = SimConfig {
        batch_size: args.batch_size,
        inter_frame_delay: Duration::from_millis(args.frame_delay_ms),
        inter_cycle_delay: Duration::from_millis(args.cycle_delay_ms),
        max_cycles: args.cycles,
    };

    tracing::info!(?config, "dupesim starting");

    let env = SystemEnv::new();
    let engine = Arc::new(DedupEngine::new(env.clone()));
    let mut orchestrator = Orchestrator::new(config, Arc::clone(&engine), env)?;

    let (stop, signal) = stop_signal();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, finishing current cycle");
            stop.stop();
        }
    });

    let cycles = orchestrator.run(signal).await?;

    let stats = engine.stats();
    for path in PathId::ALL {
        let s = stats.path(path);
        tracing::info!(
            path = %path,
            received = s.received,
            delivered = s.delivered,
            dropped = s.dropped,
            "path summary"
        );
    }
    tracing::info!(cycles, delivered = stats.total_delivered(), "dupesim finished");

    Ok(())
}
