//! Three-transport IPC comparison report.
//!
//! Forks an echo responder per transport and prints the latency /
//! throughput / capacity comparison table.
//!
//! Run with: `cargo run --example ipc_report --release`
//!
//! For stable numbers, run in release mode on an otherwise idle machine;
//! both sides of each pair busy-spin on a core while waiting.

use postbox_bench::{BenchConfig, report, suite};
use postbox_core::Result;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = BenchConfig::default();
    let dir = tempfile::tempdir()?;

    println!("Running IPC transport comparison...");
    println!(
        "  latency rounds: {}, packet size: {} B, bulk volume: {} MiB, capacity bursts: {}",
        config.latency_rounds, config.packet_size, config.bulk_megabytes, config.capacity_bursts
    );
    println!();

    let reports = suite::run_comparison(dir.path(), &config)?;
    report::print_comparison(&reports);
    Ok(())
}
