//! Fork-based benchmark driver.
//!
//! For each transport the driver forks an echo responder, runs the
//! latency, throughput, and capacity experiments from the parent, then
//! closes the mailbox and reaps the child. Both mailbox views must be
//! fully constructed before the call so the child inherits an attached,
//! coherent store.

use crate::config::BenchConfig;
use crate::echo::echo_until_closed;
use crate::latency::{LatencyCollector, LatencyStats};
use crate::throughput::ThroughputRun;
use nix::sys::wait::waitpid;
use nix::unistd::{ForkResult, fork};
use postbox_core::{BackingStore, Error, Mailbox, Received, Result};
use std::io;
use std::process;
use std::time::Instant;
use tracing::debug;

/// Collected results for one transport.
#[derive(Debug, Clone)]
pub struct TransportReport {
    /// Transport label for the comparison table.
    pub transport: String,
    /// One-way latency statistics.
    pub latency: LatencyStats,
    /// Sustained throughput in MB/s, counting both directions.
    pub throughput_mb_s: f64,
    /// Best observed burst throughput in MB/s.
    pub capacity_mb_s: f64,
}

/// Runs the full experiment set for one transport pair.
///
/// `first` is driven from the calling process; `second` is handed to a
/// forked child that echoes until the driver closes the mailbox.
///
/// # Errors
/// Returns [`Error::Io`] if the fork or reap fails, and propagates
/// protocol and store errors from the experiments.
pub fn run_forked<S>(
    transport: &str,
    first: Mailbox<S>,
    second: Mailbox<S>,
    config: &BenchConfig,
) -> Result<TransportReport>
where
    S: BackingStore,
{
    debug!(transport, "starting benchmark");

    // The child must not touch the allocator between fork and exit.
    let mut scratch = vec![0u8; config.slot_capacity()];

    match unsafe { fork() }.map_err(io::Error::from)? {
        ForkResult::Child => {
            let mut second = second;
            let _ = echo_until_closed(&mut second, &mut scratch);
            // Exit without unwinding: resource teardown belongs to the
            // parent, which still holds the creating store view.
            process::exit(0);
        }
        ForkResult::Parent { child } => {
            let mut first = first;
            let report = run_experiments(transport, &mut first, config);
            first.close()?;
            waitpid(child, None).map_err(io::Error::from)?;
            debug!(transport, "responder reaped");
            report
        }
    }
}

fn run_experiments<S: BackingStore>(
    transport: &str,
    mailbox: &mut Mailbox<S>,
    config: &BenchConfig,
) -> Result<TransportReport> {
    let latency = measure_latency(mailbox, config)?;
    debug!(transport, rounds = latency.count, "latency experiment done");

    let throughput_mb_s = measure_bulk(mailbox, config)?.mb_per_second();
    debug!(transport, throughput_mb_s, "throughput experiment done");

    let capacity_mb_s = measure_capacity(mailbox, config)?;
    debug!(transport, capacity_mb_s, "capacity experiment done");

    Ok(TransportReport {
        transport: transport.to_string(),
        latency,
        throughput_mb_s,
        capacity_mb_s,
    })
}

/// Fills `len` bytes with the `[0, 1, 2, ...]` pattern the echoes are
/// verified against.
fn patterned(len: usize) -> Vec<u8> {
    (0..len).map(|i| i as u8).collect()
}

fn measure_latency<S: BackingStore>(
    mailbox: &mut Mailbox<S>,
    config: &BenchConfig,
) -> Result<LatencyStats> {
    let payload = patterned(config.latency_payload);
    let mut response = vec![0u8; config.latency_payload];
    let mut collector = LatencyCollector::with_capacity(config.latency_rounds);

    for _ in 0..config.latency_rounds {
        let start = Instant::now();
        mailbox.send(&payload)?;
        expect_echo(mailbox, &mut response, &payload)?;
        collector.record_round_trip(start.elapsed());
    }

    collector
        .stats()
        .ok_or_else(|| Error::Io(io::Error::other("latency experiment produced no samples")))
}

fn measure_bulk<S: BackingStore>(
    mailbox: &mut Mailbox<S>,
    config: &BenchConfig,
) -> Result<ThroughputRun> {
    let payload = patterned(config.packet_size);
    let mut response = vec![0u8; config.packet_size];
    let packets = config.bulk_packets();

    let start = Instant::now();
    for _ in 0..packets {
        mailbox.send(&payload)?;
        expect_echo(mailbox, &mut response, &payload)?;
    }

    Ok(ThroughputRun::from_echo(
        packets,
        config.packet_size,
        start.elapsed(),
    ))
}

fn measure_capacity<S: BackingStore>(
    mailbox: &mut Mailbox<S>,
    config: &BenchConfig,
) -> Result<f64> {
    let mut best = 0f64;
    for burst in 0..config.capacity_bursts {
        let rate = measure_bulk(mailbox, config)?.mb_per_second();
        debug!(burst, rate, "capacity burst");
        best = best.max(rate);
    }
    Ok(best)
}

fn expect_echo<S: BackingStore>(
    mailbox: &mut Mailbox<S>,
    response: &mut [u8],
    expected: &[u8],
) -> Result<()> {
    match mailbox.receive(response)? {
        Received::Message(n) => {
            // A mismatch means the shared region was corrupted; stopping
            // here beats reporting numbers measured over garbage.
            assert_eq!(
                &response[..n],
                expected,
                "echoed payload does not match what was sent"
            );
            Ok(())
        }
        Received::Closed => panic!("responder closed the mailbox mid-experiment"),
    }
}
