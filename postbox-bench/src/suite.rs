//! Per-transport experiment setup.
//!
//! Builds the store pair for each transport and hands it to the forked
//! driver. The file and mmap transports back their region with a file
//! under the caller's scratch directory; the System-V transport needs no
//! filesystem presence at all.

use crate::config::BenchConfig;
use crate::driver::{TransportReport, run_forked};
use postbox_core::{Mailbox, Participant, Result};
use postbox_transport::{FileStore, MmapStore, SysvStore};
use std::path::Path;

/// Runs the benchmark over a shared regular file at `path`.
///
/// # Errors
/// Propagates setup, fork, and experiment failures.
pub fn run_file_benchmark(path: &Path, config: &BenchConfig) -> Result<TransportReport> {
    let capacity = config.slot_capacity();
    let first = Mailbox::create(FileStore::create(path, capacity)?, Participant::First)?;
    let second = Mailbox::open(FileStore::open(path)?, Participant::Second);
    run_forked("file", first, second, config)
}

/// Runs the benchmark over a shared mapping backed by `path`.
///
/// # Errors
/// Propagates setup, fork, and experiment failures.
pub fn run_mmap_benchmark(path: &Path, config: &BenchConfig) -> Result<TransportReport> {
    let capacity = config.slot_capacity();
    let first = Mailbox::create(MmapStore::create(path, capacity)?, Participant::First)?;
    let second = Mailbox::open(MmapStore::open(path)?, Participant::Second);
    run_forked("mmap", first, second, config)
}

/// Runs the benchmark over a System-V shared memory segment.
///
/// # Errors
/// Propagates setup, fork, and experiment failures.
pub fn run_sysv_benchmark(config: &BenchConfig) -> Result<TransportReport> {
    let creator = SysvStore::create(config.slot_capacity())?;
    let attached = SysvStore::attach(creator.id())?;
    let first = Mailbox::create(creator, Participant::First)?;
    let second = Mailbox::open(attached, Participant::Second);
    run_forked("sysv", first, second, config)
}

/// Runs all three transports in sequence, backing files under `scratch`.
///
/// # Errors
/// Propagates the first transport failure; later transports do not run.
pub fn run_comparison(scratch: &Path, config: &BenchConfig) -> Result<Vec<TransportReport>> {
    Ok(vec![
        run_file_benchmark(&scratch.join("postbox-file"), config)?,
        run_mmap_benchmark(&scratch.join("postbox-mmap"), config)?,
        run_sysv_benchmark(config)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tiny_config() -> BenchConfig {
        BenchConfig {
            latency_rounds: 20,
            latency_payload: 64,
            packet_size: 256,
            bulk_megabytes: 1,
            capacity_bursts: 1,
        }
    }

    #[test]
    fn test_comparison_covers_all_transports() {
        let dir = tempdir().unwrap();
        let reports = run_comparison(dir.path(), &tiny_config()).unwrap();

        let names: Vec<&str> = reports.iter().map(|r| r.transport.as_str()).collect();
        assert_eq!(names, ["file", "mmap", "sysv"]);
        assert!(reports.iter().all(|r| r.latency.count == 20));
    }
}
