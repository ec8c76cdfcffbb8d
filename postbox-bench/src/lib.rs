//! # Postbox Bench
//!
//! Benchmark driver for the postbox transport comparison.
//!
//! For each transport the driver forks an echo responder, then runs three
//! experiments against the first participant's mailbox view: latency
//! (timed single round trips), throughput (a bulk echo transfer), and
//! capacity (best-of-N bulk bursts). Results render as one comparison
//! table across transports.

pub mod config;
pub mod driver;
pub mod echo;
pub mod latency;
pub mod report;
pub mod suite;
pub mod throughput;

pub use config::BenchConfig;
pub use driver::{TransportReport, run_forked};
pub use echo::echo_until_closed;
pub use latency::{LatencyCollector, LatencyStats};
pub use suite::{run_comparison, run_file_benchmark, run_mmap_benchmark, run_sysv_benchmark};
pub use throughput::ThroughputRun;
