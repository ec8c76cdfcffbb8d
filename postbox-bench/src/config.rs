//! Benchmark run configuration.

/// Parameters for one transport's benchmark run.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Number of timed round trips in the latency experiment.
    pub latency_rounds: usize,
    /// Payload size for latency round trips, in bytes.
    pub latency_payload: usize,
    /// Packet size for bulk transfers, in bytes.
    pub packet_size: usize,
    /// Volume moved one way per bulk run, in mebibytes.
    pub bulk_megabytes: usize,
    /// Number of bulk bursts in the capacity experiment (best-of).
    pub capacity_bursts: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            latency_rounds: 10_000,
            latency_payload: 128,
            packet_size: 1024,
            bulk_megabytes: 128,
            capacity_bursts: 10,
        }
    }
}

impl BenchConfig {
    /// A reduced configuration for smoke tests and debug builds.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            latency_rounds: 100,
            latency_payload: 128,
            packet_size: 1024,
            bulk_megabytes: 1,
            capacity_bursts: 2,
        }
    }

    /// Slot capacity the mailbox needs for this configuration.
    #[must_use]
    pub fn slot_capacity(&self) -> usize {
        self.packet_size.max(self.latency_payload)
    }

    /// Packets per bulk run.
    #[must_use]
    pub fn bulk_packets(&self) -> u64 {
        (self.bulk_megabytes as u64 * 1024 * 1024) / self.packet_size as u64
    }
}
