//! Bulk-transfer throughput accounting.

use std::time::Duration;

/// Result of one bulk echo run.
///
/// Every packet crosses the transport twice (out and echoed back), so the
/// byte count already includes both directions.
#[derive(Debug, Clone, Copy)]
pub struct ThroughputRun {
    /// Packets sent (and echoed).
    pub packets: u64,
    /// Bytes moved, counting both directions.
    pub bytes_both_ways: u64,
    /// Wall-clock duration of the run.
    pub duration: Duration,
}

impl ThroughputRun {
    /// Builds a run result from an echo loop's packet count and timing.
    #[must_use]
    pub fn from_echo(packets: u64, packet_size: usize, duration: Duration) -> Self {
        Self {
            packets,
            bytes_both_ways: packets * packet_size as u64 * 2,
            duration,
        }
    }

    /// Returns throughput in bytes per second.
    #[must_use]
    pub fn bytes_per_second(&self) -> f64 {
        self.bytes_both_ways as f64 / self.duration.as_secs_f64()
    }

    /// Returns throughput in megabytes per second.
    #[must_use]
    pub fn mb_per_second(&self) -> f64 {
        self.bytes_per_second() / (1024.0 * 1024.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_echo_counts_both_directions() {
        let run = ThroughputRun::from_echo(1024, 1024, Duration::from_secs(1));
        assert_eq!(run.packets, 1024);
        assert_eq!(run.bytes_both_ways, 2 * 1024 * 1024);
    }

    #[test]
    fn test_mb_per_second() {
        let run = ThroughputRun::from_echo(1024, 1024, Duration::from_secs(2));
        assert!((run.mb_per_second() - 1.0).abs() < 1e-9);
    }
}
