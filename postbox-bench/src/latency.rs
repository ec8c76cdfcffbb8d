//! Round-trip latency collection.

use std::time::Duration;

/// Summary statistics over one latency experiment.
#[derive(Debug, Clone)]
pub struct LatencyStats {
    /// Minimum one-way latency.
    pub min: Duration,
    /// Mean one-way latency.
    pub mean: Duration,
    /// Median one-way latency.
    pub median: Duration,
    /// 99th percentile one-way latency.
    pub p99: Duration,
    /// Maximum one-way latency.
    pub max: Duration,
    /// Sample count.
    pub count: usize,
}

/// Collects one-way latency samples from timed round trips.
///
/// A ping-pong round trip crosses the transport twice, so each recorded
/// round trip contributes half its duration as one sample.
pub struct LatencyCollector {
    samples: Vec<Duration>,
}

impl LatencyCollector {
    /// Creates a collector pre-sized for the expected number of rounds.
    #[must_use]
    pub fn with_capacity(rounds: usize) -> Self {
        Self {
            samples: Vec::with_capacity(rounds),
        }
    }

    /// Records one timed round trip.
    pub fn record_round_trip(&mut self, round_trip: Duration) {
        self.samples.push(round_trip / 2);
    }

    /// Returns the number of recorded samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Consumes the collector and computes summary statistics.
    ///
    /// Returns `None` when no samples were recorded.
    #[must_use]
    pub fn stats(mut self) -> Option<LatencyStats> {
        if self.samples.is_empty() {
            return None;
        }

        self.samples.sort();
        let count = self.samples.len();
        let total: Duration = self.samples.iter().sum();

        Some(LatencyStats {
            min: self.samples[0],
            mean: total / count as u32,
            median: self.samples[count / 2],
            p99: self.samples[(count * 99) / 100],
            max: self.samples[count - 1],
            count,
        })
    }
}
