//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use postbox::prelude::*;
//! ```

// Protocol types
pub use postbox_core::error::{Error, Result};
pub use postbox_core::mailbox::{Mailbox, Received};
pub use postbox_core::mem::HeapStore;
pub use postbox_core::participant::Participant;
pub use postbox_core::store::BackingStore;
pub use postbox_core::wait::{SpinWait, WaitPolicy, YieldWait};

// Transport adapters
pub use postbox_transport::{FileStore, MmapStore, SysvStore};

// Benchmark driver
pub use postbox_bench::{
    BenchConfig, LatencyCollector, LatencyStats, ThroughputRun, TransportReport,
    echo_until_closed, run_comparison, run_forked,
};
