//! # Postbox
//!
//! Measures and compares three same-host IPC transports - a shared regular
//! file, a shared memory mapping, and a System-V shared memory segment -
//! under one single-slot ping-pong mailbox protocol.
//!
//! The protocol is the interesting part: a minimal mailbox whose header
//! guarantees at-most-one unread message in flight and strict turn
//! alternation between exactly two participants, with busy-wait polling as
//! the only suspension mechanism. Each transport supplies the same byte
//! layout through a backing store trait; the benchmark compares what the
//! transports cost, not what they do.
//!
//! ## Quick Start
//!
//! ```
//! use postbox::prelude::*;
//!
//! let store = HeapStore::with_payload_capacity(128);
//! let mut first = Mailbox::create(store.clone(), Participant::First)?;
//! let mut second = Mailbox::open(store, Participant::Second);
//!
//! first.send(b"ping")?;
//! let mut buf = [0u8; 128];
//! assert_eq!(second.receive(&mut buf)?, Received::Message(4));
//! assert_eq!(&buf[..4], b"ping");
//! # Ok::<(), postbox::Error>(())
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Mailbox protocol, participant identity, store and wait traits
//! - [`transport`] - Backing store adapters (file, mmap, System-V)
//! - [`bench`] - Fork-based benchmark driver and comparison reporting

pub mod prelude;

/// Mailbox protocol, participant identity, and backing store traits.
pub mod core {
    pub use postbox_core::*;
}

/// Backing store adapters: shared file, shared mapping, System-V segment.
pub mod transport {
    pub use postbox_transport::*;
}

/// Benchmark driver, experiments, and reporting.
pub mod bench {
    pub use postbox_bench::*;
}

// Re-export commonly used items at the crate root
pub use postbox_core::{
    Error, HeapStore, Mailbox, Participant, Received, Result, SpinWait, WaitPolicy, YieldWait,
};

pub use postbox_bench::{BenchConfig, TransportReport, run_comparison, run_forked};
pub use postbox_transport::{FileStore, MmapStore, SysvStore};
