//! # Postbox Transport
//!
//! Backing store adapters for the postbox mailbox protocol.
//!
//! Each adapter exposes the same fixed byte layout to the protocol and
//! differs only in where the bytes live and what it costs to make a write
//! visible to the peer process:
//!
//! - [`file`] - a shared regular file; every access is a positioned
//!   syscall and the page cache is the coherence point
//! - [`mmap`] - a shared file-backed mapping; header words are atomics
//!   straight into coherent memory
//! - [`sysv`] - a System-V segment; same coherence as the mapping but all
//!   access stays behind copy-based read/write indirection

pub mod file;
pub mod mmap;
pub mod sysv;

pub use file::FileStore;
pub use mmap::MmapStore;
pub use sysv::SysvStore;

#[cfg(test)]
mod testutil;
