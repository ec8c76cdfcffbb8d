//! Process-local heap store.
//!
//! Backs a mailbox with a plain heap buffer shared between cloned views,
//! for unit tests and in-process benchmarks where the two participants are
//! threads rather than processes. The mutex serializes every access, which
//! trivially satisfies the no-tearing requirement on header words.

use crate::error::Result;
use crate::store::{BackingStore, HEADER_SIZE};
use parking_lot::Mutex;
use std::sync::Arc;

/// Heap-backed store shared between cloned views.
///
/// Cloning yields a second view of the same region, so one `HeapStore` per
/// participant plays the role the transport adapters play across
/// processes.
#[derive(Clone)]
pub struct HeapStore {
    region: Arc<Mutex<Box<[u8]>>>,
    size: usize,
}

impl HeapStore {
    /// Allocates a zeroed region able to hold `capacity` payload bytes.
    #[must_use]
    pub fn with_payload_capacity(capacity: usize) -> Self {
        let size = HEADER_SIZE + capacity;
        Self {
            region: Arc::new(Mutex::new(vec![0u8; size].into_boxed_slice())),
            size,
        }
    }
}

impl BackingStore for HeapStore {
    fn region_size(&self) -> usize {
        self.size
    }

    fn load_word(&self, offset: usize) -> Result<i32> {
        let region = self.region.lock();
        Ok(i32::from_le_bytes([
            region[offset],
            region[offset + 1],
            region[offset + 2],
            region[offset + 3],
        ]))
    }

    fn store_word(&mut self, offset: usize, value: i32) -> Result<()> {
        let mut region = self.region.lock();
        region[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    fn read_bytes(&self, offset: usize, buf: &mut [u8]) -> Result<()> {
        let region = self.region.lock();
        buf.copy_from_slice(&region[offset..offset + buf.len()]);
        Ok(())
    }

    fn write_bytes(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        let mut region = self.region.lock();
        region[offset..offset + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    fn ensure_visible(&mut self) -> Result<()> {
        // Same address space; nothing to flush.
        Ok(())
    }
}
