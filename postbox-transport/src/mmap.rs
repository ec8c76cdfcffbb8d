//! Memory-mapped backing store.
//!
//! A shared file-backed mapping per participant view. Header words are
//! atomic loads and stores straight into the mapping, payload moves as a
//! slice copy, and nothing needs flushing: processes sharing the mapping
//! see each other's writes immediately.

use memmap2::{MmapMut, MmapOptions};
use postbox_core::error::{Error, Result};
use postbox_core::store::{BackingStore, HEADER_SIZE};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicI32, Ordering};
use tracing::debug;

/// Backing store over a shared file-backed mapping.
pub struct MmapStore {
    mmap: MmapMut,
    size: usize,
}

impl MmapStore {
    /// Creates the backing file, zeroes it, and maps it.
    ///
    /// # Errors
    /// Returns [`Error::StorageUnavailable`] if the file cannot be created
    /// or mapped.
    pub fn create(path: &Path, capacity: usize) -> Result<Self> {
        let size = HEADER_SIZE + capacity;
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| Error::storage_unavailable(path.display().to_string(), e))?;
        file.set_len(size as u64)
            .map_err(|e| Error::storage_unavailable(path.display().to_string(), e))?;

        let mut mmap = unsafe { MmapOptions::new().map_mut(&file) }
            .map_err(|e| Error::storage_unavailable(path.display().to_string(), e))?;
        mmap.fill(0);

        debug!(path = %path.display(), size, "created mmap store");
        Ok(Self { mmap, size })
    }

    /// Maps an existing backing file.
    ///
    /// # Errors
    /// Returns [`Error::StorageUnavailable`] if the file cannot be opened
    /// or mapped, or is smaller than the mailbox header.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| Error::storage_unavailable(path.display().to_string(), e))?;

        let mmap = unsafe { MmapOptions::new().map_mut(&file) }
            .map_err(|e| Error::storage_unavailable(path.display().to_string(), e))?;
        let size = mmap.len();
        if size < HEADER_SIZE {
            return Err(Error::storage_unavailable(
                path.display().to_string(),
                io::Error::new(io::ErrorKind::InvalidData, "region smaller than mailbox header"),
            ));
        }

        debug!(path = %path.display(), size, "opened mmap store");
        Ok(Self { mmap, size })
    }

    // Header offsets are 4-aligned and the mapping is page-aligned, so the
    // cast yields a properly aligned atomic.
    fn word(&self, offset: usize) -> &AtomicI32 {
        debug_assert!(offset + 4 <= self.size && offset % 4 == 0);
        unsafe { &*(self.mmap.as_ptr().add(offset) as *const AtomicI32) }
    }
}

impl BackingStore for MmapStore {
    fn region_size(&self) -> usize {
        self.size
    }

    fn load_word(&self, offset: usize) -> Result<i32> {
        Ok(self.word(offset).load(Ordering::Acquire))
    }

    fn store_word(&mut self, offset: usize, value: i32) -> Result<()> {
        self.word(offset).store(value, Ordering::Release);
        Ok(())
    }

    fn read_bytes(&self, offset: usize, buf: &mut [u8]) -> Result<()> {
        buf.copy_from_slice(&self.mmap[offset..offset + buf.len()]);
        Ok(())
    }

    fn write_bytes(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        self.mmap[offset..offset + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    fn ensure_visible(&mut self) -> Result<()> {
        // The mapping is coherent across every process sharing it.
        Ok(())
    }
}
