//! System-V shared memory backing store.
//!
//! The segment is obtained with `shmget(IPC_PRIVATE)` and attached by both
//! views. Payload access stays behind copy-based read/write helpers rather
//! than long-lived references into the segment; header words are atomics
//! at fixed offsets. The creating view marks the segment for removal when
//! it drops, attached views only detach.

use postbox_core::error::{Error, Result};
use postbox_core::store::{BackingStore, HEADER_SIZE};
use std::io;
use std::ptr;
use std::sync::atomic::{AtomicI32, Ordering};
use tracing::{debug, warn};

/// Backing store over a System-V shared memory segment.
pub struct SysvStore {
    id: i32,
    base: *mut u8,
    size: usize,
    owner: bool,
}

// The base pointer is only dereferenced through &self/&mut self and the
// attachment lives as long as the store, so a view may move across threads.
unsafe impl Send for SysvStore {}

impl SysvStore {
    /// Obtains a private segment sized for `capacity` payload bytes and
    /// attaches it.
    ///
    /// The returned view owns the segment: dropping it marks the segment
    /// for removal.
    ///
    /// # Errors
    /// Returns [`Error::StorageUnavailable`] if the segment cannot be
    /// obtained or attached.
    pub fn create(capacity: usize) -> Result<Self> {
        let size = HEADER_SIZE + capacity;
        let id = unsafe {
            libc::shmget(
                libc::IPC_PRIVATE,
                size,
                libc::IPC_CREAT | libc::IPC_EXCL | 0o600,
            )
        };
        if id < 0 {
            return Err(Error::storage_unavailable(
                "shmget",
                io::Error::last_os_error(),
            ));
        }
        let base = attach_segment(id)?;
        debug!(id, size, "created System-V segment");
        Ok(Self {
            id,
            base,
            size,
            owner: true,
        })
    }

    /// Attaches an existing segment by kernel id.
    ///
    /// # Errors
    /// Returns [`Error::StorageUnavailable`] if the segment cannot be
    /// found or attached.
    pub fn attach(id: i32) -> Result<Self> {
        let mut ds: libc::shmid_ds = unsafe { std::mem::zeroed() };
        if unsafe { libc::shmctl(id, libc::IPC_STAT, &mut ds) } < 0 {
            return Err(Error::storage_unavailable(
                format!("shmctl(IPC_STAT) on segment {id}"),
                io::Error::last_os_error(),
            ));
        }
        let base = attach_segment(id)?;
        debug!(id, size = ds.shm_segsz as usize, "attached System-V segment");
        Ok(Self {
            id,
            base,
            size: ds.shm_segsz as usize,
            owner: false,
        })
    }

    /// Returns the kernel identifier of the segment.
    #[must_use]
    pub fn id(&self) -> i32 {
        self.id
    }

    // shmat returns a page-aligned base and header offsets are 4-aligned.
    fn word(&self, offset: usize) -> &AtomicI32 {
        debug_assert!(offset + 4 <= self.size && offset % 4 == 0);
        unsafe { &*(self.base.add(offset) as *const AtomicI32) }
    }

    fn shm_read(&self, offset: usize, buf: &mut [u8]) {
        debug_assert!(offset + buf.len() <= self.size);
        unsafe { ptr::copy_nonoverlapping(self.base.add(offset), buf.as_mut_ptr(), buf.len()) }
    }

    fn shm_write(&mut self, offset: usize, bytes: &[u8]) {
        debug_assert!(offset + bytes.len() <= self.size);
        unsafe { ptr::copy_nonoverlapping(bytes.as_ptr(), self.base.add(offset), bytes.len()) }
    }
}

fn attach_segment(id: i32) -> Result<*mut u8> {
    let addr = unsafe { libc::shmat(id, ptr::null(), 0) };
    if addr as isize == -1 {
        return Err(Error::storage_unavailable(
            format!("shmat on segment {id}"),
            io::Error::last_os_error(),
        ));
    }
    Ok(addr.cast())
}

impl BackingStore for SysvStore {
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
        self.shm_read(offset, buf);
        Ok(())
    }

    fn write_bytes(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        self.shm_write(offset, bytes);
        Ok(())
    }

    fn ensure_visible(&mut self) -> Result<()> {
        // An attached segment is coherent memory; nothing to flush.
        Ok(())
    }
}

impl Drop for SysvStore {
    fn drop(&mut self) {
        if unsafe { libc::shmdt(self.base.cast()) } < 0 {
            warn!(id = self.id, error = %io::Error::last_os_error(), "failed to detach segment");
        }
        if self.owner
            && unsafe { libc::shmctl(self.id, libc::IPC_RMID, ptr::null_mut()) } < 0
        {
            warn!(id = self.id, error = %io::Error::last_os_error(), "failed to remove segment");
        }
    }
}
