//! Shared regular file backing store.
//!
//! Every access is a positioned read or write syscall against the same
//! file; the kernel page cache is the cross-process coherence point. This
//! is the slowest transport by construction - the per-access syscall cost
//! is exactly what the benchmark compares against the memory transports.

use postbox_core::error::{Error, Result};
use postbox_core::store::{BackingStore, HEADER_SIZE};
use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::FileExt;
use std::path::Path;
use tracing::debug;

/// Backing store over a shared regular file.
///
/// Each participant opens its own `FileStore` on the same path; the two
/// handles meet in the page cache. A header word is a single 4-byte
/// positioned access within one page, which the kernel applies atomically
/// with respect to the peer's concurrent positioned reads.
pub struct FileStore {
    file: File,
    size: usize,
}

impl FileStore {
    /// Creates the backing file, zeroed and sized for `capacity` payload
    /// bytes.
    ///
    /// # Errors
    /// Returns [`Error::StorageUnavailable`] if the file cannot be created
    /// or sized.
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
        debug!(path = %path.display(), size, "created file store");
        Ok(Self { file, size })
    }

    /// Opens an existing backing file.
    ///
    /// # Errors
    /// Returns [`Error::StorageUnavailable`] if the file cannot be opened
    /// or is smaller than the mailbox header.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| Error::storage_unavailable(path.display().to_string(), e))?;
        let size = file
            .metadata()
            .map_err(|e| Error::storage_unavailable(path.display().to_string(), e))?
            .len() as usize;
        if size < HEADER_SIZE {
            return Err(Error::storage_unavailable(
                path.display().to_string(),
                io::Error::new(io::ErrorKind::InvalidData, "region smaller than mailbox header"),
            ));
        }
        debug!(path = %path.display(), size, "opened file store");
        Ok(Self { file, size })
    }
}

impl BackingStore for FileStore {
    fn region_size(&self) -> usize {
        self.size
    }

    fn load_word(&self, offset: usize) -> Result<i32> {
        let mut buf = [0u8; 4];
        self.file.read_exact_at(&mut buf, offset as u64)?;
        Ok(i32::from_le_bytes(buf))
    }

    fn store_word(&mut self, offset: usize, value: i32) -> Result<()> {
        self.file.write_all_at(&value.to_le_bytes(), offset as u64)?;
        Ok(())
    }

    fn read_bytes(&self, offset: usize, buf: &mut [u8]) -> Result<()> {
        self.file.read_exact_at(buf, offset as u64)?;
        Ok(())
    }

    fn write_bytes(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        self.file.write_all_at(bytes, offset as u64)?;
        Ok(())
    }

    fn ensure_visible(&mut self) -> Result<()> {
        // Positioned I/O has no user-space buffer to drain; writes land in
        // the shared page cache, which is where the peer's reads come from.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::run_session;
    use postbox_core::store::SIZE_OFFSET;
    use postbox_core::{Mailbox, Participant};
    use tempfile::tempdir;

    #[test]
    fn test_create_sizes_and_zeroes_the_region() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store");

        let store = FileStore::create(&path, 64).unwrap();
        assert_eq!(store.region_size(), HEADER_SIZE + 64);
        assert_eq!(store.load_word(SIZE_OFFSET).unwrap(), 0);
    }

    #[test]
    fn test_open_missing_file_is_storage_unavailable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing");
        assert!(matches!(
            FileStore::open(&path),
            Err(Error::StorageUnavailable { .. })
        ));
    }

    #[test]
    fn test_two_handles_share_the_region() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store");

        let mut writer = FileStore::create(&path, 64).unwrap();
        let reader = FileStore::open(&path).unwrap();
        assert_eq!(reader.region_size(), writer.region_size());

        writer.store_word(SIZE_OFFSET, 41).unwrap();
        writer.ensure_visible().unwrap();
        assert_eq!(reader.load_word(SIZE_OFFSET).unwrap(), 41);
    }

    #[test]
    fn test_file_pair_runs_the_protocol() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session");

        let first =
            Mailbox::create(FileStore::create(&path, 512).unwrap(), Participant::First).unwrap();
        let second = Mailbox::open(FileStore::open(&path).unwrap(), Participant::Second);

        let log = run_session(first, second);
        assert_eq!(log.responder_rounds as usize, log.echoes.len());
    }
}
