//! Error types for mailbox and backing store operations.

use thiserror::Error;

/// Error type shared across the postbox workspace.
///
/// A closed mailbox is not an error: `receive` reports it through
/// [`crate::mailbox::Received::Closed`] and `send` treats it as a silent
/// no-op.
#[derive(Debug, Error)]
pub enum Error {
    /// Backing resource could not be obtained at setup time.
    ///
    /// Fatal; callers have no recovery path other than aborting the run.
    #[error("storage unavailable: {resource}: {source}")]
    StorageUnavailable {
        /// The resource or call that failed (file path, segment, syscall).
        resource: String,
        /// Underlying OS error.
        source: std::io::Error,
    },

    /// Receive buffer is too small for the pending message.
    #[error("buffer too short: required {required} bytes, available {available} bytes")]
    BufferTooShort {
        /// Pending message length in bytes.
        required: usize,
        /// Caller buffer length in bytes.
        available: usize,
    },

    /// Zero-length sends are rejected: under the slot encoding an empty
    /// message is bit-identical to the empty-slot sentinel.
    #[error("empty payload: a zero-length message is indistinguishable from an empty slot")]
    EmptyPayload,

    /// Payload does not fit the mailbox slot.
    #[error("payload too large: {size} bytes exceeds slot capacity {capacity} bytes")]
    PayloadTooLarge {
        /// Payload length in bytes.
        size: usize,
        /// Slot capacity in bytes.
        capacity: usize,
    },

    /// Participant identity outside the two valid wire values.
    #[error("invalid participant id: {value} (expected 1 or 2)")]
    InvalidParticipant {
        /// Value encountered.
        value: i32,
    },

    /// IO error from a backing store access.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a storage unavailable error.
    pub fn storage_unavailable(resource: impl Into<String>, source: std::io::Error) -> Self {
        Self::StorageUnavailable {
            resource: resource.into(),
            source,
        }
    }

    /// Creates a buffer too short error.
    pub fn buffer_too_short(required: usize, available: usize) -> Self {
        Self::BufferTooShort {
            required,
            available,
        }
    }

    /// Creates a payload too large error.
    pub fn payload_too_large(size: usize, capacity: usize) -> Self {
        Self::PayloadTooLarge { size, capacity }
    }
}

/// Result type alias for postbox operations.
pub type Result<T> = std::result::Result<T, Error>;
