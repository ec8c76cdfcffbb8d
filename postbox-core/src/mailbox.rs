//! Single-slot ping-pong mailbox.
//!
//! One participant's view of the shared slot described in [`crate::store`].
//! A send is only possible while the slot is empty, and a receive only
//! consumes a message written by the peer, so the two sides alternate
//! strictly and at most one unread message is ever in flight. Waiting is a
//! busy poll through the configured [`WaitPolicy`]; there is no timeout and
//! no cancellation. The only way out of a wait is the peer acting, or
//! either side closing the mailbox.

use crate::error::{Error, Result};
use crate::participant::Participant;
use crate::store::{
    BackingStore, HEADER_SIZE, OWNER_OFFSET, PAYLOAD_OFFSET, SIZE_OFFSET, SLOT_CLOSED, SLOT_EMPTY,
};
use crate::wait::{SpinWait, WaitPolicy};

/// Outcome of [`Mailbox::receive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Received {
    /// A message of the given length was copied into the caller's buffer.
    Message(usize),
    /// The mailbox is closed; no further messages will ever arrive.
    Closed,
}

/// One participant's view of a shared single-slot mailbox.
///
/// The mailbox borrows typed access to the backing region through `S` and
/// never manages the resource's lifecycle; creating, sharing, and tearing
/// down the region is the caller's job.
pub struct Mailbox<S, W = SpinWait> {
    store: S,
    me: Participant,
    wait: W,
    closed: bool,
}

impl<S: BackingStore> Mailbox<S, SpinWait> {
    /// Creates a view over a fresh region, initializing the header to the
    /// empty state.
    ///
    /// Exactly one side of a pair should `create`; the other side
    /// [`open`](Self::open)s the already-initialized region.
    ///
    /// # Errors
    /// Propagates store errors from the header initialization.
    pub fn create(store: S, me: Participant) -> Result<Self> {
        Self::create_with_policy(store, me, SpinWait)
    }

    /// Creates a view over an already-initialized region.
    #[must_use]
    pub fn open(store: S, me: Participant) -> Self {
        Self::open_with_policy(store, me, SpinWait)
    }
}

impl<S: BackingStore, W: WaitPolicy> Mailbox<S, W> {
    /// [`create`](Mailbox::create) with an explicit wait policy.
    ///
    /// # Errors
    /// Propagates store errors from the header initialization.
    pub fn create_with_policy(mut store: S, me: Participant, wait: W) -> Result<Self> {
        store.store_word(OWNER_OFFSET, me.id())?;
        store.store_word(SIZE_OFFSET, SLOT_EMPTY)?;
        store.ensure_visible()?;
        Ok(Self::open_with_policy(store, me, wait))
    }

    /// [`open`](Mailbox::open) with an explicit wait policy.
    #[must_use]
    pub fn open_with_policy(store: S, me: Participant, wait: W) -> Self {
        Self {
            store,
            me,
            wait,
            closed: false,
        }
    }

    /// Returns this view's participant identity.
    #[must_use]
    pub fn participant(&self) -> Participant {
        self.me
    }

    /// Returns the payload capacity of the slot in bytes.
    #[must_use]
    pub fn payload_capacity(&self) -> usize {
        self.store.region_size().saturating_sub(HEADER_SIZE)
    }

    /// Returns true once this view has observed or initiated a close.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Sends one message, waiting for the slot to free up.
    ///
    /// Spins until the slot is empty, writes the payload, then publishes
    /// `size` and `owner`. If the peer has closed the mailbox, before or
    /// during the wait, the view is marked closed and the call returns
    /// without writing; the swallowed send is deliberate, not an error.
    /// The same applies when this view is already closed.
    ///
    /// # Errors
    /// Returns [`Error::EmptyPayload`] for zero-length payloads,
    /// [`Error::PayloadTooLarge`] when the payload exceeds the slot, and
    /// propagates store access failures.
    pub fn send(&mut self, payload: &[u8]) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        if payload.is_empty() {
            return Err(Error::EmptyPayload);
        }
        // The size header word also bounds a representable message.
        let capacity = self.payload_capacity().min(i32::MAX as usize);
        if payload.len() > capacity {
            return Err(Error::payload_too_large(payload.len(), capacity));
        }

        loop {
            let size = self.store.load_word(SIZE_OFFSET)?;
            if size == SLOT_CLOSED {
                self.closed = true;
                return Ok(());
            }
            if size == SLOT_EMPTY {
                break;
            }
            self.wait.pause();
        }

        // Payload first; the peer only looks at it after observing the
        // header words published below.
        self.store.write_bytes(PAYLOAD_OFFSET, payload)?;
        self.store.store_word(SIZE_OFFSET, payload.len() as i32)?;
        self.store.store_word(OWNER_OFFSET, self.me.id())?;
        self.store.ensure_visible()
    }

    /// Receives one message from the peer, waiting for one to arrive.
    ///
    /// Spins until the slot holds a message whose `owner` is the peer; a
    /// message tagged with the caller's own identity is never consumed.
    /// On success the payload is copied into `buf`, the slot is reset to
    /// empty, and `owner` is set to the caller to mark the consumption.
    ///
    /// # Errors
    /// Returns [`Error::BufferTooShort`] when `buf` cannot hold the
    /// pending message (the message stays in the slot), and propagates
    /// store access failures.
    pub fn receive(&mut self, buf: &mut [u8]) -> Result<Received> {
        if self.closed {
            return Ok(Received::Closed);
        }

        let size = loop {
            let owner = self.store.load_word(OWNER_OFFSET)?;
            let size = self.store.load_word(SIZE_OFFSET)?;
            if size == SLOT_CLOSED {
                break size;
            }
            if size != SLOT_EMPTY && owner != self.me.id() {
                break size;
            }
            self.wait.pause();
        };

        if size == SLOT_CLOSED {
            self.closed = true;
            return Ok(Received::Closed);
        }

        let len = size as usize;
        if buf.len() < len {
            return Err(Error::buffer_too_short(len, buf.len()));
        }

        self.store.read_bytes(PAYLOAD_OFFSET, &mut buf[..len])?;
        // Tag the consumer before freeing the slot: the peer unblocks on
        // `size == 0`, and by then this owner word must already be down,
        // or it could overwrite the peer's next publication.
        self.store.store_word(OWNER_OFFSET, self.me.id())?;
        self.store.store_word(SIZE_OFFSET, SLOT_EMPTY)?;
        self.store.ensure_visible()?;
        Ok(Received::Message(len))
    }

    /// Closes the mailbox permanently.
    ///
    /// Idempotent. Writes the terminal sentinel into the slot; both sides
    /// converge on it and every subsequent `send`/`receive` on either view
    /// terminates without error. The wire state does not distinguish which
    /// side closed.
    ///
    /// # Errors
    /// Propagates store access failures.
    pub fn close(&mut self) -> Result<()> {
        self.closed = true;
        self.store.store_word(SIZE_OFFSET, SLOT_CLOSED)?;
        self.store.ensure_visible()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mem::HeapStore;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;

    fn pair(capacity: usize) -> (Mailbox<HeapStore>, Mailbox<HeapStore>, HeapStore) {
        let store = HeapStore::with_payload_capacity(capacity);
        let peek = store.clone();
        let first = Mailbox::create(store.clone(), Participant::First).unwrap();
        let second = Mailbox::open(store, Participant::Second);
        (first, second, peek)
    }

    #[test]
    fn test_create_initializes_empty_slot() {
        let (first, _second, peek) = pair(64);
        assert_eq!(peek.load_word(SIZE_OFFSET).unwrap(), SLOT_EMPTY);
        assert_eq!(first.payload_capacity(), 64);
        assert!(!first.is_closed());
    }

    #[test]
    fn test_concrete_128_byte_round_trip() {
        let (mut first, mut second, _peek) = pair(256);
        let data: Vec<u8> = (0u8..128).collect();

        first.send(&data).unwrap();

        let mut relay = [0u8; 256];
        assert_eq!(second.receive(&mut relay).unwrap(), Received::Message(128));
        assert_eq!(&relay[..128], &data[..]);

        second.send(&relay[..128]).unwrap();

        let mut echo = [0u8; 256];
        assert_eq!(first.receive(&mut echo).unwrap(), Received::Message(128));
        assert_eq!(&echo[..128], &data[..]);
    }

    #[test]
    fn test_send_and_consume_update_owner_tag() {
        let (mut first, mut second, peek) = pair(64);

        first.send(b"ping").unwrap();
        assert_eq!(peek.load_word(OWNER_OFFSET).unwrap(), 1);
        assert_eq!(peek.load_word(SIZE_OFFSET).unwrap(), 4);

        let mut buf = [0u8; 64];
        assert_eq!(second.receive(&mut buf).unwrap(), Received::Message(4));
        // Consumption resets the slot and tags the consumer.
        assert_eq!(peek.load_word(OWNER_OFFSET).unwrap(), 2);
        assert_eq!(peek.load_word(SIZE_OFFSET).unwrap(), SLOT_EMPTY);
    }

    #[test]
    fn test_second_send_blocks_until_peer_consumes() {
        let (mut first, mut second, _peek) = pair(64);

        let both_sent = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&both_sent);
        let sender = thread::spawn(move || {
            first.send(b"one").unwrap();
            first.send(b"two").unwrap();
            flag.store(true, Ordering::SeqCst);
        });

        thread::sleep(Duration::from_millis(50));
        assert!(
            !both_sent.load(Ordering::SeqCst),
            "second send completed before the peer consumed the first"
        );

        let mut buf = [0u8; 64];
        assert_eq!(second.receive(&mut buf).unwrap(), Received::Message(3));
        assert_eq!(&buf[..3], b"one");

        sender.join().unwrap();
        assert!(both_sent.load(Ordering::SeqCst));

        assert_eq!(second.receive(&mut buf).unwrap(), Received::Message(3));
        assert_eq!(&buf[..3], b"two");
    }

    #[test]
    fn test_threaded_ping_pong_terminates_on_close() {
        let (mut first, mut second, _peek) = pair(64);

        let responder = thread::spawn(move || {
            let mut buf = [0u8; 64];
            let mut echoed = 0u32;
            loop {
                match second.receive(&mut buf).unwrap() {
                    Received::Message(n) => {
                        second.send(&buf[..n]).unwrap();
                        echoed += 1;
                    }
                    Received::Closed => return echoed,
                }
            }
        });

        let mut buf = [0u8; 64];
        for round in 0u8..10 {
            let payload = [round; 8];
            first.send(&payload).unwrap();
            assert_eq!(first.receive(&mut buf).unwrap(), Received::Message(8));
            assert_eq!(&buf[..8], &payload[..]);
        }

        first.close().unwrap();
        assert_eq!(responder.join().unwrap(), 10);
    }

    #[test]
    fn test_close_is_idempotent_and_terminal() {
        let (mut first, mut second, _peek) = pair(64);

        first.close().unwrap();
        first.close().unwrap();
        second.close().unwrap();

        let mut buf = [0u8; 64];
        assert_eq!(first.receive(&mut buf).unwrap(), Received::Closed);
        assert_eq!(second.receive(&mut buf).unwrap(), Received::Closed);
        first.send(b"late").unwrap();
        second.send(b"late").unwrap();
        assert_eq!(second.receive(&mut buf).unwrap(), Received::Closed);
    }

    #[test]
    fn test_peer_observes_close_without_closing() {
        let (mut first, mut second, _peek) = pair(64);

        first.close().unwrap();

        let mut buf = [0u8; 64];
        assert_eq!(second.receive(&mut buf).unwrap(), Received::Closed);
        assert!(second.is_closed());
    }

    #[test]
    fn test_send_after_peer_close_is_swallowed() {
        let (mut first, mut second, peek) = pair(64);

        second.close().unwrap();
        first.send(b"into the void").unwrap();

        assert!(first.is_closed());
        // The slot still holds the close sentinel, not the payload.
        assert_eq!(peek.load_word(SIZE_OFFSET).unwrap(), SLOT_CLOSED);
    }

    #[test]
    fn test_zero_length_payload_rejected() {
        let (mut first, _second, _peek) = pair(64);
        assert!(matches!(first.send(b""), Err(Error::EmptyPayload)));
    }

    #[test]
    fn test_oversized_payload_rejected() {
        let (mut first, _second, peek) = pair(16);
        let payload = [7u8; 17];
        assert!(matches!(
            first.send(&payload),
            Err(Error::PayloadTooLarge {
                size: 17,
                capacity: 16
            })
        ));
        // Nothing was published.
        assert_eq!(peek.load_word(SIZE_OFFSET).unwrap(), SLOT_EMPTY);
    }

    #[test]
    fn test_receive_into_short_buffer_fails_without_consuming() {
        let (mut first, mut second, peek) = pair(64);

        first.send(&[9u8; 16]).unwrap();

        let mut short = [0u8; 8];
        assert!(matches!(
            second.receive(&mut short),
            Err(Error::BufferTooShort {
                required: 16,
                available: 8
            })
        ));
        // The message is still pending for a correctly sized retry.
        assert_eq!(peek.load_word(SIZE_OFFSET).unwrap(), 16);

        let mut buf = [0u8; 64];
        assert_eq!(second.receive(&mut buf).unwrap(), Received::Message(16));
    }
}
