//! # Postbox Core
//!
//! The single-slot mailbox protocol at the heart of postbox.
//!
//! Exactly two participants share one message slot laid out as a fixed
//! header (`owner`, `size`) followed by a payload region. A participant may
//! only write while the slot is empty, and may only consume a message
//! written by its peer, so ownership of the slot alternates strictly
//! between the two sides with at most one unread message in flight. All
//! waiting is a busy-wait poll on the shared header; closing writes a
//! terminal sentinel both sides converge on.
//!
//! The protocol is transport-agnostic: it drives any
//! [`store::BackingStore`], which supplies raw addressable storage plus a
//! cross-process visibility hook. The adapters for real transports (shared
//! file, shared mapping, System-V segment) live in `postbox-transport`.
//!
//! ## Crate Organization
//!
//! - [`mailbox`] - The send/receive/close state machine
//! - [`store`] - Backing store capability trait and shared layout
//! - [`participant`] - Two-valued endpoint identity
//! - [`wait`] - Pluggable busy-wait policies
//! - [`mem`] - Process-local heap store for tests and in-process use
//! - [`error`] - Error taxonomy shared across the workspace

pub mod error;
pub mod mailbox;
pub mod mem;
pub mod participant;
pub mod store;
pub mod wait;

pub use error::{Error, Result};
pub use mailbox::{Mailbox, Received};
pub use mem::HeapStore;
pub use participant::Participant;
pub use store::BackingStore;
pub use wait::{SpinWait, WaitPolicy, YieldWait};
