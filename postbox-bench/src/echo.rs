//! Echo responder loop.

use postbox_core::{BackingStore, Mailbox, Received, Result, WaitPolicy};

/// Echoes every received message back until the mailbox closes.
///
/// Termination is signaled exclusively by the protocol's close sentinel;
/// the driver ends a run by closing its own view. Returns the number of
/// messages echoed.
///
/// # Errors
/// Propagates store access failures from either direction.
pub fn echo_until_closed<S, W>(mailbox: &mut Mailbox<S, W>, scratch: &mut [u8]) -> Result<u64>
where
    S: BackingStore,
    W: WaitPolicy,
{
    let mut echoed = 0u64;
    loop {
        match mailbox.receive(scratch)? {
            Received::Message(n) => {
                mailbox.send(&scratch[..n])?;
                echoed += 1;
            }
            Received::Closed => return Ok(echoed),
        }
    }
}
