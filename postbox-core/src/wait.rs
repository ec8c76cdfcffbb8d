//! Pluggable wait policies for the mailbox busy-wait loops.
//!
//! The protocol's only suspension point is a poll on the shared header.
//! The default policy spins with a CPU relax hint and never sleeps; the
//! benchmark exists to measure exactly that discipline, so substituting a
//! policy must not change any mailbox invariant.

/// Strategy applied between polls of the shared header.
pub trait WaitPolicy {
    /// Called once after each failed poll.
    fn pause(&self);
}

/// Pure busy spin with a CPU relax hint.
///
/// Consumes 100% of a core while waiting and has no timeout: a participant
/// whose peer never responds spins until the peer closes the mailbox.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpinWait;

impl WaitPolicy for SpinWait {
    #[inline(always)]
    fn pause(&self) {
        std::hint::spin_loop();
    }
}

/// Spin that yields the scheduler slice between polls.
///
/// Trades wait latency for CPU time; useful when the two participants may
/// share a core.
#[derive(Debug, Default, Clone, Copy)]
pub struct YieldWait;

impl WaitPolicy for YieldWait {
    #[inline]
    fn pause(&self) {
        std::thread::yield_now();
    }
}
