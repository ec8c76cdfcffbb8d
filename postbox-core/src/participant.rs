//! Participant identity for the two-party mailbox protocol.

use crate::error::{Error, Result};

/// One of the exactly two endpoints sharing a mailbox.
///
/// The discriminant is the wire value written into the mailbox `owner`
/// header word. Identities are fixed at setup and never renegotiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Participant {
    /// Wire value 1; conventionally the benchmark driver side.
    First = 1,
    /// Wire value 2; conventionally the echo responder side.
    Second = 2,
}

impl Participant {
    /// Returns the wire value of this participant.
    #[must_use]
    pub fn id(self) -> i32 {
        self as i32
    }

    /// Returns the opposite endpoint.
    #[must_use]
    pub fn peer(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }

    /// Parses a wire value into a participant.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParticipant`] for any value outside {1, 2}.
    pub fn from_id(value: i32) -> Result<Self> {
        match value {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            _ => Err(Error::InvalidParticipant { value }),
        }
    }
}

impl TryFrom<i32> for Participant {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        Self::from_id(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peer_is_involution() {
        assert_eq!(Participant::First.peer(), Participant::Second);
        assert_eq!(Participant::Second.peer(), Participant::First);
        assert_eq!(Participant::First.peer().peer(), Participant::First);
    }

    #[test]
    fn test_wire_values() {
        assert_eq!(Participant::First.id(), 1);
        assert_eq!(Participant::Second.id(), 2);
    }

    #[test]
    fn test_from_id_round_trip() {
        assert_eq!(Participant::from_id(1).unwrap(), Participant::First);
        assert_eq!(Participant::from_id(2).unwrap(), Participant::Second);
    }

    #[test]
    fn test_from_id_rejects_out_of_range() {
        for value in [0, 3, -1, i32::MAX] {
            assert!(matches!(
                Participant::from_id(value),
                Err(Error::InvalidParticipant { value: v }) if v == value
            ));
        }
    }
}
