//! Shared helpers for adapter tests.

use postbox_core::{BackingStore, Mailbox, Participant, Received};
use std::thread;

/// Everything the first participant observes during a scripted session.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct SessionLog {
    /// Echoed payloads, in order.
    pub echoes: Vec<Vec<u8>>,
    /// Number of messages the responder echoed before observing the close.
    pub responder_rounds: u32,
}

/// Drives a fixed send/echo/close script over a pair of mailbox views.
///
/// The second view echoes from a spawned thread until it observes the
/// close; the first view sends three payloads of different sizes, collects
/// the echoes, then closes. Identical observable behavior across adapters
/// is exactly what the transports promise.
pub(crate) fn run_session<S>(mut first: Mailbox<S>, mut second: Mailbox<S>) -> SessionLog
where
    S: BackingStore + Send + 'static,
{
    assert_eq!(first.participant(), Participant::First);
    assert_eq!(second.participant(), Participant::Second);

    let responder = thread::spawn(move || {
        let mut buf = [0u8; 512];
        let mut rounds = 0u32;
        loop {
            match second.receive(&mut buf).unwrap() {
                Received::Message(n) => {
                    second.send(&buf[..n]).unwrap();
                    rounds += 1;
                }
                Received::Closed => return rounds,
            }
        }
    });

    let payloads: Vec<Vec<u8>> = vec![
        (0u8..128).collect(),
        b"ab".to_vec(),
        vec![0xFF; 300],
    ];

    let mut echoes = Vec::new();
    let mut buf = [0u8; 512];
    for payload in &payloads {
        first.send(payload).unwrap();
        match first.receive(&mut buf).unwrap() {
            Received::Message(n) => echoes.push(buf[..n].to_vec()),
            Received::Closed => panic!("responder closed the mailbox mid-session"),
        }
    }
    first.close().unwrap();

    let responder_rounds = responder.join().unwrap();
    assert_eq!(echoes, payloads);
    SessionLog {
        echoes,
        responder_rounds,
    }
}
