//! Scripted card for protocol tests

#![allow(dead_code)]

use std::collections::VecDeque;

use dnie_apdu_core::{Bytes, CardTransport, LengthWidth, TransportError};

/// Header prefixes of the commands the protocols send
pub mod header {
    pub const SELECT_PKI: &str = "00a40400";
    pub const SELECT_FILE: &str = "00a40204";
    pub const READ: &str = "00b10000";
    pub const VERIFY_SIGNATURE_PIN: &str = "00200081";
    pub const MSE: &str = "002241b6";
    pub const PSO: &str = "002a9e9a";
}

/// Transport answering each command with the next response queued for the first
/// rule whose header prefix matches the outgoing frame
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    rules: Vec<(Vec<u8>, VecDeque<Bytes>)>,
    /// Every frame sent, in order
    pub sent: Vec<Bytes>,
    width: LengthWidth,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response (hex, status word included) for frames starting with `prefix` (hex)
    pub fn on(mut self, prefix: &str, response: &str) -> Self {
        let prefix = hex::decode(prefix).expect("valid prefix hex");
        let response = Bytes::from(hex::decode(response).expect("valid response hex"));

        match self.rules.iter_mut().find(|(p, _)| *p == prefix) {
            Some((_, queue)) => queue.push_back(response),
            None => self.rules.push((prefix, VecDeque::from([response]))),
        }
        self
    }

    pub fn with_width(mut self, width: LengthWidth) -> Self {
        self.width = width;
        self
    }

    /// Frames sent whose header matches `prefix`
    pub fn sent_with(&self, prefix: &str) -> Vec<String> {
        self.sent
            .iter()
            .map(hex::encode)
            .filter(|frame| frame.starts_with(prefix))
            .collect()
    }

    /// Hex of every frame sent
    pub fn sent_hex(&self) -> Vec<String> {
        self.sent.iter().map(hex::encode).collect()
    }
}

impl CardTransport for ScriptedTransport {
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        self.sent.push(Bytes::copy_from_slice(command));

        self.rules
            .iter_mut()
            .find(|(prefix, _)| command.starts_with(prefix))
            .and_then(|(_, queue)| queue.pop_front())
            .ok_or_else(|| TransportError::other(format!("unscripted command {}", hex::encode(command))))
    }

    fn length_width(&self) -> LengthWidth {
        self.width
    }

    fn is_connected(&self) -> bool {
        true
    }

    fn reset(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}

/// A `53 81 E4` framed chunk of `len` bytes filled with `fill`, followed by `status`
pub fn chunk(fill: u8, len: usize, status: &str) -> String {
    format!("5381e4{}{}", hex::encode(vec![fill; len]), status)
}
