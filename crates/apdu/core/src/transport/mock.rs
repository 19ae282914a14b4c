//! Scripted transport for tests

use std::collections::VecDeque;

use bytes::Bytes;

use super::{CardTransport, TransportError};

/// Replays queued answers and records every frame it is given
///
/// A default mock is disconnected. A connected mock whose queue has drained
/// fails with [`TransportError::Transmission`].
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    /// Answers still to be returned
    pub script: VecDeque<Result<Bytes, TransportError>>,
    /// Frames received so far
    pub commands: Vec<Bytes>,
    /// Whether a card is present
    pub connected: bool,
}

impl MockTransport {
    /// Connected mock answering with `responses` in order
    pub fn new<I, B>(responses: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        Self {
            script: responses.into_iter().map(|r| Ok(r.into())).collect(),
            commands: Vec::new(),
            connected: true,
        }
    }

    /// Queue an answer (data followed by SW1 SW2)
    pub fn respond(&mut self, response: impl Into<Bytes>) -> &mut Self {
        self.script.push_back(Ok(response.into()));
        self
    }

    /// Queue a transport failure
    pub fn fail(&mut self, error: TransportError) -> &mut Self {
        self.script.push_back(Err(error));
        self
    }

    /// Number of frames received
    pub fn sent(&self) -> usize {
        self.commands.len()
    }
}

impl CardTransport for MockTransport {
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        if !self.connected {
            return Err(TransportError::Connection);
        }
        self.commands.push(Bytes::copy_from_slice(command));
        self.script
            .pop_front()
            .unwrap_or(Err(TransportError::Transmission))
    }
}
