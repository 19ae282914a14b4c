//! Byte-level link to a card
//!
//! A transport turns one command frame into one response frame ending in the
//! two status bytes. It knows nothing about GET RESPONSE or file structure.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

use std::fmt;

use bytes::Bytes;
pub use error::TransportError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;
use tracing::{debug, trace};

/// A connected card reader
pub trait CardTransport: Send + fmt::Debug {
    /// Send a frame and wait for the answer, tracing both directions
    fn transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        trace!(command = %hex::encode_upper(command), ">>");
        let result = self.do_transmit_raw(command);
        match &result {
            Ok(response) => trace!(response = %hex::encode_upper(response), "<<"),
            Err(e) => debug!(error = %e, "Transmission failed"),
        }
        result
    }

    /// Backend-specific send and receive
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError>;
}

impl<T: CardTransport + ?Sized> CardTransport for &mut T {
    fn transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        (**self).transmit_raw(command)
    }

    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        (**self).do_transmit_raw(command)
    }
}
