//! Record codecs
//!
//! Decoders for the two record formats read from the SIM: phonebook entries
//! ([`adn`]) and short message PDUs ([`sms`]), plus the nibble and 7-bit
//! packing helpers they share.

pub mod adn;
pub mod bcd;
pub mod gsm7;
pub mod sms;

pub use adn::{ContactEntry, decode_contact};
pub use sms::{SmsBody, SmsPdu, SmsRecord, SmsStatus, decode_sms};

use crate::DecodeError;

/// Forward-only reader over a byte slice
#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    data: &'a [u8],
}

impl<'a> Cursor<'a> {
    pub(crate) const fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Take exactly `n` bytes
    pub(crate) fn take(&mut self, field: &'static str, n: usize) -> Result<&'a [u8], DecodeError> {
        if self.data.len() < n {
            return Err(DecodeError::Truncated {
                field,
                needed: n,
                available: self.data.len(),
            });
        }
        let (head, tail) = self.data.split_at(n);
        self.data = tail;
        Ok(head)
    }

    pub(crate) fn byte(&mut self, field: &'static str) -> Result<u8, DecodeError> {
        self.take(field, 1).map(|b| b[0])
    }

    /// Everything not consumed yet
    pub(crate) const fn rest(&self) -> &'a [u8] {
        self.data
    }
}
