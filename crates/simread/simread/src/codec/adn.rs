//! Phonebook (EF ADN) record codec
//!
//! A record is an alpha identifier followed by a fixed 14 byte footer:
//! BCD length, TON/NPI, ten bytes of dialling number, capability and
//! extension identifiers.

use std::fmt;

use crate::DecodeError;
use crate::codec::bcd;
use crate::constants::{ADN_FOOTER_LENGTH, ADN_MAX_BCD_LENGTH};

/// Marker for unused bytes
const UNUSED: u8 = 0xFF;

/// Offset of the first number byte within the footer
const NUMBER_OFFSET: usize = 2;

/// One phonebook entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactEntry {
    /// Alpha identifier, non-printable bytes shown as `.`
    pub name: String,
    /// Dialling number digits
    pub number: String,
}

impl fmt::Display for ContactEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<25} | Tel: {}", self.name, self.number)
    }
}

/// Whether a raw record is a free slot
pub fn is_empty_record(raw: &[u8]) -> bool {
    raw.first().is_none_or(|&b| b == UNUSED)
}

/// Decode one phonebook record
pub fn decode_contact(raw: &[u8]) -> Result<ContactEntry, DecodeError> {
    let Some(name_len) = raw.len().checked_sub(ADN_FOOTER_LENGTH) else {
        return Err(DecodeError::RecordTooShort {
            length: raw.len(),
            minimum: ADN_FOOTER_LENGTH,
        });
    };
    let (alpha, footer) = raw.split_at(name_len);

    Ok(ContactEntry {
        name: decode_name(alpha),
        number: decode_number(footer),
    })
}

fn decode_name(alpha: &[u8]) -> String {
    alpha
        .iter()
        .take_while(|&&b| b != UNUSED)
        .map(|&b| match b {
            32..=126 => char::from(b),
            _ => '.',
        })
        .collect()
}

fn decode_number(footer: &[u8]) -> String {
    let bcd_len = footer[0];
    if bcd_len > ADN_MAX_BCD_LENGTH {
        return String::new();
    }
    // The byte after the length is TON/NPI
    let end = (NUMBER_OFFSET + usize::from(bcd_len)).min(ADN_FOOTER_LENGTH);
    bcd::digits(&footer[NUMBER_OFFSET..end])
}
