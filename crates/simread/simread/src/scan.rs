//! Scan configuration, results and progress reporting

use crate::DecodeError;
use crate::codec::{ContactEntry, SmsRecord};
use crate::constants::{
    DEFAULT_ADN_RECORD_LENGTH, DEFAULT_ADN_SLOTS, DEFAULT_CHECKPOINT_INTERVAL, DEFAULT_SMS_SLOTS,
    MAX_RECORD_NUMBER, SMS_RECORD_LENGTH,
};
use crate::file::{FileHeader, FileId};
use crate::geometry::LengthStrategy;
use crate::records::ScanStop;

/// Parameters of one file scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// How the record length is established
    pub length: LengthStrategy,
    /// Explicit slot bound, overriding every other bound
    pub max_slots: Option<u16>,
    /// Derive the slot bound from the declared file size
    pub size_bounded: bool,
    /// Slot bound when the file size is not used
    pub default_slots: u16,
    /// Slots between two [`ScanEvent::Progress`] events; 0 disables them
    pub checkpoint_interval: u16,
}

impl ScanConfig {
    /// Phonebook defaults: header derived length with a 28 byte fallback
    ///
    /// Every record number is tried; the card's end of file status ends the
    /// scan, since declared sizes under-count on some cards.
    pub const fn phonebook() -> Self {
        Self {
            length: LengthStrategy::Arithmetic {
                default: DEFAULT_ADN_RECORD_LENGTH,
            },
            max_slots: None,
            size_bounded: false,
            default_slots: DEFAULT_ADN_SLOTS,
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
        }
    }

    /// Message store defaults: 176 byte records, 50 slots without a header
    pub const fn messages() -> Self {
        Self {
            length: LengthStrategy::Fixed(SMS_RECORD_LENGTH),
            max_slots: None,
            size_bounded: true,
            default_slots: DEFAULT_SMS_SLOTS,
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
        }
    }

    /// Set the length strategy
    pub fn with_length_strategy(mut self, length: LengthStrategy) -> Self {
        self.length = length;
        self
    }

    /// Read at most `max_slots` records
    pub const fn with_max_slots(mut self, max_slots: u16) -> Self {
        self.max_slots = Some(max_slots);
        self
    }

    /// Set the progress checkpoint interval
    pub const fn with_checkpoint_interval(mut self, interval: u16) -> Self {
        self.checkpoint_interval = interval;
        self
    }

    /// Number of slots to scan for a file with this header and record length
    pub fn slot_bound(&self, header: &FileHeader, record_length: u8) -> u16 {
        let bound = match self.max_slots {
            Some(max_slots) => max_slots,
            None if self.size_bounded => header
                .file_size()
                .and_then(|size| size.checked_div(u16::from(record_length)))
                .unwrap_or(self.default_slots),
            None => self.default_slots,
        };
        bound.min(MAX_RECORD_NUMBER)
    }

    pub(crate) const fn is_checkpoint(&self, attempted: u16) -> bool {
        self.checkpoint_interval != 0 && attempted % self.checkpoint_interval == 0
    }
}

/// A decoded phonebook slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Record number
    pub index: u8,
    /// Decoded entry; name `Unknown` when decoding failed
    pub entry: ContactEntry,
    /// Why decoding failed, if it did
    pub error: Option<DecodeError>,
}

/// Outcome of a completed scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    /// File scanned
    pub file: FileId,
    /// Record length used
    pub record_length: u8,
    /// Slot bound
    pub slots: u16,
    /// READ RECORD commands issued, including the one that ended the scan
    pub attempted: u16,
    /// Occupied records found
    pub found: usize,
    /// Why the scan ended
    pub stop: ScanStop,
}

/// Phonebook scan result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactScan {
    /// Occupied entries in record order
    pub entries: Vec<Contact>,
    /// Scan outcome
    pub summary: ScanSummary,
}

/// Message store scan result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageScan {
    /// Occupied slots in record order
    pub records: Vec<SmsRecord>,
    /// Scan outcome
    pub summary: ScanSummary,
}

/// Event reported while a scan runs
#[derive(Debug, Clone, Copy)]
pub enum ScanEvent<'a> {
    /// Record geometry is known and reading starts
    Geometry {
        /// File being scanned
        file: FileId,
        /// Record length in bytes
        record_length: u8,
        /// Slot bound
        slots: u16,
    },
    /// A phonebook entry was decoded
    Contact(&'a Contact),
    /// A message was decoded
    Message(&'a SmsRecord),
    /// Cooperative checkpoint
    Progress {
        /// Records attempted so far
        attempted: u16,
        /// Slot bound
        slots: u16,
    },
    /// The scan ended
    Finished(&'a ScanSummary),
}

/// Receiver of scan events
pub trait ScanObserver {
    /// Handle one event
    fn on_event(&mut self, event: ScanEvent<'_>);
}

impl<F: FnMut(ScanEvent<'_>)> ScanObserver for F {
    fn on_event(&mut self, event: ScanEvent<'_>) {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use simread_apdu_core::Bytes;

    fn header(raw: &[u8]) -> FileHeader {
        FileHeader::new(Bytes::copy_from_slice(raw))
    }

    #[test]
    fn test_message_slot_bound() {
        let config = ScanConfig::messages();
        // 0x0B00 = 2816 bytes = 16 slots of 176
        let h = header(&hex!("0000 0B00 6F3C 04 00 11FF55 01 02 01 B0"));
        assert_eq!(config.slot_bound(&h, SMS_RECORD_LENGTH), 16);
        let short = header(&hex!("00"));
        assert_eq!(config.slot_bound(&short, SMS_RECORD_LENGTH), 50);
    }

    #[test]
    fn test_phonebook_slot_bound_ignores_file_size() {
        let config = ScanConfig::phonebook();
        let h = header(&hex!("0000 0DAC 6F3A 04 00 11FF22 01 02 01 1C"));
        assert_eq!(config.slot_bound(&h, 28), 255);
        assert_eq!(config.slot_bound(&FileHeader::default(), 28), 255);
        let h = header(&hex!("0000 0038 6F3A 04 00 11FF22 01 02 01 1C"));
        assert_eq!(config.slot_bound(&h, 28), 255);
        assert_eq!(config.with_max_slots(10).slot_bound(&h, 28), 10);
    }

    #[test]
    fn test_size_bound_is_capped() {
        let config = ScanConfig::messages();
        let h = header(&hex!("0000 FFFF 6F3C 04 00 11FF55 01 02 01 0E"));
        assert_eq!(config.slot_bound(&h, 14), 255);
    }

    #[test]
    fn test_max_slots_override() {
        let config = ScanConfig::messages().with_max_slots(3);
        let h = header(&hex!("0000 0B00 6F3C 04 00 11FF55 01 02 01 B0"));
        assert_eq!(config.slot_bound(&h, SMS_RECORD_LENGTH), 3);
    }

    #[test]
    fn test_zero_record_length_uses_default() {
        let config = ScanConfig::messages();
        let h = header(&hex!("0000 0DAC 6F3C"));
        assert_eq!(config.slot_bound(&h, 0), 50);
    }

    #[test]
    fn test_checkpoints() {
        let config = ScanConfig::phonebook();
        assert!(!config.is_checkpoint(4));
        assert!(config.is_checkpoint(5));
        assert!(config.is_checkpoint(10));
        assert!(!config.with_checkpoint_interval(0).is_checkpoint(5));
    }
}
