//! Constants for GSM 11.11 file access
//!
//! Command bytes, file identifiers and record geometry defaults used when
//! talking to a SIM.

/// Command class used by GSM SIM cards
pub const CLA_GSM: u8 = 0xA0;

/// Instruction codes
pub mod ins {
    /// SELECT command
    pub const SELECT: u8 = 0xA4;
    /// READ RECORD command
    pub const READ_RECORD: u8 = 0xB2;
}

/// READ RECORD P2: absolute mode, record number in P1
pub const READ_RECORD_ABSOLUTE: u8 = 0x04;

/// File identifiers
pub mod fid {
    /// Master file
    pub const MF: u16 = 0x3F00;
    /// Telecom directory
    pub const DF_TELECOM: u16 = 0x7F10;
    /// Abbreviated dialling numbers (phonebook)
    pub const EF_ADN: u16 = 0x6F3A;
    /// Short message store
    pub const EF_SMS: u16 = 0x6F3C;
}

/// Default phonebook record length when the file header is inconclusive
pub const DEFAULT_ADN_RECORD_LENGTH: u8 = 28;

/// Record length of a short message slot (status byte + 175 byte PDU)
pub const SMS_RECORD_LENGTH: u8 = 176;

/// Record lengths tried in order when probing the phonebook geometry
pub const PROBE_CANDIDATES: [u8; 7] = [28, 32, 30, 34, 26, 22, 14];

/// Slot count assumed for the message store when the header has no size
pub const DEFAULT_SMS_SLOTS: u16 = 50;

/// Slot count assumed for the phonebook when the size is unknown
pub const DEFAULT_ADN_SLOTS: u16 = 255;

/// Highest record number addressable with a one byte P1
pub const MAX_RECORD_NUMBER: u16 = 255;

/// Slots between two progress events
pub const DEFAULT_CHECKPOINT_INTERVAL: u16 = 5;

/// Length of the dialling number footer of a phonebook record
pub const ADN_FOOTER_LENGTH: usize = 14;

/// Largest valid BCD length byte in a phonebook footer
pub const ADN_MAX_BCD_LENGTH: u8 = 11;
