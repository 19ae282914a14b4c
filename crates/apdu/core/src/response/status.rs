//! Status word definitions for APDU responses

use std::fmt;

use derive_more::Display;

/// Status Word (SW1-SW2) from an APDU response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusWord {
    /// First status byte (SW1)
    pub sw1: u8,
    /// Second status byte (SW2)
    pub sw2: u8,
}

/// Coarse classification of a status word, keyed on SW1
///
/// SIM cards mix GSM 11.11 and ISO 7816-4 conventions, so several SW1 values
/// share one class. SW2 carries the class parameter where one exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StatusClass {
    /// Normal ending (90 xx)
    #[display("success")]
    Success,
    /// Response data waiting for GET RESPONSE (9F xx, 61 xx); SW2 is its length
    #[display("more data available ({_0} bytes)")]
    MoreDataAvailable(u8),
    /// End of file or record reached (62 xx)
    #[display("end of file")]
    EndOfFile,
    /// Wrong parameters P1-P2 (6B xx)
    #[display("wrong parameter")]
    WrongParameter,
    /// Wrong parameters, file or record not found (6A xx)
    #[display("wrong class or not found")]
    WrongClassOrNotFound,
    /// Wrong Le; SW2 is the length the card expects (6C xx)
    #[display("wrong length, card expects {_0}")]
    WrongLengthHint(u8),
    /// Any other status
    #[display("other")]
    Other,
}

impl StatusClass {
    /// Whether this status marks the end of a record range
    pub const fn is_end_of_range(&self) -> bool {
        matches!(
            self,
            Self::EndOfFile | Self::WrongParameter | Self::WrongClassOrNotFound
        )
    }
}

impl StatusWord {
    /// Status word from its two bytes
    pub const fn new(sw1: u8, sw2: u8) -> Self {
        Self { sw1, sw2 }
    }

    /// Classify on SW1
    pub const fn classify(&self) -> StatusClass {
        match self.sw1 {
            0x90 => StatusClass::Success,
            0x9F | 0x61 => StatusClass::MoreDataAvailable(self.sw2),
            0x62 => StatusClass::EndOfFile,
            0x6B => StatusClass::WrongParameter,
            0x6A => StatusClass::WrongClassOrNotFound,
            0x6C => StatusClass::WrongLengthHint(self.sw2),
            _ => StatusClass::Other,
        }
    }

    /// Normal ending
    pub const fn is_success(&self) -> bool {
        self.sw1 == 0x90
    }

    /// SW2 when the card holds response data for GET RESPONSE
    pub const fn remaining_bytes(&self) -> Option<u8> {
        match self.classify() {
            StatusClass::MoreDataAvailable(len) => Some(len),
            _ => None,
        }
    }

    /// Human readable meaning under GSM 11.11 and ISO 7816-4
    pub const fn description(&self) -> &'static str {
        match (self.sw1, self.sw2) {
            (0x90, 0x00) => "Success",
            (0x9F, _) => "Response data available",
            (0x61, _) => "More data available",
            (0x62, 0x82) => "End of file/record reached before reading Le bytes",
            (0x62, _) => "Warning, non-volatile memory unchanged",
            (0x67, _) => "Incorrect parameter P3",
            (0x69, 0x82) => "Security status not satisfied",
            (0x6A, 0x82) => "File not found",
            (0x6A, 0x83) => "Record not found",
            (0x6A, _) => "Wrong parameters",
            (0x6B, _) => "Wrong parameters P1-P2",
            (0x6C, _) => "Wrong Le field",
            (0x6D, _) => "Instruction not supported",
            (0x6E, _) => "Class not supported",
            (0x92, 0x40) => "Memory problem",
            (0x94, 0x00) => "No EF selected",
            (0x94, 0x02) => "Out of range (invalid address)",
            (0x94, 0x04) => "File ID not found",
            (0x94, 0x08) => "File inconsistent with the command",
            (0x98, 0x04) => "Access condition not fulfilled",
            _ => "Unknown status word",
        }
    }
}

impl From<(u8, u8)> for StatusWord {
    fn from((sw1, sw2): (u8, u8)) -> Self {
        Self::new(sw1, sw2)
    }
}

impl fmt::Display for StatusWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X} {:02X}", self.sw1, self.sw2)
    }
}
