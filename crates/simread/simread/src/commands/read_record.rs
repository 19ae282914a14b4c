//! READ RECORD command in absolute mode

use simread_apdu_core::{ApduCommand, Bytes, Command, Response, StatusClass, StatusWord};

use crate::Error;
use crate::constants::{CLA_GSM, READ_RECORD_ABSOLUTE, ins};

/// READ RECORD for one record number and length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRecordCommand {
    index: u8,
    length: u8,
}

impl ReadRecordCommand {
    /// Read record `index` (1-based) expecting `length` bytes
    pub const fn new(index: u8, length: u8) -> Self {
        Self { index, length }
    }

    /// Record number
    pub const fn index(&self) -> u8 {
        self.index
    }

    /// Expected record length
    pub const fn length(&self) -> u8 {
        self.length
    }
}

/// Classified outcome of a READ RECORD
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadRecordResponse {
    /// Record content
    Record(Bytes),
    /// The card expects a different Le
    WrongLength {
        /// Length announced by the card in SW2
        expected: u8,
    },
    /// The record number is past the end of the file
    OutOfRange {
        /// Status word returned by the card
        status: StatusWord,
    },
    /// Any other status
    Failed {
        /// Status word returned by the card
        status: StatusWord,
    },
}

impl ApduCommand for ReadRecordCommand {
    type Success = ReadRecordResponse;
    type Error = Error;

    fn convert_error(error: simread_apdu_core::Error) -> Self::Error {
        Error::Apdu(error)
    }

    fn to_command(&self) -> Command {
        Command::new(CLA_GSM, ins::READ_RECORD, self.index, READ_RECORD_ABSOLUTE)
            .expecting(self.length)
    }

    fn parse_response(response: Response) -> Result<Self::Success, Self::Error> {
        let status = response.status();
        Ok(match response.class() {
            StatusClass::Success => ReadRecordResponse::Record(response.into_payload()),
            StatusClass::WrongLengthHint(expected) => ReadRecordResponse::WrongLength { expected },
            class if class.is_end_of_range() => ReadRecordResponse::OutOfRange { status },
            _ => ReadRecordResponse::Failed { status },
        })
    }
}
