//! Error types for SIM scans and record decoding

use simread_apdu_core::StatusWord;

use crate::file::FileId;

/// Result type for SIM operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a SIM operation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The exchange with the card failed before a status word was received
    #[error(transparent)]
    Apdu(#[from] simread_apdu_core::Error),

    /// A SELECT in the file path was rejected
    #[error("Selecting {file} failed with status {status} ({})", .status.description())]
    Navigation {
        /// File that could not be selected
        file: FileId,
        /// Status word returned by the card
        status: StatusWord,
    },

    /// No record length could be established for the selected file
    #[error("Cannot determine record geometry (tried lengths {tried:?})")]
    Geometry {
        /// Candidate lengths that were rejected
        tried: Vec<u8>,
    },

    /// A READ RECORD returned an unexpected status
    #[error("Reading record {index} failed with status {status} ({})", .status.description())]
    RecordRead {
        /// Record number
        index: u8,
        /// Status word returned by the card
        status: StatusWord,
    },
}

/// Errors raised while decoding raw record bytes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The input ended inside a field
    #[error("truncated {field}: needed {needed} bytes, {available} available")]
    Truncated {
        /// Field being read
        field: &'static str,
        /// Bytes the field requires
        needed: usize,
        /// Bytes left in the input
        available: usize,
    },

    /// The record is shorter than its fixed layout
    #[error("record of {length} bytes is shorter than the minimum of {minimum}")]
    RecordTooShort {
        /// Actual record length
        length: usize,
        /// Minimum record length
        minimum: usize,
    },
}
