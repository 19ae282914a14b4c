//! SELECT command for GSM 11.11 files
//!
//! Selects a master file, dedicated file or elementary file by its two byte
//! identifier. The response data is the file header returned through
//! GET RESPONSE.

use simread_apdu_core::{ApduCommand, Command, Response, StatusWord};

use crate::Error;
use crate::constants::{CLA_GSM, ins};
use crate::file::{FileHeader, FileId};

/// SELECT command for one file identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectFileCommand {
    file: FileId,
    id: [u8; 2],
}

impl SelectFileCommand {
    /// Create a SELECT for the given file
    pub const fn with_file(file: FileId) -> Self {
        Self {
            file,
            id: file.to_bytes(),
        }
    }

    /// The file this command selects
    pub const fn file(&self) -> FileId {
        self.file
    }
}

/// Outcome of a SELECT
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectFileResponse {
    /// The file was selected
    Selected {
        /// Header of the selected file (may be empty)
        header: FileHeader,
    },
    /// The card refused the selection
    Rejected {
        /// Status word returned by the card
        status: StatusWord,
    },
}

impl SelectFileResponse {
    /// Returns true if the selection was successful
    pub const fn is_selected(&self) -> bool {
        matches!(self, Self::Selected { .. })
    }

    /// Get the file header if the selection succeeded
    pub const fn header(&self) -> Option<&FileHeader> {
        match self {
            Self::Selected { header } => Some(header),
            Self::Rejected { .. } => None,
        }
    }
}

impl ApduCommand for SelectFileCommand {
    type Success = SelectFileResponse;
    type Error = Error;

    fn convert_error(error: simread_apdu_core::Error) -> Self::Error {
        Error::Apdu(error)
    }

    fn to_command(&self) -> Command {
        Command::new(CLA_GSM, ins::SELECT, 0x00, 0x00).with_data(self.id.to_vec())
    }

    fn parse_response(response: Response) -> Result<Self::Success, Self::Error> {
        if response.is_success() {
            Ok(SelectFileResponse::Selected {
                header: FileHeader::new(response.into_payload()),
            })
        } else {
            Ok(SelectFileResponse::Rejected {
                status: response.status(),
            })
        }
    }
}
