//! APDU commands for GSM file access

mod read_record;
mod select;

pub use read_record::{ReadRecordCommand, ReadRecordResponse};
pub use select::{SelectFileCommand, SelectFileResponse};
