//! Read phonebook entries and text messages from GSM SIM cards
//!
//! The crate walks the SIM file system with SELECT, works out the record
//! geometry of linear fixed files and reads them record by record,
//! decoding phonebook (EF ADN) and message store (EF SMS) records.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use simread::{ScanConfig, ScanEvent, SimCard};
//! # let transport = simread_apdu_core::transport::MockTransport::default();
//!
//! let mut card = SimCard::with_transport(transport);
//! let scan = card.read_contacts(&ScanConfig::phonebook(), &mut |event: ScanEvent<'_>| {
//!     if let ScanEvent::Contact(contact) = event {
//!         println!("[{:03}] {}", contact.index, contact.entry);
//!     }
//! })?;
//! println!("Found {} contacts", scan.summary.found);
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]

mod application;
pub mod codec;
pub mod commands;
pub mod constants;
mod error;
pub mod file;
pub mod geometry;
pub mod records;
pub mod scan;

pub use application::SimCard;
pub use codec::{ContactEntry, SmsBody, SmsRecord, SmsStatus};
pub use error::{DecodeError, Error, Result};
pub use file::{FileHeader, FileId, FileSelector};
pub use geometry::LengthStrategy;
pub use records::{RecordAddress, RecordScan, ScanStop};
pub use scan::{
    Contact, ContactScan, MessageScan, ScanConfig, ScanEvent, ScanObserver, ScanSummary,
};
