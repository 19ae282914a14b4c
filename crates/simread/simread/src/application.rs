//! SIM card application
//!
//! [`SimCard`] wraps an executor and provides file navigation and the
//! phonebook and message store scans.

use simread_apdu_core::{Bytes, CardExecutor, CardTransport, Executor};
use tracing::{debug, info, instrument, warn};

use crate::codec::{ContactEntry, SmsRecord, SmsStatus, adn};
use crate::commands::{SelectFileCommand, SelectFileResponse};
use crate::constants::CLA_GSM;
use crate::file::{FileHeader, FileId, FileSelector};
use crate::geometry::LengthStrategy;
use crate::records::{RecordAddress, RecordScan, ScanStop};
use crate::scan::{
    Contact, ContactScan, MessageScan, ScanConfig, ScanEvent, ScanObserver, ScanSummary,
};
use crate::{Error, Result};

/// SIM card session over an executor
#[derive(Debug)]
pub struct SimCard<E: Executor> {
    executor: E,
}

impl<T: CardTransport> SimCard<CardExecutor<T>> {
    /// Create a session over a connected transport
    ///
    /// GET RESPONSE is sent automatically with the GSM class byte.
    pub fn with_transport(transport: T) -> Self {
        Self::new(CardExecutor::with_get_response(transport, CLA_GSM))
    }
}

impl<E: Executor> SimCard<E> {
    /// Create a session over an executor
    pub const fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Get the underlying executor
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// Get the underlying executor mutably
    pub const fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }

    /// Consume the session and return the executor
    pub fn into_executor(self) -> E {
        self.executor
    }

    /// Select every file on `path`, root first
    ///
    /// Returns the header of the last file. The first rejected SELECT aborts
    /// the walk.
    #[instrument(level = "debug", skip(self, path), fields(path = %path))]
    pub fn select_path(&mut self, path: &FileSelector) -> Result<FileHeader> {
        let mut header = FileHeader::default();

        for file in path.iter() {
            match self.executor.execute(&SelectFileCommand::with_file(file))? {
                SelectFileResponse::Selected { header: selected } => {
                    debug!(%file, header_len = selected.as_bytes().len(), "Selected file");
                    header = selected;
                }
                SelectFileResponse::Rejected { status } => {
                    warn!(%file, %status, "File selection rejected");
                    return Err(Error::Navigation { file, status });
                }
            }
        }

        Ok(header)
    }

    /// Establish the record length of the currently selected file
    pub fn resolve_record_length(
        &mut self,
        strategy: &LengthStrategy,
        header: &FileHeader,
    ) -> Result<u8> {
        strategy.resolve(&mut self.executor, header)
    }

    /// Read records of the currently selected file
    pub fn records(&mut self, length: u8, max_slots: u16) -> RecordScan<'_, E> {
        RecordScan::new(&mut self.executor, length, max_slots)
    }

    /// Read all phonebook entries
    pub fn read_contacts<O: ScanObserver>(
        &mut self,
        config: &ScanConfig,
        observer: &mut O,
    ) -> Result<ContactScan> {
        let (entries, summary) = self.scan_file(
            &FileSelector::phonebook(),
            config,
            observer,
            |address, data, observer| {
                if adn::is_empty_record(&data) {
                    return None;
                }
                let contact = match adn::decode_contact(&data) {
                    Ok(entry) => Contact {
                        index: address.index,
                        entry,
                        error: None,
                    },
                    Err(error) => {
                        warn!(index = address.index, %error, "Undecodable phonebook record");
                        Contact {
                            index: address.index,
                            entry: ContactEntry {
                                name: "Unknown".to_string(),
                                number: String::new(),
                            },
                            error: Some(error),
                        }
                    }
                };
                observer.on_event(ScanEvent::Contact(&contact));
                Some(contact)
            },
        )?;

        Ok(ContactScan { entries, summary })
    }

    /// Read all stored messages
    pub fn read_messages<O: ScanObserver>(
        &mut self,
        config: &ScanConfig,
        observer: &mut O,
    ) -> Result<MessageScan> {
        let (records, summary) = self.scan_file(
            &FileSelector::messages(),
            config,
            observer,
            |address, data, observer| {
                let (&status_byte, pdu) = data.split_first()?;
                let status = match SmsStatus::from_byte(status_byte) {
                    Some(status) if status.is_used() => status,
                    Some(_) => return None,
                    None => {
                        debug!(index = address.index, status_byte, "Unknown slot status");
                        return None;
                    }
                };

                let record = SmsRecord::decode(address.index, status, pdu);
                if let Some(error) = &record.error {
                    warn!(index = address.index, %error, "Undecodable message");
                }
                observer.on_event(ScanEvent::Message(&record));
                Some(record)
            },
        )?;

        Ok(MessageScan { records, summary })
    }

    /// Select a file, resolve its geometry and feed every record to `decode`
    fn scan_file<T, O, F>(
        &mut self,
        path: &FileSelector,
        config: &ScanConfig,
        observer: &mut O,
        mut decode: F,
    ) -> Result<(Vec<T>, ScanSummary)>
    where
        O: ScanObserver,
        F: FnMut(RecordAddress, Bytes, &mut O) -> Option<T>,
    {
        let file = path.target().unwrap_or(FileId::MF);
        let header = self.select_path(path)?;
        let record_length = self.resolve_record_length(&config.length, &header)?;
        let slots = config.slot_bound(&header, record_length);

        info!(%file, record_length, slots, "Scanning records");
        observer.on_event(ScanEvent::Geometry {
            file,
            record_length,
            slots,
        });

        let mut found = Vec::new();
        let mut scan = self.records(record_length, slots);

        while let Some(item) = scan.next() {
            if let Ok((address, data)) = item {
                if let Some(decoded) = decode(address, data, observer) {
                    found.push(decoded);
                }
            }
            if config.is_checkpoint(scan.attempted()) {
                observer.on_event(ScanEvent::Progress {
                    attempted: scan.attempted(),
                    slots,
                });
            }
        }

        let summary = ScanSummary {
            file,
            record_length,
            slots,
            attempted: scan.attempted(),
            found: found.len(),
            stop: scan.stop().unwrap_or(ScanStop::SlotLimit),
        };

        info!(
            %file,
            found = summary.found,
            attempted = summary.attempted,
            stop = %summary.stop,
            "Scan finished"
        );
        observer.on_event(ScanEvent::Finished(&summary));

        Ok((found, summary))
    }
}
