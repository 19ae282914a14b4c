//! Sequential record reading
//!
//! [`RecordScan`] reads records 1, 2, ... of the selected file until the card
//! reports the end of the range, a read fails or the slot bound is reached.
//! Free slots are returned like any other record; deciding emptiness is up
//! to the codec.

use std::fmt;

use simread_apdu_core::{Bytes, Executor, StatusWord};
use tracing::{debug, warn};

use crate::commands::{ReadRecordCommand, ReadRecordResponse};
use crate::constants::MAX_RECORD_NUMBER;
use crate::{Error, Result};

/// Position of one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordAddress {
    /// Record number, starting at 1
    pub index: u8,
    /// Record length in bytes
    pub length: u8,
}

/// Why a scan ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStop {
    /// The card reported the end of the file
    EndOfRange {
        /// First record number out of range
        index: u8,
        /// Status word returned by the card
        status: StatusWord,
    },
    /// Every slot up to the bound was read
    SlotLimit,
    /// A read returned an unexpected status
    Error {
        /// Record number
        index: u8,
        /// Status word returned by the card
        status: StatusWord,
    },
    /// The exchange itself failed
    TransportFailure {
        /// Record number
        index: u8,
    },
}

impl ScanStop {
    /// Whether the scan covered the whole file
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::EndOfRange { .. } | Self::SlotLimit)
    }
}

impl fmt::Display for ScanStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndOfRange { index, status } => {
                write!(f, "end of file at record {index} ({status})")
            }
            Self::SlotLimit => f.write_str("slot limit reached"),
            Self::Error { index, status } => {
                let reason = status.description();
                write!(f, "record {index} failed with {status} ({reason})")
            }
            Self::TransportFailure { index } => write!(f, "transport failure at record {index}"),
        }
    }
}

/// Lazy scan over the records of the selected file
///
/// Yields `Ok` for every record read successfully and at most one `Err`,
/// after which the scan is over.
#[derive(Debug)]
pub struct RecordScan<'a, E: Executor> {
    executor: &'a mut E,
    length: u8,
    next: u16,
    max_slots: u16,
    attempted: u16,
    stop: Option<ScanStop>,
}

impl<'a, E: Executor> RecordScan<'a, E> {
    /// Scan records of `length` bytes, reading at most `max_slots` of them
    pub fn new(executor: &'a mut E, length: u8, max_slots: u16) -> Self {
        Self {
            executor,
            length,
            next: 1,
            max_slots: max_slots.min(MAX_RECORD_NUMBER),
            attempted: 0,
            stop: None,
        }
    }

    /// Number of READ RECORD commands issued so far
    pub const fn attempted(&self) -> u16 {
        self.attempted
    }

    /// Why the scan ended, once it has
    pub const fn stop(&self) -> Option<ScanStop> {
        self.stop
    }

    /// Record length used by this scan
    pub const fn length(&self) -> u8 {
        self.length
    }

    fn finish(&mut self, stop: ScanStop) {
        debug!(%stop, attempted = self.attempted, "Record scan finished");
        self.stop = Some(stop);
    }
}

impl<E: Executor> Iterator for RecordScan<'_, E> {
    type Item = Result<(RecordAddress, Bytes)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stop.is_some() {
            return None;
        }
        if self.next > self.max_slots {
            self.finish(ScanStop::SlotLimit);
            return None;
        }

        let index = self.next as u8;
        self.next += 1;
        self.attempted += 1;

        let address = RecordAddress {
            index,
            length: self.length,
        };

        match self
            .executor
            .execute(&ReadRecordCommand::new(index, self.length))
        {
            Ok(ReadRecordResponse::Record(data)) => {
                debug!(index, len = data.len(), "Read record");
                Some(Ok((address, data)))
            }
            Ok(ReadRecordResponse::OutOfRange { status }) => {
                self.finish(ScanStop::EndOfRange { index, status });
                None
            }
            Ok(ReadRecordResponse::WrongLength { expected }) => {
                let status = StatusWord::new(0x6C, expected);
                warn!(index, %status, "Record length mismatch");
                self.finish(ScanStop::Error { index, status });
                Some(Err(Error::RecordRead { index, status }))
            }
            Ok(ReadRecordResponse::Failed { status }) => {
                warn!(index, %status, "Record read failed");
                self.finish(ScanStop::Error { index, status });
                Some(Err(Error::RecordRead { index, status }))
            }
            Err(e) => {
                warn!(index, error = %e, "Record exchange failed");
                self.finish(ScanStop::TransportFailure { index });
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use simread_apdu_core::{CardExecutor, TransportError, transport::MockTransport};

    fn executor(responses: &[&[u8]]) -> CardExecutor<MockTransport> {
        CardExecutor::new(MockTransport::new(responses.iter().map(|r| r.to_vec())))
    }

    #[test]
    fn test_scan_stops_at_end_of_file() {
        let mut executor = executor(&[
            &hex!("FFFF9000"),
            &hex!("41FF9000"),
            &hex!("6A83"),
        ]);
        let mut scan = RecordScan::new(&mut executor, 2, 10);

        let (address, data) = scan.next().unwrap().unwrap();
        assert_eq!(
            address,
            RecordAddress {
                index: 1,
                length: 2
            }
        );
        assert_eq!(data.as_ref(), hex!("FFFF"));
        let (address, _) = scan.next().unwrap().unwrap();
        assert_eq!(address.index, 2);
        assert!(scan.next().is_none());
        assert!(scan.next().is_none());

        assert_eq!(scan.attempted(), 3);
        assert_eq!(
            scan.stop(),
            Some(ScanStop::EndOfRange {
                index: 3,
                status: StatusWord::new(0x6A, 0x83)
            })
        );
        drop(scan);
        assert_eq!(
            executor.transport().commands[2].as_ref(),
            hex!("A0B2030402")
        );
    }

    #[test]
    fn test_scan_respects_slot_bound() {
        let mut executor = executor(&[&hex!("009000"), &hex!("009000"), &hex!("009000")]);
        let scan = RecordScan::new(&mut executor, 1, 2);
        let indices: Vec<u8> = scan.map(|r| r.unwrap().0.index).collect();
        assert_eq!(indices, vec![1, 2]);
        assert_eq!(executor.transport().sent(), 2);
    }

    #[test]
    fn test_scan_error_is_terminal() {
        let mut executor = executor(&[&hex!("419000"), &hex!("9804"), &hex!("419000")]);
        let mut scan = RecordScan::new(&mut executor, 1, 10);

        assert!(scan.next().unwrap().is_ok());
        assert!(matches!(
            scan.next(),
            Some(Err(Error::RecordRead { index: 2, .. }))
        ));
        assert!(scan.next().is_none());
        assert_eq!(
            scan.stop(),
            Some(ScanStop::Error {
                index: 2,
                status: StatusWord::new(0x98, 0x04)
            })
        );
        assert!(!scan.stop().unwrap().is_complete());
    }

    #[test]
    fn test_scan_transport_failure() {
        let mut transport = MockTransport::new([hex!("419000").to_vec()]);
        transport.fail(TransportError::other("reader unplugged"));
        let mut executor = CardExecutor::new(transport);
        let mut scan = RecordScan::new(&mut executor, 1, 10);

        assert!(scan.next().unwrap().is_ok());
        assert!(matches!(scan.next(), Some(Err(Error::Apdu(_)))));
        assert_eq!(scan.stop(), Some(ScanStop::TransportFailure { index: 2 }));
    }

    #[test]
    fn test_scan_bound_clamped_to_record_numbers() {
        let mut executor = executor(&[]);
        let scan = RecordScan::new(&mut executor, 28, 1000);
        assert_eq!(scan.max_slots, 255);
    }
}
