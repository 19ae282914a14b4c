//! Record length resolution
//!
//! The record length of a linear fixed file is not always advertised
//! reliably. It is either taken from the SELECT header, checked against the
//! file size, or found by probing record 1 with a list of candidates.

use simread_apdu_core::Executor;
use tracing::{debug, warn};

use crate::commands::{ReadRecordCommand, ReadRecordResponse};
use crate::constants::{DEFAULT_ADN_RECORD_LENGTH, PROBE_CANDIDATES};
use crate::file::FileHeader;
use crate::{Error, Result};

/// How to establish the record length of the selected file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LengthStrategy {
    /// Use a known length
    Fixed(u8),
    /// Take the header's length byte if it divides the file size, else `default`
    Arithmetic {
        /// Fallback length
        default: u8,
    },
    /// Read record 1 with each candidate until one succeeds
    ///
    /// A wrong-length status naming the correct length ends the probe early.
    Probe {
        /// Lengths to try in order
        candidates: Vec<u8>,
    },
}

impl Default for LengthStrategy {
    fn default() -> Self {
        Self::Arithmetic {
            default: DEFAULT_ADN_RECORD_LENGTH,
        }
    }
}

impl LengthStrategy {
    /// Probe with the usual phonebook record lengths
    pub fn probe() -> Self {
        Self::Probe {
            candidates: PROBE_CANDIDATES.to_vec(),
        }
    }

    /// Resolve the record length for the file described by `header`
    pub fn resolve<E: Executor>(&self, executor: &mut E, header: &FileHeader) -> Result<u8> {
        match self {
            Self::Fixed(length) => Ok(*length),
            Self::Arithmetic { default } => Ok(length_from_header(header, *default)),
            Self::Probe { candidates } => probe_length(executor, candidates),
        }
    }
}

/// Header record length if the declared file size is a multiple of it
pub fn length_from_header(header: &FileHeader, default: u8) -> u8 {
    match (header.file_size(), header.record_length()) {
        (Some(size), Some(length)) if size % u16::from(length) == 0 => length,
        _ => {
            debug!(
                header = %hex::encode_upper(header.as_bytes()),
                default,
                "Header does not give a consistent record length"
            );
            default
        }
    }
}

/// Probe record 1 with each candidate length
pub fn probe_length<E: Executor>(executor: &mut E, candidates: &[u8]) -> Result<u8> {
    for &candidate in candidates {
        match executor.execute(&ReadRecordCommand::new(1, candidate)) {
            Ok(ReadRecordResponse::Record(_)) => {
                debug!(length = candidate, "Probe accepted");
                return Ok(candidate);
            }
            Ok(ReadRecordResponse::WrongLength { expected }) if expected != 0 => {
                debug!(length = candidate, expected, "Card announced record length");
                return Ok(expected);
            }
            Ok(response) => {
                debug!(length = candidate, ?response, "Probe rejected");
            }
            Err(e) => {
                warn!(length = candidate, error = %e, "Probe exchange failed");
            }
        }
    }

    Err(Error::Geometry {
        tried: candidates.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use simread_apdu_core::{Bytes, CardExecutor, transport::MockTransport};

    fn header(raw: &[u8]) -> FileHeader {
        FileHeader::new(Bytes::copy_from_slice(raw))
    }

    #[test]
    fn test_arithmetic_accepts_divisor() {
        // 3500 bytes, 28 byte records
        let h = header(&hex!("0000 0DAC 6F3A 04 00 11FF22 01 02 01 1C"));
        assert_eq!(length_from_header(&h, 28), 28);

        // 3200 bytes, 32 byte records
        let h = header(&hex!("0000 0C80 6F3A 04 00 11FF22 01 02 01 20"));
        assert_eq!(length_from_header(&h, 28), 32);
    }

    #[test]
    fn test_arithmetic_falls_back() {
        // 3500 is not a multiple of 30
        let h = header(&hex!("0000 0DAC 6F3A 04 00 11FF22 01 02 01 1E"));
        assert_eq!(length_from_header(&h, 28), 28);

        assert_eq!(length_from_header(&header(&hex!("0000")), 176), 176);
        assert_eq!(length_from_header(&header(&hex!("0000 0DAC 00")), 28), 28);
    }

    #[test]
    fn test_probe_takes_first_success() {
        let transport = MockTransport::new([hex!("6700").to_vec(), hex!("41FF9000").to_vec()]);
        let mut executor = CardExecutor::new(transport);

        let length = LengthStrategy::probe()
            .resolve(&mut executor, &FileHeader::default())
            .unwrap();
        assert_eq!(length, 32);
        assert_eq!(executor.transport().sent(), 2);
        assert_eq!(
            executor.transport().commands[1].as_ref(),
            hex!("A0B2010420")
        );
    }

    #[test]
    fn test_probe_uses_length_hint() {
        let transport = MockTransport::new([hex!("6C1E").to_vec()]);
        let mut executor = CardExecutor::new(transport);

        let length = LengthStrategy::probe()
            .resolve(&mut executor, &FileHeader::default())
            .unwrap();
        assert_eq!(length, 30);
        assert_eq!(executor.transport().sent(), 1);
    }

    #[test]
    fn test_probe_exhausted() {
        let transport = MockTransport::new([hex!("6700").to_vec(), hex!("6700").to_vec()]);
        let mut executor = CardExecutor::new(transport);

        // The third candidate hits an empty queue, i.e. a transport failure
        let err = probe_length(&mut executor, &[28, 32, 30]).unwrap_err();
        assert!(matches!(err, Error::Geometry { ref tried } if tried == &[28, 32, 30]));
        assert_eq!(executor.transport().sent(), 3);
    }

    #[test]
    fn test_fixed_sends_nothing() {
        let mut executor = CardExecutor::new(MockTransport::default());
        let length = LengthStrategy::Fixed(176)
            .resolve(&mut executor, &FileHeader::default())
            .unwrap();
        assert_eq!(length, 176);
        assert_eq!(executor.transport().sent(), 0);
    }
}
