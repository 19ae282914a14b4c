//! SIM file system addressing
//!
//! Files are identified by two byte ids and reached by selecting each
//! container on the path from the master file down.

use std::fmt;

use simread_apdu_core::Bytes;

use crate::constants::fid;

/// Two byte file identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u16);

impl FileId {
    /// Master file
    pub const MF: Self = Self(fid::MF);
    /// Telecom directory
    pub const DF_TELECOM: Self = Self(fid::DF_TELECOM);
    /// Phonebook
    pub const EF_ADN: Self = Self(fid::EF_ADN);
    /// Message store
    pub const EF_SMS: Self = Self(fid::EF_SMS);

    /// Big-endian bytes, as sent in the SELECT data field
    pub const fn to_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl From<u16> for FileId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

/// Ordered path of files to select, root first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelector {
    path: Vec<FileId>,
}

impl FileSelector {
    /// Create a path from its components
    pub fn new(path: impl IntoIterator<Item = FileId>) -> Self {
        Self {
            path: path.into_iter().collect(),
        }
    }

    /// MF / DF telecom / EF ADN
    pub fn phonebook() -> Self {
        Self::new([FileId::MF, FileId::DF_TELECOM, FileId::EF_ADN])
    }

    /// MF / DF telecom / EF SMS
    pub fn messages() -> Self {
        Self::new([FileId::MF, FileId::DF_TELECOM, FileId::EF_SMS])
    }

    /// Files in selection order
    pub fn iter(&self) -> impl Iterator<Item = FileId> + '_ {
        self.path.iter().copied()
    }

    /// The file selected last
    pub fn target(&self) -> Option<FileId> {
        self.path.last().copied()
    }

    /// Number of path components
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether the path is empty
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

impl fmt::Display for FileSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, file) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{file}")?;
        }
        Ok(())
    }
}

/// Header returned when selecting a file
///
/// Bytes 2..4 hold the file size (big-endian) and the last byte of an
/// elementary file header holds its record length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileHeader {
    raw: Bytes,
}

impl FileHeader {
    /// Minimum header length carrying the file size
    pub const MIN_LENGTH: usize = 4;

    /// Wrap raw header bytes
    pub const fn new(raw: Bytes) -> Self {
        Self { raw }
    }

    /// Raw header bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Whether the header is long enough to describe the file
    pub const fn is_complete(&self) -> bool {
        self.raw.len() >= Self::MIN_LENGTH
    }

    /// Declared file size in bytes
    pub fn file_size(&self) -> Option<u16> {
        match self.raw.get(2..4) {
            Some(&[hi, lo]) => Some(u16::from_be_bytes([hi, lo])),
            _ => None,
        }
    }

    /// File id echoed in the header
    pub fn file_id(&self) -> Option<FileId> {
        match self.raw.get(4..6) {
            Some(&[hi, lo]) => Some(FileId(u16::from_be_bytes([hi, lo]))),
            _ => None,
        }
    }

    /// Record length candidate: the last header byte
    pub fn record_length(&self) -> Option<u8> {
        if self.is_complete() {
            self.raw.last().copied().filter(|&len| len != 0)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_selector_paths() {
        assert_eq!(FileSelector::phonebook().to_string(), "3F00/7F10/6F3A");
        assert_eq!(FileSelector::messages().target(), Some(FileId::EF_SMS));
        assert_eq!(FileId::EF_ADN.to_bytes(), [0x6F, 0x3A]);
    }

    #[test]
    fn test_header_fields() {
        let header = FileHeader::new(Bytes::copy_from_slice(&hex!(
            "0000 0DAC 6F3A 04 00 11FF22 01 02 01 1C"
        )));
        assert_eq!(header.file_size(), Some(0x0DAC));
        assert_eq!(header.file_id(), Some(FileId::EF_ADN));
        assert_eq!(header.record_length(), Some(28));
    }

    #[test]
    fn test_short_header() {
        let header = FileHeader::new(Bytes::copy_from_slice(&hex!("0000 0D")));
        assert!(!header.is_complete());
        assert_eq!(header.file_size(), None);
        assert_eq!(header.record_length(), None);

        assert_eq!(FileHeader::default().file_id(), None);
    }
}
