//! Response frames: data bytes followed by SW1 SW2

pub mod status;

use bytes::Bytes;
use tracing::trace;

use status::{StatusClass, StatusWord};

/// A response frame could not be split into data and status
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    /// Fewer than the two status bytes arrived
    #[error("Response of {0} bytes has no status word")]
    Truncated(usize),
}

/// Card answer to one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    data: Bytes,
    status: StatusWord,
}

impl Response {
    /// Response with data and status
    pub fn new(data: impl Into<Bytes>, status: impl Into<StatusWord>) -> Self {
        Self {
            data: data.into(),
            status: status.into(),
        }
    }

    /// Data with a 90 00 status
    pub fn success(data: impl Into<Bytes>) -> Self {
        Self::new(data, StatusWord::new(0x90, 0x00))
    }

    /// Status word alone
    pub fn status_only(status: impl Into<StatusWord>) -> Self {
        Self::new(Bytes::new(), status)
    }

    /// Split a raw frame into data and trailing status word
    pub fn from_bytes(raw: &[u8]) -> Result<Self, ResponseError> {
        let Some((data, &[sw1, sw2])) = raw.split_last_chunk::<2>() else {
            return Err(ResponseError::Truncated(raw.len()));
        };
        let status = StatusWord::new(sw1, sw2);
        trace!(%status, len = data.len(), "Parsed response frame");
        Ok(Self::new(Bytes::copy_from_slice(data), status))
    }

    /// Response data without the status word
    pub fn payload(&self) -> &[u8] {
        &self.data
    }

    /// Consume the response, keeping its data
    pub fn into_payload(self) -> Bytes {
        self.data
    }

    /// Status word
    pub const fn status(&self) -> StatusWord {
        self.status
    }

    /// Class of the status word
    pub const fn class(&self) -> StatusClass {
        self.status.classify()
    }

    /// Whether SW1 is 90
    pub const fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Bytes waiting for GET RESPONSE, if the card announced any
    pub const fn bytes_available(&self) -> Option<u8> {
        self.status.remaining_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_frame_split() {
        let resp = Response::from_bytes(&hex!("0102039000")).unwrap();
        assert_eq!(resp.payload(), &hex!("010203"));
        assert!(resp.is_success());

        let resp = Response::from_bytes(&hex!("9F0F")).unwrap();
        assert!(resp.payload().is_empty());
        assert_eq!(resp.bytes_available(), Some(0x0F));
        assert_eq!(resp.class(), StatusClass::MoreDataAvailable(0x0F));
    }

    #[test]
    fn test_truncated_frame() {
        assert_eq!(
            Response::from_bytes(&hex!("90")),
            Err(ResponseError::Truncated(1))
        );
        assert_eq!(Response::from_bytes(&[]), Err(ResponseError::Truncated(0)));
    }

    #[test]
    fn test_constructors() {
        let resp = Response::status_only((0x94, 0x04));
        assert!(resp.payload().is_empty());
        assert_eq!(resp.status(), StatusWord::new(0x94, 0x04));
        assert!(Response::success(hex!("AA").to_vec()).is_success());
    }
}
