//! Short message (EF SMS) record codec
//!
//! Each record is one status byte followed by an SMS-DELIVER/SUBMIT PDU
//! prefixed with the service centre address. Only the default alphabet is
//! decoded; concatenated messages are shown part by part.

use std::fmt;

use derive_more::Display;

use crate::DecodeError;
use crate::codec::{Cursor, bcd, gsm7};

/// Data coding scheme for the GSM 7-bit default alphabet
pub const DCS_DEFAULT_ALPHABET: u8 = 0x00;

/// Type-of-number value for alphanumeric addresses
const TON_ALPHANUMERIC: u8 = 0x05;

/// Timestamp octets (year to seconds, then time zone)
const TIMESTAMP_LENGTH: usize = 7;

/// Status byte of a message slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SmsStatus {
    /// Free slot (0x00)
    #[display("FREE")]
    Free,
    /// Received, read (0x01)
    #[display("READ")]
    ReceivedRead,
    /// Received, not yet read (0x03)
    #[display("NEW")]
    ReceivedUnread,
    /// Sent (0x05)
    #[display("SENT")]
    Sent,
    /// Stored, waiting to be sent (0x07)
    #[display("UNSENT")]
    Unsent,
}

impl SmsStatus {
    /// Interpret a slot status byte; unknown values give `None`
    pub const fn from_byte(status: u8) -> Option<Self> {
        match status {
            0x00 => Some(Self::Free),
            0x01 => Some(Self::ReceivedRead),
            0x03 => Some(Self::ReceivedUnread),
            0x05 => Some(Self::Sent),
            0x07 => Some(Self::Unsent),
            _ => None,
        }
    }

    /// Whether the slot holds a message
    pub const fn is_used(&self) -> bool {
        !matches!(self, Self::Free)
    }
}

/// Message text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmsBody {
    /// Default alphabet text, truncated to the user data length
    Text(String),
    /// Any other coding scheme; the text is not decoded
    Unsupported {
        /// Data coding scheme byte
        dcs: u8,
    },
}

impl fmt::Display for SmsBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Unsupported { dcs } => write!(f, "(other coding DCS={dcs:02X})"),
        }
    }
}

/// Decoded PDU fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsPdu {
    /// First octet (message type indicator and flags)
    pub first_octet: u8,
    /// Originating or destination address
    pub sender: String,
    /// Protocol identifier
    pub protocol_id: u8,
    /// Data coding scheme
    pub dcs: u8,
    /// Service centre timestamp, `20YY-MM-DD HH:MM`
    pub timestamp: String,
    /// User data length as declared in the PDU
    pub user_data_length: u8,
    /// Message text
    pub body: SmsBody,
}

/// Decode a PDU (the record without its status byte)
pub fn decode_sms(pdu: &[u8]) -> Result<SmsPdu, DecodeError> {
    let mut cursor = Cursor::new(pdu);

    let smsc_len = cursor.byte("SMSC length")?;
    cursor.take("SMSC address", usize::from(smsc_len))?;

    let first_octet = cursor.byte("first octet")?;

    let sender_digits = cursor.byte("sender length")?;
    let sender_type = cursor.byte("sender type")?;
    let sender_raw = cursor.take("sender", usize::from(sender_digits).div_ceil(2))?;
    let sender = if (sender_type >> 4) & 0x07 == TON_ALPHANUMERIC {
        let limit = usize::from(sender_digits) * 4 / 7;
        gsm7::unpack(sender_raw).chars().take(limit).collect()
    } else {
        bcd::semi_octets(sender_raw)
    };

    let protocol_id = cursor.byte("protocol identifier")?;
    let dcs = cursor.byte("data coding scheme")?;

    let timestamp = format_timestamp(cursor.take("timestamp", TIMESTAMP_LENGTH)?);

    let user_data_length = cursor.byte("user data length")?;
    let body = if dcs == DCS_DEFAULT_ALPHABET {
        SmsBody::Text(
            gsm7::unpack(cursor.rest())
                .chars()
                .take(usize::from(user_data_length))
                .collect(),
        )
    } else {
        SmsBody::Unsupported { dcs }
    };

    Ok(SmsPdu {
        first_octet,
        sender,
        protocol_id,
        dcs,
        timestamp,
        user_data_length,
        body,
    })
}

fn format_timestamp(octets: &[u8]) -> String {
    let [year, month, day, hour, minute] = [0, 1, 2, 3, 4].map(|i| {
        let [a, b] = bcd::swapped_pair(octets[i]);
        format!("{a}{b}")
    });
    format!("20{year}-{month}-{day} {hour}:{minute}")
}

/// One occupied message slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsRecord {
    /// Record number
    pub slot: u8,
    /// Slot status
    pub status: SmsStatus,
    /// Sender address, `Unknown` when the PDU could not be decoded
    pub sender: String,
    /// Timestamp, `Error` when the PDU could not be decoded
    pub timestamp: String,
    /// Message text, or the decode failure
    pub body: String,
    /// Why decoding failed, if it did
    pub error: Option<DecodeError>,
}

impl SmsRecord {
    /// Decode the PDU of a slot, falling back to a placeholder on failure
    pub fn decode(slot: u8, status: SmsStatus, pdu: &[u8]) -> Self {
        match decode_sms(pdu) {
            Ok(decoded) => Self {
                slot,
                status,
                sender: decoded.sender,
                timestamp: decoded.timestamp,
                body: decoded.body.to_string(),
                error: None,
            },
            Err(error) => Self {
                slot,
                status,
                sender: "Unknown".to_string(),
                timestamp: "Error".to_string(),
                body: format!("decode error: {error}"),
                error: Some(error),
            },
        }
    }

    /// Received and not read yet
    pub const fn is_unread(&self) -> bool {
        matches!(self.status, SmsStatus::ReceivedUnread)
    }

    /// Whether the PDU decoded cleanly
    pub const fn is_decoded(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const DELIVER: [u8; 36] = hex!(
        "07 91 8406000000F0"
        "04"
        "0B 91 84052143 65F7"
        "00 00"
        "42013121430080"
        "0A E8329BFD4697D9EC37"
    );

    #[test]
    fn test_decode_deliver() {
        let sms = decode_sms(&DELIVER).unwrap();
        assert_eq!(sms.first_octet, 0x04);
        assert_eq!(sms.sender, "48501234567");
        assert_eq!(sms.timestamp, "2024-10-13 12:34");
        assert_eq!(sms.user_data_length, 10);
        assert_eq!(sms.body, SmsBody::Text("hellohello".to_string()));
    }

    #[test]
    fn test_alphanumeric_sender() {
        // "PLAY": 4 septets in 7 semi-octets
        let pdu = hex!(
            "00"
            "04"
            "07 D0 5066300B"
            "00 00"
            "52106080000000"
            "02 C834"
        );
        let sms = decode_sms(&pdu).unwrap();
        assert_eq!(sms.sender, "PLAY");
        assert_eq!(sms.timestamp, "2025-01-06 08:00");
        assert_eq!(sms.body, SmsBody::Text("Hi".to_string()));
    }

    #[test]
    fn test_body_truncated_to_user_data_length() {
        let mut pdu = hex!("00 04 03 81 21F3 00 00 42013121430080").to_vec();
        let text = gsm7::pack("ABCDEFG");
        pdu.push(7);
        pdu.extend_from_slice(&text);
        // 7 septets pack into 7 octets, which unpack to 8 characters
        assert_eq!(gsm7::unpack(&text).len(), 8);

        let sms = decode_sms(&pdu).unwrap();
        assert_eq!(sms.sender, "123");
        assert_eq!(sms.body, SmsBody::Text("ABCDEFG".to_string()));

        // Declared length larger than the data: never longer than declared
        let last = pdu.len() - text.len() - 1;
        pdu[last] = 200;
        let SmsBody::Text(body) = decode_sms(&pdu).unwrap().body else {
            panic!("expected text body");
        };
        assert!(body.len() <= 200);
        assert_eq!(body.len(), 8);
    }

    #[test]
    fn test_other_coding_scheme() {
        let pdu = hex!("00 04 03 81 21F3 00 08 42013121430080 04 00480069");
        let sms = decode_sms(&pdu).unwrap();
        assert_eq!(sms.body, SmsBody::Unsupported { dcs: 0x08 });
        assert_eq!(sms.body.to_string(), "(other coding DCS=08)");
    }

    #[test]
    fn test_truncated_pdu() {
        let err = decode_sms(&DELIVER[..21]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                field: "timestamp",
                needed: 7,
                available: 2
            }
        );
        assert!(matches!(
            decode_sms(&[]).unwrap_err(),
            DecodeError::Truncated {
                field: "SMSC length",
                ..
            }
        ));
    }

    #[test]
    fn test_record_placeholder() {
        let record = SmsRecord::decode(4, SmsStatus::ReceivedUnread, &DELIVER[..3]);
        assert!(record.is_unread());
        assert!(!record.is_decoded());
        assert_eq!(record.sender, "Unknown");
        assert_eq!(record.timestamp, "Error");
        assert!(record.body.starts_with("decode error: truncated SMSC address"));

        let record = SmsRecord::decode(1, SmsStatus::ReceivedRead, &DELIVER);
        assert!(record.is_decoded());
        assert_eq!(record.body, "hellohello");
    }

    #[test]
    fn test_status_byte() {
        assert_eq!(SmsStatus::from_byte(0x00), Some(SmsStatus::Free));
        assert_eq!(SmsStatus::from_byte(0x03), Some(SmsStatus::ReceivedUnread));
        assert_eq!(SmsStatus::from_byte(0x07), Some(SmsStatus::Unsent));
        assert_eq!(SmsStatus::from_byte(0x02), None);
        assert!(!SmsStatus::Free.is_used());
        assert_eq!(SmsStatus::ReceivedUnread.to_string(), "NEW");
    }
}
