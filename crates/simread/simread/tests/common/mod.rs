//! Simulated SIM file system for scan tests
#![allow(dead_code, unreachable_pub)]

use std::collections::HashMap;

use simread::codec::gsm7;
use simread::constants::fid;
use simread_apdu_core::{Bytes, CardTransport, TransportError};

/// Status returned for record numbers past the end of a file
pub const OUT_OF_RANGE: [u8; 2] = [0x62, 0x82];

/// A linear fixed elementary file
#[derive(Debug, Clone)]
pub struct SimFile {
    pub record_length: u8,
    pub records: Vec<Vec<u8>>,
    /// Size written into the SELECT header
    pub declared_size: u16,
    /// Header record length byte
    pub header_record_length: u8,
    /// Answer a wrong Le with 6C xx instead of 67 00
    pub length_hint: bool,
    /// Status returned for one record number instead of its content
    pub fail_record: Option<(u8, [u8; 2])>,
}

impl SimFile {
    pub fn new(record_length: u8, records: Vec<Vec<u8>>) -> Self {
        Self {
            record_length,
            declared_size: (records.len() * usize::from(record_length)) as u16,
            header_record_length: record_length,
            records,
            length_hint: false,
            fail_record: None,
        }
    }

    pub fn with_declared_size(mut self, size: u16) -> Self {
        self.declared_size = size;
        self
    }

    pub fn with_header_record_length(mut self, length: u8) -> Self {
        self.header_record_length = length;
        self
    }

    pub fn with_length_hint(mut self) -> Self {
        self.length_hint = true;
        self
    }

    pub fn with_failing_record(mut self, index: u8, status: [u8; 2]) -> Self {
        self.fail_record = Some((index, status));
        self
    }

    fn header(&self, id: u16) -> Vec<u8> {
        ef_header(id, self.declared_size, self.header_record_length)
    }
}

/// GSM 11.11 response to SELECT of a linear fixed EF
pub fn ef_header(id: u16, size: u16, record_length: u8) -> Vec<u8> {
    let mut header = vec![0x00, 0x00];
    header.extend_from_slice(&size.to_be_bytes());
    header.extend_from_slice(&id.to_be_bytes());
    header.extend_from_slice(&[0x04, 0x00, 0x11, 0xFF, 0x22, 0x01, 0x02, 0x01]);
    header.push(record_length);
    header
}

/// GSM 11.11 response to SELECT of the MF or a DF
fn df_header(id: u16) -> Vec<u8> {
    let mut header = vec![0x00, 0x00, 0x00, 0x00];
    header.extend_from_slice(&id.to_be_bytes());
    header.extend_from_slice(&[0x02, 0x00, 0x00, 0x00, 0x00, 0x09, 0x13, 0x00, 0x06]);
    header
}

/// Card simulation answering SELECT, GET RESPONSE and READ RECORD
#[derive(Debug, Default)]
pub struct SimulatedSim {
    files: HashMap<u16, SimFile>,
    selected: Option<u16>,
    pending: Vec<u8>,
    /// Every command received
    pub log: Vec<Vec<u8>>,
    /// Fail every command after this many
    pub disconnect_after: Option<usize>,
}

impl SimulatedSim {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_phonebook(mut self, file: SimFile) -> Self {
        self.files.insert(fid::EF_ADN, file);
        self
    }

    pub fn with_messages(mut self, file: SimFile) -> Self {
        self.files.insert(fid::EF_SMS, file);
        self
    }

    pub fn with_disconnect_after(mut self, commands: usize) -> Self {
        self.disconnect_after = Some(commands);
        self
    }

    /// READ RECORD commands received as (record number, Le)
    pub fn record_reads(&self) -> Vec<(u8, u8)> {
        self.log
            .iter()
            .filter(|c| c.len() == 5 && c[1] == 0xB2)
            .map(|c| (c[2], c[4]))
            .collect()
    }

    fn select(&mut self, id: u16) -> Vec<u8> {
        let header = match id {
            fid::MF | fid::DF_TELECOM => Some(df_header(id)),
            _ => self.files.get(&id).map(|f| f.header(id)),
        };
        match header {
            Some(header) => {
                self.selected = Some(id);
                let len = header.len() as u8;
                self.pending = header;
                vec![0x9F, len]
            }
            None => vec![0x94, 0x04],
        }
    }

    fn get_response(&mut self, le: u8) -> Vec<u8> {
        let take = usize::from(le).min(self.pending.len());
        let mut out: Vec<u8> = self.pending.drain(..take).collect();
        out.extend_from_slice(&[0x90, 0x00]);
        out
    }

    fn read_record(&self, index: u8, le: u8) -> Vec<u8> {
        let Some(file) = self.selected.and_then(|id| self.files.get(&id)) else {
            return vec![0x94, 0x00];
        };
        if le != file.record_length {
            return if file.length_hint {
                vec![0x6C, file.record_length]
            } else {
                vec![0x67, 0x00]
            };
        }
        if let Some((failing, status)) = file.fail_record {
            if failing == index {
                return status.to_vec();
            }
        }
        match file.records.get(usize::from(index).wrapping_sub(1)) {
            Some(record) => {
                let mut out = record.clone();
                out.extend_from_slice(&[0x90, 0x00]);
                out
            }
            None => OUT_OF_RANGE.to_vec(),
        }
    }
}

impl CardTransport for SimulatedSim {
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        if self.disconnect_after.is_some_and(|n| self.log.len() >= n) {
            return Err(TransportError::Connection);
        }
        self.log.push(command.to_vec());

        let response = match command {
            [0xA0, 0xA4, 0x00, 0x00, 0x02, hi, lo] => self.select(u16::from_be_bytes([*hi, *lo])),
            [0xA0, 0xC0, 0x00, 0x00, le] => self.get_response(*le),
            [0xA0, 0xB2, index, 0x04, le] => self.read_record(*index, *le),
            _ => vec![0x6D, 0x00],
        };
        Ok(Bytes::from(response))
    }
}

/// Phonebook record: alpha identifier padded with FF, then the 14 byte footer
pub fn contact_record(name: &str, digits: &str, length: u8) -> Vec<u8> {
    let alpha_len = usize::from(length) - 14;
    let mut record: Vec<u8> = name.bytes().take(alpha_len).collect();
    record.resize(alpha_len, 0xFF);

    let bcd = semi_octets(digits);
    record.push(bcd.len() as u8 + 1);
    record.push(0x81);
    record.extend_from_slice(&bcd);
    record.resize(usize::from(length), 0xFF);
    record
}

pub fn empty_contact(length: u8) -> Vec<u8> {
    vec![0xFF; usize::from(length)]
}

/// Message store record holding an SMS-DELIVER without SMSC address
pub fn sms_record(status: u8, sender: &str, text: &str) -> Vec<u8> {
    let mut record = vec![status, 0x00, 0x04, sender.len() as u8, 0x81];
    record.extend_from_slice(&semi_octets(sender));
    record.extend_from_slice(&[0x00, 0x00]);
    record.extend_from_slice(&[0x42, 0x01, 0x31, 0x21, 0x43, 0x00, 0x80]);
    record.push(text.len() as u8);
    record.extend_from_slice(&gsm7::pack(text));
    pad_sms(record)
}

/// Message store record with an alphanumeric sender
pub fn sms_record_alphanumeric(status: u8, sender: &str, text: &str) -> Vec<u8> {
    let packed_sender = gsm7::pack(sender);
    let semi_octet_count = (sender.len() * 7).div_ceil(4) as u8;
    let mut record = vec![status, 0x00, 0x04, semi_octet_count, 0xD0];
    record.extend_from_slice(&packed_sender);
    record.extend_from_slice(&[0x00, 0x00]);
    record.extend_from_slice(&[0x52, 0x10, 0x60, 0x80, 0x00, 0x00, 0x00]);
    record.push(text.len() as u8);
    record.extend_from_slice(&gsm7::pack(text));
    pad_sms(record)
}

pub fn empty_sms() -> Vec<u8> {
    pad_sms(vec![0x00])
}

pub fn pad_sms(mut record: Vec<u8>) -> Vec<u8> {
    record.resize(176, 0xFF);
    record
}

fn semi_octets(digits: &str) -> Vec<u8> {
    digits
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            let lo = pair[0] - b'0';
            let hi = pair.get(1).map_or(0x0F, |d| d - b'0');
            (hi << 4) | lo
        })
        .collect()
}
