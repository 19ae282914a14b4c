//! Command frames for short APDUs
//!
//! SIM cards speak T=0, where a command carries either a data field (case 3)
//! or an expected length (case 2) but never both. Response data for a case 3
//! command is fetched separately with GET RESPONSE.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use crate::{Error, Response};

/// What follows the four header bytes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Body {
    /// Header only (case 1)
    #[default]
    Empty,
    /// Lc and a data field (case 3)
    Data(Bytes),
    /// Le, the number of bytes expected back (case 2)
    Expect(u8),
}

/// A command frame: CLA INS P1 P2 and its body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Class byte
    pub cla: u8,
    /// Instruction byte
    pub ins: u8,
    /// First parameter
    pub p1: u8,
    /// Second parameter
    pub p2: u8,
    /// Data field or expected length
    pub body: Body,
}

impl Command {
    /// Header-only command
    pub const fn new(cla: u8, ins: u8, p1: u8, p2: u8) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            body: Body::Empty,
        }
    }

    /// Attach a data field, replacing any expected length
    ///
    /// The data must fit a one byte Lc.
    pub fn with_data(mut self, data: impl Into<Bytes>) -> Self {
        self.body = Body::Data(data.into());
        self
    }

    /// Expect `le` bytes back, replacing any data field
    pub fn expecting(mut self, le: u8) -> Self {
        self.body = Body::Expect(le);
        self
    }

    /// Data field, if any
    pub fn data(&self) -> Option<&[u8]> {
        match &self.body {
            Body::Data(data) => Some(data),
            _ => None,
        }
    }

    /// Expected response length, if any
    pub const fn le(&self) -> Option<u8> {
        match self.body {
            Body::Expect(le) => Some(le),
            _ => None,
        }
    }

    /// Serialize to the bytes put on the wire
    pub fn to_bytes(&self) -> Bytes {
        let mut frame = BytesMut::with_capacity(5 + self.data().map_or(0, <[u8]>::len));
        frame.put_slice(&[self.cla, self.ins, self.p1, self.p2]);
        match &self.body {
            Body::Empty => {}
            Body::Data(data) => {
                // Lc wraps for oversized data; callers stay within 255 bytes
                frame.put_u8(data.len() as u8);
                frame.put_slice(data);
            }
            Body::Expect(le) => frame.put_u8(*le),
        }
        frame.freeze()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.to_bytes()))
    }
}

/// A typed command with its own response interpretation
pub trait ApduCommand {
    /// Interpreted response
    type Success;

    /// Error produced by this command
    type Error: fmt::Debug;

    /// Lift an exchange failure into this command's error type
    fn convert_error(error: Error) -> Self::Error;

    /// The frame to transmit
    fn to_command(&self) -> Command;

    /// Interpret the card's answer
    fn parse_response(response: Response) -> Result<Self::Success, Self::Error>;

    /// Serialized frame
    fn to_bytes(&self) -> Bytes {
        self.to_command().to_bytes()
    }
}

impl ApduCommand for Command {
    type Success = Response;
    type Error = Error;

    fn convert_error(error: Error) -> Self::Error {
        error
    }

    fn to_command(&self) -> Command {
        self.clone()
    }

    fn parse_response(response: Response) -> Result<Self::Success, Self::Error> {
        Ok(response)
    }
}
