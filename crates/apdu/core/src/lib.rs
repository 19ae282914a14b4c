//! APDU plumbing for GSM SIM cards
//!
//! - [`Command`] frames and the [`ApduCommand`] trait for typed commands
//! - [`Response`] frames with [`StatusWord`] classified into [`StatusClass`]
//! - [`CardTransport`], the byte-level link to a card
//! - [`CardExecutor`], which runs commands over a transport and follows
//!   "more data available" with GET RESPONSE
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

pub use bytes::Bytes;

pub mod command;
pub mod executor;
pub mod processor;
pub mod response;
pub mod transport;

mod error;
pub use error::{Error, Result, ResultExt};

pub use command::{ApduCommand, Body, Command};
pub use executor::{CardExecutor, Executor};
pub use response::status::{StatusClass, StatusWord};
pub use response::{Response, ResponseError};
pub use transport::{CardTransport, TransportError};

/// Commonly used traits and types
pub mod prelude {
    pub use crate::{
        ApduCommand, Bytes, CardExecutor, CardTransport, Command, Error, Executor, Response,
        Result, StatusClass, StatusWord, TransportError,
    };
}
