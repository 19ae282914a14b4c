//! PC/SC backend for [`simread_apdu_core::CardTransport`]
//!
//! [`PcscDeviceManager`] enumerates readers through the platform PC/SC service
//! and hands out a [`PcscTransport`] bound to the card in one of them.
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use simread_apdu_core::prelude::*;
//! use simread_apdu_transport_pcsc::{PcscConfig, PcscDeviceManager, ReleaseMode};
//!
//! let manager = PcscDeviceManager::new()?;
//! let reader = manager.first_reader_with_card()?;
//! let config = PcscConfig::new().with_release(ReleaseMode::Reset);
//! let transport = manager.open_reader_with_config(reader.name(), config)?;
//!
//! // GSM SIMs answer GET RESPONSE only under class A0
//! let mut executor = CardExecutor::with_get_response(transport, 0xA0);
//! let select_mf = Command::new(0xA0, 0xA4, 0x00, 0x00).with_data(vec![0x3F, 0x00]);
//! println!("{}", executor.exchange(&select_mf)?.status());
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![warn(missing_docs)]

mod config;
mod error;
mod manager;
mod reader;
mod transport;

pub use config::{PcscConfig, ReleaseMode};
pub use error::PcscError;
pub use manager::PcscDeviceManager;
pub use reader::{CardPresence, PcscReader};
pub use transport::PcscTransport;

pub use pcsc::{Protocol, Protocols};
