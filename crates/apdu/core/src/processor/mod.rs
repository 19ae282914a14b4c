//! Command processors sit between the executor and the transport
//!
//! A processor turns one command into one response, possibly issuing
//! follow-up commands on the way.

use std::fmt;

use tracing::debug;

use crate::command::Command;
use crate::response::Response;
use crate::transport::CardTransport;
use crate::{Result, ResultExt};

/// Instruction byte of GET RESPONSE
pub const INS_GET_RESPONSE: u8 = 0xC0;

/// Strategy for carrying out one exchange
pub trait CommandProcessor: Send + fmt::Debug {
    /// Exchange `command` over `transport`
    fn process(&self, command: &Command, transport: &mut dyn CardTransport) -> Result<Response>;
}

/// Send the command and parse whatever comes back
pub fn transmit(command: &Command, transport: &mut dyn CardTransport) -> Result<Response> {
    let raw = transport
        .transmit_raw(&command.to_bytes())
        .context(format!("transmitting {command}"))?;
    Response::from_bytes(&raw).context(format!("parsing answer to {command}"))
}

/// Single round trip with no follow-up
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl CommandProcessor for Passthrough {
    fn process(&self, command: &Command, transport: &mut dyn CardTransport) -> Result<Response> {
        transmit(command, transport)
    }
}

/// Follows a "more data available" status (9F xx or 61 xx) with GET RESPONSE
///
/// GET RESPONSE is sent with Le = SW2 and its answer replaces the original
/// response, status word included.
#[derive(Clone, Copy)]
pub struct GetResponseProcessor {
    cla: u8,
}

impl GetResponseProcessor {
    /// GET RESPONSE under class byte `cla`, sent at most once per command
    pub const fn with_class(cla: u8) -> Self {
        Self { cla }
    }
}

impl fmt::Debug for GetResponseProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GetResponseProcessor")
            .field("cla", &format_args!("{:#04X}", self.cla))
            .finish()
    }
}

impl CommandProcessor for GetResponseProcessor {
    fn process(&self, command: &Command, transport: &mut dyn CardTransport) -> Result<Response> {
        let response = transmit(command, transport)?;
        let Some(le) = response.bytes_available() else {
            return Ok(response);
        };

        debug!(le, "Card holds response data, sending GET RESPONSE");
        let get_response = Command::new(self.cla, INS_GET_RESPONSE, 0x00, 0x00).expecting(le);
        transmit(&get_response, transport)
    }
}
