//! Executors own a transport and run exchanges over it
//!
//! Exchanges are strictly sequential: each call blocks until the transport
//! answers or fails.

use std::fmt;

use tracing::{debug, instrument, trace};

use crate::Result;
use crate::command::{ApduCommand, Command};
use crate::processor::{CommandProcessor, GetResponseProcessor, Passthrough};
use crate::response::{Response, status::StatusWord};
use crate::transport::CardTransport;

/// Runs commands against a card
pub trait Executor: fmt::Debug {
    /// Exchange one command frame for one response frame
    ///
    /// A transport failure is an error; it never masquerades as a status word.
    fn exchange(&mut self, command: &Command) -> Result<Response>;

    /// Run a typed command and interpret its response
    fn execute<C: ApduCommand>(&mut self, command: &C) -> core::result::Result<C::Success, C::Error>
    where
        Self: Sized,
    {
        let response = self
            .exchange(&command.to_command())
            .map_err(C::convert_error)?;
        C::parse_response(response)
    }
}

impl<E: Executor + ?Sized> Executor for &mut E {
    fn exchange(&mut self, command: &Command) -> Result<Response> {
        (**self).exchange(command)
    }
}

/// Executor over a [`CardTransport`] with one [`CommandProcessor`]
#[derive(Debug)]
pub struct CardExecutor<T: CardTransport> {
    transport: T,
    processor: Box<dyn CommandProcessor>,
    last_status: Option<StatusWord>,
}

impl<T: CardTransport> CardExecutor<T> {
    /// Executor that sends each command exactly once
    pub fn new(transport: T) -> Self {
        Self::with_processor(transport, Box::new(Passthrough))
    }

    /// Executor that follows 9F xx / 61 xx with GET RESPONSE under class `cla`
    pub fn with_get_response(transport: T, cla: u8) -> Self {
        Self::with_processor(transport, Box::new(GetResponseProcessor::with_class(cla)))
    }

    /// Executor with a custom processor
    pub fn with_processor(transport: T, processor: Box<dyn CommandProcessor>) -> Self {
        Self {
            transport,
            processor,
            last_status: None,
        }
    }

    /// Underlying transport
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Underlying transport, mutably
    pub const fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give back the transport
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Status word of the most recent successful exchange
    pub const fn last_status(&self) -> Option<StatusWord> {
        self.last_status
    }
}

impl<T: CardTransport> Executor for CardExecutor<T> {
    #[instrument(level = "trace", skip_all, fields(command = %command))]
    fn exchange(&mut self, command: &Command) -> Result<Response> {
        match self.processor.process(command, &mut self.transport) {
            Ok(response) => {
                trace!(
                    status = %response.status(),
                    data = %hex::encode_upper(response.payload()),
                    "Exchange complete"
                );
                self.last_status = Some(response.status());
                Ok(response)
            }
            Err(err) => {
                debug!(error = %err, "Exchange failed");
                Err(err)
            }
        }
    }
}
