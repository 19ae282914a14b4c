//! Card connection implementing [`CardTransport`]

use std::{ffi::CString, fmt};

use bytes::Bytes;
use pcsc::{Card, Context, Disposition, MAX_BUFFER_SIZE};
use simread_apdu_core::{CardTransport, TransportError};
use tracing::{debug, warn};

use crate::{config::PcscConfig, error::PcscError};

/// Connection to the card in one reader
///
/// Dropping the transport releases the card using [`PcscConfig::release`].
pub struct PcscTransport {
    context: Context,
    reader: CString,
    card: Option<Card>,
    config: PcscConfig,
}

impl fmt::Debug for PcscTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PcscTransport")
            .field("reader", &self.reader)
            .field("connected", &self.card.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PcscTransport {
    pub(crate) fn connect(
        context: Context,
        reader: CString,
        config: PcscConfig,
    ) -> Result<Self, PcscError> {
        let mut transport = Self {
            context,
            reader,
            card: None,
            config,
        };
        transport.ensure_card()?;
        Ok(transport)
    }

    /// Reader this transport is bound to
    pub fn reader_name(&self) -> String {
        self.reader.to_string_lossy().into_owned()
    }

    fn no_card(&self) -> PcscError {
        PcscError::NoCard(self.reader_name())
    }

    fn ensure_card(&mut self) -> Result<(), PcscError> {
        if self.card.is_some() {
            return Ok(());
        }

        let card = self
            .context
            .connect(
                &self.reader,
                self.config.share_mode(),
                self.config.protocols,
            )
            .map_err(|e| match e {
                pcsc::Error::NoSmartcard => self.no_card(),
                other => other.into(),
            })?;
        debug!(reader = ?self.reader, "Card connected");
        self.card = Some(card);
        Ok(())
    }

    fn transmit_once(&mut self, command: &[u8]) -> Result<Bytes, pcsc::Error> {
        let mut buffer = [0u8; MAX_BUFFER_SIZE];
        match self.card.as_ref() {
            Some(card) => card
                .transmit(command, &mut buffer)
                .map(Bytes::copy_from_slice),
            None => Err(pcsc::Error::NoSmartcard),
        }
    }

    fn transmit(&mut self, command: &[u8]) -> Result<Bytes, PcscError> {
        self.ensure_card()?;

        match self.transmit_once(command) {
            Ok(response) => Ok(response),
            Err(e @ (pcsc::Error::ResetCard | pcsc::Error::RemovedCard)) => {
                warn!(reader = ?self.reader, error = %e, "Card connection lost");
                self.card = None;

                // A reset card keeps its contents; one fresh connection is worth a retry
                if e == pcsc::Error::ResetCard && self.config.auto_reconnect {
                    self.ensure_card()?;
                    return self.transmit_once(command).map_err(Into::into);
                }
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn release(&mut self, disposition: Disposition) {
        let Some(card) = self.card.take() else {
            return;
        };
        if let Err((_, e)) = card.disconnect(disposition) {
            debug!(reader = ?self.reader, error = %e, "Card release failed");
        }
    }
}

impl CardTransport for PcscTransport {
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        Ok(self.transmit(command)?)
    }
}

impl Drop for PcscTransport {
    fn drop(&mut self) {
        self.release(self.config.release.into());
    }
}
