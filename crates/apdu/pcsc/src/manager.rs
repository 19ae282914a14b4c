//! Reader enumeration and connection setup

use std::{ffi::CString, time::Duration};

use pcsc::{Context, ReaderState, Scope, State};
use tracing::{debug, trace};

use crate::{config::PcscConfig, error::PcscError, reader::PcscReader, transport::PcscTransport};

/// Entry point to the PC/SC service: lists readers and opens card connections
#[allow(missing_debug_implementations)]
pub struct PcscDeviceManager {
    context: Context,
}

impl PcscDeviceManager {
    /// Establish a user-scope PC/SC context
    pub fn new() -> Result<Self, PcscError> {
        Ok(Self {
            context: Context::establish(Scope::User)?,
        })
    }

    /// Snapshot every attached reader and the card it holds
    pub fn list_readers(&self) -> Result<Vec<PcscReader>, PcscError> {
        let names = self.context.list_readers_owned()?;
        if names.is_empty() {
            return Err(PcscError::NoReadersAvailable);
        }

        let mut states: Vec<ReaderState> = names
            .iter()
            .map(|name| ReaderState::new(name.as_c_str(), State::UNAWARE))
            .collect();

        // A zero timeout returns the current state without waiting for changes
        if let Err(e) = self
            .context
            .get_status_change(Some(Duration::ZERO), &mut states)
        {
            debug!(error = %e, "Reader status unavailable, reporting empty slots");
            return Ok(names
                .iter()
                .map(|name| PcscReader::unknown(lossy(name)))
                .collect());
        }

        let readers: Vec<_> = states.iter().map(PcscReader::from_state).collect();
        trace!(count = readers.len(), "Enumerated readers");
        Ok(readers)
    }

    /// Reader with exactly this name
    pub fn find_reader(&self, name: &str) -> Result<PcscReader, PcscError> {
        self.list_readers()?
            .into_iter()
            .find(|reader| reader.name() == name)
            .ok_or_else(|| PcscError::ReaderNotFound(name.to_string()))
    }

    /// First reader that holds a card
    pub fn first_reader_with_card(&self) -> Result<PcscReader, PcscError> {
        self.list_readers()?
            .into_iter()
            .find(PcscReader::has_card)
            .ok_or_else(|| PcscError::NoCard("no reader with a card found".to_string()))
    }

    /// Connect to the card in `name` with default settings
    pub fn open_reader(&self, name: &str) -> Result<PcscTransport, PcscError> {
        self.open_reader_with_config(name, PcscConfig::default())
    }

    /// Connect to the card in `name`
    pub fn open_reader_with_config(
        &self,
        name: &str,
        config: PcscConfig,
    ) -> Result<PcscTransport, PcscError> {
        let reader = CString::new(name).map_err(|_| PcscError::ReaderNotFound(name.to_string()))?;
        PcscTransport::connect(self.context.clone(), reader, config)
    }
}

fn lossy(name: &CString) -> String {
    name.to_string_lossy().into_owned()
}
