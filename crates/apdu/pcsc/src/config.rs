//! Connection settings for the PC/SC transport

use pcsc::{Disposition, Protocols, ShareMode};

/// What to do with the card when the connection is released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleaseMode {
    /// Leave the card powered and untouched (default)
    #[default]
    Leave,
    /// Warm reset, dropping any selected file state
    Reset,
    /// Power the card down
    Unpower,
}

impl From<ReleaseMode> for Disposition {
    fn from(mode: ReleaseMode) -> Self {
        match mode {
            ReleaseMode::Leave => Self::LeaveCard,
            ReleaseMode::Reset => Self::ResetCard,
            ReleaseMode::Unpower => Self::UnpowerCard,
        }
    }
}

/// Connection settings
#[derive(Debug, Clone)]
pub struct PcscConfig {
    /// Keep other applications off the card while connected
    pub exclusive: bool,

    /// Protocols offered when connecting; SIM cards speak T=0
    pub protocols: Protocols,

    /// Reconnect once when the card reports a reset
    pub auto_reconnect: bool,

    /// Disposition applied on drop
    pub release: ReleaseMode,
}

impl Default for PcscConfig {
    fn default() -> Self {
        Self {
            exclusive: false,
            protocols: Protocols::ANY,
            auto_reconnect: true,
            release: ReleaseMode::Leave,
        }
    }
}

impl PcscConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Request exclusive access
    pub const fn with_exclusive(mut self, exclusive: bool) -> Self {
        self.exclusive = exclusive;
        self
    }

    /// Set the offered protocols
    pub const fn with_protocols(mut self, protocols: Protocols) -> Self {
        self.protocols = protocols;
        self
    }

    /// Set whether to reconnect after a card reset
    pub const fn with_auto_reconnect(mut self, auto_reconnect: bool) -> Self {
        self.auto_reconnect = auto_reconnect;
        self
    }

    /// Set the disposition applied when the transport is dropped
    pub const fn with_release(mut self, release: ReleaseMode) -> Self {
        self.release = release;
        self
    }

    pub(crate) const fn share_mode(&self) -> ShareMode {
        if self.exclusive {
            ShareMode::Exclusive
        } else {
            ShareMode::Shared
        }
    }
}
