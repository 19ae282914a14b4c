//! Reader snapshots taken from PC/SC status queries

use pcsc::{ReaderState, State};

/// Card presence reported for a reader slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardPresence {
    /// Slot is empty or its state could not be read
    Absent,
    /// A card is inserted; holds its Answer To Reset
    Present(Vec<u8>),
}

/// A card reader as seen at enumeration time
#[derive(Debug, Clone)]
pub struct PcscReader {
    name: String,
    presence: CardPresence,
}

impl PcscReader {
    /// Reader whose state is unknown
    pub(crate) const fn unknown(name: String) -> Self {
        Self {
            name,
            presence: CardPresence::Absent,
        }
    }

    pub(crate) fn from_state(state: &ReaderState) -> Self {
        let flags = state.event_state();
        let presence = if flags.contains(State::PRESENT) && !flags.contains(State::EMPTY) {
            CardPresence::Present(state.atr().to_vec())
        } else {
            CardPresence::Absent
        };

        Self {
            name: state.name().to_string_lossy().into_owned(),
            presence,
        }
    }

    /// Reader name as reported by the PC/SC service
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Card presence in this reader
    pub const fn presence(&self) -> &CardPresence {
        &self.presence
    }

    /// Whether a card is inserted
    pub const fn has_card(&self) -> bool {
        matches!(self.presence, CardPresence::Present(_))
    }

    /// ATR of the inserted card
    pub fn atr(&self) -> Option<&[u8]> {
        match &self.presence {
            CardPresence::Present(atr) => Some(atr),
            CardPresence::Absent => None,
        }
    }
}
