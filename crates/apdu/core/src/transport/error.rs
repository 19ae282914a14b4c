//! Failures below the status word level

/// The exchange did not produce a response frame
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// No card is connected, or it went away
    #[error("card not connected")]
    Connection,

    /// The command went out but no answer came back
    #[error("no response from card")]
    Transmission,

    /// The reader did not answer in time
    #[error("reader timed out")]
    Timeout,

    /// Reader driver failure with its native code
    #[error("reader driver error {0:#x}")]
    Driver(i32),

    /// Any other failure
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Free-form failure
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}
