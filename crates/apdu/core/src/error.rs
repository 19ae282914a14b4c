//! Error type shared by every exchange

use crate::response::ResponseError;
use crate::transport::TransportError;

/// Result type for APDU exchanges
pub type Result<T> = core::result::Result<T, Error>;

/// Why an exchange failed to yield a response
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transport failed to deliver the command or return a frame
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The returned frame was malformed
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// Another error annotated with what was being attempted
    #[error("{context}: {source}")]
    Context {
        /// What was being attempted
        context: String,
        /// Underlying failure
        source: Box<Self>,
    },
}

impl Error {
    /// Annotate this error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Innermost error beneath any context
    pub fn root(&self) -> &Self {
        let mut err = self;
        while let Self::Context { source, .. } = err {
            err = &**source;
        }
        err
    }

    /// Whether the root cause is a transport failure
    pub fn is_transport(&self) -> bool {
        matches!(self.root(), Self::Transport(_))
    }
}

/// Attach context to fallible exchange steps
pub trait ResultExt<T> {
    /// Convert the error and annotate it
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for core::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }
}
