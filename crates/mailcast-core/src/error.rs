//! Error types for the mailcast core.
//!
//! Strongly-typed errors for the two core concerns: message
//! interpretation failures (malformed input) and session lifecycle
//! violations (invalid state transitions).

use thiserror::Error;

use crate::session::SessionState;

/// Errors raised while interpreting a raw message into an envelope.
///
/// All of these are fatal at startup: the process has no message to
/// deliver if the input cannot be interpreted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A line in the header section is neither a header field nor a
    /// folded continuation of the previous field.
    #[error("malformed header line: {line:?}")]
    MalformedHeader {
        /// The offending line, verbatim.
        line: String,
    },

    /// The `To` header is absent or contains no address entries.
    #[error("missing or empty To header")]
    MissingRecipients,

    /// An address entry does not split into a local-part and a domain.
    #[error("malformed address entry: {entry:?}")]
    MalformedAddress {
        /// The offending entry, verbatim.
        entry: String,
    },
}

/// Errors raised by the session lifecycle state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Invalid state transition attempted.
    #[error("invalid state transition: cannot {operation} from {state:?}")]
    InvalidTransition {
        /// Current state when the transition was attempted.
        state: SessionState,
        /// Transition that was attempted.
        operation: String,
    },
}
