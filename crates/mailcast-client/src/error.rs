//! Delivery errors.

use mailcast_core::SessionError;
use thiserror::Error;

use crate::transport::TransportError;

/// Fatal conditions raised while driving one delivery session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The transport collaborator reported a failure.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The session state machine rejected a transition. Indicates a
    /// sequencing bug in the orchestrator, not a network condition.
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}
