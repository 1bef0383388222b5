//! Transport Client capability.
//!
//! The chat-protocol engine is an external collaborator. This module
//! defines the operations the orchestrator consumes from it and the
//! errors it may report. `&mut self` receivers encode the concurrency
//! model: at most one suspend-capable operation is outstanding at any
//! time.

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by the transport collaborator.
///
/// Every one of these is fatal for the current delivery: the
/// orchestrator aborts the remaining sequence without retry and with
/// no partial-success report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection or authentication failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Roster fetch was rejected or failed.
    #[error("roster fetch failed: {0}")]
    Roster(String),

    /// Group-conversation join was rejected or failed.
    #[error("failed to join {room}: {reason}")]
    Join {
        /// Group conversation that could not be joined.
        room: String,
        /// Failure reported by the collaborator.
        reason: String,
    },

    /// Message send could not be issued.
    #[error("failed to send to {destination}: {reason}")]
    Send {
        /// Destination the send was addressed to.
        destination: String,
        /// Failure reported by the collaborator.
        reason: String,
    },

    /// Disconnect failed or the session dropped with an error.
    #[error("disconnect failed: {0}")]
    Disconnect(String),
}

/// The account's server-side contact list, fetched once per session.
///
/// The delivery sequence requires the fetch to succeed but does not
/// consult the contents; they are surfaced for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    /// Contact addresses on the roster.
    pub entries: Vec<String>,
}

/// Capability set the orchestrator consumes from the chat-protocol
/// engine.
///
/// Suspension semantics per operation:
///
/// - [`fetch_roster`](Self::fetch_roster) and
///   [`join_group`](Self::join_group) suspend until the collaborator
///   acknowledges or reports failure.
/// - [`announce_presence`](Self::announce_presence) and
///   [`send_message`](Self::send_message) are fire-and-forget: only
///   issuance is awaited, never delivery confirmation.
/// - [`session_ready`](Self::session_ready) and
///   [`disconnected`](Self::disconnected) are one-shot signals.
///
/// No timeout is defined at this layer. An operation that never
/// completes blocks the orchestrator indefinitely; that gap is owned
/// by the collaborator.
#[async_trait]
pub trait ChatTransport: Send {
    /// Request connection and authentication.
    async fn connect(&mut self) -> Result<(), TransportError>;

    /// Resolve once the session is established and streams are ready.
    ///
    /// Fired exactly once per connection, after authentication and
    /// stream setup complete on the collaborator side.
    async fn session_ready(&mut self) -> Result<(), TransportError>;

    /// Fetch the account's contact roster.
    async fn fetch_roster(&mut self) -> Result<Roster, TransportError>;

    /// Broadcast availability to the network. Not acknowledged.
    async fn announce_presence(&mut self) -> Result<(), TransportError>;

    /// Join a group conversation under the given nickname, waiting for
    /// the join to be acknowledged.
    async fn join_group(&mut self, room: &str, nickname: &str) -> Result<(), TransportError>;

    /// Issue a message send. `kind` is passed through verbatim; `None`
    /// maps to the collaborator's default one-to-one semantics.
    async fn send_message(
        &mut self,
        destination: &str,
        body: &str,
        kind: Option<&str>,
    ) -> Result<(), TransportError>;

    /// Request session close.
    async fn disconnect(&mut self) -> Result<(), TransportError>;

    /// Resolve once the transport reports terminal disconnection.
    async fn disconnected(&mut self) -> Result<(), TransportError>;
}
