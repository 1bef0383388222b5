//! In-process transport double.
//!
//! Every operation resolves immediately and is recorded in call order,
//! so tests can assert sequencing (join-before-send, abort-before-send)
//! rather than specific timings. Failures are injected per operation.

use async_trait::async_trait;
use mailcast_client::{ChatTransport, Roster, TransportError};

/// One recorded transport operation, in issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    /// Connection was requested.
    Connect,

    /// Roster fetch was requested.
    FetchRoster,

    /// Presence broadcast was issued.
    AnnouncePresence,

    /// Group-conversation join was requested.
    JoinGroup {
        /// Room address.
        room: String,
        /// Nickname used for the join.
        nickname: String,
    },

    /// Message send was issued.
    Send {
        /// Destination address.
        destination: String,
        /// Delivered body text.
        body: String,
        /// Kind tag passed through, if any.
        kind: Option<String>,
    },

    /// Disconnect was requested.
    Disconnect,
}

/// Transport double with call recording and failure injection.
///
/// By default every operation succeeds, the roster is empty, and the
/// session-ready and disconnected signals resolve immediately.
#[derive(Debug, Clone)]
pub struct SimTransport {
    /// Account the transport pretends to authenticate as.
    local_jid: String,

    /// Recorded operations in issue order.
    calls: Vec<TransportCall>,

    /// Simulated roster contents.
    roster: Vec<String>,

    /// Fail the connect request.
    fail_connect: bool,

    /// Fail the roster fetch.
    fail_roster: bool,

    /// Rooms whose join request fails.
    failing_rooms: Vec<String>,
}

impl SimTransport {
    /// Create a transport double authenticating as `local_jid`.
    pub fn new(local_jid: impl Into<String>) -> Self {
        Self {
            local_jid: local_jid.into(),
            calls: Vec::new(),
            roster: Vec::new(),
            fail_connect: false,
            fail_roster: false,
            failing_rooms: Vec::new(),
        }
    }

    /// Populate the simulated roster.
    #[must_use]
    pub fn with_roster(mut self, entries: Vec<String>) -> Self {
        self.roster = entries;
        self
    }

    /// Make the connect request fail.
    #[must_use]
    pub fn failing_connect(mut self) -> Self {
        self.fail_connect = true;
        self
    }

    /// Make the roster fetch fail.
    #[must_use]
    pub fn failing_roster(mut self) -> Self {
        self.fail_roster = true;
        self
    }

    /// Make joins to `room` fail.
    #[must_use]
    pub fn failing_join(mut self, room: impl Into<String>) -> Self {
        self.failing_rooms.push(room.into());
        self
    }

    /// Recorded operations in issue order.
    #[must_use]
    pub fn calls(&self) -> &[TransportCall] {
        &self.calls
    }
}

#[async_trait]
impl ChatTransport for SimTransport {
    async fn connect(&mut self) -> Result<(), TransportError> {
        self.calls.push(TransportCall::Connect);
        if self.fail_connect {
            return Err(TransportError::Connection("simulated connect failure".to_string()));
        }
        tracing::debug!(jid = %self.local_jid, "sim transport connected");
        Ok(())
    }

    async fn session_ready(&mut self) -> Result<(), TransportError> {
        // Resolves immediately: the sim session is ready once connected
        Ok(())
    }

    async fn fetch_roster(&mut self) -> Result<Roster, TransportError> {
        self.calls.push(TransportCall::FetchRoster);
        if self.fail_roster {
            return Err(TransportError::Roster("simulated roster failure".to_string()));
        }
        Ok(Roster { entries: self.roster.clone() })
    }

    async fn announce_presence(&mut self) -> Result<(), TransportError> {
        self.calls.push(TransportCall::AnnouncePresence);
        Ok(())
    }

    async fn join_group(&mut self, room: &str, nickname: &str) -> Result<(), TransportError> {
        self.calls.push(TransportCall::JoinGroup {
            room: room.to_string(),
            nickname: nickname.to_string(),
        });
        if self.failing_rooms.iter().any(|r| r == room) {
            return Err(TransportError::Join {
                room: room.to_string(),
                reason: "simulated join failure".to_string(),
            });
        }
        Ok(())
    }

    async fn send_message(
        &mut self,
        destination: &str,
        body: &str,
        kind: Option<&str>,
    ) -> Result<(), TransportError> {
        self.calls.push(TransportCall::Send {
            destination: destination.to_string(),
            body: body.to_string(),
            kind: kind.map(ToString::to_string),
        });
        tracing::info!(
            destination,
            kind = kind.unwrap_or("default"),
            bytes = body.len(),
            "sim transport delivered message"
        );
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), TransportError> {
        self.calls.push(TransportCall::Disconnect);
        Ok(())
    }

    async fn disconnected(&mut self) -> Result<(), TransportError> {
        // The sim transport is fully torn down as soon as asked
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_calls_in_issue_order() {
        let mut transport = SimTransport::new("bot@example.org");

        transport.connect().await.unwrap();
        transport.fetch_roster().await.unwrap();
        transport.send_message("user@example.com", "hi", None).await.unwrap();
        transport.disconnect().await.unwrap();

        assert_eq!(transport.calls().len(), 4);
        assert_eq!(transport.calls()[0], TransportCall::Connect);
        assert_eq!(transport.calls()[3], TransportCall::Disconnect);
    }

    #[tokio::test]
    async fn injected_join_failure_still_records_the_attempt() {
        let mut transport = SimTransport::new("bot@example.org").failing_join("room@conf");

        let err = transport.join_group("room@conf", "bot").await.unwrap_err();
        assert!(matches!(err, TransportError::Join { .. }));
        assert!(matches!(transport.calls()[0], TransportCall::JoinGroup { .. }));
    }
}
