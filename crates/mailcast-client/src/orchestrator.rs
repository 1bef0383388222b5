//! Delivery orchestrator.
//!
//! Drives one session end to end: connect, await session-ready, fetch
//! the roster, announce presence, process every recipient exactly once
//! in declaration order, then disconnect and await the terminal
//! signal. Fully sequential - no concurrent sub-operations.
//!
//! Failure policy: a transport failure after session establishment
//! aborts the remaining sequence. The session transitions to Closing,
//! a best-effort disconnect is issued, and the error propagates to the
//! process. No retry, no partial-success report.

use mailcast_core::{Envelope, GROUPCHAT_KIND, Session, SessionState};

use crate::{error::DeliveryError, transport::ChatTransport};

/// Orchestrates one delivery session over a [`ChatTransport`].
///
/// Owns the [`Session`] exclusively; no other component reads or
/// writes it. Exactly one envelope is processed per instance.
pub struct DeliveryOrchestrator<T> {
    /// Transport collaborator.
    transport: T,

    /// The interpreted message to deliver.
    envelope: Envelope,

    /// Session lifecycle state.
    session: Session,
}

impl<T: ChatTransport> DeliveryOrchestrator<T> {
    /// Create an orchestrator for one envelope.
    pub fn new(transport: T, envelope: Envelope) -> Self {
        Self { transport, envelope, session: Session::new() }
    }

    /// Current session state.
    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    /// The transport collaborator. Exposed so callers (and test
    /// doubles) can inspect it after a run.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run the delivery sequence to completion.
    ///
    /// Returns once the transport reports terminal disconnection, or
    /// with the first fatal error. There is no cancellation or timeout
    /// at this layer: a collaborator operation that never completes
    /// blocks indefinitely.
    ///
    /// # Errors
    ///
    /// [`DeliveryError::Transport`] for collaborator failures;
    /// [`DeliveryError::Session`] only on orchestrator sequencing bugs.
    pub async fn run(&mut self) -> Result<(), DeliveryError> {
        self.session.begin_connect()?;
        self.transport.connect().await?;
        self.transport.session_ready().await?;
        self.session.mark_ready()?;
        tracing::debug!(recipients = self.envelope.recipients.len(), "session ready");

        if let Err(err) = self.deliver().await {
            tracing::warn!(error = %err, "delivery aborted, closing session");
            // Best-effort teardown; the original error is what matters
            if self.session.begin_close().is_ok() {
                let _ = self.transport.disconnect().await;
            }
            return Err(err);
        }

        self.session.begin_close()?;
        self.transport.disconnect().await?;
        self.transport.disconnected().await?;
        self.session.mark_closed()?;
        tracing::debug!("session closed");

        Ok(())
    }

    /// Roster, presence, then the per-recipient join/send loop.
    ///
    /// Join for recipient *i* completes before its send is issued;
    /// the send for *i* is issued before recipient *i + 1* is touched;
    /// send completion is never awaited.
    async fn deliver(&mut self) -> Result<(), DeliveryError> {
        let roster = self.transport.fetch_roster().await?;
        self.session.mark_roster_fetched()?;
        tracing::debug!(contacts = roster.entries.len(), "roster fetched");

        self.transport.announce_presence().await?;

        self.session.begin_delivering()?;
        for target in &self.envelope.recipients {
            if target.kind.as_deref() == Some(GROUPCHAT_KIND) {
                self.transport
                    .join_group(&target.address, &self.envelope.sender_display)
                    .await?;
                tracing::debug!(room = %target.address, "joined group conversation");
            }

            self.transport
                .send_message(&target.address, &self.envelope.body, target.kind.as_deref())
                .await?;
            tracing::info!(
                destination = %target.address,
                kind = target.kind.as_deref().unwrap_or("default"),
                "message dispatched"
            );
        }

        Ok(())
    }
}
