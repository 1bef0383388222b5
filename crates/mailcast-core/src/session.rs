//! Session lifecycle state machine.
//!
//! One delivery session from connect to teardown. The state machine is
//! pure: it performs no I/O and only validates transitions. The
//! delivery orchestrator owns the single [`Session`] instance and is
//! the only component that mutates it, in response to transport
//! notifications and its own issued operations.
//!
//! # State Machine
//!
//! ```text
//! ┌──────────────┐ connect  ┌────────────┐ session ready ┌───────┐
//! │ Disconnected │─────────>│ Connecting │──────────────>│ Ready │
//! └──────────────┘          └────────────┘               └───┬───┘
//!                                                            │ roster
//!                                                            ↓
//! ┌────────┐ disconnected ┌─────────┐ disconnect ┌────────────────┐
//! │ Closed │<─────────────│ Closing │<───────────│ RosterFetched  │
//! └────────┘              └─────────┘<─────┐     └───────┬────────┘
//!                                          │             │ dispatch
//!                                          │     ┌───────┴────────┐
//!                                          └─────│   Delivering   │
//!                                                └────────────────┘
//! ```
//!
//! A fatal transport failure moves any post-ready state straight to
//! `Closing`; the remaining recipients are never processed.

use crate::error::SessionError;

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Initial state - no connection requested yet.
    Disconnected,
    /// Connect requested, waiting for the session-ready notification.
    Connecting,
    /// Session established and authenticated by the transport.
    Ready,
    /// Contact roster retrieved.
    RosterFetched,
    /// Per-recipient join/send sequence in progress.
    Delivering,
    /// Disconnect requested, waiting for the terminal signal.
    Closing,
    /// Terminal state - transport reported full disconnection.
    Closed,
}

/// Session state machine.
///
/// Created once at process start, destroyed at process exit. Every
/// transition method validates the current state and returns
/// [`SessionError::InvalidTransition`] on a violation.
#[derive(Debug, Clone)]
pub struct Session {
    /// Current state.
    state: SessionState,
}

impl Session {
    /// Create a new session in [`SessionState::Disconnected`].
    pub fn new() -> Self {
        Self { state: SessionState::Disconnected }
    }

    /// Current session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Record that a connect was requested.
    ///
    /// # Errors
    ///
    /// `SessionError::InvalidTransition` unless Disconnected.
    pub fn begin_connect(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Disconnected {
            return Err(self.invalid("begin_connect"));
        }
        self.state = SessionState::Connecting;
        Ok(())
    }

    /// Record the transport's one-shot session-ready notification.
    ///
    /// # Errors
    ///
    /// `SessionError::InvalidTransition` unless Connecting.
    pub fn mark_ready(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Connecting {
            return Err(self.invalid("mark_ready"));
        }
        self.state = SessionState::Ready;
        Ok(())
    }

    /// Record a successful roster fetch.
    ///
    /// # Errors
    ///
    /// `SessionError::InvalidTransition` unless Ready.
    pub fn mark_roster_fetched(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Ready {
            return Err(self.invalid("mark_roster_fetched"));
        }
        self.state = SessionState::RosterFetched;
        Ok(())
    }

    /// Record the start of the per-recipient dispatch loop.
    ///
    /// # Errors
    ///
    /// `SessionError::InvalidTransition` unless RosterFetched.
    pub fn begin_delivering(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::RosterFetched {
            return Err(self.invalid("begin_delivering"));
        }
        self.state = SessionState::Delivering;
        Ok(())
    }

    /// Record a disconnect request.
    ///
    /// Valid after the session became ready: from the normal path
    /// (all recipients processed, Delivering) and from the fatal-abort
    /// paths (Ready or RosterFetched).
    ///
    /// # Errors
    ///
    /// `SessionError::InvalidTransition` from any other state.
    pub fn begin_close(&mut self) -> Result<(), SessionError> {
        if !matches!(
            self.state,
            SessionState::Ready | SessionState::RosterFetched | SessionState::Delivering
        ) {
            return Err(self.invalid("begin_close"));
        }
        self.state = SessionState::Closing;
        Ok(())
    }

    /// Record the transport's terminal disconnected signal.
    ///
    /// # Errors
    ///
    /// `SessionError::InvalidTransition` unless Closing.
    pub fn mark_closed(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Closing {
            return Err(self.invalid("mark_closed"));
        }
        self.state = SessionState::Closed;
        Ok(())
    }

    fn invalid(&self, operation: &str) -> SessionError {
        SessionError::InvalidTransition { state: self.state, operation: operation.to_string() }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
