//! One-shot delivery runtime.
//!
//! Wires the pieces together for a single process invocation: interpret
//! the raw message, construct the orchestrator over a transport, run
//! the delivery sequence, and surface the first fatal condition.

use mailcast_client::{ChatTransport, DeliveryError, DeliveryOrchestrator, Envelope};
use mailcast_core::{FormatError, interpret};
use mailcast_harness::SimTransport;
use thiserror::Error;

use crate::config::{AccountConfig, ConfigError};

/// Runtime errors. Every variant is fatal and maps to a nonzero exit.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Reading the message from stdin failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The message could not be interpreted.
    #[error("message format error: {0}")]
    Format(#[from] FormatError),

    /// No usable account credentials.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The delivery sequence aborted.
    #[error("delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
}

/// Interpret `raw_message` and deliver it as `account`.
///
/// Runs against the in-process simulation transport; a wire-protocol
/// engine is substituted by implementing [`ChatTransport`] and calling
/// [`deliver`] with it.
///
/// # Errors
///
/// Any [`RuntimeError`]; the process exits nonzero for all of them.
pub async fn run(account: &AccountConfig, raw_message: &str) -> Result<(), RuntimeError> {
    let envelope = interpret(raw_message)?;
    tracing::debug!(
        jid = %account.jid,
        recipients = envelope.recipients.len(),
        "message interpreted"
    );

    deliver(SimTransport::new(account.jid.clone()), envelope).await?;
    Ok(())
}

/// Deliver one envelope over the given transport.
///
/// # Errors
///
/// [`DeliveryError`] when the sequence aborts.
pub async fn deliver<T: ChatTransport>(
    transport: T,
    envelope: Envelope,
) -> Result<(), DeliveryError> {
    let mut orchestrator = DeliveryOrchestrator::new(transport, envelope);
    orchestrator.run().await
}
