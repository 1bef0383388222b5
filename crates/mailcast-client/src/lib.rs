//! Client
//!
//! Delivery orchestration for mailcast. The orchestrator owns the one
//! [`Session`] per process invocation and drives it through roster
//! retrieval, presence announcement, per-recipient group join and
//! message dispatch, and clean shutdown.
//!
//! # Architecture
//!
//! The wire-protocol engine (stream negotiation, authentication,
//! encryption, stanza codec) lives outside this crate behind the
//! [`ChatTransport`] capability trait. The orchestrator only sequences
//! operations against that trait; any implementation - in-process
//! double or real network engine - can be substituted.
//!
//! # Components
//!
//! - [`DeliveryOrchestrator`]: sequences one delivery session end to end
//! - [`ChatTransport`]: the Transport Client capability
//! - [`DeliveryError`]: fatal conditions surfaced to the process

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod orchestrator;
mod transport;

pub use error::DeliveryError;
pub use mailcast_core::{Envelope, GROUPCHAT_KIND, Session, SessionState, Target};
pub use orchestrator::DeliveryOrchestrator;
pub use transport::{ChatTransport, Roster, TransportError};
