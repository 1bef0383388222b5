//! Simulation harness for mailcast delivery testing.
//!
//! Provides [`SimTransport`], an in-process implementation of the
//! transport capability that records every call in order and can
//! inject failures. Orchestrator tests assert their ordering
//! invariants against the recorded calls; the CLI uses the same type
//! as its simulation-mode transport.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod sim_transport;

pub use sim_transport::{SimTransport, TransportCall};
