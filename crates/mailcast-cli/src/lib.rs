//! Command-line wrapper around the mailcast core.
//!
//! Thin I/O layer: argument parsing, account configuration resolution,
//! logging setup, and the one-shot runtime that wires the interpreted
//! message into the delivery orchestrator.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod runtime;
