//! Core
//!
//! Pure, I/O-free building blocks for mailcast: the message interpreter
//! that turns an Internet Message Format document into an [`Envelope`],
//! and the [`Session`] lifecycle state machine the delivery orchestrator
//! drives.
//!
//! # Components
//!
//! - [`interpret`]: raw message text to addressed [`Envelope`]
//! - [`Session`]: guarded state transitions for one delivery session
//! - [`FormatError`] / [`SessionError`]: typed failures for both

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod message;
mod session;

pub use error::{FormatError, SessionError};
pub use message::{Envelope, GROUPCHAT_KIND, Target, interpret};
pub use session::{Session, SessionState};
