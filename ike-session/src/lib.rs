//! # ike-session
//!
//! The IKEv2 initiator session state machine: orchestrates IKE_SA_INIT,
//! IKE_AUTH (including an EAP hand-off to `eap_auth`), CREATE_CHILD_SA and
//! INFORMATIONAL exchanges over a caller-supplied socket, with simultaneous
//! rekey collision resolution and retransmission.
//!
//! This crate owns no socket and no kernel SA table; both are collaborator
//! traits the caller implements (see [collaborators]).

#![warn(missing_docs, clippy::unwrap_used, clippy::expect_used)]

pub mod collaborators;
pub mod config;
pub mod error;
pub mod sa;
pub mod session;
pub mod spi;

pub use error::SessionError;
pub use session::{LocalRequestKind, Session, SessionHandle, SessionState};
