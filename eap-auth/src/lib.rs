//! # eap-auth
//!
//! The EAP authenticator state machine, its per-method sub-state-machines
//! (SIM, AKA, AKA', MSCHAPv2), and the SIM/AKA attribute/message codec.
//!
//! This crate knows nothing about IKE exchanges or sockets; it consumes
//! EAP packets handed to it by `ike-session` and returns replies plus,
//! eventually, MSK/EMSK keying material.

#![warn(missing_docs, clippy::unwrap_used, clippy::expect_used)]

pub mod authenticator;
pub mod collaborators;
pub mod error;
pub mod message;
pub mod methods;
pub mod mschapv2;
pub mod simaka;

pub use authenticator::{EapAuthenticator, EapMethodConfig, AuthenticatorOutcome};
pub use error::EapError;
