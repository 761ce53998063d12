//! Per-method EAP state machines: SIM, AKA, AKA', and MSCHAPv2.
//!
//! Each method SM is constructed from session configuration (and, for
//! SIM/AKA/AKA', a collaborator), is driven single-threadedly by the
//! top-level authenticator ([crate::authenticator]), and on every inbound
//! EAP Request returns one of the [MethodOutcome] variants.

pub mod aka;
pub mod aka_prime;
pub mod mschapv2;
pub mod sim;

use crate::error::EapError;

/// Result of feeding one EAP Request into a method state machine.
#[derive(Debug)]
pub enum MethodOutcome {
    /// Emit this type-data as an EAP-Response and stay in the method.
    Response(Vec<u8>),
    /// Emit this acknowledgement type-data; the method has concluded
    /// successfully, but per the protocol's own ack-then-wait shape
    /// (RFC 4186/4187's signed Challenge response, draft-kamath's
    /// MSCHAPv2 Success ack) the keying material is only surfaced once the
    /// peer's own EAP Success subsequently arrives.
    AcknowledgeSuccess {
        /// Type-data to emit as an EAP-Response.
        body: Vec<u8>,
        /// Master Session Key.
        msk: [u8; 64],
        /// Extended Master Session Key.
        emsk: [u8; 64],
    },
    /// Emit this acknowledgement type-data (e.g. a Client-Error or a
    /// MSCHAPv2 Failure ack); the method has concluded with failure, but
    /// [AuthenticatorOutcome::Failure](crate::AuthenticatorOutcome::Failure)
    /// is only surfaced once the peer's own EAP Failure subsequently
    /// arrives.
    AcknowledgeFailure {
        /// Type-data to emit as an EAP-Response.
        body: Vec<u8>,
    },
}

/// Terminal method state; any further input is an error.
#[derive(Debug)]
pub struct MethodDone;

impl MethodDone {
    /// Every EAP message received after completion is a protocol error.
    pub fn reject(&self) -> Result<MethodOutcome, EapError> {
        Err(EapError::InvalidRequest(
            "EAP method already reached its Final state",
        ))
    }
}
