//! Parser functionality to convert network-level bytes into [IKEv2] structs
//!
//! Use the [IKEv2::try_parse] associated function as an entrypoint.

mod authentication;
mod configuration;
mod delete;
mod identification;
mod key_exchange;
mod notification;
mod packet;
mod proposal;
mod security_association;
mod traffic_selector;

use crate::definitions::params::PayloadType;
use crate::definitions::UnparseableParameter;
use thiserror::Error;

/// Failure while parsing an [crate::definitions::IKEv2] packet from network-level
/// byte representation
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ParserError {
    #[error("Buffer too small to parse the packet")]
    BufferTooSmall,
    #[error("Wrong protocol, expected IKEv2")]
    WrongProtocol,
    #[error("Parameter could not be parsed: {0:#?}")]
    UnparseableParameter(UnparseableParameter),
    #[error("Proposal numbering doesn't start at 1")]
    InvalidProposalNumberingStart,
    #[error("Proposal numbering doesn't increment by 1")]
    InvalidProposalNumbering,
    #[error("Message violates a structural rule of the protocol")]
    ProtocolViolation,
    #[error("Message body does not conform to the expected syntax")]
    InvalidSyntax,
    #[error("Message carries a critical payload this implementation does not support")]
    UnsupportedCriticalPayload,
    #[error("Message ID is out of the expected window")]
    InvalidMessageId,
    #[error("Integrity check on the message failed")]
    IntegrityCheckFailed,
    #[error("Major version is not supported")]
    InvalidMajorVersion,
    #[error("Transform attribute is not supported")]
    UnsupportedAttribute,
}

impl From<UnparseableParameter> for ParserError {
    fn from(value: UnparseableParameter) -> Self {
        Self::UnparseableParameter(value)
    }
}

impl From<crate::crypto::CryptoError> for ParserError {
    fn from(value: crate::crypto::CryptoError) -> Self {
        match value {
            crate::crypto::CryptoError::AuthenticationFailed => Self::IntegrityCheckFailed,
            _ => Self::InvalidSyntax,
        }
    }
}

/// Simple type alias for results of parser functions
///
/// The `Ok` tuple contains the resulting payload, the size it
/// consumed in bytes and the next payload type
pub type ParserResult<T> = Result<(T, usize, PayloadType), ParserError>;
