//! Session-level error taxonomy: a thin wrapper that classifies errors from
//! `ike_proto` and `eap_auth` into the five buckets the state machine acts
//! on, rather than re-encoding them.

use ike_proto::definitions::params::NotifyErrorMessage;
use ike_proto::generator::GeneratorError;
use ike_proto::parser::ParserError;
use thiserror::Error;

/// Outcome of an error, classifying how the session state machine should
/// react to it.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum SessionError {
    /// Drop the offending message without any reply; no state change.
    #[error("silently dropped: {0}")]
    Silent(String),
    /// Emit a Notify carrying this error type and otherwise continue.
    #[error("protocol error, notify {0:?}")]
    ProtocolError(NotifyErrorMessage),
    /// The request violates a well-defined semantic rule.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// An external collaborator (socket, SPI allocator, EAP source) had
    /// nothing to offer.
    #[error("unavailable: {0}")]
    Unavailable(String),
    /// Unrecoverable; the IKE SA must be torn down.
    #[error("fatal: {0}")]
    Fatal(String),
}

impl From<ParserError> for SessionError {
    fn from(value: ParserError) -> Self {
        SessionError::Silent(value.to_string())
    }
}

impl From<GeneratorError> for SessionError {
    fn from(value: GeneratorError) -> Self {
        SessionError::Fatal(value.to_string())
    }
}

impl From<eap_auth::EapError> for SessionError {
    fn from(value: eap_auth::EapError) -> Self {
        match value {
            eap_auth::EapError::Malformed(msg) => SessionError::Silent(msg.to_string()),
            eap_auth::EapError::InvalidRequest(msg) => SessionError::InvalidRequest(msg.to_string()),
            eap_auth::EapError::Unavailable(msg) => SessionError::Unavailable(msg.to_string()),
        }
    }
}
