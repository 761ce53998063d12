//! Error taxonomy for this crate, composing into the session-level taxonomy
//! described by the reference workspace's error design.

use thiserror::Error;

/// Failure while decoding, encoding, or driving an EAP exchange.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum EapError {
    /// Decoding failure on untrusted bytes; the caller should drop the message silently.
    #[error("EAP message is malformed: {0}")]
    Malformed(&'static str),
    /// A well-defined EAP-level semantic rule was violated (e.g. a duplicate Notification).
    #[error("EAP semantic rule violated: {0}")]
    InvalidRequest(&'static str),
    /// An external collaborator (SIM/USIM, subscriber identity source) returned no result.
    #[error("external collaborator unavailable: {0}")]
    Unavailable(&'static str),
}
