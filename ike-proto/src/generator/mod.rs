//! Implementations for the associated function `build`/`try_build` of various IKEv2 packet
//! types that convert high-level Rust structs into network-encoded byte arrays

mod attribute;
mod authentication;
mod configuration;
mod delete;
mod identification;
mod key_exchange;
mod notification;
mod packet;
mod payload;
mod proposal;
mod security_association;
mod traffic_selector;
mod transform;

use thiserror::Error;

/// Rough estimate used to pre-size the output buffer for a list of proposals
pub(crate) const ESTIMATED_PROPOSAL_LENGTH: usize = 44;
/// Rough estimate used to pre-size the output buffer for a list of payloads
pub(crate) const ESTIMATED_PAYLOAD_LENGTH: usize = 64;

/// Failure while building network-level bytes from an [crate::definitions::IKEv2] message
#[derive(Debug, Error, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum GeneratorError {
    #[error("Too many proposals in the Security Association, maximum is 254")]
    TooManyProposals,
    #[error("Too many payloads in the message, maximum is 254")]
    TooManyPayloads,
    #[error("Nonce length must be between 16 and 256 octets")]
    InvalidNonceLength,
    #[error("SPI is too large to encode its length in a single octet")]
    SpiTooLarge,
    #[error("Too many Traffic Selectors in the payload, maximum is 255")]
    TooManyTrafficSelectors,
    #[error("all SPIs in a Delete payload must share the same length")]
    InconsistentSpiSize,
    #[error("failed to encrypt the Encrypted Payload: {0}")]
    Encryption(String),
}

impl From<crate::crypto::CryptoError> for GeneratorError {
    fn from(value: crate::crypto::CryptoError) -> Self {
        Self::Encryption(value.to_string())
    }
}
