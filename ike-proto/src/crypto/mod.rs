//! Crypto primitives backing the wire codec: PRF/prf+ expansion, integrity checks,
//! ciphers (CBC/CTR/AEAD), Diffie-Hellman, the IKE SA key schedule, and the
//! RFC 2759 MSCHAPv2 derivations used by the EAP-MSCHAPv2 inner method.
//!
//! Nothing in this module knows about sessions or wire framing; it only turns
//! key material and plaintext into ciphertext (and back), and derives new key
//! material from negotiated algorithms.

pub mod cipher;
pub mod dh;
pub mod integrity;
pub mod keys;
pub mod mschap;
pub mod prf;
pub mod sk;

use thiserror::Error;

/// Failure in a cryptographic operation.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum CryptoError {
    #[error("algorithm {0:?} is negotiated but not implemented")]
    UnsupportedAlgorithm(&'static str),
    #[error("key material has the wrong length for this algorithm")]
    InvalidKeyLength,
    #[error("ciphertext is malformed or too short to contain its framing")]
    InvalidCiphertext,
    #[error("AEAD tag or integrity checksum did not verify")]
    AuthenticationFailed,
    #[error("Diffie-Hellman public value is invalid for the negotiated group")]
    InvalidPublicValue,
    #[error("username must be ASCII for MSCHAPv2")]
    NonAsciiUsername,
}
