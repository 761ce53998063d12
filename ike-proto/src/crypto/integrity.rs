//! HMAC-based integrity checks for the Encrypted Payload, RFC 7296 section 3.3.2 / 5.

use crate::crypto::CryptoError;
use crate::definitions::params::IntegrityAlgorithm;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

/// Length in octets of the key this algorithm consumes (the underlying HMAC
/// key length, which is the full, untruncated hash output size).
pub fn key_length(algorithm: IntegrityAlgorithm) -> usize {
    match algorithm {
        IntegrityAlgorithm::None => 0,
        IntegrityAlgorithm::HmacSha1_96 => 20,
        IntegrityAlgorithm::HmacSha2_256_128 => 32,
        IntegrityAlgorithm::HmacSha2_384_192 => 48,
        IntegrityAlgorithm::HmacSha2_512_256 => 64,
    }
}

/// Length in octets of the checksum this algorithm places on the wire (the
/// truncated MAC, per the algorithm's name).
pub fn checksum_length(algorithm: IntegrityAlgorithm) -> usize {
    match algorithm {
        IntegrityAlgorithm::None => 0,
        IntegrityAlgorithm::HmacSha1_96 => 12,
        IntegrityAlgorithm::HmacSha2_256_128 => 16,
        IntegrityAlgorithm::HmacSha2_384_192 => 24,
        IntegrityAlgorithm::HmacSha2_512_256 => 32,
    }
}

/// Computes the truncated integrity checksum over `data` with `key`.
pub fn checksum(algorithm: IntegrityAlgorithm, key: &[u8], data: &[u8]) -> Vec<u8> {
    let full = match algorithm {
        IntegrityAlgorithm::None => return Vec::new(),
        IntegrityAlgorithm::HmacSha1_96 => {
            let mut mac = Hmac::<Sha1>::new_from_slice(key).expect("HMAC accepts any key length");
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        }
        IntegrityAlgorithm::HmacSha2_256_128 => {
            let mut mac =
                Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts any key length");
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        }
        IntegrityAlgorithm::HmacSha2_384_192 => {
            let mut mac =
                Hmac::<Sha384>::new_from_slice(key).expect("HMAC accepts any key length");
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        }
        IntegrityAlgorithm::HmacSha2_512_256 => {
            let mut mac =
                Hmac::<Sha512>::new_from_slice(key).expect("HMAC accepts any key length");
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        }
    };
    full[..checksum_length(algorithm)].to_vec()
}

/// Recomputes the checksum over `data` and compares it against `received` in
/// constant time, returning [CryptoError::AuthenticationFailed] on mismatch.
pub fn verify(
    algorithm: IntegrityAlgorithm,
    key: &[u8],
    data: &[u8],
    received: &[u8],
) -> Result<(), CryptoError> {
    use subtle::ConstantTimeEq;
    let expected = checksum(algorithm, key, data);
    if expected.len() != received.len() || expected.ct_eq(received).unwrap_u8() != 1 {
        return Err(CryptoError::AuthenticationFailed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_is_truncated_to_registered_length() {
        let mac = checksum(IntegrityAlgorithm::HmacSha1_96, b"key", b"data");
        assert_eq!(mac.len(), 12);
    }

    #[test]
    fn verify_accepts_matching_checksum() {
        let key = b"some-key-material";
        let data = b"packet bytes to protect";
        let mac = checksum(IntegrityAlgorithm::HmacSha2_256_128, key, data);
        assert!(verify(IntegrityAlgorithm::HmacSha2_256_128, key, data, &mac).is_ok());
    }

    #[test]
    fn verify_rejects_tampered_data() {
        let key = b"some-key-material";
        let mac = checksum(IntegrityAlgorithm::HmacSha2_256_128, key, b"original");
        assert!(verify(IntegrityAlgorithm::HmacSha2_256_128, key, b"tampered", &mac).is_err());
    }

    #[test]
    fn none_algorithm_produces_empty_checksum() {
        assert!(checksum(IntegrityAlgorithm::None, b"key", b"data").is_empty());
    }
}
