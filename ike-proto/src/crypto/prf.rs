//! Pseudo-random function and the prf+ expansion from RFC 7296 section 2.13.

use crate::crypto::CryptoError;
use crate::definitions::params::PseudorandomFunction;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

/// Computes `prf(key, data)` for the negotiated [PseudorandomFunction].
pub fn prf(algorithm: PseudorandomFunction, key: &[u8], data: &[u8]) -> Vec<u8> {
    match algorithm {
        PseudorandomFunction::HmacSha1 => {
            let mut mac = Hmac::<Sha1>::new_from_slice(key).expect("HMAC accepts any key length");
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        }
        PseudorandomFunction::HmacSha2_256 => {
            let mut mac =
                Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts any key length");
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        }
        PseudorandomFunction::HmacSha2_384 => {
            let mut mac =
                Hmac::<Sha384>::new_from_slice(key).expect("HMAC accepts any key length");
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        }
        PseudorandomFunction::HmacSha2_512 => {
            let mut mac =
                Hmac::<Sha512>::new_from_slice(key).expect("HMAC accepts any key length");
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        }
    }
}

/// Output length in octets of `prf(algorithm, ...)`.
pub fn prf_output_length(algorithm: PseudorandomFunction) -> usize {
    match algorithm {
        PseudorandomFunction::HmacSha1 => 20,
        PseudorandomFunction::HmacSha2_256 => 32,
        PseudorandomFunction::HmacSha2_384 => 48,
        PseudorandomFunction::HmacSha2_512 => 64,
    }
}

/// Computes `prf+(key, seed)` truncated to `length` octets, per RFC 7296 section 2.13:
///
/// ```text
/// prf+ (K,S) = T1 | T2 | T3 | T4 | ...
/// T1 = prf (K, S | 0x01)
/// T2 = prf (K, T1 | S | 0x02)
/// T3 = prf (K, T2 | S | 0x03)
/// T4 = prf (K, T3 | S | 0x04)
/// ```
///
/// The iteration counter is a single octet, so this expansion produces at
/// most `255 * prf_output_length(algorithm)` octets.
pub fn prf_plus(
    algorithm: PseudorandomFunction,
    key: &[u8],
    seed: &[u8],
    length: usize,
) -> Result<Vec<u8>, CryptoError> {
    let block_len = prf_output_length(algorithm);
    let max_len = block_len * 255;
    if length > max_len {
        return Err(CryptoError::InvalidKeyLength);
    }

    let mut output = Vec::with_capacity(length + block_len);
    let mut previous: Vec<u8> = Vec::new();
    let mut counter: u8 = 1;
    while output.len() < length {
        let mut input = Vec::with_capacity(previous.len() + seed.len() + 1);
        input.extend_from_slice(&previous);
        input.extend_from_slice(seed);
        input.push(counter);
        let block = prf(algorithm, key, &input);
        output.extend_from_slice(&block);
        previous = block;
        counter = counter.checked_add(1).ok_or(CryptoError::InvalidKeyLength)?;
    }
    output.truncate(length);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prf_plus_respects_requested_length() {
        let out = prf_plus(PseudorandomFunction::HmacSha2_256, b"key", b"seed", 10).unwrap();
        assert_eq!(out.len(), 10);
    }

    #[test]
    fn prf_plus_is_deterministic() {
        let a = prf_plus(PseudorandomFunction::HmacSha1, b"key", b"seed", 50).unwrap();
        let b = prf_plus(PseudorandomFunction::HmacSha1, b"key", b"seed", 50).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn prf_plus_first_block_matches_single_prf_call() {
        let key = b"key";
        let seed = b"seed";
        let full = prf_plus(PseudorandomFunction::HmacSha2_256, key, seed, 32).unwrap();
        let mut t1_input = seed.to_vec();
        t1_input.push(1);
        let t1 = prf(PseudorandomFunction::HmacSha2_256, key, &t1_input);
        assert_eq!(full, t1);
    }

    #[test]
    fn prf_plus_rejects_excessive_length() {
        let err = prf_plus(PseudorandomFunction::HmacSha1, b"key", b"seed", 20 * 256);
        assert!(err.is_err());
    }
}
