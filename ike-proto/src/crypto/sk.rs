//! Encrypted Payload framing, RFC 7296 section 3.14: wraps the concatenated
//! bytes of the inner payload chain in an IV, cipher padding, and either an
//! HMAC checksum (non-AEAD ciphers) or an AEAD tag folded into the
//! ciphertext (RFC 5282).

use crate::crypto::{cipher, integrity, CryptoError};
use crate::definitions::params::{EncryptionAlgorithm, IntegrityAlgorithm};

/// Encrypts and frames the inner payload chain, returning the bytes that go
/// in an Encrypted Payload's body (IV, ciphertext, checksum/tag).
///
/// `aad` is the fixed IKE header plus the Encrypted Payload's own generic
/// payload header; it is only mixed in for AEAD ciphers and for the
/// non-AEAD integrity checksum, matching RFC 5282 section 3.1 and RFC 7296
/// section 2.15 respectively.
pub fn seal(
    encryption: EncryptionAlgorithm,
    integrity_alg: IntegrityAlgorithm,
    sk_e: &[u8],
    sk_a: &[u8],
    aad: &[u8],
    inner_payloads: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    // A single Pad Length octet always follows the content; AES-CBC needs
    // the preceding pad bytes to reach a block boundary too, which
    // `cipher::encrypt`'s PKCS7 padding already supplies.
    let mut plaintext = inner_payloads.to_vec();
    if encryption != EncryptionAlgorithm::AesCbc {
        plaintext.push(0);
    }
    let (iv, ciphertext) = cipher::encrypt(encryption, sk_e, &plaintext, aad)?;

    let mut out = Vec::with_capacity(iv.len() + ciphertext.len() + integrity::checksum_length(integrity_alg));
    out.extend_from_slice(&iv);
    out.extend_from_slice(&ciphertext);
    if !encryption.is_aead() {
        let mut to_mac = Vec::with_capacity(aad.len() + out.len());
        to_mac.extend_from_slice(aad);
        to_mac.extend_from_slice(&out);
        out.extend_from_slice(&integrity::checksum(integrity_alg, sk_a, &to_mac));
    }
    Ok(out)
}

/// Reverses [seal]: verifies the integrity checksum or AEAD tag, decrypts,
/// and strips the trailing Pad Length octet (and any CBC padding), leaving
/// the raw bytes of the inner payload chain.
pub fn open(
    encryption: EncryptionAlgorithm,
    integrity_alg: IntegrityAlgorithm,
    sk_e: &[u8],
    sk_a: &[u8],
    aad: &[u8],
    sk_payload_body: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let iv_len = cipher::iv_length(encryption);
    if sk_payload_body.len() < iv_len {
        return Err(CryptoError::InvalidCiphertext);
    }
    let (iv, rest) = sk_payload_body.split_at(iv_len);

    let ciphertext = if encryption.is_aead() {
        rest
    } else {
        let mac_len = integrity::checksum_length(integrity_alg);
        if rest.len() < mac_len {
            return Err(CryptoError::InvalidCiphertext);
        }
        let (ciphertext, received_mac) = rest.split_at(rest.len() - mac_len);
        let mut to_mac = Vec::with_capacity(aad.len() + iv_len + ciphertext.len());
        to_mac.extend_from_slice(aad);
        to_mac.extend_from_slice(iv);
        to_mac.extend_from_slice(ciphertext);
        integrity::verify(integrity_alg, sk_a, &to_mac, received_mac)?;
        ciphertext
    };

    let mut plaintext = cipher::decrypt(encryption, sk_e, iv, ciphertext, aad)?;
    if encryption != EncryptionAlgorithm::AesCbc {
        plaintext.pop().ok_or(CryptoError::InvalidCiphertext)?;
    }
    Ok(plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cbc_hmac_roundtrip() {
        let sk_e = vec![0x11u8; 16];
        let sk_a = vec![0x22u8; 32];
        let aad = b"header-bytes";
        let inner = b"fake inner payload bytes";
        let sealed = seal(EncryptionAlgorithm::AesCbc, IntegrityAlgorithm::HmacSha2_256_128, &sk_e, &sk_a, aad, inner).unwrap();
        let opened = open(EncryptionAlgorithm::AesCbc, IntegrityAlgorithm::HmacSha2_256_128, &sk_e, &sk_a, aad, &sealed).unwrap();
        assert_eq!(opened, inner);
    }

    #[test]
    fn gcm_roundtrip_with_no_separate_integrity() {
        let sk_e = vec![0x33u8; 20];
        let aad = b"header-bytes";
        let inner = b"another fake inner payload";
        let sealed = seal(EncryptionAlgorithm::AesGcm16, IntegrityAlgorithm::None, &sk_e, &[], aad, inner).unwrap();
        let opened = open(EncryptionAlgorithm::AesGcm16, IntegrityAlgorithm::None, &sk_e, &[], aad, &sealed).unwrap();
        assert_eq!(opened, inner);
    }

    #[test]
    fn tampered_checksum_is_rejected() {
        let sk_e = vec![0x11u8; 16];
        let sk_a = vec![0x22u8; 32];
        let aad = b"header-bytes";
        let mut sealed = seal(EncryptionAlgorithm::AesCbc, IntegrityAlgorithm::HmacSha2_256_128, &sk_e, &sk_a, aad, b"payload").unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0xff;
        assert!(open(EncryptionAlgorithm::AesCbc, IntegrityAlgorithm::HmacSha2_256_128, &sk_e, &sk_a, aad, &sealed).is_err());
    }
}
