//! Encryption and decryption for the IKE Encrypted Payload, RFC 7296 section 3.14.
//!
//! Non-AEAD ciphers (AES-CBC) use a separate integrity checksum (see
//! [super::integrity]) placed after the ciphertext; AEAD ciphers (AES-GCM,
//! ChaCha20-Poly1305) fold the tag into the ciphertext and carry no separate
//! integrity transform (see
//! [crate::definitions::params::EncryptionAlgorithm::is_aead]).

use crate::crypto::CryptoError;
use crate::definitions::params::EncryptionAlgorithm;
use aead::{Aead, KeyInit, Nonce, Payload as AeadPayload};
use aes::{Aes128, Aes192, Aes256};
use aes_gcm::{Aes128Gcm, Aes256Gcm};
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, StreamCipher};
use chacha20poly1305::ChaCha20Poly1305;
use rand::RngCore;

type Aes128Ctr = ctr::Ctr32BE<Aes128>;
type Aes192Ctr = ctr::Ctr32BE<Aes192>;
type Aes256Ctr = ctr::Ctr32BE<Aes256>;

/// Length in octets of the IV carried on the wire for this cipher.
pub fn iv_length(algorithm: EncryptionAlgorithm) -> usize {
    match algorithm {
        EncryptionAlgorithm::AesCbc => 16,
        EncryptionAlgorithm::AesCtr => 8,
        EncryptionAlgorithm::AesGcm8
        | EncryptionAlgorithm::AesGcm12
        | EncryptionAlgorithm::AesGcm16
        | EncryptionAlgorithm::ChaCha20Poly1305 => 8,
    }
}

/// Length in octets of the AEAD tag appended to the ciphertext, or zero for
/// non-AEAD ciphers (which instead rely on a separate integrity transform).
pub fn aead_tag_length(algorithm: EncryptionAlgorithm) -> usize {
    match algorithm {
        EncryptionAlgorithm::AesGcm8 => 8,
        EncryptionAlgorithm::AesGcm12 => 12,
        EncryptionAlgorithm::AesGcm16 | EncryptionAlgorithm::ChaCha20Poly1305 => 16,
        _ => 0,
    }
}

/// Length of the encryption key in octets, given the proposal's negotiated
/// key length attribute (in bits, where the transform allows a choice).
/// AEAD ciphers append a 4-octet salt to this key, carried as the last four
/// octets of the transform's key material per RFC 5282 section 2.
pub fn key_length(
    algorithm: EncryptionAlgorithm,
    negotiated_bits: Option<u16>,
) -> Result<usize, CryptoError> {
    let cipher_key_bytes = match algorithm {
        EncryptionAlgorithm::AesCbc | EncryptionAlgorithm::AesCtr => {
            match negotiated_bits.ok_or(CryptoError::InvalidKeyLength)? {
                128 => 16,
                192 => 24,
                256 => 32,
                _ => return Err(CryptoError::InvalidKeyLength),
            }
        }
        EncryptionAlgorithm::AesGcm8
        | EncryptionAlgorithm::AesGcm12
        | EncryptionAlgorithm::AesGcm16 => {
            match negotiated_bits.ok_or(CryptoError::InvalidKeyLength)? {
                128 => 16,
                256 => 32,
                _ => return Err(CryptoError::InvalidKeyLength),
            }
        }
        EncryptionAlgorithm::ChaCha20Poly1305 => 32,
    };
    // AES-CTR (RFC 5930 section 2) and the AEAD ciphers (RFC 5282 section 2) both
    // carry an extra 4-octet nonce/salt as the trailing bytes of the key material.
    let nonce_bytes = if algorithm.is_aead() || algorithm == EncryptionAlgorithm::AesCtr {
        4
    } else {
        0
    };
    Ok(cipher_key_bytes + nonce_bytes)
}

/// Encrypts `plaintext` under `key`, returning `(iv, ciphertext_and_tag)`.
///
/// `aad` is only used by AEAD ciphers, over the unencrypted IKE header and
/// payload headers preceding the Encrypted Payload's content, per RFC 7296
/// section 5.1 as amended by RFC 5282.
pub fn encrypt(
    algorithm: EncryptionAlgorithm,
    key: &[u8],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
    match algorithm {
        EncryptionAlgorithm::AesCbc => {
            let mut iv = vec![0u8; 16];
            rand::rng().fill_bytes(&mut iv);
            let ct = cbc_encrypt(key, &iv, plaintext)?;
            Ok((iv, ct))
        }
        EncryptionAlgorithm::AesCtr => {
            let mut iv = vec![0u8; 8];
            rand::rng().fill_bytes(&mut iv);
            let ct = ctr_apply(key, &iv, plaintext)?;
            Ok((iv, ct))
        }
        EncryptionAlgorithm::AesGcm16 => gcm_encrypt(key, plaintext, aad),
        EncryptionAlgorithm::AesGcm8 | EncryptionAlgorithm::AesGcm12 => {
            Err(CryptoError::UnsupportedAlgorithm("truncated-tag AES-GCM"))
        }
        EncryptionAlgorithm::ChaCha20Poly1305 => chacha_encrypt(key, plaintext, aad),
    }
}

/// Decrypts `ciphertext` (tag included for AEAD ciphers) under `key` and `iv`.
pub fn decrypt(
    algorithm: EncryptionAlgorithm,
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    match algorithm {
        EncryptionAlgorithm::AesCbc => cbc_decrypt(key, iv, ciphertext),
        EncryptionAlgorithm::AesCtr => ctr_apply(key, iv, ciphertext),
        EncryptionAlgorithm::AesGcm16 => gcm_decrypt(key, iv, ciphertext, aad),
        EncryptionAlgorithm::AesGcm8 | EncryptionAlgorithm::AesGcm12 => {
            Err(CryptoError::UnsupportedAlgorithm("truncated-tag AES-GCM"))
        }
        EncryptionAlgorithm::ChaCha20Poly1305 => chacha_decrypt(key, iv, ciphertext, aad),
    }
}

fn cbc_encrypt(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    match key.len() {
        16 => Ok(cbc::Encryptor::<Aes128>::new_from_slices(key, iv)
            .map_err(|_| CryptoError::InvalidKeyLength)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        24 => Ok(cbc::Encryptor::<Aes192>::new_from_slices(key, iv)
            .map_err(|_| CryptoError::InvalidKeyLength)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        32 => Ok(cbc::Encryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(|_| CryptoError::InvalidKeyLength)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        _ => Err(CryptoError::InvalidKeyLength),
    }
}

fn cbc_decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if ciphertext.is_empty() || ciphertext.len() % 16 != 0 {
        return Err(CryptoError::InvalidCiphertext);
    }
    match key.len() {
        16 => cbc::Decryptor::<Aes128>::new_from_slices(key, iv)
            .map_err(|_| CryptoError::InvalidKeyLength)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| CryptoError::InvalidCiphertext),
        24 => cbc::Decryptor::<Aes192>::new_from_slices(key, iv)
            .map_err(|_| CryptoError::InvalidKeyLength)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| CryptoError::InvalidCiphertext),
        32 => cbc::Decryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(|_| CryptoError::InvalidKeyLength)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| CryptoError::InvalidCiphertext),
        _ => Err(CryptoError::InvalidKeyLength),
    }
}

fn split_aead_key(key: &[u8]) -> Result<(&[u8], &[u8]), CryptoError> {
    if key.len() < 4 {
        return Err(CryptoError::InvalidKeyLength);
    }
    Ok(key.split_at(key.len() - 4))
}

/// AES-CTR as used by IKEv2, RFC 5930: the 16-byte initial counter block is
/// the 4-byte nonce (the trailing bytes of the key material) followed by the
/// 8-byte IV and a 4-byte big-endian counter starting at 1. CTR mode is its
/// own inverse, so this function serves both encryption and decryption.
fn ctr_apply(key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if iv.len() != 8 {
        return Err(CryptoError::InvalidCiphertext);
    }
    let (cipher_key, nonce) = split_aead_key(key)?;
    let mut counter_block = [0u8; 16];
    counter_block[..4].copy_from_slice(nonce);
    counter_block[4..12].copy_from_slice(iv);
    counter_block[12..16].copy_from_slice(&1u32.to_be_bytes());

    let mut out = data.to_vec();
    match cipher_key.len() {
        16 => {
            let mut cipher = Aes128Ctr::new_from_slices(cipher_key, &counter_block)
                .map_err(|_| CryptoError::InvalidKeyLength)?;
            cipher.apply_keystream(&mut out);
        }
        24 => {
            let mut cipher = Aes192Ctr::new_from_slices(cipher_key, &counter_block)
                .map_err(|_| CryptoError::InvalidKeyLength)?;
            cipher.apply_keystream(&mut out);
        }
        32 => {
            let mut cipher = Aes256Ctr::new_from_slices(cipher_key, &counter_block)
                .map_err(|_| CryptoError::InvalidKeyLength)?;
            cipher.apply_keystream(&mut out);
        }
        _ => return Err(CryptoError::InvalidKeyLength),
    }
    Ok(out)
}

fn build_nonce(salt: &[u8], iv: &[u8]) -> Nonce<Aes128Gcm> {
    let mut bytes = [0u8; 12];
    bytes[..salt.len()].copy_from_slice(salt);
    bytes[salt.len()..salt.len() + iv.len()].copy_from_slice(iv);
    Nonce::<Aes128Gcm>::clone_from_slice(&bytes)
}

fn gcm_encrypt(key: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
    let (cipher_key, salt) = split_aead_key(key)?;
    let mut iv = vec![0u8; 8];
    rand::rng().fill_bytes(&mut iv);
    let nonce = build_nonce(salt, &iv);
    let ct = match cipher_key.len() {
        16 => Aes128Gcm::new_from_slice(cipher_key)
            .map_err(|_| CryptoError::InvalidKeyLength)?
            .encrypt(&nonce, AeadPayload { msg: plaintext, aad })
            .map_err(|_| CryptoError::AuthenticationFailed)?,
        32 => Aes256Gcm::new_from_slice(cipher_key)
            .map_err(|_| CryptoError::InvalidKeyLength)?
            .encrypt(&nonce, AeadPayload { msg: plaintext, aad })
            .map_err(|_| CryptoError::AuthenticationFailed)?,
        _ => return Err(CryptoError::InvalidKeyLength),
    };
    Ok((iv, ct))
}

fn gcm_decrypt(
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let (cipher_key, salt) = split_aead_key(key)?;
    let nonce = build_nonce(salt, iv);
    match cipher_key.len() {
        16 => Aes128Gcm::new_from_slice(cipher_key)
            .map_err(|_| CryptoError::InvalidKeyLength)?
            .decrypt(&nonce, AeadPayload { msg: ciphertext, aad })
            .map_err(|_| CryptoError::AuthenticationFailed),
        32 => Aes256Gcm::new_from_slice(cipher_key)
            .map_err(|_| CryptoError::InvalidKeyLength)?
            .decrypt(&nonce, AeadPayload { msg: ciphertext, aad })
            .map_err(|_| CryptoError::AuthenticationFailed),
        _ => Err(CryptoError::InvalidKeyLength),
    }
}

fn chacha_encrypt(
    key: &[u8],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
    let (cipher_key, salt) = split_aead_key(key)?;
    let mut iv = vec![0u8; 8];
    rand::rng().fill_bytes(&mut iv);
    let mut nonce_bytes = [0u8; 12];
    nonce_bytes[..4].copy_from_slice(salt);
    nonce_bytes[4..].copy_from_slice(&iv);
    let cipher =
        ChaCha20Poly1305::new_from_slice(cipher_key).map_err(|_| CryptoError::InvalidKeyLength)?;
    let ct = cipher
        .encrypt(
            chacha20poly1305::Nonce::from_slice(&nonce_bytes),
            AeadPayload { msg: plaintext, aad },
        )
        .map_err(|_| CryptoError::AuthenticationFailed)?;
    Ok((iv, ct))
}

fn chacha_decrypt(
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let (cipher_key, salt) = split_aead_key(key)?;
    let mut nonce_bytes = [0u8; 12];
    nonce_bytes[..4].copy_from_slice(salt);
    nonce_bytes[4..].copy_from_slice(iv);
    let cipher =
        ChaCha20Poly1305::new_from_slice(cipher_key).map_err(|_| CryptoError::InvalidKeyLength)?;
    cipher
        .decrypt(
            chacha20poly1305::Nonce::from_slice(&nonce_bytes),
            AeadPayload {
                msg: ciphertext,
                aad,
            },
        )
        .map_err(|_| CryptoError::AuthenticationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cbc_roundtrip() {
        let key = vec![0x11u8; 16];
        let plaintext = b"hello IKEv2 world!";
        let (iv, ct) = encrypt(EncryptionAlgorithm::AesCbc, &key, plaintext, &[]).unwrap();
        let pt = decrypt(EncryptionAlgorithm::AesCbc, &key, &iv, &ct, &[]).unwrap();
        assert_eq!(pt, plaintext);
    }

    #[test]
    fn ctr_roundtrip() {
        let key = vec![0x55u8; 20]; // 16-byte key + 4-byte nonce
        let plaintext = b"counter mode protected payload";
        let (iv, ct) = encrypt(EncryptionAlgorithm::AesCtr, &key, plaintext, &[]).unwrap();
        let pt = decrypt(EncryptionAlgorithm::AesCtr, &key, &iv, &ct, &[]).unwrap();
        assert_eq!(pt, plaintext);
    }

    #[test]
    fn gcm_roundtrip() {
        let key = vec![0x22u8; 20]; // 16-byte key + 4-byte salt
        let plaintext = b"AEAD protected payload";
        let aad = b"ike header bytes";
        let (iv, ct) = encrypt(EncryptionAlgorithm::AesGcm16, &key, plaintext, aad).unwrap();
        let pt = decrypt(EncryptionAlgorithm::AesGcm16, &key, &iv, &ct, aad).unwrap();
        assert_eq!(pt, plaintext);
    }

    #[test]
    fn gcm_rejects_tampered_aad() {
        let key = vec![0x33u8; 20];
        let (iv, ct) = encrypt(EncryptionAlgorithm::AesGcm16, &key, b"data", b"aad-a").unwrap();
        assert!(decrypt(EncryptionAlgorithm::AesGcm16, &key, &iv, &ct, b"aad-b").is_err());
    }

    #[test]
    fn chacha_roundtrip() {
        let key = vec![0x44u8; 36]; // 32-byte key + 4-byte salt
        let plaintext = b"chacha protected payload";
        let (iv, ct) =
            encrypt(EncryptionAlgorithm::ChaCha20Poly1305, &key, plaintext, b"aad").unwrap();
        let pt =
            decrypt(EncryptionAlgorithm::ChaCha20Poly1305, &key, &iv, &ct, b"aad").unwrap();
        assert_eq!(pt, plaintext);
    }

    #[test]
    fn key_length_rejects_unnegotiated_bits() {
        assert!(key_length(EncryptionAlgorithm::AesCbc, Some(100)).is_err());
        assert!(key_length(EncryptionAlgorithm::AesCbc, None).is_err());
        assert_eq!(key_length(EncryptionAlgorithm::AesCbc, Some(128)).unwrap(), 16);
    }
}
