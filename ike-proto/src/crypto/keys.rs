//! The IKE SA key schedule, RFC 7296 section 2.14, and its rekey variant
//! (section 2.18).
//!
//! ```text
//! SKEYSEED = prf(Ni | Nr, g^ir)
//! {SK_d | SK_ai | SK_ar | SK_ei | SK_er | SK_pi | SK_pr}
//!      = prf+ (SKEYSEED, Ni | Nr | SPIi | SPIr)
//! ```
//!
//! AEAD ciphers fold SK_a into SK_e: the integrity key length is zero and
//! the encryption key is sized to include the 4-octet salt (see
//! [crate::crypto::cipher::key_length]).

use crate::crypto::prf::prf_plus;
use crate::crypto::{cipher, integrity, prf, CryptoError};
use crate::definitions::params::{EncryptionAlgorithm, IntegrityAlgorithm, PseudorandomFunction};
use zeroize::Zeroize;

/// The seven keys derived for one IKE SA direction pair.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct IkeKeys {
    /// Used to derive keys for child SAs and for the next rekey.
    pub sk_d: Vec<u8>,
    /// Integrity key, initiator-to-responder direction.
    pub sk_ai: Vec<u8>,
    /// Integrity key, responder-to-initiator direction.
    pub sk_ar: Vec<u8>,
    /// Encryption key, initiator-to-responder direction.
    pub sk_ei: Vec<u8>,
    /// Encryption key, responder-to-initiator direction.
    pub sk_er: Vec<u8>,
    /// Authentication PRF key, initiator-to-responder direction.
    pub sk_pi: Vec<u8>,
    /// Authentication PRF key, responder-to-initiator direction.
    pub sk_pr: Vec<u8>,
}

/// The negotiated algorithms needed to size each of the seven derived keys.
pub struct KeySchedule {
    /// Pseudo-random function negotiated for this IKE SA.
    pub prf: PseudorandomFunction,
    /// Integrity algorithm negotiated for this IKE SA (`None` for AEAD ciphers).
    pub integrity: IntegrityAlgorithm,
    /// Encryption algorithm negotiated for this IKE SA.
    pub encryption: EncryptionAlgorithm,
    /// The negotiated Key Length transform attribute, where the cipher requires one.
    pub encryption_key_bits: Option<u16>,
}

impl KeySchedule {
    fn encryption_key_len(&self) -> Result<usize, CryptoError> {
        cipher::key_length(self.encryption, self.encryption_key_bits)
    }

    fn integrity_key_len(&self) -> usize {
        integrity::key_length(self.integrity)
    }
}

/// Computes SKEYSEED from the exchanged nonces and the DH shared secret.
pub fn skeyseed(schedule: &KeySchedule, ni: &[u8], nr: &[u8], shared_secret: &[u8]) -> Vec<u8> {
    let mut nonces = Vec::with_capacity(ni.len() + nr.len());
    nonces.extend_from_slice(ni);
    nonces.extend_from_slice(nr);
    prf::prf(schedule.prf, &nonces, shared_secret)
}

/// Derives the seven IKE SA keys from SKEYSEED, splitting `prf+` output in
/// the RFC 7296 section 2.14 order.
pub fn derive_ike_keys(
    schedule: &KeySchedule,
    skeyseed: &[u8],
    ni: &[u8],
    nr: &[u8],
    spi_i: u64,
    spi_r: u64,
) -> Result<IkeKeys, CryptoError> {
    let mut seed = Vec::with_capacity(ni.len() + nr.len() + 16);
    seed.extend_from_slice(ni);
    seed.extend_from_slice(nr);
    seed.extend_from_slice(&spi_i.to_be_bytes());
    seed.extend_from_slice(&spi_r.to_be_bytes());

    let prf_len = prf::prf_output_length(schedule.prf);
    let integrity_len = schedule.integrity_key_len();
    let encryption_len = schedule.encryption_key_len()?;

    let total = 2 * prf_len + 2 * integrity_len + 2 * encryption_len + 2 * prf_len;
    let material = prf_plus(schedule.prf, skeyseed, &seed, total)?;

    let mut cursor = 0;
    let mut take = |len: usize| -> Vec<u8> {
        let chunk = material[cursor..cursor + len].to_vec();
        cursor += len;
        chunk
    };

    let sk_d = take(prf_len);
    let sk_ai = take(integrity_len);
    let sk_ar = take(integrity_len);
    let sk_ei = take(encryption_len);
    let sk_er = take(encryption_len);
    let sk_pi = take(prf_len);
    let sk_pr = take(prf_len);

    Ok(IkeKeys {
        sk_d,
        sk_ai,
        sk_ar,
        sk_ei,
        sk_er,
        sk_pi,
        sk_pr,
    })
}

/// Rekey key derivation, RFC 7296 section 2.18: `SKEYSEED' = prf(SK_d, g^ir (new) | Ni | Nr)`.
///
/// `sk_d` from the old SA is consumed exactly once here; the caller must not
/// reuse it for anything else afterward.
pub fn rekey_skeyseed(schedule: &KeySchedule, old_sk_d: &[u8], new_shared_secret: &[u8], ni: &[u8], nr: &[u8]) -> Vec<u8> {
    let mut seed = Vec::with_capacity(new_shared_secret.len() + ni.len() + nr.len());
    seed.extend_from_slice(new_shared_secret);
    seed.extend_from_slice(ni);
    seed.extend_from_slice(nr);
    prf::prf(schedule.prf, old_sk_d, &seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> KeySchedule {
        KeySchedule {
            prf: PseudorandomFunction::HmacSha2_256,
            integrity: IntegrityAlgorithm::HmacSha2_256_128,
            encryption: EncryptionAlgorithm::AesCbc,
            encryption_key_bits: Some(128),
        }
    }

    #[test]
    fn derive_ike_keys_produces_distinct_nonzero_length_keys() {
        let schedule = schedule();
        let seed = skeyseed(&schedule, b"Ni", b"Nr", b"gir");
        let keys = derive_ike_keys(&schedule, &seed, b"Ni", b"Nr", 1, 2).unwrap();
        assert_eq!(keys.sk_d.len(), 32);
        assert_eq!(keys.sk_ai.len(), 16);
        assert_eq!(keys.sk_ei.len(), 16);
        assert_ne!(keys.sk_ai, keys.sk_ar);
        assert_ne!(keys.sk_ei, keys.sk_er);
    }

    #[test]
    fn aead_schedule_has_no_integrity_key() {
        let schedule = KeySchedule {
            prf: PseudorandomFunction::HmacSha2_256,
            integrity: IntegrityAlgorithm::None,
            encryption: EncryptionAlgorithm::AesGcm16,
            encryption_key_bits: Some(256),
        };
        let seed = skeyseed(&schedule, b"Ni", b"Nr", b"gir");
        let keys = derive_ike_keys(&schedule, &seed, b"Ni", b"Nr", 1, 2).unwrap();
        assert!(keys.sk_ai.is_empty());
        assert_eq!(keys.sk_ei.len(), 36); // 32-byte key + 4-byte salt
    }

    #[test]
    fn rekey_derivation_is_deterministic() {
        let schedule = schedule();
        let a = rekey_skeyseed(&schedule, b"old-sk-d", b"new-gir", b"Ni2", b"Nr2");
        let b = rekey_skeyseed(&schedule, b"old-sk-d", b"new-gir", b"Ni2", b"Nr2");
        assert_eq!(a, b);
    }
}
