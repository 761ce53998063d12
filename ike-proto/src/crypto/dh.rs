//! Diffie-Hellman key exchange: MODP groups (RFC 3526, modular exponentiation
//! via [num_bigint_dig]) and the Curve25519 ECP group (RFC 7748, via
//! [x25519_dalek]).
//!
//! Curve448 is registered in [KeyExchangeMethod] but not implemented here;
//! callers negotiating it receive [crate::crypto::CryptoError::UnsupportedAlgorithm].

use crate::crypto::CryptoError;
use crate::definitions::params::KeyExchangeMethod;
use num_bigint_dig::BigUint;
use rand::RngCore;
use x25519_dalek::{PublicKey, StaticSecret};

/// A generated local key exchange keypair for one IKE exchange.
pub enum LocalKeyExchange {
    /// Modular-exponentiation group: the local secret exponent and its public value.
    Modp {
        /// Local private exponent, kept only for the lifetime of the exchange.
        secret: BigUint,
        /// `g^secret mod p`, sent to the peer as the KE payload's data.
        public: Vec<u8>,
        /// The prime modulus negotiated, needed again to compute the shared secret.
        prime: BigUint,
    },
    /// Curve25519: the local static secret and its public value.
    Curve25519 {
        /// Local ephemeral secret.
        secret: StaticSecret,
        /// Public key, sent to the peer as the KE payload's data.
        public: [u8; 32],
    },
}

impl LocalKeyExchange {
    /// The bytes to place in the outbound Key Exchange payload's data field.
    pub fn public_bytes(&self) -> Vec<u8> {
        match self {
            LocalKeyExchange::Modp { public, .. } => public.clone(),
            LocalKeyExchange::Curve25519 { public, .. } => public.to_vec(),
        }
    }
}

/// Generates a fresh local keypair for the negotiated [KeyExchangeMethod].
pub fn generate(method: KeyExchangeMethod) -> Result<LocalKeyExchange, CryptoError> {
    match method {
        KeyExchangeMethod::ModP1024 | KeyExchangeMethod::ModP2048 => {
            let prime = modp_prime(method)?;
            let generator = BigUint::from(2u8);
            let mut exponent_bytes = vec![0u8; 32];
            rand::rng().fill_bytes(&mut exponent_bytes);
            let secret = BigUint::from_bytes_be(&exponent_bytes);
            let public = generator.modpow(&secret, &prime);
            Ok(LocalKeyExchange::Modp {
                secret,
                public: public.to_bytes_be(),
                prime,
            })
        }
        KeyExchangeMethod::ModP3072 | KeyExchangeMethod::ModP4096 => {
            Err(CryptoError::UnsupportedAlgorithm("unimplemented MODP group"))
        }
        KeyExchangeMethod::Curve25519 => {
            let mut bytes = [0u8; 32];
            rand::rng().fill_bytes(&mut bytes);
            let secret = StaticSecret::from(bytes);
            let public = PublicKey::from(&secret).to_bytes();
            Ok(LocalKeyExchange::Curve25519 { secret, public })
        }
        KeyExchangeMethod::Curve448 => Err(CryptoError::UnsupportedAlgorithm("Curve448")),
    }
}

/// Computes the shared secret `gir` given the local keypair and the peer's
/// Key Exchange payload data.
pub fn shared_secret(local: &LocalKeyExchange, peer_public: &[u8]) -> Result<Vec<u8>, CryptoError> {
    match local {
        LocalKeyExchange::Modp { secret, prime, .. } => {
            if peer_public.is_empty() {
                return Err(CryptoError::InvalidPublicValue);
            }
            let peer = BigUint::from_bytes_be(peer_public);
            if peer >= *prime {
                return Err(CryptoError::InvalidPublicValue);
            }
            Ok(peer.modpow(secret, prime).to_bytes_be())
        }
        LocalKeyExchange::Curve25519 { secret, .. } => {
            if peer_public.len() != 32 {
                return Err(CryptoError::InvalidPublicValue);
            }
            let mut peer_bytes = [0u8; 32];
            peer_bytes.copy_from_slice(peer_public);
            let peer = PublicKey::from(peer_bytes);
            let shared = secret.diffie_hellman(&peer);
            // All-zero output indicates a small-order/contributory-behavior point.
            if shared.as_bytes().iter().all(|b| *b == 0) {
                return Err(CryptoError::InvalidPublicValue);
            }
            Ok(shared.as_bytes().to_vec())
        }
    }
}

/// Returns the MODP prime for the given group, RFC 3526 sections 2 (1024-bit)
/// and 3 (2048-bit).
fn modp_prime(method: KeyExchangeMethod) -> Result<BigUint, CryptoError> {
    let hex = match method {
        KeyExchangeMethod::ModP1024 => {
            "FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD129024E088A67CC74\
             020BBEA63B139B22514A08798E3404DDEF9519B3CD3A431B302B0A6DF25F1437\
             4FE1356D6D51C245E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED\
             EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE65381FFFFFFFFFFFFFFFF"
        }
        KeyExchangeMethod::ModP2048 => {
            "FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD129024E088A67CC74\
             020BBEA63B139B22514A08798E3404DDEF9519B3CD3A431B302B0A6DF25F1437\
             4FE1356D6D51C245E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED\
             EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3DC2007CB8A163BF05\
             98DA48361C55D39A69163FA8FD24CF5F83655D23DCA3AD961C62F356208552BB\
             9ED529077096966D670C354E4ABC9804F1746C08CA18217C32905E462E36CE3B\
             E39E772C180E86039B2783A2EC07A28FB5C55DF06F4C52C9DE2BCBF69558171\
             83995497CEA956AE515D2261898FA051015728E5A8AACAA68FFFFFFFFFFFFFFFF"
        }
        _ => return Err(CryptoError::UnsupportedAlgorithm("unimplemented MODP group")),
    };
    Ok(BigUint::parse_bytes(hex.as_bytes(), 16).expect("MODP group prime is a valid hex literal"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve25519_roundtrip() {
        let initiator = generate(KeyExchangeMethod::Curve25519).unwrap();
        let responder = generate(KeyExchangeMethod::Curve25519).unwrap();
        let i_shared = shared_secret(&initiator, &responder.public_bytes()).unwrap();
        let r_shared = shared_secret(&responder, &initiator.public_bytes()).unwrap();
        assert_eq!(i_shared, r_shared);
    }

    #[test]
    fn modp2048_roundtrip() {
        let initiator = generate(KeyExchangeMethod::ModP2048).unwrap();
        let responder = generate(KeyExchangeMethod::ModP2048).unwrap();
        let i_shared = shared_secret(&initiator, &responder.public_bytes()).unwrap();
        let r_shared = shared_secret(&responder, &initiator.public_bytes()).unwrap();
        assert_eq!(i_shared, r_shared);
    }

    #[test]
    fn curve448_is_unsupported() {
        assert!(generate(KeyExchangeMethod::Curve448).is_err());
    }
}
