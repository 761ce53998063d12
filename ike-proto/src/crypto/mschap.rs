//! MSCHAPv2 (RFC 2759) cryptographic primitives used by the EAP-MSCHAPv2
//! inner authentication method.

use crate::crypto::CryptoError;
use des::cipher::generic_array::GenericArray;
use des::cipher::{BlockEncrypt, KeyInit};
use des::Des;
use md4::{Digest as Md4Digest, Md4};
use sha1::Sha1;
use subtle::ConstantTimeEq;

const MAGIC1: &[u8; 39] = b"Magic server to client signing constant";
const MAGIC2: &[u8; 41] = b"Pad to make it do more than one iteration";

/// `NtPasswordHash(password) = MD4(UTF-16LE(password))`, RFC 2759 section 8.3.
pub fn nt_password_hash(password: &str) -> [u8; 16] {
    let utf16le: Vec<u8> = password
        .encode_utf16()
        .flat_map(|unit| unit.to_le_bytes())
        .collect();
    let mut hasher = Md4::new();
    hasher.update(&utf16le);
    let digest = hasher.finalize();
    let mut out = [0u8; 16];
    out.copy_from_slice(&digest);
    out
}

/// `HashNtPasswordHash(hash) = MD4(hash)`, RFC 2759 section 8.6, used in
/// `GenerateAuthenticatorResponse`.
pub fn hash_nt_password_hash(hash: &[u8; 16]) -> [u8; 16] {
    let mut hasher = Md4::new();
    hasher.update(hash);
    let digest = hasher.finalize();
    let mut out = [0u8; 16];
    out.copy_from_slice(&digest);
    out
}

/// `ChallengeHash`, RFC 2759 section 8.2: the first 8 bytes of
/// `SHA1(peer_challenge | auth_challenge | username_without_domain)`.
///
/// `username` must be ASCII; any characters up to and including the last
/// backslash are stripped as the domain prefix.
pub fn challenge_hash(
    peer_challenge: &[u8; 16],
    auth_challenge: &[u8; 16],
    username: &str,
) -> Result<[u8; 8], CryptoError> {
    if !username.is_ascii() {
        return Err(CryptoError::NonAsciiUsername);
    }
    let bare_username = username.rsplit('\\').next().unwrap_or(username);
    let mut hasher = Sha1::new();
    hasher.update(peer_challenge);
    hasher.update(auth_challenge);
    hasher.update(bare_username.as_bytes());
    let digest = hasher.finalize();
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    Ok(out)
}

/// `ChallengeResponse`, RFC 2759 section 8.1: three DES-ECB encryptions of
/// `challenge` under keys expanded from 7-byte slices of
/// `password_hash | 0x00 0x00 0x00 0x00 0x00`.
pub fn challenge_response(challenge: &[u8; 8], password_hash: &[u8; 16]) -> [u8; 24] {
    let mut zpasswordhash = [0u8; 21];
    zpasswordhash[..16].copy_from_slice(password_hash);

    let mut out = [0u8; 24];
    for (i, chunk) in zpasswordhash.chunks_exact(7).enumerate() {
        let key = des_key_from_56_bits(chunk.try_into().expect("chunk is 7 bytes"));
        let cipher = Des::new(&GenericArray::from(key));
        let mut block = GenericArray::from(*challenge);
        cipher.encrypt_block(&mut block);
        out[i * 8..i * 8 + 8].copy_from_slice(&block);
    }
    out
}

/// Expands a 56-bit (7-byte) key into the 64-bit layout DES implementations
/// expect, spreading the bits across the low 7 bits of each output byte (the
/// low bit of each byte, conventionally the parity bit, is left as zero).
fn des_key_from_56_bits(key: [u8; 7]) -> [u8; 8] {
    [
        key[0],
        (key[0] << 7) | (key[1] >> 1),
        (key[1] << 6) | (key[2] >> 2),
        (key[2] << 5) | (key[3] >> 3),
        (key[3] << 4) | (key[4] >> 4),
        (key[4] << 3) | (key[5] >> 5),
        (key[5] << 2) | (key[6] >> 6),
        key[6] << 1,
    ]
}

/// `GenerateNTResponse`, RFC 2759 section 8.1.
pub fn generate_nt_response(
    auth_challenge: &[u8; 16],
    peer_challenge: &[u8; 16],
    username: &str,
    password: &str,
) -> Result<[u8; 24], CryptoError> {
    let challenge = challenge_hash(peer_challenge, auth_challenge, username)?;
    let password_hash = nt_password_hash(password);
    Ok(challenge_response(&challenge, &password_hash))
}

/// `GenerateAuthenticatorResponse`, RFC 2759 section 8.7. Returns the
/// `"S=<40 uppercase hex chars>"` string carried in the MSCHAPv2 Success message.
pub fn generate_authenticator_response(
    password: &str,
    nt_response: &[u8; 24],
    peer_challenge: &[u8; 16],
    auth_challenge: &[u8; 16],
    username: &str,
) -> Result<String, CryptoError> {
    let password_hash = nt_password_hash(password);
    let password_hash_hash = hash_nt_password_hash(&password_hash);

    let mut first = Sha1::new();
    first.update(password_hash_hash);
    first.update(nt_response);
    first.update(MAGIC1);
    let digest = first.finalize();

    let challenge = challenge_hash(peer_challenge, auth_challenge, username)?;

    let mut second = Sha1::new();
    second.update(digest);
    second.update(challenge);
    second.update(MAGIC2);
    let final_digest = second.finalize();

    let hex: String = final_digest.iter().map(|b| format!("{b:02X}")).collect();
    Ok(format!("S={hex}"))
}

/// Recomputes the expected authenticator response and compares it against
/// `received` in constant time.
pub fn check_authenticator_response(
    received: &str,
    password: &str,
    nt_response: &[u8; 24],
    peer_challenge: &[u8; 16],
    auth_challenge: &[u8; 16],
    username: &str,
) -> Result<bool, CryptoError> {
    let expected = generate_authenticator_response(
        password,
        nt_response,
        peer_challenge,
        auth_challenge,
        username,
    )?;
    let received_upper = received.to_ascii_uppercase();
    Ok(expected.as_bytes().ct_eq(received_upper.as_bytes()).unwrap_u8() == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02X}")).collect()
    }

    fn from_hex(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    #[test]
    fn rfc2759_vectors() {
        let username = "User";
        let password = "clientPass";
        let auth_challenge: [u8; 16] = from_hex("5B5D7C7D7B3F2F3E3C2C602132262628")
            .try_into()
            .unwrap();
        let peer_challenge: [u8; 16] = from_hex("21402324255E262A28295F2B3A337C7E")
            .try_into()
            .unwrap();

        let pw_hash = nt_password_hash(password);
        assert_eq!(hex(&pw_hash), "44EBBA8D5312B8D611474411F56989AE");

        let pw_hash_hash = hash_nt_password_hash(&pw_hash);
        assert_eq!(hex(&pw_hash_hash), "41C00C584BD2D91C4017A2A12FA59F3F");

        let ch_hash = challenge_hash(&peer_challenge, &auth_challenge, username).unwrap();
        assert_eq!(hex(&ch_hash), "D02E4386BCE91226");

        let nt_response =
            generate_nt_response(&auth_challenge, &peer_challenge, username, password).unwrap();
        assert_eq!(
            hex(&nt_response),
            "82309ECD8D708B5EA08FAA3981CD83544233114A3D85D6DF"
        );

        let auth_response = generate_authenticator_response(
            password,
            &nt_response,
            &peer_challenge,
            &auth_challenge,
            username,
        )
        .unwrap();
        assert_eq!(
            auth_response,
            "S=407A5589115FD0D6209F510FE9C04566932CDA56"
        );

        assert!(check_authenticator_response(
            &auth_response,
            password,
            &nt_response,
            &peer_challenge,
            &auth_challenge,
            username
        )
        .unwrap());
    }

    #[test]
    fn non_ascii_username_rejected() {
        let peer = [0u8; 16];
        let auth = [0u8; 16];
        assert!(challenge_hash(&peer, &auth, "üser").is_err());
    }

    #[test]
    fn check_authenticator_response_rejects_tampered_value() {
        let username = "User";
        let password = "clientPass";
        let auth_challenge = [0x11u8; 16];
        let peer_challenge = [0x22u8; 16];
        let nt_response =
            generate_nt_response(&auth_challenge, &peer_challenge, username, password).unwrap();
        let mut forged = generate_authenticator_response(
            password,
            &nt_response,
            &peer_challenge,
            &auth_challenge,
            username,
        )
        .unwrap();
        forged.push('0');
        assert!(!check_authenticator_response(
            &forged,
            password,
            &nt_response,
            &peer_challenge,
            &auth_challenge,
            username
        )
        .unwrap());
    }
}
