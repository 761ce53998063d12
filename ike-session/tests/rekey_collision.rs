//! Simultaneous-rekey collision resolution (RFC 7296 section 2.8): when
//! both peers independently issue REKEY_SA within an RTT, both sides must
//! select the same surviving SA by comparing the two candidates' exchanged
//! nonces, concatenated initiator-then-responder.

use ike_proto::crypto::keys::{derive_ike_keys, skeyseed, KeySchedule};
use ike_proto::definitions::params::{EncryptionAlgorithm, IntegrityAlgorithm, PseudorandomFunction};
use ike_session::sa::IkeSa;

fn schedule() -> KeySchedule {
    KeySchedule {
        prf: PseudorandomFunction::HmacSha2_256,
        integrity: IntegrityAlgorithm::HmacSha2_256_128,
        encryption: EncryptionAlgorithm::AesCbc,
        encryption_key_bits: Some(128),
    }
}

fn sa_with_nonces(nonce_i: &[u8], nonce_r: &[u8]) -> IkeSa {
    let schedule = schedule();
    let seed = skeyseed(&schedule, nonce_i, nonce_r, b"gir");
    let keys = derive_ike_keys(&schedule, &seed, nonce_i, nonce_r, 1, 2).unwrap();
    IkeSa::new(1, 2, nonce_i.to_vec(), nonce_r.to_vec(), schedule, keys)
}

#[test]
fn both_peers_independently_pick_the_same_survivor() {
    // Candidate A's concatenated nonce is lexicographically higher than
    // candidate B's; both an "initiator's view" and a "responder's view"
    // of the comparison must agree on A winning regardless of which side
    // holds which candidate locally.
    let candidate_a = sa_with_nonces(&[0xFF, 0x00], &[0x00]);
    let candidate_b = sa_with_nonces(&[0x00, 0xFF], &[0x00]);

    let a_wins_as_seen_by_a = candidate_a.wins_rekey_collision(&candidate_b.nonce_i, &candidate_b.nonce_r);
    let a_wins_as_seen_by_b = !candidate_b.wins_rekey_collision(&candidate_a.nonce_i, &candidate_a.nonce_r);

    assert!(a_wins_as_seen_by_a);
    assert_eq!(a_wins_as_seen_by_a, a_wins_as_seen_by_b);
}

#[test]
fn equal_nonces_never_both_claim_victory() {
    let a = sa_with_nonces(&[0x42], &[0x42]);
    let b = sa_with_nonces(&[0x42], &[0x42]);

    assert!(!a.wins_rekey_collision(&b.nonce_i, &b.nonce_r));
    assert!(!b.wins_rekey_collision(&a.nonce_i, &a.nonce_r));
}
