//! An initiator configured for MSCHAPv2 only, receiving an EAP-SIM Start
//! request from the server, must reply with a NAK listing MSCHAPv2 as its
//! only desired method.

use eap_auth::{AuthenticatorOutcome, EapAuthenticator, EapMethodConfig};

fn sim_start_request(identifier: u8) -> Vec<u8> {
    // EAP header (4 bytes) + method type (SIM=18) + subtype(Start=10) + 2
    // reserved bytes + AT_VERSION_LIST(type 15, length 1 word, 2-byte inner
    // length 0, padded to 4 bytes).
    let type_data = [10u8, 0, 0, 15, 1, 0, 0];
    let mut packet = vec![1u8, identifier, 0, 0, 18];
    packet.extend_from_slice(&type_data);
    let len = packet.len() as u16;
    packet[2] = (len >> 8) as u8;
    packet[3] = (len & 0xff) as u8;
    packet
}

#[tokio::test]
async fn mschapv2_only_initiator_naks_sim_request() {
    let mut authenticator = EapAuthenticator::new(vec![EapMethodConfig::MsChapV2 {
        username: "user".into(),
        password: "pass".into(),
    }]);

    let request = sim_start_request(7);
    let outcome = authenticator
        .handle(&request, &mut rand::rng())
        .await
        .unwrap();

    match outcome {
        AuthenticatorOutcome::Reply(bytes) => {
            assert_eq!(bytes[0], 2, "expected EAP-Response code");
            assert_eq!(bytes[4], 3, "expected NAK method type");
            assert_eq!(bytes[5], 26, "NAK desired-types field must list MSCHAPv2 (0x1A)");
        }
        other => panic!("expected a NAK reply, got {other:?}"),
    }
}
