//! EAP-MSCHAPv2 method state machine, draft-kamath-pppext-eap-mschapv2.

use super::MethodOutcome;
use crate::error::EapError;
use crate::mschapv2::MsChapV2Message;
use ike_proto::crypto::mschap;
use ike_proto::crypto::prf::prf_plus;
use ike_proto::definitions::params::PseudorandomFunction;
use rand::RngCore;

#[derive(Debug, PartialEq, Eq)]
enum State {
    Created,
    AwaitingSuccessOrFailure,
    Final,
}

/// EAP-MSCHAPv2, states Created -> AwaitingSuccessOrFailure -> Final.
#[derive(Debug)]
pub struct MsChapV2Method {
    username: String,
    password: String,
    state: State,
    nt_response: Option<[u8; 24]>,
    peer_challenge: Option<[u8; 16]>,
    auth_challenge: Option<[u8; 16]>,
}

impl MsChapV2Method {
    /// Constructs the method from the configured username/password pair.
    pub fn new(username: String, password: String) -> Self {
        Self {
            username,
            password,
            state: State::Created,
            nt_response: None,
            peer_challenge: None,
            auth_challenge: None,
        }
    }

    /// Feeds a decoded MSCHAPv2 type-data body into the state machine.
    pub fn handle(
        &mut self,
        body: &[u8],
        rng: &mut dyn RngCore,
    ) -> Result<MethodOutcome, EapError> {
        let message = MsChapV2Message::try_parse(body)?;
        match (&self.state, message) {
            (
                State::Created,
                MsChapV2Message::Challenge {
                    identifier,
                    challenge,
                    ..
                },
            ) => {
                let mut peer_challenge = [0u8; 16];
                rng.fill_bytes(&mut peer_challenge);

                let nt_response = mschap::generate_nt_response(
                    &challenge,
                    &peer_challenge,
                    &self.username,
                    &self.password,
                )
                .map_err(|_| EapError::Malformed("username must be ASCII"))?;

                self.auth_challenge = Some(challenge);
                self.peer_challenge = Some(peer_challenge);
                self.nt_response = Some(nt_response);
                self.state = State::AwaitingSuccessOrFailure;

                let response = MsChapV2Message::Response {
                    identifier,
                    peer_challenge,
                    nt_response,
                    name: self.username.as_bytes().to_vec(),
                };
                Ok(MethodOutcome::Response(response.build()))
            }
            (State::AwaitingSuccessOrFailure, MsChapV2Message::Success { identifier, message }) => {
                let text = String::from_utf8_lossy(&message);
                let received = text
                    .split_whitespace()
                    .next()
                    .ok_or(EapError::Malformed("MSCHAPv2 Success missing S= field"))?;

                let ok = mschap::check_authenticator_response(
                    received,
                    &self.password,
                    self.nt_response
                        .as_ref()
                        .ok_or(EapError::InvalidRequest("Success before Challenge"))?,
                    self.peer_challenge
                        .as_ref()
                        .ok_or(EapError::InvalidRequest("Success before Challenge"))?,
                    self.auth_challenge
                        .as_ref()
                        .ok_or(EapError::InvalidRequest("Success before Challenge"))?,
                    &self.username,
                )
                .map_err(|_| EapError::Malformed("username must be ASCII"))?;

                self.state = State::Final;
                let ack = MsChapV2Message::Success {
                    identifier,
                    message: vec![],
                }
                .build();
                if !ok {
                    return Ok(MethodOutcome::AcknowledgeFailure { body: ack });
                }

                let (msk, emsk) = self.derive_keys();
                Ok(MethodOutcome::AcknowledgeSuccess { body: ack, msk, emsk })
            }
            (State::AwaitingSuccessOrFailure, MsChapV2Message::Failure { identifier, .. }) => {
                self.state = State::Final;
                let ack = MsChapV2Message::Failure {
                    identifier,
                    message: vec![],
                }
                .build();
                Ok(MethodOutcome::AcknowledgeFailure { body: ack })
            }
            _ => Err(EapError::InvalidRequest(
                "MSCHAPv2 message not valid in the current state",
            )),
        }
    }

    /// Derives MSK/EMSK per draft-kamath-pppext-eap-mschapv2 section 4,
    /// keyed on the NT-response, via this crate's `prf+` expansion.
    fn derive_keys(&self) -> ([u8; 64], [u8; 64]) {
        let nt_response = self.nt_response.expect("set before reaching Success");
        let password_hash = mschap::nt_password_hash(&self.password);
        let expanded = prf_plus(
            PseudorandomFunction::HmacSha1,
            &password_hash,
            &nt_response,
            128,
        )
        .expect("128 bytes is within prf+'s maximum output");
        let mut msk = [0u8; 64];
        let mut emsk = [0u8; 64];
        msk.copy_from_slice(&expanded[..64]);
        emsk.copy_from_slice(&expanded[64..]);
        (msk, emsk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn challenge_produces_response_with_correct_framing() {
        let mut method = MsChapV2Method::new("User".into(), "clientPass".into());
        let challenge = MsChapV2Message::Challenge {
            identifier: 1,
            challenge: [0x5b; 16],
            name: b"gateway".to_vec(),
        };
        let mut rng = rand::rng();
        let outcome = method.handle(&challenge.build(), &mut rng).unwrap();
        match outcome {
            MethodOutcome::Response(bytes) => {
                let parsed = MsChapV2Message::try_parse(&bytes).unwrap();
                assert!(matches!(parsed, MsChapV2Message::Response { .. }));
            }
            _ => panic!("expected Response"),
        }
        assert_eq!(method.state, State::AwaitingSuccessOrFailure);
    }

    #[test]
    fn success_before_challenge_is_rejected() {
        let mut method = MsChapV2Method::new("User".into(), "clientPass".into());
        let success = MsChapV2Message::Success {
            identifier: 1,
            message: b"S=00".to_vec(),
        };
        let mut rng = rand::rng();
        assert!(method.handle(&success.build(), &mut rng).is_err());
    }

    #[test]
    fn rfc2759_response_round_trips_through_authenticator_check() {
        let mut method = MsChapV2Method::new("User".into(), "clientPass".into());
        let auth_challenge = [
            0x5B, 0x5D, 0x7C, 0x7D, 0x7B, 0x3F, 0x2F, 0x3E, 0x3C, 0x2C, 0x60, 0x21, 0x32, 0x26,
            0x26, 0x28,
        ];
        let challenge = MsChapV2Message::Challenge {
            identifier: 9,
            challenge: auth_challenge,
            name: vec![],
        };
        let mut rng = rand::rng();
        method.handle(&challenge.build(), &mut rng).unwrap();

        let expected_auth = mschap::generate_authenticator_response(
            "clientPass",
            method.nt_response.as_ref().unwrap(),
            method.peer_challenge.as_ref().unwrap(),
            &auth_challenge,
            "User",
        )
        .unwrap();

        let success = MsChapV2Message::Success {
            identifier: 9,
            message: expected_auth.into_bytes(),
        };
        let outcome = method.handle(&success.build(), &mut rng).unwrap();
        assert!(matches!(outcome, MethodOutcome::AcknowledgeSuccess { .. }));
    }
}
