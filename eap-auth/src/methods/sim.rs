//! EAP-SIM (RFC 4186) method state machine.

use super::MethodOutcome;
use crate::collaborators::{SimAuthenticator, SubscriberIdentitySource};
use crate::error::EapError;
use crate::simaka::{mac, Attribute, SimAkaKeys, SimAkaMessage, SimAkaSubtype};
use rand::RngCore;
use std::sync::Arc;

const SUPPORTED_VERSION: u16 = 1;

#[derive(Debug, PartialEq, Eq)]
enum State {
    Created,
    Start,
    Challenge,
    Final,
}

/// EAP-SIM, states Created -> Start -> Challenge -> Final.
pub struct SimMethod {
    identity_source: Arc<dyn SubscriberIdentitySource>,
    authenticator: Arc<dyn SimAuthenticator>,
    state: State,
    notification_seen: bool,
    nonce_mt: Option<[u8; 16]>,
    identity: Option<Vec<u8>>,
    keys: Option<SimAkaKeys>,
}

impl SimMethod {
    /// Constructs the method from the subscriber identity source and SIM
    /// authentication collaborators.
    pub fn new(
        identity_source: Arc<dyn SubscriberIdentitySource>,
        authenticator: Arc<dyn SimAuthenticator>,
    ) -> Self {
        Self {
            identity_source,
            authenticator,
            state: State::Created,
            notification_seen: false,
            nonce_mt: None,
            identity: None,
            keys: None,
        }
    }

    /// Feeds a decoded EAP-SIM type-data body (plus the full EAP packet with
    /// AT_MAC zeroed, needed for MAC verification) into the state machine.
    pub async fn handle(
        &mut self,
        body: &[u8],
        packet_with_mac_zeroed: &[u8],
        identifier: u8,
        rng: &mut dyn RngCore,
    ) -> Result<MethodOutcome, EapError> {
        let message = SimAkaMessage::try_parse(body)?;

        if message.subtype == SimAkaSubtype::Notification {
            return self.handle_notification(&message);
        }

        match (&self.state, message.subtype) {
            (State::Created, SimAkaSubtype::Start) => self.handle_start(&message, rng).await,
            (State::Start, SimAkaSubtype::Start) => self.handle_start(&message, rng).await,
            (State::Challenge, SimAkaSubtype::Challenge) => {
                self.handle_challenge(&message, packet_with_mac_zeroed, identifier, rng)
                    .await
            }
            _ => Err(EapError::InvalidRequest(
                "EAP-SIM message not valid in the current state",
            )),
        }
    }

    fn handle_notification(
        &mut self,
        message: &SimAkaMessage,
    ) -> Result<MethodOutcome, EapError> {
        if self.notification_seen {
            return Err(EapError::InvalidRequest(
                "at most one SIM/Notification is accepted per session",
            ));
        }
        self.notification_seen = true;

        let code = match message.find(|a| matches!(a, Attribute::Notification { .. })) {
            Some(Attribute::Notification { code }) => *code,
            _ => return Err(EapError::Malformed("Notification missing AT_NOTIFICATION")),
        };
        let pre_challenge = code & 0x4000 != 0;
        let success = code & 0x8000 == 0;
        if pre_challenge && self.state != State::Created && self.state != State::Start {
            return Err(EapError::InvalidRequest(
                "pre-challenge Notification may only appear before Challenge",
            ));
        }
        if !pre_challenge && self.state != State::Challenge && self.state != State::Final {
            return Err(EapError::InvalidRequest(
                "post-challenge Notification may only appear after Challenge",
            ));
        }

        let response = SimAkaMessage {
            subtype: SimAkaSubtype::Notification,
            attributes: vec![Attribute::Notification { code }],
        };
        if !success && !pre_challenge {
            self.state = State::Final;
            return Ok(MethodOutcome::Response(response.build()));
        }
        Ok(MethodOutcome::Response(response.build()))
    }

    async fn handle_start(
        &mut self,
        message: &SimAkaMessage,
        rng: &mut dyn RngCore,
    ) -> Result<MethodOutcome, EapError> {
        let forbidden_present = message.attributes.iter().any(|a| {
            matches!(
                a,
                Attribute::Mac(_) | Attribute::Iv(_) | Attribute::EncrData(_)
            )
        });
        if forbidden_present {
            return self.client_error();
        }
        let version_list = message.find(|a| matches!(a, Attribute::VersionList(_)));
        if version_list.is_none() {
            return self.client_error();
        }
        let id_req_count = message
            .attributes
            .iter()
            .filter(|a| {
                matches!(
                    a,
                    Attribute::PermanentIdReq | Attribute::AnyIdReq | Attribute::FullauthIdReq
                )
            })
            .count();
        if id_req_count > 1 {
            return self.client_error();
        }

        let identity = self
            .identity_source
            .get_subscriber_id()
            .await
            .ok_or(EapError::Unavailable("subscriber identity unavailable"))?;
        let mut prefixed = vec![b'1'];
        prefixed.extend_from_slice(identity.as_bytes());
        self.identity = Some(prefixed.clone());

        let mut nonce_mt = [0u8; 16];
        rng.fill_bytes(&mut nonce_mt);
        self.nonce_mt = Some(nonce_mt);
        self.state = State::Challenge;

        let response = SimAkaMessage {
            subtype: SimAkaSubtype::Start,
            attributes: vec![
                Attribute::Identity(prefixed),
                Attribute::Nonce(nonce_mt),
                Attribute::SelectedVersion(SUPPORTED_VERSION),
            ],
        };
        Ok(MethodOutcome::Response(response.build()))
    }

    async fn handle_challenge(
        &mut self,
        message: &SimAkaMessage,
        packet_with_mac_zeroed: &[u8],
        identifier: u8,
        _rng: &mut dyn RngCore,
    ) -> Result<MethodOutcome, EapError> {
        let rands = match message.find(|a| matches!(a, Attribute::Rand(_))) {
            Some(Attribute::Rand(r)) => r.clone(),
            _ => return self.client_error(),
        };
        let received_mac = match message.find(|a| matches!(a, Attribute::Mac(_))) {
            Some(Attribute::Mac(m)) => *m,
            _ => return self.client_error(),
        };

        let mut kcs = Vec::with_capacity(rands.len());
        for rand_value in &rands {
            let triplet = self
                .authenticator
                .authenticate_sim(*rand_value)
                .await
                .ok_or(EapError::Unavailable("SIM authenticator unavailable"))?;
            kcs.push(triplet.kc);
        }

        let identity = self
            .identity
            .clone()
            .ok_or(EapError::InvalidRequest("Challenge received before Start"))?;
        let nonce_mt = self
            .nonce_mt
            .ok_or(EapError::InvalidRequest("Challenge received before Start"))?;
        let version_list_bytes = SUPPORTED_VERSION.to_be_bytes();
        let selected_version = SUPPORTED_VERSION.to_be_bytes();
        let keys = crate::simaka::keys::derive_sim_keys(
            &identity,
            &kcs,
            &nonce_mt,
            &version_list_bytes,
            &selected_version,
        );

        let mac_ok = mac::verify(&keys.k_aut, packet_with_mac_zeroed, &nonce_mt, &received_mac);
        self.keys = Some(keys.clone());
        self.state = State::Final;

        if !mac_ok {
            return Ok(MethodOutcome::AcknowledgeFailure {
                body: self.client_error_body(),
            });
        }

        let ack = SimAkaMessage {
            subtype: SimAkaSubtype::Challenge,
            attributes: vec![Attribute::Mac([0u8; 16])],
        };
        let body = mac::sign_response(identifier, crate::message::EapMethodType::Sim, &ack, &keys.k_aut, b"");

        Ok(MethodOutcome::AcknowledgeSuccess {
            body,
            msk: keys.msk,
            emsk: keys.emsk,
        })
    }

    fn client_error_body(&mut self) -> Vec<u8> {
        let response = SimAkaMessage {
            subtype: SimAkaSubtype::ClientError,
            attributes: vec![Attribute::ClientErrorCode(0)],
        };
        response.build()
    }

    fn client_error(&mut self) -> Result<MethodOutcome, EapError> {
        Ok(MethodOutcome::Response(self.client_error_body()))
    }
}

impl std::fmt::Debug for SimMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimMethod").field("state", &self.state).finish()
    }
}
