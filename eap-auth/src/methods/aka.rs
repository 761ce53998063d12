//! EAP-AKA (RFC 4187) method state machine. Mirrors [super::sim::SimMethod]
//! but authenticates against a USIM (AT_AUTN/single AT_RAND/AT_RES) and
//! supports the sequence-number synchronization-failure path via AT_AUTS.

use super::MethodOutcome;
use crate::collaborators::{AkaResult, SimAuthenticator, SubscriberIdentitySource};
use crate::error::EapError;
use crate::simaka::{mac, Attribute, SimAkaKeys, SimAkaMessage, SimAkaSubtype};
use rand::RngCore;
use std::sync::Arc;

#[derive(Debug, PartialEq, Eq)]
enum State {
    Created,
    Start,
    Challenge,
    Final,
}

/// EAP-AKA, states Created -> Start -> Challenge -> Final.
pub struct AkaMethod {
    identity_source: Arc<dyn SubscriberIdentitySource>,
    authenticator: Arc<dyn SimAuthenticator>,
    state: State,
    notification_seen: bool,
    identity: Option<Vec<u8>>,
    keys: Option<SimAkaKeys>,
}

impl AkaMethod {
    /// Constructs the method from the subscriber identity source and USIM
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
            identity: None,
            keys: None,
        }
    }

    /// Feeds a decoded EAP-AKA type-data body (plus the full EAP packet with
    /// AT_MAC zeroed) into the state machine.
    pub async fn handle(
        &mut self,
        body: &[u8],
        packet_with_mac_zeroed: &[u8],
        identifier: u8,
        _rng: &mut dyn RngCore,
    ) -> Result<MethodOutcome, EapError> {
        let message = SimAkaMessage::try_parse(body)?;

        if message.subtype == SimAkaSubtype::Notification {
            return self.handle_notification(&message);
        }

        match (&self.state, message.subtype) {
            (State::Created, SimAkaSubtype::Start) => self.handle_start(&message).await,
            (State::Start, SimAkaSubtype::Start) => self.handle_start(&message).await,
            (State::Challenge, SimAkaSubtype::Challenge) => {
                self.handle_challenge(&message, packet_with_mac_zeroed, identifier).await
            }
            _ => Err(EapError::InvalidRequest(
                "EAP-AKA message not valid in the current state",
            )),
        }
    }

    fn handle_notification(&mut self, message: &SimAkaMessage) -> Result<MethodOutcome, EapError> {
        if self.notification_seen {
            return Err(EapError::InvalidRequest(
                "at most one AKA/Notification is accepted per session",
            ));
        }
        self.notification_seen = true;
        let code = match message.find(|a| matches!(a, Attribute::Notification { .. })) {
            Some(Attribute::Notification { code }) => *code,
            _ => return Err(EapError::Malformed("Notification missing AT_NOTIFICATION")),
        };
        let response = SimAkaMessage {
            subtype: SimAkaSubtype::Notification,
            attributes: vec![Attribute::Notification { code }],
        };
        Ok(MethodOutcome::Response(response.build()))
    }

    async fn handle_start(&mut self, message: &SimAkaMessage) -> Result<MethodOutcome, EapError> {
        let forbidden_present = message.attributes.iter().any(|a| {
            matches!(
                a,
                Attribute::Mac(_) | Attribute::Iv(_) | Attribute::EncrData(_)
            )
        });
        if forbidden_present {
            return self.client_error();
        }

        let identity = self
            .identity_source
            .get_subscriber_id()
            .await
            .ok_or(EapError::Unavailable("subscriber identity unavailable"))?;
        let mut prefixed = vec![b'0'];
        prefixed.extend_from_slice(identity.as_bytes());
        self.identity = Some(prefixed.clone());
        self.state = State::Challenge;

        let response = SimAkaMessage {
            subtype: SimAkaSubtype::Start,
            attributes: vec![Attribute::Identity(prefixed)],
        };
        Ok(MethodOutcome::Response(response.build()))
    }

    async fn handle_challenge(
        &mut self,
        message: &SimAkaMessage,
        packet_with_mac_zeroed: &[u8],
        identifier: u8,
    ) -> Result<MethodOutcome, EapError> {
        let rand = match message.find(|a| matches!(a, Attribute::Rand(_))) {
            Some(Attribute::Rand(r)) if r.len() == 1 => r[0],
            _ => return self.client_error(),
        };
        let autn = match message.find(|a| matches!(a, Attribute::Autn(_))) {
            Some(Attribute::Autn(a)) => *a,
            _ => return self.client_error(),
        };
        let received_mac = match message.find(|a| matches!(a, Attribute::Mac(_))) {
            Some(Attribute::Mac(m)) => *m,
            _ => return self.client_error(),
        };

        let result = self
            .authenticator
            .authenticate_aka(rand, autn)
            .await
            .ok_or(EapError::Unavailable("USIM authenticator unavailable"))?;

        let (res, ik, ck) = match result {
            AkaResult::Success { res, ik, ck } => (res, ik, ck),
            AkaResult::SyncFailure { auts } => {
                let response = SimAkaMessage {
                    subtype: SimAkaSubtype::Challenge,
                    attributes: vec![Attribute::Auts(auts)],
                };
                // remain in Challenge awaiting a new challenge after resynchronization
                return Ok(MethodOutcome::Response(response.build()));
            }
        };

        let identity = self
            .identity
            .clone()
            .ok_or(EapError::InvalidRequest("Challenge received before Start"))?;
        let keys = crate::simaka::keys::derive_aka_keys(&identity, &ik, &ck);

        let mac_ok = mac::verify(&keys.k_aut, packet_with_mac_zeroed, b"", &received_mac);
        self.keys = Some(keys.clone());
        self.state = State::Final;

        if !mac_ok {
            return Ok(MethodOutcome::AcknowledgeFailure {
                body: self.client_error_body(),
            });
        }

        let ack = SimAkaMessage {
            subtype: SimAkaSubtype::Challenge,
            attributes: vec![Attribute::Res(res), Attribute::Mac([0u8; 16])],
        };
        let body = mac::sign_response(identifier, crate::message::EapMethodType::Aka, &ack, &keys.k_aut, b"");

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

impl std::fmt::Debug for AkaMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AkaMethod").field("state", &self.state).finish()
    }
}
