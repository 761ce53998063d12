//! Top-level EAP authenticator state machine (C5): decodes inbound EAP
//! packets, selects and lazily constructs the matching method SM, emits NAK
//! when no configured method matches the server's request, and forwards
//! Notification requests without advancing state.

use crate::collaborators::{SimAuthenticator, SubscriberIdentitySource};
use crate::error::EapError;
use crate::message::{EapCode, EapHeader, EapMessage, EapMethodType};
use crate::methods::aka::AkaMethod;
use crate::methods::aka_prime::AkaPrimeMethod;
use crate::methods::mschapv2::MsChapV2Method;
use crate::methods::sim::SimMethod;
use crate::methods::MethodOutcome;
use rand::RngCore;
use std::sync::Arc;

/// One inner method the caller is willing to run, in preference order.
#[derive(Clone)]
pub enum EapMethodConfig {
    /// EAP-SIM (RFC 4186).
    Sim {
        /// Subscriber identity source (IMSI/pseudonym).
        identity_source: Arc<dyn SubscriberIdentitySource>,
        /// SIM authentication applet.
        authenticator: Arc<dyn SimAuthenticator>,
    },
    /// EAP-AKA (RFC 4187).
    Aka {
        /// Subscriber identity source (IMSI/pseudonym).
        identity_source: Arc<dyn SubscriberIdentitySource>,
        /// USIM authentication applet.
        authenticator: Arc<dyn SimAuthenticator>,
    },
    /// EAP-AKA' (RFC 5448).
    AkaPrime {
        /// Authenticated network name mixed into key derivation.
        network_name: Vec<u8>,
        /// Subscriber identity source (IMSI/pseudonym).
        identity_source: Arc<dyn SubscriberIdentitySource>,
        /// USIM authentication applet.
        authenticator: Arc<dyn SimAuthenticator>,
    },
    /// EAP-MSCHAPv2.
    MsChapV2 {
        /// Username carried in the Response body.
        username: String,
        /// Password used for NT-response/authenticator-response derivation.
        password: String,
    },
}

impl EapMethodConfig {
    fn method_type(&self) -> EapMethodType {
        match self {
            EapMethodConfig::Sim { .. } => EapMethodType::Sim,
            EapMethodConfig::Aka { .. } => EapMethodType::Aka,
            EapMethodConfig::AkaPrime { .. } => EapMethodType::AkaPrime,
            EapMethodConfig::MsChapV2 { .. } => EapMethodType::MsChapV2,
        }
    }
}

enum ActiveMethod {
    Sim(SimMethod),
    Aka(AkaMethod),
    AkaPrime(AkaPrimeMethod),
    MsChapV2(MsChapV2Method),
}

/// Outcome of feeding one inbound EAP packet to the authenticator.
#[derive(Debug)]
pub enum AuthenticatorOutcome {
    /// Send this encoded EAP-Response.
    Reply(Vec<u8>),
    /// The configured method completed successfully.
    Success {
        /// Master Session Key.
        msk: [u8; 64],
        /// Extended Master Session Key.
        emsk: [u8; 64],
    },
    /// The configured method completed with failure.
    Failure,
}

/// The top-level EAP authenticator, driving at most one method SM at a time.
pub struct EapAuthenticator {
    configured: Vec<EapMethodConfig>,
    active: Option<ActiveMethod>,
    completed: bool,
    derived_keys: Option<([u8; 64], [u8; 64])>,
}

impl EapAuthenticator {
    /// Constructs the authenticator from the caller's desired methods, in
    /// preference order.
    pub fn new(configured: Vec<EapMethodConfig>) -> Self {
        Self {
            configured,
            active: None,
            completed: false,
            derived_keys: None,
        }
    }

    /// Feeds one inbound EAP packet (as decoded bytes straight off the
    /// wire) to the authenticator.
    pub async fn handle(
        &mut self,
        packet: &[u8],
        rng: &mut dyn RngCore,
    ) -> Result<AuthenticatorOutcome, EapError> {
        let eap_message = EapMessage::try_parse(packet)?;

        match eap_message.code {
            EapCode::Success | EapCode::Failure => {
                if !self.completed {
                    return Err(EapError::InvalidRequest(
                        "EAP Success/Failure received before a method SM completed",
                    ));
                }
                return Ok(match eap_message.code {
                    EapCode::Success => {
                        let (msk, emsk) = self.derived_keys.ok_or(EapError::InvalidRequest(
                            "EAP Success with no keying material from the completed method",
                        ))?;
                        AuthenticatorOutcome::Success { msk, emsk }
                    }
                    _ => AuthenticatorOutcome::Failure,
                });
            }
            EapCode::Response => {
                return Err(EapError::InvalidRequest(
                    "authenticator only processes inbound Request/Success/Failure",
                ));
            }
            EapCode::Request => {}
        }

        let (method_type, data) = eap_message
            .method
            .ok_or(EapError::Malformed("Request missing a method type"))?;

        if method_type == EapMethodType::Identity {
            return Ok(AuthenticatorOutcome::Reply(
                EapMessage {
                    code: EapCode::Response,
                    identifier: eap_message.identifier,
                    method: Some((EapMethodType::Identity, Vec::new())),
                }
                .build(),
            ));
        }

        if method_type == EapMethodType::Notification {
            return Ok(AuthenticatorOutcome::Reply(
                EapMessage {
                    code: EapCode::Response,
                    identifier: eap_message.identifier,
                    method: Some((EapMethodType::Notification, data)),
                }
                .build(),
            ));
        }

        if self.active.is_none() {
            let matching = self
                .configured
                .iter()
                .find(|c| c.method_type() == method_type);
            match matching {
                Some(config) => self.active = Some(construct(config)),
                None => {
                    return Ok(AuthenticatorOutcome::Reply(self.build_nak(eap_message.identifier)));
                }
            }
        } else if self
            .active
            .as_ref()
            .map(|a| active_method_type(a) != method_type)
            .unwrap_or(false)
        {
            return Err(EapError::InvalidRequest(
                "server switched method type mid-exchange",
            ));
        }

        let active = self.active.as_mut().expect("constructed above");

        // The EAP packet with the method-internal AT_MAC field zeroed is
        // needed for SIM/AKA/AKA' MAC verification; for the method types
        // that carry one, the attribute codec locates and zeros it.
        let mac_zeroed = zero_at_mac(packet);

        let identifier = eap_message.identifier;
        let outcome = match active {
            ActiveMethod::Sim(m) => m.handle(&data, &mac_zeroed, identifier, rng).await?,
            ActiveMethod::Aka(m) => m.handle(&data, &mac_zeroed, identifier, rng).await?,
            ActiveMethod::AkaPrime(m) => m.handle(&data, &mac_zeroed, identifier, rng).await?,
            ActiveMethod::MsChapV2(m) => m.handle(&data, rng)?,
        };

        match outcome {
            MethodOutcome::Response(body) => Ok(AuthenticatorOutcome::Reply(
                EapMessage {
                    code: EapCode::Response,
                    identifier,
                    method: Some((method_type, body)),
                }
                .build(),
            )),
            MethodOutcome::AcknowledgeSuccess { body, msk, emsk } => {
                self.completed = true;
                self.derived_keys = Some((msk, emsk));
                Ok(AuthenticatorOutcome::Reply(
                    EapMessage {
                        code: EapCode::Response,
                        identifier,
                        method: Some((method_type, body)),
                    }
                    .build(),
                ))
            }
            MethodOutcome::AcknowledgeFailure { body } => {
                self.completed = true;
                Ok(AuthenticatorOutcome::Reply(
                    EapMessage {
                        code: EapCode::Response,
                        identifier,
                        method: Some((method_type, body)),
                    }
                    .build(),
                ))
            }
        }
    }

    fn build_nak(&self, identifier: u8) -> Vec<u8> {
        let desired: Vec<u8> = self
            .configured
            .iter()
            .map(|c| c.method_type() as u8)
            .collect();
        EapMessage {
            code: EapCode::Response,
            identifier,
            method: Some((EapMethodType::Nak, desired)),
        }
        .build()
    }
}

fn construct(config: &EapMethodConfig) -> ActiveMethod {
    match config {
        EapMethodConfig::Sim {
            identity_source,
            authenticator,
        } => ActiveMethod::Sim(SimMethod::new(identity_source.clone(), authenticator.clone())),
        EapMethodConfig::Aka {
            identity_source,
            authenticator,
        } => ActiveMethod::Aka(AkaMethod::new(identity_source.clone(), authenticator.clone())),
        EapMethodConfig::AkaPrime {
            network_name,
            identity_source,
            authenticator,
        } => ActiveMethod::AkaPrime(AkaPrimeMethod::new(
            network_name.clone(),
            identity_source.clone(),
            authenticator.clone(),
        )),
        EapMethodConfig::MsChapV2 { username, password } => {
            ActiveMethod::MsChapV2(MsChapV2Method::new(username.clone(), password.clone()))
        }
    }
}

fn active_method_type(active: &ActiveMethod) -> EapMethodType {
    match active {
        ActiveMethod::Sim(_) => EapMethodType::Sim,
        ActiveMethod::Aka(_) => EapMethodType::Aka,
        ActiveMethod::AkaPrime(_) => EapMethodType::AkaPrime,
        ActiveMethod::MsChapV2(_) => EapMethodType::MsChapV2,
    }
}

/// Zeroes the 16-byte AT_MAC value field within `packet`, if present, so
/// that the SIM/AKA/AKA' MAC can be recomputed and compared. MSCHAPv2
/// packets carry no AT_MAC and are returned unchanged.
fn zero_at_mac(packet: &[u8]) -> Vec<u8> {
    let mut out = packet.to_vec();
    let header_len = size_of::<EapHeader>() + 1 + 3; // EAP header + method type + subtype/reserved
    if out.len() < header_len {
        return out;
    }
    let mut offset = header_len;
    while offset + 2 <= out.len() {
        let attr_type = out[offset];
        let length_words = out[offset + 1] as usize;
        if length_words == 0 {
            break;
        }
        let attr_len = length_words * 4;
        if offset + attr_len > out.len() {
            break;
        }
        if attr_type == crate::simaka::AttributeType::Mac as u8 {
            for b in out[offset + 4..offset + attr_len].iter_mut() {
                *b = 0;
            }
        }
        offset += attr_len;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{EapCode, EapMessage};

    #[test]
    fn nak_lists_only_configured_method() {
        let auth = EapAuthenticator::new(vec![EapMethodConfig::MsChapV2 {
            username: "user".into(),
            password: "pass".into(),
        }]);
        let nak = auth.build_nak(3);
        let parsed = EapMessage::try_parse(&nak).unwrap();
        assert_eq!(parsed.code, EapCode::Response);
        match parsed.method {
            Some((EapMethodType::Nak, data)) => assert_eq!(data, vec![EapMethodType::MsChapV2 as u8]),
            _ => panic!("expected NAK"),
        }
    }
}
