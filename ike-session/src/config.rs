//! Session configuration (C4): everything the initiator needs to know
//! before it sends IKE_SA_INIT, gathered in one place rather than threaded
//! through the state machine as loose arguments.

use eap_auth::EapMethodConfig;
use ike_proto::definitions::params::IdentificationType;
use ike_proto::definitions::Proposal;
use std::sync::Arc;

use crate::collaborators::IkeSocket;

/// How this peer identifies itself or is expected to identify the other side.
#[derive(Debug, Clone)]
pub struct PeerIdentity {
    /// Which wire representation `data` uses.
    pub id_type: IdentificationType,
    /// Raw identification data, interpreted according to `id_type`.
    pub data: Vec<u8>,
}

/// How the local side authenticates to the peer, or how the peer's
/// authentication is expected to be verified.
pub enum AuthConfig {
    /// A pre-shared key.
    Psk(Vec<u8>),
    /// A certificate chain plus the matching private key, used to produce
    /// (or, on the remote side, verify) a digital signature.
    PubKeySignature {
        /// DER-encoded certificate chain, leaf first.
        cert_chain: Vec<Vec<u8>>,
        /// DER-encoded private key, present only when this describes local
        /// authentication.
        private_key: Option<Vec<u8>>,
    },
    /// Authentication is delegated to an EAP exchange; only valid as the
    /// local side's auth when the peer authenticates first with its own
    /// `AuthConfig`.
    Eap(Vec<EapMethodConfig>),
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthConfig::Psk(_) => f.write_str("AuthConfig::Psk(..)"),
            AuthConfig::PubKeySignature { cert_chain, .. } => f
                .debug_struct("AuthConfig::PubKeySignature")
                .field("cert_chain_len", &cert_chain.len())
                .finish(),
            AuthConfig::Eap(methods) => f
                .debug_struct("AuthConfig::Eap")
                .field("methods", &methods.len())
                .finish(),
        }
    }
}

/// Full configuration for one initiator session.
pub struct SessionConfig {
    /// How we identify ourselves in IDi.
    pub local_identification: PeerIdentity,
    /// How we expect the peer to identify itself in IDr, if we require a
    /// specific identity.
    pub remote_identification: Option<PeerIdentity>,
    /// How we authenticate ourselves.
    pub local_auth: AuthConfig,
    /// How we expect to verify the peer's authentication.
    pub remote_auth: AuthConfig,
    /// Security Association proposals we offer, in descending preference.
    /// The Diffie-Hellman group of the first proposal's first offered
    /// key-exchange method is used for the initial KE payload.
    pub sa_proposals: Vec<Proposal>,
    /// Socket the session runs over.
    pub socket: Arc<dyn IkeSocket>,
    /// Whether the socket already applies NAT-T UDP encapsulation (the
    /// 4-byte non-ESP marker on port 4500), so the wire codec does not
    /// need to add it again.
    pub udp_encap: bool,
}

impl SessionConfig {
    /// The Diffie-Hellman group used for the initial KE payload, taken from
    /// the first proposal's first offered key-exchange method.
    pub fn initial_dh_group(&self) -> Option<ike_proto::definitions::params::KeyExchangeMethod> {
        self.sa_proposals
            .first()
            .and_then(|p| p.key_exchange_methods.first())
            .copied()
    }
}
