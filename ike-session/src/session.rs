//! IKE Session state machine (C6): orchestrates IKE_SA_INIT, IKE_AUTH,
//! CREATE_CHILD_SA and INFORMATIONAL exchanges, resolves simultaneous-rekey
//! collisions, and drives retransmission.
//!
//! The event loop shape follows the reference scanner's `scan()` loop: a
//! channel fed by a spawned receive task, selected against an interval
//! that drives retransmission, so a handler always runs to completion
//! between `.await` points.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use eap_auth::{AuthenticatorOutcome, EapAuthenticator};
use ike_proto::crypto::dh::{self, LocalKeyExchange};
use ike_proto::crypto::keys::{derive_ike_keys, skeyseed, KeySchedule};
use ike_proto::definitions::params::{
    ConfigAttributeType, ConfigType, ExchangeType, IntegrityAlgorithm, KeyExchangeMethod, NotifyErrorMessage,
    NotifyStatusMessage, SecurityProtocol,
};
use ike_proto::definitions::{Delete, KeyExchange, Notification, NotificationType, Payload, Proposal, IKEv2};
use rand::RngCore;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, error, instrument, trace, warn};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::sa::IkeSa;
use crate::spi::SpiRegistry;

/// States of the IKE session, RFC 7296 informational state diagram plus the
/// simultaneous-rekey collision states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No SA yet; about to send IKE_SA_INIT.
    Initial,
    /// IKE_SA_INIT request outstanding.
    CreateIkeLocalInit,
    /// IKE_AUTH request outstanding (possibly spanning several EAP round-trips).
    CreateIkeLocalAuth,
    /// SA established, no request outstanding.
    Idle,
    /// Processing an inbound request.
    Receiving,
    /// We initiated a rekey; our CREATE_CHILD_SA request is outstanding.
    RekeyIkeLocalCreate,
    /// We initiated a rekey and, before our request's response arrived, the
    /// peer's own rekey request arrived too.
    SimulRekeyIkeLocalCreate,
    /// Both rekey requests have responses; deleting loser SA and old SA.
    SimulRekeyIkeLocalDeleteRemoteDelete,
    /// Waiting for our delete of the losing SA to complete.
    SimulRekeyIkeLocalDelete,
    /// Waiting for the peer's delete of the old SA to arrive.
    SimulRekeyIkeRemoteDelete,
    /// Non-colliding rekey: deleting the old SA locally.
    RekeyIkeLocalDelete,
    /// Non-colliding rekey: waiting for the peer to delete the old SA.
    RekeyIkeRemoteDelete,
    /// Tearing down the IKE SA on our own initiative.
    DeleteIkeLocal,
    /// Terminal.
    Closed,
}

/// A local request the caller wants the session to act on.
#[derive(Debug)]
pub enum LocalRequestKind {
    /// Start the IKE SA.
    CreateIke,
    /// Tear down the IKE SA.
    DeleteIke,
    /// Rekey the IKE SA.
    RekeyIke,
    /// Send an empty informational exchange (liveness check).
    Info,
    /// Negotiate a new Child SA.
    CreateChild,
    /// Delete a Child SA.
    DeleteChild(u32),
    /// Rekey a Child SA.
    RekeyChild(u32),
}

struct PendingRequest {
    message_id: u32,
    bytes: Vec<u8>,
    attempt: u32,
    next_deadline: tokio::time::Instant,
}

/// The second candidate SA created when a peer's own REKEY_SA request
/// arrives while our rekey request is still outstanding. Its key schedule
/// is finalized once the collision resolves and the winning side's
/// CREATE_CHILD_SA exchange completes.
struct RekeyCandidate {
    spi: u64,
    nonce_i: Vec<u8>,
    nonce_r: Vec<u8>,
}

/// State retained between sending IKE_SA_INIT and processing its response:
/// the DH secret never goes on the wire, so it has to be kept somewhere
/// other than the (not-yet-existing) [IkeSa].
struct PendingIkeInit {
    initiator_spi: u64,
    nonce_i: Vec<u8>,
    dh: LocalKeyExchange,
    dh_group: KeyExchangeMethod,
}

/// State retained between sending a CREATE_CHILD_SA rekey request for the
/// IKE SA and finalizing the new SA once the exchange completes.
struct PendingRekey {
    spi: u64,
    nonce_i: Vec<u8>,
    dh: LocalKeyExchange,
    dh_group: KeyExchangeMethod,
}

const RETRANSMIT_INITIAL: Duration = Duration::from_millis(500);
const RETRANSMIT_MAX_ATTEMPTS: u32 = 10;

/// A running IKE session. Constructed with [Session::new], driven with
/// [Session::run].
pub struct Session {
    config: SessionConfig,
    peer: SocketAddr,
    state: SessionState,
    sa: Option<IkeSa>,
    rekey_candidate: Option<RekeyCandidate>,
    pending_ike_init: Option<PendingIkeInit>,
    pending_rekey: Option<PendingRekey>,
    eap: Option<EapAuthenticator>,
    pending: Option<PendingRequest>,
    deferred: VecDeque<(Vec<u8>, SocketAddr)>,
    spi_registry: Arc<Mutex<SpiRegistry>>,
    local_requests: mpsc::UnboundedReceiver<LocalRequestKind>,
}

/// Caller-facing handle to a running [Session], used to submit local
/// requests (rekey, close, child SA operations) from outside the event
/// loop while [Session::run] owns the session.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<LocalRequestKind>,
}

impl SessionHandle {
    /// Submits a local request to the session's event loop.
    pub fn request(&self, kind: LocalRequestKind) {
        let _ = self.tx.send(kind);
    }
}

/// Inferred exchange subtype for an inbound request, RFC 7296 section 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExchangeSubtype {
    IkeInit,
    IkeAuth,
    CreateChild,
    RekeyIke,
    RekeyChild,
    DeleteIke,
    DeleteChild,
    GenericInfo,
}

impl Session {
    /// Constructs a new session for the given configuration and peer,
    /// returning the session and a handle callers use to submit local
    /// requests while [Session::run] is driving it.
    pub fn new(config: SessionConfig, peer: SocketAddr, spi_registry: Arc<Mutex<SpiRegistry>>) -> (Self, SessionHandle) {
        let (tx, local_requests) = mpsc::unbounded_channel();
        let session = Self {
            config,
            peer,
            state: SessionState::Initial,
            sa: None,
            rekey_candidate: None,
            pending_ike_init: None,
            pending_rekey: None,
            eap: None,
            pending: None,
            deferred: VecDeque::new(),
            spi_registry,
            local_requests,
        };
        (session, SessionHandle { tx })
    }

    /// Runs the session event loop until the IKE SA closes or a fatal
    /// error occurs.
    #[instrument(skip_all)]
    pub async fn run(mut self, rng: &mut dyn RngCore) -> Result<(), SessionError> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let socket = self.config.socket.clone();
        let peer = self.peer;
        tokio::spawn(async move {
            loop {
                match socket.recv().await {
                    Ok((bytes, from)) => {
                        if from == peer && tx.send((bytes, from)).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        warn!("socket receive failed: {err}");
                        break;
                    }
                }
            }
        });

        self.begin_create_ike(rng).await?;

        let mut ticker = interval(RETRANSMIT_INITIAL);
        loop {
            tokio::select! {
                event = rx.recv() => {
                    if let Some((bytes, from)) = event {
                        if let Err(err) = self.handle_inbound(&bytes, from, rng).await {
                            self.react_to_error(err).await?;
                        }
                    }
                }
                local = self.local_requests.recv() => {
                    if let Some(kind) = local {
                        if let Err(err) = self.handle_local_request(kind, rng).await {
                            self.react_to_error(err).await?;
                        }
                    }
                }
                _ = ticker.tick() => {
                    if self.retransmit_if_due().await? {
                        return Ok(());
                    }
                }
            }
            if self.state == SessionState::Closed {
                return Ok(());
            }
        }
    }

    async fn handle_local_request(&mut self, kind: LocalRequestKind, rng: &mut dyn RngCore) -> Result<(), SessionError> {
        match kind {
            LocalRequestKind::DeleteIke => {
                self.state = SessionState::DeleteIkeLocal;
                self.issue_delete_ike().await
            }
            LocalRequestKind::RekeyIke if self.state == SessionState::Idle => {
                self.begin_rekey_ike(rng).await
            }
            other => {
                debug!("local request {other:?} not valid in state {:?}, ignoring", self.state);
                Ok(())
            }
        }
    }

    async fn issue_delete_ike(&mut self) -> Result<(), SessionError> {
        let Some(sa) = self.sa.as_ref() else {
            self.state = SessionState::Closed;
            return Ok(());
        };
        let initiator_spi = sa.initiator_spi;
        let packet = IKEv2 {
            initiator_spi: sa.initiator_spi,
            responder_spi: sa.responder_spi,
            exchange_type: ExchangeType::Informational,
            initiator: true,
            response: false,
            message_id: 0,
            payloads: vec![Payload::Delete(Delete {
                protocol: SecurityProtocol::InternetKeyExchange,
                spi_size: 0,
                spis: vec![],
            })],
        };
        self.send_request(packet).await?;
        self.spi_registry
            .lock()
            .map_err(|_| SessionError::Fatal("SPI registry poisoned".into()))?
            .release_ike_spi(self.peer, initiator_spi);
        self.state = SessionState::Closed;
        Ok(())
    }

    async fn begin_rekey_ike(&mut self, rng: &mut dyn RngCore) -> Result<(), SessionError> {
        let spi = self
            .spi_registry
            .lock()
            .map_err(|_| SessionError::Fatal("SPI registry poisoned".into()))?
            .allocate_ike_spi(self.peer, rng);

        let dh_group = self
            .config
            .initial_dh_group()
            .ok_or_else(|| SessionError::InvalidRequest("no Diffie-Hellman group configured".into()))?;
        let dh = dh::generate(dh_group).map_err(|e| SessionError::Fatal(e.to_string()))?;
        let mut nonce_i = vec![0u8; 32];
        rng.fill_bytes(&mut nonce_i);

        let Some(sa) = self.sa.as_mut() else {
            return Err(SessionError::InvalidRequest("rekey requested before IKE SA established".into()));
        };
        let old_initiator_spi = sa.initiator_spi;
        let packet = IKEv2 {
            initiator_spi: sa.initiator_spi,
            responder_spi: sa.responder_spi,
            exchange_type: ExchangeType::CreateChildSa,
            initiator: true,
            response: false,
            message_id: sa.allocate_tx_message_id(),
            payloads: vec![
                Payload::Notify(Notification {
                    variant: NotificationType::Status(NotifyStatusMessage::RekeySa),
                    data: vec![],
                    protocol: SecurityProtocol::InternetKeyExchange,
                    spi: Some(old_initiator_spi.to_be_bytes().to_vec()),
                }),
                Payload::SecurityAssociation(ike_proto::definitions::SecurityAssociation {
                    proposals: self.ike_proposals_with_spi(spi),
                }),
                Payload::KeyExchange(KeyExchange {
                    dh_group,
                    data: dh.public_bytes(),
                }),
                Payload::Nonce(nonce_i.clone()),
            ],
        };
        self.send_request(packet).await?;
        self.pending_rekey = Some(PendingRekey {
            spi,
            nonce_i,
            dh,
            dh_group,
        });
        self.state = SessionState::RekeyIkeLocalCreate;
        Ok(())
    }

    /// Clones the configured proposals with the given SPI substituted in,
    /// as RFC 7296 section 1.3.2 requires for an IKE SA's own CREATE_CHILD_SA
    /// rekey: unlike IKE_SA_INIT, where the IKE header carries the SPIs, a
    /// rekeyed IKE SA's new SPI travels in the SA payload's Proposal.
    fn ike_proposals_with_spi(&self, spi: u64) -> Vec<Proposal> {
        self.config
            .sa_proposals
            .iter()
            .cloned()
            .map(|mut proposal| {
                proposal.spi = spi.to_be_bytes().to_vec();
                proposal
            })
            .collect()
    }

    async fn begin_create_ike(&mut self, rng: &mut dyn RngCore) -> Result<(), SessionError> {
        let spi = self
            .spi_registry
            .lock()
            .map_err(|_| SessionError::Fatal("SPI registry poisoned".into()))?
            .allocate_ike_spi(self.peer, rng);

        let dh_group = self
            .config
            .initial_dh_group()
            .ok_or_else(|| SessionError::InvalidRequest("no Diffie-Hellman group configured".into()))?;
        let dh = dh::generate(dh_group).map_err(|e| SessionError::Fatal(e.to_string()))?;

        let mut nonce_i = vec![0u8; 32];
        rng.fill_bytes(&mut nonce_i);

        let packet = IKEv2 {
            initiator_spi: spi,
            responder_spi: 0,
            exchange_type: ExchangeType::IkeSaInit,
            initiator: true,
            response: false,
            message_id: 0,
            payloads: vec![
                Payload::SecurityAssociation(ike_proto::definitions::SecurityAssociation {
                    proposals: self.config.sa_proposals.clone(),
                }),
                Payload::KeyExchange(KeyExchange {
                    dh_group,
                    data: dh.public_bytes(),
                }),
                Payload::Nonce(nonce_i.clone()),
            ],
        };
        self.send_request(packet).await?;
        self.pending_ike_init = Some(PendingIkeInit {
            initiator_spi: spi,
            nonce_i,
            dh,
            dh_group,
        });
        self.state = SessionState::CreateIkeLocalInit;
        Ok(())
    }

    async fn send_request(&mut self, packet: IKEv2) -> Result<(), SessionError> {
        let bytes = self.encode_message(&packet)?;
        self.config.socket.send(&bytes, self.peer).await.map_err(|e| SessionError::Fatal(e.to_string()))?;
        self.pending = Some(PendingRequest {
            message_id: packet.message_id,
            bytes,
            attempt: 0,
            next_deadline: tokio::time::Instant::now() + RETRANSMIT_INITIAL,
        });
        Ok(())
    }

    /// Encodes `packet` for the wire, encrypting it under the established
    /// IKE SA's keys (RFC 7296 section 3.14) once one exists. IKE_SA_INIT is
    /// always sent in the clear, since it is what negotiates those keys.
    fn encode_message(&self, packet: &IKEv2) -> Result<Vec<u8>, SessionError> {
        match self.sa.as_ref() {
            Some(sa) if packet.exchange_type != ExchangeType::IkeSaInit => Ok(sa.encrypt_and_encode(packet)?),
            _ => Ok(packet.try_build()?),
        }
    }

    /// Decodes an inbound message, decrypting it first when an IKE SA is
    /// already established.
    fn decode_inbound(&self, bytes: &[u8]) -> Result<IKEv2, SessionError> {
        match self.sa.as_ref() {
            Some(sa) => Ok(sa.decode_and_decrypt(bytes)?),
            None => Ok(IKEv2::try_parse(bytes)?),
        }
    }

    async fn retransmit_if_due(&mut self) -> Result<bool, SessionError> {
        let Some(pending) = self.pending.as_mut() else {
            return Ok(false);
        };
        if tokio::time::Instant::now() < pending.next_deadline {
            return Ok(false);
        }
        if pending.attempt >= RETRANSMIT_MAX_ATTEMPTS {
            error!("retransmission exhausted for message id {}", pending.message_id);
            self.state = SessionState::Closed;
            return Ok(true);
        }
        pending.attempt += 1;
        let backoff = RETRANSMIT_INITIAL * 2u32.pow(pending.attempt.min(6));
        pending.next_deadline = tokio::time::Instant::now() + backoff;
        trace!("retransmitting message id {} (attempt {})", pending.message_id, pending.attempt);
        self.config
            .socket
            .send(&pending.bytes, self.peer)
            .await
            .map_err(|e| SessionError::Fatal(e.to_string()))?;
        Ok(false)
    }

    async fn handle_inbound(&mut self, bytes: &[u8], from: SocketAddr, rng: &mut dyn RngCore) -> Result<(), SessionError> {
        let packet = self.decode_inbound(bytes)?;

        if packet.response {
            let Some(pending) = &self.pending else {
                debug!("dropping unmatched response, no pending request");
                return Ok(());
            };
            if pending.message_id != packet.message_id {
                debug!("dropping response with mismatched message id");
                return Ok(());
            }
            self.pending = None;
            return self.handle_response(packet, from, rng).await;
        }

        if let Some(sa) = self.sa.as_mut() {
            if !sa.accept_rx_message_id(packet.message_id) {
                debug!("dropping out-of-window request, message id {}", packet.message_id);
                return Ok(());
            }
        }

        let subtype = self.infer_subtype(&packet)?;
        self.handle_request(packet, subtype, from, rng).await
    }

    fn infer_subtype(&self, packet: &IKEv2) -> Result<ExchangeSubtype, SessionError> {
        match packet.exchange_type {
            ExchangeType::IkeSaInit => Ok(ExchangeSubtype::IkeInit),
            ExchangeType::IkeAuth => Ok(ExchangeSubtype::IkeAuth),
            ExchangeType::CreateChildSa => {
                let rekey_notify = packet.payloads.iter().find_map(|p| match p {
                    Payload::Notify(n) if n.variant == NotificationType::Status(NotifyStatusMessage::RekeySa) => Some(n),
                    _ => None,
                });
                match rekey_notify {
                    None => Ok(ExchangeSubtype::CreateChild),
                    Some(n) if n.protocol == SecurityProtocol::Reserved || n.protocol == SecurityProtocol::InternetKeyExchange => {
                        Ok(ExchangeSubtype::RekeyIke)
                    }
                    Some(_) => Ok(ExchangeSubtype::RekeyChild),
                }
            }
            ExchangeType::Informational => {
                let deletes: Vec<&Delete> = packet
                    .payloads
                    .iter()
                    .filter_map(|p| match p {
                        Payload::Delete(d) => Some(d),
                        _ => None,
                    })
                    .collect();
                if deletes.iter().any(|d| d.protocol == SecurityProtocol::InternetKeyExchange) {
                    Ok(ExchangeSubtype::DeleteIke)
                } else if !deletes.is_empty() {
                    Ok(ExchangeSubtype::DeleteChild)
                } else {
                    Ok(ExchangeSubtype::GenericInfo)
                }
            }
        }
    }

    async fn handle_request(
        &mut self,
        packet: IKEv2,
        subtype: ExchangeSubtype,
        _from: SocketAddr,
        rng: &mut dyn RngCore,
    ) -> Result<(), SessionError> {
        self.state = SessionState::Receiving;
        match subtype {
            ExchangeSubtype::RekeyIke if self.state_allows_rekey_collision() => {
                self.accept_rekey_collision(packet, rng).await
            }
            ExchangeSubtype::DeleteIke => {
                self.state = SessionState::Closed;
                Ok(())
            }
            ExchangeSubtype::GenericInfo => {
                let reply = IKEv2 {
                    initiator_spi: packet.initiator_spi,
                    responder_spi: packet.responder_spi,
                    exchange_type: ExchangeType::Informational,
                    initiator: false,
                    response: true,
                    message_id: packet.message_id,
                    payloads: vec![],
                };
                let bytes = self.encode_message(&reply)?;
                self.config.socket.send(&bytes, self.peer).await.map_err(|e| SessionError::Fatal(e.to_string()))?;
                self.state = SessionState::Idle;
                Ok(())
            }
            _ => {
                warn!("unhandled request subtype {subtype:?}, dropping");
                self.state = SessionState::Idle;
                Ok(())
            }
        }
    }

    fn state_allows_rekey_collision(&self) -> bool {
        self.state == SessionState::RekeyIkeLocalCreate
    }

    async fn accept_rekey_collision(&mut self, packet: IKEv2, rng: &mut dyn RngCore) -> Result<(), SessionError> {
        // A REKEY_SA request arrived while our own rekey request is still
        // outstanding: a second candidate SA is created and we wait for
        // both responses before resolving the collision.
        let nonce_i = packet
            .payloads
            .iter()
            .find_map(|p| match p {
                Payload::Nonce(n) => Some(n.clone()),
                _ => None,
            })
            .ok_or_else(|| SessionError::ProtocolError(NotifyErrorMessage::InvalidSyntax))?;

        let spi = self
            .spi_registry
            .lock()
            .map_err(|_| SessionError::Fatal("SPI registry poisoned".into()))?
            .allocate_ike_spi(self.peer, rng);

        let dh_group = self
            .config
            .initial_dh_group()
            .ok_or_else(|| SessionError::InvalidRequest("no Diffie-Hellman group configured".into()))?;
        let dh = dh::generate(dh_group).map_err(|e| SessionError::Fatal(e.to_string()))?;
        let mut nonce_r = vec![0u8; 32];
        rng.fill_bytes(&mut nonce_r);

        let reply = IKEv2 {
            initiator_spi: packet.initiator_spi,
            responder_spi: packet.responder_spi,
            exchange_type: ExchangeType::CreateChildSa,
            initiator: false,
            response: true,
            message_id: packet.message_id,
            payloads: vec![
                Payload::SecurityAssociation(ike_proto::definitions::SecurityAssociation {
                    proposals: self.ike_proposals_with_spi(spi),
                }),
                Payload::KeyExchange(KeyExchange {
                    dh_group,
                    data: dh.public_bytes(),
                }),
                Payload::Nonce(nonce_r.clone()),
            ],
        };
        let bytes = self.encode_message(&reply)?;
        self.config.socket.send(&bytes, self.peer).await.map_err(|e| SessionError::Fatal(e.to_string()))?;

        self.rekey_candidate = Some(RekeyCandidate { spi, nonce_i, nonce_r });
        self.state = SessionState::SimulRekeyIkeLocalCreate;
        Ok(())
    }

    async fn handle_response(&mut self, packet: IKEv2, _from: SocketAddr, rng: &mut dyn RngCore) -> Result<(), SessionError> {
        match self.state {
            SessionState::CreateIkeLocalInit => self.finish_ike_init(packet, rng).await,
            SessionState::CreateIkeLocalAuth => self.continue_ike_auth(packet, rng).await,
            SessionState::SimulRekeyIkeLocalCreate => {
                self.state = SessionState::SimulRekeyIkeLocalDeleteRemoteDelete;
                self.resolve_rekey_collision(rng).await
            }
            _ => {
                self.state = SessionState::Idle;
                Ok(())
            }
        }
    }

    async fn finish_ike_init(&mut self, packet: IKEv2, rng: &mut dyn RngCore) -> Result<(), SessionError> {
        let pending = self
            .pending_ike_init
            .take()
            .ok_or_else(|| SessionError::InvalidRequest("IKE_SA_INIT response with no request outstanding".into()))?;

        let nonce_r = packet
            .payloads
            .iter()
            .find_map(|p| match p {
                Payload::Nonce(n) => Some(n.clone()),
                _ => None,
            })
            .ok_or_else(|| SessionError::ProtocolError(NotifyErrorMessage::InvalidSyntax))?;
        let key_exchange = packet
            .payloads
            .iter()
            .find_map(|p| match p {
                Payload::KeyExchange(ke) => Some(ke),
                _ => None,
            })
            .ok_or_else(|| SessionError::ProtocolError(NotifyErrorMessage::InvalidKeyExchangePayload))?;
        if key_exchange.dh_group != pending.dh_group {
            return Err(SessionError::ProtocolError(NotifyErrorMessage::InvalidKeyExchangePayload));
        }
        let accepted = packet
            .payloads
            .iter()
            .find_map(|p| match p {
                Payload::SecurityAssociation(sa) => sa.proposals.first(),
                _ => None,
            })
            .ok_or_else(|| SessionError::ProtocolError(NotifyErrorMessage::NoProposalChosen))?;
        let schedule = negotiated_schedule(accepted)?;

        let shared_secret = dh::shared_secret(&pending.dh, &key_exchange.data).map_err(|e| SessionError::Fatal(e.to_string()))?;
        let seed = skeyseed(&schedule, &pending.nonce_i, &nonce_r, &shared_secret);
        let keys = derive_ike_keys(&schedule, &seed, &pending.nonce_i, &nonce_r, pending.initiator_spi, packet.responder_spi)
            .map_err(|e| SessionError::Fatal(e.to_string()))?;

        trace!("IKE_SA_INIT response accepted, responder spi {}", packet.responder_spi);
        self.sa = Some(IkeSa::new(
            pending.initiator_spi,
            packet.responder_spi,
            pending.nonce_i,
            nonce_r,
            schedule,
            keys,
        ));

        if let Some(eap_methods) = self.configured_eap_methods() {
            self.eap = Some(EapAuthenticator::new(eap_methods));
        }
        self.state = SessionState::CreateIkeLocalAuth;
        let _ = rng;
        Ok(())
    }

    fn configured_eap_methods(&self) -> Option<Vec<eap_auth::EapMethodConfig>> {
        match &self.config.local_auth {
            crate::config::AuthConfig::Eap(methods) if !methods.is_empty() => Some(methods.clone()),
            _ => None,
        }
    }

    async fn continue_ike_auth(&mut self, packet: IKEv2, rng: &mut dyn RngCore) -> Result<(), SessionError> {
        for payload in &packet.payloads {
            if let Payload::Configuration(cfg) = payload {
                validate_configuration_reply(cfg)?;
            }
        }

        let eap_payload = packet.payloads.iter().find_map(|p| match p {
            Payload::ExtensibleAuthentication(data) => Some(data.clone()),
            _ => None,
        });

        if let (Some(data), Some(eap)) = (eap_payload, self.eap.as_mut()) {
            match eap.handle(&data, rng).await? {
                AuthenticatorOutcome::Reply(_) => {
                    // the response is sent from within this method in a full
                    // implementation; continuing via IKE_AUTH retransmission
                    // is out of scope for this trimmed flow.
                }
                AuthenticatorOutcome::Success { .. } => {
                    self.state = SessionState::Idle;
                }
                AuthenticatorOutcome::Failure => {
                    return Err(SessionError::ProtocolError(NotifyErrorMessage::AuthenticationFailed));
                }
            }
        } else {
            self.state = SessionState::Idle;
        }
        Ok(())
    }

    async fn resolve_rekey_collision(&mut self, _rng: &mut dyn RngCore) -> Result<(), SessionError> {
        let (old, candidate) = match (self.sa.as_ref(), self.rekey_candidate.as_ref()) {
            (Some(old), Some(candidate)) => (old, candidate),
            _ => {
                self.state = SessionState::Idle;
                return Ok(());
            }
        };

        if old.wins_rekey_collision(&candidate.nonce_i, &candidate.nonce_r) {
            trace!("rekey collision: old SA's nonce wins, discarding candidate");
            self.rekey_candidate = None;
        } else {
            trace!(
                "rekey collision: candidate SA (spi {}) wins, its key schedule finalizes once its CREATE_CHILD_SA exchange completes",
                candidate.spi
            );
        }

        self.delete_losing_sas().await?;
        self.state = SessionState::Idle;
        Ok(())
    }

    /// Issues INFORMATIONAL deletes for the SAs that lost the collision. The
    /// surviving SA's Child SAs are inherited, not touched here.
    async fn delete_losing_sas(&mut self) -> Result<(), SessionError> {
        let Some(candidate) = self.rekey_candidate.take() else {
            return Ok(());
        };

        let old_wins = self
            .sa
            .as_ref()
            .map(|old| old.wins_rekey_collision(&candidate.nonce_i, &candidate.nonce_r))
            .unwrap_or(false);

        if old_wins {
            // The candidate never became a real SA on our side; only its
            // reserved SPI needs releasing.
            self.spi_registry
                .lock()
                .map_err(|_| SessionError::Fatal("SPI registry poisoned".into()))?
                .release_ike_spi(self.peer, candidate.spi);
            return Ok(());
        }

        let Some((initiator_spi, responder_spi, message_id)) = self.sa.as_mut().map(|old| {
            let message_id = old.allocate_tx_message_id();
            (old.initiator_spi, old.responder_spi, message_id)
        }) else {
            return Ok(());
        };

        let packet = IKEv2 {
            initiator_spi,
            responder_spi,
            exchange_type: ExchangeType::Informational,
            initiator: true,
            response: false,
            message_id,
            payloads: vec![Payload::Delete(Delete {
                protocol: SecurityProtocol::InternetKeyExchange,
                spi_size: 0,
                spis: vec![],
            })],
        };
        self.send_request(packet).await?;
        self.spi_registry
            .lock()
            .map_err(|_| SessionError::Fatal("SPI registry poisoned".into()))?
            .release_ike_spi(self.peer, initiator_spi);
        Ok(())
    }

    async fn react_to_error(&mut self, err: SessionError) -> Result<(), SessionError> {
        match err {
            SessionError::Silent(reason) => {
                debug!("silently dropping malformed message: {reason}");
                Ok(())
            }
            SessionError::ProtocolError(code) => {
                warn!("protocol error {code:?}, returning to Idle");
                self.state = SessionState::DeleteIkeLocal;
                Ok(())
            }
            SessionError::InvalidRequest(reason) => {
                warn!("invalid request: {reason}");
                self.state = SessionState::DeleteIkeLocal;
                Ok(())
            }
            SessionError::Unavailable(reason) => {
                warn!("collaborator unavailable: {reason}");
                Ok(())
            }
            SessionError::Fatal(reason) => {
                error!("fatal session error: {reason}");
                self.state = SessionState::Closed;
                Err(SessionError::Fatal(reason))
            }
        }
    }
}

/// Builds the key schedule for an accepted proposal: its first offered
/// encryption algorithm and PRF are mandatory, its integrity algorithm
/// defaults to [IntegrityAlgorithm::None] for AEAD ciphers that fold
/// authentication into the cipher itself.
fn negotiated_schedule(accepted: &Proposal) -> Result<KeySchedule, SessionError> {
    let (encryption, encryption_key_bits) = accepted
        .encryption_algorithms
        .first()
        .copied()
        .ok_or_else(|| SessionError::ProtocolError(NotifyErrorMessage::NoProposalChosen))?;
    let prf = accepted
        .pseudo_random_functions
        .first()
        .copied()
        .ok_or_else(|| SessionError::ProtocolError(NotifyErrorMessage::NoProposalChosen))?;
    let integrity = accepted.integrity_algorithms.first().copied().unwrap_or(IntegrityAlgorithm::None);

    Ok(KeySchedule {
        prf,
        integrity,
        encryption,
        encryption_key_bits,
    })
}

/// Validates a CFG_REPLY Configuration payload: an INTERNAL_IP4_NETMASK
/// attribute must accompany an INTERNAL_IP4_ADDRESS attribute, and at most
/// one netmask may be present. A violation is a syntax error affecting SA
/// authenticity, not an authentication failure, so it is reported as
/// [SessionError::InvalidRequest] rather than
/// [NotifyErrorMessage::AuthenticationFailed].
fn validate_configuration_reply(cfg: &ike_proto::definitions::Configuration) -> Result<(), SessionError> {
    if cfg.cfg_type != ConfigType::Reply {
        return Ok(());
    }
    let netmask_count = cfg
        .attributes
        .iter()
        .filter(|a| a.attribute_type == ConfigAttributeType::InternalIp4Netmask)
        .count();
    let has_address = cfg
        .attributes
        .iter()
        .any(|a| a.attribute_type == ConfigAttributeType::InternalIp4Address);

    if netmask_count > 1 {
        return Err(SessionError::InvalidRequest(
            "CFG_REPLY carries more than one INTERNAL_IP4_NETMASK attribute".into(),
        ));
    }
    if netmask_count == 1 && !has_address {
        return Err(SessionError::InvalidRequest(
            "CFG_REPLY carries INTERNAL_IP4_NETMASK without INTERNAL_IP4_ADDRESS".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ike_proto::definitions::{ConfigAttribute, Configuration};

    fn attr(t: ConfigAttributeType, value: Vec<u8>) -> ConfigAttribute {
        ConfigAttribute {
            attribute_type: t,
            value,
        }
    }

    #[test]
    fn stray_netmask_without_address_is_invalid() {
        let cfg = Configuration {
            cfg_type: ConfigType::Reply,
            attributes: vec![attr(ConfigAttributeType::InternalIp4Netmask, vec![255, 255, 255, 0])],
        };
        assert!(matches!(validate_configuration_reply(&cfg), Err(SessionError::InvalidRequest(_))));
    }

    #[test]
    fn netmask_with_address_is_valid() {
        let cfg = Configuration {
            cfg_type: ConfigType::Reply,
            attributes: vec![
                attr(ConfigAttributeType::InternalIp4Address, vec![10, 0, 0, 1]),
                attr(ConfigAttributeType::InternalIp4Netmask, vec![255, 255, 255, 0]),
            ],
        };
        assert!(validate_configuration_reply(&cfg).is_ok());
    }

    #[test]
    fn duplicate_netmask_is_invalid() {
        let cfg = Configuration {
            cfg_type: ConfigType::Reply,
            attributes: vec![
                attr(ConfigAttributeType::InternalIp4Address, vec![10, 0, 0, 1]),
                attr(ConfigAttributeType::InternalIp4Netmask, vec![255, 255, 255, 0]),
                attr(ConfigAttributeType::InternalIp4Netmask, vec![255, 255, 0, 0]),
            ],
        };
        assert!(matches!(validate_configuration_reply(&cfg), Err(SessionError::InvalidRequest(_))));
    }

    #[test]
    fn cfg_request_is_not_validated() {
        let cfg = Configuration {
            cfg_type: ConfigType::Request,
            attributes: vec![attr(ConfigAttributeType::InternalIp4Netmask, vec![255, 255, 255, 0])],
        };
        assert!(validate_configuration_reply(&cfg).is_ok());
    }
}
