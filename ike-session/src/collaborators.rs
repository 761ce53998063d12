//! Collaborator traits (C-sockets): the IKE session state machine depends on
//! these rather than a concrete UDP socket or a concrete child-SA installer,
//! so callers can plug in NAT-T encapsulation, kernel SA installation, or a
//! test double.

use async_trait::async_trait;
use std::io;
use std::net::SocketAddr;

/// Datagram transport for one IKE peer. Implementations carry the UDP
/// port-500/4500 distinction (and the 4-byte non-ESP marker NAT-T prepends
/// on port 4500) internally; the session state machine only ever sees
/// complete IKE packets.
#[async_trait]
pub trait IkeSocket: Send + Sync {
    /// Sends one IKE packet to `peer`.
    async fn send(&self, bytes: &[u8], peer: SocketAddr) -> io::Result<()>;

    /// Receives the next IKE packet and the peer address it arrived from.
    async fn recv(&self) -> io::Result<(Vec<u8>, SocketAddr)>;
}

/// Negotiated keying material and traffic selectors for one Child SA,
/// handed off once CREATE_CHILD_SA (or the Child SA created alongside
/// IKE_AUTH) completes.
#[derive(Debug, Clone)]
pub struct ChildSaKeys {
    /// SPI we chose for inbound traffic on this Child SA.
    pub inbound_spi: u32,
    /// SPI the peer chose for inbound traffic (our outbound SPI).
    pub outbound_spi: u32,
    /// Encryption/integrity key material for inbound traffic.
    pub inbound_key: Vec<u8>,
    /// Encryption/integrity key material for outbound traffic.
    pub outbound_key: Vec<u8>,
}

/// Receives Child SA keying material as it is negotiated, so the caller can
/// install it (e.g. into a kernel IPsec SA database).
#[async_trait]
pub trait ChildSaInstaller: Send + Sync {
    /// Installs a freshly negotiated Child SA.
    async fn install(&self, keys: ChildSaKeys);

    /// Removes a previously installed Child SA, identified by the SPI we
    /// assigned it for inbound traffic.
    async fn uninstall(&self, inbound_spi: u32);
}
