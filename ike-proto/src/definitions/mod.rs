//! High-level, owned representations of IKEv2 messages and payloads
//!
//! The types here are the Rust-native counterpart to the wire structs in
//! [header]; a [Header] describes 28 octets on the wire, an [IKEv2] is the
//! whole decoded message. Converting between them lives in [crate::generator]
//! and [crate::parser].

pub mod header;
pub mod params;
mod impls;

pub use header::{GenericPayloadHeader, Header};

use params::{
    AuthenticationMethod, ConfigAttributeType, EncryptionAlgorithm, ExchangeType,
    IdentificationType, IntegrityAlgorithm, KeyExchangeMethod, NotifyErrorMessage,
    NotifyStatusMessage, PayloadType, PseudorandomFunction, SecurityProtocol, SequenceNumbers,
    TrafficSelectorType,
};

/// When parsing a parameter from u8 or u16, there are several "regions" in the definitions
/// that can't be represented by a Rust enum. Typically the last two regions of a parameter
/// registry are unassigned and/or reserved for private use.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum UnparseableParameter {
    /// The parameter is reserved and must not be used, as it may conflict with older standards
    Reserved,
    /// The parameter has no recognized meaning by any known standard
    Unassigned,
    /// The parameter is reserved for Private Use by proprietary implementations
    /// and not part of a standard
    PrivateUse,
    /// The parameter can not reach the value this resolves to,
    /// as such the packet where it originates from must be invalid
    OutOfRange,
}

/// A complete decoded (or to-be-encoded) IKEv2 message
///
/// Corresponds to the fixed [Header] plus the ordered list of payloads that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IKEv2 {
    /// SPI chosen by whoever started the exchange (never zero once sent)
    pub initiator_spi: u64,
    /// SPI chosen by the responder; zero until the responder has replied at least once
    pub responder_spi: u64,
    /// Exchange type this message belongs to
    pub exchange_type: ExchangeType,
    /// Whether this message was sent by the original initiator of the IKE SA
    pub initiator: bool,
    /// Whether this message is a response to a previously sent request
    pub response: bool,
    /// Message ID used for retransmission detection and request/response matching
    pub message_id: u32,
    /// Ordered list of payloads carried in the message
    pub payloads: Vec<Payload>,
}

/// One payload inside an [IKEv2] message
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Payload {
    SecurityAssociation(SecurityAssociation),
    KeyExchange(KeyExchange),
    IdentificationInitiator(Identification),
    IdentificationResponder(Identification),
    Authentication(Authentication),
    Nonce(Vec<u8>),
    Notify(Notification),
    Delete(Delete),
    VendorID(Vec<u8>),
    TrafficSelectorInitiator(TrafficSelectors),
    TrafficSelectorResponder(TrafficSelectors),
    EncryptedAndAuthenticated(Vec<u8>),
    Configuration(Configuration),
    ExtensibleAuthentication(Vec<u8>),
}

impl From<&Payload> for PayloadType {
    fn from(value: &Payload) -> Self {
        match value {
            Payload::SecurityAssociation(_) => PayloadType::SecurityAssociation,
            Payload::KeyExchange(_) => PayloadType::KeyExchange,
            Payload::IdentificationInitiator(_) => PayloadType::IdentificationInitiator,
            Payload::IdentificationResponder(_) => PayloadType::IdentificationResponder,
            Payload::Authentication(_) => PayloadType::Authentication,
            Payload::Nonce(_) => PayloadType::Nonce,
            Payload::Notify(_) => PayloadType::Notify,
            Payload::Delete(_) => PayloadType::Delete,
            Payload::VendorID(_) => PayloadType::VendorID,
            Payload::TrafficSelectorInitiator(_) => PayloadType::TrafficSelectorInitiator,
            Payload::TrafficSelectorResponder(_) => PayloadType::TrafficSelectorResponder,
            Payload::EncryptedAndAuthenticated(_) => PayloadType::EncryptedAndAuthenticated,
            Payload::Configuration(_) => PayloadType::Configuration,
            Payload::ExtensibleAuthentication(_) => PayloadType::ExtensibleAuthentication,
        }
    }
}

/// A Security Association payload: an ordered list of [Proposal]s, RFC 7296 section 3.3
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityAssociation {
    /// Proposals in descending order of preference
    pub proposals: Vec<Proposal>,
}

/// One Proposal inside a [SecurityAssociation]
///
/// Transforms are grouped by type rather than kept as a flat list so that consumers
/// can pick "the" encryption algorithm etc. without re-scanning; RFC 7296 treats
/// multiple transforms of the same type inside a proposal as an AND-of-ORs choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    /// Protocol this proposal concerns
    pub protocol: SecurityProtocol,
    /// SPI of the proposal; empty for the initial IKE_SA_INIT exchange
    pub spi: Vec<u8>,
    /// Offered encryption algorithms, with an optional key length attribute
    pub encryption_algorithms: Vec<(EncryptionAlgorithm, Option<u16>)>,
    /// Offered pseudo-random functions
    pub pseudo_random_functions: Vec<PseudorandomFunction>,
    /// Offered integrity algorithms
    pub integrity_algorithms: Vec<IntegrityAlgorithm>,
    /// Offered Diffie-Hellman / key exchange groups
    pub key_exchange_methods: Vec<KeyExchangeMethod>,
    /// Offered extended sequence number settings
    pub sequence_numbers: Vec<SequenceNumbers>,
}

/// A single transform as it appears in the wire format, before being grouped into a [Proposal]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Transform {
    Encryption(EncryptionAlgorithm, Option<u16>),
    PseudoRandomFunction(PseudorandomFunction),
    Integrity(IntegrityAlgorithm),
    KeyExchange(KeyExchangeMethod),
    SequenceNumber(SequenceNumbers),
}

/// A Transform attribute (RFC 7296 section 3.3.5); only Key Length is defined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Attribute {
    KeyLength(u16),
}

/// A Key Exchange payload, RFC 7296 section 3.4
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyExchange {
    /// Diffie-Hellman / key exchange group the data below was computed in
    pub dh_group: KeyExchangeMethod,
    /// Public key material
    pub data: Vec<u8>,
}

/// An Identification payload, RFC 7296 section 3.5
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identification {
    /// Format of the identification data
    pub id_type: IdentificationType,
    /// Raw identification data, interpreted according to `id_type`
    pub data: Vec<u8>,
}

/// An Authentication payload, RFC 7296 section 3.8
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authentication {
    /// Method used to compute the authentication data
    pub method: AuthenticationMethod,
    /// Signature, MAC, or other authentication data, depending on `method`
    pub data: Vec<u8>,
}

/// Discriminates whether a [Notification]'s type field is an error or a status/capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum NotificationType {
    Error(NotifyErrorMessage),
    Status(NotifyStatusMessage),
}

/// A Notify payload, RFC 7296 section 3.10
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Error or status type this notification carries
    pub variant: NotificationType,
    /// Type-specific notification data
    pub data: Vec<u8>,
    /// Protocol the optional SPI refers to; `Reserved` when no SPI is present
    pub protocol: SecurityProtocol,
    /// SPI of the SA this notification concerns, if any
    pub spi: Option<Vec<u8>>,
}

/// A Delete payload, RFC 7296 section 3.11
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delete {
    /// Protocol whose SA(s) are being deleted
    pub protocol: SecurityProtocol,
    /// SPI length in octets; zero when deleting an IKE SA
    pub spi_size: u8,
    /// SPIs of the SA(s) to delete; for an IKE SA delete this is empty
    /// (the IKE SA is identified by the message's own header SPIs)
    pub spis: Vec<Vec<u8>>,
}

/// One address/port range entry inside a [TrafficSelectors] payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficSelector {
    /// Whether this selector describes an IPv4 or IPv6 range
    pub ts_type: TrafficSelectorType,
    /// IP protocol number to match, or 0 for any
    pub ip_protocol_id: u8,
    /// First port in the matched range
    pub start_port: u16,
    /// Last port in the matched range
    pub end_port: u16,
    /// Lowest address in the matched range
    pub start_address: std::net::IpAddr,
    /// Highest address in the matched range
    pub end_address: std::net::IpAddr,
}

/// A Traffic Selector payload, RFC 7296 section 3.13
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficSelectors {
    /// Selectors narrowing the traffic a Child SA protects
    pub selectors: Vec<TrafficSelector>,
}

/// A single Configuration attribute, RFC 7296 section 3.15.1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigAttribute {
    /// Which piece of configuration this attribute carries
    pub attribute_type: ConfigAttributeType,
    /// Raw value, interpreted according to `attribute_type`
    pub value: Vec<u8>,
}

/// A Configuration payload, RFC 7296 section 3.15
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Request, Reply, Set or Ack
    pub cfg_type: params::ConfigType,
    /// Attributes carried in this configuration exchange
    pub attributes: Vec<ConfigAttribute>,
}
