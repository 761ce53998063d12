//! IKEv2 parameters and their parsers as defined in the IANA IKEv2 list
//! found at https://www.iana.org/assignments/ikev2-parameters/ikev2-parameters.xhtml

use super::UnparseableParameter;

/// Bit in the header flags octet set by the original initiator of the exchange
pub const FLAG_INITIATOR: u8 = 0b0000_1000;
/// Bit in the header flags octet set on response messages
pub const FLAG_RESPONSE: u8 = 0b0010_0000;
/// Bit in a generic payload header's second octet marking the payload critical
pub const FLAG_CRITICAL: u8 = 0b1000_0000;
/// Bit in a transform attribute type marking the fixed-length TV encoding
pub const FLAG_ATTRIBUTE_FORMAT: u16 = 0b1000_0000_0000_0000;

/// Type of the exchanged being used
///
/// This constrains the payloads sent in each message in an exchange.
/// Notably, values 0-33 are reserved, 45-239 are currently unassigned
/// and 240-255 reserved for private use. Also see [UnparseableParameter].
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Copy, Clone)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum ExchangeType {
    // RFC 7296
    IkeSaInit = 34,
    // RFC 7296
    IkeAuth = 35,
    // RFC 7296
    CreateChildSa = 36,
    // RFC 7296
    Informational = 37,
}

impl TryFrom<u8> for ExchangeType {
    type Error = UnparseableParameter;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0..=33 => Err(UnparseableParameter::Reserved),
            34 => Ok(ExchangeType::IkeSaInit),
            35 => Ok(ExchangeType::IkeAuth),
            36 => Ok(ExchangeType::CreateChildSa),
            37 => Ok(ExchangeType::Informational),
            38..=239 => Err(UnparseableParameter::Unassigned),
            240..=255 => Err(UnparseableParameter::PrivateUse),
        }
    }
}

/// Type of the payload being used
///
/// This constrains the payloads sent in each message in an exchange.
/// Refer to https://www.iana.org/assignments/ikev2-parameters/ikev2-parameters.xhtml
/// for details. Notably, values 1-32 are reserved, 50-127 are currently unassigned
/// and 128-255 reserved for private use. Also see [UnparseableParameter].
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Copy, Clone)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum PayloadType {
    // RFC 7296, also used as "no more payloads follow" sentinel in next-payload fields
    NoNextPayload = 0,
    // RFC 7296
    SecurityAssociation = 33,
    // RFC 7296
    KeyExchange = 34,
    // RFC 7296
    IdentificationInitiator = 35,
    // RFC 7296
    IdentificationResponder = 36,
    // RFC 7296
    Certificate = 37,
    // RFC 7296
    CertificateRequest = 38,
    // RFC 7296
    Authentication = 39,
    // RFC 7296
    Nonce = 40,
    // RFC 7296
    Notify = 41,
    // RFC 7296
    Delete = 42,
    // RFC 7296
    VendorID = 43,
    // RFC 7296
    TrafficSelectorInitiator = 44,
    // RFC 7296
    TrafficSelectorResponder = 45,
    // RFC 7296
    EncryptedAndAuthenticated = 46,
    // RFC 7296
    Configuration = 47,
    // RFC 7296
    ExtensibleAuthentication = 48,
}

impl TryFrom<u8> for PayloadType {
    type Error = UnparseableParameter;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PayloadType::NoNextPayload),
            1..=32 => Err(UnparseableParameter::Reserved),
            33 => Ok(PayloadType::SecurityAssociation),
            34 => Ok(PayloadType::KeyExchange),
            35 => Ok(PayloadType::IdentificationInitiator),
            36 => Ok(PayloadType::IdentificationResponder),
            37 => Ok(PayloadType::Certificate),
            38 => Ok(PayloadType::CertificateRequest),
            39 => Ok(PayloadType::Authentication),
            40 => Ok(PayloadType::Nonce),
            41 => Ok(PayloadType::Notify),
            42 => Ok(PayloadType::Delete),
            43 => Ok(PayloadType::VendorID),
            44 => Ok(PayloadType::TrafficSelectorInitiator),
            45 => Ok(PayloadType::TrafficSelectorResponder),
            46 => Ok(PayloadType::EncryptedAndAuthenticated),
            47 => Ok(PayloadType::Configuration),
            48 => Ok(PayloadType::ExtensibleAuthentication),
            49..=127 => Err(UnparseableParameter::Unassigned),
            128..=255 => Err(UnparseableParameter::PrivateUse),
        }
    }
}

/// Type of the transform being used
///
/// Value 0 is reserved, 6-240 is unassigned and 241-255 is
/// reserved for private use. Also see [UnparseableParameter].
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Copy, Clone)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum TransformType {
    EncryptionAlgorithm = 1,
    PseudoRandomFunction = 2,
    IntegrityAlgorithm = 3,
    KeyExchangeMethod = 4,
    SequenceNumber = 5,
}

impl TryFrom<u8> for TransformType {
    type Error = UnparseableParameter;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Err(UnparseableParameter::Reserved),
            1 => Ok(TransformType::EncryptionAlgorithm),
            2 => Ok(TransformType::PseudoRandomFunction),
            3 => Ok(TransformType::IntegrityAlgorithm),
            4 => Ok(TransformType::KeyExchangeMethod),
            5 => Ok(TransformType::SequenceNumber),
            6..=240 => Err(UnparseableParameter::Unassigned),
            241..=255 => Err(UnparseableParameter::PrivateUse),
        }
    }
}

/// Identifier of the protocol a Proposal, Notify or Delete payload concerns
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Copy, Clone)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum SecurityProtocol {
    Reserved = 0,
    InternetKeyExchange = 1,
    AuthenticationHeader = 2,
    EncapsulatingSecurityPayload = 3,
}

impl TryFrom<u8> for SecurityProtocol {
    type Error = UnparseableParameter;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SecurityProtocol::Reserved),
            1 => Ok(SecurityProtocol::InternetKeyExchange),
            2 => Ok(SecurityProtocol::AuthenticationHeader),
            3 => Ok(SecurityProtocol::EncapsulatingSecurityPayload),
            4..=255 => Err(UnparseableParameter::Unassigned),
        }
    }
}

/// Encryption algorithm transform IDs (Transform Type 1), RFC 7296 section 3.3.2
///
/// Only the algorithms this implementation actually negotiates are listed; unknown
/// transform IDs decode to [UnparseableParameter::Unassigned] rather than failing
/// the whole proposal, since a peer may legally offer ciphers we don't support.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Copy, Clone)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum EncryptionAlgorithm {
    AesCbc = 12,
    AesCtr = 13,
    AesGcm8 = 18,
    AesGcm12 = 19,
    AesGcm16 = 20,
    ChaCha20Poly1305 = 28,
}

impl EncryptionAlgorithm {
    /// Whether this transform is a combined-mode (AEAD) cipher
    ///
    /// Combined-mode ciphers provide their own integrity check; RFC 7296 section 3.3.2
    /// forbids pairing them with a non-NONE integrity transform in the same proposal.
    pub fn is_aead(self) -> bool {
        matches!(
            self,
            EncryptionAlgorithm::AesGcm8
                | EncryptionAlgorithm::AesGcm12
                | EncryptionAlgorithm::AesGcm16
                | EncryptionAlgorithm::ChaCha20Poly1305
        )
    }
}

impl TryFrom<u16> for EncryptionAlgorithm {
    type Error = UnparseableParameter;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            12 => Ok(EncryptionAlgorithm::AesCbc),
            13 => Ok(EncryptionAlgorithm::AesCtr),
            18 => Ok(EncryptionAlgorithm::AesGcm8),
            19 => Ok(EncryptionAlgorithm::AesGcm12),
            20 => Ok(EncryptionAlgorithm::AesGcm16),
            28 => Ok(EncryptionAlgorithm::ChaCha20Poly1305),
            _ => Err(UnparseableParameter::Unassigned),
        }
    }
}

/// Pseudo-random function transform IDs (Transform Type 2), RFC 7296 section 3.3.2
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Copy, Clone)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum PseudorandomFunction {
    HmacSha1 = 2,
    HmacSha2_256 = 5,
    HmacSha2_384 = 6,
    HmacSha2_512 = 7,
}

impl TryFrom<u16> for PseudorandomFunction {
    type Error = UnparseableParameter;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(PseudorandomFunction::HmacSha1),
            5 => Ok(PseudorandomFunction::HmacSha2_256),
            6 => Ok(PseudorandomFunction::HmacSha2_384),
            7 => Ok(PseudorandomFunction::HmacSha2_512),
            _ => Err(UnparseableParameter::Unassigned),
        }
    }
}

/// Integrity algorithm transform IDs (Transform Type 3), RFC 7296 section 3.3.2
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Copy, Clone)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum IntegrityAlgorithm {
    None = 0,
    HmacSha1_96 = 2,
    HmacSha2_256_128 = 12,
    HmacSha2_384_192 = 13,
    HmacSha2_512_256 = 14,
}

impl TryFrom<u16> for IntegrityAlgorithm {
    type Error = UnparseableParameter;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(IntegrityAlgorithm::None),
            2 => Ok(IntegrityAlgorithm::HmacSha1_96),
            12 => Ok(IntegrityAlgorithm::HmacSha2_256_128),
            13 => Ok(IntegrityAlgorithm::HmacSha2_384_192),
            14 => Ok(IntegrityAlgorithm::HmacSha2_512_256),
            _ => Err(UnparseableParameter::Unassigned),
        }
    }
}

/// Key exchange method transform IDs (Transform Type 4), RFC 7296 section 3.3.2
///
/// Originally named "Diffie-Hellman Group"; covers both the classical MODP
/// groups and the newer elliptic-curve groups.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Copy, Clone)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum KeyExchangeMethod {
    ModP1024 = 2,
    ModP2048 = 14,
    ModP3072 = 15,
    ModP4096 = 16,
    Curve25519 = 31,
    Curve448 = 32,
}

impl TryFrom<u16> for KeyExchangeMethod {
    type Error = UnparseableParameter;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(KeyExchangeMethod::ModP1024),
            14 => Ok(KeyExchangeMethod::ModP2048),
            15 => Ok(KeyExchangeMethod::ModP3072),
            16 => Ok(KeyExchangeMethod::ModP4096),
            31 => Ok(KeyExchangeMethod::Curve25519),
            32 => Ok(KeyExchangeMethod::Curve448),
            _ => Err(UnparseableParameter::Unassigned),
        }
    }
}

/// Extended Sequence Numbers transform IDs (Transform Type 5), RFC 7296 section 3.3.2
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Copy, Clone)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum SequenceNumbers {
    NoEsn = 0,
    Esn = 1,
}

impl TryFrom<u16> for SequenceNumbers {
    type Error = UnparseableParameter;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SequenceNumbers::NoEsn),
            1 => Ok(SequenceNumbers::Esn),
            _ => Err(UnparseableParameter::Unassigned),
        }
    }
}

/// Transform attribute types (RFC 7296 section 3.3.5); currently only Key Length exists
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Copy, Clone)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum AttributeType {
    KeyLength = 14,
}

/// Indicator for the encoding of certificates and related data
///
/// Values 0 and 5 are reserved, 16-200 are unassigned and 201-255 are reserved for private use.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Copy)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum CertificateEncoding {
    PKCS7WrappedX509Certificate = 1,
    PGPCertificate = 2,
    DNSSignedKey = 3,
    X509CertificateSignature = 4,
    KerberosTokens = 6,
    CertificateRevocationList = 7,
    AuthorityRevocationList = 8,
    SPKICertificate = 9,
    X509CertificateAttribute = 10,
    RawRSAKey = 11, // deprecated
    HashUrlX509Certificate = 12,
    HashUrlX509Bundle = 13,
    OCSPContent = 14,
    RawPublicKey = 15,
}

impl TryFrom<u8> for CertificateEncoding {
    type Error = UnparseableParameter;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Err(UnparseableParameter::Reserved),
            1 => Ok(CertificateEncoding::PKCS7WrappedX509Certificate),
            2 => Ok(CertificateEncoding::PGPCertificate),
            3 => Ok(CertificateEncoding::DNSSignedKey),
            4 => Ok(CertificateEncoding::X509CertificateSignature),
            5 => Err(UnparseableParameter::Reserved),
            6 => Ok(CertificateEncoding::KerberosTokens),
            7 => Ok(CertificateEncoding::CertificateRevocationList),
            8 => Ok(CertificateEncoding::AuthorityRevocationList),
            9 => Ok(CertificateEncoding::SPKICertificate),
            10 => Ok(CertificateEncoding::X509CertificateAttribute),
            11 => Ok(CertificateEncoding::RawRSAKey),
            12 => Ok(CertificateEncoding::HashUrlX509Certificate),
            13 => Ok(CertificateEncoding::HashUrlX509Bundle),
            14 => Ok(CertificateEncoding::OCSPContent),
            15 => Ok(CertificateEncoding::RawPublicKey),
            16..=200 => Err(UnparseableParameter::Unassigned),
            201..=255 => Err(UnparseableParameter::PrivateUse),
        }
    }
}

/// Type of authentication method being used
///
/// Value 0 is reserved, values 4-8 and 15-200 are unassigned and
/// values 201-255 are reserved for private use.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Copy)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum AuthenticationMethod {
    RSADigitalSignature = 1,
    SharedKeyMessageIntegrityCode = 2,
    DSSDigitalSignature = 3,
    ECDSAWithSHA256 = 9,  // with P-256 curve
    ECDSAWithSHA384 = 10, // with P-384 curve
    ECDSAWithSHA512 = 11, // with P-521 curve
    GenericSecurePassword = 12,
    NULLAuthentication = 13,
    DigitalSignature = 14,
}

impl TryFrom<u8> for AuthenticationMethod {
    type Error = UnparseableParameter;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Err(UnparseableParameter::Reserved),
            1 => Ok(AuthenticationMethod::RSADigitalSignature),
            2 => Ok(AuthenticationMethod::SharedKeyMessageIntegrityCode),
            3 => Ok(AuthenticationMethod::DSSDigitalSignature),
            4..=8 => Err(UnparseableParameter::Unassigned),
            9 => Ok(AuthenticationMethod::ECDSAWithSHA256),
            10 => Ok(AuthenticationMethod::ECDSAWithSHA384),
            11 => Ok(AuthenticationMethod::ECDSAWithSHA512),
            12 => Ok(AuthenticationMethod::GenericSecurePassword),
            13 => Ok(AuthenticationMethod::NULLAuthentication),
            14 => Ok(AuthenticationMethod::DigitalSignature),
            15..=200 => Err(UnparseableParameter::Unassigned),
            201..=255 => Err(UnparseableParameter::PrivateUse),
        }
    }
}

/// Type of the Identification payload's ID field, RFC 7296 section 3.5
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Copy)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum IdentificationType {
    Ipv4Addr = 1,
    Fqdn = 2,
    Rfc822Addr = 3,
    Ipv6Addr = 5,
    DerAsn1Dn = 9,
    KeyId = 11,
}

impl TryFrom<u8> for IdentificationType {
    type Error = UnparseableParameter;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(IdentificationType::Ipv4Addr),
            2 => Ok(IdentificationType::Fqdn),
            3 => Ok(IdentificationType::Rfc822Addr),
            5 => Ok(IdentificationType::Ipv6Addr),
            9 => Ok(IdentificationType::DerAsn1Dn),
            11 => Ok(IdentificationType::KeyId),
            _ => Err(UnparseableParameter::Unassigned),
        }
    }
}

/// Traffic Selector types, RFC 7296 section 3.13.1
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Copy)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum TrafficSelectorType {
    Ipv4AddrRange = 7,
    Ipv6AddrRange = 8,
}

impl TryFrom<u8> for TrafficSelectorType {
    type Error = UnparseableParameter;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            7 => Ok(TrafficSelectorType::Ipv4AddrRange),
            8 => Ok(TrafficSelectorType::Ipv6AddrRange),
            _ => Err(UnparseableParameter::Unassigned),
        }
    }
}

/// Configuration Payload CFG types, RFC 7296 section 3.15
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Copy)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum ConfigType {
    Request = 1,
    Reply = 2,
    Set = 3,
    Ack = 4,
}

impl TryFrom<u8> for ConfigType {
    type Error = UnparseableParameter;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ConfigType::Request),
            2 => Ok(ConfigType::Reply),
            3 => Ok(ConfigType::Set),
            4 => Ok(ConfigType::Ack),
            _ => Err(UnparseableParameter::Unassigned),
        }
    }
}

/// Configuration Payload attribute types, RFC 7296 section 3.15.1
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Copy)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum ConfigAttributeType {
    InternalIp4Address = 1,
    InternalIp4Netmask = 2,
    InternalIp4Dns = 3,
    InternalIp6Address = 8,
    InternalIp6Dns = 10,
    ApplicationVersion = 7,
}

impl TryFrom<u16> for ConfigAttributeType {
    type Error = UnparseableParameter;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ConfigAttributeType::InternalIp4Address),
            2 => Ok(ConfigAttributeType::InternalIp4Netmask),
            3 => Ok(ConfigAttributeType::InternalIp4Dns),
            7 => Ok(ConfigAttributeType::ApplicationVersion),
            8 => Ok(ConfigAttributeType::InternalIp6Address),
            10 => Ok(ConfigAttributeType::InternalIp6Dns),
            _ => Err(UnparseableParameter::Unassigned),
        }
    }
}

/// Well-defined Notify message types that report an error (values below 16384)
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum NotifyErrorMessage {
    UnsupportedCriticalPayload = 1,
    InvalidIkeSpi = 4,
    InvalidMajorVersion = 5,
    InvalidSyntax = 7,
    InvalidMessageId = 9,
    InvalidSpi = 11,
    NoProposalChosen = 14,
    InvalidKeyExchangePayload = 17,
    AuthenticationFailed = 24,
    SinglePairRequired = 34,
    NoAdditionalSas = 35,
    InternalAddressFailure = 36,
    FailedCpRequired = 37,
    TsUnacceptable = 38,
    InvalidSelectors = 39,
    TemporaryFailure = 43,
    ChildSaNotFound = 44,
}

impl TryFrom<u16> for NotifyErrorMessage {
    type Error = UnparseableParameter;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Err(UnparseableParameter::Reserved),
            1 => Ok(NotifyErrorMessage::UnsupportedCriticalPayload),
            2..=3 => Err(UnparseableParameter::Reserved),
            4 => Ok(NotifyErrorMessage::InvalidIkeSpi),
            5 => Ok(NotifyErrorMessage::InvalidMajorVersion),
            6 => Err(UnparseableParameter::Reserved),
            7 => Ok(NotifyErrorMessage::InvalidSyntax),
            8 => Err(UnparseableParameter::Reserved),
            9 => Ok(NotifyErrorMessage::InvalidMessageId),
            10 => Err(UnparseableParameter::Reserved),
            11 => Ok(NotifyErrorMessage::InvalidSpi),
            12..=13 => Err(UnparseableParameter::Reserved),
            14 => Ok(NotifyErrorMessage::NoProposalChosen),
            15..=16 => Err(UnparseableParameter::Reserved),
            17 => Ok(NotifyErrorMessage::InvalidKeyExchangePayload),
            18..=23 => Err(UnparseableParameter::Reserved),
            24 => Ok(NotifyErrorMessage::AuthenticationFailed),
            25..=33 => Err(UnparseableParameter::Reserved),
            34 => Ok(NotifyErrorMessage::SinglePairRequired),
            35 => Ok(NotifyErrorMessage::NoAdditionalSas),
            36 => Ok(NotifyErrorMessage::InternalAddressFailure),
            37 => Ok(NotifyErrorMessage::FailedCpRequired),
            38 => Ok(NotifyErrorMessage::TsUnacceptable),
            39 => Ok(NotifyErrorMessage::InvalidSelectors),
            40..=42 => Err(UnparseableParameter::Unassigned),
            43 => Ok(NotifyErrorMessage::TemporaryFailure),
            44 => Ok(NotifyErrorMessage::ChildSaNotFound),
            45..=8191 => Err(UnparseableParameter::Unassigned),
            8192..=16383 => Err(UnparseableParameter::PrivateUse),
            16384..=65535 => Err(UnparseableParameter::OutOfRange),
        }
    }
}

/// Well-defined Notify message types that report status/capability (values at or above 16384)
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum NotifyStatusMessage {
    InitialContact = 16384,
    SetWindowSize = 16385,
    IpcompSupported = 16387,
    NatDetectionSourceIp = 16388,
    NatDetectionDestinationIp = 16389,
    Cookie = 16390,
    UseTransportMode = 16391,
    RekeySa = 16393,
    EspTfcPaddingNotSupported = 16394,
    MobikeSupported = 16396,
    EapOnlyAuthentication = 16417,
}

impl TryFrom<u16> for NotifyStatusMessage {
    type Error = UnparseableParameter;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0..=16383 => Err(UnparseableParameter::OutOfRange),
            16384 => Ok(NotifyStatusMessage::InitialContact),
            16385 => Ok(NotifyStatusMessage::SetWindowSize),
            16387 => Ok(NotifyStatusMessage::IpcompSupported),
            16388 => Ok(NotifyStatusMessage::NatDetectionSourceIp),
            16389 => Ok(NotifyStatusMessage::NatDetectionDestinationIp),
            16390 => Ok(NotifyStatusMessage::Cookie),
            16391 => Ok(NotifyStatusMessage::UseTransportMode),
            16393 => Ok(NotifyStatusMessage::RekeySa),
            16394 => Ok(NotifyStatusMessage::EspTfcPaddingNotSupported),
            16396 => Ok(NotifyStatusMessage::MobikeSupported),
            16417 => Ok(NotifyStatusMessage::EapOnlyAuthentication),
            _ => Err(UnparseableParameter::Unassigned),
        }
    }
}

/// The dedicated Notify message type used to signal a rekey, RFC 7296 section 3.10.1
///
/// `REKEY_SA` (16393) is carried in a status-range Notify but is special-cased by the
/// session state machine rather than treated as a generic capability announcement.
pub const NOTIFY_REKEY_SA: u16 = NotifyStatusMessage::RekeySa as u16;
