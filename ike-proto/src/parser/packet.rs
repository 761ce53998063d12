use crate::crypto::sk;
use crate::definitions::header::{GenericPayloadHeader, Header};
use crate::definitions::params::{
    EncryptionAlgorithm, ExchangeType, IntegrityAlgorithm, PayloadType, FLAG_INITIATOR,
    FLAG_RESPONSE,
};
use crate::definitions::{
    Authentication, Configuration, Delete, Identification, KeyExchange, Notification, Payload,
    SecurityAssociation, TrafficSelectors, IKEv2,
};
use crate::parser::{ParserError, ParserResult};
use crate::IKE_2_VERSION_VALUE;
use tracing::warn;
use zerocopy::FromBytes;

impl IKEv2 {
    /// Parse a buffer into an [IKEv2] packet, if possible.
    ///
    /// The parser functionality considers the size of payloads noted in
    /// the header of the respective payload to split the buffer and feed
    /// them into sub-parser functions. These parse the structure of the
    /// payload based on "next payload" fields and do not necessarily
    /// rely on the length of the header or body. Therefore, a packet
    /// must have both correct payload header information and inner
    /// structural integrity; otherwise parsing will fail.
    pub fn try_parse(buf: &[u8]) -> Result<Self, ParserError> {
        let header = Header::ref_from_prefix(buf).ok_or(ParserError::BufferTooSmall)?;
        if header.version != IKE_2_VERSION_VALUE {
            return Err(ParserError::WrongProtocol);
        }
        if header.length.get() as usize != buf.len() {
            warn!("Buffer length does not match header length");
        }

        let next_payload = PayloadType::try_from(header.next_payload)?;
        let (payloads, _) = parse_payload_chain(buf, size_of::<Header>(), next_payload)?;

        Ok(Self {
            initiator_spi: header.initiator_spi.get(),
            responder_spi: header.responder_spi.get(),
            exchange_type: ExchangeType::try_from(header.exchange_type)?,
            initiator: header.flags & FLAG_INITIATOR == FLAG_INITIATOR,
            response: header.flags & FLAG_RESPONSE == FLAG_RESPONSE,
            message_id: header.message_id.get(),
            payloads,
        })
    }

    /// Parse a buffer whose sole top-level payload is an Encrypted Payload
    /// (RFC 7296 section 3.14), decrypting and verifying it with the given
    /// IKE SA keys before parsing the inner payload chain it carries. Used
    /// for every exchange after IKE_SA_INIT.
    pub fn try_parse_encrypted(
        buf: &[u8],
        encryption: EncryptionAlgorithm,
        integrity_alg: IntegrityAlgorithm,
        sk_e: &[u8],
        sk_a: &[u8],
    ) -> Result<Self, ParserError> {
        let header = Header::ref_from_prefix(buf).ok_or(ParserError::BufferTooSmall)?;
        if header.version != IKE_2_VERSION_VALUE {
            return Err(ParserError::WrongProtocol);
        }
        if PayloadType::try_from(header.next_payload)? != PayloadType::EncryptedAndAuthenticated {
            return Err(ParserError::ProtocolViolation);
        }
        if buf.len() < size_of::<Header>() + size_of::<GenericPayloadHeader>() {
            return Err(ParserError::BufferTooSmall);
        }

        let offset = size_of::<Header>();
        let sk_header = GenericPayloadHeader::ref_from_prefix(&buf[offset..])
            .ok_or(ParserError::BufferTooSmall)?;
        let first_inner = PayloadType::try_from(sk_header.next_payload)?;
        let sk_payload_length = sk_header.payload_length.get() as usize;
        if sk_payload_length < size_of::<GenericPayloadHeader>()
            || offset + sk_payload_length > buf.len()
        {
            return Err(ParserError::InvalidSyntax);
        }
        let sk_body = &buf[offset + size_of::<GenericPayloadHeader>()..offset + sk_payload_length];

        // Matches the AAD convention in [crate::generator] for
        // [IKEv2::try_build_encrypted]: the header up to but excluding the
        // Length field.
        let aad = &buf[..24];
        let plaintext = sk::open(encryption, integrity_alg, sk_e, sk_a, aad, sk_body)?;
        let (payloads, _) = parse_payload_chain(&plaintext, 0, first_inner)?;

        Ok(Self {
            initiator_spi: header.initiator_spi.get(),
            responder_spi: header.responder_spi.get(),
            exchange_type: ExchangeType::try_from(header.exchange_type)?,
            initiator: header.flags & FLAG_INITIATOR == FLAG_INITIATOR,
            response: header.flags & FLAG_RESPONSE == FLAG_RESPONSE,
            message_id: header.message_id.get(),
            payloads,
        })
    }
}

/// Parses the chain of top-level payloads starting at `start_offset` in
/// `buf`, following each payload's "next payload" field, until
/// [PayloadType::NoNextPayload] is reached. Shared by [IKEv2::try_parse] and
/// [IKEv2::try_parse_encrypted] (the latter calls it on the decrypted
/// plaintext of the Encrypted Payload rather than on `buf` directly).
fn parse_payload_chain(
    buf: &[u8],
    start_offset: usize,
    first_payload: PayloadType,
) -> Result<(Vec<Payload>, usize), ParserError> {
    let mut offset = start_offset;
    let mut next_payload = first_payload;
    let mut payloads = vec![];

    loop {
        let (decoded_payload, current_size) = match next_payload {
            PayloadType::NoNextPayload => {
                break;
            }
            PayloadType::SecurityAssociation => {
                let (v, l, n) = try_parse_generic(&buf[offset..])?;
                let sa = if v.is_empty() {
                    SecurityAssociation { proposals: vec![] }
                } else {
                    SecurityAssociation::try_parse(v.as_slice())?
                };
                next_payload = n;
                (Payload::SecurityAssociation(sa), l)
            }
            PayloadType::KeyExchange => {
                let (v, l, n) = try_parse_generic(&buf[offset..])?;
                next_payload = n;
                (Payload::KeyExchange(KeyExchange::try_parse(&v)?), l)
            }
            PayloadType::IdentificationInitiator => {
                let (v, l, n) = try_parse_generic(&buf[offset..])?;
                next_payload = n;
                (
                    Payload::IdentificationInitiator(Identification::try_parse(&v)?),
                    l,
                )
            }
            PayloadType::IdentificationResponder => {
                let (v, l, n) = try_parse_generic(&buf[offset..])?;
                next_payload = n;
                (
                    Payload::IdentificationResponder(Identification::try_parse(&v)?),
                    l,
                )
            }
            PayloadType::Authentication => {
                let (v, l, n) = try_parse_generic(&buf[offset..])?;
                next_payload = n;
                (Payload::Authentication(Authentication::try_parse(&v)?), l)
            }
            PayloadType::Nonce => {
                let (v, l, n) = try_parse_generic(&buf[offset..])?;
                next_payload = n;
                (Payload::Nonce(v), l)
            }
            PayloadType::Notify => {
                let (v, l, n) = try_parse_generic(&buf[offset..])?;
                next_payload = n;
                (Payload::Notify(Notification::try_parse(&v)?), l)
            }
            PayloadType::Delete => {
                let (v, l, n) = try_parse_generic(&buf[offset..])?;
                next_payload = n;
                (Payload::Delete(Delete::try_parse(&v)?), l)
            }
            PayloadType::VendorID => {
                let (v, l, n) = try_parse_generic(&buf[offset..])?;
                next_payload = n;
                (Payload::VendorID(v), l)
            }
            PayloadType::TrafficSelectorInitiator => {
                let (v, l, n) = try_parse_generic(&buf[offset..])?;
                next_payload = n;
                (
                    Payload::TrafficSelectorInitiator(TrafficSelectors::try_parse(&v)?),
                    l,
                )
            }
            PayloadType::TrafficSelectorResponder => {
                let (v, l, n) = try_parse_generic(&buf[offset..])?;
                next_payload = n;
                (
                    Payload::TrafficSelectorResponder(TrafficSelectors::try_parse(&v)?),
                    l,
                )
            }
            PayloadType::EncryptedAndAuthenticated => {
                let (v, l, n) = try_parse_generic(&buf[offset..])?;
                // The encrypted payload must be the last payload of a packet,
                // everything after it is ignored
                if n != PayloadType::NoNextPayload {
                    warn!("Found a payload after Encrypted payload, which is illegal: {n:#?}");
                }
                next_payload = PayloadType::NoNextPayload;
                (Payload::EncryptedAndAuthenticated(v), l)
            }
            PayloadType::Configuration => {
                let (v, l, n) = try_parse_generic(&buf[offset..])?;
                next_payload = n;
                (Payload::Configuration(Configuration::try_parse(&v)?), l)
            }
            PayloadType::ExtensibleAuthentication => {
                let (v, l, n) = try_parse_generic(&buf[offset..])?;
                next_payload = n;
                (Payload::ExtensibleAuthentication(v), l)
            }
            PayloadType::Certificate | PayloadType::CertificateRequest => {
                // Certificate-based authentication is out of scope; skip the payload
                // but still advance correctly so the chain after it still parses.
                let (_, l, n) = try_parse_generic(&buf[offset..])?;
                offset += l;
                next_payload = n;
                continue;
            }
        };
        offset += current_size;
        payloads.push(decoded_payload);
    }

    Ok((payloads, offset))
}

/// Helper to parse all payloads that only have a generic header
fn try_parse_generic(buf: &[u8]) -> ParserResult<Vec<u8>> {
    let header = GenericPayloadHeader::ref_from_prefix(buf).ok_or(ParserError::BufferTooSmall)?;
    let consumed = header.payload_length.get() as usize;
    if consumed < size_of::<GenericPayloadHeader>() || consumed > buf.len() {
        return Err(ParserError::InvalidSyntax);
    }
    Ok((
        buf[size_of::<GenericPayloadHeader>()..consumed].to_vec(),
        consumed,
        PayloadType::try_from(header.next_payload)?,
    ))
}

#[cfg(test)]
mod tests {
    use crate::definitions::params::{EncryptionAlgorithm, ExchangeType, IntegrityAlgorithm};
    use crate::definitions::{Payload, SecurityAssociation, IKEv2};
    use crate::parser::ParserError;

    #[test]
    #[allow(clippy::unwrap_used)]
    fn try_parse_encrypted_rejects_plaintext_next_payload() {
        let buff = vec![
            0x00, 0x04, 0xc0, 0x1d, 0xb4, 0x00, 0xb0, 0xc9, // initiator
            0x00, 0x00, 0x00, 0x00, 0x11, 0xf1, 0x5b, 0xa3, // responder
            0x00, // next payload (NoNextPayload, not Encrypted)
            0x20, // version
            0x25, // exchange type
            0x20, // flags
            0x3b, 0x9a, 0xc9, 0xff, // message ID
            0x00, 0x00, 0x00, 0x1c, // length
        ];
        assert!(matches!(
            IKEv2::try_parse_encrypted(
                &buff,
                EncryptionAlgorithm::AesCbc,
                IntegrityAlgorithm::HmacSha2_256_128,
                &[0u8; 16],
                &[0u8; 32],
            ),
            Err(ParserError::ProtocolViolation)
        ));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn parse_empty_packet() {
        let buff = vec![
            0x00, 0x04, 0xc0, 0x1d, 0xb4, 0x00, 0xb0, 0xc9, // initiator
            0x00, 0x00, 0x00, 0x00, 0x11, 0xf1, 0x5b, 0xa3, // responder
            0x00, // next payload
            0x20, // version
            0x25, // exchange type
            0x20, // flags, 0b00100000
            0x3b, 0x9a, 0xc9, 0xff, // message ID
            0x00, 0x00, 0x00, 0x1c, // length
        ];
        let packet = IKEv2::try_parse(buff.as_slice()).unwrap();
        assert_eq!(packet.initiator_spi, 1337133713371337);
        assert_eq!(packet.responder_spi, 301030307);
        assert_eq!(packet.message_id, 0x3b9ac9ff);
        assert_eq!(packet.exchange_type, ExchangeType::Informational);
        assert!(packet.response);
        assert_eq!(packet.payloads.len(), 0);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn parse_empty_sa_in_packet() {
        let buff = vec![
            0x00, 0x04, 0xc0, 0x1d, 0xb4, 0x00, 0xb0, 0xc9, // initiator
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // responder
            0x21, // next payload, Security Association
            0x20, // version
            0x22, // exchange type
            0x08, // flags, 0b00001000
            0x1b, 0xad, 0xc9, 0xee, // message ID
            0x00, 0x00, 0x00, 0x1c, // length
            0x00, 0x00, 0x00, 0x04, // Security Association (generic payload) header
        ];
        let packet = IKEv2::try_parse(buff.as_slice()).unwrap();
        assert_eq!(packet.initiator_spi, 1337133713371337);
        assert_eq!(packet.responder_spi, 0);
        assert_eq!(packet.message_id, 0x1badc9ee);
        assert_eq!(packet.exchange_type, ExchangeType::IkeSaInit);
        assert!(!packet.response);
        assert!(packet.initiator);
        assert_eq!(packet.payloads.len(), 1);
        assert_eq!(
            packet.payloads[0],
            Payload::SecurityAssociation(SecurityAssociation { proposals: vec![] })
        );
    }
}
