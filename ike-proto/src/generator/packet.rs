use crate::definitions::params::{
    EncryptionAlgorithm, IntegrityAlgorithm, PayloadType, FLAG_INITIATOR, FLAG_RESPONSE,
};
use crate::definitions::{Header, Payload, IKEv2};
use crate::generator::{GeneratorError, ESTIMATED_PAYLOAD_LENGTH};
use zerocopy::network_endian::{U32, U64};
use zerocopy::AsBytes;

impl IKEv2 {
    /// Convert a whole [IKEv2] message into a network-level vector of bytes
    pub fn try_build(&self) -> Result<Vec<u8>, GeneratorError> {
        if self.payloads.len() >= 255 {
            return Err(GeneratorError::TooManyPayloads);
        }
        let mut payloads = Vec::with_capacity(ESTIMATED_PAYLOAD_LENGTH * self.payloads.len());
        for (i, payload) in self.payloads.iter().enumerate() {
            payloads.extend(payload.try_build(match self.payloads.get(i + 1) {
                None => PayloadType::NoNextPayload,
                Some(next) => next.into(),
            })?);
        }

        let packet_length = 28 + payloads.len() as u32;
        let first_payload = match self.payloads.first() {
            None => PayloadType::NoNextPayload,
            Some(t) => t.into(),
        };
        let header = self.header(first_payload, packet_length);

        let mut packet = Vec::with_capacity(packet_length as usize);
        packet.extend_from_slice(header.as_bytes());
        packet.extend(payloads);
        Ok(packet)
    }

    /// Convert the payload chain into a single Encrypted Payload (RFC 7296
    /// section 3.14) and wrap it in the message header. Used for every
    /// exchange after IKE_SA_INIT, once an IKE SA's keys are available.
    pub fn try_build_encrypted(
        &self,
        encryption: EncryptionAlgorithm,
        integrity_alg: IntegrityAlgorithm,
        sk_e: &[u8],
        sk_a: &[u8],
    ) -> Result<Vec<u8>, GeneratorError> {
        if self.payloads.len() >= 255 {
            return Err(GeneratorError::TooManyPayloads);
        }
        let mut inner = Vec::with_capacity(ESTIMATED_PAYLOAD_LENGTH * self.payloads.len());
        for (i, payload) in self.payloads.iter().enumerate() {
            inner.extend(payload.try_build(match self.payloads.get(i + 1) {
                None => PayloadType::NoNextPayload,
                Some(next) => next.into(),
            })?);
        }
        let first_inner = match self.payloads.first() {
            None => PayloadType::NoNextPayload,
            Some(t) => t.into(),
        };

        // AAD is the fixed portion of the header preceding the Length field;
        // the Length field is excluded so that it does not have to be known
        // before the ciphertext (and therefore the final packet length) exists.
        let aad_header = self.header(PayloadType::EncryptedAndAuthenticated, 0);
        let aad = &aad_header.as_bytes()[..24];

        let sealed = crate::crypto::sk::seal(encryption, integrity_alg, sk_e, sk_a, aad, &inner)?;
        let sk_payload = Payload::EncryptedAndAuthenticated(sealed).try_build(first_inner)?;

        let packet_length = 28 + sk_payload.len() as u32;
        let header = self.header(PayloadType::EncryptedAndAuthenticated, packet_length);

        let mut packet = Vec::with_capacity(packet_length as usize);
        packet.extend_from_slice(header.as_bytes());
        packet.extend(sk_payload);
        Ok(packet)
    }

    fn header(&self, next_payload: PayloadType, length: u32) -> Header {
        Header {
            initiator_spi: U64::from(self.initiator_spi),
            responder_spi: U64::from(self.responder_spi),
            next_payload: next_payload as u8,
            version: crate::IKE_2_VERSION_VALUE,
            exchange_type: self.exchange_type as u8,
            flags: (if self.initiator { FLAG_INITIATOR } else { 0 })
                | (if self.response { FLAG_RESPONSE } else { 0 }),
            message_id: U32::from(self.message_id),
            length: U32::from(length),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::definitions::params::{EncryptionAlgorithm, ExchangeType, IntegrityAlgorithm};
    use crate::definitions::{Payload, IKEv2};

    #[test]
    #[allow(clippy::unwrap_used)]
    fn encrypted_roundtrips_through_parser() {
        let packet = IKEv2 {
            initiator_spi: 1,
            responder_spi: 2,
            exchange_type: ExchangeType::IkeAuth,
            initiator: true,
            response: false,
            message_id: 1,
            payloads: vec![Payload::Nonce(vec![0x42; 16])],
        };
        let sk_e = vec![0x11u8; 16];
        let sk_a = vec![0x22u8; 32];
        let built = packet
            .try_build_encrypted(
                EncryptionAlgorithm::AesCbc,
                IntegrityAlgorithm::HmacSha2_256_128,
                &sk_e,
                &sk_a,
            )
            .unwrap();
        let parsed = IKEv2::try_parse_encrypted(
            &built,
            EncryptionAlgorithm::AesCbc,
            IntegrityAlgorithm::HmacSha2_256_128,
            &sk_e,
            &sk_a,
        )
        .unwrap();
        assert_eq!(parsed.payloads, packet.payloads);
        assert_eq!(parsed.message_id, packet.message_id);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn empty() {
        assert_eq!(
            IKEv2 {
                initiator_spi: 1337133713371337,
                responder_spi: 301030307,
                exchange_type: ExchangeType::IkeSaInit,
                initiator: true,
                response: false,
                message_id: 999999999,
                payloads: vec![],
            }
            .try_build()
            .unwrap(),
            vec![
                0x00, 0x04, 0xc0, 0x1d, 0xb4, 0x00, 0xb0, 0xc9, // initiator
                0x00, 0x00, 0x00, 0x00, 0x11, 0xf1, 0x5b, 0xa3, // responder
                0x00, // next payload
                0x20, // version
                0x22, // exchange type
                0x08, // flags
                0x3b, 0x9a, 0xc9, 0xff, // message ID
                0x00, 0x00, 0x00, 0x1c // length
            ]
        )
    }
}
