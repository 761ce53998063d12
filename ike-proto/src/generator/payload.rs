use crate::definitions::params::PayloadType;
use crate::definitions::{GenericPayloadHeader, Payload};
use crate::generator::GeneratorError;
use zerocopy::network_endian::U16;
use zerocopy::AsBytes;

impl Payload {
    pub(crate) fn try_build(&self, next_payload: PayloadType) -> Result<Vec<u8>, GeneratorError> {
        if let Payload::Nonce(v) = self {
            if v.len() < 16 || v.len() > 256 {
                return Err(GeneratorError::InvalidNonceLength);
            }
        }
        match self {
            Payload::SecurityAssociation(v) => v.try_build(next_payload),
            Payload::KeyExchange(v) => Ok(v.build(next_payload)),
            Payload::IdentificationInitiator(v) | Payload::IdentificationResponder(v) => {
                Ok(v.build(next_payload))
            }
            Payload::Authentication(v) => Ok(v.build(next_payload)),
            Payload::Notify(v) => Ok(v.build(next_payload)),
            Payload::Delete(v) => v.try_build(next_payload),
            Payload::TrafficSelectorInitiator(v) | Payload::TrafficSelectorResponder(v) => {
                v.try_build(next_payload)
            }
            Payload::Configuration(v) => v.try_build(next_payload),
            Payload::Nonce(v)
            | Payload::VendorID(v)
            | Payload::EncryptedAndAuthenticated(v)
            | Payload::ExtensibleAuthentication(v) => Ok(self.build_generic(next_payload, v)),
        }
    }

    #[inline]
    fn build_generic(&self, next_payload: PayloadType, data: &[u8]) -> Vec<u8> {
        let header = GenericPayloadHeader {
            next_payload: next_payload as u8,
            flags: 0,
            payload_length: U16::from(data.len() as u16 + 4),
        };
        let mut packet = Vec::with_capacity(data.len() + 4);
        packet.extend_from_slice(header.as_bytes());
        packet.extend(data);
        packet
    }
}

#[cfg(test)]
mod tests {
    use crate::definitions::params::PayloadType;
    use crate::definitions::Payload;

    #[test]
    #[allow(clippy::unwrap_used)]
    fn nonce_too_short() {
        assert!(matches!(
            Payload::Nonce(vec![0x00; 4]).try_build(PayloadType::NoNextPayload),
            Err(crate::generator::GeneratorError::InvalidNonceLength)
        ));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn vendor_id() {
        assert_eq!(
            Payload::VendorID(vec![0x01, 0x02, 0x03])
                .try_build(PayloadType::NoNextPayload)
                .unwrap(),
            vec![0x00, 0x00, 0x00, 0x07, 0x01, 0x02, 0x03]
        );
    }
}
