use crate::definitions::header::IdentificationHeader;
use crate::definitions::params::PayloadType;
use crate::definitions::{GenericPayloadHeader, Identification};
use zerocopy::network_endian::U16;
use zerocopy::AsBytes;

impl Identification {
    /// Convert an [Identification] payload into a network-level vector of bytes
    pub fn build(&self, next_payload: PayloadType) -> Vec<u8> {
        let generic_header = GenericPayloadHeader {
            next_payload: next_payload as u8,
            flags: 0,
            payload_length: U16::from(8 + self.data.len() as u16),
        };
        let id_header = IdentificationHeader {
            id_type: self.id_type as u8,
            reserved: [0; 3],
        };

        let mut packet = Vec::with_capacity(8 + self.data.len());
        packet.extend_from_slice(generic_header.as_bytes());
        packet.extend_from_slice(id_header.as_bytes());
        packet.extend_from_slice(&self.data);
        packet
    }
}

#[cfg(test)]
mod tests {
    use crate::definitions::params::{IdentificationType, PayloadType};
    use crate::definitions::Identification;

    #[test]
    fn fqdn() {
        let id = Identification {
            id_type: IdentificationType::Fqdn,
            data: b"vpn.example.com".to_vec(),
        };
        let built = id.build(PayloadType::NoNextPayload);
        assert_eq!(&built[0..4], &[0x00, 0x00, 0x00, 0x17]);
        assert_eq!(&built[4..8], &[0x02, 0x00, 0x00, 0x00]);
        assert_eq!(&built[8..], b"vpn.example.com");
    }
}
