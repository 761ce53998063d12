use crate::definitions::header::AuthenticationHeader;
use crate::definitions::params::PayloadType;
use crate::definitions::{Authentication, GenericPayloadHeader};
use zerocopy::network_endian::U16;
use zerocopy::AsBytes;

impl Authentication {
    /// Convert an [Authentication] payload into a network-level vector of bytes
    pub fn build(&self, next_payload: PayloadType) -> Vec<u8> {
        let generic_header = GenericPayloadHeader {
            next_payload: next_payload as u8,
            flags: 0,
            payload_length: U16::from(8 + self.data.len() as u16),
        };
        let auth_header = AuthenticationHeader {
            auth_method: self.method as u8,
            reserved: [0; 3],
        };

        let mut packet = Vec::with_capacity(8 + self.data.len());
        packet.extend_from_slice(generic_header.as_bytes());
        packet.extend_from_slice(auth_header.as_bytes());
        packet.extend_from_slice(&self.data);
        packet
    }
}

#[cfg(test)]
mod tests {
    use crate::definitions::params::{AuthenticationMethod, PayloadType};
    use crate::definitions::Authentication;

    #[test]
    fn shared_key() {
        let auth = Authentication {
            method: AuthenticationMethod::SharedKeyMessageIntegrityCode,
            data: vec![0xaa; 20],
        };
        let built = auth.build(PayloadType::NoNextPayload);
        assert_eq!(&built[0..4], &[0x00, 0x00, 0x00, 0x1c]);
        assert_eq!(built[4], AuthenticationMethod::SharedKeyMessageIntegrityCode as u8);
        assert_eq!(&built[8..], &[0xaa; 20][..]);
    }
}
