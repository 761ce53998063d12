use crate::definitions::header::{ConfigAttributeHeader, ConfigurationHeader};
use crate::definitions::params::PayloadType;
use crate::definitions::{ConfigAttribute, Configuration, GenericPayloadHeader};
use crate::generator::GeneratorError;
use zerocopy::network_endian::U16;
use zerocopy::AsBytes;

impl ConfigAttribute {
    fn build(&self) -> Vec<u8> {
        let header = ConfigAttributeHeader {
            attribute_type: U16::new(self.attribute_type as u16),
            length: U16::new(self.value.len() as u16),
        };
        let mut packet = Vec::with_capacity(4 + self.value.len());
        packet.extend_from_slice(header.as_bytes());
        packet.extend_from_slice(&self.value);
        packet
    }
}

impl Configuration {
    /// Convert a [Configuration] payload into a network-level vector of bytes
    pub fn try_build(&self, next_payload: PayloadType) -> Result<Vec<u8>, GeneratorError> {
        if self.attributes.len() > 255 {
            return Err(GeneratorError::TooManyTrafficSelectors);
        }

        let mut attributes = Vec::new();
        for attribute in &self.attributes {
            attributes.extend(attribute.build());
        }

        let generic_header = GenericPayloadHeader {
            next_payload: next_payload as u8,
            flags: 0,
            payload_length: U16::from(8 + attributes.len() as u16),
        };
        let cfg_header = ConfigurationHeader {
            cfg_type: self.cfg_type as u8,
            reserved: [0; 3],
        };

        let mut packet = Vec::with_capacity(8 + attributes.len());
        packet.extend_from_slice(generic_header.as_bytes());
        packet.extend_from_slice(cfg_header.as_bytes());
        packet.extend(attributes);
        Ok(packet)
    }
}

#[cfg(test)]
mod tests {
    use crate::definitions::params::{ConfigAttributeType, ConfigType, PayloadType};
    use crate::definitions::{ConfigAttribute, Configuration};

    #[test]
    #[allow(clippy::unwrap_used)]
    fn request_with_one_attribute() {
        let cfg = Configuration {
            cfg_type: ConfigType::Request,
            attributes: vec![ConfigAttribute {
                attribute_type: ConfigAttributeType::InternalIp4Address,
                value: vec![],
            }],
        };
        assert_eq!(
            cfg.try_build(PayloadType::NoNextPayload).unwrap(),
            vec![
                0x00, 0x00, 0x00, 0x0c, 0x01, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00
            ]
        );
    }
}
