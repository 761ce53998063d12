use crate::definitions::header::{ConfigAttributeHeader, ConfigurationHeader};
use crate::definitions::params::{ConfigAttributeType, ConfigType};
use crate::definitions::{ConfigAttribute, Configuration};
use crate::parser::ParserError;
use zerocopy::FromBytes;

impl ConfigAttribute {
    fn try_parse(buf: &[u8]) -> Result<(Self, usize), ParserError> {
        let header = ConfigAttributeHeader::ref_from_prefix(buf)
            .ok_or(ParserError::BufferTooSmall)?;
        let attribute_type = ConfigAttributeType::try_from(u16::from(header.attribute_type))?;
        let length = header.length.get() as usize;
        let total = size_of::<ConfigAttributeHeader>() + length;
        if total > buf.len() {
            return Err(ParserError::BufferTooSmall);
        }
        let value = buf[size_of::<ConfigAttributeHeader>()..total].to_vec();
        Ok((
            Self {
                attribute_type,
                value,
            },
            total,
        ))
    }
}

impl Configuration {
    /// Parses a buffer into a [Configuration]. The buffer must not contain the
    /// generic payload header.
    pub(crate) fn try_parse(buf: &[u8]) -> Result<Self, ParserError> {
        let header =
            ConfigurationHeader::ref_from_prefix(buf).ok_or(ParserError::BufferTooSmall)?;
        let cfg_type = ConfigType::try_from(header.cfg_type)?;

        let mut body = &buf[size_of::<ConfigurationHeader>()..];
        let mut attributes = vec![];
        while !body.is_empty() {
            let (attribute, consumed) = ConfigAttribute::try_parse(body)?;
            attributes.push(attribute);
            body = &body[consumed..];
        }

        Ok(Self {
            cfg_type,
            attributes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::unwrap_used)]
    fn request_with_one_attribute() {
        let buf = vec![
            0x01, 0x00, 0x00, 0x00, // configuration header
            0x00, 0x01, 0x00, 0x00, // attribute header, InternalIp4Address, len 0
        ];
        let parsed = Configuration::try_parse(&buf).unwrap();
        assert_eq!(parsed.cfg_type, ConfigType::Request);
        assert_eq!(parsed.attributes.len(), 1);
        assert_eq!(
            parsed.attributes[0].attribute_type,
            ConfigAttributeType::InternalIp4Address
        );
    }
}
