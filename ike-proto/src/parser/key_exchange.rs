use crate::definitions::header::KeyExchangeHeader;
use crate::definitions::params::KeyExchangeMethod;
use crate::definitions::KeyExchange;
use crate::parser::ParserError;
use zerocopy::FromBytes;

impl KeyExchange {
    /// Parses a buffer into a [KeyExchange]. The buffer must not contain the
    /// generic payload header.
    pub(crate) fn try_parse(buf: &[u8]) -> Result<Self, ParserError> {
        let header =
            KeyExchangeHeader::ref_from_prefix(buf).ok_or(ParserError::BufferTooSmall)?;
        let dh_group = KeyExchangeMethod::try_from(header.dh_group_num.get())?;
        let data = buf[size_of::<KeyExchangeHeader>()..].to_vec();
        Ok(Self { dh_group, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::unwrap_used)]
    fn roundtrip() {
        let buf = vec![0x00, 0x1f, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04];
        let parsed = KeyExchange::try_parse(&buf).unwrap();
        assert_eq!(parsed.dh_group, KeyExchangeMethod::Curve25519);
        assert_eq!(parsed.data, vec![0x01, 0x02, 0x03, 0x04]);
    }
}
