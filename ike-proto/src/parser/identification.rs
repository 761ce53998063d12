use crate::definitions::header::IdentificationHeader;
use crate::definitions::params::IdentificationType;
use crate::definitions::Identification;
use crate::parser::ParserError;
use zerocopy::FromBytes;

impl Identification {
    /// Parses a buffer into an [Identification]. The buffer must not contain the
    /// generic payload header.
    pub(crate) fn try_parse(buf: &[u8]) -> Result<Self, ParserError> {
        let header =
            IdentificationHeader::ref_from_prefix(buf).ok_or(ParserError::BufferTooSmall)?;
        let id_type = IdentificationType::try_from(header.id_type)?;
        let data = buf[size_of::<IdentificationHeader>()..].to_vec();
        Ok(Self { id_type, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::unwrap_used)]
    fn fqdn() {
        let mut buf = vec![0x02, 0x00, 0x00, 0x00];
        buf.extend_from_slice(b"vpn.example.com");
        let parsed = Identification::try_parse(&buf).unwrap();
        assert_eq!(parsed.id_type, IdentificationType::Fqdn);
        assert_eq!(parsed.data, b"vpn.example.com");
    }
}
