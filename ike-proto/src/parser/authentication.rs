use crate::definitions::header::AuthenticationHeader;
use crate::definitions::params::AuthenticationMethod;
use crate::definitions::Authentication;
use crate::parser::ParserError;
use zerocopy::FromBytes;

impl Authentication {
    /// Parses a buffer into an [Authentication]. The buffer must not contain the
    /// generic payload header.
    pub(crate) fn try_parse(buf: &[u8]) -> Result<Self, ParserError> {
        let header =
            AuthenticationHeader::ref_from_prefix(buf).ok_or(ParserError::BufferTooSmall)?;
        let method = AuthenticationMethod::try_from(header.auth_method)?;
        let data = buf[size_of::<AuthenticationHeader>()..].to_vec();
        Ok(Self { method, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::unwrap_used)]
    fn shared_key() {
        let mut buf = vec![0x02, 0x00, 0x00, 0x00];
        buf.extend_from_slice(&[0xaa; 20]);
        let parsed = Authentication::try_parse(&buf).unwrap();
        assert_eq!(parsed.method, AuthenticationMethod::SharedKeyMessageIntegrityCode);
        assert_eq!(parsed.data, vec![0xaa; 20]);
    }
}
