use crate::definitions::header::DeleteHeader;
use crate::definitions::params::SecurityProtocol;
use crate::definitions::Delete;
use crate::parser::ParserError;
use zerocopy::FromBytes;

impl Delete {
    /// Parses a buffer into a [Delete]. The buffer must not contain the
    /// generic payload header.
    pub(crate) fn try_parse(buf: &[u8]) -> Result<Self, ParserError> {
        let header = DeleteHeader::ref_from_prefix(buf).ok_or(ParserError::BufferTooSmall)?;
        let protocol = SecurityProtocol::try_from(header.protocol_id)?;
        let spi_size = header.spi_size as usize;
        let num_spis = header.num_of_spis.get() as usize;

        let mut body = &buf[size_of::<DeleteHeader>()..];
        if body.len() < spi_size * num_spis {
            return Err(ParserError::BufferTooSmall);
        }

        let mut spis = Vec::with_capacity(num_spis);
        for _ in 0..num_spis {
            spis.push(body[..spi_size].to_vec());
            body = &body[spi_size..];
        }

        Ok(Self {
            protocol,
            spi_size: header.spi_size,
            spis,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::unwrap_used)]
    fn ike_sa_delete() {
        let buf = vec![0x01, 0x00, 0x00, 0x00];
        let parsed = Delete::try_parse(&buf).unwrap();
        assert_eq!(parsed.protocol, SecurityProtocol::InternetKeyExchange);
        assert_eq!(parsed.spis, Vec::<Vec<u8>>::new());
    }
}
