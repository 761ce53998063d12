use crate::definitions::header::{AttributeHeader, ProposalHeader, TransformHeader};
use crate::definitions::params::{
    AttributeType, EncryptionAlgorithm, IntegrityAlgorithm, KeyExchangeMethod,
    PseudorandomFunction, SecurityProtocol, SequenceNumbers, TransformType,
};
use crate::definitions::Proposal;
use crate::parser::ParserError;
use zerocopy::FromBytes;

impl Proposal {
    pub(crate) fn try_parse(header: &ProposalHeader, buf: &[u8]) -> Result<Self, ParserError> {
        let header_len = size_of::<ProposalHeader>();
        let spi_len = header.spi_size as usize;
        let body_len = header.proposal_length.get() as usize - header_len - spi_len;
        let spi = Vec::from(&buf[header_len..header_len + spi_len]);
        let protocol = SecurityProtocol::try_from(header.protocol_id)?;

        let mut body = &buf[header_len + spi_len..header_len + spi_len + body_len];
        let mut encryption_algorithms = vec![];
        let mut pseudo_random_functions = vec![];
        let mut integrity_algorithms = vec![];
        let mut key_exchange_methods = vec![];
        let mut sequence_numbers = vec![];

        loop {
            let transform_header =
                TransformHeader::ref_from_prefix(body).ok_or(ParserError::BufferTooSmall)?;
            let transform_len = transform_header.transform_length.get() as usize;
            if transform_len < size_of::<TransformHeader>() || transform_len > body.len() {
                return Err(ParserError::InvalidSyntax);
            }
            let transform_id = transform_header.transform_id.get();
            let t_type = TransformType::try_from(transform_header.transform_type)?;
            let attributes_buf = &body[size_of::<TransformHeader>()..transform_len];

            match t_type {
                TransformType::EncryptionAlgorithm => {
                    let algorithm = EncryptionAlgorithm::try_from(transform_id)?;
                    let key_length = parse_key_length(attributes_buf)?;
                    encryption_algorithms.push((algorithm, key_length));
                }
                TransformType::PseudoRandomFunction => {
                    pseudo_random_functions.push(PseudorandomFunction::try_from(transform_id)?);
                }
                TransformType::IntegrityAlgorithm => {
                    integrity_algorithms.push(IntegrityAlgorithm::try_from(transform_id)?);
                }
                TransformType::KeyExchangeMethod => {
                    key_exchange_methods.push(KeyExchangeMethod::try_from(transform_id)?);
                }
                TransformType::SequenceNumber => {
                    sequence_numbers.push(SequenceNumbers::try_from(transform_id)?);
                }
            }

            let last = transform_header.last_substruct == 0;
            body = &body[transform_len..];
            if last || body.is_empty() {
                break;
            }
        }

        Ok(Self {
            protocol,
            spi,
            encryption_algorithms,
            pseudo_random_functions,
            integrity_algorithms,
            key_exchange_methods,
            sequence_numbers,
        })
    }
}

/// Parses the (at most one) Key Length attribute out of a Transform's attribute list
fn parse_key_length(buf: &[u8]) -> Result<Option<u16>, ParserError> {
    if buf.is_empty() {
        return Ok(None);
    }
    let header = AttributeHeader::ref_from_prefix(buf).ok_or(ParserError::BufferTooSmall)?;
    if !header.is_fixed_length() {
        return Err(ParserError::UnsupportedAttribute);
    }
    let attribute_type = u16::from(header.attribute_type) & !0x8000;
    if attribute_type != AttributeType::KeyLength as u16 {
        return Err(ParserError::UnsupportedAttribute);
    }
    Ok(Some(header.attribute_value.get()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::header::ProposalHeader;
    use zerocopy::network_endian::U16;
    use zerocopy::AsBytes;

    #[test]
    #[allow(clippy::unwrap_used)]
    fn single_transform() {
        let header = ProposalHeader {
            last_substruct: 0,
            reserved: 0,
            proposal_length: U16::from(8 + 8),
            proposal_num: 1,
            protocol_id: SecurityProtocol::InternetKeyExchange as u8,
            spi_size: 0,
            num_transforms: 1,
        };
        let mut buf = header.as_bytes().to_vec();
        buf.extend_from_slice(&[
            0x00, 0x00, 0x00, 0x08, 0x04, 0x00, 0x00, 0x1f, // KE transform, Curve25519
        ]);
        let parsed = Proposal::try_parse(&header, &buf).unwrap();
        assert_eq!(
            parsed.key_exchange_methods,
            vec![KeyExchangeMethod::Curve25519]
        );
    }
}
