use crate::definitions::header::DeleteHeader;
use crate::definitions::params::PayloadType;
use crate::definitions::{Delete, GenericPayloadHeader};
use crate::generator::GeneratorError;
use zerocopy::network_endian::U16;
use zerocopy::AsBytes;

impl Delete {
    /// Convert a [Delete] payload into a network-level vector of bytes
    ///
    /// Fails if any SPI's length doesn't match `spi_size`, or if there are more than
    /// 65535 SPIs listed.
    pub fn try_build(&self, next_payload: PayloadType) -> Result<Vec<u8>, GeneratorError> {
        if self.spis.iter().any(|spi| spi.len() != self.spi_size as usize) {
            return Err(GeneratorError::InconsistentSpiSize);
        }
        if self.spis.len() > u16::MAX as usize {
            return Err(GeneratorError::TooManyTrafficSelectors);
        }

        let spi_bytes = self.spis.len() * self.spi_size as usize;
        let generic_header = GenericPayloadHeader {
            next_payload: next_payload as u8,
            flags: 0,
            payload_length: U16::from(8 + spi_bytes as u16),
        };
        let delete_header = DeleteHeader {
            protocol_id: self.protocol as u8,
            spi_size: self.spi_size,
            num_of_spis: U16::from(self.spis.len() as u16),
        };

        let mut packet = Vec::with_capacity(8 + spi_bytes);
        packet.extend_from_slice(generic_header.as_bytes());
        packet.extend_from_slice(delete_header.as_bytes());
        for spi in &self.spis {
            packet.extend_from_slice(spi);
        }
        Ok(packet)
    }
}

#[cfg(test)]
mod tests {
    use crate::definitions::params::{PayloadType, SecurityProtocol};
    use crate::definitions::Delete;

    #[test]
    #[allow(clippy::unwrap_used)]
    fn ike_sa_delete() {
        let delete = Delete {
            protocol: SecurityProtocol::InternetKeyExchange,
            spi_size: 0,
            spis: vec![],
        };
        assert_eq!(
            delete.try_build(PayloadType::NoNextPayload).unwrap(),
            vec![0x00, 0x00, 0x00, 0x08, 0x01, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn esp_sa_delete() {
        let delete = Delete {
            protocol: SecurityProtocol::EncapsulatingSecurityPayload,
            spi_size: 4,
            spis: vec![vec![0x00, 0x01, 0x02, 0x03], vec![0x04, 0x05, 0x06, 0x07]],
        };
        assert_eq!(
            delete.try_build(PayloadType::NoNextPayload).unwrap(),
            vec![
                0x00, 0x00, 0x00, 0x10, 0x03, 0x04, 0x00, 0x02, 0x00, 0x01, 0x02, 0x03, 0x04,
                0x05, 0x06, 0x07
            ]
        );
    }

    #[test]
    fn inconsistent_spi_size() {
        let delete = Delete {
            protocol: SecurityProtocol::EncapsulatingSecurityPayload,
            spi_size: 4,
            spis: vec![vec![0x00, 0x01]],
        };
        assert!(delete.try_build(PayloadType::NoNextPayload).is_err());
    }
}
