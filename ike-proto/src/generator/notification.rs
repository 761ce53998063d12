use crate::definitions::header::NotifyHeader;
use crate::definitions::params::PayloadType;
use crate::definitions::{GenericPayloadHeader, Notification, NotificationType};
use zerocopy::network_endian::U16;
use zerocopy::AsBytes;

impl Notification {
    /// Convert a [Notification] payload into a network-level vector of bytes
    pub fn build(&self, next_payload: PayloadType) -> Vec<u8> {
        let notification_type = match self.variant {
            NotificationType::Error(e) => e as u16,
            NotificationType::Status(s) => s as u16,
        };

        let spi_len = self.spi.as_ref().map(|s| s.len()).unwrap_or(0) as u8;
        let generic_header = GenericPayloadHeader {
            next_payload: next_payload as u8,
            flags: 0,
            payload_length: U16::from(8 + spi_len as u16 + self.data.len() as u16),
        };
        let notify_header = NotifyHeader {
            protocol_id: if self.spi.is_none() {
                0
            } else {
                self.protocol as u8
            },
            spi_size: spi_len,
            notify_message_type: U16::from(notification_type),
        };

        let mut packet = Vec::with_capacity(self.data.len() + 8);
        packet.extend_from_slice(generic_header.as_bytes());
        packet.extend_from_slice(notify_header.as_bytes());
        if let Some(data) = &self.spi {
            packet.extend_from_slice(data);
        }
        packet.extend(self.data.clone());
        packet
    }
}

#[cfg(test)]
mod tests {
    use crate::definitions::params::{
        NotifyErrorMessage, NotifyStatusMessage, PayloadType, SecurityProtocol,
    };
    use crate::definitions::{Notification, NotificationType};

    #[test]
    fn with_spi() {
        let spi = vec![0x00, 0x01, 0x02, 0x03];
        let notify = Notification {
            variant: NotificationType::Error(NotifyErrorMessage::InvalidSpi),
            data: vec![0x13, 0x37],
            protocol: SecurityProtocol::EncapsulatingSecurityPayload,
            spi: Some(spi),
        };
        assert_eq!(
            notify.build(PayloadType::NoNextPayload),
            vec![
                0x00, 0x00, 0x00, 0x0e, // Generic Payload Header
                0x03, 0x04, 0x00, 0x0b, // Notification header
                0x00, 0x01, 0x02, 0x03, // SPI
                0x13, 0x37, // Data
            ]
        );
    }

    #[test]
    fn status_without_spi() {
        let notify = Notification {
            variant: NotificationType::Status(NotifyStatusMessage::InitialContact),
            data: vec![],
            protocol: SecurityProtocol::Reserved,
            spi: None,
        };
        assert_eq!(
            notify.build(PayloadType::Notify),
            vec![0x29, 0x00, 0x00, 0x08, 0x00, 0x00, 0x40, 0x00]
        );
    }
}
