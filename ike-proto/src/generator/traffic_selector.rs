use crate::definitions::header::{TrafficSelectorEntryHeader, TrafficSelectorPayloadHeader};
use crate::definitions::params::PayloadType;
use crate::definitions::{GenericPayloadHeader, TrafficSelector, TrafficSelectors};
use crate::generator::GeneratorError;
use std::net::IpAddr;
use zerocopy::network_endian::U16;
use zerocopy::AsBytes;

impl TrafficSelector {
    fn build(&self) -> Vec<u8> {
        let (start, end) = match (self.start_address, self.end_address) {
            (IpAddr::V4(s), IpAddr::V4(e)) => (s.octets().to_vec(), e.octets().to_vec()),
            (IpAddr::V6(s), IpAddr::V6(e)) => (s.octets().to_vec(), e.octets().to_vec()),
            _ => {
                // mismatched address families can't occur from a correctly-constructed
                // selector; fall back to whatever was provided rather than panicking
                (
                    match self.start_address {
                        IpAddr::V4(a) => a.octets().to_vec(),
                        IpAddr::V6(a) => a.octets().to_vec(),
                    },
                    match self.end_address {
                        IpAddr::V4(a) => a.octets().to_vec(),
                        IpAddr::V6(a) => a.octets().to_vec(),
                    },
                )
            }
        };

        let header = TrafficSelectorEntryHeader {
            ts_type: self.ts_type as u8,
            ip_protocol_id: self.ip_protocol_id,
            selector_length: U16::from(8 + start.len() as u16 + end.len() as u16),
            start_port: U16::from(self.start_port),
            end_port: U16::from(self.end_port),
        };

        let mut packet = Vec::with_capacity(8 + start.len() + end.len());
        packet.extend_from_slice(header.as_bytes());
        packet.extend(start);
        packet.extend(end);
        packet
    }
}

impl TrafficSelectors {
    /// Convert a [TrafficSelectors] payload into a network-level vector of bytes
    pub fn try_build(&self, next_payload: PayloadType) -> Result<Vec<u8>, GeneratorError> {
        if self.selectors.len() > 255 {
            return Err(GeneratorError::TooManyTrafficSelectors);
        }

        let mut entries = Vec::new();
        for selector in &self.selectors {
            entries.extend(selector.build());
        }

        let generic_header = GenericPayloadHeader {
            next_payload: next_payload as u8,
            flags: 0,
            payload_length: U16::from(8 + entries.len() as u16),
        };
        let ts_header = TrafficSelectorPayloadHeader {
            num_ts: self.selectors.len() as u8,
            reserved: [0; 3],
        };

        let mut packet = Vec::with_capacity(8 + entries.len());
        packet.extend_from_slice(generic_header.as_bytes());
        packet.extend_from_slice(ts_header.as_bytes());
        packet.extend(entries);
        Ok(packet)
    }
}

#[cfg(test)]
mod tests {
    use crate::definitions::params::{PayloadType, TrafficSelectorType};
    use crate::definitions::{TrafficSelector, TrafficSelectors};
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    #[allow(clippy::unwrap_used)]
    fn single_ipv4() {
        let ts = TrafficSelectors {
            selectors: vec![TrafficSelector {
                ts_type: TrafficSelectorType::Ipv4AddrRange,
                ip_protocol_id: 0,
                start_port: 0,
                end_port: 65535,
                start_address: IpAddr::V4(Ipv4Addr::new(10, 0, 0, 0)),
                end_address: IpAddr::V4(Ipv4Addr::new(10, 0, 0, 255)),
            }],
        };
        let built = ts.try_build(PayloadType::NoNextPayload).unwrap();
        assert_eq!(&built[0..4], &[0x00, 0x00, 0x00, 0x18]);
        assert_eq!(built[4], 1); // num_ts
        assert_eq!(&built[8..16], &[0x07, 0x00, 0x00, 0x10, 0x00, 0x00, 0xff, 0xff]);
        assert_eq!(&built[16..20], &[10, 0, 0, 0]);
        assert_eq!(&built[20..24], &[10, 0, 0, 255]);
    }
}
