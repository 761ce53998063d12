use crate::definitions::header::{TrafficSelectorEntryHeader, TrafficSelectorPayloadHeader};
use crate::definitions::params::TrafficSelectorType;
use crate::definitions::{TrafficSelector, TrafficSelectors};
use crate::parser::ParserError;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use zerocopy::FromBytes;

impl TrafficSelector {
    fn try_parse(buf: &[u8]) -> Result<(Self, usize), ParserError> {
        let header = TrafficSelectorEntryHeader::ref_from_prefix(buf)
            .ok_or(ParserError::BufferTooSmall)?;
        let ts_type = TrafficSelectorType::try_from(header.ts_type)?;
        let entry_len = header.selector_length.get() as usize;
        let addr_len = match ts_type {
            TrafficSelectorType::Ipv4AddrRange => 4,
            TrafficSelectorType::Ipv6AddrRange => 16,
        };
        if entry_len != size_of::<TrafficSelectorEntryHeader>() + 2 * addr_len
            || entry_len > buf.len()
        {
            return Err(ParserError::InvalidSyntax);
        }

        let addrs = &buf[size_of::<TrafficSelectorEntryHeader>()..entry_len];
        let (start_address, end_address) = match ts_type {
            TrafficSelectorType::Ipv4AddrRange => {
                let mut start = [0u8; 4];
                let mut end = [0u8; 4];
                start.copy_from_slice(&addrs[0..4]);
                end.copy_from_slice(&addrs[4..8]);
                (
                    IpAddr::V4(Ipv4Addr::from(start)),
                    IpAddr::V4(Ipv4Addr::from(end)),
                )
            }
            TrafficSelectorType::Ipv6AddrRange => {
                let mut start = [0u8; 16];
                let mut end = [0u8; 16];
                start.copy_from_slice(&addrs[0..16]);
                end.copy_from_slice(&addrs[16..32]);
                (
                    IpAddr::V6(Ipv6Addr::from(start)),
                    IpAddr::V6(Ipv6Addr::from(end)),
                )
            }
        };

        Ok((
            Self {
                ts_type,
                ip_protocol_id: header.ip_protocol_id,
                start_port: header.start_port.get(),
                end_port: header.end_port.get(),
                start_address,
                end_address,
            },
            entry_len,
        ))
    }
}

impl TrafficSelectors {
    /// Parses a buffer into a [TrafficSelectors]. The buffer must not contain the
    /// generic payload header.
    pub(crate) fn try_parse(buf: &[u8]) -> Result<Self, ParserError> {
        let header = TrafficSelectorPayloadHeader::ref_from_prefix(buf)
            .ok_or(ParserError::BufferTooSmall)?;
        let mut body = &buf[size_of::<TrafficSelectorPayloadHeader>()..];
        let mut selectors = Vec::with_capacity(header.num_ts as usize);
        for _ in 0..header.num_ts {
            let (ts, consumed) = TrafficSelector::try_parse(body)?;
            selectors.push(ts);
            body = &body[consumed..];
        }
        Ok(Self { selectors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::unwrap_used)]
    fn single_ipv4() {
        let buf = vec![
            0x01, 0x00, 0x00, 0x00, // payload header, 1 selector
            0x07, 0x00, 0x00, 0x10, 0x00, 0x00, 0xff, 0xff, // entry header
            10, 0, 0, 0, 10, 0, 0, 255, // addresses
        ];
        let parsed = TrafficSelectors::try_parse(&buf).unwrap();
        assert_eq!(parsed.selectors.len(), 1);
        assert_eq!(
            parsed.selectors[0].start_address,
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 0))
        );
        assert_eq!(
            parsed.selectors[0].end_address,
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 255))
        );
    }
}
