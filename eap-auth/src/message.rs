//! EAP packet framing, RFC 3748 section 4.

use crate::error::EapError;
use zerocopy::byteorder::network_endian::U16;
use zerocopy::{AsBytes, FromBytes, FromZeroes, Unaligned};

/// EAP code, RFC 3748 section 4.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Copy, Clone)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum EapCode {
    Request = 1,
    Response = 2,
    Success = 3,
    Failure = 4,
}

impl TryFrom<u8> for EapCode {
    type Error = EapError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(EapCode::Request),
            2 => Ok(EapCode::Response),
            3 => Ok(EapCode::Success),
            4 => Ok(EapCode::Failure),
            _ => Err(EapError::Malformed("unknown EAP code")),
        }
    }
}

/// EAP method type octet, carried immediately after the header for
/// Request/Response packets.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Copy, Clone)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum EapMethodType {
    Identity = 1,
    Notification = 2,
    Nak = 3,
    Sim = 18,
    Aka = 23,
    MsChapV2 = 26,
    AkaPrime = 50,
}

impl TryFrom<u8> for EapMethodType {
    type Error = EapError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(EapMethodType::Identity),
            2 => Ok(EapMethodType::Notification),
            3 => Ok(EapMethodType::Nak),
            18 => Ok(EapMethodType::Sim),
            23 => Ok(EapMethodType::Aka),
            26 => Ok(EapMethodType::MsChapV2),
            50 => Ok(EapMethodType::AkaPrime),
            _ => Err(EapError::Malformed("unknown EAP method type")),
        }
    }
}

/// 4-byte fixed header shared by every EAP packet: code, identifier, length.
#[derive(Debug, FromBytes, FromZeroes, AsBytes, Unaligned, Copy, Clone)]
#[repr(C, packed)]
pub struct EapHeader {
    /// [EapCode] as a raw octet.
    pub code: u8,
    /// Matches requests to responses; echoed back unchanged.
    pub identifier: u8,
    /// Total packet length including this header, network byte order.
    pub length: U16,
}

/// A decoded EAP packet. For [EapCode::Success]/[EapCode::Failure] `method`
/// is always `None`, per RFC 3748 section 4: those codes carry no type or
/// type-data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EapMessage {
    /// Request, Response, Success, or Failure.
    pub code: EapCode,
    /// Echoed between request and response.
    pub identifier: u8,
    /// `(method type, type-data)`, present only for Request/Response.
    pub method: Option<(EapMethodType, Vec<u8>)>,
}

impl EapMessage {
    /// Encodes this message to wire bytes.
    pub fn build(&self) -> Vec<u8> {
        let body_len = match &self.method {
            Some((_, data)) => 1 + data.len(),
            None => 0,
        };
        let total_len = size_of::<EapHeader>() + body_len;
        let header = EapHeader {
            code: self.code as u8,
            identifier: self.identifier,
            length: U16::new(total_len as u16),
        };
        let mut out = header.as_bytes().to_vec();
        if let Some((method_type, data)) = &self.method {
            out.push(*method_type as u8);
            out.extend_from_slice(data);
        }
        out
    }

    /// Parses a buffer into an [EapMessage], validating the invariants of
    /// RFC 3748 section 4: header length at least 4; declared length at
    /// most the buffer length; declared length at least `4 + (type ? 1 : 0)`;
    /// and for Success/Failure the length must equal exactly 4.
    pub fn try_parse(buf: &[u8]) -> Result<Self, EapError> {
        let header =
            EapHeader::ref_from_prefix(buf).ok_or(EapError::Malformed("buffer too small"))?;
        let code = EapCode::try_from(header.code)?;
        let declared_length = header.length.get() as usize;
        if declared_length > buf.len() {
            return Err(EapError::Malformed("declared length exceeds buffer"));
        }
        if declared_length < size_of::<EapHeader>() {
            return Err(EapError::Malformed("declared length shorter than header"));
        }

        match code {
            EapCode::Success | EapCode::Failure => {
                if declared_length != size_of::<EapHeader>() {
                    return Err(EapError::Malformed(
                        "Success/Failure must carry no type-data",
                    ));
                }
                Ok(Self {
                    code,
                    identifier: header.identifier,
                    method: None,
                })
            }
            EapCode::Request | EapCode::Response => {
                if declared_length < size_of::<EapHeader>() + 1 {
                    return Err(EapError::Malformed("Request/Response missing type octet"));
                }
                let method_type = EapMethodType::try_from(buf[size_of::<EapHeader>()])?;
                let data = buf[size_of::<EapHeader>() + 1..declared_length].to_vec();
                Ok(Self {
                    code,
                    identifier: header.identifier,
                    method: Some((method_type, data)),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_request() {
        let msg = EapMessage {
            code: EapCode::Request,
            identifier: 7,
            method: Some((EapMethodType::Sim, vec![0x0a, 0x00, 0x00])),
        };
        let encoded = msg.build();
        let parsed = EapMessage::try_parse(&encoded).unwrap();
        assert_eq!(msg, parsed);
    }

    #[test]
    fn roundtrip_success() {
        let msg = EapMessage {
            code: EapCode::Success,
            identifier: 3,
            method: None,
        };
        let encoded = msg.build();
        assert_eq!(encoded, vec![0x03, 0x03, 0x00, 0x04]);
        let parsed = EapMessage::try_parse(&encoded).unwrap();
        assert_eq!(msg, parsed);
    }

    #[test]
    fn success_with_type_data_is_rejected() {
        let buf = vec![0x03, 0x03, 0x00, 0x05, 0xff];
        assert!(EapMessage::try_parse(&buf).is_err());
    }

    #[test]
    fn request_nak_lists_desired_methods() {
        let msg = EapMessage {
            code: EapCode::Response,
            identifier: 1,
            method: Some((EapMethodType::Nak, vec![EapMethodType::MsChapV2 as u8])),
        };
        let encoded = msg.build();
        assert_eq!(*encoded.last().unwrap(), 0x1a);
    }
}
