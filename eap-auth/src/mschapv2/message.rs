//! EAP-MSCHAPv2 type-data framing, draft-kamath-pppext-eap-mschapv2 section
//! 2: 1-byte op-code, 1-byte identifier, 2-byte length, op-code specific body.

use crate::error::EapError;
use zerocopy::network_endian::U16;
use zerocopy::{AsBytes, FromBytes, FromZeroes, Unaligned};

/// MSCHAPv2 op-codes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum MsChapV2OpCode {
    Challenge = 1,
    Response = 2,
    Success = 3,
    Failure = 4,
}

impl TryFrom<u8> for MsChapV2OpCode {
    type Error = EapError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Challenge),
            2 => Ok(Self::Response),
            3 => Ok(Self::Success),
            4 => Ok(Self::Failure),
            _ => Err(EapError::Malformed("unknown MSCHAPv2 op-code")),
        }
    }
}

/// 4-byte fixed header shared by every MSCHAPv2 type-data body.
#[derive(Debug, FromBytes, FromZeroes, AsBytes, Unaligned, Copy, Clone)]
#[repr(C, packed)]
pub struct MsChapV2Header {
    /// [MsChapV2OpCode] as a raw octet.
    pub op_code: u8,
    /// Matches Challenge/Response to Success/Failure.
    pub identifier: u8,
    /// Total type-data length including this header, network byte order.
    pub length: U16,
}

/// A decoded MSCHAPv2 body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MsChapV2Message {
    /// Op-code 1: authenticator challenge plus the server's name.
    Challenge {
        /// Identifier echoed in the Response.
        identifier: u8,
        /// 16-byte authenticator challenge.
        challenge: [u8; 16],
        /// Server name, for display only.
        name: Vec<u8>,
    },
    /// Op-code 2: peer challenge, NT-response, and the peer's name.
    Response {
        /// Matches the Challenge's identifier.
        identifier: u8,
        /// 16-byte peer challenge.
        peer_challenge: [u8; 16],
        /// 24-byte NT-response.
        nt_response: [u8; 24],
        /// Peer (username) name.
        name: Vec<u8>,
    },
    /// Op-code 3: the `"S=<hex> M=<message>"`-style success message.
    Success {
        /// Matches the Response's identifier.
        identifier: u8,
        /// Raw message bytes following the op-code header.
        message: Vec<u8>,
    },
    /// Op-code 4: the `"E=... R=... C=... V=... M=..."`-style failure message.
    Failure {
        /// Matches the Response's identifier.
        identifier: u8,
        /// Raw message bytes following the op-code header.
        message: Vec<u8>,
    },
}

impl MsChapV2Message {
    /// Encodes this message's type-data body (following the EAP header and
    /// the MSCHAPv2 method type octet).
    pub fn build(&self) -> Vec<u8> {
        let (op_code, identifier, mut body) = match self {
            MsChapV2Message::Challenge {
                identifier,
                challenge,
                name,
            } => {
                let mut b = vec![16u8];
                b.extend_from_slice(challenge);
                b.extend_from_slice(name);
                (MsChapV2OpCode::Challenge, *identifier, b)
            }
            MsChapV2Message::Response {
                identifier,
                peer_challenge,
                nt_response,
                name,
            } => {
                let mut b = vec![49u8];
                b.extend_from_slice(peer_challenge);
                b.extend_from_slice(&[0u8; 8]);
                b.extend_from_slice(nt_response);
                b.push(0);
                b.extend_from_slice(name);
                (MsChapV2OpCode::Response, *identifier, b)
            }
            MsChapV2Message::Success { identifier, message } => {
                (MsChapV2OpCode::Success, *identifier, message.clone())
            }
            MsChapV2Message::Failure { identifier, message } => {
                (MsChapV2OpCode::Failure, *identifier, message.clone())
            }
        };
        let total_len = size_of::<MsChapV2Header>() + body.len();
        let header = MsChapV2Header {
            op_code: op_code as u8,
            identifier,
            length: U16::new(total_len as u16),
        };
        let mut out = header.as_bytes().to_vec();
        out.append(&mut body);
        out
    }

    /// Parses a MSCHAPv2 type-data body.
    pub fn try_parse(buf: &[u8]) -> Result<Self, EapError> {
        let header = MsChapV2Header::ref_from_prefix(buf)
            .ok_or(EapError::Malformed("MSCHAPv2 body too small"))?;
        let op_code = MsChapV2OpCode::try_from(header.op_code)?;
        let identifier = header.identifier;
        let declared_length = header.length.get() as usize;
        if declared_length > buf.len() || declared_length < size_of::<MsChapV2Header>() {
            return Err(EapError::Malformed("MSCHAPv2 length field inconsistent"));
        }
        let body = &buf[size_of::<MsChapV2Header>()..declared_length];

        match op_code {
            MsChapV2OpCode::Challenge => {
                if body.len() < 17 || body[0] != 16 {
                    return Err(EapError::Malformed(
                        "MSCHAPv2 Challenge value-size must be 16",
                    ));
                }
                let challenge: [u8; 16] = body[1..17]
                    .try_into()
                    .expect("validated 17 bytes available");
                Ok(Self::Challenge {
                    identifier,
                    challenge,
                    name: body[17..].to_vec(),
                })
            }
            MsChapV2OpCode::Response => {
                if body.len() < 50 || body[0] != 49 {
                    return Err(EapError::Malformed(
                        "MSCHAPv2 Response value-size must be 49",
                    ));
                }
                let peer_challenge: [u8; 16] =
                    body[1..17].try_into().expect("validated 50 bytes available");
                let nt_response: [u8; 24] = body[25..49]
                    .try_into()
                    .expect("validated 50 bytes available");
                let flags = body[49];
                if flags != 0 {
                    return Err(EapError::Malformed("MSCHAPv2 Response flags must be 0"));
                }
                Ok(Self::Response {
                    identifier,
                    peer_challenge,
                    nt_response,
                    name: body[50..].to_vec(),
                })
            }
            MsChapV2OpCode::Success => Ok(Self::Success {
                identifier,
                message: body.to_vec(),
            }),
            MsChapV2OpCode::Failure => Ok(Self::Failure {
                identifier,
                message: body.to_vec(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_response() {
        let msg = MsChapV2Message::Response {
            identifier: 2,
            peer_challenge: [0x21; 16],
            nt_response: [0xaa; 24],
            name: b"User".to_vec(),
        };
        let encoded = msg.build();
        let parsed = MsChapV2Message::try_parse(&encoded).unwrap();
        assert_eq!(msg, parsed);
    }

    #[test]
    fn roundtrip_challenge() {
        let msg = MsChapV2Message::Challenge {
            identifier: 1,
            challenge: [0x5b; 16],
            name: b"gateway".to_vec(),
        };
        let encoded = msg.build();
        let parsed = MsChapV2Message::try_parse(&encoded).unwrap();
        assert_eq!(msg, parsed);
    }

    #[test]
    fn response_rejects_nonzero_flags() {
        let mut msg_bytes = MsChapV2Message::Response {
            identifier: 2,
            peer_challenge: [0x21; 16],
            nt_response: [0xaa; 24],
            name: vec![],
        }
        .build();
        let last = msg_bytes.len() - 1;
        msg_bytes[last] = 1;
        assert!(MsChapV2Message::try_parse(&msg_bytes).is_err());
    }

    #[test]
    fn challenge_rejects_wrong_value_size() {
        let mut msg_bytes = MsChapV2Message::Challenge {
            identifier: 1,
            challenge: [0x5b; 16],
            name: vec![],
        }
        .build();
        msg_bytes[4] = 15;
        assert!(MsChapV2Message::try_parse(&msg_bytes).is_err());
    }
}
