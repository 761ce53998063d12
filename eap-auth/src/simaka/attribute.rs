//! EAP-SIM/AKA/AKA' attribute TLV codec, RFC 4186 section 8 / RFC 4187
//! section 9: every attribute is `type(1) | length(1, in 4-octet units) |
//! value(4*length - 2)`.

use crate::error::EapError;
use zerocopy::network_endian::U16;
use zerocopy::{AsBytes, FromBytes, FromZeroes, Unaligned};

/// Fixed two-octet header shared by every SIM/AKA attribute.
#[derive(Debug, FromBytes, FromZeroes, AsBytes, Unaligned, Copy, Clone)]
#[repr(C, packed)]
pub struct AttributeHeader {
    /// Raw attribute type octet.
    pub attribute_type: u8,
    /// Total attribute length in units of 4 octets, including this header.
    pub length_words: u8,
}

/// A decoded SIM/AKA attribute type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum AttributeType {
    Rand = 1,
    Autn = 2,
    Res = 3,
    Auts = 4,
    Padding = 6,
    Nonce = 7,
    PermanentIdReq = 10,
    Mac = 11,
    Notification = 12,
    AnyIdReq = 13,
    IdentityAttr = 14,
    VersionList = 15,
    SelectedVersion = 16,
    FullauthIdReq = 17,
    CounterAttr = 19,
    CounterTooSmall = 20,
    NonceS = 21,
    ClientErrorCode = 22,
    EncrData = 129,
    Iv = 130,
    NextPseudonym = 132,
    NextReauthId = 133,
}

impl AttributeType {
    /// Whether an implementation unfamiliar with this type may skip it
    /// silently, per RFC 4186 section 8.1 (type value >= 128 is skippable).
    pub fn is_skippable(raw: u8) -> bool {
        raw >= 128
    }

    fn from_raw(raw: u8) -> Option<Self> {
        Some(match raw {
            1 => Self::Rand,
            2 => Self::Autn,
            3 => Self::Res,
            4 => Self::Auts,
            6 => Self::Padding,
            7 => Self::Nonce,
            10 => Self::PermanentIdReq,
            11 => Self::Mac,
            12 => Self::Notification,
            13 => Self::AnyIdReq,
            14 => Self::IdentityAttr,
            15 => Self::VersionList,
            16 => Self::SelectedVersion,
            17 => Self::FullauthIdReq,
            19 => Self::CounterAttr,
            20 => Self::CounterTooSmall,
            21 => Self::NonceS,
            22 => Self::ClientErrorCode,
            129 => Self::EncrData,
            130 => Self::Iv,
            132 => Self::NextPseudonym,
            133 => Self::NextReauthId,
            _ => return None,
        })
    }
}

/// One decoded attribute: a known, structurally-validated variant, or an
/// opaque blob for an unrecognised skippable type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    /// 2-3 distinct 16-byte RAND challenges (SIM) or a single one (AKA).
    Rand(Vec<[u8; 16]>),
    /// 16-byte authentication token (AKA/AKA').
    Autn([u8; 16]),
    /// Variable-length authentication response.
    Res(Vec<u8>),
    /// 14-byte resynchronization token.
    Auts([u8; 14]),
    /// Padding bytes, which must all be zero.
    Padding(Vec<u8>),
    /// 16-byte NONCE_MT (SIM) or reauth nonce.
    Nonce([u8; 16]),
    /// Requests the permanent identity.
    PermanentIdReq,
    /// Message authentication code, 16 bytes.
    Mac([u8; 16]),
    /// Notification code plus Success/Phase bits.
    Notification {
        /// Raw 16-bit notification code.
        code: u16,
    },
    /// Requests any identity.
    AnyIdReq,
    /// Peer identity, opaque bytes.
    Identity(Vec<u8>),
    /// List of supported EAP-SIM versions, each a big-endian u16.
    VersionList(Vec<u16>),
    /// The version selected by the peer.
    SelectedVersion(u16),
    /// Requests a full-authentication identity.
    FullauthIdReq,
    /// Replay counter.
    Counter(u16),
    /// Asserts the received counter was too small.
    CounterTooSmall,
    /// Server nonce used for fast re-authentication.
    NonceS([u8; 16]),
    /// Client error code.
    ClientErrorCode(u16),
    /// Encrypted data blob (fast re-authentication).
    EncrData(Vec<u8>),
    /// Initialization vector for AT_ENCR_DATA.
    Iv([u8; 16]),
    /// Opaque unknown skippable attribute, kept verbatim for forwarding.
    Unknown {
        /// Raw attribute type octet.
        raw_type: u8,
        /// Value bytes, excluding the 2-octet header.
        value: Vec<u8>,
    },
}

impl Attribute {
    /// Encodes this attribute back to wire bytes, padding the value to a
    /// multiple of 4 octets as RFC 4186 section 8.1 requires.
    pub fn build(&self) -> Vec<u8> {
        let (raw_type, mut value) = match self {
            Attribute::Rand(rands) => {
                let mut v = vec![0u8, 0u8];
                for r in rands {
                    v.extend_from_slice(r);
                }
                (AttributeType::Rand as u8, v)
            }
            Attribute::Autn(v) => (AttributeType::Autn as u8, v.to_vec()),
            Attribute::Res(bits) => {
                let mut v = U16::new((bits.len() * 8) as u16).as_bytes().to_vec();
                v.extend_from_slice(bits);
                (AttributeType::Res as u8, v)
            }
            Attribute::Auts(v) => (AttributeType::Auts as u8, v.to_vec()),
            Attribute::Padding(v) => (AttributeType::Padding as u8, v.clone()),
            Attribute::Nonce(v) => {
                let mut out = vec![0u8; 2];
                out.extend_from_slice(v);
                (AttributeType::Nonce as u8, out)
            }
            Attribute::PermanentIdReq => (AttributeType::PermanentIdReq as u8, vec![0u8; 2]),
            Attribute::Mac(v) => {
                let mut out = vec![0u8; 2];
                out.extend_from_slice(v);
                (AttributeType::Mac as u8, out)
            }
            Attribute::Notification { code } => {
                (AttributeType::Notification as u8, U16::new(*code).as_bytes().to_vec())
            }
            Attribute::AnyIdReq => (AttributeType::AnyIdReq as u8, vec![0u8; 2]),
            Attribute::Identity(bytes) => {
                let mut v = U16::new(bytes.len() as u16).as_bytes().to_vec();
                v.extend_from_slice(bytes);
                (AttributeType::IdentityAttr as u8, v)
            }
            Attribute::VersionList(versions) => {
                let mut v = U16::new((versions.len() * 2) as u16).as_bytes().to_vec();
                for version in versions {
                    v.extend_from_slice(U16::new(*version).as_bytes());
                }
                (AttributeType::VersionList as u8, v)
            }
            Attribute::SelectedVersion(version) => (
                AttributeType::SelectedVersion as u8,
                U16::new(*version).as_bytes().to_vec(),
            ),
            Attribute::FullauthIdReq => (AttributeType::FullauthIdReq as u8, vec![0u8; 2]),
            Attribute::Counter(c) => (AttributeType::CounterAttr as u8, U16::new(*c).as_bytes().to_vec()),
            Attribute::CounterTooSmall => (AttributeType::CounterTooSmall as u8, vec![0u8; 2]),
            Attribute::NonceS(v) => {
                let mut out = vec![0u8; 2];
                out.extend_from_slice(v);
                (AttributeType::NonceS as u8, out)
            }
            Attribute::ClientErrorCode(c) => (
                AttributeType::ClientErrorCode as u8,
                U16::new(*c).as_bytes().to_vec(),
            ),
            Attribute::EncrData(bytes) => (AttributeType::EncrData as u8, bytes.clone()),
            Attribute::Iv(v) => {
                let mut out = vec![0u8; 2];
                out.extend_from_slice(v);
                (AttributeType::Iv as u8, out)
            }
            Attribute::Unknown { raw_type, value } => (*raw_type, value.clone()),
        };
        while (value.len() + 2) % 4 != 0 {
            value.push(0);
        }
        let length_words = ((value.len() + 2) / 4) as u8;
        let mut out = AttributeHeader {
            attribute_type: raw_type,
            length_words,
        }
        .as_bytes()
        .to_vec();
        out.extend_from_slice(&value);
        out
    }

    /// Parses one attribute from the front of `buf`, returning it and the
    /// number of bytes consumed.
    ///
    /// Validates the invariants carried by each known attribute type: a
    /// positive length that is a multiple of 4 octets; AT_RAND carrying 2-3
    /// distinct 16-byte RANDs; AT_PADDING bytes that are all zero;
    /// AT_VERSION_LIST's inner length being even. Unknown skippable (type
    /// value >= 128) attributes are kept as opaque blobs; unknown
    /// non-skippable attributes are rejected.
    pub fn parse(buf: &[u8]) -> Result<(Self, usize), EapError> {
        let header = AttributeHeader::ref_from_prefix(buf)
            .ok_or(EapError::Malformed("attribute buffer too small"))?;
        if header.length_words == 0 {
            return Err(EapError::Malformed("attribute length is zero"));
        }
        let total_len = header.length_words as usize * 4;
        if total_len > buf.len() {
            return Err(EapError::Malformed("attribute length exceeds buffer"));
        }
        let value = &buf[2..total_len];
        let raw_type = header.attribute_type;

        let attribute = match AttributeType::from_raw(raw_type) {
            Some(AttributeType::Rand) => {
                let rands = &value[2..];
                if rands.len() % 16 != 0 || !(2..=3).contains(&(rands.len() / 16)) {
                    return Err(EapError::Malformed("AT_RAND must carry 2-3 RANDs"));
                }
                let rand_list: Vec<[u8; 16]> = rands
                    .chunks_exact(16)
                    .map(|c| c.try_into().expect("chunk is exactly 16 bytes"))
                    .collect();
                let mut distinct = rand_list.clone();
                distinct.sort();
                distinct.dedup();
                if distinct.len() != rand_list.len() {
                    return Err(EapError::Malformed("AT_RAND values must be distinct"));
                }
                Attribute::Rand(rand_list)
            }
            Some(AttributeType::Autn) => {
                let bytes: [u8; 16] = value[2..]
                    .try_into()
                    .map_err(|_| EapError::Malformed("AT_AUTN must be 16 bytes"))?;
                Attribute::Autn(bytes)
            }
            Some(AttributeType::Res) => {
                if value.len() < 2 {
                    return Err(EapError::Malformed("AT_RES truncated"));
                }
                let bit_len = u16::from_be_bytes([value[0], value[1]]) as usize;
                if bit_len == 0 || bit_len % 8 != 0 || bit_len / 8 > value.len() - 2 {
                    return Err(EapError::Malformed("AT_RES length field inconsistent"));
                }
                Attribute::Res(value[2..2 + bit_len / 8].to_vec())
            }
            Some(AttributeType::Auts) => {
                let bytes: [u8; 14] = value
                    .try_into()
                    .map_err(|_| EapError::Malformed("AT_AUTS must be 14 bytes"))?;
                Attribute::Auts(bytes)
            }
            Some(AttributeType::Padding) => {
                if !value.iter().all(|b| *b == 0) {
                    return Err(EapError::Malformed("AT_PADDING must be all zero"));
                }
                Attribute::Padding(value.to_vec())
            }
            Some(AttributeType::Nonce) => {
                let bytes: [u8; 16] = value[2..]
                    .try_into()
                    .map_err(|_| EapError::Malformed("AT_NONCE_MT must be 16 bytes"))?;
                Attribute::Nonce(bytes)
            }
            Some(AttributeType::PermanentIdReq) => Attribute::PermanentIdReq,
            Some(AttributeType::Mac) => {
                let bytes: [u8; 16] = value[2..]
                    .try_into()
                    .map_err(|_| EapError::Malformed("AT_MAC must be 16 bytes"))?;
                Attribute::Mac(bytes)
            }
            Some(AttributeType::Notification) => {
                if value.len() < 2 {
                    return Err(EapError::Malformed("AT_NOTIFICATION truncated"));
                }
                let code = u16::from_be_bytes([value[0], value[1]]);
                let success_bit = code & 0x8000 == 0;
                let phase_bit = code & 0x4000 != 0;
                if success_bit && phase_bit {
                    return Err(EapError::Malformed(
                        "AT_NOTIFICATION cannot be both Success and pre-challenge",
                    ));
                }
                Attribute::Notification { code }
            }
            Some(AttributeType::AnyIdReq) => Attribute::AnyIdReq,
            Some(AttributeType::IdentityAttr) => {
                if value.len() < 2 {
                    return Err(EapError::Malformed("AT_IDENTITY truncated"));
                }
                let actual_len = u16::from_be_bytes([value[0], value[1]]) as usize;
                if actual_len > value.len() - 2 {
                    return Err(EapError::Malformed("AT_IDENTITY length field inconsistent"));
                }
                Attribute::Identity(value[2..2 + actual_len].to_vec())
            }
            Some(AttributeType::VersionList) => {
                if value.len() < 2 {
                    return Err(EapError::Malformed("AT_VERSION_LIST truncated"));
                }
                let inner_len = u16::from_be_bytes([value[0], value[1]]) as usize;
                if inner_len % 2 != 0 || inner_len > value.len() - 2 {
                    return Err(EapError::Malformed(
                        "AT_VERSION_LIST inner length must be even and in bounds",
                    ));
                }
                let versions = value[2..2 + inner_len]
                    .chunks_exact(2)
                    .map(|c| u16::from_be_bytes([c[0], c[1]]))
                    .collect();
                Attribute::VersionList(versions)
            }
            Some(AttributeType::SelectedVersion) => {
                let bytes: [u8; 2] = value
                    .try_into()
                    .map_err(|_| EapError::Malformed("AT_SELECTED_VERSION must be 2 bytes"))?;
                Attribute::SelectedVersion(u16::from_be_bytes(bytes))
            }
            Some(AttributeType::FullauthIdReq) => Attribute::FullauthIdReq,
            Some(AttributeType::CounterAttr) => {
                let bytes: [u8; 2] = value
                    .try_into()
                    .map_err(|_| EapError::Malformed("AT_COUNTER must be 2 bytes"))?;
                Attribute::Counter(u16::from_be_bytes(bytes))
            }
            Some(AttributeType::CounterTooSmall) => Attribute::CounterTooSmall,
            Some(AttributeType::NonceS) => {
                let bytes: [u8; 16] = value[2..]
                    .try_into()
                    .map_err(|_| EapError::Malformed("AT_NONCE_S must be 16 bytes"))?;
                Attribute::NonceS(bytes)
            }
            Some(AttributeType::ClientErrorCode) => {
                let bytes: [u8; 2] = value
                    .try_into()
                    .map_err(|_| EapError::Malformed("AT_CLIENT_ERROR_CODE must be 2 bytes"))?;
                Attribute::ClientErrorCode(u16::from_be_bytes(bytes))
            }
            Some(AttributeType::EncrData) => Attribute::EncrData(value.to_vec()),
            Some(AttributeType::Iv) => {
                let bytes: [u8; 16] = value[2..]
                    .try_into()
                    .map_err(|_| EapError::Malformed("AT_IV must be 16 bytes"))?;
                Attribute::Iv(bytes)
            }
            Some(AttributeType::NextPseudonym) | Some(AttributeType::NextReauthId) => {
                Attribute::Unknown {
                    raw_type,
                    value: value.to_vec(),
                }
            }
            None => {
                if !AttributeType::is_skippable(raw_type) {
                    return Err(EapError::Malformed("unsupported non-skippable attribute"));
                }
                Attribute::Unknown {
                    raw_type,
                    value: value.to_vec(),
                }
            }
        };

        Ok((attribute, total_len))
    }

    /// Parses every attribute in `buf` in order.
    pub fn parse_all(mut buf: &[u8]) -> Result<Vec<Self>, EapError> {
        let mut out = Vec::new();
        while !buf.is_empty() {
            let (attribute, consumed) = Self::parse(buf)?;
            out.push(attribute);
            buf = &buf[consumed..];
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rand_roundtrip_two_values() {
        let rands = vec![[1u8; 16], [2u8; 16]];
        let attr = Attribute::Rand(rands.clone());
        let encoded = attr.build();
        let (decoded, consumed) = Attribute::parse(&encoded).unwrap();
        assert_eq!(consumed, encoded.len());
        assert_eq!(decoded, Attribute::Rand(rands));
    }

    #[test]
    fn rand_rejects_duplicate_values() {
        let mut buf = AttributeHeader {
            attribute_type: AttributeType::Rand as u8,
            length_words: 9,
        }
        .as_bytes()
        .to_vec();
        buf.extend_from_slice(&[0u8; 2]);
        buf.extend_from_slice(&[7u8; 16]);
        buf.extend_from_slice(&[7u8; 16]);
        assert!(Attribute::parse(&buf).is_err());
    }

    #[test]
    fn padding_rejects_nonzero_bytes() {
        let mut buf = AttributeHeader {
            attribute_type: AttributeType::Padding as u8,
            length_words: 2,
        }
        .as_bytes()
        .to_vec();
        buf.extend_from_slice(&[0x01, 0x02]);
        assert!(Attribute::parse(&buf).is_err());
    }

    #[test]
    fn version_list_roundtrip() {
        let attr = Attribute::VersionList(vec![1]);
        let encoded = attr.build();
        let (decoded, _) = Attribute::parse(&encoded).unwrap();
        assert_eq!(decoded, attr);
    }

    #[test]
    fn unknown_skippable_kept_opaque() {
        let mut buf = AttributeHeader {
            attribute_type: 200,
            length_words: 2,
        }
        .as_bytes()
        .to_vec();
        buf.extend_from_slice(&[0xaa, 0xbb]);
        let (decoded, consumed) = Attribute::parse(&buf).unwrap();
        assert_eq!(consumed, buf.len());
        match decoded {
            Attribute::Unknown { raw_type, value } => {
                assert_eq!(raw_type, 200);
                assert_eq!(value, vec![0xaa, 0xbb]);
            }
            _ => panic!("expected Unknown"),
        }
    }

    #[test]
    fn unknown_nonskippable_rejected() {
        let buf = AttributeHeader {
            attribute_type: 5,
            length_words: 1,
        }
        .as_bytes()
        .to_vec();
        assert!(Attribute::parse(&buf).is_err());
    }

    #[test]
    fn notification_rejects_success_and_prechallenge_combo() {
        let mut buf = AttributeHeader {
            attribute_type: AttributeType::Notification as u8,
            length_words: 1,
        }
        .as_bytes()
        .to_vec();
        buf.extend_from_slice(&0x4000u16.to_be_bytes());
        assert!(Attribute::parse(&buf).is_err());
    }
}
