//! Subtype + attribute-list container shared by EAP-SIM, EAP-AKA, and
//! EAP-AKA' type-data, RFC 4186 section 8.1 / RFC 4187 section 9.1.

use super::attribute::Attribute;
use crate::error::EapError;

/// EAP-SIM/AKA/AKA' subtypes. The numeric space is shared across all three
/// methods; only a subset is meaningful for any one of them.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum SimAkaSubtype {
    Start = 10,
    Challenge = 11,
    Notification = 12,
    Reauthentication = 13,
    ClientError = 14,
}

impl TryFrom<u8> for SimAkaSubtype {
    type Error = EapError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(Self::Start),
            11 => Ok(Self::Challenge),
            12 => Ok(Self::Notification),
            13 => Ok(Self::Reauthentication),
            14 => Ok(Self::ClientError),
            _ => Err(EapError::Malformed("unknown SIM/AKA subtype")),
        }
    }
}

/// A decoded EAP-SIM/AKA/AKA' type-data body: subtype, reserved field,
/// followed by a list of attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimAkaMessage {
    /// Which exchange step this packet represents.
    pub subtype: SimAkaSubtype,
    /// The decoded attribute list, in wire order.
    pub attributes: Vec<Attribute>,
}

impl SimAkaMessage {
    /// Encodes this message's body (excluding the EAP header and method
    /// type octet, which the caller supplies via [crate::message::EapMessage]).
    pub fn build(&self) -> Vec<u8> {
        let mut out = vec![self.subtype as u8, 0, 0];
        for attribute in &self.attributes {
            out.extend_from_slice(&attribute.build());
        }
        out
    }

    /// Parses a SIM/AKA type-data body.
    pub fn try_parse(buf: &[u8]) -> Result<Self, EapError> {
        if buf.len() < 3 {
            return Err(EapError::Malformed("SIM/AKA body too short"));
        }
        let subtype = SimAkaSubtype::try_from(buf[0])?;
        let attributes = Attribute::parse_all(&buf[3..])?;
        Ok(Self {
            subtype,
            attributes,
        })
    }

    /// Finds the first attribute matching `pred`, if any.
    pub fn find<'a>(&'a self, pred: impl Fn(&Attribute) -> bool) -> Option<&'a Attribute> {
        self.attributes.iter().find(|a| pred(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_start_with_version_list() {
        let msg = SimAkaMessage {
            subtype: SimAkaSubtype::Start,
            attributes: vec![
                Attribute::VersionList(vec![1]),
                Attribute::AnyIdReq,
            ],
        };
        let encoded = msg.build();
        let parsed = SimAkaMessage::try_parse(&encoded).unwrap();
        assert_eq!(msg, parsed);
    }

    #[test]
    fn rejects_truncated_body() {
        assert!(SimAkaMessage::try_parse(&[10, 0]).is_err());
    }
}
