//! Shared codec and crypto plumbing for EAP-SIM (RFC 4186), EAP-AKA (RFC
//! 4187), and EAP-AKA' (RFC 5448): attribute TLVs, the subtype/attribute-list
//! container, key derivation, and AT_MAC.

pub mod attribute;
pub mod keys;
pub mod mac;
pub mod message;

pub use attribute::{Attribute, AttributeType};
pub use keys::SimAkaKeys;
pub use message::{SimAkaMessage, SimAkaSubtype};
