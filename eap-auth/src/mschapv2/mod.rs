//! EAP-MSCHAPv2 type-data framing (draft-kamath-pppext-eap-mschapv2), built
//! on the MSCHAPv2 cryptographic primitives in `ike_proto::crypto::mschap`.

pub mod message;

pub use message::{MsChapV2Header, MsChapV2Message, MsChapV2OpCode};
