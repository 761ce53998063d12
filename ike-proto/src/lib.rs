//! # ike-proto
//!
//! Low level wire codec and crypto primitives for IKEv2 (RFC 7296).
//!
//! This crate knows nothing about sockets, timers, or session state; it only
//! turns bytes into typed messages (and back), and derives the key material
//! that protects them.

#![warn(missing_docs, clippy::unwrap_used, clippy::expect_used)]

pub mod crypto;
pub mod definitions;
pub mod generator;
pub mod parser;

pub use zerocopy;

/// Constant value for IKEv2 in ISAKMP packets, as <major>.<minor> in 4 bits each,
/// where the <major> is 2 and the <minor> is zero.
pub const IKE_2_VERSION_VALUE: u8 = 0b0010_0000;

#[cfg(test)]
mod tests;
