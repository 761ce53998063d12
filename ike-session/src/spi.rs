//! SPI Registry (C7): allocates local SPIs that are never zero and never
//! collide with a value currently reserved for the same peer address.

use rand::RngCore;
use std::collections::HashSet;
use std::net::SocketAddr;

/// Tracks locally-allocated SPIs per peer address, for both IKE SAs (8-byte
/// SPIs) and Child SAs (4-byte SPIs carried as `u32`).
#[derive(Debug, Default)]
pub struct SpiRegistry {
    ike: HashSet<(SocketAddr, u64)>,
    child: HashSet<(SocketAddr, u32)>,
}

impl SpiRegistry {
    /// Constructs an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new IKE SA SPI for `peer`. Never returns zero and never
    /// returns a value currently reserved for this peer.
    pub fn allocate_ike_spi(&mut self, peer: SocketAddr, rng: &mut dyn RngCore) -> u64 {
        loop {
            let candidate = rng.next_u64();
            if candidate != 0 && self.ike.insert((peer, candidate)) {
                return candidate;
            }
        }
    }

    /// Allocates a new Child SA SPI for `peer`.
    pub fn allocate_child_spi(&mut self, peer: SocketAddr, rng: &mut dyn RngCore) -> u32 {
        loop {
            let candidate = rng.next_u32();
            if candidate != 0 && self.child.insert((peer, candidate)) {
                return candidate;
            }
        }
    }

    /// Releases a previously allocated IKE SA SPI, e.g. after the SA is
    /// deleted or a rekey loses the collision tie-break.
    pub fn release_ike_spi(&mut self, peer: SocketAddr, spi: u64) {
        self.ike.remove(&(peer, spi));
    }

    /// Releases a previously allocated Child SA SPI.
    pub fn release_child_spi(&mut self, peer: SocketAddr, spi: u32) {
        self.child.remove(&(peer, spi));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::ThreadRng;

    fn rng() -> ThreadRng {
        rand::rng()
    }

    #[test]
    fn never_allocates_zero() {
        let mut registry = SpiRegistry::new();
        let peer: SocketAddr = "127.0.0.1:500".parse().unwrap();
        for _ in 0..64 {
            assert_ne!(registry.allocate_ike_spi(peer, &mut rng()), 0);
        }
    }

    #[test]
    fn release_allows_reallocation_without_panic() {
        let mut registry = SpiRegistry::new();
        let peer: SocketAddr = "127.0.0.1:500".parse().unwrap();
        let spi = registry.allocate_ike_spi(peer, &mut rng());
        registry.release_ike_spi(peer, spi);
        let _ = registry.allocate_ike_spi(peer, &mut rng());
    }
}
