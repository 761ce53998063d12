use crate::definitions::{Proposal, Transform};
use zerocopy::network_endian::U16;
use zerocopy::AsBytes;

impl Proposal {
    /// Flatten the grouped transform lists back into wire order: encryption, PRF,
    /// integrity, key exchange, then sequence numbers, matching RFC 7296's convention
    /// of listing Transform Type 1 before 2 before 3 and so on.
    fn transforms(&self) -> Vec<Transform> {
        let mut out = Vec::with_capacity(self.len());
        out.extend(
            self.encryption_algorithms
                .iter()
                .map(|(a, o)| Transform::Encryption(*a, *o)),
        );
        out.extend(
            self.pseudo_random_functions
                .iter()
                .copied()
                .map(Transform::PseudoRandomFunction),
        );
        out.extend(
            self.integrity_algorithms
                .iter()
                .copied()
                .map(Transform::Integrity),
        );
        out.extend(
            self.key_exchange_methods
                .iter()
                .copied()
                .map(Transform::KeyExchange),
        );
        out.extend(
            self.sequence_numbers
                .iter()
                .copied()
                .map(Transform::SequenceNumber),
        );
        out
    }

    /// Convert a [Proposal] into a network-level vector of bytes
    ///
    /// The argument `num` defines the number of the proposal in the list of
    /// proposals in a Security Association.
    ///
    /// The argument `last` defines if any proposal is following this proposal (false)
    /// or if this proposal is the last proposal in the Security Association payload (true).
    pub fn build(&self, num: u8, last: bool) -> Vec<u8> {
        let all_transforms = self.transforms();
        let mut transforms = Vec::with_capacity(12 * all_transforms.len());
        for (i, transform) in all_transforms.iter().enumerate() {
            transforms.extend(transform.build(i == all_transforms.len() - 1));
        }

        let packet_length = 8 + self.spi.len() as u16 + transforms.len() as u16;
        let mut packet = Vec::with_capacity(packet_length as usize);
        packet.push(if last { 0 } else { 2 });
        packet.push(0);
        packet.extend_from_slice(U16::from(packet_length).as_bytes());
        packet.push(num);
        packet.push(self.protocol as u8);
        packet.push(self.spi.len() as u8);
        packet.push(all_transforms.len() as u8);
        packet.extend(self.spi.clone());
        packet.extend(transforms);
        packet
    }
}

#[cfg(test)]
mod tests {
    use crate::definitions::params::{
        EncryptionAlgorithm, IntegrityAlgorithm, PseudorandomFunction,
    };
    use crate::definitions::params::{KeyExchangeMethod, SecurityProtocol};
    use crate::definitions::Proposal;

    fn empty_proposal(protocol: SecurityProtocol, spi: Vec<u8>) -> Proposal {
        Proposal {
            protocol,
            spi,
            encryption_algorithms: vec![],
            pseudo_random_functions: vec![],
            integrity_algorithms: vec![],
            key_exchange_methods: vec![],
            sequence_numbers: vec![],
        }
    }

    #[test]
    fn empty() {
        assert_eq!(
            empty_proposal(SecurityProtocol::InternetKeyExchange, vec![]).build(1, true),
            vec![0x00, 0x00, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00]
        );
        assert_eq!(
            empty_proposal(SecurityProtocol::AuthenticationHeader, vec![]).build(0x42, false),
            vec![0x02, 0x00, 0x00, 0x08, 0x42, 0x02, 0x00, 0x00]
        );
        assert_eq!(
            empty_proposal(SecurityProtocol::InternetKeyExchange, vec![0x13, 0x37]).build(1, true),
            vec![0x00, 0x00, 0x00, 0x0a, 0x01, 0x01, 0x02, 0x00, 0x13, 0x37]
        );
    }

    #[test]
    fn single() {
        let mut p = empty_proposal(SecurityProtocol::InternetKeyExchange, vec![]);
        p.key_exchange_methods.push(KeyExchangeMethod::Curve448);
        assert_eq!(
            p.build(1, true),
            vec![
                0x00, 0x00, 0x00, 0x10, 0x01, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x08, 0x04, 0x00,
                0x00, 0x20
            ]
        );
    }

    #[test]
    fn full() {
        let mut p = empty_proposal(SecurityProtocol::InternetKeyExchange, vec![]);
        p.encryption_algorithms
            .push((EncryptionAlgorithm::AesCbc, Some(256)));
        p.integrity_algorithms
            .push(IntegrityAlgorithm::HmacSha2_256_128);
        p.pseudo_random_functions
            .push(PseudorandomFunction::HmacSha2_256);
        p.key_exchange_methods.push(KeyExchangeMethod::Curve25519);
        assert_eq!(
            p.build(4, true),
            vec![
                0x00, 0x00, 0x00, 0x2c, 0x04, 0x01, 0x00, 0x04, 0x03, 0x00, 0x00, 0x0c, 0x01, 0x00,
                0x00, 0x0c, 0x80, 0x0e, 0x01, 0x00, 0x03, 0x00, 0x00, 0x08, 0x02, 0x00, 0x00, 0x05,
                0x03, 0x00, 0x00, 0x08, 0x03, 0x00, 0x00, 0x0c, 0x00, 0x00, 0x00, 0x08, 0x04, 0x00,
                0x00, 0x1f
            ]
        );
    }
}
