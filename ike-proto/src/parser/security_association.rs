use crate::definitions::header::ProposalHeader;
use crate::definitions::{Proposal, SecurityAssociation};
use crate::parser::ParserError;
use zerocopy::FromBytes;

impl SecurityAssociation {
    /// Parses a buffer into a [SecurityAssociation]. The buffer must not contain the
    /// generic payload header, it should only contain the list of proposals. The buffer
    /// length is not checked, but will yield an error if too small. Larger buffers
    /// than necessary are ignored.
    pub(crate) fn try_parse(buf: &[u8]) -> Result<Self, ParserError> {
        let mut proposals = vec![];
        let mut remaining = buf;
        let mut expected_num = 1u8;

        while !remaining.is_empty() {
            let header =
                ProposalHeader::ref_from_prefix(remaining).ok_or(ParserError::BufferTooSmall)?;
            let proposal_len = header.proposal_length.get() as usize;
            if proposal_len < size_of::<ProposalHeader>() || proposal_len > remaining.len() {
                return Err(ParserError::InvalidSyntax);
            }

            if expected_num == 1 && header.proposal_num != 1 {
                return Err(ParserError::InvalidProposalNumberingStart);
            }
            if header.proposal_num != expected_num {
                return Err(ParserError::InvalidProposalNumbering);
            }

            proposals.push(Proposal::try_parse(header, remaining)?);

            let last = header.last_substruct == 0;
            remaining = &remaining[proposal_len..];
            expected_num += 1;
            if last {
                break;
            }
        }

        Ok(Self { proposals })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::unwrap_used)]
    fn empty_buffer() {
        assert_eq!(
            SecurityAssociation::try_parse(&[]).unwrap().proposals,
            vec![]
        );
    }
}
