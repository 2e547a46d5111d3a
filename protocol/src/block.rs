//! # Blocks
//!
//! The unit of the tangle: a vertex that approves up to eight earlier
//! blocks and optionally carries one payload.
//!
//! ```text
//! protocolVersion  u8
//! parentCount      u8          1..=8
//! parents          [32] each   strictly ascending by raw bytes
//! payload          envelope    transaction, milestone, tagged data, or none
//! nonce            u64         proof-of-work nonce
//! ```
//!
//! The decoder reproduces whatever parent list the wire carries. The encoder
//! only writes the canonical form: sorted, unique, one to eight parents.
//! Treasury transactions never appear directly in a block: they travel
//! inside milestone receipts.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, trace};

use crate::config::{
    DEFAULT_PROTOCOL_VERSION, MAX_NUMBER_PARENTS, MIN_BLOCK_LENGTH,
    TREASURY_TRANSACTION_PAYLOAD_TYPE,
};
use crate::error::{CodecError, CodecResult};
use crate::ids::BlockId;
use crate::payload::{decode_payload_admitting, encode_payload, Payload};
use crate::serde_helpers::u64_string;
use crate::stream::{ReadStream, WireCodec, WriteStream};

const PARENTS_PATH: &str = "block.parents";
const PAYLOAD_PATH: &str = "block.payload";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(default = "default_protocol_version")]
    pub protocol_version: u8,
    pub parents: Vec<BlockId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
    #[serde(with = "u64_string", default)]
    pub nonce: u64,
}

fn default_protocol_version() -> u8 {
    DEFAULT_PROTOCOL_VERSION
}

impl Block {
    /// A block at the default protocol version with a zero nonce.
    pub fn new(parents: Vec<BlockId>, payload: Option<Payload>) -> Self {
        Self {
            protocol_version: DEFAULT_PROTOCOL_VERSION,
            parents,
            payload,
            nonce: 0,
        }
    }

    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    /// Checks the parent list rules the encoder enforces.
    ///
    /// Order of checks: empty, too many, duplicates, then ordering. A list
    /// that is both unsorted and has duplicates reports the duplicate.
    pub fn validate_parents(&self) -> CodecResult<()> {
        let parents = &self.parents;
        if parents.is_empty() {
            return Err(CodecError::MissingParents {
                path: PARENTS_PATH.to_string(),
            });
        }
        if parents.len() > MAX_NUMBER_PARENTS {
            return Err(CodecError::TooManyParents {
                path: PARENTS_PATH.to_string(),
                max: MAX_NUMBER_PARENTS,
                actual: parents.len(),
            });
        }

        let mut seen = HashSet::with_capacity(parents.len());
        if let Some(index) = parents.iter().position(|p| !seen.insert(p)) {
            return Err(CodecError::DuplicateParents {
                path: PARENTS_PATH.to_string(),
                index,
            });
        }
        if let Some(index) = (1..parents.len()).find(|&i| parents[i] <= parents[i - 1]) {
            return Err(CodecError::UnsortedParents {
                path: PARENTS_PATH.to_string(),
                index,
            });
        }
        Ok(())
    }
}

impl WireCodec for Block {
    const PATH: &'static str = "block";

    /// Decodes a block that must span the rest of the stream.
    fn decode(stream: &mut ReadStream<'_>) -> CodecResult<Self> {
        stream.ensure_remaining(Self::PATH, MIN_BLOCK_LENGTH)?;

        let protocol_version = stream.read_u8("block.protocolVersion")?;
        let parent_count = stream.read_u8("block.parentCount")? as usize;
        let parents = (0..parent_count)
            .map(|i| {
                stream
                    .read_array(&format!("block.parentBlockId{i}"))
                    .map(BlockId::new)
            })
            .collect::<CodecResult<Vec<_>>>()?;

        let payload = decode_payload_admitting(stream, PAYLOAD_PATH, |path, kind| {
            if kind == TREASURY_TRANSACTION_PAYLOAD_TYPE {
                debug!(path, kind, "treasury transaction directly in block");
                Err(CodecError::ForbiddenPayloadType {
                    path: path.to_string(),
                    actual: kind,
                })
            } else {
                Ok(())
            }
        })?;

        let nonce = stream.read_u64("block.nonce")?;
        stream.ensure_consumed(Self::PATH)?;

        trace!(
            protocol_version,
            parents = parents.len(),
            payload = payload.as_ref().map_or("none", Payload::name),
            "decoded block"
        );
        Ok(Self {
            protocol_version,
            parents,
            payload,
            nonce,
        })
    }

    fn encode(&self, stream: &mut WriteStream) -> CodecResult<()> {
        stream.write_u8(self.protocol_version);
        self.validate_parents()?;
        stream.write_count_u8(PARENTS_PATH, self.parents.len())?;
        for parent in &self.parents {
            stream.write_bytes(parent.as_bytes());
        }

        if let Some(payload @ Payload::TreasuryTransaction(_)) = &self.payload {
            return Err(CodecError::ForbiddenPayloadType {
                path: PAYLOAD_PATH.to_string(),
                actual: payload.kind(),
            });
        }
        encode_payload(stream, PAYLOAD_PATH, self.payload.as_ref())?;

        stream.write_u64(self.nonce);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::MilestoneId;
    use crate::input::TreasuryInput;
    use crate::output::TreasuryOutput;
    use crate::payload::{TaggedDataPayload, TreasuryTransactionPayload};

    fn parent(byte: u8) -> BlockId {
        BlockId::new([byte; 32])
    }

    #[test]
    fn minimal_block_layout() {
        let block = Block::new(vec![parent(1)], None).with_nonce(0x0102);
        let bytes = block.to_bytes().unwrap();
        assert_eq!(bytes.len(), MIN_BLOCK_LENGTH);
        assert_eq!(bytes[0], DEFAULT_PROTOCOL_VERSION);
        assert_eq!(bytes[1], 1);
        assert_eq!(&bytes[34..38], &[0, 0, 0, 0]);
        assert_eq!(&bytes[38..], &[0x02, 0x01, 0, 0, 0, 0, 0, 0]);
        assert_eq!(Block::from_bytes(&bytes).unwrap(), block);
    }

    #[test]
    fn tagged_data_block_round_trips() {
        let payload = Payload::from(TaggedDataPayload::new(b"hello".to_vec(), b"world".to_vec()));
        let block = Block::new(vec![parent(1), parent(2), parent(3)], Some(payload)).with_nonce(7);
        let bytes = block.to_bytes().unwrap();
        assert_eq!(Block::from_bytes(&bytes).unwrap(), block);
    }

    #[test]
    fn unsorted_parents_are_rejected() {
        let block = Block::new(vec![parent(2), parent(1)], None);
        assert_eq!(
            block.to_bytes().unwrap_err(),
            CodecError::UnsortedParents {
                path: "block.parents".to_string(),
                index: 1,
            }
        );
    }

    #[test]
    fn duplicate_parents_are_rejected() {
        let block = Block::new(vec![parent(1), parent(1)], None);
        assert_eq!(
            block.to_bytes().unwrap_err(),
            CodecError::DuplicateParents {
                path: "block.parents".to_string(),
                index: 1,
            }
        );
    }

    #[test]
    fn duplicates_win_over_ordering() {
        let block = Block::new(vec![parent(3), parent(1), parent(3)], None);
        assert!(matches!(
            block.to_bytes(),
            Err(CodecError::DuplicateParents { index: 2, .. })
        ));
    }

    #[test]
    fn too_many_parents_are_rejected() {
        let parents = (1..=9).map(parent).collect();
        assert_eq!(
            Block::new(parents, None).to_bytes().unwrap_err(),
            CodecError::TooManyParents {
                path: "block.parents".to_string(),
                max: 8,
                actual: 9,
            }
        );
    }

    #[test]
    fn eight_parents_are_accepted() {
        let block = Block::new((1..=8).map(parent).collect(), None);
        let bytes = block.to_bytes().unwrap();
        assert_eq!(Block::from_bytes(&bytes).unwrap(), block);
    }

    #[test]
    fn empty_parents_are_rejected() {
        assert_eq!(
            Block::new(vec![], None).to_bytes().unwrap_err(),
            CodecError::MissingParents {
                path: "block.parents".to_string(),
            }
        );
    }

    #[test]
    fn decode_keeps_wire_parent_order() {
        let mut bytes = vec![2, 2];
        bytes.extend_from_slice(&[9; 32]);
        bytes.extend_from_slice(&[1; 32]);
        bytes.extend_from_slice(&[0; 4 + 8]);
        let block = Block::from_bytes(&bytes).unwrap();
        assert_eq!(block.parents, vec![parent(9), parent(1)]);
    }

    #[test]
    fn treasury_payload_is_forbidden_both_ways() {
        let treasury = Payload::from(TreasuryTransactionPayload {
            input: TreasuryInput {
                milestone_id: MilestoneId::new([5; 32]),
            },
            output: TreasuryOutput { amount: 1 },
        });
        let block = Block::new(vec![parent(1)], Some(treasury.clone()));
        assert_eq!(
            block.to_bytes().unwrap_err(),
            CodecError::ForbiddenPayloadType {
                path: "block.payload".to_string(),
                actual: 4,
            }
        );

        let mut writer = WriteStream::new();
        writer.write_u8(2);
        writer.write_u8(1);
        writer.write_bytes(&[1; 32]);
        encode_payload(&mut writer, "block.payload", Some(&treasury)).unwrap();
        writer.write_u64(0);
        let bytes = writer.finish();
        assert!(matches!(
            Block::from_bytes(&bytes),
            Err(CodecError::ForbiddenPayloadType { actual: 4, .. })
        ));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = Block::new(vec![parent(1)], None).to_bytes().unwrap();
        bytes.push(0);
        assert_eq!(
            Block::from_bytes(&bytes).unwrap_err(),
            CodecError::TrailingData {
                path: "block".to_string(),
                unused: 1,
            }
        );
    }

    #[test]
    fn short_buffer_is_truncated() {
        let bytes = [2u8; MIN_BLOCK_LENGTH - 1];
        assert_eq!(
            Block::from_bytes(&bytes).unwrap_err(),
            CodecError::TruncatedInput {
                path: "block".to_string(),
                required: MIN_BLOCK_LENGTH,
                remaining: MIN_BLOCK_LENGTH - 1,
            }
        );
    }

    #[test]
    fn parent_truncation_names_the_parent() {
        let mut bytes = vec![2, 3];
        bytes.extend_from_slice(&[0; 50]);
        let err = Block::from_bytes(&bytes).unwrap_err();
        assert_eq!(err.path(), "block.parentBlockId1");
    }

    #[test]
    fn json_defaults_and_string_nonce() {
        let json = serde_json::json!({
            "parents": [parent(1).to_hex()],
        });
        let block: Block = serde_json::from_value(json).unwrap();
        assert_eq!(block.protocol_version, DEFAULT_PROTOCOL_VERSION);
        assert_eq!(block.nonce, 0);

        let rendered = serde_json::to_value(block.with_nonce(u64::MAX)).unwrap();
        assert_eq!(rendered["nonce"], "18446744073709551615");
        assert!(rendered.get("payload").is_none());
    }
}
