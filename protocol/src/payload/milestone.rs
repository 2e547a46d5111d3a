//! # Milestone Payload
//!
//! Issued by the coordinator to confirm a cone of blocks.
//!
//! ```text
//! type                 u32   = 7
//! index                u32
//! timestamp            u32
//! protocolVersion      u8
//! previousMilestoneId  [32]
//! parents              u8 count + [32] each
//! inclusionMerkleRoot  [32]
//! appliedMerkleRoot    [32]
//! metadata             u16 length + bytes
//! options              u8 count + options
//! signatures           u8 count + Ed25519 signatures
//! ```
//!
//! A receipt option embeds a treasury transaction in a payload envelope;
//! that is the only place a treasury transaction may appear.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::config::{
    MIN_MILESTONE_PAYLOAD_LENGTH, MILESTONE_PAYLOAD_TYPE, PROTOCOL_PARAMS_MILESTONE_OPTION_TYPE,
    RECEIPT_MILESTONE_OPTION_TYPE, TAIL_TRANSACTION_HASH_LENGTH, TREASURY_TRANSACTION_PAYLOAD_TYPE,
};
use crate::error::{CodecError, CodecResult};
use crate::ids::{BlockId, MilestoneId};
use crate::payload::{decode_payload_admitting, encode_envelope, Payload, TreasuryTransactionPayload};
use crate::serde_helpers::{hex_array, hex_bytes, u64_string};
use crate::signature::Ed25519Signature;
use crate::stream::{ReadStream, WireCodec, WriteStream};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestonePayload {
    pub index: u32,
    pub timestamp: u32,
    pub protocol_version: u8,
    pub previous_milestone_id: MilestoneId,
    pub parents: Vec<BlockId>,
    #[serde(with = "hex_array")]
    pub inclusion_merkle_root: [u8; 32],
    #[serde(with = "hex_array")]
    pub applied_merkle_root: [u8; 32],
    #[serde(with = "hex_bytes", default)]
    pub metadata: Vec<u8>,
    #[serde(default)]
    pub options: Vec<MilestoneOption>,
    pub signatures: Vec<Ed25519Signature>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MilestoneOption {
    Receipt(ReceiptMilestoneOption),
    ProtocolParams(ProtocolParamsMilestoneOption),
}

/// Funds migrated from the legacy network, and the treasury transaction
/// that pays for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptMilestoneOption {
    pub migrated_at: u32,
    /// Set on the last receipt for `migrated_at`.
    #[serde(rename = "final")]
    pub last: bool,
    pub funds: Vec<MigratedFundsEntry>,
    pub transaction: TreasuryTransactionPayload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigratedFundsEntry {
    #[serde(with = "hex_array")]
    pub tail_transaction_hash: [u8; TAIL_TRANSACTION_HASH_LENGTH],
    pub address: Address,
    #[serde(with = "u64_string")]
    pub deposit: u64,
}

/// Protocol parameters that take effect at a future milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolParamsMilestoneOption {
    pub target_milestone_index: u32,
    pub protocol_version: u8,
    #[serde(with = "hex_bytes", default)]
    pub params: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

impl MilestonePayload {
    pub(crate) fn decode_at(stream: &mut ReadStream<'_>, path: &str) -> CodecResult<Self> {
        stream.ensure_remaining(path, MIN_MILESTONE_PAYLOAD_LENGTH)?;

        let type_path = format!("{path}.type");
        let kind = stream.read_u32(&type_path)?;
        if kind != MILESTONE_PAYLOAD_TYPE {
            return Err(CodecError::TypeMismatch {
                path: type_path,
                expected: MILESTONE_PAYLOAD_TYPE,
                actual: kind,
            });
        }

        let index = stream.read_u32(&format!("{path}.index"))?;
        let timestamp = stream.read_u32(&format!("{path}.timestamp"))?;
        let protocol_version = stream.read_u8(&format!("{path}.protocolVersion"))?;
        let previous_milestone_id =
            MilestoneId::new(stream.read_array(&format!("{path}.previousMilestoneId"))?);

        let parent_count = stream.read_u8(&format!("{path}.parentCount"))? as usize;
        let parents = (0..parent_count)
            .map(|i| {
                stream
                    .read_array(&format!("{path}.parent{i}"))
                    .map(BlockId::new)
            })
            .collect::<CodecResult<Vec<_>>>()?;

        let inclusion_merkle_root = stream.read_array(&format!("{path}.inclusionMerkleRoot"))?;
        let applied_merkle_root = stream.read_array(&format!("{path}.appliedMerkleRoot"))?;
        let metadata =
            stream.read_u16_prefixed(&format!("{path}.metadataLength"), &format!("{path}.metadata"))?;

        let option_count = stream.read_u8(&format!("{path}.optionCount"))? as usize;
        let options = (0..option_count)
            .map(|i| MilestoneOption::decode_at(stream, &format!("{path}.option{i}")))
            .collect::<CodecResult<Vec<_>>>()?;

        let signature_count = stream.read_u8(&format!("{path}.signatureCount"))? as usize;
        let signatures = (0..signature_count)
            .map(|i| Ed25519Signature::decode_at(stream, &format!("{path}.signature{i}")))
            .collect::<CodecResult<Vec<_>>>()?;

        Ok(Self {
            index,
            timestamp,
            protocol_version,
            previous_milestone_id,
            parents,
            inclusion_merkle_root,
            applied_merkle_root,
            metadata,
            options,
            signatures,
        })
    }

    pub(crate) fn encode_at(&self, stream: &mut WriteStream, path: &str) -> CodecResult<()> {
        stream.write_u32(MILESTONE_PAYLOAD_TYPE);
        stream.write_u32(self.index);
        stream.write_u32(self.timestamp);
        stream.write_u8(self.protocol_version);
        stream.write_bytes(self.previous_milestone_id.as_bytes());

        stream.write_count_u8(&format!("{path}.parentCount"), self.parents.len())?;
        for parent in &self.parents {
            stream.write_bytes(parent.as_bytes());
        }

        stream.write_bytes(&self.inclusion_merkle_root);
        stream.write_bytes(&self.applied_merkle_root);
        stream.write_u16_prefixed(&format!("{path}.metadata"), &self.metadata)?;

        stream.write_count_u8(&format!("{path}.optionCount"), self.options.len())?;
        for (i, option) in self.options.iter().enumerate() {
            option.encode_at(stream, &format!("{path}.option{i}"))?;
        }

        stream.write_count_u8(&format!("{path}.signatureCount"), self.signatures.len())?;
        for signature in &self.signatures {
            signature.encode(stream)?;
        }
        Ok(())
    }
}

impl WireCodec for MilestonePayload {
    const PATH: &'static str = "milestone";

    fn decode(stream: &mut ReadStream<'_>) -> CodecResult<Self> {
        Self::decode_at(stream, Self::PATH)
    }

    fn encode(&self, stream: &mut WriteStream) -> CodecResult<()> {
        self.encode_at(stream, Self::PATH)
    }
}

impl MilestoneOption {
    pub fn kind(&self) -> u8 {
        match self {
            Self::Receipt(_) => RECEIPT_MILESTONE_OPTION_TYPE,
            Self::ProtocolParams(_) => PROTOCOL_PARAMS_MILESTONE_OPTION_TYPE,
        }
    }

    fn decode_at(stream: &mut ReadStream<'_>, path: &str) -> CodecResult<Self> {
        match stream.read_u8(path)? {
            RECEIPT_MILESTONE_OPTION_TYPE => {
                ReceiptMilestoneOption::decode_at(stream, path).map(Self::Receipt)
            }
            PROTOCOL_PARAMS_MILESTONE_OPTION_TYPE => Ok(Self::ProtocolParams(
                ProtocolParamsMilestoneOption {
                    target_milestone_index: stream
                        .read_u32(&format!("{path}.targetMilestoneIndex"))?,
                    protocol_version: stream.read_u8(&format!("{path}.protocolVersion"))?,
                    params: stream.read_u16_prefixed(
                        &format!("{path}.paramsLength"),
                        &format!("{path}.params"),
                    )?,
                },
            )),
            other => Err(CodecError::UnknownVariant {
                path: path.to_string(),
                kind: "milestone option",
                actual: other,
            }),
        }
    }

    fn encode_at(&self, stream: &mut WriteStream, path: &str) -> CodecResult<()> {
        stream.write_u8(self.kind());
        match self {
            Self::Receipt(receipt) => receipt.encode_at(stream, path),
            Self::ProtocolParams(params) => {
                stream.write_u32(params.target_milestone_index);
                stream.write_u8(params.protocol_version);
                stream.write_u16_prefixed(&format!("{path}.params"), &params.params)
            }
        }
    }
}

impl ReceiptMilestoneOption {
    fn decode_at(stream: &mut ReadStream<'_>, path: &str) -> CodecResult<Self> {
        let migrated_at = stream.read_u32(&format!("{path}.migratedAt"))?;
        let last = stream.read_bool(&format!("{path}.final"))?;

        let fund_count = stream.read_u16(&format!("{path}.fundsCount"))? as usize;
        let funds = (0..fund_count)
            .map(|i| {
                let entry_path = format!("{path}.funds{i}");
                Ok(MigratedFundsEntry {
                    tail_transaction_hash: stream.read_array(&entry_path)?,
                    address: Address::decode_at(stream, &entry_path)?,
                    deposit: stream.read_u64(&entry_path)?,
                })
            })
            .collect::<CodecResult<Vec<_>>>()?;

        let tx_path = format!("{path}.transaction");
        let payload = decode_payload_admitting(stream, &tx_path, |path, kind| {
            if kind == TREASURY_TRANSACTION_PAYLOAD_TYPE {
                Ok(())
            } else {
                Err(CodecError::ForbiddenEmbeddedPayload {
                    path: path.to_string(),
                    actual: kind,
                })
            }
        })?;
        let transaction = match payload {
            Some(Payload::TreasuryTransaction(tx)) => *tx,
            Some(other) => {
                return Err(CodecError::ForbiddenEmbeddedPayload {
                    path: tx_path,
                    actual: other.kind(),
                })
            }
            None => {
                return Err(CodecError::InvalidValue {
                    path: tx_path,
                    reason: "receipt requires a treasury transaction".to_string(),
                })
            }
        };

        Ok(Self {
            migrated_at,
            last,
            funds,
            transaction,
        })
    }

    fn encode_at(&self, stream: &mut WriteStream, path: &str) -> CodecResult<()> {
        stream.write_u32(self.migrated_at);
        stream.write_bool(self.last);
        stream.write_count_u16(&format!("{path}.fundsCount"), self.funds.len())?;
        for entry in &self.funds {
            stream.write_bytes(&entry.tail_transaction_hash);
            entry.address.encode(stream)?;
            stream.write_u64(entry.deposit);
        }

        let tx_path = format!("{path}.transaction");
        let tx_path = tx_path.as_str();
        let transaction = &self.transaction;
        encode_envelope(
            stream,
            tx_path,
            Some(move |s: &mut WriteStream| transaction.encode_at(s, tx_path)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIN_TREASURY_TRANSACTION_PAYLOAD_LENGTH;
    use crate::input::TreasuryInput;
    use crate::output::TreasuryOutput;

    fn treasury_tx() -> TreasuryTransactionPayload {
        TreasuryTransactionPayload {
            input: TreasuryInput {
                milestone_id: MilestoneId::new([0x10; 32]),
            },
            output: TreasuryOutput { amount: 500 },
        }
    }

    fn milestone(options: Vec<MilestoneOption>) -> MilestonePayload {
        MilestonePayload {
            index: 42,
            timestamp: 1_700_000_000,
            protocol_version: 2,
            previous_milestone_id: MilestoneId::new([0x01; 32]),
            parents: vec![BlockId::new([0x02; 32])],
            inclusion_merkle_root: [0x03; 32],
            applied_merkle_root: [0x04; 32],
            metadata: vec![],
            options,
            signatures: vec![],
        }
    }

    #[test]
    fn minimal_milestone_is_minimum_footprint() {
        let ms = milestone(vec![]);
        let bytes = ms.to_bytes().unwrap();
        assert_eq!(bytes.len(), MIN_MILESTONE_PAYLOAD_LENGTH);
        assert_eq!(MilestonePayload::from_bytes(&bytes).unwrap(), ms);
    }

    #[test]
    fn milestone_with_options_round_trips() {
        let mut ms = milestone(vec![
            MilestoneOption::Receipt(ReceiptMilestoneOption {
                migrated_at: 41,
                last: true,
                funds: vec![MigratedFundsEntry {
                    tail_transaction_hash: [0x55; TAIL_TRANSACTION_HASH_LENGTH],
                    address: Address::Ed25519 {
                        pub_key_hash: [0x66; 32],
                    },
                    deposit: 1_000_000,
                }],
                transaction: treasury_tx(),
            }),
            MilestoneOption::ProtocolParams(ProtocolParamsMilestoneOption {
                target_milestone_index: 100,
                protocol_version: 3,
                params: vec![1, 2, 3],
            }),
        ]);
        ms.metadata = b"checkpoint".to_vec();
        ms.signatures.push(Ed25519Signature {
            public_key: [0x77; 32],
            signature: [0x88; 64],
        });

        let bytes = ms.to_bytes().unwrap();
        assert_eq!(MilestonePayload::from_bytes(&bytes).unwrap(), ms);
    }

    #[test]
    fn receipt_rejects_non_treasury_payload() {
        let receipt = MilestoneOption::Receipt(ReceiptMilestoneOption {
            migrated_at: 1,
            last: false,
            funds: vec![],
            transaction: treasury_tx(),
        });
        let mut bytes = milestone(vec![receipt]).to_bytes().unwrap();
        // The option type lands where the signature count sits in a bare
        // milestone; the envelope body follows type, migratedAt, final,
        // funds count and the length.
        let body_start = MIN_MILESTONE_PAYLOAD_LENGTH - 1 + 1 + 4 + 1 + 2 + 4;
        bytes[body_start] = 5;
        assert_eq!(
            MilestonePayload::from_bytes(&bytes).unwrap_err(),
            CodecError::ForbiddenEmbeddedPayload {
                path: "milestone.option0.transaction".to_string(),
                actual: 5,
            }
        );
    }

    #[test]
    fn receipt_without_transaction_is_invalid() {
        let receipt = MilestoneOption::Receipt(ReceiptMilestoneOption {
            migrated_at: 1,
            last: false,
            funds: vec![],
            transaction: treasury_tx(),
        });
        let mut bytes = milestone(vec![receipt]).to_bytes().unwrap();
        let length_start = MIN_MILESTONE_PAYLOAD_LENGTH - 1 + 1 + 4 + 1 + 2;
        let body_len = MIN_TREASURY_TRANSACTION_PAYLOAD_LENGTH;
        bytes.drain(length_start + 4..length_start + 4 + body_len);
        bytes[length_start..length_start + 4].copy_from_slice(&[0; 4]);
        assert!(matches!(
            MilestonePayload::from_bytes(&bytes),
            Err(CodecError::InvalidValue { .. })
        ));
    }

    #[test]
    fn unknown_option_is_rejected() {
        let mut bytes = milestone(vec![]).to_bytes().unwrap();
        // Option count sits just before the signature count.
        let count_at = bytes.len() - 2;
        bytes[count_at] = 1;
        bytes.insert(count_at + 1, 9);
        assert!(matches!(
            MilestonePayload::from_bytes(&bytes),
            Err(CodecError::UnknownVariant {
                kind: "milestone option",
                actual: 9,
                ..
            })
        ));
    }

    #[test]
    fn json_uses_final_for_receipt_flag() {
        let option = MilestoneOption::Receipt(ReceiptMilestoneOption {
            migrated_at: 1,
            last: true,
            funds: vec![],
            transaction: treasury_tx(),
        });
        let json = serde_json::to_value(&option).unwrap();
        assert_eq!(json["kind"], "receipt");
        assert_eq!(json["final"], true);
    }
}
