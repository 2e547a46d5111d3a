//! # Transaction Payload
//!
//! ```text
//! type     u32   = 6
//! essence  TransactionEssence (starts with its own u8 type)
//! unlocks  u16 count + unlocks
//! ```
//!
//! Only one essence type exists. The decoder peeks the essence type before
//! delegating so an unknown essence is reported as such rather than as a
//! type mismatch deep inside the essence codec.

mod essence;

use serde::{Deserialize, Serialize};

pub use essence::TransactionEssence;

use crate::config::{MIN_TRANSACTION_PAYLOAD_LENGTH, TRANSACTION_ESSENCE_TYPE, TRANSACTION_PAYLOAD_TYPE};
use crate::error::{CodecError, CodecResult};
use crate::stream::{ReadStream, WireCodec, WriteStream};
use crate::unlock::{decode_unlocks, encode_unlocks, Unlock};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPayload {
    pub essence: TransactionEssence,
    pub unlocks: Vec<Unlock>,
}

impl TransactionPayload {
    pub(crate) fn decode_at(stream: &mut ReadStream<'_>, path: &str) -> CodecResult<Self> {
        stream.ensure_remaining(path, MIN_TRANSACTION_PAYLOAD_LENGTH)?;

        let type_path = format!("{path}.type");
        let kind = stream.read_u32(&type_path)?;
        if kind != TRANSACTION_PAYLOAD_TYPE {
            return Err(CodecError::TypeMismatch {
                path: type_path,
                expected: TRANSACTION_PAYLOAD_TYPE,
                actual: kind,
            });
        }

        let essence_path = format!("{path}.essence");
        let essence_type_path = format!("{essence_path}.type");
        let essence_type = stream.peek_u8(&essence_type_path)?;
        if essence_type != TRANSACTION_ESSENCE_TYPE {
            return Err(CodecError::UnsupportedEssenceType {
                path: essence_type_path,
                actual: essence_type,
            });
        }

        let essence = TransactionEssence::decode_at(stream, &essence_path)?;
        let unlocks = decode_unlocks(stream, &format!("{path}.unlocks"))?;
        Ok(Self { essence, unlocks })
    }

    pub(crate) fn encode_at(&self, stream: &mut WriteStream, path: &str) -> CodecResult<()> {
        stream.write_u32(TRANSACTION_PAYLOAD_TYPE);
        self.essence.encode_at(stream, &format!("{path}.essence"))?;
        encode_unlocks(stream, &format!("{path}.unlocks"), &self.unlocks)
    }
}

impl WireCodec for TransactionPayload {
    const PATH: &'static str = "transaction";

    fn decode(stream: &mut ReadStream<'_>) -> CodecResult<Self> {
        Self::decode_at(stream, Self::PATH)
    }

    fn encode(&self, stream: &mut WriteStream) -> CodecResult<()> {
        self.encode_at(stream, Self::PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIN_TRANSACTION_ESSENCE_LENGTH;
    use crate::ids::TransactionId;
    use crate::input::{Input, UtxoInput};
    use crate::output::{Output, TreasuryOutput};
    use crate::signature::Ed25519Signature;

    fn empty_essence() -> TransactionEssence {
        TransactionEssence {
            network_id: 1,
            inputs: vec![],
            inputs_commitment: [0; 32],
            outputs: vec![],
            payload: None,
        }
    }

    #[test]
    fn empty_transaction_is_minimum_footprint() {
        let tx = TransactionPayload {
            essence: empty_essence(),
            unlocks: vec![],
        };
        let bytes = tx.to_bytes().unwrap();
        assert_eq!(bytes.len(), MIN_TRANSACTION_PAYLOAD_LENGTH);
        assert_eq!(&bytes[..4], &[6, 0, 0, 0]);
        assert_eq!(TransactionPayload::from_bytes(&bytes).unwrap(), tx);
    }

    #[test]
    fn signed_transaction_round_trips() {
        let mut essence = empty_essence();
        essence.inputs.push(Input::Utxo(UtxoInput {
            transaction_id: TransactionId::new([3; 32]),
            transaction_output_index: 7,
        }));
        essence
            .outputs
            .push(Output::Treasury(TreasuryOutput { amount: 9 }));
        let tx = TransactionPayload {
            essence,
            unlocks: vec![Unlock::Signature {
                signature: Ed25519Signature {
                    public_key: [4; 32],
                    signature: [5; 64],
                },
            }],
        };
        let bytes = tx.to_bytes().unwrap();
        assert_eq!(TransactionPayload::from_bytes(&bytes).unwrap(), tx);
    }

    #[test]
    fn unknown_essence_type_is_unsupported() {
        let tx = TransactionPayload {
            essence: empty_essence(),
            unlocks: vec![],
        };
        let mut bytes = tx.to_bytes().unwrap();
        bytes[4] = 2;
        assert_eq!(
            TransactionPayload::from_bytes(&bytes).unwrap_err(),
            CodecError::UnsupportedEssenceType {
                path: "transaction.essence.type".to_string(),
                actual: 2,
            }
        );
    }

    #[test]
    fn wrong_payload_type_is_mismatch() {
        let mut bytes = vec![5, 0, 0, 0];
        bytes.extend_from_slice(&[0; MIN_TRANSACTION_ESSENCE_LENGTH + 2]);
        assert!(matches!(
            TransactionPayload::from_bytes(&bytes),
            Err(CodecError::TypeMismatch {
                expected: 6,
                actual: 5,
                ..
            })
        ));
    }

    #[test]
    fn short_buffer_is_truncated() {
        let bytes = [6u8, 0, 0, 0, 1];
        assert!(matches!(
            TransactionPayload::from_bytes(&bytes),
            Err(CodecError::TruncatedInput { required: 55, .. })
        ));
    }
}
