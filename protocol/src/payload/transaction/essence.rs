//! Transaction essence: the signed part of a transaction.
//!
//! ```text
//! type              u8    = 1
//! networkId         u64
//! inputs            u16 count + inputs     (UTXO only)
//! inputsCommitment  [32]
//! outputs           u16 count + outputs
//! payload           envelope, tagged data or empty
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{MIN_TRANSACTION_ESSENCE_LENGTH, TAGGED_DATA_PAYLOAD_TYPE, TRANSACTION_ESSENCE_TYPE};
use crate::error::{CodecError, CodecResult};
use crate::input::{decode_inputs, encode_inputs, Input};
use crate::output::{decode_outputs, encode_outputs, Output};
use crate::payload::{decode_payload_admitting, encode_envelope, Payload, TaggedDataPayload};
use crate::serde_helpers::{hex_array, u64_string};
use crate::stream::{ReadStream, WireCodec, WriteStream};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEssence {
    /// Hash-derived identifier of the network this transaction is valid on.
    #[serde(with = "u64_string")]
    pub network_id: u64,
    pub inputs: Vec<Input>,
    /// BLAKE2b-256 over the serialized outputs the inputs consume.
    #[serde(with = "hex_array")]
    pub inputs_commitment: [u8; 32],
    pub outputs: Vec<Output>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<TaggedDataPayload>,
}

impl TransactionEssence {
    pub(crate) fn decode_at(stream: &mut ReadStream<'_>, path: &str) -> CodecResult<Self> {
        stream.ensure_remaining(path, MIN_TRANSACTION_ESSENCE_LENGTH)?;

        let type_path = format!("{path}.type");
        let kind = stream.read_u8(&type_path)?;
        if kind != TRANSACTION_ESSENCE_TYPE {
            return Err(CodecError::TypeMismatch {
                path: type_path,
                expected: TRANSACTION_ESSENCE_TYPE.into(),
                actual: kind.into(),
            });
        }

        let network_id = stream.read_u64(&format!("{path}.networkId"))?;
        let inputs = decode_inputs(stream, &format!("{path}.inputs"))?;
        let inputs_commitment = stream.read_array(&format!("{path}.inputsCommitment"))?;
        let outputs = decode_outputs(stream, &format!("{path}.outputs"))?;

        let payload_path = format!("{path}.payload");
        let payload = decode_payload_admitting(stream, &payload_path, |path, kind| {
            if kind == TAGGED_DATA_PAYLOAD_TYPE {
                Ok(())
            } else {
                Err(CodecError::ForbiddenEmbeddedPayload {
                    path: path.to_string(),
                    actual: kind,
                })
            }
        })?;
        let payload = match payload {
            None => None,
            Some(Payload::TaggedData(tagged)) => Some(*tagged),
            Some(other) => {
                return Err(CodecError::ForbiddenEmbeddedPayload {
                    path: payload_path,
                    actual: other.kind(),
                })
            }
        };

        check_utxo_inputs(path, &inputs)?;

        Ok(Self {
            network_id,
            inputs,
            inputs_commitment,
            outputs,
            payload,
        })
    }

    pub(crate) fn encode_at(&self, stream: &mut WriteStream, path: &str) -> CodecResult<()> {
        stream.write_u8(TRANSACTION_ESSENCE_TYPE);
        stream.write_u64(self.network_id);
        check_utxo_inputs(path, &self.inputs)?;
        encode_inputs(stream, &format!("{path}.inputs"), &self.inputs)?;
        stream.write_bytes(&self.inputs_commitment);
        encode_outputs(stream, &format!("{path}.outputs"), &self.outputs)?;

        let payload_path = format!("{path}.payload");
        let payload_path = payload_path.as_str();
        encode_envelope(
            stream,
            payload_path,
            self.payload
                .as_ref()
                .map(|tagged| move |s: &mut WriteStream| tagged.encode_at(s, payload_path)),
        )
    }
}

impl WireCodec for TransactionEssence {
    const PATH: &'static str = "essence";

    fn decode(stream: &mut ReadStream<'_>) -> CodecResult<Self> {
        Self::decode_at(stream, Self::PATH)
    }

    fn encode(&self, stream: &mut WriteStream) -> CodecResult<()> {
        self.encode_at(stream, Self::PATH)
    }
}

fn check_utxo_inputs(path: &str, inputs: &[Input]) -> CodecResult<()> {
    match inputs
        .iter()
        .enumerate()
        .find(|(_, input)| !matches!(input, Input::Utxo(_)))
    {
        Some((i, input)) => Err(CodecError::InvalidInputType {
            path: format!("{path}.inputs.input{i}"),
            actual: input.kind(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::config::MILESTONE_PAYLOAD_TYPE;
    use crate::ids::{MilestoneId, TransactionId};
    use crate::input::{TreasuryInput, UtxoInput};
    use crate::output::{BasicOutput, UnlockCondition};

    fn essence() -> TransactionEssence {
        TransactionEssence {
            network_id: 14_379_272_398_717_627_559,
            inputs: vec![Input::Utxo(UtxoInput {
                transaction_id: TransactionId::new([0xA1; 32]),
                transaction_output_index: 0,
            })],
            inputs_commitment: [0xC0; 32],
            outputs: vec![Output::Basic(BasicOutput {
                amount: 1_000_000,
                native_tokens: vec![],
                unlock_conditions: vec![UnlockCondition::Address {
                    address: Address::Ed25519 {
                        pub_key_hash: [0x22; 32],
                    },
                }],
                features: vec![],
            })],
            payload: None,
        }
    }

    #[test]
    fn empty_essence_is_minimum_footprint() {
        let empty = TransactionEssence {
            network_id: 0,
            inputs: vec![],
            inputs_commitment: [0; 32],
            outputs: vec![],
            payload: None,
        };
        let bytes = empty.to_bytes().unwrap();
        assert_eq!(bytes.len(), MIN_TRANSACTION_ESSENCE_LENGTH);
        assert_eq!(TransactionEssence::from_bytes(&bytes).unwrap(), empty);
    }

    #[test]
    fn round_trip_with_tagged_data() {
        let mut essence = essence();
        essence.payload = Some(TaggedDataPayload::new(b"memo".to_vec(), b"hello".to_vec()));
        let bytes = essence.to_bytes().unwrap();
        assert_eq!(bytes[0], TRANSACTION_ESSENCE_TYPE);
        assert_eq!(TransactionEssence::from_bytes(&bytes).unwrap(), essence);
    }

    #[test]
    fn treasury_input_rejected_on_encode() {
        let mut essence = essence();
        essence.inputs.push(Input::Treasury(TreasuryInput {
            milestone_id: MilestoneId::new([1; 32]),
        }));
        assert_eq!(
            essence.to_bytes().unwrap_err(),
            CodecError::InvalidInputType {
                path: "essence.inputs.input1".to_string(),
                actual: 1,
            }
        );
    }

    #[test]
    fn treasury_input_rejected_on_decode() {
        let essence = essence();
        let mut bytes = essence.to_bytes().unwrap();
        // First input type byte follows type (1), network id (8), count (2).
        bytes[11] = 1;
        // Treasury inputs are 32 bytes, UTXO inputs 34: drop the index.
        bytes.drain(44..46);
        assert!(matches!(
            TransactionEssence::from_bytes(&bytes),
            Err(CodecError::InvalidInputType { actual: 1, .. })
        ));
    }

    #[test]
    fn non_tagged_payload_is_forbidden() {
        let mut bytes = essence().to_bytes().unwrap();
        // Replace the empty envelope with one declaring a milestone.
        bytes.truncate(bytes.len() - 4);
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(&MILESTONE_PAYLOAD_TYPE.to_le_bytes());
        assert_eq!(
            TransactionEssence::from_bytes(&bytes).unwrap_err(),
            CodecError::ForbiddenEmbeddedPayload {
                path: "essence.payload".to_string(),
                actual: MILESTONE_PAYLOAD_TYPE,
            }
        );
    }

    #[test]
    fn wrong_type_byte_is_mismatch() {
        let mut bytes = essence().to_bytes().unwrap();
        bytes[0] = 2;
        assert!(matches!(
            TransactionEssence::from_bytes(&bytes),
            Err(CodecError::TypeMismatch {
                expected: 1,
                actual: 2,
                ..
            })
        ));
    }

    #[test]
    fn network_id_is_a_json_string() {
        let json = serde_json::to_value(essence()).unwrap();
        assert_eq!(json["networkId"], "14379272398717627559");
        assert!(json.get("payload").is_none());
    }
}
