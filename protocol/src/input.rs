//! Transaction inputs.
//!
//! A UTXO input points at an output of an earlier transaction. A treasury
//! input points at the treasury created by a milestone and only appears
//! inside treasury transactions.

use serde::{Deserialize, Serialize};

use crate::config::{TREASURY_INPUT_TYPE, UTXO_INPUT_TYPE};
use crate::error::{CodecError, CodecResult};
use crate::ids::{MilestoneId, TransactionId};
use crate::stream::{ReadStream, WireCodec, WriteStream};

/// Reference to a specific output of a previous transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtxoInput {
    pub transaction_id: TransactionId,
    pub transaction_output_index: u16,
}

/// Reference to the treasury output of a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasuryInput {
    pub milestone_id: MilestoneId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Input {
    Utxo(UtxoInput),
    Treasury(TreasuryInput),
}

impl Input {
    /// The wire discriminator of this input.
    pub fn kind(&self) -> u8 {
        match self {
            Self::Utxo(_) => UTXO_INPUT_TYPE,
            Self::Treasury(_) => TREASURY_INPUT_TYPE,
        }
    }

    pub(crate) fn decode_at(stream: &mut ReadStream<'_>, path: &str) -> CodecResult<Self> {
        match stream.read_u8(path)? {
            UTXO_INPUT_TYPE => Ok(Self::Utxo(UtxoInput {
                transaction_id: TransactionId::new(stream.read_array(path)?),
                transaction_output_index: stream.read_u16(path)?,
            })),
            TREASURY_INPUT_TYPE => Ok(Self::Treasury(TreasuryInput {
                milestone_id: MilestoneId::new(stream.read_array(path)?),
            })),
            other => Err(CodecError::UnknownVariant {
                path: path.to_string(),
                kind: "input",
                actual: other,
            }),
        }
    }
}

impl WireCodec for Input {
    const PATH: &'static str = "input";

    fn decode(stream: &mut ReadStream<'_>) -> CodecResult<Self> {
        Self::decode_at(stream, Self::PATH)
    }

    fn encode(&self, stream: &mut WriteStream) -> CodecResult<()> {
        stream.write_u8(self.kind());
        match self {
            Self::Utxo(input) => {
                stream.write_bytes(input.transaction_id.as_bytes());
                stream.write_u16(input.transaction_output_index);
            }
            Self::Treasury(input) => stream.write_bytes(input.milestone_id.as_bytes()),
        }
        Ok(())
    }
}

/// Reads a `u16`-counted list of inputs.
pub fn decode_inputs(stream: &mut ReadStream<'_>, path: &str) -> CodecResult<Vec<Input>> {
    let count = stream.read_u16(&format!("{path}.count"))? as usize;
    (0..count)
        .map(|i| Input::decode_at(stream, &format!("{path}.input{i}")))
        .collect()
}

/// Writes a `u16`-counted list of inputs.
pub fn encode_inputs(stream: &mut WriteStream, path: &str, inputs: &[Input]) -> CodecResult<()> {
    stream.write_count_u16(path, inputs.len())?;
    for input in inputs {
        input.encode(stream)?;
    }
    Ok(())
}
