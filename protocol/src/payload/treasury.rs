//! Treasury transaction payload: moves funds from the previous treasury
//! output to a new one. Only milestone receipts carry it.
//!
//! ```text
//! type    u32   = 4
//! input   u8 = 1, milestone id [32]
//! output  u8 = 2, amount u64
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{
    MIN_TREASURY_TRANSACTION_PAYLOAD_LENGTH, TREASURY_INPUT_TYPE, TREASURY_OUTPUT_TYPE,
    TREASURY_TRANSACTION_PAYLOAD_TYPE,
};
use crate::error::{CodecError, CodecResult};
use crate::ids::MilestoneId;
use crate::input::TreasuryInput;
use crate::output::TreasuryOutput;
use crate::stream::{ReadStream, WireCodec, WriteStream};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreasuryTransactionPayload {
    pub input: TreasuryInput,
    pub output: TreasuryOutput,
}

impl TreasuryTransactionPayload {
    pub(crate) fn decode_at(stream: &mut ReadStream<'_>, path: &str) -> CodecResult<Self> {
        stream.ensure_remaining(path, MIN_TREASURY_TRANSACTION_PAYLOAD_LENGTH)?;

        let type_path = format!("{path}.type");
        let kind = stream.read_u32(&type_path)?;
        if kind != TREASURY_TRANSACTION_PAYLOAD_TYPE {
            return Err(CodecError::TypeMismatch {
                path: type_path,
                expected: TREASURY_TRANSACTION_PAYLOAD_TYPE,
                actual: kind,
            });
        }

        let input_path = format!("{path}.input");
        let input_type = stream.read_u8(&input_path)?;
        if input_type != TREASURY_INPUT_TYPE {
            return Err(CodecError::InvalidInputType {
                path: input_path,
                actual: input_type,
            });
        }
        let input = TreasuryInput {
            milestone_id: MilestoneId::new(stream.read_array(&input_path)?),
        };

        let output_path = format!("{path}.output");
        let output_type = stream.read_u8(&output_path)?;
        if output_type != TREASURY_OUTPUT_TYPE {
            return Err(CodecError::InvalidOutputType {
                path: output_path,
                actual: output_type,
            });
        }
        let output = TreasuryOutput {
            amount: stream.read_u64(&output_path)?,
        };

        Ok(Self { input, output })
    }

    pub(crate) fn encode_at(&self, stream: &mut WriteStream, _path: &str) -> CodecResult<()> {
        stream.write_u32(TREASURY_TRANSACTION_PAYLOAD_TYPE);
        stream.write_u8(TREASURY_INPUT_TYPE);
        stream.write_bytes(self.input.milestone_id.as_bytes());
        stream.write_u8(TREASURY_OUTPUT_TYPE);
        stream.write_u64(self.output.amount);
        Ok(())
    }
}

impl WireCodec for TreasuryTransactionPayload {
    const PATH: &'static str = "treasuryTransaction";

    fn decode(stream: &mut ReadStream<'_>) -> CodecResult<Self> {
        Self::decode_at(stream, Self::PATH)
    }

    fn encode(&self, stream: &mut WriteStream) -> CodecResult<()> {
        self.encode_at(stream, Self::PATH)
    }
}
