//! Unlocks: the proofs that authorize consuming a transaction's inputs.
//!
//! There is one unlock per input, in input order. Reference, alias and NFT
//! unlocks point back at an earlier unlock by index instead of repeating
//! a signature.

use serde::{Deserialize, Serialize};

use crate::config::{ALIAS_UNLOCK_TYPE, NFT_UNLOCK_TYPE, REFERENCE_UNLOCK_TYPE, SIGNATURE_UNLOCK_TYPE};
use crate::error::{CodecError, CodecResult};
use crate::signature::Ed25519Signature;
use crate::stream::{ReadStream, WireCodec, WriteStream};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Unlock {
    Signature { signature: Ed25519Signature },
    Reference { index: u16 },
    Alias { index: u16 },
    Nft { index: u16 },
}

impl Unlock {
    pub fn kind(&self) -> u8 {
        match self {
            Self::Signature { .. } => SIGNATURE_UNLOCK_TYPE,
            Self::Reference { .. } => REFERENCE_UNLOCK_TYPE,
            Self::Alias { .. } => ALIAS_UNLOCK_TYPE,
            Self::Nft { .. } => NFT_UNLOCK_TYPE,
        }
    }

    pub(crate) fn decode_at(stream: &mut ReadStream<'_>, path: &str) -> CodecResult<Self> {
        match stream.read_u8(path)? {
            SIGNATURE_UNLOCK_TYPE => Ok(Self::Signature {
                signature: Ed25519Signature::decode_at(stream, path)?,
            }),
            REFERENCE_UNLOCK_TYPE => Ok(Self::Reference {
                index: stream.read_u16(path)?,
            }),
            ALIAS_UNLOCK_TYPE => Ok(Self::Alias {
                index: stream.read_u16(path)?,
            }),
            NFT_UNLOCK_TYPE => Ok(Self::Nft {
                index: stream.read_u16(path)?,
            }),
            other => Err(CodecError::UnknownVariant {
                path: path.to_string(),
                kind: "unlock",
                actual: other,
            }),
        }
    }
}

impl WireCodec for Unlock {
    const PATH: &'static str = "unlock";

    fn decode(stream: &mut ReadStream<'_>) -> CodecResult<Self> {
        Self::decode_at(stream, Self::PATH)
    }

    fn encode(&self, stream: &mut WriteStream) -> CodecResult<()> {
        stream.write_u8(self.kind());
        match self {
            Self::Signature { signature } => signature.encode(stream)?,
            Self::Reference { index } | Self::Alias { index } | Self::Nft { index } => {
                stream.write_u16(*index)
            }
        }
        Ok(())
    }
}

/// Reads a `u16`-counted list of unlocks.
pub fn decode_unlocks(stream: &mut ReadStream<'_>, path: &str) -> CodecResult<Vec<Unlock>> {
    let count = stream.read_u16(&format!("{path}.count"))? as usize;
    (0..count)
        .map(|i| Unlock::decode_at(stream, &format!("{path}.unlock{i}")))
        .collect()
}

/// Writes a `u16`-counted list of unlocks.
pub fn encode_unlocks(stream: &mut WriteStream, path: &str, unlocks: &[Unlock]) -> CodecResult<()> {
    stream.write_count_u16(path, unlocks.len())?;
    unlocks.iter().try_for_each(|u| u.encode(stream))
}
