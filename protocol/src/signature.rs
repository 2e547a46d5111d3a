//! Ed25519 signature blocks carried by unlocks and milestones.
//!
//! The codec only moves the bytes. Verifying them is the validator's job.

use serde::{Deserialize, Serialize};

use crate::config::{ED25519_PUBLIC_KEY_LENGTH, ED25519_SIGNATURE_LENGTH, ED25519_SIGNATURE_TYPE};
use crate::error::{CodecError, CodecResult};
use crate::serde_helpers::hex_array;
use crate::stream::{ReadStream, WireCodec, WriteStream};

/// Public key plus signature, preceded on the wire by a type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ed25519Signature {
    #[serde(with = "hex_array")]
    pub public_key: [u8; ED25519_PUBLIC_KEY_LENGTH],
    #[serde(with = "hex_array")]
    pub signature: [u8; ED25519_SIGNATURE_LENGTH],
}

impl Ed25519Signature {
    pub(crate) fn decode_at(stream: &mut ReadStream<'_>, path: &str) -> CodecResult<Self> {
        let kind = stream.read_u8(path)?;
        if kind != ED25519_SIGNATURE_TYPE {
            return Err(CodecError::UnknownVariant {
                path: path.to_string(),
                kind: "signature",
                actual: kind,
            });
        }
        Ok(Self {
            public_key: stream.read_array(path)?,
            signature: stream.read_array(path)?,
        })
    }
}

impl WireCodec for Ed25519Signature {
    const PATH: &'static str = "signature";

    fn decode(stream: &mut ReadStream<'_>) -> CodecResult<Self> {
        Self::decode_at(stream, Self::PATH)
    }

    fn encode(&self, stream: &mut WriteStream) -> CodecResult<()> {
        stream.write_u8(ED25519_SIGNATURE_TYPE);
        stream.write_bytes(&self.public_key);
        stream.write_bytes(&self.signature);
        Ok(())
    }
}
