//! # Tagged Data Payload
//!
//! Arbitrary application data with an optional indexation tag. On top of
//! the plain tag/data pair this payload carries an optional signature and
//! public key so that a publisher can vouch for the data it posts. The
//! codec only transports both fields; it does not verify them.
//!
//! ```text
//! type            u32   = 5
//! tagLength       u8    tag            [tagLength]        (≤ 64)
//! dataLength      u32   data           [dataLength]
//! signatureLength u8    signature      [signatureLength]
//! publicKeyLength u8    publicKey      [publicKeyLength]
//! ```
//!
//! An empty field still writes its length prefix, at the same width as a
//! populated one.

use serde::{Deserialize, Serialize};

use crate::config::{MAX_TAG_LENGTH, MIN_TAGGED_DATA_PAYLOAD_LENGTH, TAGGED_DATA_PAYLOAD_TYPE};
use crate::error::{CodecError, CodecResult};
use crate::serde_helpers::hex_bytes;
use crate::stream::{ReadStream, WireCodec, WriteStream};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedDataPayload {
    #[serde(with = "hex_bytes", default)]
    pub tag: Vec<u8>,
    #[serde(with = "hex_bytes", default)]
    pub data: Vec<u8>,
    #[serde(with = "hex_bytes", default)]
    pub signature: Vec<u8>,
    #[serde(with = "hex_bytes", default)]
    pub public_key: Vec<u8>,
}

impl TaggedDataPayload {
    /// Unsigned tagged data.
    pub fn new(tag: impl Into<Vec<u8>>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            tag: tag.into(),
            data: data.into(),
            ..Self::default()
        }
    }

    /// Attaches a signature and the public key it verifies under.
    pub fn with_signature(
        mut self,
        signature: impl Into<Vec<u8>>,
        public_key: impl Into<Vec<u8>>,
    ) -> Self {
        self.signature = signature.into();
        self.public_key = public_key.into();
        self
    }

    pub fn is_signed(&self) -> bool {
        !self.signature.is_empty()
    }

    pub(crate) fn decode_at(stream: &mut ReadStream<'_>, path: &str) -> CodecResult<Self> {
        stream.ensure_remaining(path, MIN_TAGGED_DATA_PAYLOAD_LENGTH)?;

        let type_path = format!("{path}.type");
        let kind = stream.read_u32(&type_path)?;
        if kind != TAGGED_DATA_PAYLOAD_TYPE {
            return Err(CodecError::TypeMismatch {
                path: type_path,
                expected: TAGGED_DATA_PAYLOAD_TYPE,
                actual: kind,
            });
        }

        let tag = stream.read_u8_prefixed(&format!("{path}.tagLength"), &format!("{path}.tag"))?;
        if tag.len() > MAX_TAG_LENGTH {
            return Err(CodecError::TagTooLong {
                path: format!("{path}.tag"),
                max: MAX_TAG_LENGTH,
                actual: tag.len(),
            });
        }
        let data =
            stream.read_u32_prefixed(&format!("{path}.dataLength"), &format!("{path}.data"))?;
        let signature = stream.read_u8_prefixed(
            &format!("{path}.signatureLength"),
            &format!("{path}.signature"),
        )?;
        let public_key = stream.read_u8_prefixed(
            &format!("{path}.publicKeyLength"),
            &format!("{path}.publicKey"),
        )?;

        Ok(Self {
            tag,
            data,
            signature,
            public_key,
        })
    }

    pub(crate) fn encode_at(&self, stream: &mut WriteStream, path: &str) -> CodecResult<()> {
        if self.tag.len() > MAX_TAG_LENGTH {
            return Err(CodecError::TagTooLong {
                path: format!("{path}.tag"),
                max: MAX_TAG_LENGTH,
                actual: self.tag.len(),
            });
        }
        stream.write_u32(TAGGED_DATA_PAYLOAD_TYPE);
        stream.write_u8_prefixed(&format!("{path}.tag"), &self.tag)?;
        stream.write_u32_prefixed(&format!("{path}.data"), &self.data)?;
        stream.write_u8_prefixed(&format!("{path}.signature"), &self.signature)?;
        stream.write_u8_prefixed(&format!("{path}.publicKey"), &self.public_key)?;
        Ok(())
    }
}

impl WireCodec for TaggedDataPayload {
    const PATH: &'static str = "taggedData";

    fn decode(stream: &mut ReadStream<'_>) -> CodecResult<Self> {
        Self::decode_at(stream, Self::PATH)
    }

    fn encode(&self, stream: &mut WriteStream) -> CodecResult<()> {
        self.encode_at(stream, Self::PATH)
    }
}
