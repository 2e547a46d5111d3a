//! Output features: optional metadata attached to an output.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::config::{
    ISSUER_FEATURE_TYPE, MAX_TAG_LENGTH, METADATA_FEATURE_TYPE, SENDER_FEATURE_TYPE,
    TAG_FEATURE_TYPE,
};
use crate::error::{CodecError, CodecResult};
use crate::serde_helpers::hex_bytes;
use crate::stream::{ReadStream, WireCodec, WriteStream};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Feature {
    Sender {
        address: Address,
    },
    Issuer {
        address: Address,
    },
    Metadata {
        #[serde(with = "hex_bytes")]
        data: Vec<u8>,
    },
    Tag {
        #[serde(with = "hex_bytes")]
        tag: Vec<u8>,
    },
}

impl Feature {
    pub fn kind(&self) -> u8 {
        match self {
            Self::Sender { .. } => SENDER_FEATURE_TYPE,
            Self::Issuer { .. } => ISSUER_FEATURE_TYPE,
            Self::Metadata { .. } => METADATA_FEATURE_TYPE,
            Self::Tag { .. } => TAG_FEATURE_TYPE,
        }
    }

    pub(crate) fn decode_at(stream: &mut ReadStream<'_>, path: &str) -> CodecResult<Self> {
        let feature = match stream.read_u8(path)? {
            SENDER_FEATURE_TYPE => Self::Sender {
                address: Address::decode_at(stream, path)?,
            },
            ISSUER_FEATURE_TYPE => Self::Issuer {
                address: Address::decode_at(stream, path)?,
            },
            METADATA_FEATURE_TYPE => Self::Metadata {
                data: stream.read_u16_prefixed(path, path)?,
            },
            TAG_FEATURE_TYPE => Self::Tag {
                tag: stream.read_u8_prefixed(path, path)?,
            },
            other => {
                return Err(CodecError::UnknownVariant {
                    path: path.to_string(),
                    kind: "feature",
                    actual: other,
                })
            }
        };
        Ok(feature)
    }
}

impl WireCodec for Feature {
    const PATH: &'static str = "feature";

    fn decode(stream: &mut ReadStream<'_>) -> CodecResult<Self> {
        Self::decode_at(stream, Self::PATH)
    }

    fn encode(&self, stream: &mut WriteStream) -> CodecResult<()> {
        stream.write_u8(self.kind());
        match self {
            Self::Sender { address } | Self::Issuer { address } => address.encode(stream),
            Self::Metadata { data } => stream.write_u16_prefixed(Self::PATH, data),
            Self::Tag { tag } => {
                if tag.len() > MAX_TAG_LENGTH {
                    return Err(CodecError::TagTooLong {
                        path: "feature.tag".to_string(),
                        max: MAX_TAG_LENGTH,
                        actual: tag.len(),
                    });
                }
                stream.write_u8_prefixed(Self::PATH, tag)
            }
        }
    }
}

pub(crate) fn decode_features(
    stream: &mut ReadStream<'_>,
    path: &str,
    label: &str,
) -> CodecResult<Vec<Feature>> {
    let count = stream.read_u8(&format!("{path}.{label}Count"))? as usize;
    (0..count)
        .map(|i| Feature::decode_at(stream, &format!("{path}.{label}{i}")))
        .collect()
}

pub(crate) fn encode_features(
    stream: &mut WriteStream,
    path: &str,
    label: &str,
    features: &[Feature],
) -> CodecResult<()> {
    stream.write_count_u8(&format!("{path}.{label}Count"), features.len())?;
    features.iter().try_for_each(|f| f.encode(stream))
}
