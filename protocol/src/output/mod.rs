//! # Outputs
//!
//! Every output starts with a `u8` type byte followed by its amount. Apart
//! from the treasury output, outputs carry native tokens, unlock conditions
//! and features; alias, foundry and NFT outputs add immutable features that
//! are fixed when the output is created.
//!
//! Outputs appear in transaction essences as a `u16`-counted list and in
//! treasury transactions as a single treasury output.

mod feature;
mod native_token;
mod unlock_condition;

use serde::{Deserialize, Serialize};

pub use feature::Feature;
pub use native_token::{NativeToken, TokenScheme};
pub use primitive_types::U256;
pub use unlock_condition::UnlockCondition;

use crate::config::{
    ALIAS_OUTPUT_TYPE, BASIC_OUTPUT_TYPE, FOUNDRY_OUTPUT_TYPE, NFT_OUTPUT_TYPE,
    TREASURY_OUTPUT_TYPE,
};
use crate::error::{CodecError, CodecResult};
use crate::ids::{AliasId, NftId};
use crate::serde_helpers::{hex_bytes, u64_string};
use crate::stream::{ReadStream, WireCodec, WriteStream};
use feature::{decode_features, encode_features};
use native_token::{decode_native_tokens, encode_native_tokens};
use unlock_condition::{decode_unlock_conditions, encode_unlock_conditions};

// ---------------------------------------------------------------------------
// Output Types
// ---------------------------------------------------------------------------

/// Funds held by the protocol treasury.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreasuryOutput {
    #[serde(with = "u64_string")]
    pub amount: u64,
}

/// A plain output holding base tokens and native tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicOutput {
    #[serde(with = "u64_string")]
    pub amount: u64,
    #[serde(default)]
    pub native_tokens: Vec<NativeToken>,
    pub unlock_conditions: Vec<UnlockCondition>,
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasOutput {
    #[serde(with = "u64_string")]
    pub amount: u64,
    #[serde(default)]
    pub native_tokens: Vec<NativeToken>,
    pub alias_id: AliasId,
    pub state_index: u32,
    #[serde(with = "hex_bytes", default)]
    pub state_metadata: Vec<u8>,
    pub foundry_counter: u32,
    pub unlock_conditions: Vec<UnlockCondition>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub immutable_features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoundryOutput {
    #[serde(with = "u64_string")]
    pub amount: u64,
    #[serde(default)]
    pub native_tokens: Vec<NativeToken>,
    pub serial_number: u32,
    pub token_scheme: TokenScheme,
    pub unlock_conditions: Vec<UnlockCondition>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub immutable_features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftOutput {
    #[serde(with = "u64_string")]
    pub amount: u64,
    #[serde(default)]
    pub native_tokens: Vec<NativeToken>,
    pub nft_id: NftId,
    pub unlock_conditions: Vec<UnlockCondition>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub immutable_features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Output {
    Treasury(TreasuryOutput),
    Basic(BasicOutput),
    Alias(AliasOutput),
    Foundry(FoundryOutput),
    Nft(NftOutput),
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

impl Output {
    /// The wire discriminator of this output.
    pub fn kind(&self) -> u8 {
        match self {
            Self::Treasury(_) => TREASURY_OUTPUT_TYPE,
            Self::Basic(_) => BASIC_OUTPUT_TYPE,
            Self::Alias(_) => ALIAS_OUTPUT_TYPE,
            Self::Foundry(_) => FOUNDRY_OUTPUT_TYPE,
            Self::Nft(_) => NFT_OUTPUT_TYPE,
        }
    }

    /// Base token amount, whatever the output type.
    pub fn amount(&self) -> u64 {
        match self {
            Self::Treasury(o) => o.amount,
            Self::Basic(o) => o.amount,
            Self::Alias(o) => o.amount,
            Self::Foundry(o) => o.amount,
            Self::Nft(o) => o.amount,
        }
    }

    pub(crate) fn decode_at(stream: &mut ReadStream<'_>, path: &str) -> CodecResult<Self> {
        let output = match stream.read_u8(path)? {
            TREASURY_OUTPUT_TYPE => Self::Treasury(TreasuryOutput {
                amount: stream.read_u64(path)?,
            }),
            BASIC_OUTPUT_TYPE => Self::Basic(BasicOutput {
                amount: stream.read_u64(path)?,
                native_tokens: decode_native_tokens(stream, path)?,
                unlock_conditions: decode_unlock_conditions(stream, path)?,
                features: decode_features(stream, path, "feature")?,
            }),
            ALIAS_OUTPUT_TYPE => Self::Alias(AliasOutput {
                amount: stream.read_u64(path)?,
                native_tokens: decode_native_tokens(stream, path)?,
                alias_id: AliasId::new(stream.read_array(path)?),
                state_index: stream.read_u32(path)?,
                state_metadata: stream.read_u16_prefixed(path, path)?,
                foundry_counter: stream.read_u32(path)?,
                unlock_conditions: decode_unlock_conditions(stream, path)?,
                features: decode_features(stream, path, "feature")?,
                immutable_features: decode_features(stream, path, "immutableFeature")?,
            }),
            FOUNDRY_OUTPUT_TYPE => Self::Foundry(FoundryOutput {
                amount: stream.read_u64(path)?,
                native_tokens: decode_native_tokens(stream, path)?,
                serial_number: stream.read_u32(path)?,
                token_scheme: TokenScheme::decode_at(stream, path)?,
                unlock_conditions: decode_unlock_conditions(stream, path)?,
                features: decode_features(stream, path, "feature")?,
                immutable_features: decode_features(stream, path, "immutableFeature")?,
            }),
            NFT_OUTPUT_TYPE => Self::Nft(NftOutput {
                amount: stream.read_u64(path)?,
                native_tokens: decode_native_tokens(stream, path)?,
                nft_id: NftId::new(stream.read_array(path)?),
                unlock_conditions: decode_unlock_conditions(stream, path)?,
                features: decode_features(stream, path, "feature")?,
                immutable_features: decode_features(stream, path, "immutableFeature")?,
            }),
            other => {
                return Err(CodecError::UnknownVariant {
                    path: path.to_string(),
                    kind: "output",
                    actual: other,
                })
            }
        };
        Ok(output)
    }

    fn encode_at(&self, stream: &mut WriteStream, path: &str) -> CodecResult<()> {
        stream.write_u8(self.kind());
        match self {
            Self::Treasury(o) => stream.write_u64(o.amount),
            Self::Basic(o) => {
                stream.write_u64(o.amount);
                encode_native_tokens(stream, path, &o.native_tokens)?;
                encode_unlock_conditions(stream, path, &o.unlock_conditions)?;
                encode_features(stream, path, "feature", &o.features)?;
            }
            Self::Alias(o) => {
                stream.write_u64(o.amount);
                encode_native_tokens(stream, path, &o.native_tokens)?;
                stream.write_bytes(o.alias_id.as_bytes());
                stream.write_u32(o.state_index);
                stream.write_u16_prefixed(&format!("{path}.stateMetadata"), &o.state_metadata)?;
                stream.write_u32(o.foundry_counter);
                encode_unlock_conditions(stream, path, &o.unlock_conditions)?;
                encode_features(stream, path, "feature", &o.features)?;
                encode_features(stream, path, "immutableFeature", &o.immutable_features)?;
            }
            Self::Foundry(o) => {
                stream.write_u64(o.amount);
                encode_native_tokens(stream, path, &o.native_tokens)?;
                stream.write_u32(o.serial_number);
                o.token_scheme.encode(stream);
                encode_unlock_conditions(stream, path, &o.unlock_conditions)?;
                encode_features(stream, path, "feature", &o.features)?;
                encode_features(stream, path, "immutableFeature", &o.immutable_features)?;
            }
            Self::Nft(o) => {
                stream.write_u64(o.amount);
                encode_native_tokens(stream, path, &o.native_tokens)?;
                stream.write_bytes(o.nft_id.as_bytes());
                encode_unlock_conditions(stream, path, &o.unlock_conditions)?;
                encode_features(stream, path, "feature", &o.features)?;
                encode_features(stream, path, "immutableFeature", &o.immutable_features)?;
            }
        }
        Ok(())
    }
}

impl WireCodec for Output {
    const PATH: &'static str = "output";

    fn decode(stream: &mut ReadStream<'_>) -> CodecResult<Self> {
        Self::decode_at(stream, Self::PATH)
    }

    fn encode(&self, stream: &mut WriteStream) -> CodecResult<()> {
        self.encode_at(stream, Self::PATH)
    }
}

/// Reads a `u16`-counted list of outputs.
pub fn decode_outputs(stream: &mut ReadStream<'_>, path: &str) -> CodecResult<Vec<Output>> {
    let count = stream.read_u16(&format!("{path}.count"))? as usize;
    (0..count)
        .map(|i| Output::decode_at(stream, &format!("{path}.output{i}")))
        .collect()
}

/// Writes a `u16`-counted list of outputs.
pub fn encode_outputs(stream: &mut WriteStream, path: &str, outputs: &[Output]) -> CodecResult<()> {
    stream.write_count_u16(path, outputs.len())?;
    for (i, output) in outputs.iter().enumerate() {
        output.encode_at(stream, &format!("{path}.output{i}"))?;
    }
    Ok(())
}
