//! Native tokens, 256-bit amounts, and foundry token schemes.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::config::{SIMPLE_TOKEN_SCHEME_TYPE, UINT256_SIZE};
use crate::error::{CodecError, CodecResult};
use crate::ids::NativeTokenId;
use crate::stream::{ReadStream, WriteStream};

// ---------------------------------------------------------------------------
// U256 wire form
// ---------------------------------------------------------------------------

/// Reads a 256-bit amount stored little-endian.
fn read_u256(stream: &mut ReadStream<'_>, path: &str) -> CodecResult<U256> {
    let bytes: [u8; UINT256_SIZE] = stream.read_array(path)?;
    Ok(U256::from_little_endian(&bytes))
}

fn write_u256(stream: &mut WriteStream, value: &U256) {
    let mut bytes = [0u8; UINT256_SIZE];
    value.to_little_endian(&mut bytes);
    stream.write_bytes(&bytes);
}

// ---------------------------------------------------------------------------
// NativeToken
// ---------------------------------------------------------------------------

/// An amount of a user-defined token held by an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NativeToken {
    pub id: NativeTokenId,
    pub amount: U256,
}

pub(crate) fn decode_native_tokens(
    stream: &mut ReadStream<'_>,
    path: &str,
) -> CodecResult<Vec<NativeToken>> {
    let count = stream.read_u8(&format!("{path}.nativeTokensCount"))? as usize;
    (0..count)
        .map(|i| {
            let path = format!("{path}.nativeToken{i}");
            Ok(NativeToken {
                id: NativeTokenId::new(stream.read_array(&path)?),
                amount: read_u256(stream, &path)?,
            })
        })
        .collect()
}

pub(crate) fn encode_native_tokens(
    stream: &mut WriteStream,
    path: &str,
    tokens: &[NativeToken],
) -> CodecResult<()> {
    stream.write_count_u8(&format!("{path}.nativeTokensCount"), tokens.len())?;
    for token in tokens {
        stream.write_bytes(token.id.as_bytes());
        write_u256(stream, &token.amount);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// TokenScheme
// ---------------------------------------------------------------------------

/// Supply rules of the tokens a foundry controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TokenScheme {
    #[serde(rename_all = "camelCase")]
    Simple {
        minted_tokens: U256,
        melted_tokens: U256,
        maximum_supply: U256,
    },
}

impl TokenScheme {
    pub(crate) fn decode_at(stream: &mut ReadStream<'_>, path: &str) -> CodecResult<Self> {
        match stream.read_u8(path)? {
            SIMPLE_TOKEN_SCHEME_TYPE => Ok(Self::Simple {
                minted_tokens: read_u256(stream, path)?,
                melted_tokens: read_u256(stream, path)?,
                maximum_supply: read_u256(stream, path)?,
            }),
            other => Err(CodecError::UnknownVariant {
                path: path.to_string(),
                kind: "token scheme",
                actual: other,
            }),
        }
    }

    pub(crate) fn encode(&self, stream: &mut WriteStream) {
        match self {
            Self::Simple {
                minted_tokens,
                melted_tokens,
                maximum_supply,
            } => {
                stream.write_u8(SIMPLE_TOKEN_SCHEME_TYPE);
                write_u256(stream, minted_tokens);
                write_u256(stream, melted_tokens);
                write_u256(stream, maximum_supply);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_is_little_endian_on_the_wire() {
        let mut writer = WriteStream::new();
        write_u256(&mut writer, &U256::from(0x0102u64));
        let bytes = writer.finish();
        assert_eq!(bytes.len(), UINT256_SIZE);
        assert_eq!(&bytes[..3], &[0x02, 0x01, 0x00]);

        let mut reader = ReadStream::new(&bytes);
        assert_eq!(read_u256(&mut reader, "amount").unwrap(), U256::from(0x0102u64));
    }

    #[test]
    fn amount_json_is_minimal_hex() {
        assert_eq!(serde_json::to_value(U256::zero()).unwrap(), "0x0");
        assert_eq!(serde_json::to_value(U256::from(0x1234u64)).unwrap(), "0x1234");
        let back: U256 = serde_json::from_value(serde_json::json!("0x1234")).unwrap();
        assert_eq!(back, U256::from(0x1234u64));
        assert!(serde_json::from_value::<U256>(serde_json::json!(format!("0x{}", "f".repeat(65)))).is_err());
    }

    #[test]
    fn native_token_list_round_trip() {
        let tokens = vec![NativeToken {
            id: NativeTokenId::new([9; 38]),
            amount: U256::from(1_000u64),
        }];
        let mut writer = WriteStream::new();
        encode_native_tokens(&mut writer, "output", &tokens).unwrap();
        let bytes = writer.finish();
        assert_eq!(bytes.len(), 1 + 38 + 32);

        let mut reader = ReadStream::new(&bytes);
        assert_eq!(decode_native_tokens(&mut reader, "output").unwrap(), tokens);
    }

    #[test]
    fn unknown_token_scheme_is_rejected() {
        let bytes = [3u8];
        let mut reader = ReadStream::new(&bytes);
        assert!(matches!(
            TokenScheme::decode_at(&mut reader, "foundry.tokenScheme"),
            Err(CodecError::UnknownVariant { actual: 3, .. })
        ));
    }
}
