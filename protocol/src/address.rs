//! Addresses referenced by unlock conditions, features, and receipts.
//!
//! Only the binary form lives here; bech32 rendering is a presentation
//! concern and belongs to the callers.

use serde::{Deserialize, Serialize};

use crate::config::{ALIAS_ADDRESS_TYPE, ED25519_ADDRESS_TYPE, NFT_ADDRESS_TYPE};
use crate::error::{CodecError, CodecResult};
use crate::ids::{AliasId, NftId};
use crate::serde_helpers::hex_array;
use crate::stream::{ReadStream, WireCodec, WriteStream};

/// A ledger address: one type byte followed by a 32-byte hash or id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Address {
    /// BLAKE2b-256 hash of an Ed25519 public key.
    Ed25519 {
        #[serde(with = "hex_array")]
        pub_key_hash: [u8; 32],
    },
    /// Address controlled by an alias output.
    Alias { alias_id: AliasId },
    /// Address controlled by an NFT output.
    Nft { nft_id: NftId },
}

impl Address {
    /// The wire discriminator of this address.
    pub fn kind(&self) -> u8 {
        match self {
            Self::Ed25519 { .. } => ED25519_ADDRESS_TYPE,
            Self::Alias { .. } => ALIAS_ADDRESS_TYPE,
            Self::Nft { .. } => NFT_ADDRESS_TYPE,
        }
    }

    pub(crate) fn decode_at(stream: &mut ReadStream<'_>, path: &str) -> CodecResult<Self> {
        let kind = stream.read_u8(path)?;
        match kind {
            ED25519_ADDRESS_TYPE => Ok(Self::Ed25519 {
                pub_key_hash: stream.read_array(path)?,
            }),
            ALIAS_ADDRESS_TYPE => Ok(Self::Alias {
                alias_id: AliasId::new(stream.read_array(path)?),
            }),
            NFT_ADDRESS_TYPE => Ok(Self::Nft {
                nft_id: NftId::new(stream.read_array(path)?),
            }),
            other => Err(CodecError::UnknownVariant {
                path: path.to_string(),
                kind: "address",
                actual: other,
            }),
        }
    }
}

impl WireCodec for Address {
    const PATH: &'static str = "address";

    fn decode(stream: &mut ReadStream<'_>) -> CodecResult<Self> {
        Self::decode_at(stream, Self::PATH)
    }

    fn encode(&self, stream: &mut WriteStream) -> CodecResult<()> {
        stream.write_u8(self.kind());
        match self {
            Self::Ed25519 { pub_key_hash } => stream.write_bytes(pub_key_hash),
            Self::Alias { alias_id } => stream.write_bytes(alias_id.as_bytes()),
            Self::Nft { nft_id } => stream.write_bytes(nft_id.as_bytes()),
        }
        Ok(())
    }
}
