// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Tangle Protocol Wire Codec
//!
//! Binary encoding and decoding of tangle blocks and everything a block can
//! carry. The format is little-endian and fixed-width throughout; variable
//! data is always length-prefixed or count-prefixed, and payloads sit in a
//! `u32` length envelope so a reader can skip or bound them.
//!
//! ## Architecture
//!
//! - **stream**: `ReadStream` / `WriteStream` cursors and the `WireCodec` trait.
//! - **block**: The block codec and its parent-list rules.
//! - **payload**: Envelope dispatcher plus the tagged data, transaction,
//!   milestone and treasury transaction payloads.
//! - **input / output / unlock**: The ledger objects a transaction moves.
//! - **address / signature / ids**: Shared building blocks.
//! - **config**: Discriminators, widths, and limits.
//! - **error**: `CodecError`, with the logical path of every failure.
//!
//! ## Ground Rules
//!
//! 1. Decoding never panics, whatever the input. Every read is bounds-checked.
//! 2. Encoders only produce canonical bytes. A value that cannot be encoded
//!    canonically is an error, never silently fixed up.
//! 3. The codec does not hash, sign, or verify. Ids and signatures are
//!    opaque bytes here.
//!
//! ```
//! use tangle_protocol::{Block, BlockId, Payload, TaggedDataPayload, WireCodec};
//!
//! let payload = Payload::from(TaggedDataPayload::new(b"hello".to_vec(), b"tangle".to_vec()));
//! let block = Block::new(vec![BlockId::new([1; 32])], Some(payload));
//! let bytes = block.to_bytes().unwrap();
//! assert_eq!(Block::from_bytes(&bytes).unwrap(), block);
//! ```

pub mod address;
pub mod block;
pub mod config;
pub mod error;
pub mod ids;
pub mod input;
pub mod output;
pub mod payload;
pub mod serde_helpers;
pub mod signature;
pub mod stream;
pub mod unlock;

pub use address::Address;
pub use block::Block;
pub use error::{CodecError, CodecResult};
pub use ids::{AliasId, BlockId, MilestoneId, NativeTokenId, NftId, TransactionId};
pub use input::{Input, TreasuryInput, UtxoInput};
pub use output::Output;
pub use payload::{
    decode_payload, encode_payload, MilestonePayload, Payload, TaggedDataPayload,
    TransactionEssence, TransactionPayload, TreasuryTransactionPayload,
};
pub use signature::Ed25519Signature;
pub use stream::{ReadStream, WireCodec, WriteStream};
pub use unlock::Unlock;
