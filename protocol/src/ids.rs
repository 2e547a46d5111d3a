//! # Fixed-Length Identifiers
//!
//! Block, transaction, milestone, alias, NFT and native token ids are all
//! opaque fixed-length byte strings on the wire. They share one definition
//! so hex formatting, parsing, and ordering behave identically everywhere.
//!
//! Ordering is by raw byte value, which is the order block parents must be
//! sorted in.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::config::{
    ADDRESS_HASH_LENGTH, BLOCK_ID_LENGTH, MILESTONE_ID_LENGTH, NATIVE_TOKEN_ID_LENGTH,
    TRANSACTION_ID_LENGTH,
};
use crate::serde_helpers::{array_from_prefixed_hex, to_prefixed_hex};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Length of the identifier in bytes.
            pub const LENGTH: usize = $len;

            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Returns the `0x`-prefixed hex form.
            pub fn to_hex(&self) -> String {
                to_prefixed_hex(&self.0)
            }

            /// Parses hex with or without a `0x` prefix.
            pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
                array_from_prefixed_hex(s).map(Self)
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl std::str::FromStr for $name {
            type Err = hex::FromHexError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

define_id!(
    /// Identifier of a block, referenced by its children as a parent.
    BlockId,
    BLOCK_ID_LENGTH
);

define_id!(
    /// Identifier of a transaction payload.
    TransactionId,
    TRANSACTION_ID_LENGTH
);

define_id!(
    /// Identifier of a milestone payload.
    MilestoneId,
    MILESTONE_ID_LENGTH
);

define_id!(
    /// Identifier of an alias output.
    AliasId,
    ADDRESS_HASH_LENGTH
);

define_id!(
    /// Identifier of an NFT output.
    NftId,
    ADDRESS_HASH_LENGTH
);

define_id!(
    /// Identifier of a native token: the controlling foundry's alias address,
    /// serial number, and token scheme type.
    NativeTokenId,
    NATIVE_TOKEN_ID_LENGTH
);
