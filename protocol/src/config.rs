//! # Protocol Configuration & Constants
//!
//! Every discriminator, fixed width, and size limit of the wire format lives
//! here. Encoders and decoders read from the same table, so a value changed
//! in one place changes in both directions at once. Round-trip correctness
//! depends on that.
//!
//! Changing any of these after blocks have been issued is a hard fork.

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// Protocol version written into a block when the caller does not set one.
pub const DEFAULT_PROTOCOL_VERSION: u8 = 2;

// ---------------------------------------------------------------------------
// Primitive Sizes
// ---------------------------------------------------------------------------

/// Width of a `u8` on the wire.
pub const UINT8_SIZE: usize = 1;

/// Width of a `u16` on the wire.
pub const UINT16_SIZE: usize = 2;

/// Width of a `u32` on the wire.
pub const UINT32_SIZE: usize = 4;

/// Width of a `u64` on the wire.
pub const UINT64_SIZE: usize = 8;

/// Width of a `u256` amount (native tokens, token schemes).
pub const UINT256_SIZE: usize = 32;

/// Width of a payload discriminator. Payload types are 32-bit.
pub const TYPE_LENGTH: usize = UINT32_SIZE;

/// Width of a "small" discriminator (essence, inputs, outputs, unlocks...).
pub const SMALL_TYPE_LENGTH: usize = UINT8_SIZE;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Length of a block identifier.
pub const BLOCK_ID_LENGTH: usize = 32;

/// Length of a transaction identifier.
pub const TRANSACTION_ID_LENGTH: usize = 32;

/// Length of a milestone identifier.
pub const MILESTONE_ID_LENGTH: usize = 32;

/// Length of the inputs commitment carried by a transaction essence.
pub const INPUTS_COMMITMENT_SIZE: usize = 32;

/// Length of a merkle root carried by a milestone.
pub const MERKLE_ROOT_LENGTH: usize = 32;

/// Length of an Ed25519 public key hash, alias id, or NFT id.
pub const ADDRESS_HASH_LENGTH: usize = 32;

/// Length of a native token id: alias address (33) + serial (4) + scheme (1).
pub const NATIVE_TOKEN_ID_LENGTH: usize = 38;

/// Length of a legacy tail transaction hash in a migration receipt.
pub const TAIL_TRANSACTION_HASH_LENGTH: usize = 49;

/// Ed25519 public key length.
pub const ED25519_PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length.
pub const ED25519_SIGNATURE_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Payload Discriminators
// ---------------------------------------------------------------------------

/// Treasury transaction payload. Only valid inside a milestone receipt.
pub const TREASURY_TRANSACTION_PAYLOAD_TYPE: u32 = 4;

/// Tagged data payload (with the signature/public key extension).
pub const TAGGED_DATA_PAYLOAD_TYPE: u32 = 5;

/// Transaction payload.
pub const TRANSACTION_PAYLOAD_TYPE: u32 = 6;

/// Milestone payload.
pub const MILESTONE_PAYLOAD_TYPE: u32 = 7;

/// The only transaction essence type the codec understands.
pub const TRANSACTION_ESSENCE_TYPE: u8 = 1;

// ---------------------------------------------------------------------------
// Input / Output / Unlock Discriminators
// ---------------------------------------------------------------------------

pub const UTXO_INPUT_TYPE: u8 = 0;
pub const TREASURY_INPUT_TYPE: u8 = 1;

pub const TREASURY_OUTPUT_TYPE: u8 = 2;
pub const BASIC_OUTPUT_TYPE: u8 = 3;
pub const ALIAS_OUTPUT_TYPE: u8 = 4;
pub const FOUNDRY_OUTPUT_TYPE: u8 = 5;
pub const NFT_OUTPUT_TYPE: u8 = 6;

pub const SIGNATURE_UNLOCK_TYPE: u8 = 0;
pub const REFERENCE_UNLOCK_TYPE: u8 = 1;
pub const ALIAS_UNLOCK_TYPE: u8 = 2;
pub const NFT_UNLOCK_TYPE: u8 = 3;

pub const ED25519_SIGNATURE_TYPE: u8 = 0;

pub const ED25519_ADDRESS_TYPE: u8 = 0;
pub const ALIAS_ADDRESS_TYPE: u8 = 8;
pub const NFT_ADDRESS_TYPE: u8 = 16;

pub const ADDRESS_UNLOCK_CONDITION_TYPE: u8 = 0;
pub const STORAGE_DEPOSIT_RETURN_UNLOCK_CONDITION_TYPE: u8 = 1;
pub const TIMELOCK_UNLOCK_CONDITION_TYPE: u8 = 2;
pub const EXPIRATION_UNLOCK_CONDITION_TYPE: u8 = 3;
pub const STATE_CONTROLLER_ADDRESS_UNLOCK_CONDITION_TYPE: u8 = 4;
pub const GOVERNOR_ADDRESS_UNLOCK_CONDITION_TYPE: u8 = 5;
pub const IMMUTABLE_ALIAS_UNLOCK_CONDITION_TYPE: u8 = 6;

pub const SENDER_FEATURE_TYPE: u8 = 0;
pub const ISSUER_FEATURE_TYPE: u8 = 1;
pub const METADATA_FEATURE_TYPE: u8 = 2;
pub const TAG_FEATURE_TYPE: u8 = 3;

pub const SIMPLE_TOKEN_SCHEME_TYPE: u8 = 0;

pub const RECEIPT_MILESTONE_OPTION_TYPE: u8 = 0;
pub const PROTOCOL_PARAMS_MILESTONE_OPTION_TYPE: u8 = 1;

// ---------------------------------------------------------------------------
// Structural Limits
// ---------------------------------------------------------------------------

/// A block references at least this many parents.
pub const MIN_NUMBER_PARENTS: usize = 1;

/// A block references at most this many parents.
pub const MAX_NUMBER_PARENTS: usize = 8;

/// Maximum tag length of a tagged data payload, in bytes.
pub const MAX_TAG_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Minimum Footprints
// ---------------------------------------------------------------------------

/// Smallest possible payload envelope: a zero length field and nothing else.
pub const MIN_PAYLOAD_LENGTH: usize = UINT32_SIZE;

/// Smallest block: version, parent count, one parent, empty envelope, nonce.
pub const MIN_BLOCK_LENGTH: usize =
    UINT8_SIZE + UINT8_SIZE + BLOCK_ID_LENGTH + MIN_PAYLOAD_LENGTH + UINT64_SIZE;

/// Smallest tagged data payload: type plus four zero length prefixes.
pub const MIN_TAGGED_DATA_PAYLOAD_LENGTH: usize =
    TYPE_LENGTH + UINT8_SIZE + UINT32_SIZE + UINT8_SIZE + UINT8_SIZE;

/// Smallest transaction essence: type, network id, empty input list,
/// commitment, empty output list, empty payload envelope.
pub const MIN_TRANSACTION_ESSENCE_LENGTH: usize = SMALL_TYPE_LENGTH
    + UINT64_SIZE
    + UINT16_SIZE
    + INPUTS_COMMITMENT_SIZE
    + UINT16_SIZE
    + MIN_PAYLOAD_LENGTH;

/// Smallest transaction payload: type, minimal essence, empty unlock list.
pub const MIN_TRANSACTION_PAYLOAD_LENGTH: usize =
    TYPE_LENGTH + MIN_TRANSACTION_ESSENCE_LENGTH + UINT16_SIZE;

/// Smallest milestone payload: fixed header fields, one parent, empty
/// metadata, no options, no signatures.
pub const MIN_MILESTONE_PAYLOAD_LENGTH: usize = TYPE_LENGTH
    + UINT32_SIZE
    + UINT32_SIZE
    + UINT8_SIZE
    + MILESTONE_ID_LENGTH
    + UINT8_SIZE
    + BLOCK_ID_LENGTH
    + MERKLE_ROOT_LENGTH
    + MERKLE_ROOT_LENGTH
    + UINT16_SIZE
    + UINT8_SIZE
    + UINT8_SIZE;

/// Treasury transaction payloads have a fixed size.
pub const MIN_TREASURY_TRANSACTION_PAYLOAD_LENGTH: usize = TYPE_LENGTH
    + SMALL_TYPE_LENGTH
    + MILESTONE_ID_LENGTH
    + SMALL_TYPE_LENGTH
    + UINT64_SIZE;
