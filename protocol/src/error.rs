//! Error types for the wire codec.
//!
//! Every decode and encode operation that can fail returns a [`CodecError`].
//! Each variant names the logical path of the offending field (for example
//! `block.parentBlockId3`) together with the expected and actual value, so
//! a malformed buffer can be diagnosed without a hex dump.
//!
//! Decode errors mean the byte stream is corrupt or adversarial and the
//! whole object must be discarded. Encode errors mean the caller built a
//! value the wire format cannot represent.

use thiserror::Error;

/// Result alias used throughout the codec.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding wire objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Fewer bytes remain than the structure's minimum footprint.
    #[error("{path}: truncated input, {required} bytes required but only {remaining} remain")]
    TruncatedInput {
        /// Field or structure being read.
        path: String,
        /// Bytes the read needed.
        required: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },

    /// Bytes remain after a complete top-level decode.
    #[error("{path}: {unused} bytes of trailing data after decode")]
    TrailingData {
        /// Structure that finished decoding.
        path: String,
        /// Number of unconsumed bytes.
        unused: usize,
    },

    /// A discriminator does not match the codec being invoked.
    #[error("{path}: type mismatch, expected {expected} but found {actual}")]
    TypeMismatch {
        /// Discriminator field.
        path: String,
        /// The fixed value this codec handles.
        expected: u32,
        /// The value found on the wire.
        actual: u32,
    },

    /// The payload discriminator is not in the dispatch table.
    #[error("{path}: unrecognized payload type {actual}")]
    UnknownPayloadType {
        /// Discriminator field.
        path: String,
        /// The value found on the wire.
        actual: u32,
    },

    /// A block carries a payload type that blocks may not contain.
    #[error("{path}: payload type {actual} is not allowed in a block")]
    ForbiddenPayloadType {
        /// Payload field.
        path: String,
        /// The rejected payload type.
        actual: u32,
    },

    /// A nested payload slot carries a payload type it may not contain.
    #[error("{path}: embedded payload type {actual} is not allowed here")]
    ForbiddenEmbeddedPayload {
        /// Embedded payload field.
        path: String,
        /// The rejected payload type.
        actual: u32,
    },

    /// The declared payload length exceeds the remaining buffer.
    #[error("{path}: payload length {declared} exceeds the remaining data {remaining}")]
    PayloadOverrun {
        /// Envelope length field.
        path: String,
        /// Length declared on the wire.
        declared: usize,
        /// Bytes actually left.
        remaining: usize,
    },

    /// The payload body did not occupy exactly the declared envelope length.
    #[error("{path}: payload declared {declared} bytes but its body used {consumed}")]
    PayloadLengthMismatch {
        /// Envelope length field.
        path: String,
        /// Length declared on the wire.
        declared: usize,
        /// Bytes consumed by the body decoder.
        consumed: usize,
    },

    /// More parents than a block may reference.
    #[error("{path}: a maximum of {max} parents is allowed, found {actual}")]
    TooManyParents {
        /// Parent list field.
        path: String,
        /// The limit.
        max: usize,
        /// Number of parents supplied.
        actual: usize,
    },

    /// A block without any parent.
    #[error("{path}: a block must reference at least one parent")]
    MissingParents {
        /// Parent list field.
        path: String,
    },

    /// The same parent appears twice.
    #[error("{path}: duplicate parent at index {index}")]
    DuplicateParents {
        /// Parent list field.
        path: String,
        /// Index of the second occurrence.
        index: usize,
    },

    /// Parents are not in ascending byte order.
    #[error("{path}: parents must be lexicographically sorted, index {index} is out of order")]
    UnsortedParents {
        /// Parent list field.
        path: String,
        /// First index that sorts before its predecessor.
        index: usize,
    },

    /// A tagged data tag exceeds the maximum length.
    #[error("{path}: tag length is {actual}, which exceeds the maximum size of {max}")]
    TagTooLong {
        /// Tag field.
        path: String,
        /// The limit.
        max: usize,
        /// Length supplied or found.
        actual: usize,
    },

    /// A variable field does not fit its length prefix.
    #[error("{path}: length {actual} does not fit the length prefix (max {max})")]
    LengthOverflow {
        /// Field being written.
        path: String,
        /// Largest length the prefix can carry.
        max: usize,
        /// Actual length.
        actual: usize,
    },

    /// A transaction input of a type the container does not accept.
    #[error("{path}: input type {actual} is not allowed here")]
    InvalidInputType {
        /// Input field.
        path: String,
        /// The rejected input type.
        actual: u8,
    },

    /// A transaction output of a type the container does not accept.
    #[error("{path}: output type {actual} is not allowed here")]
    InvalidOutputType {
        /// Output field.
        path: String,
        /// The rejected output type.
        actual: u8,
    },

    /// The transaction essence type is not supported.
    #[error("{path}: unrecognized transaction essence type {actual}")]
    UnsupportedEssenceType {
        /// Essence type field.
        path: String,
        /// The value found on the wire.
        actual: u8,
    },

    /// A small discriminator (input, output, unlock, address, ...) is unknown.
    #[error("{path}: unrecognized {kind} type {actual}")]
    UnknownVariant {
        /// Discriminator field.
        path: String,
        /// What kind of object was being decoded.
        kind: &'static str,
        /// The value found on the wire.
        actual: u8,
    },

    /// A field holds a value its type cannot represent.
    #[error("{path}: invalid value, {reason}")]
    InvalidValue {
        /// Field being read.
        path: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl CodecError {
    /// Returns the logical path of the field that caused the error.
    pub fn path(&self) -> &str {
        match self {
            Self::TruncatedInput { path, .. }
            | Self::TrailingData { path, .. }
            | Self::TypeMismatch { path, .. }
            | Self::UnknownPayloadType { path, .. }
            | Self::ForbiddenPayloadType { path, .. }
            | Self::ForbiddenEmbeddedPayload { path, .. }
            | Self::PayloadOverrun { path, .. }
            | Self::PayloadLengthMismatch { path, .. }
            | Self::TooManyParents { path, .. }
            | Self::MissingParents { path }
            | Self::DuplicateParents { path, .. }
            | Self::UnsortedParents { path, .. }
            | Self::TagTooLong { path, .. }
            | Self::LengthOverflow { path, .. }
            | Self::InvalidInputType { path, .. }
            | Self::InvalidOutputType { path, .. }
            | Self::UnsupportedEssenceType { path, .. }
            | Self::UnknownVariant { path, .. }
            | Self::InvalidValue { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_path_and_sizes() {
        let err = CodecError::TruncatedInput {
            path: "block.nonce".into(),
            required: 8,
            remaining: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("block.nonce"));
        assert!(msg.contains('8'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn path_accessor_covers_unit_like_variants() {
        let err = CodecError::MissingParents {
            path: "block.parents".into(),
        };
        assert_eq!(err.path(), "block.parents");
    }
}
