//! # Payloads
//!
//! Blocks, transaction essences and milestone receipts each carry at most
//! one payload, wrapped in the same envelope:
//!
//! ```text
//! length  u32           0 = no payload, nothing follows
//! body    [length]      starts with a u32 discriminator
//! ```
//!
//! The dispatcher reads the envelope, peeks the discriminator and hands the
//! body to the codec registered for it in [`PAYLOAD_CODECS`]. Each codec
//! re-reads its own discriminator, so every payload type can also be
//! decoded on its own. The body is confined to its envelope: a body that
//! needs more than `length` bytes is truncated, and one that needs fewer
//! fails with `PayloadLengthMismatch`.
//!
//! Containers restrict what they accept through an admission check that
//! runs after the discriminator is known but before the body is decoded,
//! which also bounds nesting depth on hostile input.
//!
//! ```text
//! tagged_data.rs : type 5, tag/data/signature/publicKey
//! transaction/   : type 6, essence + unlocks
//! milestone.rs   : type 7, milestone with options and signatures
//! treasury.rs    : type 4, treasury input to treasury output
//! ```

mod milestone;
mod tagged_data;
mod transaction;
mod treasury;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

pub use milestone::{
    MigratedFundsEntry, MilestoneOption, MilestonePayload, ProtocolParamsMilestoneOption,
    ReceiptMilestoneOption,
};
pub use tagged_data::TaggedDataPayload;
pub use transaction::{TransactionEssence, TransactionPayload};
pub use treasury::TreasuryTransactionPayload;

use crate::config::{
    MILESTONE_PAYLOAD_TYPE, TAGGED_DATA_PAYLOAD_TYPE, TRANSACTION_PAYLOAD_TYPE,
    TREASURY_TRANSACTION_PAYLOAD_TYPE,
};
use crate::error::{CodecError, CodecResult};
use crate::stream::{ReadStream, WriteStream};

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Every payload type the ledger knows about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    Transaction(Box<TransactionPayload>),
    Milestone(Box<MilestonePayload>),
    TreasuryTransaction(Box<TreasuryTransactionPayload>),
    TaggedData(Box<TaggedDataPayload>),
}

impl Payload {
    /// The wire discriminator of this payload.
    pub fn kind(&self) -> u32 {
        match self {
            Self::Transaction(_) => TRANSACTION_PAYLOAD_TYPE,
            Self::Milestone(_) => MILESTONE_PAYLOAD_TYPE,
            Self::TreasuryTransaction(_) => TREASURY_TRANSACTION_PAYLOAD_TYPE,
            Self::TaggedData(_) => TAGGED_DATA_PAYLOAD_TYPE,
        }
    }

    pub fn name(&self) -> &'static str {
        payload_type_name(self.kind())
    }

    fn encode_at(&self, stream: &mut WriteStream, path: &str) -> CodecResult<()> {
        match self {
            Self::Transaction(p) => p.encode_at(stream, path),
            Self::Milestone(p) => p.encode_at(stream, path),
            Self::TreasuryTransaction(p) => p.encode_at(stream, path),
            Self::TaggedData(p) => p.encode_at(stream, path),
        }
    }
}

impl From<TransactionPayload> for Payload {
    fn from(payload: TransactionPayload) -> Self {
        Self::Transaction(Box::new(payload))
    }
}

impl From<MilestonePayload> for Payload {
    fn from(payload: MilestonePayload) -> Self {
        Self::Milestone(Box::new(payload))
    }
}

impl From<TreasuryTransactionPayload> for Payload {
    fn from(payload: TreasuryTransactionPayload) -> Self {
        Self::TreasuryTransaction(Box::new(payload))
    }
}

impl From<TaggedDataPayload> for Payload {
    fn from(payload: TaggedDataPayload) -> Self {
        Self::TaggedData(Box::new(payload))
    }
}

// ---------------------------------------------------------------------------
// Dispatch Table
// ---------------------------------------------------------------------------

type DecodeFn = fn(&mut ReadStream<'_>, &str) -> CodecResult<Payload>;

/// One entry of the payload dispatch table.
pub struct PayloadCodec {
    pub kind: u32,
    pub name: &'static str,
    decode: DecodeFn,
}

/// Registered payload codecs, keyed by discriminator.
pub static PAYLOAD_CODECS: [PayloadCodec; 4] = [
    PayloadCodec {
        kind: TREASURY_TRANSACTION_PAYLOAD_TYPE,
        name: "treasury_transaction",
        decode: decode_treasury_transaction,
    },
    PayloadCodec {
        kind: TAGGED_DATA_PAYLOAD_TYPE,
        name: "tagged_data",
        decode: decode_tagged_data,
    },
    PayloadCodec {
        kind: TRANSACTION_PAYLOAD_TYPE,
        name: "transaction",
        decode: decode_transaction,
    },
    PayloadCodec {
        kind: MILESTONE_PAYLOAD_TYPE,
        name: "milestone",
        decode: decode_milestone,
    },
];

fn decode_treasury_transaction(stream: &mut ReadStream<'_>, path: &str) -> CodecResult<Payload> {
    TreasuryTransactionPayload::decode_at(stream, path).map(Payload::from)
}

fn decode_tagged_data(stream: &mut ReadStream<'_>, path: &str) -> CodecResult<Payload> {
    TaggedDataPayload::decode_at(stream, path).map(Payload::from)
}

fn decode_transaction(stream: &mut ReadStream<'_>, path: &str) -> CodecResult<Payload> {
    TransactionPayload::decode_at(stream, path).map(Payload::from)
}

fn decode_milestone(stream: &mut ReadStream<'_>, path: &str) -> CodecResult<Payload> {
    MilestonePayload::decode_at(stream, path).map(Payload::from)
}

/// Looks up the codec registered for a discriminator.
pub fn payload_codec(kind: u32) -> Option<&'static PayloadCodec> {
    PAYLOAD_CODECS.iter().find(|codec| codec.kind == kind)
}

/// Friendly name of a payload discriminator, `"unknown"` if unregistered.
pub fn payload_type_name(kind: u32) -> &'static str {
    payload_codec(kind).map_or("unknown", |codec| codec.name)
}

// ---------------------------------------------------------------------------
// Envelope Codec
// ---------------------------------------------------------------------------

/// Reads a payload envelope, accepting any registered payload type.
pub fn decode_payload(stream: &mut ReadStream<'_>, path: &str) -> CodecResult<Option<Payload>> {
    decode_payload_admitting(stream, path, |_, _| Ok(()))
}

/// Reads a payload envelope. `admit` sees the path and discriminator of a
/// known payload type before its body is decoded and may reject it.
pub(crate) fn decode_payload_admitting<F>(
    stream: &mut ReadStream<'_>,
    path: &str,
    admit: F,
) -> CodecResult<Option<Payload>>
where
    F: FnOnce(&str, u32) -> CodecResult<()>,
{
    let declared = stream.read_u32(path)? as usize;
    if !stream.has_remaining(declared) {
        debug!(path, declared, remaining = stream.unused(), "payload overruns buffer");
        return Err(CodecError::PayloadOverrun {
            path: path.to_string(),
            declared,
            remaining: stream.unused(),
        });
    }
    if declared == 0 {
        trace!(path, "no payload");
        return Ok(None);
    }

    // The discriminator is judged before the envelope length is trusted.
    let kind = stream.peek_u32(&format!("{path}.type"))?;
    let codec = payload_codec(kind).ok_or_else(|| {
        debug!(path, kind, "unknown payload type");
        CodecError::UnknownPayloadType {
            path: path.to_string(),
            actual: kind,
        }
    })?;
    admit(path, kind)?;
    trace!(path, kind = codec.name, length = declared, "decoding payload");

    let mut body = ReadStream::new(stream.read_bytes(path, declared)?);
    let payload = (codec.decode)(&mut body, path)?;
    if body.unused() != 0 {
        return Err(CodecError::PayloadLengthMismatch {
            path: path.to_string(),
            declared,
            consumed: body.position(),
        });
    }
    Ok(Some(payload))
}

/// Writes a payload envelope. `None` writes a zero length and nothing else.
pub fn encode_payload(
    stream: &mut WriteStream,
    path: &str,
    payload: Option<&Payload>,
) -> CodecResult<()> {
    encode_envelope(stream, path, payload.map(|p| move |s: &mut WriteStream| p.encode_at(s, path)))
}

/// Writes an envelope around whatever `body` produces, backpatching the
/// length once the body is complete.
pub(crate) fn encode_envelope<F>(stream: &mut WriteStream, path: &str, body: Option<F>) -> CodecResult<()>
where
    F: FnOnce(&mut WriteStream) -> CodecResult<()>,
{
    match body {
        None => {
            stream.write_u32(0);
            Ok(())
        }
        Some(body) => {
            let length = stream.write_length_prefixed(path, body)?;
            trace!(path, length, "payload written");
            Ok(())
        }
    }
}
