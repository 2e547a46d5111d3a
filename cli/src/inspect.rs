//! One-screen block summaries for `tangle inspect`.

use tangle_protocol::serde_helpers::to_prefixed_hex;
use tangle_protocol::{Block, Payload, Unlock};

/// Renders `block` as an aligned, line-oriented summary. `size` is the
/// length of the encoded block in bytes.
pub fn summarize(block: &Block, size: usize) -> String {
    let mut out = String::new();
    line(&mut out, "protocol", block.protocol_version);
    line(&mut out, "size", format!("{size} bytes"));
    line(&mut out, "nonce", block.nonce);
    line(&mut out, "parents", block.parents.len());
    for (i, parent) in block.parents.iter().enumerate() {
        line(&mut out, &format!("  [{i}]"), parent);
    }

    match &block.payload {
        None => line(&mut out, "payload", "none"),
        Some(payload) => {
            line(&mut out, "payload", payload.name());
            payload_lines(&mut out, payload);
        }
    }
    out
}

fn payload_lines(out: &mut String, payload: &Payload) {
    match payload {
        Payload::TaggedData(tagged) => {
            line(out, "  tag", display_bytes(&tagged.tag));
            line(out, "  data", format!("{} bytes", tagged.data.len()));
            line(out, "  signed", tagged.is_signed());
        }
        Payload::Transaction(tx) => {
            let essence = &tx.essence;
            line(out, "  networkId", essence.network_id);
            line(out, "  inputs", essence.inputs.len());
            line(out, "  outputs", essence.outputs.len());
            let total: u128 = essence.outputs.iter().map(|o| u128::from(o.amount())).sum();
            line(out, "  amount", total);
            let signatures = tx
                .unlocks
                .iter()
                .filter(|u| matches!(u, Unlock::Signature { .. }))
                .count();
            line(
                out,
                "  unlocks",
                format!("{} ({signatures} signatures)", tx.unlocks.len()),
            );
            if let Some(tagged) = &essence.payload {
                line(out, "  tag", display_bytes(&tagged.tag));
            }
        }
        Payload::Milestone(ms) => {
            line(out, "  index", ms.index);
            line(out, "  timestamp", ms.timestamp);
            line(out, "  previous", ms.previous_milestone_id);
            line(out, "  options", ms.options.len());
            line(out, "  signatures", ms.signatures.len());
        }
        Payload::TreasuryTransaction(tx) => {
            line(out, "  milestone", tx.input.milestone_id);
            line(out, "  amount", tx.output.amount);
        }
    }
}

/// Shows printable tags as text and anything else as hex.
fn display_bytes(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "(empty)".to_string();
    }
    match std::str::from_utf8(bytes) {
        Ok(s) if s.chars().all(|c| !c.is_control()) => format!("{s:?}"),
        _ => to_prefixed_hex(bytes),
    }
}

fn line(out: &mut String, label: &str, value: impl std::fmt::Display) {
    out.push_str(&format!("{label:<12} {value}\n"));
}
