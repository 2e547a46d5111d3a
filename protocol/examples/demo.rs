//! Walkthrough of the block codec.
//!
//! Builds a value transfer, wraps it in a block, encodes it, decodes it
//! back, then shows how the decoder reports a damaged envelope.
//!
//! Run with:
//!   cargo run --example demo

use tangle_protocol::address::Address;
use tangle_protocol::output::{BasicOutput, Output, UnlockCondition};
use tangle_protocol::serde_helpers::to_prefixed_hex;
use tangle_protocol::{
    Block, BlockId, CodecError, Ed25519Signature, Input, TaggedDataPayload, TransactionEssence,
    TransactionId, TransactionPayload, Unlock, UtxoInput, WireCodec,
};

const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

fn section(num: u32, title: &str) {
    println!();
    println!("{BOLD}{CYAN}== Step {num}: {title}{RESET}");
}

fn main() -> Result<(), CodecError> {
    section(1, "Build a transfer");
    let transfer = TransactionPayload {
        essence: TransactionEssence {
            network_id: 14_379_272_398_717_627_559,
            inputs: vec![Input::Utxo(UtxoInput {
                transaction_id: TransactionId::new([0xC4; 32]),
                transaction_output_index: 1,
            })],
            inputs_commitment: [0x2F; 32],
            outputs: vec![Output::Basic(BasicOutput {
                amount: 1_500_000,
                native_tokens: vec![],
                unlock_conditions: vec![UnlockCondition::Address {
                    address: Address::Ed25519 {
                        pub_key_hash: [0x9E; 32],
                    },
                }],
                features: vec![],
            })],
            payload: Some(TaggedDataPayload::new(b"rent".to_vec(), b"october".to_vec())),
        },
        unlocks: vec![Unlock::Signature {
            signature: Ed25519Signature {
                public_key: [0x01; 32],
                signature: [0x02; 64],
            },
        }],
    };
    println!("{DIM}  1 input, 1 output, tagged memo{RESET}");

    section(2, "Encode the block");
    let mut parents = vec![BlockId::new([0xB2; 32]), BlockId::new([0x3A; 32])];
    parents.sort();
    let block = Block::new(parents, Some(transfer.into())).with_nonce(81_726);
    let bytes = block.to_bytes()?;
    println!("  {} bytes", bytes.len());
    println!("{DIM}  {}{RESET}", to_prefixed_hex(&bytes));

    section(3, "Decode it back");
    let decoded = Block::from_bytes(&bytes)?;
    let status = if decoded == block { "identical" } else { "DIFFERENT" };
    println!("{GREEN}  decoded block is {status}{RESET}");

    section(4, "Damage the payload envelope");
    let mut damaged = bytes.clone();
    // The envelope follows the version, the count, and two parents.
    let at = 2 + 2 * 32;
    damaged[at] = damaged[at].wrapping_add(1);
    match Block::from_bytes(&damaged) {
        Ok(_) => println!("{RED}  damaged block decoded{RESET}"),
        Err(err) => println!("{RED}  rejected: {err}{RESET}"),
    }

    println!();
    Ok(())
}
