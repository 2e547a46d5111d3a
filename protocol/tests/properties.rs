//! Property-based tests for the block codec.
//!
//! Generates arbitrary canonical blocks and checks that they survive the
//! wire and JSON forms unchanged, and that no mangled input makes the
//! decoder panic.

use proptest::prelude::*;

use tangle_protocol::address::Address;
use tangle_protocol::output::{BasicOutput, Output, TreasuryOutput, UnlockCondition};
use tangle_protocol::payload::{
    MigratedFundsEntry, MilestoneOption, ProtocolParamsMilestoneOption, ReceiptMilestoneOption,
};
use tangle_protocol::{
    Block, BlockId, Ed25519Signature, Input, MilestoneId, MilestonePayload, Payload,
    TaggedDataPayload, TransactionEssence, TransactionId, TransactionPayload, TreasuryInput,
    TreasuryTransactionPayload, Unlock, UtxoInput, WireCodec,
};

// ============================================================================
// Strategies
// ============================================================================

fn arb_parents() -> impl Strategy<Value = Vec<BlockId>> {
    prop::collection::btree_set(any::<[u8; 32]>(), 1..=8)
        .prop_map(|set| set.into_iter().map(BlockId::new).collect())
}

fn arb_tagged_data() -> impl Strategy<Value = TaggedDataPayload> {
    (
        prop::collection::vec(any::<u8>(), 0..=64),
        prop::collection::vec(any::<u8>(), 0..256),
        prop::option::of((
            prop::collection::vec(any::<u8>(), 64),
            prop::collection::vec(any::<u8>(), 32),
        )),
    )
        .prop_map(|(tag, data, signed)| {
            let payload = TaggedDataPayload::new(tag, data);
            match signed {
                Some((signature, public_key)) => payload.with_signature(signature, public_key),
                None => payload,
            }
        })
}

fn arb_address() -> impl Strategy<Value = Address> {
    any::<[u8; 32]>().prop_map(|pub_key_hash| Address::Ed25519 { pub_key_hash })
}

fn arb_output() -> impl Strategy<Value = Output> {
    (any::<u64>(), arb_address(), prop::option::of(any::<u32>())).prop_map(
        |(amount, address, timelock)| {
            let mut unlock_conditions = vec![UnlockCondition::Address { address }];
            if let Some(unix_time) = timelock {
                unlock_conditions.push(UnlockCondition::Timelock { unix_time });
            }
            Output::Basic(BasicOutput {
                amount,
                native_tokens: vec![],
                unlock_conditions,
                features: vec![],
            })
        },
    )
}

fn arb_signature() -> impl Strategy<Value = Ed25519Signature> {
    (any::<[u8; 32]>(), prop::collection::vec(any::<u8>(), 64)).prop_map(|(public_key, sig)| {
        let mut signature = [0u8; 64];
        signature.copy_from_slice(&sig);
        Ed25519Signature {
            public_key,
            signature,
        }
    })
}

fn arb_unlock() -> impl Strategy<Value = Unlock> {
    prop_oneof![
        arb_signature().prop_map(|signature| Unlock::Signature { signature }),
        any::<u16>().prop_map(|index| Unlock::Reference { index }),
    ]
}

fn arb_transaction() -> impl Strategy<Value = TransactionPayload> {
    (
        any::<u64>(),
        prop::collection::vec((any::<[u8; 32]>(), any::<u16>()), 0..4),
        any::<[u8; 32]>(),
        prop::collection::vec(arb_output(), 0..4),
        prop::option::of(arb_tagged_data()),
        prop::collection::vec(arb_unlock(), 0..4),
    )
        .prop_map(
            |(network_id, inputs, inputs_commitment, outputs, payload, unlocks)| {
                TransactionPayload {
                    essence: TransactionEssence {
                        network_id,
                        inputs: inputs
                            .into_iter()
                            .map(|(id, index)| {
                                Input::Utxo(UtxoInput {
                                    transaction_id: TransactionId::new(id),
                                    transaction_output_index: index,
                                })
                            })
                            .collect(),
                        inputs_commitment,
                        outputs,
                        payload,
                    },
                    unlocks,
                }
            },
        )
}

fn arb_treasury_transaction() -> impl Strategy<Value = TreasuryTransactionPayload> {
    (any::<[u8; 32]>(), any::<u64>()).prop_map(|(id, amount)| TreasuryTransactionPayload {
        input: TreasuryInput {
            milestone_id: MilestoneId::new(id),
        },
        output: TreasuryOutput { amount },
    })
}

fn arb_migrated_funds() -> impl Strategy<Value = MigratedFundsEntry> {
    (prop::collection::vec(any::<u8>(), 49), arb_address(), any::<u64>()).prop_map(
        |(hash, address, deposit)| {
            let mut tail_transaction_hash = [0u8; 49];
            tail_transaction_hash.copy_from_slice(&hash);
            MigratedFundsEntry {
                tail_transaction_hash,
                address,
                deposit,
            }
        },
    )
}

fn arb_milestone_option() -> impl Strategy<Value = MilestoneOption> {
    prop_oneof![
        (
            any::<u32>(),
            any::<bool>(),
            prop::collection::vec(arb_migrated_funds(), 0..3),
            arb_treasury_transaction(),
        )
            .prop_map(|(migrated_at, last, funds, transaction)| {
                MilestoneOption::Receipt(ReceiptMilestoneOption {
                    migrated_at,
                    last,
                    funds,
                    transaction,
                })
            }),
        (any::<u32>(), any::<u8>(), prop::collection::vec(any::<u8>(), 0..32)).prop_map(
            |(target_milestone_index, protocol_version, params)| {
                MilestoneOption::ProtocolParams(ProtocolParamsMilestoneOption {
                    target_milestone_index,
                    protocol_version,
                    params,
                })
            }
        ),
    ]
}

fn arb_milestone() -> impl Strategy<Value = MilestonePayload> {
    (
        (any::<u32>(), any::<u32>(), any::<u8>()),
        any::<[u8; 32]>(),
        arb_parents(),
        any::<[u8; 32]>(),
        any::<[u8; 32]>(),
        prop::collection::vec(any::<u8>(), 0..32),
        prop::collection::vec(arb_milestone_option(), 0..3),
        prop::collection::vec(arb_signature(), 0..3),
    )
        .prop_map(
            |(
                (index, timestamp, protocol_version),
                previous,
                parents,
                inclusion_merkle_root,
                applied_merkle_root,
                metadata,
                options,
                signatures,
            )| MilestonePayload {
                index,
                timestamp,
                protocol_version,
                previous_milestone_id: MilestoneId::new(previous),
                parents,
                inclusion_merkle_root,
                applied_merkle_root,
                metadata,
                options,
                signatures,
            },
        )
}

fn arb_payload() -> impl Strategy<Value = Option<Payload>> {
    prop_oneof![
        Just(None),
        arb_tagged_data().prop_map(|p| Some(p.into())),
        arb_transaction().prop_map(|p| Some(p.into())),
        arb_milestone().prop_map(|p| Some(p.into())),
    ]
}

fn arb_block() -> impl Strategy<Value = Block> {
    (arb_parents(), arb_payload(), any::<u64>())
        .prop_map(|(parents, payload, nonce)| Block::new(parents, payload).with_nonce(nonce))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn block_wire_round_trip(block in arb_block()) {
        let bytes = block.to_bytes().unwrap();
        prop_assert_eq!(Block::from_bytes(&bytes).unwrap(), block);
    }

    #[test]
    fn milestone_block_round_trip(milestone in arb_milestone(), parents in arb_parents()) {
        let block = Block::new(parents, Some(milestone.into()));
        let bytes = block.to_bytes().unwrap();
        prop_assert_eq!(Block::from_bytes(&bytes).unwrap(), block);
        for cut in 0..bytes.len() {
            prop_assert!(Block::from_bytes(&bytes[..cut]).is_err());
        }
    }

    #[test]
    fn block_json_round_trip(block in arb_block()) {
        let json = serde_json::to_string(&block).unwrap();
        let parsed: Block = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, block);
    }

    #[test]
    fn reencoding_is_byte_identical(block in arb_block()) {
        let bytes = block.to_bytes().unwrap();
        let again = Block::from_bytes(&bytes).unwrap().to_bytes().unwrap();
        prop_assert_eq!(again, bytes);
    }

    #[test]
    fn every_strict_prefix_is_rejected(block in arb_block(), cut in any::<prop::sample::Index>()) {
        let bytes = block.to_bytes().unwrap();
        let cut = cut.index(bytes.len());
        prop_assert!(Block::from_bytes(&bytes[..cut]).is_err());
    }

    #[test]
    fn appended_bytes_are_rejected(block in arb_block(), extra in prop::collection::vec(any::<u8>(), 1..16)) {
        let mut bytes = block.to_bytes().unwrap();
        bytes.extend_from_slice(&extra);
        prop_assert!(Block::from_bytes(&bytes).is_err());
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = Block::from_bytes(&bytes);
    }

    #[test]
    fn flipped_byte_never_panics(block in arb_block(), at in any::<prop::sample::Index>(), mask in 1u8..=255) {
        let mut bytes = block.to_bytes().unwrap();
        let at = at.index(bytes.len());
        bytes[at] ^= mask;
        let _ = Block::from_bytes(&bytes);
    }
}
