//! Unlock conditions: who may spend an output, and when.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::config::{
    ADDRESS_UNLOCK_CONDITION_TYPE, EXPIRATION_UNLOCK_CONDITION_TYPE,
    GOVERNOR_ADDRESS_UNLOCK_CONDITION_TYPE, IMMUTABLE_ALIAS_UNLOCK_CONDITION_TYPE,
    STATE_CONTROLLER_ADDRESS_UNLOCK_CONDITION_TYPE, STORAGE_DEPOSIT_RETURN_UNLOCK_CONDITION_TYPE,
    TIMELOCK_UNLOCK_CONDITION_TYPE,
};
use crate::error::{CodecError, CodecResult};
use crate::serde_helpers::u64_string;
use crate::stream::{ReadStream, WireCodec, WriteStream};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnlockCondition {
    Address {
        address: Address,
    },
    #[serde(rename_all = "camelCase")]
    StorageDepositReturn {
        return_address: Address,
        #[serde(with = "u64_string")]
        amount: u64,
    },
    #[serde(rename_all = "camelCase")]
    Timelock { unix_time: u32 },
    #[serde(rename_all = "camelCase")]
    Expiration {
        return_address: Address,
        unix_time: u32,
    },
    StateControllerAddress {
        address: Address,
    },
    GovernorAddress {
        address: Address,
    },
    ImmutableAliasAddress {
        address: Address,
    },
}

impl UnlockCondition {
    pub fn kind(&self) -> u8 {
        match self {
            Self::Address { .. } => ADDRESS_UNLOCK_CONDITION_TYPE,
            Self::StorageDepositReturn { .. } => STORAGE_DEPOSIT_RETURN_UNLOCK_CONDITION_TYPE,
            Self::Timelock { .. } => TIMELOCK_UNLOCK_CONDITION_TYPE,
            Self::Expiration { .. } => EXPIRATION_UNLOCK_CONDITION_TYPE,
            Self::StateControllerAddress { .. } => STATE_CONTROLLER_ADDRESS_UNLOCK_CONDITION_TYPE,
            Self::GovernorAddress { .. } => GOVERNOR_ADDRESS_UNLOCK_CONDITION_TYPE,
            Self::ImmutableAliasAddress { .. } => IMMUTABLE_ALIAS_UNLOCK_CONDITION_TYPE,
        }
    }

    pub(crate) fn decode_at(stream: &mut ReadStream<'_>, path: &str) -> CodecResult<Self> {
        let condition = match stream.read_u8(path)? {
            ADDRESS_UNLOCK_CONDITION_TYPE => Self::Address {
                address: Address::decode_at(stream, path)?,
            },
            STORAGE_DEPOSIT_RETURN_UNLOCK_CONDITION_TYPE => Self::StorageDepositReturn {
                return_address: Address::decode_at(stream, path)?,
                amount: stream.read_u64(path)?,
            },
            TIMELOCK_UNLOCK_CONDITION_TYPE => Self::Timelock {
                unix_time: stream.read_u32(path)?,
            },
            EXPIRATION_UNLOCK_CONDITION_TYPE => Self::Expiration {
                return_address: Address::decode_at(stream, path)?,
                unix_time: stream.read_u32(path)?,
            },
            STATE_CONTROLLER_ADDRESS_UNLOCK_CONDITION_TYPE => Self::StateControllerAddress {
                address: Address::decode_at(stream, path)?,
            },
            GOVERNOR_ADDRESS_UNLOCK_CONDITION_TYPE => Self::GovernorAddress {
                address: Address::decode_at(stream, path)?,
            },
            IMMUTABLE_ALIAS_UNLOCK_CONDITION_TYPE => Self::ImmutableAliasAddress {
                address: Address::decode_at(stream, path)?,
            },
            other => {
                return Err(CodecError::UnknownVariant {
                    path: path.to_string(),
                    kind: "unlock condition",
                    actual: other,
                })
            }
        };
        Ok(condition)
    }
}

impl WireCodec for UnlockCondition {
    const PATH: &'static str = "unlockCondition";

    fn decode(stream: &mut ReadStream<'_>) -> CodecResult<Self> {
        Self::decode_at(stream, Self::PATH)
    }

    fn encode(&self, stream: &mut WriteStream) -> CodecResult<()> {
        stream.write_u8(self.kind());
        match self {
            Self::Address { address }
            | Self::StateControllerAddress { address }
            | Self::GovernorAddress { address }
            | Self::ImmutableAliasAddress { address } => address.encode(stream),
            Self::StorageDepositReturn {
                return_address,
                amount,
            } => {
                return_address.encode(stream)?;
                stream.write_u64(*amount);
                Ok(())
            }
            Self::Timelock { unix_time } => {
                stream.write_u32(*unix_time);
                Ok(())
            }
            Self::Expiration {
                return_address,
                unix_time,
            } => {
                return_address.encode(stream)?;
                stream.write_u32(*unix_time);
                Ok(())
            }
        }
    }
}

pub(crate) fn decode_unlock_conditions(
    stream: &mut ReadStream<'_>,
    path: &str,
) -> CodecResult<Vec<UnlockCondition>> {
    let count = stream.read_u8(&format!("{path}.unlockConditionsCount"))? as usize;
    (0..count)
        .map(|i| UnlockCondition::decode_at(stream, &format!("{path}.unlockCondition{i}")))
        .collect()
}

pub(crate) fn encode_unlock_conditions(
    stream: &mut WriteStream,
    path: &str,
    conditions: &[UnlockCondition],
) -> CodecResult<()> {
    stream.write_count_u8(&format!("{path}.unlockConditionsCount"), conditions.len())?;
    conditions.iter().try_for_each(|c| c.encode(stream))
}
