//! Versioned transfer instruction payload.
//!
//! The instruction is built by the origin vault and carried opaquely by the
//! bridge to the sibling vault. It is JSON encoded with an explicit version
//! tag; a decoder rejects anything it does not recognise instead of guessing.

use std::collections::BTreeSet;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{from_json, to_json_binary, Binary, StdResult, Uint128};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::canonical::CanonicalRecord;
use crate::error::ContractError;

pub const PAYLOAD_VERSION: u8 = 1;

/// Upper bound on token ids moved by one non-fungible transfer.
pub const MAX_NFT_BATCH: usize = 10;

#[cw_serde]
pub struct TransferInstruction<Q> {
    pub version: u8,
    pub canonical: CanonicalRecord,
    /// Depositor on the origin chain, recall target
    pub from: String,
    /// Recipient on the destination chain
    pub to: String,
    /// `Uint128` for fungible transfers, `NftQuantity` otherwise
    pub quantity: Q,
}

impl<Q> TransferInstruction<Q>
where
    Q: Serialize + DeserializeOwned + Clone + std::fmt::Debug + PartialEq + JsonSchema,
{
    pub fn new(
        canonical: CanonicalRecord,
        from: impl Into<String>,
        to: impl Into<String>,
        quantity: Q,
    ) -> Self {
        Self {
            version: PAYLOAD_VERSION,
            canonical,
            from: from.into(),
            to: to.into(),
            quantity,
        }
    }

    pub fn encode(&self) -> StdResult<Binary> {
        to_json_binary(self)
    }

    pub fn decode(data: &Binary) -> Result<Self, ContractError> {
        let instruction: Self =
            from_json(data).map_err(|e| ContractError::MalformedPayload {
                reason: e.to_string(),
            })?;

        if instruction.version != PAYLOAD_VERSION {
            return Err(ContractError::MalformedPayload {
                reason: format!(
                    "unsupported payload version {}, expected {}",
                    instruction.version, PAYLOAD_VERSION
                ),
            });
        }
        instruction.canonical.validate()?;
        if instruction.from.is_empty() {
            return Err(ContractError::MalformedPayload {
                reason: "sender is empty".to_string(),
            });
        }

        Ok(instruction)
    }
}

/// Non-fungible quantity: a set of token ids with an all-zero companion
/// amount list of the same length.
#[cw_serde]
pub struct NftQuantity {
    pub token_ids: Vec<String>,
    pub amounts: Vec<Uint128>,
}

impl NftQuantity {
    pub fn new(token_ids: Vec<String>) -> Self {
        let amounts = vec![Uint128::zero(); token_ids.len()];
        Self { token_ids, amounts }
    }

    pub fn validate(&self) -> Result<(), ContractError> {
        if self.token_ids.is_empty() {
            return Err(ContractError::InvalidAmount {
                reason: "no token ids".to_string(),
            });
        }
        if self.token_ids.len() > MAX_NFT_BATCH {
            return Err(ContractError::InvalidAmount {
                reason: format!(
                    "{} token ids exceed the batch limit of {}",
                    self.token_ids.len(),
                    MAX_NFT_BATCH
                ),
            });
        }
        if self.token_ids.len() != self.amounts.len() {
            return Err(ContractError::InvalidAmount {
                reason: "token ids and amounts differ in length".to_string(),
            });
        }
        if self.amounts.iter().any(|amount| !amount.is_zero()) {
            return Err(ContractError::InvalidAmount {
                reason: "non-fungible amounts must be zero".to_string(),
            });
        }

        let mut seen = BTreeSet::new();
        for token_id in &self.token_ids {
            if token_id.is_empty() {
                return Err(ContractError::InvalidAmount {
                    reason: "empty token id".to_string(),
                });
            }
            if !seen.insert(token_id.as_str()) {
                return Err(ContractError::InvalidAmount {
                    reason: format!("duplicate token id {}", token_id),
                });
            }
        }
        Ok(())
    }

    /// Comma-joined lists for event attributes.
    pub fn token_ids_attr(&self) -> String {
        self.token_ids.join(",")
    }

    pub fn amounts_attr(&self) -> String {
        self.amounts
            .iter()
            .map(|amount| amount.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}
