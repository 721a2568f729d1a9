//! Messages understood by bridged token instances.
//!
//! Only the vault-facing subset lives here; each bridged contract extends it
//! with its standard token surface.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};

#[cw_serde]
pub struct BridgedTokenInstantiateMsg {
    pub vault: String,
    pub src_chain_id: u64,
    pub src_token: String,
    pub decimals: u8,
    pub symbol: String,
    pub name: String,
}

#[cw_serde]
pub struct BridgedNftInstantiateMsg {
    pub vault: String,
    pub src_chain_id: u64,
    pub src_token: String,
    pub symbol: String,
    pub name: String,
}

#[cw_serde]
pub enum BridgedTokenExecuteMsg {
    Mint {
        recipient: String,
        amount: Uint128,
    },
    BridgeBurn {
        owner: String,
        amount: Uint128,
    },
    ChangeMigrationStatus {
        migrating_address: Option<String>,
        migrating_inbound: bool,
    },
}

#[cw_serde]
pub enum BridgedNftExecuteMsg {
    Mint {
        token_id: String,
        owner: String,
        token_uri: Option<String>,
    },
    BridgeBurn {
        owner: String,
        token_id: String,
    },
    ChangeMigrationStatus {
        migrating_address: Option<String>,
        migrating_inbound: bool,
    },
}

/// Migration state of a bridged instance.
///
/// Outbound (`migrating_inbound = false`): the instance has been superseded
/// by `migrating_address`; it no longer mints and holders move their balance
/// by burning. Inbound: `migrating_address` is the superseded instance and
/// may mint here on behalf of migrating holders.
#[cw_serde]
#[derive(Default)]
pub struct MigrationStatus {
    pub migrating_address: Option<Addr>,
    pub migrating_inbound: bool,
}

impl MigrationStatus {
    /// Replacement instance, when migrating out.
    pub fn superseded_by(&self) -> Option<&Addr> {
        self.migrating_address
            .as_ref()
            .filter(|_| !self.migrating_inbound)
    }

    /// True when `sender` is the superseded instance allowed to mint here.
    pub fn is_inbound_source(&self, sender: &Addr) -> bool {
        self.migrating_inbound && self.migrating_address.as_ref() == Some(sender)
    }
}

#[cw_serde]
pub struct BridgedInfoResponse {
    pub vault: Addr,
    pub src_chain_id: u64,
    pub src_token: String,
    pub migration: MigrationStatus,
}
