use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Item;

use common::bridged::MigrationStatus;

pub const CONTRACT_NAME: &str = "crates.io:xvault-bridged-token";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Token balances and metadata use the cw20-base `TOKEN_INFO` / `BALANCES`
/// layout; this is the bridge-specific part.
#[cw_serde]
pub struct BridgeInfo {
    /// Vault allowed to mint, burn and change migration status
    pub vault: Addr,
    pub src_chain_id: u64,
    pub src_token: String,
}

pub const BRIDGE_INFO: Item<BridgeInfo> = Item::new("bridge_info");

pub const MIGRATION: Item<MigrationStatus> = Item::new("migration");
