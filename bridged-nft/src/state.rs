use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Empty};
use cw_storage_plus::Item;

use common::bridged::MigrationStatus;

pub const CONTRACT_NAME: &str = "crates.io:xvault-bridged-nft";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Bridged ids carry no metadata extension.
pub type Extension = Option<Empty>;

/// Tokens, approvals and collection info use the cw721-base layout; the
/// bridge items below sit beside it.
pub type Collection<'a> = cw721_base::Cw721Contract<'a, Extension, Empty, Empty, Empty>;

#[cw_serde]
pub struct BridgeInfo {
    /// Vault allowed to mint, burn and change migration status
    pub vault: Addr,
    pub src_chain_id: u64,
    pub src_token: String,
}

pub const BRIDGE_INFO: Item<BridgeInfo> = Item::new("bridge_info");

pub const MIGRATION: Item<MigrationStatus> = Item::new("migration");
