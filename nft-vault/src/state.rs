//! State definitions for the NFT vault
//!
//! Shared vault state lives in `common::vault`; this module holds the
//! continuations of one transaction.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary, Uint128};
use cw_storage_plus::Item;

use common::{CanonicalRecord, NftQuantity};

pub const CONTRACT_NAME: &str = "crates.io:xvault-nft-vault";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Bridge SendMessage
pub const SEND_REPLY_ID: u64 = 1;
/// Instantiation of a bridged collection
pub const DEPLOY_REPLY_ID: u64 = 2;

/// Local collection of the transfer waiting for the bridge's send reply
pub const PENDING_SEND: Item<Addr> = Item::new("pending_send");

#[cw_serde]
pub enum ArrivalKind {
    Delivery { src_chain_id: u64 },
    Recall,
}

/// Inbound settlement, parked while its bridged collection is deployed
#[cw_serde]
pub struct Arrival {
    pub kind: ArrivalKind,
    pub message_hash: HexBinary,
    pub canonical: CanonicalRecord,
    pub from: String,
    pub recipient: Addr,
    pub quantity: NftQuantity,
    pub value: Uint128,
}

pub const PENDING_ARRIVAL: Item<Arrival> = Item::new("pending_arrival");
