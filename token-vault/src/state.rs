//! State definitions for the token vault
//!
//! Configuration, siblings and the token registry are shared with the NFT
//! vault and live in `common::vault`. This module adds the continuation
//! state carried between a handler and its replies within one transaction.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary, Uint128};
use cw_storage_plus::Item;

use common::vault::Route;
use common::CanonicalRecord;

pub const CONTRACT_NAME: &str = "crates.io:xvault-token-vault";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Reply IDs
// ============================================================================

/// TransferFrom of a canonical token into the vault
pub const DEPOSIT_REPLY_ID: u64 = 1;
/// Bridge SendMessage
pub const SEND_REPLY_ID: u64 = 2;
/// Instantiation of a bridged token instance
pub const DEPLOY_REPLY_ID: u64 = 3;

// ============================================================================
// Continuations
// ============================================================================

/// Canonical deposit waiting for its TransferFrom to settle
#[cw_serde]
pub struct PendingDeposit {
    pub token: Addr,
    pub canonical: CanonicalRecord,
    pub from: Addr,
    pub to: String,
    /// Vault balance before the transfer
    pub balance_before: Uint128,
    pub route: Route,
}

pub const PENDING_DEPOSIT: Item<PendingDeposit> = Item::new("pending_deposit");

/// Local token of the transfer waiting for the bridge's send reply
pub const PENDING_SEND: Item<Addr> = Item::new("pending_send");

#[cw_serde]
pub enum ArrivalKind {
    /// Delivered by the bridge from a sibling on `src_chain_id`
    Delivery { src_chain_id: u64 },
    /// Returned by the bridge to the depositor
    Recall,
}

/// Inbound settlement, parked while its bridged instance is deployed
#[cw_serde]
pub struct Arrival {
    pub kind: ArrivalKind,
    pub message_hash: HexBinary,
    pub canonical: CanonicalRecord,
    pub from: String,
    pub recipient: Addr,
    pub amount: Uint128,
    /// Native value attached by the bridge
    pub value: Uint128,
}

pub const PENDING_ARRIVAL: Item<Arrival> = Item::new("pending_arrival");
