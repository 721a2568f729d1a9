use cosmwasm_schema::cw_serde;
use cw_storage_plus::{Item, Map};

use common::bridge::{Context, Message};

pub const CONTRACT_NAME: &str = "crates.io:xvault-mock-bridge";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DELIVER_REPLY_ID: u64 = 1;
pub const RECALL_REPLY_ID: u64 = 2;

#[cw_serde]
pub struct Config {
    pub chain_id: u64,
    pub native_denom: String,
}

#[cw_serde]
pub enum MessageStatus {
    /// Sent from this chain, not recalled
    Sent,
    /// Delivered on this chain
    Delivered,
    /// Sent from this chain and returned to its sender
    Recalled,
}

pub const CONFIG: Item<Config> = Item::new("config");

pub const NEXT_MESSAGE_ID: Item<u64> = Item::new("next_message_id");

/// message hash => message sent from this chain
pub const SENT: Map<&[u8], Message> = Map::new("sent");

/// message hash => status
pub const STATUS: Map<&[u8], MessageStatus> = Map::new("status");

/// Set only while a delivery callback executes
pub const DELIVERY_CONTEXT: Item<Context> = Item::new("delivery_context");

/// Set only while a recall callback executes
pub const RECALL_CONTEXT: Item<Context> = Item::new("recall_context");
