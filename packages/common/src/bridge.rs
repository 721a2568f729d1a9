//! Bridge interface.
//!
//! The vaults never verify cross-chain messages themselves. They hand
//! outbound messages to a bridge contract and accept inbound callbacks only
//! from it, asking the bridge for the context of the call in progress.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{from_json, Binary, HexBinary, Uint128};

use crate::error::ContractError;

/// Cross-chain message as stored and relayed by the bridge.
#[cw_serde]
pub struct Message {
    /// Assigned by the source bridge
    pub id: u64,
    /// Sending contract, assigned by the source bridge
    pub from: String,
    /// Assigned by the source bridge
    pub src_chain_id: u64,
    pub dest_chain_id: u64,
    /// Account that initiated the transfer on the source chain
    pub src_owner: String,
    /// Account entitled to act for the message on the destination chain
    pub dest_owner: String,
    /// Contract invoked on the destination chain
    pub to: String,
    pub refund_to: Option<String>,
    /// Native value delivered with the invocation
    pub value: Uint128,
    /// Native fee kept by the bridge
    pub fee: Uint128,
    pub gas_limit: u64,
    /// Serialized callback executed on `to`
    pub data: Binary,
    pub memo: String,
}

#[cw_serde]
pub enum BridgeExecuteMsg {
    SendMessage { message: Message },
}

/// Data returned by `SendMessage`.
#[cw_serde]
pub struct SendMessageResponse {
    pub message_hash: HexBinary,
    pub message: Message,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum BridgeQueryMsg {
    /// Context of the delivery currently executing; errors outside one
    #[returns(Context)]
    DeliveryContext {},
    /// Context of the recall currently executing; errors outside one
    #[returns(Context)]
    RecallContext {},
}

#[cw_serde]
pub struct Context {
    pub message_hash: HexBinary,
    /// Originating contract on the source chain
    pub from: String,
    pub src_chain_id: u64,
}

/// Callbacks a bridge invokes on a vault.
#[cw_serde]
pub enum VaultCallbackMsg {
    OnMessageInvocation {
        data: Binary,
    },
    OnMessageRecalled {
        message: Message,
        message_hash: HexBinary,
    },
}

/// Extracts the transfer instruction a vault put into `message.data`.
pub fn invocation_payload(message: &Message) -> Result<Binary, ContractError> {
    match from_json::<VaultCallbackMsg>(&message.data) {
        Ok(VaultCallbackMsg::OnMessageInvocation { data }) => Ok(data),
        Ok(_) => Err(ContractError::MalformedPayload {
            reason: "message does not carry a delivery invocation".to_string(),
        }),
        Err(e) => Err(ContractError::MalformedPayload {
            reason: e.to_string(),
        }),
    }
}
