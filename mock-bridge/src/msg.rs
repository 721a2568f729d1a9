use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::HexBinary;

use common::bridge::{Context, Message};

use crate::state::MessageStatus;

#[cw_serde]
pub struct InstantiateMsg {
    pub chain_id: u64,
    pub native_denom: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Source side: accept a message from a contract on this chain
    SendMessage { message: Message },
    /// Destination side: deliver a relayed message
    ProcessMessage { message: Message },
    /// Source side: return an undelivered message to its sender
    RecallMessage { message: Message },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Context)]
    DeliveryContext {},
    #[returns(Context)]
    RecallContext {},
    #[returns(Message)]
    Message { hash: HexBinary },
    #[returns(StatusResponse)]
    MessageStatus { hash: HexBinary },
}

#[cw_serde]
pub struct StatusResponse {
    pub status: Option<MessageStatus>,
}
