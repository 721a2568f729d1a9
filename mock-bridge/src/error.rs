use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Invalid funds: expected {expected}, got {got}")]
    InvalidFunds { expected: Uint128, got: Uint128 },

    #[error("Message is addressed to chain {chain_id}")]
    WrongChain { chain_id: u64 },

    #[error("Message {hash} already processed")]
    AlreadyProcessed { hash: String },

    #[error("Message {hash} not found")]
    MessageNotFound { hash: String },

    #[error("Message {hash} cannot be recalled")]
    NotRecallable { hash: String },

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}
