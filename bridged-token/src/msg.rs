use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;
use cw20::Expiration;

pub use common::bridged::BridgedTokenInstantiateMsg as InstantiateMsg;

#[cw_serde]
pub enum ExecuteMsg {
    Transfer {
        recipient: String,
        amount: Uint128,
    },
    IncreaseAllowance {
        spender: String,
        amount: Uint128,
        expires: Option<Expiration>,
    },
    DecreaseAllowance {
        spender: String,
        amount: Uint128,
        expires: Option<Expiration>,
    },
    TransferFrom {
        owner: String,
        recipient: String,
        amount: Uint128,
    },
    /// Vault mint, or a migrating holder's mint forwarded by the superseded instance
    Mint {
        recipient: String,
        amount: Uint128,
    },
    /// Vault burn for a return trip
    BridgeBurn {
        owner: String,
        amount: Uint128,
    },
    /// Holder migration to the replacement instance
    Burn {
        amount: Uint128,
    },
    ChangeMigrationStatus {
        migrating_address: Option<String>,
        migrating_inbound: bool,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(cw20::BalanceResponse)]
    Balance { address: String },
    #[returns(cw20::TokenInfoResponse)]
    TokenInfo {},
    #[returns(cw20::AllowanceResponse)]
    Allowance { owner: String, spender: String },
    #[returns(Option<cw20::MinterResponse>)]
    Minter {},
    #[returns(common::bridged::BridgedInfoResponse)]
    BridgedInfo {},
}
