use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Binary;
use cw721::Expiration;

pub use common::bridged::BridgedNftInstantiateMsg as InstantiateMsg;

/// cw721 surface plus the vault-facing messages of
/// `common::bridged::BridgedNftExecuteMsg`.
#[cw_serde]
pub enum ExecuteMsg {
    TransferNft {
        recipient: String,
        token_id: String,
    },
    SendNft {
        contract: String,
        token_id: String,
        msg: Binary,
    },
    Approve {
        spender: String,
        token_id: String,
        expires: Option<Expiration>,
    },
    Revoke {
        spender: String,
        token_id: String,
    },
    ApproveAll {
        operator: String,
        expires: Option<Expiration>,
    },
    RevokeAll {
        operator: String,
    },
    /// Vault mint, or a migrating holder's mint forwarded by the superseded collection
    Mint {
        token_id: String,
        owner: String,
        token_uri: Option<String>,
    },
    /// Vault burn for a return trip
    BridgeBurn {
        owner: String,
        token_id: String,
    },
    /// Holder migration to the replacement collection
    Burn {
        token_id: String,
    },
    ChangeMigrationStatus {
        migrating_address: Option<String>,
        migrating_inbound: bool,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(cw721::OwnerOfResponse)]
    OwnerOf {
        token_id: String,
        include_expired: Option<bool>,
    },
    #[returns(cw721::ApprovalResponse)]
    Approval {
        token_id: String,
        spender: String,
        include_expired: Option<bool>,
    },
    #[returns(cw721::ApprovalsResponse)]
    Approvals {
        token_id: String,
        include_expired: Option<bool>,
    },
    #[returns(cw721::OperatorsResponse)]
    AllOperators {
        owner: String,
        include_expired: Option<bool>,
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(cw721::NumTokensResponse)]
    NumTokens {},
    #[returns(cw721::ContractInfoResponse)]
    ContractInfo {},
    #[returns(cw721::NftInfoResponse<crate::state::Extension>)]
    NftInfo { token_id: String },
    #[returns(cw721::AllNftInfoResponse<crate::state::Extension>)]
    AllNftInfo {
        token_id: String,
        include_expired: Option<bool>,
    },
    #[returns(cw721::TokensResponse)]
    Tokens {
        owner: String,
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(cw721::TokensResponse)]
    AllTokens {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(common::bridged::BridgedInfoResponse)]
    BridgedInfo {},
}
