//! Message types for the NFT vault

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, HexBinary, Uint128};

use common::bridge::Message;
use common::vault::{
    BindingsResponse, BridgedTokenResponse, Config, PendingOwnerResponse, SiblingsResponse,
};
use common::{BridgedBinding, CanonicalRecord};

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    /// Registry owner
    pub owner: String,
    /// Bridge contract on this chain
    pub bridge: String,
    /// Chain id of this chain
    pub chain_id: u64,
    /// Denom used for bridge fees and attached value
    pub native_denom: String,
    /// Code id of the bridged collection template
    pub bridged_code_id: u64,
    /// Seconds between migrations of one canonical collection (default 90 days)
    pub min_migration_delay: Option<u64>,
}

/// Outbound non-fungible transfer
#[cw_serde]
pub struct BridgeNftOp {
    pub dest_chain_id: u64,
    pub dest_owner: Option<String>,
    /// Recipient on the destination chain
    pub to: String,
    /// cw721 collection on this chain, canonical or bridged
    pub token: String,
    /// At most ten distinct ids
    pub token_ids: Vec<String>,
    /// One zero per id
    pub amounts: Vec<Uint128>,
    pub gas_limit: u64,
    pub fee: Uint128,
    pub refund_to: Option<String>,
    pub memo: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Lock or burn token ids and send them to the sibling vault on another
    /// chain. Canonical collections require the vault to be an approved operator.
    SendNft(BridgeNftOp),

    /// Delivery of a sibling's transfer (bridge only)
    OnMessageInvocation { data: Binary },

    /// Recall of an undeliverable transfer sent by this vault (bridge only)
    OnMessageRecalled {
        message: Message,
        message_hash: HexBinary,
    },

    /// Replace the bridged collection of a foreign canonical collection
    ChangeBridgedToken {
        canonical: CanonicalRecord,
        bridged: String,
    },

    SetSibling {
        chain_id: u64,
        vault: Option<String>,
    },
    UpdateConfig {
        bridge: Option<String>,
        bridged_code_id: Option<u64>,
        min_migration_delay: Option<u64>,
    },
    Pause {},
    Unpause {},
    TransferOwnership { new_owner: String },
    AcceptOwnership {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},

    #[returns(SiblingsResponse)]
    Siblings {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    #[returns(PendingOwnerResponse)]
    PendingOwner {},

    #[returns(BridgedTokenResponse)]
    BridgedToken { chain_id: u64, addr: String },

    #[returns(Option<BridgedBinding>)]
    CanonicalToken { bridged: String },

    #[returns(BindingsResponse)]
    Bindings {
        start_after: Option<String>,
        limit: Option<u32>,
    },
}
