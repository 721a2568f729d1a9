//! Message types for the token vault

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, HexBinary, Uint128};

use common::bridge::Message;
use common::vault::{
    BindingsResponse, BridgedTokenResponse, Config, PendingOwnerResponse, SiblingsResponse,
};
use common::{BridgedBinding, CanonicalRecord};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

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
    /// Code id of the bridged token template
    pub bridged_code_id: u64,
    /// Seconds between migrations of one canonical token (default 90 days)
    pub min_migration_delay: Option<u64>,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Outbound fungible transfer
#[cw_serde]
pub struct BridgeTransferOp {
    /// Destination chain id; must have a registered sibling
    pub dest_chain_id: u64,
    /// Account acting for the message on the destination chain (defaults to sender)
    pub dest_owner: Option<String>,
    /// Recipient on the destination chain
    pub to: String,
    /// cw20 token on this chain, canonical or bridged
    pub token: String,
    pub amount: Uint128,
    /// Gas budget for the delivery
    pub gas_limit: u64,
    /// Part of the attached native funds kept by the bridge
    pub fee: Uint128,
    pub refund_to: Option<String>,
    pub memo: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Transfers
    // ========================================================================
    /// Lock or burn tokens and send them to the sibling vault on another chain.
    /// The sender must have approved the vault for canonical tokens.
    /// Attached native funds pay `fee`; the remainder is delivered with the tokens.
    SendToken(BridgeTransferOp),

    /// Delivery of a sibling's transfer (bridge only)
    OnMessageInvocation { data: Binary },

    /// Recall of an undeliverable transfer sent by this vault (bridge only)
    OnMessageRecalled {
        message: Message,
        message_hash: HexBinary,
    },

    // ========================================================================
    // Registry (owner only)
    // ========================================================================
    /// Replace the bridged instance of a foreign canonical token
    ChangeBridgedToken {
        canonical: CanonicalRecord,
        bridged: String,
    },

    // ========================================================================
    // Configuration (owner only)
    // ========================================================================
    /// Register (or remove with `vault: None`) the sibling vault on a chain
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

// ============================================================================
// Query Messages
// ============================================================================

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

    /// Active bridged instance of a canonical token
    #[returns(BridgedTokenResponse)]
    BridgedToken { chain_id: u64, addr: String },

    /// Binding of a bridged instance, including blacklisted ones
    #[returns(Option<BridgedBinding>)]
    CanonicalToken { bridged: String },

    #[returns(BindingsResponse)]
    Bindings {
        start_after: Option<String>,
        limit: Option<u32>,
    },
}
