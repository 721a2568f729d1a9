//! Error types shared by the fungible and non-fungible vaults.

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only owner can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only pending owner can accept")]
    UnauthorizedPendingOwner,

    #[error("No pending owner change")]
    NoPendingOwner,

    #[error("Unauthorized caller: {reason}")]
    UnauthorizedCaller { reason: String },

    // ========================================================================
    // Vault State Errors
    // ========================================================================

    #[error("Vault is paused")]
    VaultPaused,

    #[error("Reentrant call rejected")]
    Reentrancy,

    // ========================================================================
    // Transfer Validation Errors
    // ========================================================================

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Invalid token: {reason}")]
    InvalidToken { reason: String },

    #[error("Invalid recipient: {reason}")]
    InvalidRecipient { reason: String },

    #[error("Invalid destination chain: {chain_id}")]
    InvalidDestination { chain_id: u64 },

    #[error("Token {token_id} is not owned by {sender}")]
    NotTokenOwner { token_id: String, sender: String },

    #[error("Token is blacklisted: {token}")]
    Blacklisted { token: String },

    #[error("Unsupported asset: {token} does not expose the expected interface")]
    UnsupportedAsset { token: String },

    #[error("Insufficient fee: expected {expected}, got {got}")]
    InsufficientFee { expected: Uint128, got: Uint128 },

    // ========================================================================
    // Registry Errors
    // ========================================================================

    #[error("Invalid new bridged token: {reason}")]
    InvalidNewBridged { reason: String },

    #[error("Canonical mismatch: stored record for {addr} on chain {chain_id} differs")]
    CanonicalMismatch { chain_id: u64, addr: String },

    #[error("Ownership mismatch: bridged token admin must be the vault owner")]
    OwnershipMismatch,

    #[error("Migration too soon: next migration allowed at {allowed_at}")]
    MigrationTooSoon { allowed_at: u64 },

    // ========================================================================
    // Payload & Reply Errors
    // ========================================================================

    #[error("Malformed payload: {reason}")]
    MalformedPayload { reason: String },

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}
