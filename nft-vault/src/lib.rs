//! XVault NFT Vault - Cross-Chain Non-Fungible Token Vault
//!
//! The non-fungible counterpart of the token vault. A transfer moves a batch
//! of up to ten token ids of one cw721 collection; every id travels with a
//! zero companion amount.
//!
//! # Outbound Flow (SendNft)
//! 1. Ids of a collection native to this chain are transferred into the vault
//! 2. Ids of a bridged collection are burned from the sender instead
//! 3. The transfer instruction is handed to the bridge for the sibling vault
//!
//! # Inbound Flow (OnMessageInvocation)
//! Native ids are released from the vault; foreign ids are minted on the
//! bridged collection, deployed on first use.
//!
//! # Recall (OnMessageRecalled)
//! Undeliverable ids go back to the depositor on this chain.

pub mod contract;
mod execute;
pub mod msg;
pub mod state;

pub use common::ContractError;
