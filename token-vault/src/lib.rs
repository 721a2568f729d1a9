//! XVault Token Vault - Cross-Chain Fungible Token Vault
//!
//! Moves cw20 tokens between chains through a message bridge. Each chain runs
//! one vault; vaults on different chains know each other as siblings.
//!
//! # Outbound Flow (SendToken)
//! 1. A token native to this chain is pulled from the sender and locked; the
//!    amount actually received is measured from the vault's balance
//! 2. A bridged token is burned from the sender instead (return trip)
//! 3. The transfer instruction is handed to the bridge for the sibling vault
//!
//! # Inbound Flow (OnMessageInvocation)
//! 1. The bridge calls in while delivering a sibling's message
//! 2. Tokens native to this chain are released from the vault
//! 3. Foreign tokens are minted on their bridged instance, deployed on first use
//!
//! # Recall (OnMessageRecalled)
//! The bridge returns an undeliverable message; the depositor on this chain
//! gets the tokens and the attached native value back.

pub mod contract;
mod execute;
pub mod msg;
pub mod state;

pub use common::ContractError;
