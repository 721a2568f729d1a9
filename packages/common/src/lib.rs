//! Common - Shared Types and Utilities for XVault Contracts
//!
//! This package provides the pieces both vault variants are built from:
//! the canonical/bridged token registry, the versioned transfer payload,
//! the bridge and bridged-instance interfaces, the reentrancy guard, and the
//! vault configuration with its owner-only handlers.

pub mod bridge;
pub mod bridged;
pub mod canonical;
pub mod error;
pub mod guard;
pub mod instruction;
pub mod registry;
pub mod vault;

pub use canonical::CanonicalRecord;
pub use error::ContractError;
pub use guard::NonReentrant;
pub use instruction::{NftQuantity, TransferInstruction, PAYLOAD_VERSION};
pub use registry::{BridgedBinding, TokenRegistry};
