//! Mock Bridge - Message Transport for Vault Tests
//!
//! Each simulated chain gets its own instance. A relayer (the test) reads a
//! message from the source instance and hands it to the destination instance
//! with `ProcessMessage`, which invokes the target contract inside a delivery
//! context. `RecallMessage` on the source instance returns a message to its
//! sender inside a recall context.
//!
//! Message verification is out of scope: whoever calls `ProcessMessage`
//! is trusted.

pub mod contract;
pub mod error;
pub mod hash;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
pub use crate::hash::message_hash;
