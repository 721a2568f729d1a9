//! Execute handlers for the token vault.
//!
//! - `deposit` - SendToken and its TransferFrom / SendMessage continuations
//! - `delivery` - OnMessageInvocation and OnMessageRecalled settlement
//! - `factory` - bridged token deployment and migration

mod delivery;
mod deposit;
mod factory;

pub use delivery::*;
pub use deposit::*;
pub use factory::*;
