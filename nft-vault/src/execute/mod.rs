//! Execute handlers for the NFT vault.
//!
//! - `deposit` - SendNft and its SendMessage continuation
//! - `delivery` - OnMessageInvocation and OnMessageRecalled settlement
//! - `factory` - bridged collection deployment and migration

mod delivery;
mod deposit;
mod factory;

pub use delivery::*;
pub use deposit::*;
pub use factory::*;
