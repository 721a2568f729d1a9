//! Non-reentrancy lock spanning a whole transaction.
//!
//! A handler enters the lock before touching state. When the handler
//! dispatches messages, the lock stays held while they execute and is
//! released from the reply of the last one; otherwise it is released before
//! the handler returns. A failing transaction reverts the flag with
//! everything else.

use cosmwasm_std::{CosmosMsg, Response, StdResult, Storage, SubMsg};
use cw_storage_plus::Item;

use crate::error::ContractError;

/// Reply id carried by the final message of a locked handler.
pub const RELEASE_REPLY_ID: u64 = 0xFFFF;

pub struct NonReentrant<'a> {
    entered: Item<'a, bool>,
}

impl<'a> NonReentrant<'a> {
    pub const fn new(namespace: &'a str) -> Self {
        Self {
            entered: Item::new(namespace),
        }
    }

    pub fn enter(&self, storage: &mut dyn Storage) -> Result<(), ContractError> {
        if self.is_entered(storage)? {
            return Err(ContractError::Reentrancy);
        }
        self.entered.save(storage, &true)?;
        Ok(())
    }

    pub fn exit(&self, storage: &mut dyn Storage) {
        self.entered.remove(storage);
    }

    pub fn is_entered(&self, storage: &dyn Storage) -> StdResult<bool> {
        Ok(self.entered.may_load(storage)?.unwrap_or(false))
    }

    /// Appends `msgs` to `response`, keeping the lock until the last one has
    /// executed.
    pub fn release_after(
        &self,
        storage: &mut dyn Storage,
        response: Response,
        mut msgs: Vec<CosmosMsg>,
    ) -> Response {
        match msgs.pop() {
            Some(last) => response
                .add_messages(msgs)
                .add_submessage(SubMsg::reply_on_success(last, RELEASE_REPLY_ID)),
            None => {
                self.exit(storage);
                response
            }
        }
    }
}
