//! Canonical ↔ bridged token registry.
//!
//! Two maps make up the registry:
//! - forward: `(canonical chain id, canonical address) -> active bridged address`
//! - reverse: `bridged address -> BridgedBinding`
//!
//! Every forward entry has a reverse entry pointing back at the same record.
//! Reverse entries are never removed; a migrated binding stays there with
//! `blacklisted = true`.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Order, StdResult, Storage};
use cw_storage_plus::{Bound, Map};

use crate::canonical::CanonicalRecord;
use crate::error::ContractError;

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

#[cw_serde]
pub struct BridgedBinding {
    pub bridged: Addr,
    pub canonical: CanonicalRecord,
    pub blacklisted: bool,
}

pub struct TokenRegistry<'a> {
    forward: Map<'a, (u64, &'a str), Addr>,
    reverse: Map<'a, &'a Addr, BridgedBinding>,
}

impl<'a> TokenRegistry<'a> {
    pub const fn new(forward_namespace: &'a str, reverse_namespace: &'a str) -> Self {
        Self {
            forward: Map::new(forward_namespace),
            reverse: Map::new(reverse_namespace),
        }
    }

    pub fn lookup_by_bridged(
        &self,
        storage: &dyn Storage,
        bridged: &Addr,
    ) -> StdResult<Option<BridgedBinding>> {
        self.reverse.may_load(storage, bridged)
    }

    pub fn lookup_canonical(
        &self,
        storage: &dyn Storage,
        chain_id: u64,
        addr: &str,
    ) -> StdResult<Option<Addr>> {
        self.forward.may_load(storage, (chain_id, addr))
    }

    pub fn is_blacklisted(&self, storage: &dyn Storage, token: &Addr) -> StdResult<bool> {
        Ok(self
            .reverse
            .may_load(storage, token)?
            .map(|binding| binding.blacklisted)
            .unwrap_or(false))
    }

    /// Registers a freshly deployed instance. Only the factory writes here.
    pub fn bind(
        &self,
        storage: &mut dyn Storage,
        canonical: &CanonicalRecord,
        bridged: &Addr,
    ) -> Result<(), ContractError> {
        if self.forward.has(storage, canonical.key()) {
            return Err(ContractError::InvalidNewBridged {
                reason: format!(
                    "canonical {} on chain {} already has an active binding",
                    canonical.addr, canonical.chain_id
                ),
            });
        }
        if self.reverse.has(storage, bridged) {
            return Err(ContractError::InvalidNewBridged {
                reason: format!("{} is already bound", bridged),
            });
        }

        self.install(storage, canonical, bridged)
    }

    /// Points `canonical` at `new_bridged`, blacklisting the previous binding.
    ///
    /// Returns the previous bridged address, if any. Ownership of the new
    /// instance and the migration delay are checked by the caller.
    pub fn rebind(
        &self,
        storage: &mut dyn Storage,
        canonical: &CanonicalRecord,
        new_bridged: &Addr,
    ) -> Result<Option<Addr>, ContractError> {
        if let Some(existing) = self.reverse.may_load(storage, new_bridged)? {
            if existing.blacklisted {
                return Err(ContractError::Blacklisted {
                    token: new_bridged.to_string(),
                });
            }
            return Err(ContractError::InvalidNewBridged {
                reason: format!(
                    "{} is already bound to {} on chain {}",
                    new_bridged, existing.canonical.addr, existing.canonical.chain_id
                ),
            });
        }

        let old_bridged = self.forward.may_load(storage, canonical.key())?;
        if let Some(old) = &old_bridged {
            let mut old_binding = self.reverse.load(storage, old)?;
            if !old_binding.canonical.same_identity(canonical) {
                return Err(ContractError::CanonicalMismatch {
                    chain_id: canonical.chain_id,
                    addr: canonical.addr.clone(),
                });
            }
            old_binding.blacklisted = true;
            self.reverse.save(storage, old, &old_binding)?;
        }

        self.install(storage, canonical, new_bridged)?;
        Ok(old_bridged)
    }

    /// Paginated reverse-map listing, blacklisted bindings included.
    pub fn bindings(
        &self,
        storage: &dyn Storage,
        start_after: Option<&Addr>,
        limit: Option<u32>,
    ) -> StdResult<Vec<BridgedBinding>> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
        let start = start_after.map(Bound::exclusive);

        self.reverse
            .range(storage, start, None, Order::Ascending)
            .take(limit)
            .map(|item| item.map(|(_, binding)| binding))
            .collect()
    }

    fn install(
        &self,
        storage: &mut dyn Storage,
        canonical: &CanonicalRecord,
        bridged: &Addr,
    ) -> Result<(), ContractError> {
        let binding = BridgedBinding {
            bridged: bridged.clone(),
            canonical: canonical.clone(),
            blacklisted: false,
        };
        self.reverse.save(storage, bridged, &binding)?;
        self.forward.save(storage, canonical.key(), bridged)?;
        Ok(())
    }
}
