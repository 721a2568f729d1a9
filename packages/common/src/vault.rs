//! Vault configuration, storage and the handlers both vault variants share.
//!
//! The fungible and non-fungible vaults differ only in how they move assets.
//! Ownership, sibling routing, bridge context checks, fee splitting and the
//! migration rules live here.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    from_json, to_json_binary, Addr, Attribute, BankMsg, Coin, CosmosMsg, Deps, DepsMut, Env,
    HexBinary, MessageInfo, Order, QuerierWrapper, Reply, Response, StdResult, Storage, Timestamp,
    Uint128, WasmMsg,
};
use cw_storage_plus::{Bound, Item, Map};
use cw_utils::parse_reply_execute_data;

use crate::bridge::{
    BridgeExecuteMsg, BridgeQueryMsg, Context, Message, SendMessageResponse, VaultCallbackMsg,
};
use crate::canonical::CanonicalRecord;
use crate::error::ContractError;
use crate::guard::NonReentrant;
use crate::registry::{BridgedBinding, TokenRegistry};

// ============================================================================
// Configuration
// ============================================================================

/// Default minimum time between two migrations of the same canonical token
pub const DEFAULT_MIN_MIGRATION_DELAY: u64 = 90 * 86_400;

#[cw_serde]
pub struct Config {
    /// Registry owner, also the wasm admin of every deployed bridged instance
    pub owner: Addr,
    /// Bridge contract allowed to deliver and recall messages
    pub bridge: Addr,
    /// Chain id of this vault's chain
    pub chain_id: u64,
    /// Denom of attached native value and bridge fees
    pub native_denom: String,
    /// Code id bridged instances are deployed from
    pub bridged_code_id: u64,
    /// Seconds between two migrations of one canonical token
    pub min_migration_delay: u64,
    /// Whether deposits are currently rejected
    pub paused: bool,
}

// ============================================================================
// Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

pub const PENDING_OWNER: Item<Addr> = Item::new("pending_owner");

/// Key: remote chain id, Value: sibling vault address on that chain
pub const SIBLINGS: Map<u64, String> = Map::new("siblings");

pub const REGISTRY: TokenRegistry =
    TokenRegistry::new("canonical_to_bridged", "bridged_to_canonical");

pub const GUARD: NonReentrant = NonReentrant::new("reentrancy_guard");

/// Key: (canonical chain id, canonical address), Value: time of the last migration
pub const LAST_MIGRATION: Map<(u64, &str), Timestamp> = Map::new("last_migration");

// ============================================================================
// Entry Guards
// ============================================================================

/// Takes the lock for a deposit, refusing while paused.
pub fn enter_deposit(storage: &mut dyn Storage) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if config.paused {
        return Err(ContractError::VaultPaused);
    }
    GUARD.enter(storage)?;
    Ok(config)
}

/// Takes the lock for a bridge callback or an owner operation.
pub fn enter(storage: &mut dyn Storage) -> Result<Config, ContractError> {
    GUARD.enter(storage)?;
    Ok(CONFIG.load(storage)?)
}

pub fn assert_owner(config: &Config, sender: &Addr) -> Result<(), ContractError> {
    if *sender != config.owner {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

/// Verifies a delivery callback: it comes from the bridge, while the bridge
/// is delivering a message sent by our sibling on the source chain.
pub fn check_delivery_context(
    deps: Deps,
    info: &MessageInfo,
    config: &Config,
) -> Result<Context, ContractError> {
    if info.sender != config.bridge {
        return Err(ContractError::UnauthorizedCaller {
            reason: format!("{} is not the bridge", info.sender),
        });
    }

    let context: Context = deps
        .querier
        .query_wasm_smart(&config.bridge, &BridgeQueryMsg::DeliveryContext {})
        .map_err(|_| ContractError::UnauthorizedCaller {
            reason: "no delivery in progress".to_string(),
        })?;

    let sibling = SIBLINGS.may_load(deps.storage, context.src_chain_id)?;
    if sibling.as_deref() != Some(context.from.as_str()) {
        return Err(ContractError::UnauthorizedCaller {
            reason: format!(
                "{} on chain {} is not a registered sibling",
                context.from, context.src_chain_id
            ),
        });
    }

    Ok(context)
}

/// Verifies a recall callback: it comes from the bridge, for a message this
/// vault sent, while the bridge is recalling exactly that message.
pub fn check_recall_context(
    deps: Deps,
    env: &Env,
    info: &MessageInfo,
    config: &Config,
    message: &Message,
    message_hash: &HexBinary,
) -> Result<(), ContractError> {
    if info.sender != config.bridge {
        return Err(ContractError::UnauthorizedCaller {
            reason: format!("{} is not the bridge", info.sender),
        });
    }

    let context: Context = deps
        .querier
        .query_wasm_smart(&config.bridge, &BridgeQueryMsg::RecallContext {})
        .map_err(|_| ContractError::UnauthorizedCaller {
            reason: "no recall in progress".to_string(),
        })?;

    if context.message_hash != *message_hash {
        return Err(ContractError::UnauthorizedCaller {
            reason: "recalled message hash does not match the recall context".to_string(),
        });
    }
    if message.from != env.contract.address.as_str() || message.src_chain_id != config.chain_id
    {
        return Err(ContractError::UnauthorizedCaller {
            reason: "recalled message was not sent by this vault".to_string(),
        });
    }

    Ok(())
}

// ============================================================================
// Outbound Routing
// ============================================================================

/// Everything about an outbound message except its payload.
#[cw_serde]
pub struct Route {
    /// Sibling vault invoked on the destination chain
    pub sibling: String,
    pub dest_chain_id: u64,
    pub src_owner: String,
    pub dest_owner: String,
    pub refund_to: Option<String>,
    /// Native value delivered to the recipient
    pub value: Uint128,
    pub fee: Uint128,
    pub gas_limit: u64,
    pub memo: String,
    /// Funds forwarded to the bridge, `value + fee`
    pub funds: Vec<Coin>,
}

/// Outbound transfer parameters as supplied by the depositor.
pub struct RouteRequest {
    pub dest_chain_id: u64,
    pub dest_owner: Option<String>,
    pub gas_limit: u64,
    pub fee: Uint128,
    pub refund_to: Option<String>,
    pub memo: Option<String>,
}

impl Route {
    /// Validates the destination and splits attached funds into fee and value.
    pub fn resolve(
        storage: &dyn Storage,
        config: &Config,
        info: &MessageInfo,
        request: RouteRequest,
    ) -> Result<Self, ContractError> {
        if request.dest_chain_id == config.chain_id {
            return Err(ContractError::InvalidDestination {
                chain_id: request.dest_chain_id,
            });
        }
        let sibling = SIBLINGS
            .may_load(storage, request.dest_chain_id)?
            .ok_or(ContractError::InvalidDestination {
                chain_id: request.dest_chain_id,
            })?;

        let mut attached = Uint128::zero();
        for coin in &info.funds {
            if coin.denom != config.native_denom {
                return Err(ContractError::InvalidAmount {
                    reason: format!("unexpected denom {}", coin.denom),
                });
            }
            attached += coin.amount;
        }
        if attached < request.fee {
            return Err(ContractError::InsufficientFee {
                expected: request.fee,
                got: attached,
            });
        }

        let funds = if attached.is_zero() {
            vec![]
        } else {
            vec![Coin::new(attached.u128(), config.native_denom.clone())]
        };

        Ok(Self {
            sibling,
            dest_chain_id: request.dest_chain_id,
            src_owner: info.sender.to_string(),
            dest_owner: request
                .dest_owner
                .unwrap_or_else(|| info.sender.to_string()),
            refund_to: request.refund_to,
            value: attached - request.fee,
            fee: request.fee,
            gas_limit: request.gas_limit,
            memo: request.memo.unwrap_or_default(),
            funds,
        })
    }

    /// Bridge `SendMessage` call carrying `instruction` to the sibling vault.
    pub fn into_send_msg(
        self,
        config: &Config,
        vault: &Addr,
        instruction: cosmwasm_std::Binary,
    ) -> StdResult<CosmosMsg> {
        let message = Message {
            id: 0,
            from: vault.to_string(),
            src_chain_id: config.chain_id,
            dest_chain_id: self.dest_chain_id,
            src_owner: self.src_owner,
            dest_owner: self.dest_owner,
            to: self.sibling,
            refund_to: self.refund_to,
            value: self.value,
            fee: self.fee,
            gas_limit: self.gas_limit,
            data: to_json_binary(&VaultCallbackMsg::OnMessageInvocation { data: instruction })?,
            memo: self.memo,
        };

        Ok(WasmMsg::Execute {
            contract_addr: config.bridge.to_string(),
            msg: to_json_binary(&BridgeExecuteMsg::SendMessage { message })?,
            funds: self.funds,
        }
        .into())
    }
}

/// Reads the bridge's `SendMessageResponse` out of a send reply.
pub fn parse_send_reply(reply: Reply) -> Result<SendMessageResponse, ContractError> {
    let res = parse_reply_execute_data(reply).map_err(|e| ContractError::MalformedPayload {
        reason: e.to_string(),
    })?;
    let data = res.data.ok_or_else(|| ContractError::MalformedPayload {
        reason: "bridge returned no message data".to_string(),
    })?;
    Ok(from_json(&data)?)
}

/// Native value forwarded to a recipient after the asset transfer.
pub fn native_transfer(config: &Config, to: &Addr, value: Uint128) -> Option<CosmosMsg> {
    if value.is_zero() {
        return None;
    }
    Some(
        BankMsg::Send {
            to_address: to.to_string(),
            amount: vec![Coin::new(value.u128(), config.native_denom.clone())],
        }
        .into(),
    )
}

/// Native value attached to a bridge callback.
pub fn attached_native(config: &Config, info: &MessageInfo) -> Uint128 {
    info.funds
        .iter()
        .filter(|coin| coin.denom == config.native_denom)
        .map(|coin| coin.amount)
        .sum()
}

/// Recipient of a delivery: a valid address that is not the vault itself.
pub fn validate_recipient(
    deps: Deps,
    env: &Env,
    recipient: &str,
) -> Result<Addr, ContractError> {
    if recipient.is_empty() {
        return Err(ContractError::InvalidRecipient {
            reason: "recipient is empty".to_string(),
        });
    }
    let addr = deps
        .api
        .addr_validate(recipient)
        .map_err(|e| ContractError::InvalidRecipient {
            reason: e.to_string(),
        })?;
    if addr == env.contract.address {
        return Err(ContractError::InvalidRecipient {
            reason: "recipient is the vault".to_string(),
        });
    }
    Ok(addr)
}

// ============================================================================
// Migration Rules
// ============================================================================

/// Checks a proposed replacement instance before the registry rebinds to it.
///
/// The canonical token must live on another chain and the new instance must
/// be administered by the registry owner.
pub fn check_replacement(
    deps: Deps,
    config: &Config,
    canonical: &CanonicalRecord,
    bridged: &str,
) -> Result<Addr, ContractError> {
    canonical
        .validate()
        .map_err(|e| ContractError::InvalidNewBridged {
            reason: e.to_string(),
        })?;
    if canonical.chain_id == config.chain_id {
        return Err(ContractError::InvalidNewBridged {
            reason: "canonical token is native to this chain".to_string(),
        });
    }

    let bridged = deps
        .api
        .addr_validate(bridged)
        .map_err(|e| ContractError::InvalidNewBridged {
            reason: e.to_string(),
        })?;
    check_instance_admin(&deps.querier, config, &bridged)?;
    Ok(bridged)
}

fn check_instance_admin(
    querier: &QuerierWrapper,
    config: &Config,
    bridged: &Addr,
) -> Result<(), ContractError> {
    let info = querier
        .query_wasm_contract_info(bridged)
        .map_err(|e| ContractError::InvalidNewBridged {
            reason: e.to_string(),
        })?;
    if info.admin.as_deref() != Some(config.owner.as_str()) {
        return Err(ContractError::OwnershipMismatch);
    }
    Ok(())
}

/// Enforces the minimum delay between migrations of one canonical token and
/// records this migration.
pub fn record_migration(
    storage: &mut dyn Storage,
    env: &Env,
    config: &Config,
    canonical: &CanonicalRecord,
) -> Result<(), ContractError> {
    if let Some(last) = LAST_MIGRATION.may_load(storage, canonical.key())? {
        let allowed_at = last.plus_seconds(config.min_migration_delay);
        if env.block.time < allowed_at {
            return Err(ContractError::MigrationTooSoon {
                allowed_at: allowed_at.seconds(),
            });
        }
    }
    LAST_MIGRATION.save(storage, canonical.key(), &env.block.time)?;
    Ok(())
}

// ============================================================================
// Owner Operations
// ============================================================================

/// Register, replace or (with `vault = None`) remove the sibling vault on a
/// remote chain.
pub fn execute_set_sibling(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u64,
    vault: Option<String>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info.sender)?;

    if chain_id == 0 || chain_id == config.chain_id {
        return Err(ContractError::InvalidDestination { chain_id });
    }

    let res = Response::new()
        .add_attribute("action", "set_sibling")
        .add_attribute("chain_id", chain_id.to_string());

    match vault {
        Some(vault) if !vault.is_empty() => {
            SIBLINGS.save(deps.storage, chain_id, &vault)?;
            Ok(res.add_attribute("vault", vault))
        }
        _ => {
            SIBLINGS.remove(deps.storage, chain_id);
            Ok(res.add_attribute("vault", "none"))
        }
    }
}

pub fn execute_update_config(
    deps: DepsMut,
    info: MessageInfo,
    bridge: Option<String>,
    bridged_code_id: Option<u64>,
    min_migration_delay: Option<u64>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info.sender)?;

    let mut attrs = vec![Attribute::new("action", "update_config")];
    if let Some(bridge) = bridge {
        config.bridge = deps.api.addr_validate(&bridge)?;
        attrs.push(Attribute::new("bridge", bridge));
    }
    if let Some(code_id) = bridged_code_id {
        config.bridged_code_id = code_id;
        attrs.push(Attribute::new("bridged_code_id", code_id.to_string()));
    }
    if let Some(delay) = min_migration_delay {
        config.min_migration_delay = delay;
        attrs.push(Attribute::new("min_migration_delay", delay.to_string()));
    }
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attributes(attrs))
}

/// Pause deposits. Deliveries and recalls keep working so that value in
/// flight can still land.
pub fn execute_pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info.sender)?;

    config.paused = true;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "pause"))
}

pub fn execute_unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info.sender)?;

    config.paused = false;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "unpause"))
}

pub fn execute_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info.sender)?;

    let new_owner = deps.api.addr_validate(&new_owner)?;
    PENDING_OWNER.save(deps.storage, &new_owner)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_ownership")
        .add_attribute("pending_owner", new_owner))
}

pub fn execute_accept_ownership(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let pending = PENDING_OWNER
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingOwner)?;
    if info.sender != pending {
        return Err(ContractError::UnauthorizedPendingOwner);
    }

    let mut config = CONFIG.load(deps.storage)?;
    config.owner = pending.clone();
    CONFIG.save(deps.storage, &config)?;
    PENDING_OWNER.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("action", "accept_ownership")
        .add_attribute("owner", pending))
}

// ============================================================================
// Queries
// ============================================================================

#[cw_serde]
pub struct SiblingResponse {
    pub chain_id: u64,
    pub vault: String,
}

#[cw_serde]
pub struct SiblingsResponse {
    pub siblings: Vec<SiblingResponse>,
}

#[cw_serde]
pub struct PendingOwnerResponse {
    pub pending_owner: Option<Addr>,
}

#[cw_serde]
pub struct BridgedTokenResponse {
    pub bridged: Option<Addr>,
}

#[cw_serde]
pub struct BindingsResponse {
    pub bindings: Vec<BridgedBinding>,
}

pub fn query_config(deps: Deps) -> StdResult<Config> {
    CONFIG.load(deps.storage)
}

pub fn query_siblings(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<SiblingsResponse> {
    let limit = limit.unwrap_or(10).min(30) as usize;
    let start = start_after.map(Bound::exclusive);

    let siblings = SIBLINGS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(chain_id, vault)| SiblingResponse { chain_id, vault }))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(SiblingsResponse { siblings })
}

pub fn query_pending_owner(deps: Deps) -> StdResult<PendingOwnerResponse> {
    Ok(PendingOwnerResponse {
        pending_owner: PENDING_OWNER.may_load(deps.storage)?,
    })
}

pub fn query_bridged_token(
    deps: Deps,
    chain_id: u64,
    addr: String,
) -> StdResult<BridgedTokenResponse> {
    Ok(BridgedTokenResponse {
        bridged: REGISTRY.lookup_canonical(deps.storage, chain_id, &addr)?,
    })
}

pub fn query_canonical_token(deps: Deps, bridged: String) -> StdResult<Option<BridgedBinding>> {
    let bridged = deps.api.addr_validate(&bridged)?;
    REGISTRY.lookup_by_bridged(deps.storage, &bridged)
}

pub fn query_bindings(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<BindingsResponse> {
    let start = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    Ok(BindingsResponse {
        bindings: REGISTRY.bindings(deps.storage, start.as_ref(), limit)?,
    })
}
