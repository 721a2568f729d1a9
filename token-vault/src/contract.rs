//! XVault Token Vault - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute and reply handlers
//! - `common::vault` - Configuration, owner operations and shared queries

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use common::guard::RELEASE_REPLY_ID;
use common::vault::{
    execute_accept_ownership, execute_pause, execute_set_sibling, execute_transfer_ownership,
    execute_unpause, execute_update_config, query_bindings, query_bridged_token,
    query_canonical_token, query_config, query_pending_owner, query_siblings, Config, CONFIG,
    DEFAULT_MIN_MIGRATION_DELAY, GUARD,
};
use common::ContractError;

use crate::execute::{
    execute_change_bridged_token, execute_on_message_invocation, execute_on_message_recalled,
    execute_send_token, reply_deploy, reply_deposit, reply_send,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::state::{
    CONTRACT_NAME, CONTRACT_VERSION, DEPLOY_REPLY_ID, DEPOSIT_REPLY_ID, SEND_REPLY_ID,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.chain_id == 0 {
        return Err(ContractError::InvalidDestination { chain_id: 0 });
    }

    let config = Config {
        owner: deps.api.addr_validate(&msg.owner)?,
        bridge: deps.api.addr_validate(&msg.bridge)?,
        chain_id: msg.chain_id,
        native_denom: msg.native_denom,
        bridged_code_id: msg.bridged_code_id,
        min_migration_delay: msg
            .min_migration_delay
            .unwrap_or(DEFAULT_MIN_MIGRATION_DELAY),
        paused: false,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("bridge", config.bridge)
        .add_attribute("chain_id", config.chain_id.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Transfers
        ExecuteMsg::SendToken(op) => execute_send_token(deps, env, info, op),
        ExecuteMsg::OnMessageInvocation { data } => {
            execute_on_message_invocation(deps, env, info, data)
        }
        ExecuteMsg::OnMessageRecalled {
            message,
            message_hash,
        } => execute_on_message_recalled(deps, env, info, message, message_hash),

        // Registry
        ExecuteMsg::ChangeBridgedToken { canonical, bridged } => {
            execute_change_bridged_token(deps, env, info, canonical, bridged)
        }

        // Configuration
        ExecuteMsg::SetSibling { chain_id, vault } => {
            execute_set_sibling(deps, info, chain_id, vault)
        }
        ExecuteMsg::UpdateConfig {
            bridge,
            bridged_code_id,
            min_migration_delay,
        } => execute_update_config(deps, info, bridge, bridged_code_id, min_migration_delay),
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
        ExecuteMsg::TransferOwnership { new_owner } => {
            execute_transfer_ownership(deps, info, new_owner)
        }
        ExecuteMsg::AcceptOwnership {} => execute_accept_ownership(deps, info),
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        DEPOSIT_REPLY_ID => reply_deposit(deps, env, msg),
        SEND_REPLY_ID => reply_send(deps, env, msg),
        DEPLOY_REPLY_ID => reply_deploy(deps, env, msg),
        RELEASE_REPLY_ID => {
            GUARD.exit(deps.storage);
            Ok(Response::new())
        }
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Siblings { start_after, limit } => {
            to_json_binary(&query_siblings(deps, start_after, limit)?)
        }
        QueryMsg::PendingOwner {} => to_json_binary(&query_pending_owner(deps)?),
        QueryMsg::BridgedToken { chain_id, addr } => {
            to_json_binary(&query_bridged_token(deps, chain_id, addr)?)
        }
        QueryMsg::CanonicalToken { bridged } => {
            to_json_binary(&query_canonical_token(deps, bridged)?)
        }
        QueryMsg::Bindings { start_after, limit } => {
            to_json_binary(&query_bindings(deps, start_after, limit)?)
        }
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
