//! Bridged token factory.
//!
//! Deploys a bridged cw20 instance the first time a foreign canonical token
//! arrives, and lets the owner migrate a canonical token to a replacement
//! instance.

use cosmwasm_std::{
    to_json_binary, CosmosMsg, DepsMut, Env, Event, MessageInfo, Reply, Response, SubMsg, WasmMsg,
};
use cw_utils::parse_reply_instantiate_data;

use common::bridged::{BridgedTokenExecuteMsg, BridgedTokenInstantiateMsg};
use common::vault::{
    assert_owner, check_replacement, enter, record_migration, Config, CONFIG, GUARD, REGISTRY,
};
use common::{CanonicalRecord, ContractError};

use crate::execute::delivery::{settle, Settlement};
use crate::state::{Arrival, DEPLOY_REPLY_ID, PENDING_ARRIVAL};

/// Instantiates the bridged instance for `arrival` and parks the arrival
/// until the instance address is known.
pub(crate) fn deploy_bridged(
    deps: DepsMut,
    env: &Env,
    config: &Config,
    arrival: Arrival,
) -> Result<Response, ContractError> {
    let canonical = &arrival.canonical;
    let decimals = canonical
        .decimals
        .ok_or_else(|| ContractError::MalformedPayload {
            reason: "fungible canonical record without decimals".to_string(),
        })?;

    let instantiate = WasmMsg::Instantiate {
        admin: Some(config.owner.to_string()),
        code_id: config.bridged_code_id,
        msg: to_json_binary(&BridgedTokenInstantiateMsg {
            vault: env.contract.address.to_string(),
            src_chain_id: canonical.chain_id,
            src_token: canonical.addr.clone(),
            decimals,
            symbol: canonical.symbol.clone(),
            name: canonical.name.clone(),
        })?,
        funds: vec![],
        label: format!("bridged {} from chain {}", canonical.symbol, canonical.chain_id),
    };

    PENDING_ARRIVAL.save(deps.storage, &arrival)?;

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_success(instantiate, DEPLOY_REPLY_ID))
        .add_attribute("action", "deploy_bridged_token"))
}

/// Reply handler for a bridged instance deployment
pub fn reply_deploy(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let arrival = PENDING_ARRIVAL.load(deps.storage)?;
    PENDING_ARRIVAL.remove(deps.storage);

    let res = parse_reply_instantiate_data(msg).map_err(|e| ContractError::InvalidNewBridged {
        reason: e.to_string(),
    })?;
    let bridged = deps.api.addr_validate(&res.contract_address)?;

    REGISTRY.bind(deps.storage, &arrival.canonical, &bridged)?;

    let event = Event::new("bridged_token_deployed")
        .add_attribute("bridged", bridged.to_string())
        .add_attributes(arrival.canonical.attributes());

    Ok(settle(deps.storage, &config, arrival, &bridged, Settlement::Mint)?.add_event(event))
}

/// Execute handler for ChangeBridgedToken
///
/// The old instance is told it is migrating out to the new one, the new one
/// that it accepts mints from the old one. Response data is the old address.
pub fn execute_change_bridged_token(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    canonical: CanonicalRecord,
    bridged: String,
) -> Result<Response, ContractError> {
    let config = enter(deps.storage)?;
    assert_owner(&config, &info.sender)?;

    if canonical.decimals.is_none() {
        return Err(ContractError::InvalidNewBridged {
            reason: "fungible canonical record requires decimals".to_string(),
        });
    }
    let new_bridged = check_replacement(deps.as_ref(), &config, &canonical, &bridged)?;

    let old_bridged = REGISTRY.rebind(deps.storage, &canonical, &new_bridged)?;
    record_migration(deps.storage, &env, &config, &canonical)?;

    let mut msgs: Vec<CosmosMsg> = vec![];
    if let Some(old) = &old_bridged {
        msgs.push(migration_status_msg(old.as_str(), new_bridged.as_str(), false)?);
        msgs.push(migration_status_msg(new_bridged.as_str(), old.as_str(), true)?);
    }

    let event = Event::new("bridged_token_changed")
        .add_attribute(
            "old_bridged",
            old_bridged
                .as_ref()
                .map(|old| old.to_string())
                .unwrap_or_else(|| "none".to_string()),
        )
        .add_attribute("new_bridged", new_bridged.to_string())
        .add_attributes(canonical.attributes());

    let res = Response::new()
        .add_event(event)
        .add_attribute("action", "change_bridged_token")
        .set_data(to_json_binary(&old_bridged)?);
    Ok(GUARD.release_after(deps.storage, res, msgs))
}

fn migration_status_msg(
    instance: &str,
    counterpart: &str,
    inbound: bool,
) -> Result<CosmosMsg, ContractError> {
    Ok(WasmMsg::Execute {
        contract_addr: instance.to_string(),
        msg: to_json_binary(&BridgedTokenExecuteMsg::ChangeMigrationStatus {
            migrating_address: Some(counterpart.to_string()),
            migrating_inbound: inbound,
        })?,
        funds: vec![],
    }
    .into())
}
