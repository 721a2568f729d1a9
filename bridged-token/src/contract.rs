use cosmwasm_std::{
    entry_point, to_json_binary, Addr, Binary, Deps, DepsMut, Env, Event, MessageInfo, Response,
    StdResult, Storage, Uint128, WasmMsg,
};
use cw2::set_contract_version;
use cw20_base::allowances::{
    execute_decrease_allowance, execute_increase_allowance, execute_transfer_from,
    query_allowance,
};
use cw20_base::contract::{execute_transfer, query_balance, query_minter, query_token_info};
use cw20_base::state::{MinterData, TokenInfo, BALANCES, TOKEN_INFO};

use common::bridged::{BridgedInfoResponse, BridgedTokenExecuteMsg, MigrationStatus};

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::{BridgeInfo, BRIDGE_INFO, CONTRACT_NAME, CONTRACT_VERSION, MIGRATION};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let vault = deps.api.addr_validate(&msg.vault)?;
    TOKEN_INFO.save(
        deps.storage,
        &TokenInfo {
            name: msg.name,
            symbol: msg.symbol,
            decimals: msg.decimals,
            total_supply: Uint128::zero(),
            mint: Some(MinterData {
                minter: vault.clone(),
                cap: None,
            }),
        },
    )?;
    BRIDGE_INFO.save(
        deps.storage,
        &BridgeInfo {
            vault: vault.clone(),
            src_chain_id: msg.src_chain_id,
            src_token: msg.src_token.clone(),
        },
    )?;
    MIGRATION.save(deps.storage, &MigrationStatus::default())?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("vault", vault)
        .add_attribute("src_chain_id", msg.src_chain_id.to_string())
        .add_attribute("src_token", msg.src_token))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Transfer { recipient, amount } => {
            Ok(execute_transfer(deps, env, info, recipient, amount)?)
        }
        ExecuteMsg::IncreaseAllowance {
            spender,
            amount,
            expires,
        } => Ok(execute_increase_allowance(
            deps, env, info, spender, amount, expires,
        )?),
        ExecuteMsg::DecreaseAllowance {
            spender,
            amount,
            expires,
        } => Ok(execute_decrease_allowance(
            deps, env, info, spender, amount, expires,
        )?),
        ExecuteMsg::TransferFrom {
            owner,
            recipient,
            amount,
        } => Ok(execute_transfer_from(
            deps, env, info, owner, recipient, amount,
        )?),
        ExecuteMsg::Mint { recipient, amount } => execute_mint(deps, info, recipient, amount),
        ExecuteMsg::BridgeBurn { owner, amount } => execute_bridge_burn(deps, info, owner, amount),
        ExecuteMsg::Burn { amount } => execute_burn(deps, info, amount),
        ExecuteMsg::ChangeMigrationStatus {
            migrating_address,
            migrating_inbound,
        } => execute_change_migration_status(deps, info, migrating_address, migrating_inbound),
    }
}

fn execute_mint(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let bridge_info = BRIDGE_INFO.load(deps.storage)?;
    let migration = MIGRATION.load(deps.storage)?;
    if let Some(to) = migration.superseded_by() {
        return Err(ContractError::MigratingOut { to: to.to_string() });
    }

    let migrated = migration.is_inbound_source(&info.sender);
    if info.sender != bridge_info.vault && !migrated {
        return Err(ContractError::Unauthorized);
    }
    if amount.is_zero() {
        return Err(ContractError::InvalidZeroAmount);
    }

    let recipient = deps.api.addr_validate(&recipient)?;
    credit(deps.storage, &recipient, amount)?;

    let mut res = Response::new()
        .add_attribute("action", "mint")
        .add_attribute("to", recipient.to_string())
        .add_attribute("amount", amount);
    if migrated {
        res = res.add_event(
            Event::new("migrated_to")
                .add_attribute("from_token", info.sender)
                .add_attribute("holder", recipient)
                .add_attribute("amount", amount),
        );
    }
    Ok(res)
}

fn execute_bridge_burn(
    deps: DepsMut,
    info: MessageInfo,
    owner: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let bridge_info = BRIDGE_INFO.load(deps.storage)?;
    if info.sender != bridge_info.vault {
        return Err(ContractError::Unauthorized);
    }
    let migration = MIGRATION.load(deps.storage)?;
    if let Some(to) = migration.superseded_by() {
        return Err(ContractError::MigratingOut { to: to.to_string() });
    }
    if amount.is_zero() {
        return Err(ContractError::InvalidZeroAmount);
    }

    let owner = deps.api.addr_validate(&owner)?;
    debit(deps.storage, &owner, amount)?;

    Ok(Response::new()
        .add_attribute("action", "bridge_burn")
        .add_attribute("from", owner)
        .add_attribute("amount", amount))
}

/// Burns the caller's balance here and mints it on the replacement instance.
fn execute_burn(
    deps: DepsMut,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let migration = MIGRATION.load(deps.storage)?;
    let new_token = migration
        .superseded_by()
        .cloned()
        .ok_or(ContractError::NotMigrating)?;
    if amount.is_zero() {
        return Err(ContractError::InvalidZeroAmount);
    }

    debit(deps.storage, &info.sender, amount)?;

    let mint = WasmMsg::Execute {
        contract_addr: new_token.to_string(),
        msg: to_json_binary(&BridgedTokenExecuteMsg::Mint {
            recipient: info.sender.to_string(),
            amount,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(mint)
        .add_attribute("action", "burn")
        .add_attribute("from", info.sender)
        .add_attribute("migrated_to", new_token)
        .add_attribute("amount", amount))
}

fn execute_change_migration_status(
    deps: DepsMut,
    info: MessageInfo,
    migrating_address: Option<String>,
    migrating_inbound: bool,
) -> Result<Response, ContractError> {
    let bridge_info = BRIDGE_INFO.load(deps.storage)?;
    if info.sender != bridge_info.vault {
        return Err(ContractError::Unauthorized);
    }

    let migrating_address = migrating_address
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let status = MigrationStatus {
        migrating_address,
        migrating_inbound,
    };
    MIGRATION.save(deps.storage, &status)?;

    Ok(Response::new()
        .add_attribute("action", "change_migration_status")
        .add_attribute(
            "migrating_address",
            status
                .migrating_address
                .map(|addr| addr.to_string())
                .unwrap_or_else(|| "none".to_string()),
        )
        .add_attribute("migrating_inbound", migrating_inbound.to_string()))
}

fn credit(storage: &mut dyn Storage, account: &Addr, amount: Uint128) -> Result<(), ContractError> {
    BALANCES.update(storage, account, |balance| -> StdResult<_> {
        Ok(balance.unwrap_or_default().checked_add(amount)?)
    })?;
    TOKEN_INFO.update(storage, |mut info| -> StdResult<_> {
        info.total_supply = info.total_supply.checked_add(amount)?;
        Ok(info)
    })?;
    Ok(())
}

fn debit(storage: &mut dyn Storage, account: &Addr, amount: Uint128) -> Result<(), ContractError> {
    BALANCES.update(storage, account, |balance| -> StdResult<_> {
        Ok(balance.unwrap_or_default().checked_sub(amount)?)
    })?;
    TOKEN_INFO.update(storage, |mut info| -> StdResult<_> {
        info.total_supply = info.total_supply.checked_sub(amount)?;
        Ok(info)
    })?;
    Ok(())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Balance { address } => to_json_binary(&query_balance(deps, address)?),
        QueryMsg::TokenInfo {} => to_json_binary(&query_token_info(deps)?),
        QueryMsg::Allowance { owner, spender } => {
            to_json_binary(&query_allowance(deps, owner, spender)?)
        }
        QueryMsg::Minter {} => to_json_binary(&query_minter(deps)?),
        QueryMsg::BridgedInfo {} => to_json_binary(&query_bridged_info(deps)?),
    }
}

fn query_bridged_info(deps: Deps) -> StdResult<BridgedInfoResponse> {
    let info = BRIDGE_INFO.load(deps.storage)?;
    Ok(BridgedInfoResponse {
        vault: info.vault,
        src_chain_id: info.src_chain_id,
        src_token: info.src_token,
        migration: MIGRATION.load(deps.storage)?,
    })
}
