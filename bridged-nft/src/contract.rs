use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Empty, Env, Event, MessageInfo, Response,
    StdResult, WasmMsg,
};
use cw2::set_contract_version;
use cw721::ContractInfoResponse;
use cw721_base::state::TokenInfo;

use common::bridged::{BridgedInfoResponse, BridgedNftExecuteMsg, MigrationStatus};

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::{
    BridgeInfo, Collection, Extension, BRIDGE_INFO, CONTRACT_NAME, CONTRACT_VERSION, MIGRATION,
};

type BaseExecuteMsg = cw721_base::ExecuteMsg<Extension, Empty>;
type BaseQueryMsg = cw721_base::QueryMsg<Empty>;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let vault = deps.api.addr_validate(&msg.vault)?;
    Collection::default().contract_info.save(
        deps.storage,
        &ContractInfoResponse {
            name: msg.name,
            symbol: msg.symbol,
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
        ExecuteMsg::TransferNft {
            recipient,
            token_id,
        } => execute_base(
            deps,
            env,
            info,
            BaseExecuteMsg::TransferNft {
                recipient,
                token_id,
            },
        ),
        ExecuteMsg::SendNft {
            contract,
            token_id,
            msg,
        } => execute_base(
            deps,
            env,
            info,
            BaseExecuteMsg::SendNft {
                contract,
                token_id,
                msg,
            },
        ),
        ExecuteMsg::Approve {
            spender,
            token_id,
            expires,
        } => execute_base(
            deps,
            env,
            info,
            BaseExecuteMsg::Approve {
                spender,
                token_id,
                expires,
            },
        ),
        ExecuteMsg::Revoke { spender, token_id } => execute_base(
            deps,
            env,
            info,
            BaseExecuteMsg::Revoke { spender, token_id },
        ),
        ExecuteMsg::ApproveAll { operator, expires } => execute_base(
            deps,
            env,
            info,
            BaseExecuteMsg::ApproveAll { operator, expires },
        ),
        ExecuteMsg::RevokeAll { operator } => {
            execute_base(deps, env, info, BaseExecuteMsg::RevokeAll { operator })
        }
        ExecuteMsg::Mint {
            token_id,
            owner,
            token_uri,
        } => execute_mint(deps, info, token_id, owner, token_uri),
        ExecuteMsg::BridgeBurn { owner, token_id } => {
            execute_bridge_burn(deps, info, owner, token_id)
        }
        ExecuteMsg::Burn { token_id } => execute_burn(deps, env, info, token_id),
        ExecuteMsg::ChangeMigrationStatus {
            migrating_address,
            migrating_inbound,
        } => execute_change_migration_status(deps, info, migrating_address, migrating_inbound),
    }
}

/// Standard cw721 transfer and approval handling.
fn execute_base(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: BaseExecuteMsg,
) -> Result<Response, ContractError> {
    Ok(Collection::default().execute(deps, env, info, msg)?)
}

fn execute_mint(
    deps: DepsMut,
    info: MessageInfo,
    token_id: String,
    owner: String,
    token_uri: Option<String>,
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

    let owner = deps.api.addr_validate(&owner)?;
    let token = TokenInfo {
        owner: owner.clone(),
        approvals: vec![],
        token_uri,
        extension: None,
    };
    let collection = Collection::default();
    collection
        .tokens
        .update(deps.storage, &token_id, |existing| match existing {
            Some(_) => Err(ContractError::Claimed {
                token_id: token_id.clone(),
            }),
            None => Ok(token),
        })?;
    collection.increment_tokens(deps.storage)?;

    let mut res = Response::new()
        .add_attribute("action", "mint")
        .add_attribute("owner", owner.to_string())
        .add_attribute("token_id", token_id.clone());
    if migrated {
        res = res.add_event(
            Event::new("migrated_to")
                .add_attribute("from_token", info.sender)
                .add_attribute("holder", owner)
                .add_attribute("token_id", token_id),
        );
    }
    Ok(res)
}

fn execute_bridge_burn(
    deps: DepsMut,
    info: MessageInfo,
    owner: String,
    token_id: String,
) -> Result<Response, ContractError> {
    let bridge_info = BRIDGE_INFO.load(deps.storage)?;
    if info.sender != bridge_info.vault {
        return Err(ContractError::Unauthorized);
    }
    let migration = MIGRATION.load(deps.storage)?;
    if let Some(to) = migration.superseded_by() {
        return Err(ContractError::MigratingOut { to: to.to_string() });
    }

    let collection = Collection::default();
    let token = collection.tokens.load(deps.storage, &token_id)?;
    if token.owner.as_str() != owner {
        return Err(ContractError::NotTokenOwner { token_id, owner });
    }
    collection.tokens.remove(deps.storage, &token_id)?;
    collection.decrement_tokens(deps.storage)?;

    Ok(Response::new()
        .add_attribute("action", "bridge_burn")
        .add_attribute("owner", owner)
        .add_attribute("token_id", token_id))
}

/// Burns the token here through the cw721 send rules and mints it on the
/// replacement collection.
fn execute_burn(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_id: String,
) -> Result<Response, ContractError> {
    let migration = MIGRATION.load(deps.storage)?;
    let new_collection = migration
        .superseded_by()
        .cloned()
        .ok_or(ContractError::NotMigrating)?;

    let collection = Collection::default();
    let token = collection.tokens.load(deps.storage, &token_id)?;
    collection.execute(
        deps.branch(),
        env,
        info,
        BaseExecuteMsg::Burn {
            token_id: token_id.clone(),
        },
    )?;

    let mint = WasmMsg::Execute {
        contract_addr: new_collection.to_string(),
        msg: to_json_binary(&BridgedNftExecuteMsg::Mint {
            token_id: token_id.clone(),
            owner: token.owner.to_string(),
            token_uri: token.token_uri,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(mint)
        .add_attribute("action", "burn")
        .add_attribute("owner", token.owner)
        .add_attribute("migrated_to", new_collection)
        .add_attribute("token_id", token_id))
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

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    let base = match msg {
        QueryMsg::BridgedInfo {} => return to_json_binary(&query_bridged_info(deps)?),
        QueryMsg::OwnerOf {
            token_id,
            include_expired,
        } => BaseQueryMsg::OwnerOf {
            token_id,
            include_expired,
        },
        QueryMsg::Approval {
            token_id,
            spender,
            include_expired,
        } => BaseQueryMsg::Approval {
            token_id,
            spender,
            include_expired,
        },
        QueryMsg::Approvals {
            token_id,
            include_expired,
        } => BaseQueryMsg::Approvals {
            token_id,
            include_expired,
        },
        QueryMsg::AllOperators {
            owner,
            include_expired,
            start_after,
            limit,
        } => BaseQueryMsg::AllOperators {
            owner,
            include_expired,
            start_after,
            limit,
        },
        QueryMsg::NumTokens {} => BaseQueryMsg::NumTokens {},
        QueryMsg::ContractInfo {} => BaseQueryMsg::ContractInfo {},
        QueryMsg::NftInfo { token_id } => BaseQueryMsg::NftInfo { token_id },
        QueryMsg::AllNftInfo {
            token_id,
            include_expired,
        } => BaseQueryMsg::AllNftInfo {
            token_id,
            include_expired,
        },
        QueryMsg::Tokens {
            owner,
            start_after,
            limit,
        } => BaseQueryMsg::Tokens {
            owner,
            start_after,
            limit,
        },
        QueryMsg::AllTokens { start_after, limit } => {
            BaseQueryMsg::AllTokens { start_after, limit }
        }
    };
    Collection::default().query(deps, env, base)
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
