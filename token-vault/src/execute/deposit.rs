//! Outbound transfer handlers.
//!
//! A deposit of a token issued on this chain locks it in the vault. The
//! amount credited is what the vault's balance grew by, so fee-on-transfer
//! tokens are bridged at the amount actually received. A deposit of a bridged
//! token burns exactly the requested amount from the sender.

use cosmwasm_std::{
    to_json_binary, Addr, CosmosMsg, DepsMut, Env, Event, MessageInfo, QuerierWrapper, Reply,
    Response, SubMsg, Uint128, WasmMsg,
};
use cw20::{BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg, TokenInfoResponse};

use common::bridge::invocation_payload;
use common::bridged::BridgedTokenExecuteMsg;
use common::vault::{enter_deposit, parse_send_reply, Route, RouteRequest, CONFIG, GUARD, REGISTRY};
use common::{CanonicalRecord, ContractError, TransferInstruction};

use crate::msg::BridgeTransferOp;
use crate::state::{
    PendingDeposit, DEPOSIT_REPLY_ID, PENDING_DEPOSIT, PENDING_SEND, SEND_REPLY_ID,
};

/// Execute handler for SendToken
pub fn execute_send_token(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    op: BridgeTransferOp,
) -> Result<Response, ContractError> {
    let config = enter_deposit(deps.storage)?;

    if op.amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "amount must be greater than zero".to_string(),
        });
    }
    if op.token.is_empty() {
        return Err(ContractError::InvalidToken {
            reason: "token address is empty".to_string(),
        });
    }
    let token = deps
        .api
        .addr_validate(&op.token)
        .map_err(|e| ContractError::InvalidToken {
            reason: e.to_string(),
        })?;
    if op.to.is_empty() {
        return Err(ContractError::InvalidRecipient {
            reason: "recipient is empty".to_string(),
        });
    }

    let route = Route::resolve(
        deps.storage,
        &config,
        &info,
        RouteRequest {
            dest_chain_id: op.dest_chain_id,
            dest_owner: op.dest_owner,
            gas_limit: op.gas_limit,
            fee: op.fee,
            refund_to: op.refund_to,
            memo: op.memo,
        },
    )?;

    if let Some(binding) = REGISTRY.lookup_by_bridged(deps.storage, &token)? {
        if binding.blacklisted {
            return Err(ContractError::Blacklisted {
                token: token.to_string(),
            });
        }

        // Return trip: burn exactly what is sent back
        let burn = WasmMsg::Execute {
            contract_addr: token.to_string(),
            msg: to_json_binary(&BridgedTokenExecuteMsg::BridgeBurn {
                owner: info.sender.to_string(),
                amount: op.amount,
            })?,
            funds: vec![],
        };
        let instruction =
            TransferInstruction::new(binding.canonical, info.sender.as_str(), op.to, op.amount);
        let send = route.into_send_msg(&config, &env.contract.address, instruction.encode()?)?;
        PENDING_SEND.save(deps.storage, &token)?;

        return Ok(Response::new()
            .add_message(burn)
            .add_submessage(SubMsg::reply_on_success(send, SEND_REPLY_ID))
            .add_attribute("action", "send_token")
            .add_attribute("mode", "burn")
            .add_attribute("token", token)
            .add_attribute("amount", op.amount));
    }

    let token_info = query_token_info(&deps.querier, &token)?;
    let canonical = CanonicalRecord::fungible(
        config.chain_id,
        token.as_str(),
        token_info.decimals,
        token_info.symbol,
        token_info.name,
    );
    let balance_before = query_vault_balance(&deps.querier, &token, &env.contract.address)?;

    PENDING_DEPOSIT.save(
        deps.storage,
        &PendingDeposit {
            token: token.clone(),
            canonical,
            from: info.sender.clone(),
            to: op.to,
            balance_before,
            route,
        },
    )?;

    let pull = WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
            owner: info.sender.to_string(),
            recipient: env.contract.address.to_string(),
            amount: op.amount,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_success(pull, DEPOSIT_REPLY_ID))
        .add_attribute("action", "send_token")
        .add_attribute("mode", "lock")
        .add_attribute("token", token)
        .add_attribute("amount", op.amount))
}

/// Reply handler for the TransferFrom of a canonical deposit
pub fn reply_deposit(deps: DepsMut, env: Env, _msg: Reply) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let pending = PENDING_DEPOSIT.load(deps.storage)?;
    PENDING_DEPOSIT.remove(deps.storage);

    let balance_after =
        query_vault_balance(&deps.querier, &pending.token, &env.contract.address)?;
    let received = balance_after
        .checked_sub(pending.balance_before)
        .unwrap_or_default();
    if received.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "no tokens received".to_string(),
        });
    }

    let instruction =
        TransferInstruction::new(pending.canonical, pending.from.as_str(), pending.to, received);
    let send = pending
        .route
        .into_send_msg(&config, &env.contract.address, instruction.encode()?)?;
    PENDING_SEND.save(deps.storage, &pending.token)?;

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_success(send, SEND_REPLY_ID))
        .add_attribute("action", "deposit_received")
        .add_attribute("received", received))
}

/// Reply handler for the bridge's SendMessage
pub fn reply_send(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    let token = PENDING_SEND.load(deps.storage)?;
    PENDING_SEND.remove(deps.storage);

    let sent = parse_send_reply(msg)?;
    let instruction = TransferInstruction::<Uint128>::decode(&invocation_payload(&sent.message)?)?;

    let event = Event::new("token_sent")
        .add_attribute("message_hash", sent.message_hash.to_hex())
        .add_attribute("message_id", sent.message.id.to_string())
        .add_attribute("dest_chain_id", sent.message.dest_chain_id.to_string())
        .add_attribute("from", instruction.from.clone())
        .add_attribute("to", instruction.to.clone())
        .add_attribute("token", token.to_string())
        .add_attribute("amount", instruction.quantity)
        .add_attribute("value", sent.message.value)
        .add_attribute("fee", sent.message.fee)
        .add_attributes(instruction.canonical.attributes());

    GUARD.exit(deps.storage);

    Ok(Response::new()
        .add_event(event)
        .add_attribute("action", "token_sent")
        .set_data(to_json_binary(&sent)?))
}

pub(crate) fn query_token_info(
    querier: &QuerierWrapper,
    token: &Addr,
) -> Result<TokenInfoResponse, ContractError> {
    querier
        .query_wasm_smart(token, &Cw20QueryMsg::TokenInfo {})
        .map_err(|e| ContractError::InvalidToken {
            reason: format!("{} is not a cw20 token: {}", token, e),
        })
}

fn query_vault_balance(
    querier: &QuerierWrapper,
    token: &Addr,
    vault: &Addr,
) -> Result<Uint128, ContractError> {
    let res: BalanceResponse = querier.query_wasm_smart(
        token,
        &Cw20QueryMsg::Balance {
            address: vault.to_string(),
        },
    )?;
    Ok(res.balance)
}

/// cw20 Transfer out of the vault
pub(crate) fn release_msg(
    token: &Addr,
    recipient: &Addr,
    amount: Uint128,
) -> Result<CosmosMsg, ContractError> {
    Ok(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        })?,
        funds: vec![],
    }
    .into())
}
