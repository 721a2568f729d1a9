use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Coin, Deps, DepsMut, Env, Event, MessageInfo, Reply,
    Response, StdError, StdResult, SubMsg, Uint128, WasmMsg,
};
use cw2::set_contract_version;

use common::bridge::{Context, Message, SendMessageResponse, VaultCallbackMsg};

use crate::error::ContractError;
use crate::hash::message_hash;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg, StatusResponse};
use crate::state::{
    Config, MessageStatus, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, DELIVERY_CONTEXT,
    DELIVER_REPLY_ID, NEXT_MESSAGE_ID, RECALL_CONTEXT, RECALL_REPLY_ID, SENT, STATUS,
};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    CONFIG.save(
        deps.storage,
        &Config {
            chain_id: msg.chain_id,
            native_denom: msg.native_denom,
        },
    )?;
    NEXT_MESSAGE_ID.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("chain_id", msg.chain_id.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::SendMessage { message } => execute_send_message(deps, info, message),
        ExecuteMsg::ProcessMessage { message } => execute_process_message(deps, message),
        ExecuteMsg::RecallMessage { message } => execute_recall_message(deps, env, message),
    }
}

fn execute_send_message(
    deps: DepsMut,
    info: MessageInfo,
    mut message: Message,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let expected = message
        .value
        .checked_add(message.fee)
        .map_err(StdError::from)?;
    let got: Uint128 = info
        .funds
        .iter()
        .filter(|coin| coin.denom == config.native_denom)
        .map(|coin| coin.amount)
        .sum();
    if got != expected {
        return Err(ContractError::InvalidFunds { expected, got });
    }

    let id = NEXT_MESSAGE_ID.load(deps.storage)?;
    NEXT_MESSAGE_ID.save(deps.storage, &(id + 1))?;

    message.id = id;
    message.from = info.sender.to_string();
    message.src_chain_id = config.chain_id;

    let hash = message_hash(&message)?;
    SENT.save(deps.storage, hash.as_slice(), &message)?;
    STATUS.save(deps.storage, hash.as_slice(), &MessageStatus::Sent)?;

    let event = Event::new("message_sent")
        .add_attribute("message_hash", hash.to_hex())
        .add_attribute("id", id.to_string())
        .add_attribute("from", message.from.clone())
        .add_attribute("dest_chain_id", message.dest_chain_id.to_string());

    Ok(Response::new()
        .add_event(event)
        .add_attribute("action", "send_message")
        .set_data(to_json_binary(&SendMessageResponse {
            message_hash: hash,
            message,
        })?))
}

/// Delivers `message` to its target. A failing target fails the whole call,
/// leaving the message deliverable for a later attempt.
fn execute_process_message(deps: DepsMut, message: Message) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if message.dest_chain_id != config.chain_id {
        return Err(ContractError::WrongChain {
            chain_id: message.dest_chain_id,
        });
    }

    let hash = message_hash(&message)?;
    if STATUS.has(deps.storage, hash.as_slice()) {
        return Err(ContractError::AlreadyProcessed {
            hash: hash.to_hex(),
        });
    }
    STATUS.save(deps.storage, hash.as_slice(), &MessageStatus::Delivered)?;
    DELIVERY_CONTEXT.save(
        deps.storage,
        &Context {
            message_hash: hash.clone(),
            from: message.from.clone(),
            src_chain_id: message.src_chain_id,
        },
    )?;

    let invoke = WasmMsg::Execute {
        contract_addr: message.to.clone(),
        msg: message.data.clone(),
        funds: native_funds(&config, message.value),
    };

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_success(invoke, DELIVER_REPLY_ID))
        .add_attribute("action", "process_message")
        .add_attribute("message_hash", hash.to_hex())
        .add_attribute("to", message.to))
}

fn execute_recall_message(
    deps: DepsMut,
    env: Env,
    message: Message,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let hash = message_hash(&message)?;

    if !SENT.has(deps.storage, hash.as_slice()) {
        return Err(ContractError::MessageNotFound {
            hash: hash.to_hex(),
        });
    }
    if STATUS.may_load(deps.storage, hash.as_slice())? != Some(MessageStatus::Sent) {
        return Err(ContractError::NotRecallable {
            hash: hash.to_hex(),
        });
    }
    STATUS.save(deps.storage, hash.as_slice(), &MessageStatus::Recalled)?;
    RECALL_CONTEXT.save(
        deps.storage,
        &Context {
            message_hash: hash.clone(),
            from: env.contract.address.to_string(),
            src_chain_id: config.chain_id,
        },
    )?;

    let callback = WasmMsg::Execute {
        contract_addr: message.from.clone(),
        msg: to_json_binary(&VaultCallbackMsg::OnMessageRecalled {
            message: message.clone(),
            message_hash: hash.clone(),
        })?,
        funds: native_funds(&config, message.value),
    };

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_success(callback, RECALL_REPLY_ID))
        .add_attribute("action", "recall_message")
        .add_attribute("message_hash", hash.to_hex())
        .add_attribute("to", message.from))
}

fn native_funds(config: &Config, value: Uint128) -> Vec<Coin> {
    if value.is_zero() {
        vec![]
    } else {
        vec![Coin::new(value.u128(), config.native_denom.clone())]
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        DELIVER_REPLY_ID => {
            DELIVERY_CONTEXT.remove(deps.storage);
            Ok(Response::new().add_attribute("action", "message_delivered"))
        }
        RECALL_REPLY_ID => {
            RECALL_CONTEXT.remove(deps.storage);
            Ok(Response::new().add_attribute("action", "message_recalled"))
        }
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::DeliveryContext {} => to_json_binary(
            &DELIVERY_CONTEXT
                .may_load(deps.storage)?
                .ok_or_else(|| StdError::generic_err("no delivery in progress"))?,
        ),
        QueryMsg::RecallContext {} => to_json_binary(
            &RECALL_CONTEXT
                .may_load(deps.storage)?
                .ok_or_else(|| StdError::generic_err("no recall in progress"))?,
        ),
        QueryMsg::Message { hash } => to_json_binary(&SENT.load(deps.storage, hash.as_slice())?),
        QueryMsg::MessageStatus { hash } => to_json_binary(&StatusResponse {
            status: STATUS.may_load(deps.storage, hash.as_slice())?,
        }),
    }
}
