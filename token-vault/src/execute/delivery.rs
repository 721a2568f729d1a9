//! Inbound settlement handlers (delivery and recall).
//!
//! Both callbacks end in the same settlement: tokens issued on this chain are
//! released from the vault, foreign tokens are minted on their current
//! bridged instance. Native value attached by the bridge follows the tokens.

use cosmwasm_std::{
    to_json_binary, Addr, Binary, CosmosMsg, DepsMut, Env, Event, HexBinary, MessageInfo,
    Response, Storage, Uint128, WasmMsg,
};

use common::bridge::{invocation_payload, Message};
use common::bridged::BridgedTokenExecuteMsg;
use common::vault::{
    attached_native, check_delivery_context, check_recall_context, enter, native_transfer,
    validate_recipient, Config, GUARD, REGISTRY,
};
use common::{ContractError, TransferInstruction};

use crate::execute::deposit::release_msg;
use crate::execute::factory::deploy_bridged;
use crate::state::{Arrival, ArrivalKind};

/// Execute handler for OnMessageInvocation
pub fn execute_on_message_invocation(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    data: Binary,
) -> Result<Response, ContractError> {
    let config = enter(deps.storage)?;
    let context = check_delivery_context(deps.as_ref(), &info, &config)?;

    let instruction = TransferInstruction::<Uint128>::decode(&data)?;
    let recipient = validate_recipient(deps.as_ref(), &env, &instruction.to)?;

    let arrival = Arrival {
        kind: ArrivalKind::Delivery {
            src_chain_id: context.src_chain_id,
        },
        message_hash: context.message_hash,
        canonical: instruction.canonical,
        from: instruction.from,
        recipient,
        amount: instruction.quantity,
        value: attached_native(&config, &info),
    };
    resolve_and_settle(deps, &env, &config, arrival)
}

/// Execute handler for OnMessageRecalled
pub fn execute_on_message_recalled(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    message: Message,
    message_hash: HexBinary,
) -> Result<Response, ContractError> {
    let config = enter(deps.storage)?;
    check_recall_context(deps.as_ref(), &env, &info, &config, &message, &message_hash)?;

    let instruction = TransferInstruction::<Uint128>::decode(&invocation_payload(&message)?)?;
    let recipient = validate_recipient(deps.as_ref(), &env, &instruction.from)?;

    let arrival = Arrival {
        kind: ArrivalKind::Recall,
        message_hash,
        canonical: instruction.canonical,
        from: instruction.from,
        recipient,
        amount: instruction.quantity,
        value: attached_native(&config, &info),
    };
    resolve_and_settle(deps, &env, &config, arrival)
}

/// Settles on the local token for the arrival's canonical record, deploying
/// a bridged instance first when none is bound.
fn resolve_and_settle(
    deps: DepsMut,
    env: &Env,
    config: &Config,
    arrival: Arrival,
) -> Result<Response, ContractError> {
    let canonical = &arrival.canonical;

    if canonical.chain_id == config.chain_id {
        let token = deps.api.addr_validate(&canonical.addr).map_err(|e| {
            ContractError::MalformedPayload {
                reason: format!("canonical address: {}", e),
            }
        })?;
        return settle(deps.storage, config, arrival, &token, Settlement::Release);
    }

    match REGISTRY.lookup_canonical(deps.storage, canonical.chain_id, &canonical.addr)? {
        Some(bridged) => settle(deps.storage, config, arrival, &bridged, Settlement::Mint),
        None => deploy_bridged(deps, env, config, arrival),
    }
}

pub(crate) enum Settlement {
    Release,
    Mint,
}

/// Pays out an arrival and releases the lock once the payout has executed.
pub(crate) fn settle(
    storage: &mut dyn Storage,
    config: &Config,
    arrival: Arrival,
    token: &Addr,
    settlement: Settlement,
) -> Result<Response, ContractError> {
    let mut msgs: Vec<CosmosMsg> = vec![];
    if !arrival.amount.is_zero() {
        msgs.push(match settlement {
            Settlement::Release => release_msg(token, &arrival.recipient, arrival.amount)?,
            Settlement::Mint => WasmMsg::Execute {
                contract_addr: token.to_string(),
                msg: to_json_binary(&BridgedTokenExecuteMsg::Mint {
                    recipient: arrival.recipient.to_string(),
                    amount: arrival.amount,
                })?,
                funds: vec![],
            }
            .into(),
        });
    }
    if let Some(msg) = native_transfer(config, &arrival.recipient, arrival.value) {
        msgs.push(msg);
    }

    let (event, action) = match arrival.kind {
        ArrivalKind::Delivery { src_chain_id } => (
            Event::new("token_received")
                .add_attribute("src_chain_id", src_chain_id.to_string())
                .add_attribute("to", arrival.recipient.to_string()),
            "token_received",
        ),
        ArrivalKind::Recall => (Event::new("token_released"), "token_released"),
    };
    let event = event
        .add_attribute("message_hash", arrival.message_hash.to_hex())
        .add_attribute("from", arrival.from)
        .add_attribute("recipient", arrival.recipient.to_string())
        .add_attribute("token", token.to_string())
        .add_attribute("amount", arrival.amount)
        .add_attribute("value", arrival.value)
        .add_attribute(
            "mode",
            match settlement {
                Settlement::Release => "release",
                Settlement::Mint => "mint",
            },
        )
        .add_attributes(arrival.canonical.attributes());

    let res = Response::new()
        .add_event(event)
        .add_attribute("action", action);
    Ok(GUARD.release_after(storage, res, msgs))
}
