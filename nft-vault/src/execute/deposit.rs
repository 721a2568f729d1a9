//! Outbound transfer handlers.
//!
//! Ids of a collection issued on this chain are transferred into the vault;
//! ids of a bridged collection are burned from the sender. The bridge message
//! is dispatched after the asset messages, so a failing transfer aborts the
//! send.

use cosmwasm_std::{
    to_json_binary, Addr, CosmosMsg, DepsMut, Env, Event, MessageInfo, QuerierWrapper, Reply,
    Response, SubMsg, WasmMsg,
};
use cw721::{ContractInfoResponse, Cw721ExecuteMsg, Cw721QueryMsg, OwnerOfResponse};

use common::bridge::invocation_payload;
use common::bridged::BridgedNftExecuteMsg;
use common::vault::{enter_deposit, parse_send_reply, Route, RouteRequest, GUARD, REGISTRY};
use common::{CanonicalRecord, ContractError, NftQuantity, TransferInstruction};

use crate::msg::BridgeNftOp;
use crate::state::{PENDING_SEND, SEND_REPLY_ID};

/// Execute handler for SendNft
pub fn execute_send_nft(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    op: BridgeNftOp,
) -> Result<Response, ContractError> {
    let config = enter_deposit(deps.storage)?;

    let quantity = NftQuantity {
        token_ids: op.token_ids,
        amounts: op.amounts,
    };
    quantity.validate()?;

    if op.token.is_empty() {
        return Err(ContractError::InvalidToken {
            reason: "collection address is empty".to_string(),
        });
    }
    let collection = deps
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

    let binding = REGISTRY.lookup_by_bridged(deps.storage, &collection)?;
    if let Some(binding) = &binding {
        if binding.blacklisted {
            return Err(ContractError::Blacklisted {
                token: collection.to_string(),
            });
        }
    }
    let collection_info = query_collection_info(&deps.querier, &collection)?;

    let (canonical, asset_msgs, mode) = match binding {
        // Return trip: burn every id from the sender
        Some(binding) => {
            let burns = quantity
                .token_ids
                .iter()
                .map(|token_id| {
                    collection_msg(
                        &collection,
                        &BridgedNftExecuteMsg::BridgeBurn {
                            owner: info.sender.to_string(),
                            token_id: token_id.clone(),
                        },
                    )
                })
                .collect::<Result<Vec<_>, _>>()?;
            (binding.canonical, burns, "burn")
        }
        None => {
            for token_id in &quantity.token_ids {
                check_owner(&deps.querier, &collection, token_id, &info.sender)?;
            }
            let pulls = quantity
                .token_ids
                .iter()
                .map(|token_id| {
                    collection_msg(
                        &collection,
                        &Cw721ExecuteMsg::TransferNft {
                            recipient: env.contract.address.to_string(),
                            token_id: token_id.clone(),
                        },
                    )
                })
                .collect::<Result<Vec<_>, _>>()?;
            let canonical = CanonicalRecord::non_fungible(
                config.chain_id,
                collection.as_str(),
                collection_info.symbol,
                collection_info.name,
            );
            (canonical, pulls, "lock")
        }
    };

    let token_ids = quantity.token_ids_attr();
    let instruction = TransferInstruction::new(canonical, info.sender.as_str(), op.to, quantity);
    let send = route.into_send_msg(&config, &env.contract.address, instruction.encode()?)?;
    PENDING_SEND.save(deps.storage, &collection)?;

    Ok(Response::new()
        .add_messages(asset_msgs)
        .add_submessage(SubMsg::reply_on_success(send, SEND_REPLY_ID))
        .add_attribute("action", "send_nft")
        .add_attribute("mode", mode)
        .add_attribute("token", collection)
        .add_attribute("token_ids", token_ids))
}

/// Reply handler for the bridge's SendMessage
pub fn reply_send(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    let collection = PENDING_SEND.load(deps.storage)?;
    PENDING_SEND.remove(deps.storage);

    let sent = parse_send_reply(msg)?;
    let instruction =
        TransferInstruction::<NftQuantity>::decode(&invocation_payload(&sent.message)?)?;

    let event = Event::new("token_sent")
        .add_attribute("message_hash", sent.message_hash.to_hex())
        .add_attribute("message_id", sent.message.id.to_string())
        .add_attribute("dest_chain_id", sent.message.dest_chain_id.to_string())
        .add_attribute("from", instruction.from.clone())
        .add_attribute("to", instruction.to.clone())
        .add_attribute("token", collection.to_string())
        .add_attribute("token_ids", instruction.quantity.token_ids_attr())
        .add_attribute("amounts", instruction.quantity.amounts_attr())
        .add_attribute("value", sent.message.value)
        .add_attribute("fee", sent.message.fee)
        .add_attributes(instruction.canonical.attributes());

    GUARD.exit(deps.storage);

    Ok(Response::new()
        .add_event(event)
        .add_attribute("action", "token_sent")
        .set_data(to_json_binary(&sent)?))
}

/// cw721 `ContractInfo`; anything else is not a collection.
fn query_collection_info(
    querier: &QuerierWrapper,
    collection: &Addr,
) -> Result<ContractInfoResponse, ContractError> {
    querier
        .query_wasm_smart(collection, &Cw721QueryMsg::ContractInfo {})
        .map_err(|_| ContractError::UnsupportedAsset {
            token: collection.to_string(),
        })
}

/// The vault moves ids under its operator approval, so the sender must hold
/// each id itself.
fn check_owner(
    querier: &QuerierWrapper,
    collection: &Addr,
    token_id: &str,
    sender: &Addr,
) -> Result<(), ContractError> {
    let res: OwnerOfResponse = querier.query_wasm_smart(
        collection,
        &Cw721QueryMsg::OwnerOf {
            token_id: token_id.to_string(),
            include_expired: None,
        },
    )?;
    if res.owner != sender.as_str() {
        return Err(ContractError::NotTokenOwner {
            token_id: token_id.to_string(),
            sender: sender.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn collection_msg<T: serde::Serialize>(
    collection: &Addr,
    msg: &T,
) -> Result<CosmosMsg, ContractError> {
    Ok(WasmMsg::Execute {
        contract_addr: collection.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }
    .into())
}
