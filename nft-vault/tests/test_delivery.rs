//! Inbound NFT delivery tests.

mod helpers;

use cosmwasm_std::{coins, Uint128};
use cw721::ContractInfoResponse;
use cw_multi_test::Executor;

use common::bridged::BridgedInfoResponse;
use common::ContractError;
use helpers::*;

#[test]
fn test_first_delivery_deploys_bridged_collection() {
    let mut env = setup();
    let bob = env.bob.clone();

    let res = bridge_to_b(&mut env, &bob, &["1", "2"]);

    assert!(has_event(&res, "wasm-bridged_token_deployed"));
    let bridged = bridged_collection(&env.app, &env.vault_b, CHAIN_A, &env.collection)
        .expect("bridged collection bound");
    assert_eq!(
        event_attr(&res, "wasm-token_received", "mode"),
        Some("mint".to_string())
    );
    assert_eq!(
        event_attr(&res, "wasm-token_received", "token_ids"),
        Some("1,2".to_string())
    );
    assert_eq!(tokens_of(&env.app, &bridged, &env.bob), vec!["1", "2"]);

    let info: ContractInfoResponse = env
        .app
        .wrap()
        .query_wasm_smart(&bridged, &bridged_nft::msg::QueryMsg::ContractInfo {})
        .unwrap();
    assert_eq!(info.symbol, "PUNK");
    assert_eq!(info.name, "Punks");

    let bridged_info: BridgedInfoResponse = env
        .app
        .wrap()
        .query_wasm_smart(&bridged, &bridged_nft::msg::QueryMsg::BridgedInfo {})
        .unwrap();
    assert_eq!(bridged_info.vault, env.vault_b);
    assert_eq!(bridged_info.src_chain_id, CHAIN_A);
    assert_eq!(bridged_info.src_token, env.collection.to_string());

    let contract = env.app.wrap().query_wasm_contract_info(&bridged).unwrap();
    assert_eq!(contract.admin, Some(env.owner.to_string()));
}

#[test]
fn test_second_delivery_reuses_bridged_collection() {
    let mut env = setup();
    let bob = env.bob.clone();

    bridge_to_b(&mut env, &bob, &["1"]);
    let bridged = bridged_collection(&env.app, &env.vault_b, CHAIN_A, &env.collection).unwrap();

    let res = bridge_to_b(&mut env, &bob, &["3"]);
    assert!(!has_event(&res, "wasm-bridged_token_deployed"));
    assert_eq!(tokens_of(&env.app, &bridged, &env.bob), vec!["1", "3"]);
}

#[test]
fn test_delivery_forwards_native_value() {
    let mut env = setup();
    approve_all(&mut env.app, &env.collection, &env.alice, &env.vault_a);
    let mut op = nft_op(CHAIN_B, &env.bob, &env.collection, &["1"]);
    op.fee = Uint128::from(10u128);
    let sent = send_nft(
        &mut env.app,
        &env.vault_a,
        &env.alice,
        op,
        &coins(260, NATIVE),
    )
    .unwrap();

    let bob_before = native_balance(&env.app, &env.bob);
    relay(&mut env.app, &env.relayer, &env.bridge_a, &env.bridge_b, &sent).unwrap();
    assert_eq!(
        native_balance(&env.app, &env.bob),
        bob_before + Uint128::from(250u128)
    );
    assert_eq!(native_balance(&env.app, &env.vault_b), Uint128::zero());
}

#[test]
fn test_return_trip_burns_and_releases() {
    let mut env = setup();
    let bob = env.bob.clone();
    bridge_to_b(&mut env, &bob, &["1", "2"]);
    let bridged = bridged_collection(&env.app, &env.vault_b, CHAIN_A, &env.collection).unwrap();

    // No approval needed: the vault burns through its bridge authority
    let op = nft_op(CHAIN_A, &env.alice, &bridged, &["2"]);
    let sent = send_nft(&mut env.app, &env.vault_b, &env.bob, op, &[]).unwrap();
    assert_eq!(
        event_attr(&sent, "wasm-token_sent", "canonical_addr"),
        Some(env.collection.to_string())
    );
    assert_eq!(owner_of(&env.app, &bridged, "2"), None);

    let res = relay(&mut env.app, &env.relayer, &env.bridge_b, &env.bridge_a, &sent).unwrap();
    assert_eq!(
        event_attr(&res, "wasm-token_received", "mode"),
        Some("release".to_string())
    );
    assert_eq!(
        owner_of(&env.app, &env.collection, "2"),
        Some(env.alice.to_string())
    );
    assert_eq!(
        owner_of(&env.app, &env.collection, "1"),
        Some(env.vault_a.to_string())
    );
}

#[test]
fn test_return_trip_of_foreign_ids_rejected() {
    let mut env = setup();
    let bob = env.bob.clone();
    bridge_to_b(&mut env, &bob, &["1"]);
    let bridged = bridged_collection(&env.app, &env.vault_b, CHAIN_A, &env.collection).unwrap();

    // alice holds nothing on B
    let op = nft_op(CHAIN_A, &env.alice, &bridged, &["1"]);
    let res = send_nft(&mut env.app, &env.vault_b, &env.alice, op, &[]);
    assert_error_contains(res, "is not owned by");
    assert_eq!(owner_of(&env.app, &bridged, "1"), Some(env.bob.to_string()));
}

#[test]
fn test_invalid_recipient_fails_delivery() {
    let mut env = setup();
    let vault_b = env.vault_b.clone();

    let sent = lock_to_b(&mut env, &vault_b, &["1"]);
    let res = relay(&mut env.app, &env.relayer, &env.bridge_a, &env.bridge_b, &sent);
    assert_error(
        res,
        ContractError::InvalidRecipient {
            reason: "recipient is the vault".to_string(),
        },
    );
    assert_eq!(
        bridged_collection(&env.app, &env.vault_b, CHAIN_A, &env.collection),
        None
    );
}

#[test]
fn test_direct_invocation_rejected() {
    let mut env = setup();

    let res = env.app.execute_contract(
        env.bob.clone(),
        env.vault_b.clone(),
        &nft_vault::msg::ExecuteMsg::OnMessageInvocation {
            data: cosmwasm_std::Binary::default(),
        },
        &[],
    );
    assert_error(
        res,
        ContractError::UnauthorizedCaller {
            reason: format!("{} is not the bridge", env.bob),
        },
    );
}

#[test]
fn test_delivery_while_paused_succeeds() {
    let mut env = setup();
    let bob = env.bob.clone();
    env.app
        .execute_contract(
            env.owner.clone(),
            env.vault_b.clone(),
            &nft_vault::msg::ExecuteMsg::Pause {},
            &[],
        )
        .unwrap();

    bridge_to_b(&mut env, &bob, &["1"]);
    let bridged = bridged_collection(&env.app, &env.vault_b, CHAIN_A, &env.collection).unwrap();
    assert_eq!(owner_of(&env.app, &bridged, "1"), Some(env.bob.to_string()));
}
