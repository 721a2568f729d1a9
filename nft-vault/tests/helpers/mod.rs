//! Two-chain harness for the NFT vault.
//!
//! Same layout as the token vault harness: chain A (id 1) and chain B (id 2)
//! each run a mock bridge and an NFT vault. The canonical "PUNK" collection
//! on chain A is a plain cw721-base instance whose minter is the test owner.

#![allow(dead_code)]

use cosmwasm_std::{coins, Addr, Empty, HexBinary, Uint128};
use cw721::{Cw721ExecuteMsg, Cw721QueryMsg, OwnerOfResponse, TokensResponse};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};

use common::bridge::Message;
use common::ContractError;
use nft_vault::msg::{BridgeNftOp, ExecuteMsg, InstantiateMsg, QueryMsg};

pub const NATIVE: &str = "uluna";
pub const CHAIN_A: u64 = 1;
pub const CHAIN_B: u64 = 2;
/// Ids alice holds on the canonical collection
pub const ALICE_IDS: [&str; 3] = ["1", "2", "3"];

pub fn contract_vault() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        nft_vault::contract::execute,
        nft_vault::contract::instantiate,
        nft_vault::contract::query,
    )
    .with_reply(nft_vault::contract::reply);
    Box::new(contract)
}

pub fn contract_bridge() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        mock_bridge::contract::execute,
        mock_bridge::contract::instantiate,
        mock_bridge::contract::query,
    )
    .with_reply(mock_bridge::contract::reply);
    Box::new(contract)
}

pub fn contract_bridged_nft() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        bridged_nft::contract::execute,
        bridged_nft::contract::instantiate,
        bridged_nft::contract::query,
    );
    Box::new(contract)
}

pub fn contract_cw721() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw721_base::entry::execute,
        cw721_base::entry::instantiate,
        cw721_base::entry::query,
    );
    Box::new(contract)
}

pub fn contract_cw20() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

// ============================================================================
// Test Setup
// ============================================================================

pub struct TestEnv {
    pub app: App,
    pub owner: Addr,
    pub alice: Addr,
    pub bob: Addr,
    pub relayer: Addr,
    pub bridge_a: Addr,
    pub bridge_b: Addr,
    pub vault_a: Addr,
    pub vault_b: Addr,
    /// Canonical collection on chain A
    pub collection: Addr,
    pub nft_code_id: u64,
    pub cw20_code_id: u64,
}

pub fn setup() -> TestEnv {
    let mut app = App::default();
    let owner = Addr::unchecked("terra1owner");
    let alice = Addr::unchecked("terra1alice");
    let bob = Addr::unchecked("terra1bob");
    let relayer = Addr::unchecked("terra1relayer");

    app.init_modules(|router, _, storage| {
        for account in [&owner, &alice, &bob] {
            router
                .bank
                .init_balance(storage, account, coins(10_000_000_000, NATIVE))
                .unwrap();
        }
    });

    let bridge_code_id = app.store_code(contract_bridge());
    let vault_code_id = app.store_code(contract_vault());
    let nft_code_id = app.store_code(contract_bridged_nft());
    let cw721_code_id = app.store_code(contract_cw721());
    let cw20_code_id = app.store_code(contract_cw20());

    let bridge_a = instantiate_bridge(&mut app, bridge_code_id, &owner, CHAIN_A);
    let bridge_b = instantiate_bridge(&mut app, bridge_code_id, &owner, CHAIN_B);
    let vault_a = instantiate_vault(
        &mut app,
        vault_code_id,
        &owner,
        &bridge_a,
        CHAIN_A,
        nft_code_id,
    );
    let vault_b = instantiate_vault(
        &mut app,
        vault_code_id,
        &owner,
        &bridge_b,
        CHAIN_B,
        nft_code_id,
    );

    set_sibling(&mut app, &owner, &vault_a, CHAIN_B, &vault_b);
    set_sibling(&mut app, &owner, &vault_b, CHAIN_A, &vault_a);

    for bridge in [&bridge_a, &bridge_b] {
        app.send_tokens(owner.clone(), bridge.clone(), &coins(1_000_000_000, NATIVE))
            .unwrap();
    }

    let collection = instantiate_collection(&mut app, cw721_code_id, &owner, "PUNK", "Punks");
    for token_id in ALICE_IDS {
        mint(&mut app, &owner, &collection, token_id, &alice);
    }

    TestEnv {
        app,
        owner,
        alice,
        bob,
        relayer,
        bridge_a,
        bridge_b,
        vault_a,
        vault_b,
        collection,
        nft_code_id,
        cw20_code_id,
    }
}

pub fn instantiate_bridge(app: &mut App, code_id: u64, owner: &Addr, chain_id: u64) -> Addr {
    app.instantiate_contract(
        code_id,
        owner.clone(),
        &mock_bridge::msg::InstantiateMsg {
            chain_id,
            native_denom: NATIVE.to_string(),
        },
        &[],
        format!("bridge-{}", chain_id),
        None,
    )
    .unwrap()
}

pub fn instantiate_vault(
    app: &mut App,
    code_id: u64,
    owner: &Addr,
    bridge: &Addr,
    chain_id: u64,
    bridged_code_id: u64,
) -> Addr {
    app.instantiate_contract(
        code_id,
        owner.clone(),
        &InstantiateMsg {
            owner: owner.to_string(),
            bridge: bridge.to_string(),
            chain_id,
            native_denom: NATIVE.to_string(),
            bridged_code_id,
            min_migration_delay: None,
        },
        &[],
        format!("nft-vault-{}", chain_id),
        Some(owner.to_string()),
    )
    .unwrap()
}

pub fn set_sibling(app: &mut App, owner: &Addr, vault: &Addr, chain_id: u64, sibling: &Addr) {
    app.execute_contract(
        owner.clone(),
        vault.clone(),
        &ExecuteMsg::SetSibling {
            chain_id,
            vault: Some(sibling.to_string()),
        },
        &[],
    )
    .unwrap();
}

/// cw721-base collection minted by `minter`.
pub fn instantiate_collection(
    app: &mut App,
    code_id: u64,
    minter: &Addr,
    symbol: &str,
    name: &str,
) -> Addr {
    app.instantiate_contract(
        code_id,
        minter.clone(),
        &cw721_base::InstantiateMsg {
            name: name.to_string(),
            symbol: symbol.to_string(),
            minter: minter.to_string(),
        },
        &[],
        format!("cw721-{}", symbol),
        None,
    )
    .unwrap()
}

pub fn mint(app: &mut App, minter: &Addr, collection: &Addr, token_id: &str, owner: &Addr) {
    app.execute_contract(
        minter.clone(),
        collection.clone(),
        &cw721_base::ExecuteMsg::<Option<Empty>, Empty>::Mint {
            token_id: token_id.to_string(),
            owner: owner.to_string(),
            token_uri: None,
            extension: None,
        },
        &[],
    )
    .unwrap();
}

// ============================================================================
// Actions
// ============================================================================

pub fn approve_all(app: &mut App, collection: &Addr, owner: &Addr, operator: &Addr) {
    app.execute_contract(
        owner.clone(),
        collection.clone(),
        &Cw721ExecuteMsg::ApproveAll {
            operator: operator.to_string(),
            expires: None,
        },
        &[],
    )
    .unwrap();
}

/// Single-id approval, leaving the owner's other ids untouched.
pub fn approve(app: &mut App, collection: &Addr, owner: &Addr, spender: &Addr, token_id: &str) {
    app.execute_contract(
        owner.clone(),
        collection.clone(),
        &Cw721ExecuteMsg::Approve {
            spender: spender.to_string(),
            token_id: token_id.to_string(),
            expires: None,
        },
        &[],
    )
    .unwrap();
}

pub fn nft_op(dest_chain_id: u64, to: &Addr, collection: &Addr, token_ids: &[&str]) -> BridgeNftOp {
    BridgeNftOp {
        dest_chain_id,
        dest_owner: None,
        to: to.to_string(),
        token: collection.to_string(),
        token_ids: token_ids.iter().map(|id| id.to_string()).collect(),
        amounts: vec![Uint128::zero(); token_ids.len()],
        gas_limit: 200_000,
        fee: Uint128::zero(),
        refund_to: None,
        memo: None,
    }
}

pub fn send_nft(
    app: &mut App,
    vault: &Addr,
    sender: &Addr,
    op: BridgeNftOp,
    funds: &[cosmwasm_std::Coin],
) -> anyhow::Result<AppResponse> {
    app.execute_contract(sender.clone(), vault.clone(), &ExecuteMsg::SendNft(op), funds)
}

pub fn sent_message_hash(res: &AppResponse) -> HexBinary {
    let value = event_attr(res, "wasm-token_sent", "message_hash")
        .expect("token_sent event not found");
    HexBinary::from_hex(&value).unwrap()
}

pub fn sent_message(app: &App, bridge: &Addr, hash: &HexBinary) -> Message {
    app.wrap()
        .query_wasm_smart(
            bridge,
            &mock_bridge::msg::QueryMsg::Message { hash: hash.clone() },
        )
        .unwrap()
}

pub fn relay(
    app: &mut App,
    relayer: &Addr,
    src_bridge: &Addr,
    dest_bridge: &Addr,
    res: &AppResponse,
) -> anyhow::Result<AppResponse> {
    let message = sent_message(app, src_bridge, &sent_message_hash(res));
    app.execute_contract(
        relayer.clone(),
        dest_bridge.clone(),
        &mock_bridge::msg::ExecuteMsg::ProcessMessage { message },
        &[],
    )
}

pub fn recall(
    app: &mut App,
    relayer: &Addr,
    src_bridge: &Addr,
    res: &AppResponse,
) -> anyhow::Result<AppResponse> {
    let message = sent_message(app, src_bridge, &sent_message_hash(res));
    app.execute_contract(
        relayer.clone(),
        src_bridge.clone(),
        &mock_bridge::msg::ExecuteMsg::RecallMessage { message },
        &[],
    )
}

/// Approves the vault and sends `token_ids` of the canonical collection from alice to `to` on B.
pub fn lock_to_b(env: &mut TestEnv, to: &Addr, token_ids: &[&str]) -> AppResponse {
    approve_all(&mut env.app, &env.collection, &env.alice, &env.vault_a);
    let op = nft_op(CHAIN_B, to, &env.collection, token_ids);
    send_nft(&mut env.app, &env.vault_a, &env.alice, op, &[]).unwrap()
}

/// `lock_to_b` followed by delivery on chain B.
pub fn bridge_to_b(env: &mut TestEnv, to: &Addr, token_ids: &[&str]) -> AppResponse {
    let sent = lock_to_b(env, to, token_ids);
    relay(&mut env.app, &env.relayer, &env.bridge_a, &env.bridge_b, &sent).unwrap()
}

// ============================================================================
// Queries
// ============================================================================

pub fn event_attr(res: &AppResponse, ty: &str, key: &str) -> Option<String> {
    res.events
        .iter()
        .filter(|e| e.ty == ty)
        .flat_map(|e| &e.attributes)
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
}

pub fn has_event(res: &AppResponse, ty: &str) -> bool {
    res.events.iter().any(|e| e.ty == ty)
}

pub fn owner_of(app: &App, collection: &Addr, token_id: &str) -> Option<String> {
    app.wrap()
        .query_wasm_smart::<OwnerOfResponse>(
            collection,
            &Cw721QueryMsg::OwnerOf {
                token_id: token_id.to_string(),
                include_expired: None,
            },
        )
        .ok()
        .map(|res| res.owner)
}

pub fn tokens_of(app: &App, collection: &Addr, owner: &Addr) -> Vec<String> {
    let res: TokensResponse = app
        .wrap()
        .query_wasm_smart(
            collection,
            &Cw721QueryMsg::Tokens {
                owner: owner.to_string(),
                start_after: None,
                limit: None,
            },
        )
        .unwrap();
    res.tokens
}

pub fn native_balance(app: &App, account: &Addr) -> Uint128 {
    app.wrap().query_balance(account, NATIVE).unwrap().amount
}

pub fn bridged_collection(
    app: &App,
    vault: &Addr,
    chain_id: u64,
    canonical: &Addr,
) -> Option<Addr> {
    let res: common::vault::BridgedTokenResponse = app
        .wrap()
        .query_wasm_smart(
            vault,
            &QueryMsg::BridgedToken {
                chain_id,
                addr: canonical.to_string(),
            },
        )
        .unwrap();
    res.bridged
}

pub fn assert_error(res: anyhow::Result<AppResponse>, expected: ContractError) {
    let err = res.unwrap_err();
    let err_str = err.root_cause().to_string();
    assert_eq!(err_str, expected.to_string(), "unexpected error: {:?}", err);
}

pub fn assert_error_contains(res: anyhow::Result<AppResponse>, needle: &str) {
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains(needle),
        "Expected error containing {:?}, got: {}",
        needle,
        err_str
    );
}
