//! Two-chain test harness.
//!
//! Chain A (id 1) and chain B (id 2) share one `App`. Each chain has its own
//! mock bridge and token vault; the vaults are registered as each other's
//! sibling. Tests act as the relayer, moving messages from one bridge to the
//! other.

#![allow(dead_code)]

use cosmwasm_std::{
    coins, Addr, DepsMut, Empty, Env, HexBinary, MessageInfo, Response, Uint128, WasmMsg,
};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg, Expiration};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};

use common::bridge::Message;
use common::ContractError;
use token_vault::msg::{BridgeTransferOp, ExecuteMsg, InstantiateMsg, QueryMsg};

pub const NATIVE: &str = "uluna";
pub const CHAIN_A: u64 = 1;
pub const CHAIN_B: u64 = 2;
pub const FEE_SINK: &str = "terra1feesink";

// ============================================================================
// Contracts
// ============================================================================

pub fn contract_vault() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        token_vault::contract::execute,
        token_vault::contract::instantiate,
        token_vault::contract::query,
    )
    .with_reply(token_vault::contract::reply);
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

pub fn contract_bridged_token() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        bridged_token::contract::execute,
        bridged_token::contract::instantiate,
        bridged_token::contract::query,
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

/// cw20 that keeps 10% of every TransferFrom for `FEE_SINK`.
fn fee_token_execute(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: cw20_base::msg::ExecuteMsg,
) -> Result<Response, cw20_base::ContractError> {
    match msg {
        cw20_base::msg::ExecuteMsg::TransferFrom {
            owner,
            recipient,
            amount,
        } => {
            let fee = amount.multiply_ratio(1u128, 10u128);
            let res = cw20_base::allowances::execute_transfer_from(
                deps.branch(),
                env.clone(),
                info.clone(),
                owner.clone(),
                recipient,
                amount - fee,
            )?;
            if fee.is_zero() {
                return Ok(res);
            }
            cw20_base::allowances::execute_transfer_from(
                deps,
                env,
                info,
                owner,
                FEE_SINK.to_string(),
                fee,
            )
        }
        other => cw20_base::contract::execute(deps, env, info, other),
    }
}

pub fn contract_fee_token() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        fee_token_execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

/// cw20 whose TransferFrom calls back into the recipient vault with a new deposit.
fn reentrant_token_execute(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: cw20_base::msg::ExecuteMsg,
) -> Result<Response, cw20_base::ContractError> {
    match msg {
        cw20_base::msg::ExecuteMsg::TransferFrom {
            owner,
            recipient,
            amount,
        } => {
            let res = cw20_base::allowances::execute_transfer_from(
                deps.branch(),
                env.clone(),
                info,
                owner,
                recipient.clone(),
                amount,
            )?;
            let reenter = WasmMsg::Execute {
                contract_addr: recipient,
                msg: cosmwasm_std::to_json_binary(&ExecuteMsg::SendToken(BridgeTransferOp {
                    dest_chain_id: CHAIN_B,
                    dest_owner: None,
                    to: "terra1bob".to_string(),
                    token: env.contract.address.to_string(),
                    amount: Uint128::one(),
                    gas_limit: 0,
                    fee: Uint128::zero(),
                    refund_to: None,
                    memo: None,
                }))?,
                funds: vec![],
            };
            Ok(res.add_message(reenter))
        }
        other => cw20_base::contract::execute(deps, env, info, other),
    }
}

pub fn contract_reentrant_token() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        reentrant_token_execute,
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
    /// Canonical "TST" token on chain A, 18 decimals, alice holds 1_000 TST
    pub token: Addr,
    pub cw20_code_id: u64,
    pub bridged_code_id: u64,
}

pub const TST: u128 = 1_000_000_000_000_000_000;

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
    let bridged_code_id = app.store_code(contract_bridged_token());
    let cw20_code_id = app.store_code(contract_cw20());

    let bridge_a = instantiate_bridge(&mut app, bridge_code_id, &owner, CHAIN_A);
    let bridge_b = instantiate_bridge(&mut app, bridge_code_id, &owner, CHAIN_B);

    let vault_a = instantiate_vault(
        &mut app,
        vault_code_id,
        &owner,
        &bridge_a,
        CHAIN_A,
        bridged_code_id,
    );
    let vault_b = instantiate_vault(
        &mut app,
        vault_code_id,
        &owner,
        &bridge_b,
        CHAIN_B,
        bridged_code_id,
    );

    set_sibling(&mut app, &owner, &vault_a, CHAIN_B, &vault_b);
    set_sibling(&mut app, &owner, &vault_b, CHAIN_A, &vault_a);

    // Bridges pay out delivered native value from their own balance
    for bridge in [&bridge_a, &bridge_b] {
        app.send_tokens(owner.clone(), bridge.clone(), &coins(1_000_000_000, NATIVE))
            .unwrap();
    }

    let token = instantiate_cw20(
        &mut app,
        cw20_code_id,
        &owner,
        "TST",
        "Test Token",
        18,
        &alice,
        1_000 * TST,
    );

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
        token,
        cw20_code_id,
        bridged_code_id,
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
        format!("token-vault-{}", chain_id),
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

#[allow(clippy::too_many_arguments)]
pub fn instantiate_cw20(
    app: &mut App,
    code_id: u64,
    admin: &Addr,
    symbol: &str,
    name: &str,
    decimals: u8,
    holder: &Addr,
    amount: u128,
) -> Addr {
    app.instantiate_contract(
        code_id,
        admin.clone(),
        &cw20_base::msg::InstantiateMsg {
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimals,
            initial_balances: vec![Cw20Coin {
                address: holder.to_string(),
                amount: Uint128::from(amount),
            }],
            mint: None,
            marketing: None,
        },
        &[],
        format!("cw20-{}", symbol),
        None,
    )
    .unwrap()
}

// ============================================================================
// Actions
// ============================================================================

pub fn approve(app: &mut App, token: &Addr, owner: &Addr, spender: &Addr, amount: u128) {
    app.execute_contract(
        owner.clone(),
        token.clone(),
        &Cw20ExecuteMsg::IncreaseAllowance {
            spender: spender.to_string(),
            amount: Uint128::from(amount),
            expires: None::<Expiration>,
        },
        &[],
    )
    .unwrap();
}

pub fn transfer_op(dest_chain_id: u64, to: &Addr, token: &Addr, amount: u128) -> BridgeTransferOp {
    BridgeTransferOp {
        dest_chain_id,
        dest_owner: None,
        to: to.to_string(),
        token: token.to_string(),
        amount: Uint128::from(amount),
        gas_limit: 200_000,
        fee: Uint128::zero(),
        refund_to: None,
        memo: None,
    }
}

/// Approves (for canonical tokens) and deposits `amount` of `token` into `vault`.
pub fn send_token(
    app: &mut App,
    vault: &Addr,
    sender: &Addr,
    op: BridgeTransferOp,
    funds: &[cosmwasm_std::Coin],
) -> anyhow::Result<AppResponse> {
    let token = Addr::unchecked(op.token.clone());
    approve(app, &token, sender, vault, op.amount.u128());
    app.execute_contract(sender.clone(), vault.clone(), &ExecuteMsg::SendToken(op), funds)
}

/// Message hash of the `token_sent` event in `res`.
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

/// Relays the message sent in `res` from `src_bridge` to `dest_bridge`.
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

/// Recalls the message sent in `res` on its source bridge.
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

pub fn cw20_balance(app: &App, token: &Addr, account: &Addr) -> Uint128 {
    let res: BalanceResponse = app
        .wrap()
        .query_wasm_smart(
            token,
            &Cw20QueryMsg::Balance {
                address: account.to_string(),
            },
        )
        .unwrap();
    res.balance
}

pub fn native_balance(app: &App, account: &Addr) -> Uint128 {
    app.wrap().query_balance(account, NATIVE).unwrap().amount
}

pub fn bridged_token(app: &App, vault: &Addr, chain_id: u64, canonical: &Addr) -> Option<Addr> {
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
