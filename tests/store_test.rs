//! End-to-end store behaviour through the JSON action boundary.

use std::sync::Arc;

use rust_decimal_macros::dec;
use tradedeck::config::StoreConfig;
use tradedeck::context::StaticContext;
use tradedeck::models::{Market, TradeBook};
use tradedeck::store::{Action, TradeStore};

fn market(id: i64, name: &str) -> Market {
    Market {
        id,
        name: name.to_string(),
    }
}

fn action(json: &str) -> Action {
    serde_json::from_str(json).expect("action should decode")
}

fn fresh_store() -> TradeStore {
    let ctx = Arc::new(StaticContext::new());
    ctx.add_market(market(1, "A"));
    ctx.add_market(market(2, "B"));
    ctx.set_user("0xuser");
    TradeStore::new(StoreConfig::default(), ctx, TradeBook::default())
}

#[test]
fn load_success_scenario() {
    let mut store = fresh_store();

    store.apply(action(
        r#"{"type": "LOAD_TRADES_SUCCESS", "payload": [
            {"id": 1, "type": "buy", "price": 10,
             "market": {"id": 1, "name": "A"}, "status": "mined"},
            {"id": 2, "type": "sell", "price": 5,
             "market": {"id": 1, "name": "A"}, "status": "mined"}
        ]}"#,
    ));

    let state = store.state();
    assert_eq!(state.trade_buys.len(), 1);
    assert_eq!(state.trade_sells.len(), 1);
    assert!(!state.loading);
    assert_eq!(state.percent, 100.0);
    assert!(state.error.is_none());
}

#[test]
fn full_load_cycle_resets_then_populates() {
    let mut store = fresh_store();

    store.apply(action(r#"{"type": "LOAD_TRADES"}"#));
    let state = store.state();
    assert!(state.loading);
    assert_eq!(state.percent, 0.0);

    store.apply(action(
        r#"{"type": "LOAD_TRADES_PROGRESS", "payload": {"percent": 60}}"#,
    ));
    assert_eq!(store.state().percent, 60.0);

    store.apply(action(
        r#"{"type": "LOAD_TRADES_SUCCESS", "payload": [
            {"id": 3, "type": "buy", "price": 8, "amount": 4,
             "market": {"id": 1, "name": "A"}, "status": "mined"}
        ]}"#,
    ));
    let state = store.state();
    assert!(!state.loading);
    assert_eq!(state.trade_buys[0].price, dec!(8));
}

#[test]
fn failed_load_reports_error_and_empties_book() {
    let mut store = fresh_store();
    store.apply(action(
        r#"{"type": "LOAD_TRADES_SUCCESS", "payload": [
            {"id": 1, "type": "buy", "price": 10,
             "market": {"id": 1, "name": "A"}, "status": "mined"}
        ]}"#,
    ));

    store.apply(action(
        r#"{"type": "LOAD_TRADES_FAIL", "payload": {"error": "X"}}"#,
    ));

    let state = store.state();
    assert_eq!(state.error.as_deref(), Some("X"));
    assert!(!state.loading);
    assert_eq!(state.percent, 0.0);
    assert!(state.trade_buys.is_empty());
}

#[test]
fn added_buy_visible_with_computed_total() {
    let mut store = fresh_store();
    store.apply(action(
        r#"{"type": "ADD_TRADE", "payload":
            {"id": 10, "type": 1, "price": 4, "amount": 10,
             "market": 1, "status": "pending"}}"#,
    ));

    let state = store.state();
    assert_eq!(state.trade_buys.len(), 1);
    let trade = &state.trade_buys[0];
    assert_eq!(trade.total, dec!(2.5));
    assert_eq!(trade.market, market(1, "A"));
    assert_eq!(trade.owner.as_deref(), Some("0xuser"));
    assert_eq!(trade.status, "pending");
}

#[test]
fn fill_and_cancel_are_observationally_identical() {
    let mut fill_store = fresh_store();
    let mut cancel_store = fresh_store();
    let load = r#"{"type": "LOAD_TRADES_SUCCESS", "payload": [
        {"id": 5, "type": "sell", "price": 7,
         "market": {"id": 1, "name": "A"}, "status": "mined"}
    ]}"#;
    fill_store.apply(action(load));
    cancel_store.apply(action(load));

    fill_store.apply(action(
        r#"{"type": "FILL_TRADE", "payload": {"id": 5, "type": 0}}"#,
    ));
    cancel_store.apply(action(
        r#"{"type": "CANCEL_TRADE", "payload": {"id": 5, "type": 0}}"#,
    ));

    assert_eq!(fill_store.state().trade_sells[0].status, "new");
    assert_eq!(cancel_store.state().trade_sells[0].status, "new");
}

#[test]
fn switched_market_view_is_subset_of_cache() {
    let mut store = fresh_store();
    store.apply(action(
        r#"{"type": "LOAD_TRADES_SUCCESS", "payload": [
            {"id": 1, "type": "buy", "price": 10,
             "market": {"id": 1, "name": "A"}, "status": "mined"},
            {"id": 2, "type": "buy", "price": 12,
             "market": {"id": 2, "name": "B"}, "status": "mined"},
            {"id": 3, "type": "sell", "price": 3,
             "market": {"id": 2, "name": "B"}, "status": "mined"}
        ]}"#,
    ));

    store.apply(action(
        r#"{"type": "SWITCH_MARKET", "payload": {"id": "2", "name": "B"}}"#,
    ));

    let state = store.state();
    assert!(state.trade_buys.iter().all(|t| t.market == market(2, "B")));
    assert!(state.trade_sells.iter().all(|t| t.market == market(2, "B")));
    assert_eq!(state.trade_buys.len(), 1);
    assert_eq!(state.trade_sells.len(), 1);
}

#[test]
fn snapshot_serializes_with_wire_names() {
    let mut store = fresh_store();
    store.apply(action(r#"{"type": "SWITCH_TYPE", "payload": 2}"#));

    let json = serde_json::to_value(store.state()).unwrap();
    assert_eq!(json["type"], 2);
    assert_eq!(json["title"], "Trades");
    assert_eq!(json["loading"], true);
    assert!(json["trade_buys"].as_array().unwrap().is_empty());
}
