//! Action messages dispatched to the store, and the effects they yield.
//!
//! Actions arrive as adjacently tagged JSON (`{"type": ..., "payload":
//! ...}`), matching the shape emitted by the application's action
//! creators. Numeric side codes are resolved to [`Side`] here, at the
//! boundary, so the reducer only ever sees the enum.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::models::market::int_from_str_or_int;
use crate::models::{Market, Side, Trade, TradeBook};

/// A tagged message describing an intended state change.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Action {
    /// Begin a reload: clear the book and enter the loading state.
    /// The fetch itself is owned by an external action creator.
    #[serde(rename = "LOAD_TRADES")]
    LoadTrades,

    /// Progress report for an in-flight fetch.
    #[serde(rename = "LOAD_TRADES_PROGRESS")]
    LoadTradesProgress(Progress),

    /// Completed fetch carrying the full set of raw trade records.
    #[serde(rename = "LOAD_TRADES_SUCCESS")]
    LoadTradesSuccess(Vec<Trade>),

    /// Failed fetch.
    #[serde(rename = "LOAD_TRADES_FAIL")]
    LoadTradesFail(LoadFailure),

    /// A trade created locally, to be shown before the backend confirms it.
    #[serde(rename = "ADD_TRADE")]
    AddTrade(AddTrade),

    /// Mark a resting trade as taken.
    #[serde(rename = "FILL_TRADE")]
    FillTrade(TradeRef),

    /// Mark an own trade as cancelled.
    #[serde(rename = "CANCEL_TRADE")]
    CancelTrade(TradeRef),

    /// Switch the numeric UI view mode.
    #[serde(rename = "SWITCH_TYPE")]
    SwitchType(i64),

    /// Switch the active market filter.
    #[serde(rename = "SWITCH_MARKET")]
    SwitchMarket(Market),
}

/// Payload of [`Action::LoadTradesProgress`].
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Progress {
    pub percent: f64,
}

/// Payload of [`Action::LoadTradesFail`].
#[derive(Clone, Debug, Deserialize)]
pub struct LoadFailure {
    pub error: String,
    /// Replacement book, usually empty.
    #[serde(flatten)]
    pub trades: TradeBook,
}

/// Payload of [`Action::AddTrade`].
#[derive(Clone, Debug, Deserialize)]
pub struct AddTrade {
    pub id: u64,
    #[serde(rename = "type", deserialize_with = "side_from_code")]
    pub side: Side,
    pub price: Decimal,
    pub amount: Decimal,
    /// Market id, resolved to a full descriptor through the context.
    #[serde(deserialize_with = "int_from_str_or_int")]
    pub market: i64,
    pub status: String,
}

/// Payload of [`Action::FillTrade`] and [`Action::CancelTrade`].
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct TradeRef {
    pub id: u64,
    #[serde(rename = "type", deserialize_with = "side_from_code")]
    pub side: Side,
}

/// Decodes the numeric side code (1 = buy, anything else = sell).
fn side_from_code<'de, D>(deserializer: D) -> Result<Side, D::Error>
where
    D: Deserializer<'de>,
{
    let code = i64::deserialize(deserializer)?;
    Ok(Side::from_code(code))
}

/// Follow-up work the reducer cannot perform itself.
///
/// Returned by [`TradeStore::apply`](crate::store::TradeStore::apply);
/// the dispatcher owns the timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Ask the external loader to refresh after the given delay, to
    /// reconcile the optimistic local mutation with the backend.
    ScheduleReload(Duration),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn decodes_bare_load_action() {
        let action: Action = serde_json::from_str(r#"{"type": "LOAD_TRADES"}"#).unwrap();
        assert!(matches!(action, Action::LoadTrades));
    }

    #[test]
    fn decodes_progress() {
        let action: Action = serde_json::from_str(
            r#"{"type": "LOAD_TRADES_PROGRESS", "payload": {"percent": 42.5}}"#,
        )
        .unwrap();
        match action {
            Action::LoadTradesProgress(p) => assert_eq!(p.percent, 42.5),
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn decodes_add_trade_with_numeric_side() {
        let action: Action = serde_json::from_str(
            r#"{"type": "ADD_TRADE", "payload":
                {"id": 12, "type": 1, "price": "500", "amount": "2",
                 "market": "3", "status": "pending"}}"#,
        )
        .unwrap();
        match action {
            Action::AddTrade(add) => {
                assert_eq!(add.side, Side::Buy);
                assert_eq!(add.price, dec!(500));
                assert_eq!(add.market, 3);
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn non_one_side_code_is_sell() {
        let action: Action =
            serde_json::from_str(r#"{"type": "FILL_TRADE", "payload": {"id": 4, "type": 2}}"#)
                .unwrap();
        match action {
            Action::FillTrade(tref) => assert_eq!(tref.side, Side::Sell),
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn decodes_load_failure_with_empty_book() {
        let action: Action =
            serde_json::from_str(r#"{"type": "LOAD_TRADES_FAIL", "payload": {"error": "boom"}}"#)
                .unwrap();
        match action {
            Action::LoadTradesFail(fail) => {
                assert_eq!(fail.error, "boom");
                assert!(fail.trades.buys.is_empty());
                assert!(fail.trades.sells.is_empty());
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn decodes_switch_market_with_string_id() {
        let action: Action = serde_json::from_str(
            r#"{"type": "SWITCH_MARKET", "payload": {"id": "2", "name": "ETH/XMR"}}"#,
        )
        .unwrap();
        match action {
            Action::SwitchMarket(market) => {
                assert_eq!(market.id, 2);
                assert_eq!(market.name, "ETH/XMR");
            }
            other => panic!("unexpected action {other:?}"),
        }
    }
}
