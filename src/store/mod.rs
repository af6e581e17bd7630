//! The trade store: an observable, single-owner state container.
//!
//! All mutation goes through [`TradeStore::apply`]; reads go through
//! [`TradeStore::state`]. Every applied action ends with one change
//! notification on the broadcast channel handed out by
//! [`TradeStore::subscribe`]. The notification carries no payload;
//! consumers re-read the state they care about.

pub mod action;

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::context::ContextSource;
use crate::models::{Market, Trade, TradeBook};

pub use action::{Action, AddTrade, Effect, LoadFailure, Progress, TradeRef};

/// Capacity of the change-notification channel. Notifications carry no
/// payload, so a lagged subscriber loses nothing it cannot recover by
/// re-reading the state.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Observable state container for the order book view.
pub struct TradeStore {
    /// Currently displayed, market-filtered view.
    trades: TradeBook,
    /// Unfiltered superset, the source when the market filter changes.
    tradescache: TradeBook,
    loading: bool,
    error: Option<String>,
    percent: f64,
    /// Numeric UI view-mode selector, opaque to the store.
    view_type: i64,
    config: StoreConfig,
    context: Arc<dyn ContextSource>,
    changes: broadcast::Sender<()>,
}

impl TradeStore {
    /// Creates a store with an optional seed book.
    pub fn new(config: StoreConfig, context: Arc<dyn ContextSource>, seed: TradeBook) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            trades: seed.clone(),
            tradescache: seed,
            loading: true,
            error: None,
            percent: 0.0,
            view_type: 1,
            config,
            context,
            changes,
        }
    }

    /// Subscribes to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.changes.subscribe()
    }

    /// Handle the dispatcher uses to hand out subscriptions after the
    /// store has moved into its task.
    pub(crate) fn change_sender(&self) -> broadcast::Sender<()> {
        self.changes.clone()
    }

    /// Applies one action, emits a change notification, and returns any
    /// follow-up effect the caller must run.
    pub fn apply(&mut self, action: Action) -> Option<Effect> {
        let effect = match action {
            Action::LoadTrades => self.on_load_trades(),
            Action::LoadTradesProgress(progress) => self.on_load_progress(progress),
            Action::LoadTradesSuccess(records) => self.on_load_success(records),
            Action::LoadTradesFail(failure) => self.on_load_fail(failure),
            Action::AddTrade(payload) => self.on_add_trade(payload),
            Action::FillTrade(tref) => self.on_fill_trade(tref),
            Action::CancelTrade(tref) => self.on_cancel_trade(tref),
            Action::SwitchType(mode) => self.on_switch_type(mode),
            Action::SwitchMarket(market) => self.on_switch_market(market),
        };
        // Subscribers re-read state on their own schedule; a send error
        // just means nobody is listening right now.
        let _ = self.changes.send(());
        effect
    }

    /// Returns a read-only snapshot of the current state.
    pub fn state(&self) -> StoreSnapshot {
        StoreSnapshot {
            trade_buys: self.trades.buys.clone(),
            trade_sells: self.trades.sells.clone(),
            loading: self.loading,
            error: self.error.clone(),
            title: "Trades",
            view_type: self.view_type,
            percent: self.percent,
        }
    }

    fn on_load_trades(&mut self) -> Option<Effect> {
        self.trades = TradeBook::default();
        self.loading = true;
        self.error = None;
        self.percent = 0.0;
        None
    }

    fn on_load_progress(&mut self, progress: Progress) -> Option<Effect> {
        debug!(percent = progress.percent, "trade load progress");
        self.percent = progress.percent;
        None
    }

    fn on_load_success(&mut self, records: Vec<Trade>) -> Option<Effect> {
        let mut book = TradeBook::default();
        for trade in records {
            book.side_mut(trade.side).push(trade);
        }
        book.buys.sort_by(|a, b| b.price.cmp(&a.price));
        book.sells.sort_by(|a, b| a.price.cmp(&b.price));

        self.tradescache = book.clone();
        self.trades = match self.context.current_market() {
            Some(market) => filter_market(&book, &market),
            // No market selected yet; show everything rather than nothing.
            None => book,
        };

        self.loading = false;
        self.error = None;
        self.percent = 100.0;
        None
    }

    fn on_load_fail(&mut self, failure: LoadFailure) -> Option<Effect> {
        self.trades = failure.trades;
        self.loading = false;
        self.percent = 0.0;
        self.error = Some(failure.error);
        None
    }

    fn on_add_trade(&mut self, payload: AddTrade) -> Option<Effect> {
        let market = match self.context.market(payload.market) {
            Some(market) => market,
            None => {
                warn!(market_id = payload.market, "unknown market on add");
                Market {
                    id: payload.market,
                    name: String::new(),
                }
            }
        };

        let trade = Trade {
            id: payload.id,
            side: payload.side,
            price: payload.price,
            amount: payload.amount,
            total: payload
                .amount
                .checked_div(payload.price)
                .unwrap_or(Decimal::ZERO),
            market,
            owner: self.context.current_user(),
            status: payload.status,
        };

        // Append and re-sort ascending. Both sides sort ascending here;
        // the next full reload restores the descending buy ordering.
        let side = self.trades.side_mut(payload.side);
        side.push(trade);
        side.sort_by(|a, b| a.price.cmp(&b.price));

        self.reload_effect()
    }

    fn on_fill_trade(&mut self, tref: TradeRef) -> Option<Effect> {
        info!(id = tref.id, side = ?tref.side, "filling trade");
        self.mark_trade(tref);
        self.reload_effect()
    }

    fn on_cancel_trade(&mut self, tref: TradeRef) -> Option<Effect> {
        info!(id = tref.id, side = ?tref.side, "cancelling trade");
        self.mark_trade(tref);
        self.reload_effect()
    }

    /// Sets the referenced trade's status to `"new"`. An unknown id is a
    /// warning, not a fault: the scheduled reload resynchronizes anyway.
    fn mark_trade(&mut self, tref: TradeRef) {
        match self
            .trades
            .side_mut(tref.side)
            .iter_mut()
            .find(|t| t.id == tref.id)
        {
            Some(trade) => trade.status = "new".to_string(),
            None => warn!(id = tref.id, side = ?tref.side, "trade not found"),
        }
    }

    fn on_switch_type(&mut self, mode: i64) -> Option<Effect> {
        self.view_type = mode;
        None
    }

    fn on_switch_market(&mut self, market: Market) -> Option<Effect> {
        self.trades = filter_market(&self.tradescache, &market);
        None
    }

    fn reload_effect(&self) -> Option<Effect> {
        if self.config.embedded {
            None
        } else {
            Some(Effect::ScheduleReload(self.config.reload_delay))
        }
    }
}

/// Restricts a book to the trades recorded against the given market.
fn filter_market(source: &TradeBook, market: &Market) -> TradeBook {
    TradeBook {
        buys: source
            .buys
            .iter()
            .filter(|t| t.market == *market)
            .cloned()
            .collect(),
        sells: source
            .sells
            .iter()
            .filter(|t| t.market == *market)
            .cloned()
            .collect(),
    }
}

/// Read-only view of the store state handed to subscribers.
#[derive(Clone, Debug, Serialize)]
pub struct StoreSnapshot {
    pub trade_buys: Vec<Trade>,
    pub trade_sells: Vec<Trade>,
    pub loading: bool,
    pub error: Option<String>,
    pub title: &'static str,
    #[serde(rename = "type")]
    pub view_type: i64,
    pub percent: f64,
}
