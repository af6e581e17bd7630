//! Read-only application context consulted by the store.
//!
//! The store never owns market or user state; it takes point-in-time
//! snapshots through this capability interface when an action needs them.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::models::Market;

/// Snapshot accessors for state owned elsewhere in the application.
pub trait ContextSource: Send + Sync {
    /// The market currently selected in the UI, if any.
    fn current_market(&self) -> Option<Market>;

    /// Resolves a market id to its full descriptor.
    fn market(&self, id: i64) -> Option<Market>;

    /// Id of the authenticated user, if any.
    fn current_user(&self) -> Option<String>;
}

/// In-memory [`ContextSource`] for tests and the stdin harness.
#[derive(Default)]
pub struct StaticContext {
    inner: RwLock<ContextState>,
}

#[derive(Default)]
struct ContextState {
    market: Option<Market>,
    markets: HashMap<i64, Market>,
    user: Option<String>,
}

impl StaticContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a market and, if none is selected yet, selects it.
    pub fn add_market(&self, market: Market) {
        let mut state = self.inner.write().expect("context lock poisoned");
        if state.market.is_none() {
            state.market = Some(market.clone());
        }
        state.markets.insert(market.id, market);
    }

    /// Changes the selected market.
    pub fn select_market(&self, market: Market) {
        let mut state = self.inner.write().expect("context lock poisoned");
        state.markets.insert(market.id, market.clone());
        state.market = Some(market);
    }

    pub fn set_user(&self, user: impl Into<String>) {
        self.inner.write().expect("context lock poisoned").user = Some(user.into());
    }
}

impl ContextSource for StaticContext {
    fn current_market(&self) -> Option<Market> {
        self.inner
            .read()
            .expect("context lock poisoned")
            .market
            .clone()
    }

    fn market(&self, id: i64) -> Option<Market> {
        self.inner
            .read()
            .expect("context lock poisoned")
            .markets
            .get(&id)
            .cloned()
    }

    fn current_user(&self) -> Option<String> {
        self.inner
            .read()
            .expect("context lock poisoned")
            .user
            .clone()
    }
}
