//! Shared models for the trade store.
//!
//! Contains the market descriptor and trade entity types used by the
//! action payloads and the store state.

pub mod market;
pub mod trade;

pub use market::Market;
pub use trade::{Side, Trade, TradeBook};
