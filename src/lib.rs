//! Observable trade-book state store for a trading client.
//!
//! Provides typed actions, a single-owner [`store::TradeStore`] reducer,
//! and an async dispatcher that serializes actions, republishes state
//! snapshots and schedules backend-reconciliation reloads.

pub mod config;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod models;
pub mod store;

pub use error::{Result, TradedeckError};
