//! Store configuration loaded from environment variables.
//!
//! Two knobs control reload behaviour:
//! - `TRADEDECK_EMBEDDED` — set to `1`/`true` when running inside an
//!   embedded browser context that owns its own reconciliation; disables
//!   the post-mutation reload timers.
//! - `TRADEDECK_RELOAD_DELAY_MS` — delay before a scheduled reload fires.

use std::time::Duration;

/// Default delay before a post-mutation reload request is sent.
const DEFAULT_RELOAD_DELAY: Duration = Duration::from_secs(2);

/// Execution-mode configuration for a [`TradeStore`](crate::store::TradeStore).
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// When true, mutating actions never schedule a delayed reload.
    pub embedded: bool,
    /// How long to wait before asking the loader to refresh.
    pub reload_delay: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            embedded: false,
            reload_delay: DEFAULT_RELOAD_DELAY,
        }
    }
}

/// Loads the store configuration from environment variables.
///
/// Both variables are optional; unset or empty values fall back to the
/// defaults (standalone mode, 2 second reload delay).
///
/// # Errors
///
/// Returns [`TradedeckError::Config`](crate::TradedeckError::Config) if
/// `TRADEDECK_RELOAD_DELAY_MS` is set but is not an unsigned integer.
pub fn fetch_config() -> crate::Result<StoreConfig> {
    let embedded = non_empty_var("TRADEDECK_EMBEDDED")
        .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);

    let reload_delay = match non_empty_var("TRADEDECK_RELOAD_DELAY_MS") {
        Some(raw) => {
            let millis: u64 = raw.parse().map_err(|_| {
                crate::TradedeckError::Config(format!(
                    "TRADEDECK_RELOAD_DELAY_MS must be an integer, got {raw:?}"
                ))
            })?;
            Duration::from_millis(millis)
        }
        None => DEFAULT_RELOAD_DELAY,
    };

    Ok(StoreConfig {
        embedded,
        reload_delay,
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
