//! Stdin replay harness for the trade store.
//!
//! Reads one JSON action per line, dispatches it, and prints the
//! resulting state snapshot as JSON. An optional first argument names a
//! JSON file seeding the context (`{"markets": [...], "user": "..."}`).

use std::sync::Arc;

use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info};

use tradedeck::config::fetch_config;
use tradedeck::context::StaticContext;
use tradedeck::dispatcher::spawn_dispatcher;
use tradedeck::models::{Market, TradeBook};
use tradedeck::store::{Action, TradeStore};
use tradedeck::TradedeckError;

/// Context seed file format.
#[derive(Default, Deserialize)]
struct ContextSeed {
    #[serde(default)]
    markets: Vec<Market>,
    #[serde(default)]
    user: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), TradedeckError> {
    // Initialize tracing subscriber for logging output.
    tracing_subscriber::fmt::init();

    let config = fetch_config()?;

    let seed = match std::env::args().nth(1) {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => ContextSeed::default(),
    };

    let context = Arc::new(StaticContext::new());
    for market in seed.markets {
        context.add_market(market);
    }
    if let Some(user) = seed.user {
        context.set_user(user);
    }

    let store = TradeStore::new(config, context, TradeBook::default());
    let (reload_tx, mut reload_rx) = mpsc::unbounded_channel();
    let handle = spawn_dispatcher(store, reload_tx);

    // The harness has no backend to fetch from; just surface the requests.
    tokio::spawn(async move {
        while reload_rx.recv().await.is_some() {
            info!("reload requested");
        }
    });

    let mut state = handle.watch();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let action: Action = match serde_json::from_str(&line) {
            Ok(action) => action,
            Err(err) => {
                error!(%err, "skipping undecodable action");
                continue;
            }
        };
        handle.dispatch(action);

        if state.changed().await.is_ok() {
            println!("{}", serde_json::to_string(&*state.borrow_and_update())?);
        }
    }

    Ok(())
}
