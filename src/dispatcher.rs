//! Single-actor action pipeline around a [`TradeStore`].
//!
//! Actions are queued on an unbounded channel and applied one at a time
//! by a spawned task that owns the store, so handlers run to completion
//! with no interleaving. After each action the task republishes a
//! [`StoreSnapshot`] on a watch channel. Reload effects become
//! fire-and-forget timers: not awaited, not cancellable, not
//! deduplicated. The external loader is expected to tolerate bursts.

use tokio::sync::{broadcast, mpsc, watch};
use tracing::warn;

use crate::store::{Action, Effect, StoreSnapshot, TradeStore};

/// Request sent to the external loader when a reload timer fires. The
/// loader reacts by running its fetch and dispatching the LOAD_TRADES
/// action sequence.
#[derive(Clone, Copy, Debug)]
pub struct ReloadRequest;

/// Cloneable handle for dispatching actions and reading state.
#[derive(Clone)]
pub struct DispatcherHandle {
    actions: mpsc::UnboundedSender<Action>,
    changes: broadcast::Sender<()>,
    snapshot: watch::Receiver<StoreSnapshot>,
}

impl DispatcherHandle {
    /// Queues an action. Dispatch is fire-and-forget; if the dispatcher
    /// task is gone the action is dropped with a warning.
    pub fn dispatch(&self, action: Action) {
        if self.actions.send(action).is_err() {
            warn!("dispatcher stopped, action dropped");
        }
    }

    /// Subscribes to payload-free change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.changes.subscribe()
    }

    /// Returns the snapshot published after the most recent action.
    pub fn state(&self) -> StoreSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Watch channel carrying every published snapshot, for consumers
    /// that want to await changes rather than poll.
    pub fn watch(&self) -> watch::Receiver<StoreSnapshot> {
        self.snapshot.clone()
    }
}

/// Spawns the dispatcher task and returns its handle.
///
/// `reload_tx` is the channel to the external loader; it receives one
/// [`ReloadRequest`] per mutating action, `reload_delay` after the
/// mutation was applied.
pub fn spawn_dispatcher(
    mut store: TradeStore,
    reload_tx: mpsc::UnboundedSender<ReloadRequest>,
) -> DispatcherHandle {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshot_rx) = watch::channel(store.state());
    let changes = store.change_sender();

    tokio::spawn(async move {
        while let Some(action) = action_rx.recv().await {
            let effect = store.apply(action);
            snapshot_tx.send_replace(store.state());

            if let Some(Effect::ScheduleReload(delay)) = effect {
                let reload_tx = reload_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = reload_tx.send(ReloadRequest);
                });
            }
        }
    });

    DispatcherHandle {
        actions: action_tx,
        changes,
        snapshot: snapshot_rx,
    }
}
