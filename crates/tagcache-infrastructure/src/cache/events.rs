//! Logging of backing store diagnostic events

use tagcache_domain::ports::StoreEvent;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Spawn a task that logs every event from `events`
///
/// Returns `None` outside a tokio runtime, in which case events are dropped.
pub(crate) fn spawn_event_logger(
    store: String,
    mut events: broadcast::Receiver<StoreEvent>,
) -> Option<JoinHandle<()>> {
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        debug!(store = %store, "No tokio runtime; backing store events will not be logged");
        return None;
    };

    Some(runtime.spawn(async move {
        loop {
            match events.recv().await {
                Ok(StoreEvent::Failure { server, message }) => {
                    warn!(store = %store, server = %server, message = %message, "Backing store failure");
                }
                Ok(StoreEvent::Reconnecting { server, attempt }) => {
                    info!(store = %store, server = %server, attempt, "Backing store reconnecting");
                }
                Err(RecvError::Lagged(skipped)) => {
                    debug!(store = %store, skipped, "Backing store events dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    }))
}
