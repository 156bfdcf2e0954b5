//! Polling watcher that invalidates the gateway when the persisted locale changes.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use super::{Locale, LocaleStore};
use crate::gateway::DataGateway;

/// Polling-based locale watcher.
///
/// Covers locale changes made outside this process (another CLI invocation,
/// an edited storage file). In-process changes go through `LocaleSwitcher`.
/// File-backed stores are only re-read when the file's mtime moves.
pub struct LocaleWatcher {
    store: LocaleStore,
    gateway: Arc<DataGateway>,
    poll_interval: Duration,
    last_locale: Option<Locale>,
    last_mtime: Option<SystemTime>,
}

impl LocaleWatcher {
    pub fn new(store: LocaleStore, gateway: Arc<DataGateway>, poll_interval: Duration) -> Self {
        Self {
            store,
            gateway,
            poll_interval,
            last_locale: None,
            last_mtime: None,
        }
    }

    /// Run until `shutdown_rx` flips to `true`, its sender is dropped, or the
    /// receiver side of `tx` is dropped.
    pub async fn watch(
        mut self,
        tx: mpsc::UnboundedSender<Locale>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) {
        self.last_mtime = self.store.storage_path().and_then(read_mtime);
        self.last_locale = Some(self.store.current());
        loop {
            tokio::select! {
                res = shutdown_rx.changed() => {
                    if res.is_err() || *shutdown_rx.borrow() {
                        info!("Locale watcher shutting down");
                        return;
                    }
                    continue;
                }
                _ = tokio::time::sleep(self.poll_interval) => {}
            }

            if let Some(path) = self.store.storage_path() {
                let mtime = read_mtime(path);
                if mtime == self.last_mtime {
                    continue;
                }
                self.last_mtime = mtime;
            }

            let current = self.store.current();
            if self.last_locale == Some(current) {
                continue;
            }

            debug!(from = ?self.last_locale, to = %current, "Persisted locale changed");
            self.last_locale = Some(current);
            self.gateway.invalidate(None);
            if tx.send(current).is_err() {
                warn!("Locale watcher receiver dropped, stopping watcher");
                return;
            }
        }
    }
}

fn read_mtime(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).ok().and_then(|m| m.modified().ok())
}
