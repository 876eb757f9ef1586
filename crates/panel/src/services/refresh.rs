//! Session hub and approval-status refresh loop.
//!
//! The hub is the single writer for logged-in seller state. The HTTP
//! session cookie only carries the seller id; the live seller record lives
//! here, kept current by one background refresher task per seller.
//!
//! A seller account starts unapproved and flips to approved out-of-band
//! (marketplace moderation), so the refresher polls fast while the status
//! is pending and drops to a slow heartbeat once it settles. An explicit
//! [`SessionHub::trigger_refresh`] forces an immediate re-check; the panel
//! frontend calls it when its window regains focus.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use sellerdesk_core::SellerId;
use serde_json::Value;
use tokio::sync::{Notify, RwLock};
use tokio::task::JoinHandle;

use crate::marketplace::{MarketplaceClient, SellerSession};

/// Poll interval while the seller's approval is still pending.
pub const PENDING_POLL_INTERVAL: Duration = Duration::from_millis(1500);

/// Poll interval once the seller is approved.
pub const SETTLED_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// The refresh interval implied by an approval state.
///
/// Re-derived every tick, so a transition takes effect immediately.
#[must_use]
pub const fn poll_interval(approved: bool) -> Duration {
    if approved {
        SETTLED_POLL_INTERVAL
    } else {
        PENDING_POLL_INTERVAL
    }
}

struct SellerEntry {
    session: RwLock<SellerSession>,
    /// Checked after every await in the refresh loop: clearing the task
    /// handle races a tick that already fired, and a stopped entry must
    /// never write again.
    stopped: AtomicBool,
    refresh_now: Notify,
    task: RwLock<Option<JoinHandle<()>>>,
}

/// Registry of logged-in sellers and their refresher tasks.
#[derive(Clone)]
pub struct SessionHub {
    inner: Arc<HubInner>,
}

struct HubInner {
    client: MarketplaceClient,
    sellers: RwLock<HashMap<SellerId, Arc<SellerEntry>>>,
}

impl SessionHub {
    /// Create an empty hub.
    #[must_use]
    pub fn new(client: MarketplaceClient) -> Self {
        Self {
            inner: Arc::new(HubInner {
                client,
                sellers: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Register a freshly logged-in seller and start its refresher.
    ///
    /// A previous entry for the same seller (re-login) is stopped first.
    pub async fn login(&self, session: SellerSession) {
        let seller_id = session.id;
        self.logout(seller_id).await;

        let entry = Arc::new(SellerEntry {
            session: RwLock::new(session),
            stopped: AtomicBool::new(false),
            refresh_now: Notify::new(),
            task: RwLock::new(None),
        });

        let task = tokio::spawn(refresh_loop(
            self.inner.client.clone(),
            seller_id,
            Arc::clone(&entry),
        ));
        *entry.task.write().await = Some(task);

        self.inner.sellers.write().await.insert(seller_id, entry);
        tracing::info!(seller_id = %seller_id, "Seller session registered");
    }

    /// Current session for a seller, if logged in.
    pub async fn get(&self, seller_id: SellerId) -> Option<SellerSession> {
        let sellers = self.inner.sellers.read().await;
        let entry = sellers.get(&seller_id)?;
        Some(entry.session.read().await.clone())
    }

    /// Force an immediate refresh for a seller.
    pub async fn trigger_refresh(&self, seller_id: SellerId) {
        let sellers = self.inner.sellers.read().await;
        if let Some(entry) = sellers.get(&seller_id) {
            entry.refresh_now.notify_one();
        }
    }

    /// Remove a seller and stop its refresher.
    pub async fn logout(&self, seller_id: SellerId) {
        let entry = self.inner.sellers.write().await.remove(&seller_id);
        if let Some(entry) = entry {
            stop_entry(&entry).await;
            tracing::info!(seller_id = %seller_id, "Seller session removed");
        }
    }

    /// Stop every refresher (server shutdown).
    pub async fn shutdown(&self) {
        let mut sellers = self.inner.sellers.write().await;
        for (_, entry) in sellers.drain() {
            stop_entry(&entry).await;
        }
    }
}

impl std::fmt::Debug for SessionHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHub").finish_non_exhaustive()
    }
}

async fn stop_entry(entry: &SellerEntry) {
    entry.stopped.store(true, Ordering::SeqCst);
    entry.refresh_now.notify_one();
    if let Some(task) = entry.task.write().await.take() {
        task.abort();
    }
}

/// Background refresh loop for one seller.
async fn refresh_loop(client: MarketplaceClient, seller_id: SellerId, entry: Arc<SellerEntry>) {
    loop {
        if entry.stopped.load(Ordering::SeqCst) {
            return;
        }

        refresh_once(&client, seller_id, &entry).await;

        if entry.stopped.load(Ordering::SeqCst) {
            return;
        }

        let approved = entry.session.read().await.is_approved();
        let interval = poll_interval(approved);
        tokio::select! {
            () = entry.refresh_now.notified() => {}
            () = tokio::time::sleep(interval) => {}
        }
    }
}

/// One refresh tick: fetch, merge, persist on approval change.
///
/// Failures are swallowed (logged only); the next tick is the retry.
async fn refresh_once(client: &MarketplaceClient, seller_id: SellerId, entry: &SellerEntry) {
    let fetched = fetch_seller(client, seller_id).await;
    let Some(fetched) = fetched else { return };

    if entry.stopped.load(Ordering::SeqCst) {
        return;
    }

    let current = entry.session.read().await.clone();
    let merged = current.merged_with(&fetched);

    if !current.approve_status.matches(merged.approve_status.as_str()) {
        tracing::info!(
            seller_id = %seller_id,
            from = %current.approve_status,
            to = %merged.approve_status,
            "Seller approval status changed"
        );
        if entry.stopped.load(Ordering::SeqCst) {
            return;
        }
        *entry.session.write().await = merged;
    }
}

/// Fetch the seller via the list endpoint, falling back to by-id.
async fn fetch_seller(client: &MarketplaceClient, seller_id: SellerId) -> Option<Value> {
    match client.seller_from_list(seller_id).await {
        Ok(Some(seller)) => return Some(seller),
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(seller_id = %seller_id, error = %e, "Seller list refresh failed");
        }
    }

    match client.seller(seller_id).await {
        Ok(seller) => Some(seller),
        Err(e) => {
            tracing::warn!(seller_id = %seller_id, error = %e, "Seller by-id refresh failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_interval_cadence() {
        assert_eq!(poll_interval(false), Duration::from_millis(1500));
        assert_eq!(poll_interval(true), Duration::from_secs(30));
    }
}
