// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! The order reconciliation engine.
//!
//! The engine maintains a single, observable, duplicate-free, newest-first
//! list of orders for the current user, merging three input streams — the
//! cached snapshot at session start, optimistic local submissions, and
//! authoritative remote pushes — without ever publishing duplicate or stale
//! entries, and without blocking the caller's execution context.
//!
//! Session state is explicit: identifying a user constructs a session (cache
//! priming, then a live feed subscription); changing or clearing the user
//! tears the previous session down, aborts its feed task, and guards its
//! in-flight completions behind a session generation so they can never write
//! into the next session's view.

pub mod config;
pub mod merge;

use std::{
    fmt::Debug,
    sync::{Arc, Mutex, MutexGuard},
};

use basket_common::{
    cache::OrderCache, clock::Clock, generators::order_id::TempOrderIdGenerator,
};
use basket_model::{
    enums::OrderStatus,
    identifiers::{OrderId, UserId},
    orders::{Order, OrderDraft},
};
use tokio::{sync::watch, task::JoinHandle};

pub use self::config::SyncConfig;
use self::merge::{authoritative_orders, merge_snapshots};
use crate::{
    client::{OrderFeed, OrderFeedSubscription, OrderGateway},
    error::SyncError,
};

const POISONED: &str = "Engine state mutex poisoned";

/// The per-session state owned by the engine.
#[derive(Debug)]
struct Session {
    user_id: UserId,
    generation: u64,
    feed_task: Option<JoinHandle<()>>,
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(task) = self.feed_task.take() {
            task.abort();
        }
    }
}

#[derive(Debug)]
struct EngineInner {
    session: Option<Session>,
    generation: u64,
    id_gen: TempOrderIdGenerator,
}

/// The order reconciliation engine for the current user session.
///
/// All mutation of the merged order list is serialized behind an internal
/// mutex; collaborator I/O happens outside of it. The merged view is
/// published through a [`watch`] channel, so observers always see the latest
/// complete list.
pub struct OrderSyncEngine {
    clock: Arc<dyn Clock>,
    cache: OrderCache,
    feed: Arc<dyn OrderFeed>,
    gateway: Arc<dyn OrderGateway>,
    config: SyncConfig,
    inner: Arc<Mutex<EngineInner>>,
    orders_tx: Arc<watch::Sender<Vec<Order>>>,
}

impl Debug for OrderSyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(OrderSyncEngine))
            .field("config", &self.config)
            .field("user_id", &self.user_id())
            .finish_non_exhaustive()
    }
}

impl OrderSyncEngine {
    /// Creates a new [`OrderSyncEngine`] instance in the unauthenticated state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        cache: OrderCache,
        feed: Arc<dyn OrderFeed>,
        gateway: Arc<dyn OrderGateway>,
        config: SyncConfig,
    ) -> Self {
        let (orders_tx, _) = watch::channel(Vec::new());
        let id_gen = TempOrderIdGenerator::new(clock.clone(), 0);
        Self {
            clock,
            cache,
            feed,
            gateway,
            config,
            inner: Arc::new(Mutex::new(EngineInner {
                session: None,
                generation: 0,
                id_gen,
            })),
            orders_tx: Arc::new(orders_tx),
        }
    }

    fn lock_inner(&self) -> MutexGuard<'_, EngineInner> {
        self.inner.lock().expect(POISONED)
    }

    /// Returns a receiver observing the merged order view (newest-first,
    /// deduplicated).
    #[must_use]
    pub fn observe_orders(&self) -> watch::Receiver<Vec<Order>> {
        self.orders_tx.subscribe()
    }

    /// Returns a copy of the currently published order view.
    #[must_use]
    pub fn current_orders(&self) -> Vec<Order> {
        self.orders_tx.borrow().clone()
    }

    /// Returns the identified user of the active session, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.lock_inner().session.as_ref().map(|s| s.user_id)
    }

    /// Changes the active user identity.
    ///
    /// The previous session (feed subscription included) is torn down and its
    /// in-flight completions are barred from the new view. With `Some(user)`
    /// the view is primed from the cache before this method returns, then the
    /// live feed subscription is established. With `None` the view is left
    /// empty.
    pub async fn set_user(&self, user_id: Option<UserId>) {
        let generation = {
            let mut guard = self.lock_inner();
            guard.generation += 1;
            guard.session = None; // Dropping the session aborts its feed task
            guard.id_gen.reset();
            self.orders_tx.send_replace(Vec::new());
            guard.generation
        };

        let Some(user_id) = user_id else {
            log::info!("Session ended, view cleared");
            if self.config.clear_cache_on_sign_out {
                if let Err(e) = self.cache.clear_orders(None).await {
                    log::error!("Failed to clear anonymous order cache: {e}");
                }
            }
            return;
        };

        log::info!("Starting order sync session for {user_id}");

        // Prime the view from the last-known-good snapshot before going live
        let cached = self.cache.load_orders(Some(&user_id)).await;
        {
            let guard = self.lock_inner();
            if guard.generation != generation {
                return; // Superseded by a newer identity change
            }
            log::debug!("Primed view with {} cached orders for {user_id}", cached.len());
            self.orders_tx.send_replace(cached);
        }

        let subscription = match self.feed.subscribe(&user_id).await {
            Ok(subscription) => Some(subscription),
            Err(e) => {
                // The feed stays inert until the next session starts
                log::error!("Order feed subscription for {user_id} failed: {e}");
                None
            }
        };

        let mut guard = self.lock_inner();
        if guard.generation != generation {
            return;
        }
        let feed_task = subscription.map(|subscription| {
            tokio::spawn(run_feed_subscription(
                subscription,
                user_id,
                generation,
                self.inner.clone(),
                self.orders_tx.clone(),
                self.cache.clone(),
                self.config.persist_snapshots,
            ))
        });
        guard.session = Some(Session {
            user_id,
            generation,
            feed_task,
        });
    }

    /// Places a draft order.
    ///
    /// The order is synthesized under a fresh temporary ID with `Pending`
    /// status and published to observers *before* any network round trip.
    /// On gateway success the entry is promoted in place to its authoritative
    /// ID (all other fields preserved) and that ID is returned. On gateway
    /// failure the temporary record is written directly to the remote store
    /// best-effort and the temporary ID is returned; the entry stays visible
    /// until a later feed push confirms or the user retries.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotSignedIn`] if no user is identified; the call
    /// then has no side effects.
    pub async fn place_order(&self, draft: OrderDraft) -> Result<OrderId, SyncError> {
        let (user_id, generation, order) = {
            let mut guard = self.lock_inner();
            let (user_id, generation) = match &guard.session {
                Some(session) => (session.user_id, session.generation),
                None => return Err(SyncError::NotSignedIn),
            };
            let temp_id = guard.id_gen.generate();
            let order = draft.into_order(temp_id, self.clock.timestamp_ms());

            // Optimistic update: observers see the new order immediately
            let mut current = self.orders_tx.borrow().clone();
            current.insert(0, order.clone());
            self.orders_tx.send_replace(current);
            (user_id, generation, order)
        };

        log::info!("Placing order {} for {user_id}", order.order_id);
        match self.gateway.submit_order(&order, &user_id).await {
            Ok(authoritative_id) => {
                log::info!("Order {} acknowledged as {authoritative_id}", order.order_id);
                let view = {
                    let guard = self.lock_inner();
                    if guard.generation != generation {
                        log::debug!("Discarding submission result for ended session of {user_id}");
                        return Ok(authoritative_id);
                    }
                    let mut current = self.orders_tx.borrow().clone();
                    if let Some(entry) = current.iter_mut().find(|o| o.order_id == order.order_id) {
                        *entry = entry.with_order_id(authoritative_id);
                    }
                    self.orders_tx.send_replace(current.clone());
                    current
                };
                self.persist_view(&user_id, &view).await;
                Ok(authoritative_id)
            }
            Err(e) => {
                log::error!("Order submission failed: {e}");
                // Best-effort direct write so a placed order is never silently
                // dropped; the temporary ID stands in until the feed confirms
                if let Err(e) = self.gateway.save_order(&order, &user_id).await {
                    log::error!("Direct order write for {} failed: {e}", order.order_id);
                }
                Ok(order.order_id)
            }
        }
    }

    /// Cancels a `Pending` order.
    ///
    /// A remote status update is issued first; on success the local entry is
    /// patched to `Cancelled` and republished without waiting for the next
    /// feed push. A gateway failure is logged and swallowed, leaving the
    /// entry unchanged (the feed remains authoritative).
    ///
    /// # Errors
    ///
    /// Returns an error if no user is identified, the order is not in the
    /// current view, or its status is not cancellable.
    pub async fn cancel_order(&self, order_id: &OrderId) -> Result<(), SyncError> {
        let (user_id, generation) = {
            let guard = self.lock_inner();
            let session = guard.session.as_ref().ok_or(SyncError::NotSignedIn)?;
            let current = self.orders_tx.borrow();
            let order = current
                .iter()
                .find(|o| o.order_id == *order_id)
                .ok_or(SyncError::OrderNotFound(*order_id))?;
            if !order.status.is_cancellable() {
                return Err(SyncError::NotCancellable(order.status));
            }
            (session.user_id, session.generation)
        };

        match self
            .gateway
            .update_order_status(order_id, OrderStatus::Cancelled)
            .await
        {
            Ok(()) => {
                log::info!("Order {order_id} cancelled");
                let view = {
                    let guard = self.lock_inner();
                    if guard.generation != generation {
                        return Ok(());
                    }
                    let mut current = self.orders_tx.borrow().clone();
                    if let Some(entry) = current.iter_mut().find(|o| o.order_id == *order_id) {
                        *entry = entry.with_status(OrderStatus::Cancelled);
                    }
                    self.orders_tx.send_replace(current.clone());
                    current
                };
                self.persist_view(&user_id, &view).await;
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to cancel order {order_id}: {e}");
                Ok(())
            }
        }
    }

    /// Forces a pull from the authoritative source, replacing the published
    /// view and the cached snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if no user is identified or the pull fails.
    pub async fn refresh(&self) -> Result<(), SyncError> {
        let (user_id, generation) = {
            let guard = self.lock_inner();
            let session = guard.session.as_ref().ok_or(SyncError::NotSignedIn)?;
            (session.user_id, session.generation)
        };

        let orders = self
            .gateway
            .load_orders(&user_id)
            .await
            .map_err(SyncError::Gateway)?;
        log::debug!("Refreshed {} orders for {user_id}", orders.len());
        {
            let guard = self.lock_inner();
            if guard.generation != generation {
                return Ok(());
            }
            self.orders_tx.send_replace(orders.clone());
        }
        self.persist_view(&user_id, &orders).await;
        Ok(())
    }

    async fn persist_view(&self, user_id: &UserId, view: &[Order]) {
        if !self.config.persist_snapshots {
            return;
        }
        let authoritative = authoritative_orders(view);
        if let Err(e) = self.cache.save_orders(Some(user_id), &authoritative).await {
            log::error!("Failed to persist orders for {user_id}: {e}");
        }
    }
}

/// Consumes feed pushes for one session, merging each into the published view.
async fn run_feed_subscription(
    mut subscription: OrderFeedSubscription,
    user_id: UserId,
    generation: u64,
    inner: Arc<Mutex<EngineInner>>,
    orders_tx: Arc<watch::Sender<Vec<Order>>>,
    cache: OrderCache,
    persist_snapshots: bool,
) {
    while let Some(remote) = subscription.recv().await {
        let authoritative = {
            let guard = inner.lock().expect(POISONED);
            if guard.generation != generation {
                log::debug!("Discarding feed push for ended session of {user_id}");
                return;
            }
            let current = orders_tx.borrow().clone();
            let merged = merge_snapshots(&current, remote);
            let authoritative = authoritative_orders(&merged);
            log::debug!(
                "Merged snapshot for {user_id}: {} authoritative, {} local",
                authoritative.len(),
                merged.len() - authoritative.len(),
            );
            orders_tx.send_replace(merged);
            authoritative
        };
        if persist_snapshots {
            if let Err(e) = cache.save_orders(Some(&user_id), &authoritative).await {
                log::error!("Failed to persist order snapshot for {user_id}: {e}");
            }
        }
    }
    log::debug!("Order feed stream for {user_id} ended");
}
