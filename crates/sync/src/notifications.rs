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

//! The notification hub.
//!
//! Follows the same optimistic pattern as the order engine, without the
//! temporary-identity machinery: feed pushes replace the local list wholesale
//! (sorted newest-first, persisted), while read markers and bulk clears mutate
//! the local list immediately, recompute the unread count, and mirror the
//! change remotely fire-and-forget.

use std::{
    fmt::Debug,
    sync::{Arc, Mutex, MutexGuard},
};

use basket_common::cache::OrderCache;
use basket_model::{
    identifiers::{NotificationId, UserId},
    notifications::{Notification, unread_count},
};
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    client::{NotificationClient, NotificationFeed, NotificationFeedSubscription},
    error::SyncError,
};

const POISONED: &str = "Hub state mutex poisoned";

/// The observable notification state: the list plus its unread count.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotificationState {
    /// The notifications, newest-first.
    pub notifications: Vec<Notification>,
    /// The number of unread notifications.
    pub unread: usize,
}

impl NotificationState {
    fn from_list(notifications: Vec<Notification>) -> Self {
        let unread = unread_count(&notifications);
        Self {
            notifications,
            unread,
        }
    }
}

#[derive(Debug)]
struct HubSession {
    user_id: UserId,
    generation: u64,
    feed_task: Option<JoinHandle<()>>,
}

impl Drop for HubSession {
    fn drop(&mut self) {
        if let Some(task) = self.feed_task.take() {
            task.abort();
        }
    }
}

#[derive(Debug)]
struct HubInner {
    session: Option<HubSession>,
    generation: u64,
}

/// The notification hub for the current user session.
pub struct NotificationHub {
    cache: OrderCache,
    feed: Arc<dyn NotificationFeed>,
    client: Arc<dyn NotificationClient>,
    inner: Arc<Mutex<HubInner>>,
    state_tx: Arc<watch::Sender<NotificationState>>,
}

impl Debug for NotificationHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(NotificationHub))
            .field("user_id", &self.user_id())
            .finish_non_exhaustive()
    }
}

impl NotificationHub {
    /// Creates a new [`NotificationHub`] instance in the unauthenticated state.
    #[must_use]
    pub fn new(
        cache: OrderCache,
        feed: Arc<dyn NotificationFeed>,
        client: Arc<dyn NotificationClient>,
    ) -> Self {
        let (state_tx, _) = watch::channel(NotificationState::default());
        Self {
            cache,
            feed,
            client,
            inner: Arc::new(Mutex::new(HubInner {
                session: None,
                generation: 0,
            })),
            state_tx: Arc::new(state_tx),
        }
    }

    fn lock_inner(&self) -> MutexGuard<'_, HubInner> {
        self.inner.lock().expect(POISONED)
    }

    /// Returns a receiver observing the notification state.
    #[must_use]
    pub fn observe(&self) -> watch::Receiver<NotificationState> {
        self.state_tx.subscribe()
    }

    /// Returns a copy of the currently published notification state.
    #[must_use]
    pub fn current_state(&self) -> NotificationState {
        self.state_tx.borrow().clone()
    }

    /// Returns the identified user of the active session, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.lock_inner().session.as_ref().map(|s| s.user_id)
    }

    /// Changes the active user identity.
    ///
    /// Mirrors the order engine's session lifecycle: tear down, cache-prime,
    /// then live feed subscription.
    pub async fn set_user(&self, user_id: Option<UserId>) {
        let generation = {
            let mut guard = self.lock_inner();
            guard.generation += 1;
            guard.session = None;
            self.state_tx.send_replace(NotificationState::default());
            guard.generation
        };

        let Some(user_id) = user_id else {
            if let Err(e) = self.cache.clear_notifications(None).await {
                log::error!("Failed to clear anonymous notification cache: {e}");
            }
            return;
        };

        log::info!("Starting notification session for {user_id}");

        let cached = self.cache.load_notifications(Some(&user_id)).await;
        {
            let guard = self.lock_inner();
            if guard.generation != generation {
                return;
            }
            self.state_tx
                .send_replace(NotificationState::from_list(cached));
        }

        let subscription = match self.feed.subscribe(&user_id).await {
            Ok(subscription) => Some(subscription),
            Err(e) => {
                log::error!("Notification feed subscription for {user_id} failed: {e}");
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
                self.state_tx.clone(),
                self.cache.clone(),
            ))
        });
        guard.session = Some(HubSession {
            user_id,
            generation,
            feed_task,
        });
    }

    /// Marks the notification as read.
    ///
    /// The local entry flips immediately and the unread count is recomputed;
    /// the remote mirror is best-effort and only logged on failure. Unknown
    /// IDs are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotSignedIn`] if no user is identified.
    pub async fn mark_read(&self, id: &NotificationId) -> Result<(), SyncError> {
        let (user_id, state) = {
            let guard = self.lock_inner();
            let session = guard.session.as_ref().ok_or(SyncError::NotSignedIn)?;
            let mut notifications = self.state_tx.borrow().notifications.clone();
            let Some(entry) = notifications.iter_mut().find(|n| n.id == *id) else {
                return Ok(());
            };
            *entry = entry.mark_read();
            let state = NotificationState::from_list(notifications);
            self.state_tx.send_replace(state.clone());
            (session.user_id, state)
        };

        if let Err(e) = self
            .cache
            .save_notifications(Some(&user_id), &state.notifications)
            .await
        {
            log::error!("Failed to persist notifications for {user_id}: {e}");
        }
        if let Err(e) = self.client.mark_read(id).await {
            log::warn!("Failed to mirror read marker for {id}: {e}");
        }
        Ok(())
    }

    /// Clears all notifications.
    ///
    /// The local list empties immediately; the remote delete is best-effort
    /// and only logged on failure.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotSignedIn`] if no user is identified.
    pub async fn clear_all(&self) -> Result<(), SyncError> {
        let user_id = {
            let guard = self.lock_inner();
            let session = guard.session.as_ref().ok_or(SyncError::NotSignedIn)?;
            self.state_tx.send_replace(NotificationState::default());
            session.user_id
        };

        if let Err(e) = self.cache.save_notifications(Some(&user_id), &[]).await {
            log::error!("Failed to persist notifications for {user_id}: {e}");
        }
        if let Err(e) = self.client.clear_all(&user_id).await {
            log::warn!("Failed to mirror notification clear for {user_id}: {e}");
        }
        Ok(())
    }

    /// Forces a pull from the authoritative source, replacing the published
    /// state and the cached snapshot.
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

        let notifications = self
            .client
            .load_notifications(&user_id)
            .await
            .map_err(SyncError::Gateway)?;
        let notifications = sorted_newest_first(notifications);
        {
            let guard = self.lock_inner();
            if guard.generation != generation {
                return Ok(());
            }
            self.state_tx
                .send_replace(NotificationState::from_list(notifications.clone()));
        }
        if let Err(e) = self
            .cache
            .save_notifications(Some(&user_id), &notifications)
            .await
        {
            log::error!("Failed to persist notifications for {user_id}: {e}");
        }
        Ok(())
    }
}

fn sorted_newest_first(mut notifications: Vec<Notification>) -> Vec<Notification> {
    notifications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    notifications
}

/// Consumes notification pushes for one session, replacing the published state.
async fn run_feed_subscription(
    mut subscription: NotificationFeedSubscription,
    user_id: UserId,
    generation: u64,
    inner: Arc<Mutex<HubInner>>,
    state_tx: Arc<watch::Sender<NotificationState>>,
    cache: OrderCache,
) {
    while let Some(notifications) = subscription.recv().await {
        let notifications = sorted_newest_first(notifications);
        {
            let guard = inner.lock().expect(POISONED);
            if guard.generation != generation {
                log::debug!("Discarding notification push for ended session of {user_id}");
                return;
            }
            let state = NotificationState::from_list(notifications.clone());
            log::debug!(
                "Notifications updated for {user_id}: {}, unread: {}",
                state.notifications.len(),
                state.unread,
            );
            state_tx.send_replace(state);
        }
        if let Err(e) = cache.save_notifications(Some(&user_id), &notifications).await {
            log::error!("Failed to persist notification snapshot for {user_id}: {e}");
        }
    }
    log::debug!("Notification feed stream for {user_id} ended");
}
