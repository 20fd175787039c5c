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

//! Per-user snapshot cache with a pluggable key-value persistence backing.
//!
//! The cache supplies last-known-good state at session start and absorbs the
//! remote portion of every merged view. Storage is keyed per user so no
//! cross-user contention is possible; with no identified user the literal
//! `anonymous` segment is used.

pub mod store;

use std::sync::Arc;

use basket_model::{identifiers::UserId, notifications::Notification, orders::Order};
use bytes::Bytes;
pub use store::{InMemoryKvStore, KvStore};

const ANONYMOUS: &str = "anonymous";

fn user_segment(user_id: Option<&UserId>) -> &str {
    user_id.map_or(ANONYMOUS, UserId::as_str)
}

/// A per-user cache of order and notification snapshots.
///
/// Loads degrade to an empty snapshot on any storage or decode failure (with a
/// log line); the caller never observes an error from a read path.
#[derive(Clone, Debug)]
pub struct OrderCache {
    store: Arc<dyn KvStore>,
}

impl OrderCache {
    /// Creates a new [`OrderCache`] instance over the given backing store.
    #[must_use]
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    fn orders_key(user_id: Option<&UserId>) -> String {
        format!("orders_{}", user_segment(user_id))
    }

    fn notifications_key(user_id: Option<&UserId>) -> String {
        format!("notifications_{}", user_segment(user_id))
    }

    /// Loads the cached order snapshot for `user_id`.
    ///
    /// Returns an empty list if nothing is cached, the store is unavailable,
    /// or the payload fails to decode.
    pub async fn load_orders(&self, user_id: Option<&UserId>) -> Vec<Order> {
        let key = Self::orders_key(user_id);
        match self.store.load(&key).await {
            Ok(Some(payload)) => match serde_json::from_slice(&payload) {
                Ok(orders) => orders,
                Err(e) => {
                    log::error!("Dropping cached orders under '{key}': {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::error!("Failed to load cached orders under '{key}': {e}");
                Vec::new()
            }
        }
    }

    /// Persists the order snapshot for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the store is unavailable.
    pub async fn save_orders(&self, user_id: Option<&UserId>, orders: &[Order]) -> anyhow::Result<()> {
        let payload = Bytes::from(serde_json::to_vec(orders)?);
        self.store.save(&Self::orders_key(user_id), payload).await
    }

    /// Removes the cached order snapshot for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    pub async fn clear_orders(&self, user_id: Option<&UserId>) -> anyhow::Result<()> {
        self.store.delete(&Self::orders_key(user_id)).await
    }

    /// Loads the cached notification snapshot for `user_id`.
    ///
    /// Returns an empty list if nothing is cached, the store is unavailable,
    /// or the payload fails to decode.
    pub async fn load_notifications(&self, user_id: Option<&UserId>) -> Vec<Notification> {
        let key = Self::notifications_key(user_id);
        match self.store.load(&key).await {
            Ok(Some(payload)) => match serde_json::from_slice(&payload) {
                Ok(notifications) => notifications,
                Err(e) => {
                    log::error!("Dropping cached notifications under '{key}': {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::error!("Failed to load cached notifications under '{key}': {e}");
                Vec::new()
            }
        }
    }

    /// Persists the notification snapshot for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the store is unavailable.
    pub async fn save_notifications(
        &self,
        user_id: Option<&UserId>,
        notifications: &[Notification],
    ) -> anyhow::Result<()> {
        let payload = Bytes::from(serde_json::to_vec(notifications)?);
        self.store
            .save(&Self::notifications_key(user_id), payload)
            .await
    }

    /// Removes the cached notification snapshot for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    pub async fn clear_notifications(&self, user_id: Option<&UserId>) -> anyhow::Result<()> {
        self.store.delete(&Self::notifications_key(user_id)).await
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use basket_model::{enums::OrderStatus, stubs::order_with};
    use rstest::rstest;

    use super::*;

    fn cache() -> OrderCache {
        OrderCache::new(Arc::new(InMemoryKvStore::new()))
    }

    #[rstest]
    #[tokio::test]
    async fn test_orders_roundtrip() {
        let cache = cache();
        let user_id = UserId::new("user-001");
        let orders = vec![
            order_with("ORD-2", 2_000, OrderStatus::Confirmed),
            order_with("ORD-1", 1_000, OrderStatus::Delivered),
        ];

        cache.save_orders(Some(&user_id), &orders).await.unwrap();
        let loaded = cache.load_orders(Some(&user_id)).await;
        assert_eq!(loaded, orders);
    }

    #[rstest]
    #[tokio::test]
    async fn test_orders_are_keyed_per_user() {
        let cache = cache();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");

        let orders = vec![order_with("ORD-1", 1_000, OrderStatus::Pending)];
        cache.save_orders(Some(&alice), &orders).await.unwrap();

        assert_eq!(cache.load_orders(Some(&alice)).await.len(), 1);
        assert!(cache.load_orders(Some(&bob)).await.is_empty());
        assert!(cache.load_orders(None).await.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_missing_snapshot_loads_empty() {
        let cache = cache();
        assert!(cache.load_orders(Some(&UserId::new("nobody"))).await.is_empty());
        assert!(cache.load_notifications(None).await.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_corrupt_snapshot_loads_empty() {
        let store = Arc::new(InMemoryKvStore::new());
        store
            .save("orders_user-001", Bytes::from_static(b"not json"))
            .await
            .unwrap();

        let cache = OrderCache::new(store);
        let user_id = UserId::new("user-001");
        assert!(cache.load_orders(Some(&user_id)).await.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_clear_orders() {
        let cache = cache();
        let user_id = UserId::new("user-001");
        let orders = vec![order_with("ORD-1", 1_000, OrderStatus::Pending)];

        cache.save_orders(Some(&user_id), &orders).await.unwrap();
        cache.clear_orders(Some(&user_id)).await.unwrap();
        assert!(cache.load_orders(Some(&user_id)).await.is_empty());
    }
}
