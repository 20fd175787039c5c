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

//! Contracts over the external collaborators of the reconciliation engine.
//!
//! The engine never talks to a transport directly; it consumes these narrow
//! traits so that push-based backends, REST polling, and test mocks are all
//! interchangeable.

pub mod polling;

use basket_model::{
    enums::OrderStatus,
    identifiers::{NotificationId, OrderId, UserId},
    notifications::Notification,
    orders::Order,
};
use tokio::sync::mpsc;

use crate::error::GatewayError;

/// The default buffer capacity for feed subscription channels.
pub const FEED_CHANNEL_CAPACITY: usize = 16;

/// A live subscription to authoritative order snapshots for one user.
///
/// The producer pushes the *complete* current order set whenever any order
/// changes; no delta encoding and no ordering guarantee relative to local
/// optimistic writes. Dropping the subscription tears the producer down.
#[derive(Debug)]
pub struct OrderFeedSubscription {
    receiver: mpsc::Receiver<Vec<Order>>,
}

impl OrderFeedSubscription {
    /// Creates a new [`OrderFeedSubscription`] instance over `receiver`.
    #[must_use]
    pub const fn new(receiver: mpsc::Receiver<Vec<Order>>) -> Self {
        Self { receiver }
    }

    /// Creates a bounded channel returning the producer half and the subscription.
    #[must_use]
    pub fn channel(capacity: usize) -> (mpsc::Sender<Vec<Order>>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self::new(rx))
    }

    /// Receives the next snapshot, or `None` once the producer is gone.
    pub async fn recv(&mut self) -> Option<Vec<Order>> {
        self.receiver.recv().await
    }
}

/// A live subscription to notification snapshots for one user.
#[derive(Debug)]
pub struct NotificationFeedSubscription {
    receiver: mpsc::Receiver<Vec<Notification>>,
}

impl NotificationFeedSubscription {
    /// Creates a new [`NotificationFeedSubscription`] instance over `receiver`.
    #[must_use]
    pub const fn new(receiver: mpsc::Receiver<Vec<Notification>>) -> Self {
        Self { receiver }
    }

    /// Creates a bounded channel returning the producer half and the subscription.
    #[must_use]
    pub fn channel(capacity: usize) -> (mpsc::Sender<Vec<Notification>>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self::new(rx))
    }

    /// Receives the next snapshot, or `None` once the producer is gone.
    pub async fn recv(&mut self) -> Option<Vec<Notification>> {
        self.receiver.recv().await
    }
}

/// The authoritative order feed for a user.
#[async_trait::async_trait]
pub trait OrderFeed: Send + Sync {
    /// Opens a long-lived snapshot subscription for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the subscription could not be established; the
    /// engine logs the failure and leaves the feed inert until the next
    /// session starts.
    async fn subscribe(&self, user_id: &UserId) -> anyhow::Result<OrderFeedSubscription>;
}

/// The order submission and mutation gateway.
#[async_trait::async_trait]
pub trait OrderGateway: Send + Sync {
    /// Submits a locally constructed order, returning its authoritative ID.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the submission did not complete; the
    /// engine then falls back to [`OrderGateway::save_order`].
    async fn submit_order(&self, order: &Order, user_id: &UserId) -> Result<OrderId, GatewayError>;

    /// Writes `order` directly to the remote store under its current ID.
    ///
    /// The best-effort fallback used when submission fails, so a placed order
    /// is never silently dropped.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the write did not complete.
    async fn save_order(&self, order: &Order, user_id: &UserId) -> Result<(), GatewayError>;

    /// Issues a remote status update for the given order.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the update did not complete.
    async fn update_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), GatewayError>;

    /// Pulls the complete authoritative order set for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the pull did not complete.
    async fn load_orders(&self, user_id: &UserId) -> Result<Vec<Order>, GatewayError>;
}

/// The notification feed for a user.
#[async_trait::async_trait]
pub trait NotificationFeed: Send + Sync {
    /// Opens a long-lived snapshot subscription for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the subscription could not be established.
    async fn subscribe(&self, user_id: &UserId) -> anyhow::Result<NotificationFeedSubscription>;
}

/// The remote mirror for local notification mutations.
#[async_trait::async_trait]
pub trait NotificationClient: Send + Sync {
    /// Marks the notification as read on the backend.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the update did not complete; callers
    /// treat this as fire-and-forget and only log.
    async fn mark_read(&self, id: &NotificationId) -> Result<(), GatewayError>;

    /// Deletes all notifications for `user_id` on the backend.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the delete did not complete; callers
    /// treat this as fire-and-forget and only log.
    async fn clear_all(&self, user_id: &UserId) -> Result<(), GatewayError>;

    /// Pulls the complete notification set for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the pull did not complete.
    async fn load_notifications(&self, user_id: &UserId) -> Result<Vec<Notification>, GatewayError>;
}
