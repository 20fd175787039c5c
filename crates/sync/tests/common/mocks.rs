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

//! Mock collaborator implementations for testing, with call recorders.

#![allow(dead_code)] // Not every test binary exercises every mock

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use basket_model::{
    enums::OrderStatus,
    identifiers::{NotificationId, OrderId, UserId},
    notifications::Notification,
    orders::Order,
};
use basket_sync::{
    client::{
        FEED_CHANNEL_CAPACITY, NotificationClient, NotificationFeed, NotificationFeedSubscription,
        OrderFeed, OrderFeedSubscription, OrderGateway,
    },
    error::GatewayError,
};
use tokio::sync::{Notify, mpsc};

/// A recorded gateway interaction.
#[derive(Clone, Debug, PartialEq)]
pub enum GatewayCall {
    Submit(OrderId),
    Save(OrderId),
    UpdateStatus(OrderId, OrderStatus),
    Load,
}

/// A mock [`OrderFeed`] whose snapshots are pushed by the test.
#[derive(Debug, Default)]
pub struct MockOrderFeed {
    senders: Mutex<Vec<mpsc::Sender<Vec<Order>>>>,
    subscribed_users: Mutex<Vec<UserId>>,
}

impl MockOrderFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a snapshot to every open subscription.
    pub async fn push(&self, snapshot: Vec<Order>) {
        let senders: Vec<_> = self.senders.lock().unwrap().clone();
        for sender in senders {
            let _ = sender.send(snapshot.clone()).await;
        }
    }

    pub fn subscribed_users(&self) -> Vec<UserId> {
        self.subscribed_users.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl OrderFeed for MockOrderFeed {
    async fn subscribe(&self, user_id: &UserId) -> anyhow::Result<OrderFeedSubscription> {
        let (tx, subscription) = OrderFeedSubscription::channel(FEED_CHANNEL_CAPACITY);
        self.senders.lock().unwrap().push(tx);
        self.subscribed_users.lock().unwrap().push(*user_id);
        Ok(subscription)
    }
}

/// A scripted mock [`OrderGateway`] recording every interaction.
#[derive(Debug, Default)]
pub struct MockOrderGateway {
    submit_results: Mutex<VecDeque<Result<OrderId, GatewayError>>>,
    update_results: Mutex<VecDeque<Result<(), GatewayError>>>,
    load_result: Mutex<Vec<Order>>,
    calls: Mutex<Vec<GatewayCall>>,
    /// When set, `submit_order` waits for one permit before responding, so
    /// tests can observe the optimistic state mid-flight.
    pub submit_gate: Option<Arc<Notify>>,
}

impl MockOrderGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_submit_gate(gate: Arc<Notify>) -> Self {
        Self {
            submit_gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn script_submit(&self, result: Result<OrderId, GatewayError>) {
        self.submit_results.lock().unwrap().push_back(result);
    }

    pub fn script_update(&self, result: Result<(), GatewayError>) {
        self.update_results.lock().unwrap().push_back(result);
    }

    pub fn set_load_result(&self, orders: Vec<Order>) {
        *self.load_result.lock().unwrap() = orders;
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl OrderGateway for MockOrderGateway {
    async fn submit_order(&self, order: &Order, _user_id: &UserId) -> Result<OrderId, GatewayError> {
        if let Some(gate) = &self.submit_gate {
            gate.notified().await;
        }
        self.record(GatewayCall::Submit(order.order_id));
        self.submit_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(OrderId::new("ORD-123")))
    }

    async fn save_order(&self, order: &Order, _user_id: &UserId) -> Result<(), GatewayError> {
        self.record(GatewayCall::Save(order.order_id));
        Ok(())
    }

    async fn update_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), GatewayError> {
        self.record(GatewayCall::UpdateStatus(*order_id, status));
        self.update_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn load_orders(&self, _user_id: &UserId) -> Result<Vec<Order>, GatewayError> {
        self.record(GatewayCall::Load);
        Ok(self.load_result.lock().unwrap().clone())
    }
}

/// A mock [`NotificationFeed`] whose snapshots are pushed by the test.
#[derive(Debug, Default)]
pub struct MockNotificationFeed {
    senders: Mutex<Vec<mpsc::Sender<Vec<Notification>>>>,
}

impl MockNotificationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push(&self, snapshot: Vec<Notification>) {
        let senders: Vec<_> = self.senders.lock().unwrap().clone();
        for sender in senders {
            let _ = sender.send(snapshot.clone()).await;
        }
    }
}

#[async_trait::async_trait]
impl NotificationFeed for MockNotificationFeed {
    async fn subscribe(&self, _user_id: &UserId) -> anyhow::Result<NotificationFeedSubscription> {
        let (tx, subscription) = NotificationFeedSubscription::channel(FEED_CHANNEL_CAPACITY);
        self.senders.lock().unwrap().push(tx);
        Ok(subscription)
    }
}

/// A recorded notification mirror interaction.
#[derive(Clone, Debug, PartialEq)]
pub enum NotificationCall {
    MarkRead(NotificationId),
    ClearAll(UserId),
    Load(UserId),
}

/// A mock [`NotificationClient`] recording every mirror interaction.
#[derive(Debug, Default)]
pub struct MockNotificationClient {
    load_result: Mutex<Vec<Notification>>,
    calls: Mutex<Vec<NotificationCall>>,
}

impl MockNotificationClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_load_result(&self, notifications: Vec<Notification>) {
        *self.load_result.lock().unwrap() = notifications;
    }

    pub fn calls(&self) -> Vec<NotificationCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl NotificationClient for MockNotificationClient {
    async fn mark_read(&self, id: &NotificationId) -> Result<(), GatewayError> {
        self.calls.lock().unwrap().push(NotificationCall::MarkRead(*id));
        Ok(())
    }

    async fn clear_all(&self, user_id: &UserId) -> Result<(), GatewayError> {
        self.calls.lock().unwrap().push(NotificationCall::ClearAll(*user_id));
        Ok(())
    }

    async fn load_notifications(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Notification>, GatewayError> {
        self.calls.lock().unwrap().push(NotificationCall::Load(*user_id));
        Ok(self.load_result.lock().unwrap().clone())
    }
}
