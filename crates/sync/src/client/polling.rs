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

//! A polling [`OrderFeed`] over any [`OrderGateway`].
//!
//! Deployments without a push transport fall back to pulling the complete
//! authoritative order set on an interval. Redundant snapshots are harmless:
//! the engine's merge step is idempotent.

use std::{fmt::Debug, sync::Arc, time::Duration};

use basket_model::identifiers::UserId;

use crate::client::{FEED_CHANNEL_CAPACITY, OrderFeed, OrderFeedSubscription, OrderGateway};

/// The default interval between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// An [`OrderFeed`] which polls an [`OrderGateway`] on an interval.
///
/// The polling task ends when the subscription is dropped. Pull failures are
/// logged and the next tick retries; a snapshot is only pushed on success.
pub struct PollingOrderFeed {
    gateway: Arc<dyn OrderGateway>,
    interval: Duration,
}

impl PollingOrderFeed {
    /// Creates a new [`PollingOrderFeed`] instance with the default interval.
    #[must_use]
    pub fn new(gateway: Arc<dyn OrderGateway>) -> Self {
        Self::with_interval(gateway, DEFAULT_POLL_INTERVAL)
    }

    /// Creates a new [`PollingOrderFeed`] instance polling every `interval`.
    #[must_use]
    pub fn with_interval(gateway: Arc<dyn OrderGateway>, interval: Duration) -> Self {
        Self { gateway, interval }
    }
}

impl Debug for PollingOrderFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollingOrderFeed")
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl OrderFeed for PollingOrderFeed {
    async fn subscribe(&self, user_id: &UserId) -> anyhow::Result<OrderFeedSubscription> {
        let (tx, subscription) = OrderFeedSubscription::channel(FEED_CHANNEL_CAPACITY);
        let gateway = self.gateway.clone();
        let user_id = *user_id;
        let poll_interval = self.interval;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(poll_interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                match gateway.load_orders(&user_id).await {
                    Ok(orders) => {
                        if tx.send(orders).await.is_err() {
                            log::debug!("Order poll subscription dropped, stopping");
                            break;
                        }
                    }
                    Err(e) => log::warn!("Order poll failed: {e}"),
                }
            }
        });

        Ok(subscription)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use basket_model::{
        enums::OrderStatus,
        identifiers::OrderId,
        orders::Order,
        stubs::order_with,
    };
    use rstest::rstest;

    use super::*;
    use crate::error::GatewayError;

    #[derive(Debug)]
    struct StaticGateway {
        orders: Vec<Order>,
    }

    #[async_trait::async_trait]
    impl OrderGateway for StaticGateway {
        async fn submit_order(
            &self,
            _order: &Order,
            _user_id: &UserId,
        ) -> Result<OrderId, GatewayError> {
            unimplemented!("not polled")
        }

        async fn save_order(&self, _order: &Order, _user_id: &UserId) -> Result<(), GatewayError> {
            unimplemented!("not polled")
        }

        async fn update_order_status(
            &self,
            _order_id: &OrderId,
            _status: OrderStatus,
        ) -> Result<(), GatewayError> {
            unimplemented!("not polled")
        }

        async fn load_orders(&self, _user_id: &UserId) -> Result<Vec<Order>, GatewayError> {
            Ok(self.orders.clone())
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_polls_deliver_snapshots() {
        let orders = vec![order_with("ORD-1", 1_000, OrderStatus::Pending)];
        let gateway = Arc::new(StaticGateway {
            orders: orders.clone(),
        });
        let feed = PollingOrderFeed::with_interval(gateway, Duration::from_millis(5));

        let mut subscription = feed.subscribe(&UserId::new("user-001")).await.unwrap();
        let first = subscription.recv().await.unwrap();
        let second = subscription.recv().await.unwrap();
        assert_eq!(first, orders);
        assert_eq!(second, orders);
    }
}
