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

//! The REST order gateway client.
//!
//! Implements [`OrderGateway`] and [`NotificationClient`] over the platform's
//! thin REST API with bounded connect and request timeouts, since the engine
//! itself enforces none.

use std::time::Duration;

use basket_model::{
    enums::OrderStatus,
    identifiers::{NotificationId, OrderId, UserId},
    notifications::Notification,
    orders::Order,
};

use crate::{
    client::{NotificationClient, OrderGateway},
    error::GatewayError,
    http::{
        models::{
            HealthResponse, MarkNotificationReadRequest, NotificationsResponse, OrdersResponse,
            SubmitOrderRequest, SubmitOrderResponse, UpdateOrderStatusRequest,
        },
        parse::{parse_notification_documents, parse_order_documents},
    },
};

/// The default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// The default whole-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for [`HttpOrderGateway`] instances.
#[derive(Clone, Debug)]
pub struct HttpGatewayConfig {
    /// The API base URL, e.g. `https://api.example.com`.
    pub base_url: String,
    /// The connect timeout applied to every request.
    pub connect_timeout: Duration,
    /// The whole-request timeout applied to every request.
    pub request_timeout: Duration,
}

impl HttpGatewayConfig {
    /// Creates a new [`HttpGatewayConfig`] instance with default timeouts.
    pub fn new<T: Into<String>>(base_url: T) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// An [`OrderGateway`] and [`NotificationClient`] over the platform REST API.
#[derive(Clone, Debug)]
pub struct HttpOrderGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpOrderGateway {
    /// Creates a new [`HttpOrderGateway`] instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client could not be built.
    pub fn new(config: HttpGatewayConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(GatewayError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    /// Probes the API health endpoint.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the service is unreachable or unhealthy.
    pub async fn check_health(&self) -> Result<(), GatewayError> {
        let response = self.client.get(self.url("/api/health")).send().await?;
        let response = Self::ensure_success(response).await?;
        let health: HealthResponse = response.json().await?;
        log::debug!("API health: {}", health.status);
        Ok(())
    }
}

#[async_trait::async_trait]
impl OrderGateway for HttpOrderGateway {
    async fn submit_order(&self, order: &Order, user_id: &UserId) -> Result<OrderId, GatewayError> {
        let request = SubmitOrderRequest {
            user_id: user_id.as_str(),
            order,
        };
        let response = self
            .client
            .post(self.url("/api/orders"))
            .json(&request)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        let body: SubmitOrderResponse = response.json().await?;

        let order_id = body
            .order_id
            .filter(|_| body.success)
            .ok_or_else(|| {
                GatewayError::MalformedResponse("Submission response missing orderId".to_string())
            })?;
        OrderId::new_checked(&order_id)
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))
    }

    async fn save_order(&self, order: &Order, user_id: &UserId) -> Result<(), GatewayError> {
        // The backend stores the document under the supplied (temporary) ID,
        // so a failed submission still lands remotely and the feed can pick
        // it up later
        let request = SubmitOrderRequest {
            user_id: user_id.as_str(),
            order,
        };
        let response = self
            .client
            .post(self.url("/api/orders"))
            .json(&request)
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn update_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), GatewayError> {
        let response = self
            .client
            .put(self.url(&format!("/api/orders/{order_id}")))
            .json(&UpdateOrderStatusRequest { status })
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn load_orders(&self, user_id: &UserId) -> Result<Vec<Order>, GatewayError> {
        let response = self
            .client
            .get(self.url("/api/orders"))
            .query(&[("userId", user_id.as_str())])
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        let body: OrdersResponse = response.json().await?;
        Ok(parse_order_documents(&body.orders))
    }
}

#[async_trait::async_trait]
impl NotificationClient for HttpOrderGateway {
    async fn mark_read(&self, id: &NotificationId) -> Result<(), GatewayError> {
        let response = self
            .client
            .put(self.url(&format!("/api/notifications/{id}")))
            .json(&MarkNotificationReadRequest { is_read: true })
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn clear_all(&self, user_id: &UserId) -> Result<(), GatewayError> {
        let response = self
            .client
            .delete(self.url("/api/notifications"))
            .query(&[("userId", user_id.as_str())])
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn load_notifications(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Notification>, GatewayError> {
        let response = self
            .client
            .get(self.url("/api/notifications"))
            .query(&[("userId", user_id.as_str())])
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        let body: NotificationsResponse = response.json().await?;
        Ok(parse_notification_documents(&body.notifications))
    }
}
