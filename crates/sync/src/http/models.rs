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

//! Wire models for the platform REST API.
//!
//! Response documents from the document store are dynamically shaped, so list
//! payloads carry raw JSON values which [`parse`](crate::http::parse) decodes
//! into the strict model one record at a time.

use basket_model::{enums::OrderStatus, orders::Order};
use serde::{Deserialize, Serialize};

/// The submission request envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrderRequest<'a> {
    /// The submitting user.
    pub user_id: &'a str,
    /// The order document, keyed under its current (possibly temporary) ID.
    pub order: &'a Order,
}

/// The submission acknowledgement.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrderResponse {
    /// Whether the backend accepted the order.
    #[serde(default)]
    pub success: bool,
    /// The authoritative order ID assigned by the backend.
    #[serde(default)]
    pub order_id: Option<String>,
}

/// A status update request.
#[derive(Debug, Serialize)]
pub struct UpdateOrderStatusRequest {
    /// The new status.
    pub status: OrderStatus,
}

/// The order list payload.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersResponse {
    /// The raw order documents.
    #[serde(default)]
    pub orders: Vec<serde_json::Value>,
}

/// A read-marker mirror request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkNotificationReadRequest {
    /// The new read marker.
    pub is_read: bool,
}

/// The notification list payload.
#[derive(Debug, Default, Deserialize)]
pub struct NotificationsResponse {
    /// The raw notification documents.
    #[serde(default)]
    pub notifications: Vec<serde_json::Value>,
}

/// The health probe payload.
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    /// The reported service status, e.g. `"ok"`.
    pub status: String,
}
