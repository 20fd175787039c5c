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

//! Decoding of dynamic map-shaped documents into the strict model.
//!
//! The document store tolerates heterogeneous records, so decoding is per
//! record and per field: a malformed record is dropped with a log line and
//! never blocks its siblings; a malformed optional field degrades to its
//! default. Only a missing identity is fatal for a record.

use std::str::FromStr;

use basket_core::UnixMillis;
use basket_model::{
    enums::{NotificationKind, OrderStatus},
    identifiers::{NotificationId, OrderId},
    notifications::Notification,
    orders::{DeliveryLocation, Order, OrderItem},
};
use serde_json::Value;

/// Decodes one order document.
///
/// # Errors
///
/// Returns an error if the document is not an object, is missing its
/// `orderId`, or violates a model invariant (e.g. a negative total).
pub fn parse_order_document(doc: &Value) -> anyhow::Result<Order> {
    let obj = doc
        .as_object()
        .ok_or_else(|| anyhow::anyhow!("Order document was not an object"))?;
    let order_id = obj
        .get("orderId")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow::anyhow!("Order document missing 'orderId'"))?;
    let order_id = OrderId::new_checked(order_id)?;

    let total_amount = obj
        .get("totalAmount")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    let timestamp = parse_timestamp(obj.get("timestamp"), order_id.as_str());
    let status = parse_status(obj.get("status"), order_id.as_str());
    let items = parse_items(obj.get("items"), order_id.as_str());
    let delivery_location = parse_location(obj.get("deliveryLocation"), order_id.as_str());

    Order::new_checked(
        order_id,
        items,
        total_amount,
        delivery_location,
        timestamp,
        status,
    )
}

/// Decodes a batch of order documents, dropping malformed records.
///
/// The result is sorted newest-first, ready for the merge step.
#[must_use]
pub fn parse_order_documents(docs: &[Value]) -> Vec<Order> {
    let mut orders: Vec<Order> = docs
        .iter()
        .filter_map(|doc| match parse_order_document(doc) {
            Ok(order) => Some(order),
            Err(e) => {
                log::error!("Failed to parse order document: {e}");
                None
            }
        })
        .collect();
    orders.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    orders
}

/// Decodes one notification document.
///
/// # Errors
///
/// Returns an error if the document is not an object or is missing its `id`.
pub fn parse_notification_document(doc: &Value) -> anyhow::Result<Notification> {
    let obj = doc
        .as_object()
        .ok_or_else(|| anyhow::anyhow!("Notification document was not an object"))?;
    let id = obj
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow::anyhow!("Notification document missing 'id'"))?;
    let id = NotificationId::new_checked(id)?;

    let kind = obj
        .get("kind")
        .or_else(|| obj.get("type"))
        .and_then(Value::as_str)
        .and_then(|s| NotificationKind::from_str(s).ok())
        .unwrap_or_default();
    let order_id = obj
        .get("orderId")
        .and_then(Value::as_str)
        .and_then(|s| OrderId::new_checked(s).ok());

    Ok(Notification {
        id,
        title: obj
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        body: obj
            .get("body")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        kind,
        order_id,
        timestamp: parse_timestamp(obj.get("timestamp"), id.as_str()),
        is_read: obj.get("isRead").and_then(Value::as_bool).unwrap_or(false),
    })
}

/// Decodes a batch of notification documents, dropping malformed records.
///
/// The result is sorted newest-first.
#[must_use]
pub fn parse_notification_documents(docs: &[Value]) -> Vec<Notification> {
    let mut notifications: Vec<Notification> = docs
        .iter()
        .filter_map(|doc| match parse_notification_document(doc) {
            Ok(notification) => Some(notification),
            Err(e) => {
                log::error!("Failed to parse notification document: {e}");
                None
            }
        })
        .collect();
    notifications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    notifications
}

fn parse_timestamp(value: Option<&Value>, record_id: &str) -> UnixMillis {
    match value {
        Some(Value::Number(n)) => {
            if let Some(millis) = n.as_u64() {
                return UnixMillis::new(millis);
            }
            log::warn!("Record {record_id}: invalid numeric timestamp {n}");
            UnixMillis::default()
        }
        Some(Value::String(s)) => match UnixMillis::from_str(s) {
            Ok(millis) => millis,
            Err(e) => {
                log::warn!("Record {record_id}: invalid timestamp string: {e}");
                UnixMillis::default()
            }
        },
        Some(other) => {
            log::warn!("Record {record_id}: unexpected timestamp shape {other}");
            UnixMillis::default()
        }
        None => UnixMillis::default(),
    }
}

fn parse_status(value: Option<&Value>, record_id: &str) -> OrderStatus {
    match value.and_then(Value::as_str) {
        Some(s) => OrderStatus::from_str(s).unwrap_or_else(|_| {
            log::warn!("Record {record_id}: unknown status '{s}', using PENDING");
            OrderStatus::Pending
        }),
        None => OrderStatus::Pending,
    }
}

fn parse_items(value: Option<&Value>, record_id: &str) -> Vec<OrderItem> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| match parse_item(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                log::error!("Record {record_id}: failed to parse item: {e}");
                None
            }
        })
        .collect()
}

fn parse_item(entry: &Value) -> anyhow::Result<OrderItem> {
    let obj = entry
        .as_object()
        .ok_or_else(|| anyhow::anyhow!("Item was not an object"))?;
    let product_name = obj
        .get("productName")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow::anyhow!("Item missing 'productName'"))?;
    let product_price = obj
        .get("productPrice")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow::anyhow!("Item missing 'productPrice'"))?;
    let quantity = obj
        .get("quantity")
        .and_then(Value::as_f64)
        .ok_or_else(|| anyhow::anyhow!("Item missing numeric 'quantity'"))?;
    OrderItem::new_checked(product_name, product_price, quantity)
}

fn parse_location(value: Option<&Value>, record_id: &str) -> Option<DeliveryLocation> {
    let obj = value?.as_object()?;
    let latitude = obj.get("latitude").and_then(Value::as_f64)?;
    let longitude = obj.get("longitude").and_then(Value::as_f64)?;
    match DeliveryLocation::new_checked(latitude, longitude) {
        Ok(location) => Some(location),
        Err(e) => {
            log::warn!("Record {record_id}: dropping delivery location: {e}");
            None
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    fn test_parse_complete_order() {
        let doc = json!({
            "orderId": "ORD-123",
            "userId": "user-001",
            "totalAmount": 5.98,
            "timestamp": 1_700_000_000_000_u64,
            "status": "CONFIRMED",
            "items": [
                {"productName": "Apples", "productPrice": "$2.99/kg", "quantity": 2.0},
            ],
            "deliveryLocation": {"latitude": 48.8566, "longitude": 2.3522},
        });

        let order = parse_order_document(&doc).unwrap();
        assert_eq!(order.order_id.as_str(), "ORD-123");
        assert_eq!(order.total_amount, 5.98);
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 2.0);
        assert_eq!(order.delivery_location.unwrap().latitude, 48.8566);
    }

    #[rstest]
    fn test_parse_minimal_order_applies_defaults() {
        let doc = json!({"orderId": "ORD-9"});
        let order = parse_order_document(&doc).unwrap();
        assert_eq!(order.total_amount, 0.0);
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.items.is_empty());
        assert_eq!(order.delivery_location, None);
        assert!(order.timestamp.is_zero());
    }

    #[rstest]
    fn test_parse_order_missing_id_fails() {
        let doc = json!({"totalAmount": 5.98});
        assert!(parse_order_document(&doc).is_err());
        assert!(parse_order_document(&json!("not an object")).is_err());
    }

    #[rstest]
    fn test_unknown_status_falls_back_to_pending() {
        let doc = json!({"orderId": "ORD-9", "status": "TELEPORTED"});
        let order = parse_order_document(&doc).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[rstest]
    fn test_timestamp_accepts_string_forms() {
        let doc = json!({"orderId": "ORD-9", "timestamp": "1700000000000"});
        let order = parse_order_document(&doc).unwrap();
        assert_eq!(order.timestamp, UnixMillis::new(1_700_000_000_000));

        let doc = json!({"orderId": "ORD-9", "timestamp": "1970-01-01T00:00:01+00:00"});
        let order = parse_order_document(&doc).unwrap();
        assert_eq!(order.timestamp, UnixMillis::new(1_000));
    }

    #[rstest]
    fn test_malformed_item_is_skipped_not_fatal() {
        let doc = json!({
            "orderId": "ORD-9",
            "items": [
                {"productName": "Apples", "productPrice": "$2.99/kg", "quantity": 2.0},
                {"productName": "Pears"},
                {"productName": "Plums", "productPrice": "$4.50/kg", "quantity": -1.0},
                "not an object",
            ],
        });
        let order = parse_order_document(&doc).unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].product_name, "Apples");
    }

    #[rstest]
    fn test_partial_location_is_dropped() {
        let doc = json!({
            "orderId": "ORD-9",
            "deliveryLocation": {"latitude": 48.8566},
        });
        let order = parse_order_document(&doc).unwrap();
        assert_eq!(order.delivery_location, None);

        let doc = json!({
            "orderId": "ORD-9",
            "deliveryLocation": {"latitude": 948.85, "longitude": 2.35},
        });
        let order = parse_order_document(&doc).unwrap();
        assert_eq!(order.delivery_location, None);
    }

    #[rstest]
    fn test_batch_skips_malformed_and_sorts_newest_first() {
        let docs = vec![
            json!({"orderId": "ORD-1", "timestamp": 1_000}),
            json!({"noId": true}),
            json!({"orderId": "ORD-3", "timestamp": 3_000}),
            json!({"orderId": "ORD-2", "timestamp": 2_000}),
        ];

        let orders = parse_order_documents(&docs);
        let ids: Vec<&str> = orders.iter().map(|o| o.order_id.as_str()).collect();
        assert_eq!(ids, vec!["ORD-3", "ORD-2", "ORD-1"]);
    }

    #[rstest]
    fn test_parse_notification() {
        let doc = json!({
            "id": "ntf-1",
            "title": "Order update",
            "body": "Your order is confirmed",
            "type": "order",
            "orderId": "ORD-123",
            "timestamp": 2_000,
            "isRead": true,
        });
        let notification = parse_notification_document(&doc).unwrap();
        assert_eq!(notification.id.as_str(), "ntf-1");
        assert_eq!(notification.kind, NotificationKind::Order);
        assert_eq!(notification.order_id.unwrap().as_str(), "ORD-123");
        assert!(notification.is_read);
    }

    #[rstest]
    fn test_parse_notification_defaults() {
        let doc = json!({"id": "ntf-2", "timestamp": 1_000});
        let notification = parse_notification_document(&doc).unwrap();
        assert_eq!(notification.kind, NotificationKind::General);
        assert_eq!(notification.title, "");
        assert!(!notification.is_read);

        assert!(parse_notification_document(&json!({"title": "no id"})).is_err());
    }

    #[rstest]
    fn test_notification_batch_sorts_newest_first() {
        let docs = vec![
            json!({"id": "ntf-1", "timestamp": 1_000}),
            json!({"id": "ntf-2", "timestamp": 3_000}),
            json!(42),
        ];
        let notifications = parse_notification_documents(&docs);
        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications[0].id.as_str(), "ntf-2");
    }
}
