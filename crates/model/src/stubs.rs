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

//! Type stubs to facilitate testing.

use basket_core::UnixMillis;
use rstest::fixture;

use crate::{
    enums::OrderStatus,
    identifiers::{OrderId, UserId},
    orders::{DeliveryLocation, Order, OrderDraft, OrderItem},
};

/// A stub user.
#[fixture]
pub fn user_id() -> UserId {
    UserId::new("user-001")
}

/// A draft with a single weighed item, as produced by a checkout screen.
#[fixture]
pub fn order_draft() -> OrderDraft {
    OrderDraft::new(
        vec![OrderItem::new("Apples", "$2.99/kg", 2.0)],
        5.98,
        Some(DeliveryLocation::new(48.8566, 2.3522)),
    )
}

/// Builds an authoritative order with the given identity, instant, and status.
#[must_use]
pub fn order_with(order_id: &str, timestamp: u64, status: OrderStatus) -> Order {
    Order::new(
        OrderId::new(order_id),
        vec![OrderItem::new("Apples", "$2.99/kg", 2.0)],
        5.98,
        None,
        UnixMillis::new(timestamp),
        status,
    )
}

/// A pending authoritative order.
#[fixture]
pub fn order_pending() -> Order {
    order_with("ORD-123", 1_700_000_000_000, OrderStatus::Pending)
}

/// A confirmed authoritative order.
#[fixture]
pub fn order_confirmed() -> Order {
    order_with("ORD-123", 1_700_000_000_000, OrderStatus::Confirmed)
}

/// A pending order still under its local temporary ID.
#[fixture]
pub fn order_local() -> Order {
    order_with("TEMP-20231114-221320-1", 1_700_000_000_000, OrderStatus::Pending)
}
