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

//! Order value types.
//!
//! An [`Order`] is created locally in `Pending` status under a temporary ID,
//! optionally promoted to its authoritative backend ID once the submission
//! gateway acknowledges it, and thereafter mutated only by status transitions
//! pushed by the remote feed or by an explicit cancel.

use basket_core::{
    UnixMillis,
    correctness::{
        FAILED, check_in_range_inclusive_f64, check_non_negative_f64, check_positive_f64,
        check_predicate_false, check_valid_string,
    },
    datetime::format_display_datetime,
};
use serde::{Deserialize, Serialize};

use crate::{enums::OrderStatus, identifiers::OrderId};

/// A single line item of an order.
///
/// The unit price is carried as the display string supplied by the product
/// catalog; totals are computed at submission time and stored on the order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// The product name as displayed in the catalog.
    pub product_name: String,
    /// The displayed unit price, e.g. `"$2.99/kg"`.
    pub product_price: String,
    /// The quantity ordered; fractional weights are permitted.
    pub quantity: f64,
}

impl OrderItem {
    /// Creates a new [`OrderItem`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `product_name` is not a valid string.
    /// - `quantity` is not positive and finite.
    pub fn new_checked<T: Into<String>>(
        product_name: T,
        product_price: T,
        quantity: f64,
    ) -> anyhow::Result<Self> {
        let product_name = product_name.into();
        check_valid_string(&product_name, stringify!(product_name))?;
        check_positive_f64(quantity, stringify!(quantity))?;
        Ok(Self {
            product_name,
            product_price: product_price.into(),
            quantity,
        })
    }

    /// Creates a new [`OrderItem`] instance.
    ///
    /// # Panics
    ///
    /// Panics if any input is invalid (see [`OrderItem::new_checked`]).
    pub fn new<T: Into<String>>(product_name: T, product_price: T, quantity: f64) -> Self {
        Self::new_checked(product_name, product_price, quantity).expect(FAILED)
    }
}

/// A delivery drop-off coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryLocation {
    /// Latitude in decimal degrees, in [-90, 90].
    pub latitude: f64,
    /// Longitude in decimal degrees, in [-180, 180].
    pub longitude: f64,
}

impl DeliveryLocation {
    /// Creates a new [`DeliveryLocation`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if either coordinate is out of range or non-finite.
    pub fn new_checked(latitude: f64, longitude: f64) -> anyhow::Result<Self> {
        check_in_range_inclusive_f64(latitude, -90.0, 90.0, stringify!(latitude))?;
        check_in_range_inclusive_f64(longitude, -180.0, 180.0, stringify!(longitude))?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Creates a new [`DeliveryLocation`] instance.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is invalid (see [`DeliveryLocation::new_checked`]).
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self::new_checked(latitude, longitude).expect(FAILED)
    }
}

/// A placed purchase order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// The order ID, either local (temporary) or assigned by the backend.
    pub order_id: OrderId,
    /// The ordered line items.
    pub items: Vec<OrderItem>,
    /// The monetary total computed at submission time.
    pub total_amount: f64,
    /// The delivery drop-off coordinate, if location was available.
    #[serde(default)]
    pub delivery_location: Option<DeliveryLocation>,
    /// The creation instant; the sole sort key of the merged view.
    pub timestamp: UnixMillis,
    /// The current lifecycle status.
    pub status: OrderStatus,
}

impl Order {
    /// Creates a new [`Order`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if `total_amount` is negative or non-finite.
    pub fn new_checked(
        order_id: OrderId,
        items: Vec<OrderItem>,
        total_amount: f64,
        delivery_location: Option<DeliveryLocation>,
        timestamp: UnixMillis,
        status: OrderStatus,
    ) -> anyhow::Result<Self> {
        check_non_negative_f64(total_amount, stringify!(total_amount))?;
        Ok(Self {
            order_id,
            items,
            total_amount,
            delivery_location,
            timestamp,
            status,
        })
    }

    /// Creates a new [`Order`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `total_amount` is invalid (see [`Order::new_checked`]).
    #[must_use]
    pub fn new(
        order_id: OrderId,
        items: Vec<OrderItem>,
        total_amount: f64,
        delivery_location: Option<DeliveryLocation>,
        timestamp: UnixMillis,
        status: OrderStatus,
    ) -> Self {
        Self::new_checked(
            order_id,
            items,
            total_amount,
            delivery_location,
            timestamp,
            status,
        )
        .expect(FAILED)
    }

    /// Returns `true` if this order still carries a locally assigned ID.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.order_id.is_local()
    }

    /// Returns a copy of this order carrying `order_id`, all other fields unchanged.
    ///
    /// Used to promote a temporary order once the backend assigns its
    /// authoritative ID.
    #[must_use]
    pub fn with_order_id(&self, order_id: OrderId) -> Self {
        Self {
            order_id,
            ..self.clone()
        }
    }

    /// Returns a copy of this order carrying `status`, all other fields unchanged.
    #[must_use]
    pub fn with_status(&self, status: OrderStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Formats the creation instant for human display.
    #[must_use]
    pub fn formatted_date(&self) -> String {
        format_display_datetime(self.timestamp)
    }
}

/// A locally constructed order awaiting identity and submission.
///
/// The reconciliation engine assigns the temporary ID, creation instant, and
/// initial `Pending` status when the draft is placed.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderDraft {
    /// The ordered line items (must be non-empty).
    pub items: Vec<OrderItem>,
    /// The monetary total computed from item prices and quantities.
    pub total_amount: f64,
    /// The delivery drop-off coordinate, if location was available.
    pub delivery_location: Option<DeliveryLocation>,
}

impl OrderDraft {
    /// Creates a new [`OrderDraft`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `items` is empty.
    /// - `total_amount` is negative or non-finite.
    pub fn new_checked(
        items: Vec<OrderItem>,
        total_amount: f64,
        delivery_location: Option<DeliveryLocation>,
    ) -> anyhow::Result<Self> {
        check_predicate_false(items.is_empty(), "OrderDraft items was empty")?;
        check_non_negative_f64(total_amount, stringify!(total_amount))?;
        Ok(Self {
            items,
            total_amount,
            delivery_location,
        })
    }

    /// Creates a new [`OrderDraft`] instance.
    ///
    /// # Panics
    ///
    /// Panics if any input is invalid (see [`OrderDraft::new_checked`]).
    #[must_use]
    pub fn new(
        items: Vec<OrderItem>,
        total_amount: f64,
        delivery_location: Option<DeliveryLocation>,
    ) -> Self {
        Self::new_checked(items, total_amount, delivery_location).expect(FAILED)
    }

    /// Converts this draft into a `Pending` [`Order`] under the given identity.
    #[must_use]
    pub fn into_order(self, order_id: OrderId, timestamp: UnixMillis) -> Order {
        Order {
            order_id,
            items: self.items,
            total_amount: self.total_amount,
            delivery_location: self.delivery_location,
            timestamp,
            status: OrderStatus::Pending,
        }
    }
}
