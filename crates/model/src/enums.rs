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

//! Enumerations for the order domain.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The lifecycle status of an order.
///
/// Statuses other than [`OrderStatus::Pending`] are only ever assigned by the
/// backend; a locally created order is always `Pending` until the remote feed
/// or an explicit cancel says otherwise. Unrecognized wire values fall back to
/// `Pending` rather than failing the record.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Accepted by the store.
    Confirmed,
    /// Items are being picked and packed.
    PreparingOrder,
    /// Packed and awaiting courier pickup.
    ReadyForPickup,
    /// Courier is en route to the store.
    OnWay,
    /// Courier is en route to the customer.
    OutForDelivery,
    /// Handed over to the customer.
    Delivered,
    /// A delivery attempt could not be completed.
    DeliveryAttemptFailed,
    /// Fulfilled and closed.
    Completed,
    /// Cancelled by the customer or the store.
    Cancelled,
    /// Returned after delivery.
    Returned,
    /// Submitted locally or received by the backend, not yet confirmed.
    #[default]
    #[serde(other)]
    Pending,
}

impl OrderStatus {
    /// Returns `true` if an order in this status may still be cancelled by the customer.
    #[must_use]
    pub const fn is_cancellable(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns `true` if this status is terminal (no further transitions expected).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Returned)
    }
}

/// The category of a user-facing notification.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    Hash,
    PartialEq,
    Eq,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    /// Relates to a specific order (carries the order identifier).
    Order,
    /// Promotional content.
    Promo,
    /// Anything else, including unrecognized wire values.
    #[default]
    #[serde(other)]
    General,
}
