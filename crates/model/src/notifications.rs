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

//! User-facing notification records mirrored from the messaging backend.

use basket_core::UnixMillis;
use serde::{Deserialize, Serialize};

use crate::{
    enums::NotificationKind,
    identifiers::{NotificationId, OrderId},
};

/// A user-facing notification.
///
/// Notifications are authored by the backend; the client only flips the read
/// marker and clears the list, mirroring both mutations remotely best-effort.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// The notification ID assigned by the messaging backend.
    pub id: NotificationId,
    /// The display title.
    pub title: String,
    /// The display body.
    pub body: String,
    /// The notification category.
    #[serde(default)]
    pub kind: NotificationKind,
    /// The related order, for [`NotificationKind::Order`] notifications.
    #[serde(default)]
    pub order_id: Option<OrderId>,
    /// The instant the notification was created.
    pub timestamp: UnixMillis,
    /// Whether the user has read this notification.
    #[serde(default)]
    pub is_read: bool,
}

impl Notification {
    /// Returns a copy of this notification marked as read.
    #[must_use]
    pub fn mark_read(&self) -> Self {
        Self {
            is_read: true,
            ..self.clone()
        }
    }
}

/// Counts the unread notifications in `notifications`.
#[must_use]
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.is_read).count()
}
