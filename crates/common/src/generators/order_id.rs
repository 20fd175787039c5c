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

use std::sync::Arc;

use basket_model::identifiers::{OrderId, order_id::LOCAL_ORDER_ID_PREFIX};

use super::get_datetime_tag;
use crate::clock::Clock;

/// Generates temporary order IDs for optimistic local submissions.
///
/// Generated IDs carry the local prefix, a datetime tag from the submission
/// clock, and a monotonically increasing count, so they are locally unique and
/// recognizable until redeemed for an authoritative backend ID.
#[derive(Debug)]
pub struct TempOrderIdGenerator {
    clock: Arc<dyn Clock>,
    count: usize,
}

impl TempOrderIdGenerator {
    /// Creates a new [`TempOrderIdGenerator`] instance.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, initial_count: usize) -> Self {
        Self {
            clock,
            count: initial_count,
        }
    }

    /// Sets the internal count.
    pub const fn set_count(&mut self, count: usize) {
        self.count = count;
    }

    /// Resets the internal count to zero.
    pub const fn reset(&mut self) {
        self.count = 0;
    }

    /// Returns the internal count.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Generates the next temporary order ID.
    pub fn generate(&mut self) -> OrderId {
        let datetime_tag = get_datetime_tag(self.clock.timestamp_ms());
        self.count += 1;
        let value = format!("{LOCAL_ORDER_ID_PREFIX}-{datetime_tag}-{}", self.count);
        OrderId::from(value.as_str())
    }
}
