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

//! Real-time and static test clocks for timestamping.

use std::{
    fmt::Debug,
    sync::atomic::{AtomicU64, Ordering},
};

use basket_core::{UnixMillis, datetime::unix_millis_now};

/// A millisecond-precision clock.
pub trait Clock: Debug + Send + Sync {
    /// Returns the current time as [`UnixMillis`].
    fn timestamp_ms(&self) -> UnixMillis;
}

/// A clock which reads the system wall clock.
#[derive(Debug, Default)]
pub struct LiveClock;

impl LiveClock {
    /// Creates a new [`LiveClock`] instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for LiveClock {
    fn timestamp_ms(&self) -> UnixMillis {
        unix_millis_now()
    }
}

/// A manually advanced clock for deterministic tests.
#[derive(Debug, Default)]
pub struct TestClock {
    current: AtomicU64,
}

impl TestClock {
    /// Creates a new [`TestClock`] instance starting at the UNIX epoch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: AtomicU64::new(0),
        }
    }

    /// Sets the current time.
    pub fn set_time(&self, time: UnixMillis) {
        self.current.store(time.as_u64(), Ordering::Relaxed);
    }

    /// Advances the current time by `millis`.
    pub fn advance_millis(&self, millis: u64) {
        self.current.fetch_add(millis, Ordering::Relaxed);
    }
}

impl Clock for TestClock {
    fn timestamp_ms(&self) -> UnixMillis {
        UnixMillis::new(self.current.load(Ordering::Relaxed))
    }
}
