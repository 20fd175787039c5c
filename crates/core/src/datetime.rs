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

//! Datetime utilities built around [`UnixMillis`].

use std::time::{SystemTime, UNIX_EPOCH};

use crate::millis::UnixMillis;

/// Returns the current wall-clock time as [`UnixMillis`].
///
/// # Panics
///
/// Panics if the system clock is set before the UNIX epoch.
#[must_use]
pub fn unix_millis_now() -> UnixMillis {
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System clock set before UNIX epoch");
    UnixMillis::new(duration.as_millis() as u64)
}

/// Converts whole seconds to milliseconds.
#[must_use]
pub const fn secs_to_millis(secs: u64) -> u64 {
    secs * 1_000
}

/// Formats the given timestamp for human display, e.g. `Nov 14, 2023 22:13`.
#[must_use]
pub fn format_display_datetime(timestamp: UnixMillis) -> String {
    timestamp
        .to_datetime_utc()
        .format("%b %d, %Y %H:%M")
        .to_string()
}
