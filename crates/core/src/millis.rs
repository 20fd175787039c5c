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

//! A `UnixMillis` type for working with timestamps in milliseconds since the UNIX epoch.
//!
//! Order records carry millisecond-precision creation instants which serve as the
//! sole sort key of the merged order view. The `UnixMillis` type offers conversion
//! utilities, arithmetic operations, and comparison methods.
//!
//! # Parsing and Serialization
//!
//! `UnixMillis` can be created from and serialized to various formats:
//!
//! * Integer values are interpreted as milliseconds since the UNIX epoch.
//! * String values may be:
//!   - A numeric string (interpreted as milliseconds).
//!   - An RFC 3339 formatted timestamp (ISO 8601 with timezone).
//!
//! # Limitations
//!
//! * Negative timestamps are invalid and will result in an error.
//! * Arithmetic operations will panic on overflow/underflow rather than wrapping.

use std::{
    fmt::Display,
    ops::{Add, AddAssign, Sub, SubAssign},
    str::FromStr,
};

use chrono::{DateTime, Utc};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, Visitor},
};

/// Represents a duration in milliseconds.
pub type DurationMillis = u64;

/// Represents a timestamp in milliseconds since the UNIX epoch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct UnixMillis(u64);

impl UnixMillis {
    /// Creates a new [`UnixMillis`] instance.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns `true` if the value of this instance is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns the underlying value as `u64`.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns the underlying value as `i64`.
    ///
    /// # Panics
    ///
    /// Panics if the value exceeds `i64::MAX`.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        assert!(
            self.0 <= i64::MAX as u64,
            "UnixMillis value exceeds i64::MAX"
        );
        self.0 as i64
    }

    /// Converts the underlying value to a datetime (UTC).
    ///
    /// # Panics
    ///
    /// Panics if the value exceeds `i64::MAX`.
    #[must_use]
    pub fn to_datetime_utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.as_i64())
            .expect("Milliseconds timestamp should be within valid range")
    }

    /// Converts the underlying value to an ISO 8601 (RFC 3339) string.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.to_datetime_utc().to_rfc3339()
    }

    /// Returns the duration since `other`, saturating at zero.
    #[must_use]
    pub const fn saturating_millis_since(&self, other: Self) -> DurationMillis {
        self.0.saturating_sub(other.0)
    }
}

impl From<u64> for UnixMillis {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<UnixMillis> for u64 {
    fn from(value: UnixMillis) -> Self {
        value.0
    }
}

impl From<DateTime<Utc>> for UnixMillis {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.timestamp_millis().max(0) as u64)
    }
}

impl FromStr for UnixMillis {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(millis) = s.parse::<u64>() {
            return Ok(Self(millis));
        }
        if let Ok(datetime) = DateTime::parse_from_rfc3339(s) {
            let millis = datetime.timestamp_millis();
            anyhow::ensure!(millis >= 0, "Timestamp before UNIX epoch: {s}");
            return Ok(Self(millis as u64));
        }
        anyhow::bail!("Invalid UnixMillis value: {s}")
    }
}

impl Display for UnixMillis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for UnixMillis {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(
            self.0
                .checked_add(rhs.0)
                .expect("UnixMillis addition overflowed"),
        )
    }
}

impl Add<u64> for UnixMillis {
    type Output = Self;

    fn add(self, rhs: u64) -> Self::Output {
        Self(
            self.0
                .checked_add(rhs)
                .expect("UnixMillis addition overflowed"),
        )
    }
}

impl Sub for UnixMillis {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(
            self.0
                .checked_sub(rhs.0)
                .expect("UnixMillis subtraction underflowed"),
        )
    }
}

impl Sub<u64> for UnixMillis {
    type Output = Self;

    fn sub(self, rhs: u64) -> Self::Output {
        Self(
            self.0
                .checked_sub(rhs)
                .expect("UnixMillis subtraction underflowed"),
        )
    }
}

impl AddAssign<u64> for UnixMillis {
    fn add_assign(&mut self, rhs: u64) {
        *self = *self + rhs;
    }
}

impl SubAssign<u64> for UnixMillis {
    fn sub_assign(&mut self, rhs: u64) {
        *self = *self - rhs;
    }
}

impl<'de> Deserialize<'de> for UnixMillis {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct UnixMillisVisitor;

        impl Visitor<'_> for UnixMillisVisitor {
            type Value = UnixMillis;

            fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter.write_str("a u64 of milliseconds, or a numeric or RFC 3339 string")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(UnixMillis(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value < 0 {
                    return Err(E::custom(format!("Timestamp before UNIX epoch: {value}")));
                }
                Ok(UnixMillis(value as u64))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                value.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(UnixMillisVisitor)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_new_and_accessors() {
        let ts = UnixMillis::new(1_700_000_000_000);
        assert_eq!(ts.as_u64(), 1_700_000_000_000);
        assert_eq!(ts.as_i64(), 1_700_000_000_000);
        assert!(!ts.is_zero());
        assert!(UnixMillis::default().is_zero());
    }

    #[rstest]
    fn test_ordering() {
        let earlier = UnixMillis::new(1_000);
        let later = UnixMillis::new(2_000);
        assert!(earlier < later);
        assert_eq!(later.saturating_millis_since(earlier), 1_000);
        assert_eq!(earlier.saturating_millis_since(later), 0);
    }

    #[rstest]
    fn test_arithmetic() {
        let ts = UnixMillis::new(5_000);
        assert_eq!(ts + 1_000, UnixMillis::new(6_000));
        assert_eq!(ts - 1_000, UnixMillis::new(4_000));

        let mut ts = ts;
        ts += 500;
        assert_eq!(ts, UnixMillis::new(5_500));
    }

    #[rstest]
    fn test_to_rfc3339() {
        let ts = UnixMillis::new(0);
        assert_eq!(ts.to_rfc3339(), "1970-01-01T00:00:00+00:00");
    }

    #[rstest]
    #[case("1700000000000", 1_700_000_000_000)]
    #[case("1970-01-01T00:00:01+00:00", 1_000)]
    fn test_from_str_valid(#[case] input: &str, #[case] expected: u64) {
        let ts: UnixMillis = input.parse().unwrap();
        assert_eq!(ts.as_u64(), expected);
    }

    #[rstest]
    #[case("not-a-timestamp")]
    #[case("-100")]
    fn test_from_str_invalid(#[case] input: &str) {
        assert!(input.parse::<UnixMillis>().is_err());
    }

    #[rstest]
    fn test_serde_roundtrip() {
        let ts = UnixMillis::new(1_700_000_000_000);
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "1700000000000");
        let parsed: UnixMillis = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ts);
    }

    #[rstest]
    fn test_serde_from_string() {
        let parsed: UnixMillis = serde_json::from_str("\"1970-01-01T00:00:01+00:00\"").unwrap();
        assert_eq!(parsed, UnixMillis::new(1_000));
    }
}
