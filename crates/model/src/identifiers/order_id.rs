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

//! Represents a valid order ID, either local (temporary) or assigned by the backend.

use std::fmt::{Debug, Display, Formatter};

use basket_core::correctness::{FAILED, check_valid_string};
use serde::{Deserialize, Serialize};
use ustr::Ustr;

/// The prefix which marks an order ID as locally assigned and not yet
/// acknowledged by the backend.
pub const LOCAL_ORDER_ID_PREFIX: &str = "TEMP";

/// Represents a valid order ID.
///
/// Locally assigned (temporary) IDs carry the [`LOCAL_ORDER_ID_PREFIX`];
/// authoritative IDs are assigned by the backend and arrive only via the
/// submission gateway response or the remote order feed.
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(Ustr);

impl OrderId {
    /// Creates a new [`OrderId`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not a valid string.
    pub fn new_checked<T: AsRef<str>>(value: T) -> anyhow::Result<Self> {
        let value = value.as_ref();
        check_valid_string(value, stringify!(value))?;
        Ok(Self(Ustr::from(value)))
    }

    /// Creates a new [`OrderId`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not a valid string.
    pub fn new<T: AsRef<str>>(value: T) -> Self {
        Self::new_checked(value).expect(FAILED)
    }

    /// Returns `true` if this ID was assigned locally and has not yet been
    /// redeemed for an authoritative backend ID.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.0.as_str().starts_with(LOCAL_ORDER_ID_PREFIX)
    }

    /// Returns the inner identifier value.
    #[must_use]
    pub fn inner(&self) -> Ustr {
        self.0
    }

    /// Returns the inner identifier value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Debug for OrderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        self.as_str()
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
    fn test_string_reprs() {
        let order_id = OrderId::new("ORD-123");
        assert_eq!(order_id.as_str(), "ORD-123");
        assert_eq!(format!("{order_id}"), "ORD-123");
        assert_eq!(format!("{order_id:?}"), "\"ORD-123\"");
    }

    #[rstest]
    #[case("TEMP-20231114-221320-1", true)]
    #[case("TEMP1700000000000", true)]
    #[case("ORD-123", false)]
    #[case("ord-temp", false)]
    fn test_is_local(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(OrderId::new(value).is_local(), expected);
    }

    #[rstest]
    fn test_new_checked_rejects_empty() {
        assert!(OrderId::new_checked("").is_err());
    }

    #[rstest]
    fn test_serde_roundtrip() {
        let order_id = OrderId::new("ORD-123");
        let json = serde_json::to_string(&order_id).unwrap();
        assert_eq!(json, "\"ORD-123\"");
        let parsed: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, order_id);
    }
}
