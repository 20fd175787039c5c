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

//! Unified error handling for synchronization and gateway operations.
//!
//! The taxonomy distinguishes transient transport failures (recovered locally
//! by fallbacks or by leaving optimistic state in place) from non-retryable
//! rejections and malformed payloads (dropped and logged per record). No error
//! from an external collaborator is allowed to poison the merge or the
//! observable stream.

use basket_model::{enums::OrderStatus, identifiers::OrderId};
use thiserror::Error;

/// An error from a gateway or feed collaborator.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The backend could not be reached.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The request did not complete within the configured bound.
    #[error("Request timed out")]
    Timeout,

    /// The backend rejected the request.
    #[error("Server rejected request (status {status}): {message}")]
    Rejected {
        /// The HTTP status code returned.
        status: u16,
        /// The response body or reason phrase.
        message: String,
    },

    /// The backend returned a payload which could not be interpreted.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl GatewayError {
    /// Returns `true` if retrying the same request may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout)
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if let Some(status) = error.status() {
            Self::Rejected {
                status: status.as_u16(),
                message: error.to_string(),
            }
        } else if error.is_decode() {
            Self::MalformedResponse(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}

/// An error from the reconciliation engine's caller-facing operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The operation requires an identified user.
    #[error("No signed-in user")]
    NotSignedIn,

    /// The referenced order is not present in the current view.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The referenced order cannot be cancelled in its current status.
    #[error("Order not cancellable in status {0}")]
    NotCancellable(OrderStatus),

    /// A gateway call failed and no local fallback applied.
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_error_classification() {
        assert!(GatewayError::Transport("connection refused".to_string()).is_retryable());
        assert!(GatewayError::Timeout.is_retryable());
        assert!(
            !GatewayError::Rejected {
                status: 400,
                message: "userId required".to_string(),
            }
            .is_retryable()
        );
        assert!(!GatewayError::MalformedResponse("not json".to_string()).is_retryable());
    }

    #[rstest]
    fn test_sync_error_display() {
        let err = SyncError::NotCancellable(OrderStatus::Delivered);
        assert_eq!(err.to_string(), "Order not cancellable in status DELIVERED");

        let err = SyncError::OrderNotFound(OrderId::new("ORD-9"));
        assert_eq!(err.to_string(), "Order not found: ORD-9");
    }
}
