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

//! Domain model for the `basket` order synchronization engine.
//!
//! The `basket-model` crate defines the value types shared across the workspace:
//!
//! - Identifiers for orders, users, and notifications.
//! - The closed `OrderStatus` enumeration and its wire forms.
//! - `Order`, `OrderItem`, `DeliveryLocation`, and `OrderDraft`.
//! - `Notification` records mirrored from the backend.
//!
//! All types validate their inputs on construction and serialize to the same
//! JSON document shapes the platform backend stores and pushes.
//!
//! # Feature flags
//!
//! - `stubs`: Enables test fixtures for use by dependent crates.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod enums;
pub mod identifiers;
pub mod notifications;
pub mod orders;

#[cfg(any(test, feature = "stubs"))]
pub mod stubs;
