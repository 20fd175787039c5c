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

//! Order reconciliation engine and gateway clients for the `basket` platform.
//!
//! The `basket-sync` crate keeps a client-local, possibly-optimistic view of a
//! user's orders consistent with the authoritative snapshots pushed by the
//! platform backend:
//!
//! - [`engine::OrderSyncEngine`] owns the per-session state, merges every feed
//!   push through a pure merge function, and exposes the deduplicated,
//!   newest-first order list as a single observable stream.
//! - [`client`] defines the narrow contracts over the external collaborators:
//!   the remote order feed, the submission gateway, and the notification
//!   backend.
//! - [`notifications::NotificationHub`] mirrors the same optimistic pattern
//!   for user notifications.
//! - [`http`] implements the gateway contracts over the platform's REST API.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod client;
pub mod engine;
pub mod error;
pub mod http;
pub mod notifications;
