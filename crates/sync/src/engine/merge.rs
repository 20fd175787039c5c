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

//! The pure snapshot merge at the heart of order reconciliation.
//!
//! Every remote push replaces the authoritative portion of the view wholesale;
//! local temporary orders survive until their ID appears remotely. The merge
//! is a pure transformation with no hidden state, so redundant or stale pushes
//! are harmless: merging the same snapshot twice yields an identical view.

use ahash::AHashSet;
use basket_model::{identifiers::OrderId, orders::Order};

/// Merges the latest authoritative snapshot into the current published view.
///
/// The result contains every order of `remote` (first occurrence wins when the
/// snapshot itself carries duplicate IDs), plus any local temporary order from
/// `current` whose ID has not yet appeared remotely, sorted newest-first.
/// Orders with equal timestamps keep their relative arrival order (the sort is
/// stable), so repeated merges of the same inputs cannot reorder the view.
#[must_use]
pub fn merge_snapshots(current: &[Order], remote: Vec<Order>) -> Vec<Order> {
    let remote_ids: AHashSet<OrderId> = remote.iter().map(|o| o.order_id).collect();

    let mut seen: AHashSet<OrderId> = AHashSet::with_capacity(remote.len());
    let mut merged: Vec<Order> = Vec::with_capacity(remote.len() + 4);
    for order in remote {
        if seen.insert(order.order_id) {
            merged.push(order);
        } else {
            log::warn!("Dropping duplicate order {} from snapshot", order.order_id);
        }
    }

    // A temporary order is redeemed the moment its ID appears remotely; until
    // promotion rewrites the ID this check cannot match, but it guards against
    // a duplicate if a promoted entry was ever left under its original key.
    let surviving = current
        .iter()
        .filter(|o| o.is_local() && !remote_ids.contains(&o.order_id));
    for order in surviving {
        if seen.insert(order.order_id) {
            merged.push(order.clone());
        }
    }

    merged.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    merged
}

/// Returns the authoritative (non-local) portion of a merged view.
///
/// This is what gets persisted: temporary orders are intentionally never
/// written to the cache, so a restart mid-flight shows only what the backend
/// has acknowledged.
#[must_use]
pub fn authoritative_orders(view: &[Order]) -> Vec<Order> {
    view.iter().filter(|o| !o.is_local()).cloned().collect()
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use basket_model::{enums::OrderStatus, stubs::order_with};
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_empty_inputs() {
        assert!(merge_snapshots(&[], vec![]).is_empty());
    }

    #[rstest]
    fn test_remote_replaces_authoritative_entries() {
        let current = vec![
            order_with("ORD-1", 1_000, OrderStatus::Pending),
            order_with("ORD-2", 2_000, OrderStatus::Pending),
        ];
        let remote = vec![order_with("ORD-2", 2_000, OrderStatus::Confirmed)];

        let merged = merge_snapshots(&current, remote);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].order_id.as_str(), "ORD-2");
        assert_eq!(merged[0].status, OrderStatus::Confirmed);
    }

    #[rstest]
    fn test_local_orders_survive_merge() {
        let current = vec![
            order_with("TEMP-20231114-221320-1", 3_000, OrderStatus::Pending),
            order_with("ORD-1", 1_000, OrderStatus::Confirmed),
        ];
        let remote = vec![order_with("ORD-1", 1_000, OrderStatus::Delivered)];

        let merged = merge_snapshots(&current, remote);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].order_id.as_str(), "TEMP-20231114-221320-1");
        assert_eq!(merged[1].status, OrderStatus::Delivered);
    }

    #[rstest]
    fn test_local_order_redeemed_by_remote_id() {
        // The defensive path: a still-local ID appearing remotely supersedes
        // the local record.
        let current = vec![order_with("TEMP-20231114-221320-1", 3_000, OrderStatus::Pending)];
        let remote = vec![order_with(
            "TEMP-20231114-221320-1",
            3_000,
            OrderStatus::Confirmed,
        )];

        let merged = merge_snapshots(&current, remote);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].status, OrderStatus::Confirmed);
    }

    #[rstest]
    fn test_merge_is_idempotent() {
        let current = vec![
            order_with("TEMP-20231114-221320-1", 3_000, OrderStatus::Pending),
            order_with("ORD-2", 2_000, OrderStatus::Confirmed),
            order_with("ORD-1", 1_000, OrderStatus::Delivered),
        ];
        let remote = vec![
            order_with("ORD-2", 2_000, OrderStatus::Confirmed),
            order_with("ORD-1", 1_000, OrderStatus::Delivered),
        ];

        let once = merge_snapshots(&current, remote.clone());
        let twice = merge_snapshots(&once, remote);
        assert_eq!(once, twice);
    }

    #[rstest]
    fn test_duplicate_ids_within_snapshot_are_dropped() {
        let remote = vec![
            order_with("ORD-1", 2_000, OrderStatus::Confirmed),
            order_with("ORD-1", 1_000, OrderStatus::Pending),
        ];

        let merged = merge_snapshots(&[], remote);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].status, OrderStatus::Confirmed);
    }

    #[rstest]
    fn test_no_two_entries_share_an_id() {
        let current = vec![
            order_with("TEMP-20231114-221320-1", 5_000, OrderStatus::Pending),
            order_with("ORD-1", 1_000, OrderStatus::Pending),
        ];
        let remote = vec![
            order_with("ORD-1", 1_000, OrderStatus::Confirmed),
            order_with("ORD-2", 2_000, OrderStatus::Pending),
        ];

        let merged = merge_snapshots(&current, remote);
        let mut ids: Vec<&str> = merged.iter().map(|o| o.order_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), merged.len());
    }

    #[rstest]
    fn test_sorted_newest_first() {
        let remote = vec![
            order_with("ORD-1", 1_000, OrderStatus::Pending),
            order_with("ORD-3", 3_000, OrderStatus::Pending),
            order_with("ORD-2", 2_000, OrderStatus::Pending),
        ];

        let merged = merge_snapshots(&[], remote);
        let timestamps: Vec<u64> = merged.iter().map(|o| o.timestamp.as_u64()).collect();
        assert_eq!(timestamps, vec![3_000, 2_000, 1_000]);
    }

    #[rstest]
    fn test_equal_timestamps_are_stable_across_merges() {
        let remote = vec![
            order_with("ORD-A", 1_000, OrderStatus::Pending),
            order_with("ORD-B", 1_000, OrderStatus::Pending),
        ];

        let once = merge_snapshots(&[], remote.clone());
        let twice = merge_snapshots(&once, remote.clone());
        let thrice = merge_snapshots(&twice, remote);
        assert_eq!(once, twice);
        assert_eq!(twice, thrice);
        assert_eq!(once.len(), 2);
    }

    #[rstest]
    fn test_applying_push_sequence_keeps_only_latest() {
        let pushes = [
            vec![order_with("ORD-1", 1_000, OrderStatus::Pending)],
            vec![
                order_with("ORD-1", 1_000, OrderStatus::Confirmed),
                order_with("ORD-2", 2_000, OrderStatus::Pending),
            ],
            vec![order_with("ORD-2", 2_000, OrderStatus::Cancelled)],
        ];

        let mut view: Vec<Order> = Vec::new();
        for push in pushes.clone() {
            view = merge_snapshots(&view, push);
        }

        let last = pushes.last().unwrap();
        assert_eq!(view, *last);
    }

    #[rstest]
    fn test_authoritative_orders_excludes_local() {
        let view = vec![
            order_with("TEMP-20231114-221320-1", 3_000, OrderStatus::Pending),
            order_with("ORD-1", 1_000, OrderStatus::Confirmed),
        ];
        let persisted = authoritative_orders(&view);
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].order_id.as_str(), "ORD-1");
    }
}
