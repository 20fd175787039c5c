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

//! Configuration for the order reconciliation engine.

/// Configuration for [`OrderSyncEngine`](crate::engine::OrderSyncEngine) instances.
#[derive(Clone, Copy, Debug)]
pub struct SyncConfig {
    /// If `true`, every merged snapshot's authoritative portion is written
    /// back to the cache.
    pub persist_snapshots: bool,
    /// If `true`, the anonymous cache segment is cleared when the user signs
    /// out, so a later anonymous session cannot observe stale data.
    pub clear_cache_on_sign_out: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            persist_snapshots: true,
            clear_cache_on_sign_out: true,
        }
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
    fn test_default() {
        let config = SyncConfig::default();
        assert!(config.persist_snapshots);
        assert!(config.clear_cache_on_sign_out);
    }
}
