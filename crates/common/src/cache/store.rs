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

//! Key-value persistence backing for the order cache.

use std::fmt::Debug;

use ahash::AHashMap;
use bytes::Bytes;
use tokio::sync::RwLock;

/// An opaque key-value store for serialized snapshots.
///
/// Platform integrations implement this over their local (typically encrypted)
/// preference storage. All operations are best-effort from the cache's
/// perspective; failures degrade to empty snapshots rather than propagating.
#[async_trait::async_trait]
pub trait KvStore: Debug + Send + Sync {
    /// Loads the payload stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store is unavailable.
    async fn load(&self, key: &str) -> anyhow::Result<Option<Bytes>>;

    /// Stores `payload` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store is unavailable.
    async fn save(&self, key: &str, payload: Bytes) -> anyhow::Result<()>;

    /// Removes any payload stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store is unavailable.
    async fn delete(&self, key: &str) -> anyhow::Result<()>;
}

/// An in-memory [`KvStore`] for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemoryKvStore {
    entries: RwLock<AHashMap<String, Bytes>>,
}

impl InMemoryKvStore {
    /// Creates a new empty [`InMemoryKvStore`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl KvStore for InMemoryKvStore {
    async fn load(&self, key: &str) -> anyhow::Result<Option<Bytes>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn save(&self, key: &str, payload: Bytes) -> anyhow::Result<()> {
        self.entries.write().await.insert(key.to_string(), payload);
        Ok(())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
