// Dweve Poryscript Language Server - editor tooling for Poryscript
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Open document buffers.
//!
//! Holds the editor's text for every open document, keyed by normalised
//! resource id. The workspace provider consults it before the filesystem, so
//! facts always reflect unsaved edits.
//!
//! # Design
//!
//! - **Rope Storage**: Buffers are stored as `ropey::Rope`
//! - **Change Detection**: A content hash tells real edits apart from
//!   re-sends of identical text, so callers can skip invalidation
//! - **Size Limits**: Buffers over the maximum size are refused

use crate::constants::DEFAULT_MAX_DOCUMENT_SIZE;
use dashmap::DashMap;
use parking_lot::RwLock;
use ropey::Rope;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::{debug, warn};

/// A stored buffer.
#[derive(Debug, Clone)]
pub struct DocumentState {
    pub rope: Rope,
    pub content_hash: u64,
}

/// What [`DocumentStore::insert_or_update`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// First buffer for this resource.
    Inserted,
    /// Buffer text changed.
    Changed,
    /// Same text as before; only the version moved.
    Unchanged,
    /// Text exceeds the size limit and was not stored. Any previous buffer
    /// for the resource has been dropped.
    Rejected,
}

impl UpdateOutcome {
    /// Whether cached facts for the resource may now be stale.
    pub fn invalidates(self) -> bool {
        !matches!(self, UpdateOutcome::Unchanged)
    }
}

/// Concurrent store of open buffers.
pub struct DocumentStore {
    documents: DashMap<String, DocumentState>,
    max_document_size: RwLock<usize>,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DOCUMENT_SIZE)
    }
}

impl DocumentStore {
    pub fn new(max_document_size: usize) -> Self {
        Self {
            documents: DashMap::new(),
            max_document_size: RwLock::new(max_document_size),
        }
    }

    pub fn max_document_size(&self) -> usize {
        *self.max_document_size.read()
    }

    /// Update maximum document size (can be called during runtime).
    pub fn set_max_document_size(&self, new_max: usize) {
        *self.max_document_size.write() = new_max;
        debug!("Max document size updated to: {} bytes", new_max);
    }

    fn hash_content(content: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        content.hash(&mut hasher);
        hasher.finish()
    }

    /// Store the full text of a document.
    pub fn insert_or_update(&self, resource: &str, content: &str, version: i32) -> UpdateOutcome {
        let max_size = self.max_document_size();
        if content.len() > max_size {
            warn!(
                "Document size limit exceeded for {}: {} bytes > {} bytes maximum (rejected)",
                resource,
                content.len(),
                max_size
            );
            self.documents.remove(resource);
            return UpdateOutcome::Rejected;
        }

        let content_hash = Self::hash_content(content);
        if let Some(mut state) = self.documents.get_mut(resource) {
            if state.content_hash == content_hash {
                debug!(
                    "Document content unchanged for {} (hash: {:#x}, version {})",
                    resource, content_hash, version
                );
                return UpdateOutcome::Unchanged;
            }
            debug!(
                "Document content changed for {}: {} -> {} bytes (version {})",
                resource,
                state.rope.len_bytes(),
                content.len(),
                version
            );
            state.rope = Rope::from_str(content);
            state.content_hash = content_hash;
            return UpdateOutcome::Changed;
        }

        debug!(
            "New document registered: {} ({} bytes, {} lines)",
            resource,
            content.len(),
            content.lines().count()
        );
        self.documents.insert(
            resource.to_string(),
            DocumentState {
                rope: Rope::from_str(content),
                content_hash,
            },
        );
        UpdateOutcome::Inserted
    }

    /// Current text of an open document.
    pub fn text(&self, resource: &str) -> Option<String> {
        self.documents
            .get(resource)
            .map(|state| state.rope.to_string())
    }

    pub fn contains(&self, resource: &str) -> bool {
        self.documents.contains_key(resource)
    }

    /// Drop a buffer. Returns `true` if it existed.
    pub fn remove(&self, resource: &str) -> bool {
        self.documents.remove(resource).is_some()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
