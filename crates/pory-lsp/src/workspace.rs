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

//! Content and source discovery for a workspace on disk.
//!
//! [`WorkspaceProvider`] answers content reads in this order:
//!
//! 1. the open buffer in the [`DocumentStore`], if any
//! 2. for `file://` URIs, the file on disk
//! 3. for include paths, the file under the first workspace root containing it
//! 4. the editor extension's `poryscript/*` requests, when a client is attached
//!
//! Source enumeration walks every workspace root for `*.pory` files, or asks
//! the extension when no root is known.

use crate::constants::SOURCE_FILE_EXTENSION;
use crate::document_store::DocumentStore;
use crate::error::{FactError, FactResult};
use crate::provider::{ContentProvider, SourceEnumerator};
use crate::requests::{GetFileUri, GetPoryscriptFiles, ReadFile, ReadFs};
use crate::uri::{is_file_uri, normalize_resource, resource_url};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_lsp::lsp_types::{InitializeParams, Url};
use tower_lsp::Client;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Workspace-backed content provider and source enumerator.
pub struct WorkspaceProvider {
    documents: Arc<DocumentStore>,
    roots: RwLock<Vec<PathBuf>>,
    client: Option<Client>,
}

impl WorkspaceProvider {
    /// A provider that only reads open buffers and local files.
    pub fn new(documents: Arc<DocumentStore>) -> Self {
        Self {
            documents,
            roots: RwLock::new(Vec::new()),
            client: None,
        }
    }

    /// A provider that falls back to the editor extension's file requests.
    pub fn with_client(documents: Arc<DocumentStore>, client: Client) -> Self {
        Self {
            client: Some(client),
            ..Self::new(documents)
        }
    }

    pub fn documents(&self) -> &Arc<DocumentStore> {
        &self.documents
    }

    /// Replace the workspace roots.
    pub fn set_roots(&self, roots: Vec<PathBuf>) {
        let mut deduped: Vec<PathBuf> = Vec::with_capacity(roots.len());
        for root in roots {
            if !deduped.contains(&root) {
                deduped.push(root);
            }
        }
        debug!("Workspace roots: {:?}", deduped);
        *self.roots.write() = deduped;
    }

    /// Take the workspace roots from the `initialize` request.
    pub fn update_roots(&self, params: &InitializeParams) {
        let mut roots = Vec::new();
        if let Some(folders) = params.workspace_folders.as_ref() {
            roots.extend(folders.iter().filter_map(|folder| folder.uri.to_file_path().ok()));
        }
        if let Some(path) = params.root_uri.as_ref().and_then(|uri| uri.to_file_path().ok()) {
            roots.push(path);
        }
        #[allow(deprecated)]
        let root_path = params.root_path.as_ref();
        if let Some(root_path) = root_path.filter(|p| !p.is_empty()) {
            roots.push(PathBuf::from(root_path));
        }
        self.set_roots(roots);
    }

    pub fn roots(&self) -> Vec<PathBuf> {
        self.roots.read().clone()
    }

    /// Path of an include file under the first root that contains it.
    pub fn find_in_roots(&self, include: &str) -> Option<PathBuf> {
        self.roots
            .read()
            .iter()
            .map(|root| root.join(include))
            .find(|path| path.is_file())
    }

    async fn read_local(&self, resource: &str) -> FactResult<String> {
        let path = if is_file_uri(resource) {
            resource_url(resource)
                .and_then(|url| url.to_file_path().ok())
                .ok_or_else(|| FactError::content_unavailable(resource, "not a local file URI"))?
        } else {
            self.find_in_roots(resource).ok_or_else(|| {
                FactError::content_unavailable(resource, "not found under any workspace root")
            })?
        };
        read_file(resource, &path).await
    }

    async fn read_from_client(&self, client: &Client, resource: &str) -> FactResult<String> {
        let result = if is_file_uri(resource) {
            client.send_request::<ReadFs>(resource.to_string()).await
        } else {
            client.send_request::<ReadFile>(resource.to_string()).await
        };
        result.map_err(|e| FactError::content_unavailable(resource, e))
    }

    fn walk_sources(roots: &[PathBuf]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut sources = Vec::new();
        for root in roots {
            for entry in WalkDir::new(root)
                .follow_links(false)
                .into_iter()
                .filter_map(|entry| entry.ok())
            {
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = entry.into_path();
                if path.extension().and_then(|ext| ext.to_str()) != Some(SOURCE_FILE_EXTENSION) {
                    continue;
                }
                if let Ok(url) = Url::from_file_path(&path) {
                    let resource = normalize_resource(url.as_str());
                    if seen.insert(resource.clone()) {
                        sources.push(resource);
                    }
                }
            }
        }
        sources.sort();
        sources
    }
}

async fn read_file(resource: &str, path: &Path) -> FactResult<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FactError::Io {
            resource: resource.to_string(),
            source,
        })
}

#[tower_lsp::async_trait]
impl ContentProvider for WorkspaceProvider {
    async fn read_content(&self, resource: &str) -> FactResult<String> {
        if let Some(text) = self.documents.text(resource) {
            return Ok(text);
        }
        match self.read_local(resource).await {
            Ok(text) => Ok(text),
            Err(local_err) => match &self.client {
                Some(client) => {
                    debug!("Local read of {} failed ({}), asking client", resource, local_err);
                    self.read_from_client(client, resource).await
                }
                None => Err(local_err),
            },
        }
    }

    async fn resolve_uri(&self, resource: &str) -> String {
        if is_file_uri(resource) {
            return resource.to_string();
        }
        if let Some(url) = self
            .find_in_roots(resource)
            .and_then(|path| Url::from_file_path(path).ok())
        {
            return normalize_resource(url.as_str());
        }
        if let Some(client) = &self.client {
            match client.send_request::<GetFileUri>(resource.to_string()).await {
                Ok(uri) => return normalize_resource(&uri),
                Err(e) => debug!("Client could not resolve {}: {}", resource, e),
            }
        }
        resource.to_string()
    }
}

#[tower_lsp::async_trait]
impl SourceEnumerator for WorkspaceProvider {
    async fn list_source_files(&self) -> FactResult<Vec<String>> {
        let roots = self.roots();
        if roots.is_empty() {
            let Some(client) = &self.client else {
                return Ok(Vec::new());
            };
            let paths = client
                .send_request::<GetPoryscriptFiles>(())
                .await
                .map_err(|e| FactError::content_unavailable("workspace", e))?;
            return Ok(paths
                .iter()
                .map(|path| normalize_resource(&format!("file://{}", path)))
                .collect());
        }
        tokio::task::spawn_blocking(move || Self::walk_sources(&roots))
            .await
            .map_err(|e| {
                warn!("Source enumeration task failed: {}", e);
                FactError::content_unavailable("workspace", e)
            })
    }
}
