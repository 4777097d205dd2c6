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

//! Collaborator contracts consumed by the fact cache.
//!
//! The cache never touches the filesystem or the client directly. Hosts plug
//! in implementations of these traits: [`crate::workspace::WorkspaceProvider`]
//! in the server, call-counting mocks in tests.

use crate::error::FactResult;
use crate::settings::ResolvedSettings;
use std::sync::Arc;

/// Supplies the current text of a resource.
#[tower_lsp::async_trait]
pub trait ContentProvider: Send + Sync {
    /// Read the text of a resource: a `file://` URI or an include path
    /// relative to the project.
    async fn read_content(&self, resource: &str) -> FactResult<String>;

    /// URI under which facts from `resource` are reported.
    ///
    /// Include paths from settings are project-relative; locations need an
    /// absolute URI. The default reports the resource as given.
    async fn resolve_uri(&self, resource: &str) -> String {
        resource.to_string()
    }
}

/// Supplies per-resource settings.
#[tower_lsp::async_trait]
pub trait SettingsProvider: Send + Sync {
    async fn settings(&self, resource: &str) -> FactResult<Arc<ResolvedSettings>>;
}

/// Lists the project's Poryscript sources, used once to pre-warm symbols.
#[tower_lsp::async_trait]
pub trait SourceEnumerator: Send + Sync {
    /// Resource ids (`file://` URIs) of every source file.
    async fn list_source_files(&self) -> FactResult<Vec<String>>;
}
