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

//! LSP backend implementation.
//!
//! The backend owns four shared services and wires protocol events to them:
//!
//! - [`DocumentStore`]: open buffers, updated by the text sync notifications
//! - [`WorkspaceProvider`]: content reads and source enumeration
//! - [`ClientSettingsProvider`]: per-resource `workspace/configuration` answers
//! - [`FactCache`]: memoized facts, invalidated on every buffer change; the
//!   symbols of a changed source are extracted again right away
//!
//! Every request handler goes through [`FactCache::document_facts`]. Only a
//! failure to read the requested document itself becomes a protocol error.

use crate::cache::{CacheStatistics, FactCache};
use crate::completion::get_completions;
use crate::constants::{
    BYTES_PER_MEGABYTE, DEFAULT_MAX_DOCUMENT_SIZE, SOURCE_FILE_EXTENSION, WATCHED_FILES_GLOB,
};
use crate::definition::get_definition;
use crate::document_store::{DocumentStore, UpdateOutcome};
use crate::provider::SourceEnumerator;
use crate::semantic_tokens::{get_semantic_tokens, legend};
use crate::settings::ClientSettingsProvider;
use crate::signature_help::get_signature_help;
use crate::uri::resource_id;
use crate::workspace::WorkspaceProvider;
use parking_lot::RwLock;
use serde_json::json;
use std::sync::Arc;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::{debug, error, info, warn};

/// Client capabilities the backend acts on after `initialize`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionCapabilities {
    /// The client answers `workspace/configuration`.
    pub configuration: bool,
    /// The client accepts a dynamic `workspace/didChangeWatchedFiles`
    /// registration.
    pub watched_files_registration: bool,
}

impl SessionCapabilities {
    pub fn from_client(capabilities: &ClientCapabilities) -> Self {
        let workspace = capabilities.workspace.as_ref();
        Self {
            configuration: workspace.and_then(|w| w.configuration).unwrap_or(false),
            watched_files_registration: workspace
                .and_then(|w| w.did_change_watched_files.as_ref())
                .and_then(|w| w.dynamic_registration)
                .unwrap_or(false),
        }
    }
}

/// Poryscript Language Server backend.
pub struct PoryLanguageServer {
    client: Client,
    documents: Arc<DocumentStore>,
    workspace: Arc<WorkspaceProvider>,
    settings: Arc<ClientSettingsProvider>,
    cache: Arc<FactCache>,
    capabilities: RwLock<SessionCapabilities>,
}

impl PoryLanguageServer {
    /// Create a new language server with the default document size limit.
    pub fn new(client: Client) -> Self {
        Self::with_config(client, DEFAULT_MAX_DOCUMENT_SIZE)
    }

    /// Create a new language server with a custom document size limit.
    ///
    /// ```no_run
    /// use pory_lsp::PoryLanguageServer;
    /// use tower_lsp::LspService;
    ///
    /// // Refuse buffers over 8 MB.
    /// let (service, socket) =
    ///     LspService::new(|client| PoryLanguageServer::with_config(client, 8 * 1024 * 1024));
    /// ```
    pub fn with_config(client: Client, max_document_size: usize) -> Self {
        let documents = Arc::new(DocumentStore::new(max_document_size));
        let workspace = Arc::new(WorkspaceProvider::with_client(
            Arc::clone(&documents),
            client.clone(),
        ));
        let settings = Arc::new(ClientSettingsProvider::new(client.clone()));
        let cache = Arc::new(FactCache::new(workspace.clone(), settings.clone()));
        Self {
            client,
            documents,
            workspace,
            settings,
            cache,
            capabilities: RwLock::new(SessionCapabilities::default()),
        }
    }

    pub fn documents(&self) -> &Arc<DocumentStore> {
        &self.documents
    }

    pub fn workspace(&self) -> &Arc<WorkspaceProvider> {
        &self.workspace
    }

    pub fn settings(&self) -> &Arc<ClientSettingsProvider> {
        &self.settings
    }

    pub fn cache(&self) -> &Arc<FactCache> {
        &self.cache
    }

    pub fn capabilities(&self) -> SessionCapabilities {
        *self.capabilities.read()
    }

    pub async fn cache_statistics(&self) -> CacheStatistics {
        self.cache.statistics().await
    }

    /// Update maximum document size (can be called during runtime).
    pub fn set_max_document_size(&self, new_max: usize) {
        self.documents.set_max_document_size(new_max);
    }

    pub fn max_document_size(&self) -> usize {
        self.documents.max_document_size()
    }

    /// Populate the symbol cache for every project source.
    ///
    /// Returns the number of sources whose symbols were extracted.
    pub async fn prewarm_symbols(&self) -> usize {
        prewarm_symbols(&self.workspace, &self.cache).await
    }

    /// Store a buffer and drop facts extracted from its previous text.
    async fn update_document(&self, uri: &Url, text: &str, version: i32) {
        let resource = resource_id(uri);
        let outcome = self.documents.insert_or_update(&resource, text, version);
        if outcome == UpdateOutcome::Rejected {
            let max_size = self.documents.max_document_size();
            error!(
                "Document size limit exceeded: {} has {} bytes > {} bytes maximum",
                uri,
                text.len(),
                max_size
            );
            self.client
                .show_message(
                    MessageType::ERROR,
                    format!(
                        "Document too large: {} bytes exceeds maximum of {} bytes ({} MB)",
                        text.len(),
                        max_size,
                        max_size / BYTES_PER_MEGABYTE
                    ),
                )
                .await;
        }
        if outcome.invalidates() {
            self.refresh_resource(&resource).await;
        }
    }

    /// Invalidate a resource, then extract its symbols again if it is a
    /// Poryscript source, so workspace-wide lookups keep seeing it.
    async fn refresh_resource(&self, resource: &str) {
        self.cache.invalidate(resource).await;
        if !is_source_file(resource) {
            return;
        }
        if let Err(e) = self.cache.get_symbols(resource).await {
            warn!("Skipping symbols of {}: {}", resource, e);
        }
    }

    async fn register_notifications(&self) {
        let capabilities = self.capabilities();
        let mut registrations = Vec::new();
        if capabilities.configuration {
            registrations.push(Registration {
                id: "pory-lsp-did-change-configuration".to_string(),
                method: "workspace/didChangeConfiguration".to_string(),
                register_options: None,
            });
        }
        if capabilities.watched_files_registration {
            registrations.push(Registration {
                id: "pory-lsp-did-change-watched-files".to_string(),
                method: "workspace/didChangeWatchedFiles".to_string(),
                register_options: Some(json!({
                    "watchers": [{ "globPattern": WATCHED_FILES_GLOB }]
                })),
            });
        }
        if registrations.is_empty() {
            return;
        }
        let count = registrations.len();
        match self.client.register_capability(registrations).await {
            Ok(()) => debug!("Registered {} dynamic notifications", count),
            Err(e) => warn!("Dynamic registration failed: {}", e),
        }
    }
}

async fn prewarm_symbols(workspace: &WorkspaceProvider, cache: &FactCache) -> usize {
    let sources = match workspace.list_source_files().await {
        Ok(sources) => sources,
        Err(e) => {
            warn!("Could not enumerate Poryscript sources: {}", e);
            return 0;
        }
    };
    let mut warmed = 0;
    for source in &sources {
        match cache.get_symbols(source).await {
            Ok(_) => warmed += 1,
            Err(e) => warn!("Skipping symbols of {}: {}", source, e),
        }
    }
    info!("Pre-warmed symbols for {} of {} sources", warmed, sources.len());
    warmed
}

fn is_source_file(resource: &str) -> bool {
    resource
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext == SOURCE_FILE_EXTENSION)
}

fn text_position(params: &TextDocumentPositionParams) -> (String, Position) {
    (resource_id(&params.text_document.uri), params.position)
}

#[tower_lsp::async_trait]
impl LanguageServer for PoryLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("Poryscript Language Server initializing");

        let capabilities = SessionCapabilities::from_client(&params.capabilities);
        debug!("Client capabilities: {:?}", capabilities);
        *self.capabilities.write() = capabilities;
        self.settings.set_config_capability(capabilities.configuration);
        self.workspace.update_roots(&params);

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::FULL),
                        ..Default::default()
                    },
                )),
                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(false),
                    ..Default::default()
                }),
                signature_help_provider: Some(SignatureHelpOptions {
                    trigger_characters: Some(vec!["(".to_string(), ",".to_string()]),
                    retrigger_characters: None,
                    work_done_progress_options: Default::default(),
                }),
                definition_provider: Some(OneOf::Left(true)),
                semantic_tokens_provider: Some(
                    SemanticTokensServerCapabilities::SemanticTokensOptions(
                        SemanticTokensOptions {
                            work_done_progress_options: Default::default(),
                            legend: legend(),
                            range: Some(false),
                            full: Some(SemanticTokensFullOptions::Bool(true)),
                        },
                    ),
                ),
                workspace: Some(WorkspaceServerCapabilities {
                    workspace_folders: Some(WorkspaceFoldersServerCapabilities {
                        supported: Some(true),
                        change_notifications: Some(OneOf::Left(true)),
                    }),
                    file_operations: None,
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "pory-lsp".to_string(),
                version: Some(crate::VERSION.to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        info!("Poryscript Language Server initialized");
        self.register_notifications().await;

        let workspace = Arc::clone(&self.workspace);
        let cache = Arc::clone(&self.cache);
        tokio::spawn(async move {
            prewarm_symbols(&workspace, &cache).await;
        });
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Poryscript Language Server shutting down");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let document = params.text_document;
        info!(
            "Document opened: {} ({} bytes, {} lines)",
            document.uri,
            document.text.len(),
            document.text.lines().count()
        );
        self.update_document(&document.uri, &document.text, document.version)
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = &params.text_document.uri;
        match params.content_changes.into_iter().last() {
            Some(change) => {
                debug!("Document changed: {} ({} bytes)", uri, change.text.len());
                self.update_document(uri, &change.text, params.text_document.version)
                    .await;
            }
            None => warn!("Document change event for {} had no content changes", uri),
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let resource = resource_id(&params.text_document.uri);
        debug!("Document closed: {}", resource);
        self.documents.remove(&resource);
        self.refresh_resource(&resource).await;
    }

    async fn did_change_configuration(&self, _params: DidChangeConfigurationParams) {
        info!("Configuration changed");
        self.settings.clear();
        self.cache.invalidate_auxiliary_caches().await;
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        debug!("{} watched files changed", params.changes.len());
        self.cache.invalidate_auxiliary_caches().await;
        for change in &params.changes {
            let resource = resource_id(&change.uri);
            if change.typ == FileChangeType::DELETED {
                self.cache.invalidate(&resource).await;
            } else {
                self.refresh_resource(&resource).await;
            }
        }
    }

    async fn did_change_workspace_folders(&self, params: DidChangeWorkspaceFoldersParams) {
        let removed: Vec<_> = params
            .event
            .removed
            .iter()
            .filter_map(|folder| folder.uri.to_file_path().ok())
            .collect();
        let mut roots = self.workspace.roots();
        roots.retain(|root| !removed.contains(root));
        roots.extend(
            params
                .event
                .added
                .iter()
                .filter_map(|folder| folder.uri.to_file_path().ok()),
        );
        info!("Workspace folders changed: {} roots", roots.len());
        self.workspace.set_roots(roots);
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let (resource, position) = text_position(&params.text_document_position);
        debug!(
            "Completion request for {} at {}:{}",
            resource, position.line, position.character
        );
        let facts = self.cache.document_facts(&resource).await?;
        let items = get_completions(&facts);
        debug!("Providing {} completion items for {}", items.len(), resource);
        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let (resource, position) = text_position(&params.text_document_position_params);
        debug!(
            "Definition request for {} at {}:{}",
            resource, position.line, position.character
        );
        let facts = self.cache.document_facts(&resource).await?;
        Ok(get_definition(&facts, position).map(GotoDefinitionResponse::Scalar))
    }

    async fn signature_help(&self, params: SignatureHelpParams) -> Result<Option<SignatureHelp>> {
        let (resource, position) = text_position(&params.text_document_position_params);
        debug!(
            "Signature help request for {} at {}:{}",
            resource, position.line, position.character
        );
        let facts = self.cache.document_facts(&resource).await?;
        Ok(get_signature_help(&facts, position))
    }

    async fn semantic_tokens_full(
        &self,
        params: SemanticTokensParams,
    ) -> Result<Option<SemanticTokensResult>> {
        let resource = resource_id(&params.text_document.uri);
        debug!("Semantic tokens request for {}", resource);
        let facts = self.cache.document_facts(&resource).await?;
        let tokens = get_semantic_tokens(&facts);
        debug!("Providing {} semantic tokens for {}", tokens.data.len(), resource);
        Ok(Some(SemanticTokensResult::Tokens(tokens)))
    }
}
