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

//! Poryscript Language Server Protocol (LSP) Implementation
//!
//! This crate provides IDE integration for Poryscript, the scripting language
//! of the Pokémon decompilation projects, through the Language Server
//! Protocol.
//!
//! # Features
//!
//! - **Autocomplete**: Scripting commands (with snippets for keywords),
//!   constants, workspace symbols and project-defined tokens
//! - **Go to Definition**: Constants, scripts, texts, movements and misc
//!   tokens such as specials and `#define`s
//! - **Signature Help**: Parameter hints for macro commands
//! - **Semantic Highlighting**: Commands, constants and symbols coloured by
//!   what they are, not by how they look
//!
//! Facts come from the [`pory_facts`] extractors and are memoized per
//! resource by the [`cache::FactCache`].
//!
//! # Usage
//!
//! ## Running the Server
//!
//! ```bash
//! # Run the language server (stdio transport)
//! pory-lsp
//!
//! # With debug logging
//! RUST_LOG=debug pory-lsp
//! ```
//!
//! ## Programmatic Usage
//!
//! ```no_run
//! use pory_lsp::PoryLanguageServer;
//! use tower_lsp::{LspService, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let stdin = tokio::io::stdin();
//!     let stdout = tokio::io::stdout();
//!
//!     let (service, socket) = LspService::new(PoryLanguageServer::new);
//!
//!     Server::new(stdin, stdout, socket).serve(service).await;
//! }
//! ```
//!
//! # Configuration
//!
//! Settings are requested from the client under the
//! `languageServerPoryscript` section:
//!
//! ```json
//! {
//!   "languageServerPoryscript": {
//!     "commandIncludes": ["asm/macros/event.inc", "asm/macros/movement.inc"],
//!     "symbolIncludes": [
//!       {
//!         "expression": "^\\s*def_special\\s+(\\w+)",
//!         "type": "special",
//!         "file": "data/specials.inc"
//!       }
//!     ]
//!   }
//! }
//! ```
//!
//! # Architecture
//!
//! - `backend`: LSP server implementation and protocol wiring
//! - [`cache`]: Per-resource fact cache with targeted invalidation
//! - [`provider`]: Content, settings and source enumeration contracts
//! - [`workspace`]: Disk and client backed content provider
//! - [`document_store`]: Open buffers
//! - [`settings`]: Client settings model and providers
//! - [`completion`], [`definition`], [`signature_help`], [`semantic_tokens`]:
//!   Request handlers
//! - [`convert`]: Facts to LSP types
//! - [`utils`]: UTF-16 column handling

mod backend;
pub mod cache;
pub mod completion;
pub mod constants;
pub mod convert;
pub mod definition;
pub mod document_store;
pub mod error;
pub mod provider;
pub mod requests;
pub mod semantic_tokens;
pub mod settings;
pub mod signature_help;
pub mod uri;
pub mod utils;
pub mod workspace;

#[cfg(test)]
mod test_support;

pub use backend::{PoryLanguageServer, SessionCapabilities};
pub use cache::{CacheStatistics, DocumentFacts, FactCache, FactMap};
pub use document_store::{DocumentStore, UpdateOutcome};
pub use error::{FactError, FactResult};
pub use provider::{ContentProvider, SettingsProvider, SourceEnumerator};
pub use settings::{
    ClientSettingsProvider, FixedSettingsProvider, PorySettings, ResolvedSettings, SymbolInclude,
};
pub use workspace::WorkspaceProvider;

/// LSP server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
