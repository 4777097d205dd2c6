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

//! Per-resource fact cache.
//!
//! [`FactCache`] memoizes extractor output for five categories: document
//! content, commands, constants, symbols and misc tokens. Each category has
//! its own map behind its own `tokio::sync::Mutex`.
//!
//! # Locking
//!
//! A category's lock is held for the whole lookup-or-populate sequence,
//! including the round-trip to the content provider. Concurrent requests for
//! the same missing key therefore serialize, and the second caller finds the
//! first caller's result instead of fetching again.
//!
//! No method holds two category locks at once. Every populate reads through
//! the content provider directly rather than through another category, so no
//! lock order exists to get wrong.
//!
//! [`FactCache::invalidate`] takes each category lock in turn. Once it
//! returns, no later read of that resource can observe facts extracted from
//! the content that was current before the call.
//!
//! # Aggregation
//!
//! Commands and misc tokens come from the include files named by the
//! resource's settings. Files are merged in settings order into a name-keyed
//! map; a name declared in several files takes the value from the last one.
//! The keyword table is merged after every file. A file that cannot be read
//! is logged and skipped.

use crate::error::FactResult;
use crate::provider::{ContentProvider, SettingsProvider};
use crate::settings::CompiledSymbolInclude;
use crate::uri::normalize_resource;
use pory_facts::{
    keyword_commands, parse_commands, parse_constants, parse_misc_tokens, parse_symbols, Command,
    ConstantSymbol, MiscToken, Symbol,
};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Facts keyed by name. Iteration is in name order.
pub type FactMap<T> = BTreeMap<String, T>;

/// Key of a misc-token entry: include file and expression.
type MiscKey = (String, String);

type Category<K, V> = Mutex<HashMap<K, Arc<V>>>;

/// Build a name map where later facts replace earlier ones.
fn by_name<T>(facts: impl IntoIterator<Item = T>, name: impl Fn(&T) -> &str) -> FactMap<T> {
    let mut map = FactMap::new();
    for fact in facts {
        map.insert(name(&fact).to_string(), fact);
    }
    map
}

/// Entry counts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStatistics {
    pub documents: usize,
    pub commands: usize,
    pub constants: usize,
    pub symbols: usize,
    pub misc_tokens: usize,
}

/// Everything a request handler needs to know about one document.
#[derive(Debug, Clone)]
pub struct DocumentFacts {
    pub content: Arc<str>,
    /// Aggregated commands, keywords included.
    pub commands: FactMap<Command>,
    /// Constants declared in the document itself.
    pub constants: FactMap<ConstantSymbol>,
    /// Symbols of every cached resource.
    pub symbols: FactMap<Symbol>,
    pub misc_tokens: FactMap<MiscToken>,
}

/// The fact cache service.
pub struct FactCache {
    content_provider: Arc<dyn ContentProvider>,
    settings_provider: Arc<dyn SettingsProvider>,
    documents: Mutex<HashMap<String, Arc<str>>>,
    commands: Category<String, FactMap<Command>>,
    constants: Category<String, FactMap<ConstantSymbol>>,
    symbols: Category<String, FactMap<Symbol>>,
    misc_tokens: Category<MiscKey, FactMap<MiscToken>>,
}

impl FactCache {
    pub fn new(
        content_provider: Arc<dyn ContentProvider>,
        settings_provider: Arc<dyn SettingsProvider>,
    ) -> Self {
        Self {
            content_provider,
            settings_provider,
            documents: Mutex::new(HashMap::new()),
            commands: Mutex::new(HashMap::new()),
            constants: Mutex::new(HashMap::new()),
            symbols: Mutex::new(HashMap::new()),
            misc_tokens: Mutex::new(HashMap::new()),
        }
    }

    // ========================================================================
    // Per-resource categories
    // ========================================================================

    /// Current content of a resource.
    pub async fn get_content(&self, resource: &str) -> FactResult<Arc<str>> {
        let resource = normalize_resource(resource);
        let mut documents = self.documents.lock().await;
        if let Some(content) = documents.get(&resource) {
            return Ok(Arc::clone(content));
        }
        debug!("Content cache miss for {}", resource);
        let content: Arc<str> = self.content_provider.read_content(&resource).await?.into();
        documents.insert(resource, Arc::clone(&content));
        Ok(content)
    }

    /// Commands declared in one include file, keywords excluded.
    pub async fn get_commands_in_file(&self, file: &str) -> FactResult<Arc<FactMap<Command>>> {
        let file = normalize_resource(file);
        let mut commands = self.commands.lock().await;
        if let Some(cached) = commands.get(&file) {
            return Ok(Arc::clone(cached));
        }
        debug!("Command cache miss for {}", file);
        let content = self.content_provider.read_content(&file).await?;
        let parsed = Arc::new(by_name(parse_commands(&content), |c| c.name.as_str()));
        debug!("Extracted {} commands from {}", parsed.len(), file);
        commands.insert(file, Arc::clone(&parsed));
        Ok(parsed)
    }

    /// Constants declared in a resource.
    pub async fn get_constants(&self, resource: &str) -> FactResult<Arc<FactMap<ConstantSymbol>>> {
        let resource = normalize_resource(resource);
        let mut constants = self.constants.lock().await;
        if let Some(cached) = constants.get(&resource) {
            return Ok(Arc::clone(cached));
        }
        debug!("Constant cache miss for {}", resource);
        let content = self.content_provider.read_content(&resource).await?;
        let parsed = Arc::new(by_name(parse_constants(&content, &resource), |c| {
            c.name.as_str()
        }));
        constants.insert(resource, Arc::clone(&parsed));
        Ok(parsed)
    }

    /// Symbols declared in a resource.
    pub async fn get_symbols(&self, resource: &str) -> FactResult<Arc<FactMap<Symbol>>> {
        let resource = normalize_resource(resource);
        let mut symbols = self.symbols.lock().await;
        if let Some(cached) = symbols.get(&resource) {
            return Ok(Arc::clone(cached));
        }
        debug!("Symbol cache miss for {}", resource);
        let content = self.content_provider.read_content(&resource).await?;
        let parsed = Arc::new(by_name(parse_symbols(&content, &resource), |s| s.name.as_str()));
        symbols.insert(resource, Arc::clone(&parsed));
        Ok(parsed)
    }

    /// Misc tokens matched by one symbol include.
    ///
    /// A disabled include (invalid expression) yields no tokens and reads
    /// nothing.
    pub async fn get_misc_tokens_in_file(
        &self,
        include: &CompiledSymbolInclude,
    ) -> FactResult<Arc<FactMap<MiscToken>>> {
        let Some(regex) = include.regex.as_ref() else {
            return Ok(Arc::new(FactMap::new()));
        };
        let key = (normalize_resource(&include.file), include.expression.clone());
        let mut misc_tokens = self.misc_tokens.lock().await;
        if let Some(cached) = misc_tokens.get(&key) {
            return Ok(Arc::clone(cached));
        }
        debug!("Misc token cache miss for {} ({})", key.0, key.1);
        let content = self.content_provider.read_content(&key.0).await?;
        let owner = self.content_provider.resolve_uri(&key.0).await;
        let tokens = if content.is_empty() {
            Vec::new()
        } else {
            parse_misc_tokens(&content, regex, &include.token_type, &owner)
        };
        let parsed = Arc::new(by_name(tokens, |t| t.name.as_str()));
        misc_tokens.insert(key, Arc::clone(&parsed));
        Ok(parsed)
    }

    // ========================================================================
    // Aggregation
    // ========================================================================

    /// Commands available to a resource: every configured include file, in
    /// order, then the keyword table.
    ///
    /// Fails only if the resource's settings cannot be obtained.
    pub async fn get_commands(&self, resource: &str) -> FactResult<FactMap<Command>> {
        let resource = normalize_resource(resource);
        let settings = self.settings_provider.settings(&resource).await?;
        let mut merged = FactMap::new();
        for include in &settings.command_includes {
            match self.get_commands_in_file(include).await {
                Ok(commands) => merge_into(&mut merged, &commands),
                Err(e) => warn!("Skipping command include {} for {}: {}", include, resource, e),
            }
        }
        for keyword in keyword_commands() {
            merged.insert(keyword.name.clone(), keyword.clone());
        }
        Ok(merged)
    }

    /// Misc tokens available to a resource, from every configured symbol
    /// include, in order.
    pub async fn get_misc_tokens(&self, resource: &str) -> FactResult<FactMap<MiscToken>> {
        let resource = normalize_resource(resource);
        let settings = self.settings_provider.settings(&resource).await?;
        let mut merged = FactMap::new();
        for include in &settings.symbol_includes {
            match self.get_misc_tokens_in_file(include).await {
                Ok(tokens) => merge_into(&mut merged, &tokens),
                Err(e) => warn!(
                    "Skipping symbol include {} for {}: {}",
                    include.file, resource, e
                ),
            }
        }
        Ok(merged)
    }

    /// Symbols of every cached resource, after making sure `resource` itself
    /// is cached.
    ///
    /// Resources merge in id order, so the result does not depend on the
    /// order files were opened.
    pub async fn get_workspace_symbols(&self, resource: &str) -> FactMap<Symbol> {
        if let Err(e) = self.get_symbols(resource).await {
            warn!("Could not extract symbols from {}: {}", resource, e);
        }
        let symbols = self.symbols.lock().await;
        let mut resources: Vec<&String> = symbols.keys().collect();
        resources.sort();
        let mut merged = FactMap::new();
        for key in resources {
            merge_into(&mut merged, &symbols[key]);
        }
        merged
    }

    /// Gather the facts for one document.
    ///
    /// Only a failure to read the document itself is an error; every other
    /// category falls back to empty.
    pub async fn document_facts(&self, resource: &str) -> FactResult<DocumentFacts> {
        let resource = normalize_resource(resource);
        let content = self.get_content(&resource).await?;
        let commands = self.get_commands(&resource).await.unwrap_or_else(|e| {
            warn!("No commands for {}: {}", resource, e);
            FactMap::new()
        });
        let constants = match self.get_constants(&resource).await {
            Ok(constants) => constants.as_ref().clone(),
            Err(e) => {
                warn!("No constants for {}: {}", resource, e);
                FactMap::new()
            }
        };
        let symbols = self.get_workspace_symbols(&resource).await;
        let misc_tokens = self.get_misc_tokens(&resource).await.unwrap_or_else(|e| {
            warn!("No misc tokens for {}: {}", resource, e);
            FactMap::new()
        });
        Ok(DocumentFacts {
            content,
            commands,
            constants,
            symbols,
            misc_tokens,
        })
    }

    // ========================================================================
    // Invalidation
    // ========================================================================

    /// Remove every entry for a resource, in all five categories.
    pub async fn invalidate(&self, resource: &str) {
        let resource = normalize_resource(resource);
        let mut removed = 0;
        removed += remove_entry(&self.documents, &resource).await;
        removed += remove_entry(&self.commands, &resource).await;
        removed += remove_entry(&self.constants, &resource).await;
        removed += remove_entry(&self.symbols, &resource).await;
        {
            let mut misc_tokens = self.misc_tokens.lock().await;
            let before = misc_tokens.len();
            misc_tokens.retain(|(file, _), _| file != &resource);
            removed += before - misc_tokens.len();
        }
        debug!("Invalidated {} cache entries for {}", removed, resource);
    }

    /// Clear the commands and misc-token categories for every resource.
    ///
    /// Content, constants and symbols are left alone.
    pub async fn invalidate_auxiliary_caches(&self) {
        let commands = {
            let mut commands = self.commands.lock().await;
            let count = commands.len();
            commands.clear();
            count
        };
        let misc_tokens = {
            let mut misc_tokens = self.misc_tokens.lock().await;
            let count = misc_tokens.len();
            misc_tokens.clear();
            count
        };
        info!(
            "Cleared auxiliary caches ({} command files, {} misc token entries)",
            commands, misc_tokens
        );
    }

    pub async fn statistics(&self) -> CacheStatistics {
        CacheStatistics {
            documents: self.documents.lock().await.len(),
            commands: self.commands.lock().await.len(),
            constants: self.constants.lock().await.len(),
            symbols: self.symbols.lock().await.len(),
            misc_tokens: self.misc_tokens.lock().await.len(),
        }
    }
}

fn merge_into<T: Clone>(merged: &mut FactMap<T>, facts: &FactMap<T>) {
    for (name, fact) in facts {
        merged.insert(name.clone(), fact.clone());
    }
}

async fn remove_entry<K, V: ?Sized>(category: &Mutex<HashMap<K, Arc<V>>>, key: &str) -> usize
where
    K: Eq + Hash + std::borrow::Borrow<str>,
{
    usize::from(category.lock().await.remove(key).is_some())
}
