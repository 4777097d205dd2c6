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

//! Client settings.
//!
//! Settings live under the `languageServerPoryscript` section and are
//! requested per resource, since a multi-root client may configure each
//! project differently:
//!
//! ```json
//! {
//!   "commandIncludes": ["asm/macros/event.inc", "asm/macros/movement.inc"],
//!   "symbolIncludes": [
//!     { "expression": "^\\s*def_special\\s+(\\w+)", "type": "special", "file": "data/specials.inc" }
//!   ],
//!   "commandConfigFilepath": "tools/poryscript/command_config.json"
//! }
//! ```
//!
//! Symbol-include expressions are compiled once, when the settings are
//! loaded. An expression that fails to compile stays in the list as a
//! disabled entry so the remaining entries keep working.

use crate::constants::{
    DEFAULT_COMMAND_CONFIG_FILEPATH, DEFAULT_COMMAND_INCLUDES, SETTINGS_SECTION,
};
use crate::error::{FactError, FactResult};
use crate::provider::SettingsProvider;
use crate::uri::resource_url;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use pory_facts::MiscTokenType;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower_lsp::lsp_types::ConfigurationItem;
use tower_lsp::Client;
use tracing::{debug, warn};

/// Settings as sent by the client.
///
/// Fields missing from the client's answer take their default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PorySettings {
    /// Assembly files that declare scripting commands.
    pub command_includes: Vec<String>,
    /// Files scanned for misc tokens, each with its own expression.
    pub symbol_includes: Vec<SymbolInclude>,
    /// Compiler command configuration. Carried for clients, not read here.
    pub command_config_filepath: String,
}

impl Default for PorySettings {
    fn default() -> Self {
        Self {
            command_includes: DEFAULT_COMMAND_INCLUDES
                .iter()
                .map(|path| (*path).to_string())
                .collect(),
            symbol_includes: Vec::new(),
            command_config_filepath: DEFAULT_COMMAND_CONFIG_FILEPATH.to_string(),
        }
    }
}

/// One `symbolIncludes` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolInclude {
    /// Capture group 1 is the token name, optional group 2 its value.
    pub expression: String,
    #[serde(rename = "type")]
    pub token_type: String,
    /// Include path, relative to a workspace root.
    pub file: String,
}

/// A `symbolIncludes` entry with its expression compiled.
#[derive(Debug, Clone)]
pub struct CompiledSymbolInclude {
    pub expression: String,
    pub token_type: MiscTokenType,
    pub file: String,
    /// `None` when the expression failed to compile.
    pub regex: Option<Regex>,
}

impl CompiledSymbolInclude {
    pub fn compile(include: &SymbolInclude) -> Self {
        let regex = match Regex::new(&include.expression) {
            Ok(regex) => Some(regex),
            Err(e) => {
                warn!(
                    "Disabling symbol include for {}: invalid expression {:?}: {}",
                    include.file, include.expression, e
                );
                None
            }
        };
        Self {
            expression: include.expression.clone(),
            token_type: MiscTokenType::from(include.token_type.as_str()),
            file: include.file.clone(),
            regex,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.regex.is_some()
    }
}

/// Settings ready for use by the fact cache.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub command_includes: Vec<String>,
    pub symbol_includes: Vec<CompiledSymbolInclude>,
    pub command_config_filepath: String,
}

impl From<&PorySettings> for ResolvedSettings {
    fn from(settings: &PorySettings) -> Self {
        Self {
            command_includes: settings.command_includes.clone(),
            symbol_includes: settings
                .symbol_includes
                .iter()
                .map(CompiledSymbolInclude::compile)
                .collect(),
            command_config_filepath: settings.command_config_filepath.clone(),
        }
    }
}

static DEFAULT_SETTINGS: Lazy<Arc<ResolvedSettings>> =
    Lazy::new(|| Arc::new(ResolvedSettings::from(&PorySettings::default())));

impl ResolvedSettings {
    /// The shared default settings.
    pub fn defaults() -> Arc<ResolvedSettings> {
        Arc::clone(&DEFAULT_SETTINGS)
    }

    /// Parse one `workspace/configuration` result entry.
    ///
    /// `null` means the client has nothing configured for the section.
    pub fn from_value(value: Value) -> FactResult<Self> {
        if value.is_null() {
            return Ok(ResolvedSettings::from(&PorySettings::default()));
        }
        let settings: PorySettings = serde_json::from_value(value)?;
        Ok(ResolvedSettings::from(&settings))
    }
}

/// Settings provider backed by `workspace/configuration` requests.
///
/// Answers are cached per resource until [`ClientSettingsProvider::clear`].
/// Without the client's configuration capability every resource gets the
/// defaults and the client is never asked.
pub struct ClientSettingsProvider {
    client: Client,
    has_config_capability: AtomicBool,
    cache: DashMap<String, Arc<ResolvedSettings>>,
}

impl ClientSettingsProvider {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            has_config_capability: AtomicBool::new(false),
            cache: DashMap::new(),
        }
    }

    pub fn set_config_capability(&self, supported: bool) {
        self.has_config_capability.store(supported, Ordering::Release);
    }

    pub fn has_config_capability(&self) -> bool {
        self.has_config_capability.load(Ordering::Acquire)
    }

    /// Drop every cached answer.
    pub fn clear(&self) {
        let count = self.cache.len();
        self.cache.clear();
        debug!("Cleared cached settings for {} resources", count);
    }

    async fn fetch(&self, resource: &str) -> FactResult<ResolvedSettings> {
        let item = ConfigurationItem {
            scope_uri: resource_url(resource),
            section: Some(SETTINGS_SECTION.to_string()),
        };
        let mut values = self
            .client
            .configuration(vec![item])
            .await
            .map_err(|e| FactError::SettingsUnavailable {
                resource: resource.to_string(),
                reason: e.to_string(),
            })?;
        if values.len() != 1 {
            return Err(FactError::SettingsUnavailable {
                resource: resource.to_string(),
                reason: format!("expected one configuration entry, received {}", values.len()),
            });
        }
        ResolvedSettings::from_value(values.remove(0))
    }
}

#[tower_lsp::async_trait]
impl SettingsProvider for ClientSettingsProvider {
    async fn settings(&self, resource: &str) -> FactResult<Arc<ResolvedSettings>> {
        if !self.has_config_capability() {
            return Ok(ResolvedSettings::defaults());
        }
        if let Some(settings) = self.cache.get(resource) {
            return Ok(Arc::clone(settings.value()));
        }
        debug!("Requesting settings for {}", resource);
        let settings = Arc::new(self.fetch(resource).await?);
        self.cache
            .insert(resource.to_string(), Arc::clone(&settings));
        Ok(settings)
    }
}

/// Settings provider that always answers with the same settings.
#[derive(Debug, Clone)]
pub struct FixedSettingsProvider {
    settings: Arc<ResolvedSettings>,
}

impl FixedSettingsProvider {
    pub fn new(settings: ResolvedSettings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }
}

impl Default for FixedSettingsProvider {
    fn default() -> Self {
        Self {
            settings: ResolvedSettings::defaults(),
        }
    }
}

#[tower_lsp::async_trait]
impl SettingsProvider for FixedSettingsProvider {
    async fn settings(&self, _resource: &str) -> FactResult<Arc<ResolvedSettings>> {
        Ok(Arc::clone(&self.settings))
    }
}
