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

//! Fact cache behaviour against call-counting providers.
//!
//! Every test builds a [`FactCache`] over an in-memory file map and checks
//! how many times each resource was actually read.

use parking_lot::Mutex;
use pory_facts::{keyword_commands, CommandKind, MiscTokenType};
use pory_lsp::settings::SymbolInclude;
use pory_lsp::{
    ContentProvider, FactCache, FactError, FactResult, FixedSettingsProvider, PorySettings,
    ResolvedSettings, SettingsProvider,
};
use std::collections::HashMap;
use std::sync::Arc;

// ============================================================================
// TEST HELPERS
// ============================================================================

const EVENT_INC: &str = "asm/macros/event.inc";
const MOVEMENT_INC: &str = "asm/macros/movement.inc";

const EVENT_MACROS: &str = "\
@ Buffers the given text and calls the relevant standard message script.
.macro msgbox text:req, type=MSGBOX_DEFAULT
.endm
.macro lock
.endm
.macro setflag flag:req
.endm
";

const MOVEMENT_MACROS: &str = "\
create_movement_action walk_up, MOVEMENT_ACTION_WALK_NORMAL_UP
create_movement_action walk_down, MOVEMENT_ACTION_WALK_NORMAL_DOWN
";

#[derive(Default)]
struct CountingProvider {
    files: Mutex<HashMap<String, String>>,
    reads: Mutex<HashMap<String, usize>>,
}

impl CountingProvider {
    fn with_files(files: &[(&str, &str)]) -> Arc<Self> {
        let provider = Self::default();
        for (resource, content) in files {
            provider.set(resource, content);
        }
        Arc::new(provider)
    }

    fn set(&self, resource: &str, content: &str) {
        self.files
            .lock()
            .insert(resource.to_string(), content.to_string());
    }

    fn reads(&self, resource: &str) -> usize {
        self.reads.lock().get(resource).copied().unwrap_or(0)
    }
}

#[tower_lsp::async_trait]
impl ContentProvider for CountingProvider {
    async fn read_content(&self, resource: &str) -> FactResult<String> {
        *self.reads.lock().entry(resource.to_string()).or_default() += 1;
        self.files
            .lock()
            .get(resource)
            .cloned()
            .ok_or_else(|| FactError::content_unavailable(resource, "no such file"))
    }

    async fn resolve_uri(&self, resource: &str) -> String {
        if resource.starts_with("file://") {
            resource.to_string()
        } else {
            format!("file:///project/{}", resource)
        }
    }
}

struct UnavailableSettings;

#[tower_lsp::async_trait]
impl SettingsProvider for UnavailableSettings {
    async fn settings(&self, resource: &str) -> FactResult<Arc<ResolvedSettings>> {
        Err(FactError::SettingsUnavailable {
            resource: resource.to_string(),
            reason: "client went away".to_string(),
        })
    }
}

fn settings(
    command_includes: &[&str],
    symbol_includes: Vec<SymbolInclude>,
) -> Arc<FixedSettingsProvider> {
    let settings = PorySettings {
        command_includes: command_includes.iter().map(|s| s.to_string()).collect(),
        symbol_includes,
        ..PorySettings::default()
    };
    Arc::new(FixedSettingsProvider::new(ResolvedSettings::from(&settings)))
}

fn specials_include() -> SymbolInclude {
    SymbolInclude {
        expression: r"^\s*def_special\s+(\w+)".to_string(),
        token_type: "special".to_string(),
        file: "data/specials.inc".to_string(),
    }
}

fn project() -> Arc<CountingProvider> {
    CountingProvider::with_files(&[
        (EVENT_INC, EVENT_MACROS),
        (MOVEMENT_INC, MOVEMENT_MACROS),
        (
            "data/specials.inc",
            "\tdef_special HealPlayerParty\n\tdef_special ShowFieldMessageStringVar4\n",
        ),
        (
            "file:///project/data/maps/Route101/scripts.pory",
            "const FLAG_DONE = FLAG_TEMP_1\nscript Route101_Main {\n    lock\n}\n",
        ),
        (
            "file:///project/data/maps/Route102/scripts.pory",
            "script Route102_Main {\n    end\n}\ntext Route102_Text {\n    \"Hi\"\n}\n",
        ),
    ])
}

const ROUTE101: &str = "file:///project/data/maps/Route101/scripts.pory";
const ROUTE102: &str = "file:///project/data/maps/Route102/scripts.pory";

// ============================================================================
// MEMOIZATION AND INVALIDATION
// ============================================================================

#[tokio::test]
async fn test_repeated_reads_hit_the_cache() {
    let provider = project();
    let cache = FactCache::new(provider.clone(), settings(&[EVENT_INC], Vec::new()));

    for _ in 0..3 {
        assert!(cache.get_content(ROUTE101).await.unwrap().contains("Route101_Main"));
        assert_eq!(cache.get_constants(ROUTE101).await.unwrap().len(), 1);
        assert_eq!(cache.get_symbols(ROUTE101).await.unwrap().len(), 1);
    }
    // One read per category, none repeated.
    assert_eq!(provider.reads(ROUTE101), 3);
}

#[tokio::test]
async fn test_invalidate_refetches_only_that_resource() {
    let provider = project();
    let cache = FactCache::new(provider.clone(), settings(&[EVENT_INC], Vec::new()));

    cache.get_constants(ROUTE101).await.unwrap();
    cache.get_constants(ROUTE102).await.unwrap();

    provider.set(ROUTE101, "const FLAG_OTHER = FLAG_TEMP_2\n");
    // Still the old facts until invalidated.
    assert!(cache.get_constants(ROUTE101).await.unwrap().contains_key("FLAG_DONE"));

    cache.invalidate(ROUTE101).await;
    let constants = cache.get_constants(ROUTE101).await.unwrap();
    assert!(constants.contains_key("FLAG_OTHER"));
    assert!(!constants.contains_key("FLAG_DONE"));

    cache.get_constants(ROUTE102).await.unwrap();
    assert_eq!(provider.reads(ROUTE101), 2);
    assert_eq!(provider.reads(ROUTE102), 1);
}

#[tokio::test]
async fn test_escaped_and_plain_ids_share_entries() {
    let provider = CountingProvider::with_files(&[("file:///maps/My Map.pory", "const A = 1\n")]);
    let cache = FactCache::new(provider.clone(), settings(&[], Vec::new()));

    cache.get_content("file:///maps/My%20Map.pory").await.unwrap();
    cache.get_content("file:///maps/My Map.pory").await.unwrap();
    assert_eq!(provider.reads("file:///maps/My Map.pory"), 1);

    cache.invalidate("file:///maps/My%20Map.pory").await;
    cache.get_content("file:///maps/My Map.pory").await.unwrap();
    assert_eq!(provider.reads("file:///maps/My Map.pory"), 2);
}

#[tokio::test]
async fn test_invalidate_include_file_drops_its_misc_tokens() {
    let provider = project();
    let cache = FactCache::new(
        provider.clone(),
        settings(&[EVENT_INC], vec![specials_include()]),
    );

    assert_eq!(cache.get_misc_tokens(ROUTE101).await.unwrap().len(), 2);
    provider.set("data/specials.inc", "\tdef_special DoWeather\n");
    cache.invalidate("data/specials.inc").await;

    let tokens = cache.get_misc_tokens(ROUTE101).await.unwrap();
    assert_eq!(tokens.keys().collect::<Vec<_>>(), vec!["DoWeather"]);
    assert_eq!(provider.reads("data/specials.inc"), 2);
}

#[tokio::test]
async fn test_auxiliary_invalidation_keeps_document_categories() {
    let provider = project();
    let cache = FactCache::new(
        provider.clone(),
        settings(&[EVENT_INC, MOVEMENT_INC], vec![specials_include()]),
    );

    cache.document_facts(ROUTE101).await.unwrap();
    let before = cache.statistics().await;
    assert_eq!(before.commands, 2);
    assert_eq!(before.misc_tokens, 1);

    cache.invalidate_auxiliary_caches().await;
    let after = cache.statistics().await;
    assert_eq!(after.commands, 0);
    assert_eq!(after.misc_tokens, 0);
    assert_eq!(after.documents, before.documents);
    assert_eq!(after.constants, before.constants);
    assert_eq!(after.symbols, before.symbols);

    cache.get_commands(ROUTE101).await.unwrap();
    assert_eq!(provider.reads(EVENT_INC), 2);
    assert_eq!(provider.reads(ROUTE101), 3);
}

// ============================================================================
// AGGREGATION
// ============================================================================

#[tokio::test]
async fn test_commands_merge_includes_then_keywords() {
    let provider = project();
    let cache = FactCache::new(provider.clone(), settings(&[EVENT_INC, MOVEMENT_INC], Vec::new()));

    let commands = cache.get_commands(ROUTE101).await.unwrap();
    assert_eq!(commands.len(), 3 + 2 + keyword_commands().len());
    assert_eq!(commands["msgbox"].kind, CommandKind::Macro);
    assert_eq!(commands["walk_up"].kind, CommandKind::MovementConstant);
    assert_eq!(commands["if"].kind, CommandKind::Keyword);
}

#[tokio::test]
async fn test_unreadable_include_is_skipped() {
    let provider = project();
    let cache = FactCache::new(
        provider.clone(),
        settings(&["asm/macros/missing.inc", EVENT_INC], Vec::new()),
    );

    let commands = cache.get_commands(ROUTE101).await.unwrap();
    assert_eq!(commands.len(), 3 + keyword_commands().len());
    assert!(commands.contains_key("setflag"));
    assert_eq!(provider.reads("asm/macros/missing.inc"), 1);
}

#[tokio::test]
async fn test_later_include_wins_and_keywords_win_last() {
    let provider = project();
    provider.set(
        "asm/macros/override.inc",
        ".macro msgbox text:req\n.endm\n.macro if cond:req\n.endm\n",
    );
    let cache = FactCache::new(
        provider.clone(),
        settings(&[EVENT_INC, "asm/macros/override.inc"], Vec::new()),
    );

    let commands = cache.get_commands(ROUTE101).await.unwrap();
    assert_eq!(commands["msgbox"].parameters.len(), 1);
    assert_eq!(commands["if"].kind, CommandKind::Keyword);
}

#[tokio::test]
async fn test_settings_failure_fails_aggregation_but_not_document_facts() {
    let provider = project();
    let cache = FactCache::new(provider.clone(), Arc::new(UnavailableSettings));

    assert!(matches!(
        cache.get_commands(ROUTE101).await,
        Err(FactError::SettingsUnavailable { .. })
    ));
    assert!(cache.get_misc_tokens(ROUTE101).await.is_err());

    let facts = cache.document_facts(ROUTE101).await.unwrap();
    assert!(facts.commands.is_empty());
    assert!(facts.misc_tokens.is_empty());
    assert!(facts.constants.contains_key("FLAG_DONE"));
    assert!(facts.symbols.contains_key("Route101_Main"));
}

#[tokio::test]
async fn test_misc_tokens_report_resolved_owner() {
    let provider = project();
    let cache = FactCache::new(provider.clone(), settings(&[], vec![specials_include()]));

    let tokens = cache.get_misc_tokens(ROUTE101).await.unwrap();
    let healer = &tokens["HealPlayerParty"];
    assert_eq!(healer.token_type, MiscTokenType::Special);
    assert_eq!(healer.resource, "file:///project/data/specials.inc");
}

#[tokio::test]
async fn test_invalid_expression_reads_nothing() {
    let provider = project();
    let broken = SymbolInclude {
        expression: "def_special (".to_string(),
        ..specials_include()
    };
    let cache = FactCache::new(provider.clone(), settings(&[], vec![broken, specials_include()]));

    let tokens = cache.get_misc_tokens(ROUTE101).await.unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(provider.reads("data/specials.inc"), 1);
}

#[tokio::test]
async fn test_workspace_symbols_include_other_cached_resources() {
    let provider = project();
    let cache = FactCache::new(provider.clone(), settings(&[], Vec::new()));

    cache.get_symbols(ROUTE102).await.unwrap();
    let facts = cache.document_facts(ROUTE101).await.unwrap();
    assert!(facts.symbols.contains_key("Route101_Main"));
    assert!(facts.symbols.contains_key("Route102_Main"));
    assert!(facts.symbols.contains_key("Route102_Text"));
    // Constants stay per document.
    assert_eq!(facts.constants.len(), 1);
}

#[tokio::test]
async fn test_missing_document_is_an_error() {
    let provider = project();
    let cache = FactCache::new(provider.clone(), settings(&[EVENT_INC], Vec::new()));

    let err = cache
        .document_facts("file:///project/nowhere.pory")
        .await
        .unwrap_err();
    assert!(matches!(err, FactError::ContentUnavailable { .. }));
    assert_eq!(cache.statistics().await.documents, 0);
}
