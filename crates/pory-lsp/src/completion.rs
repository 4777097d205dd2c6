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

//! Completion.
//!
//! Completion is not context-sensitive: every command, constant, symbol and
//! misc token known for the document is offered, and the editor filters by
//! the typed prefix.

use crate::cache::DocumentFacts;
use crate::convert::{
    command_completion, constant_completion, misc_token_completion, symbol_completion,
};
use tower_lsp::lsp_types::CompletionItem;

/// All completion items for a document, grouped as commands, constants,
/// symbols, then misc tokens.
pub fn get_completions(facts: &DocumentFacts) -> Vec<CompletionItem> {
    let mut items = Vec::with_capacity(
        facts.commands.len()
            + facts.constants.len()
            + facts.symbols.len()
            + facts.misc_tokens.len(),
    );
    items.extend(facts.commands.values().map(command_completion));
    items.extend(facts.constants.values().map(constant_completion));
    items.extend(facts.symbols.values().map(symbol_completion));
    items.extend(facts.misc_tokens.values().map(misc_token_completion));
    items
}
