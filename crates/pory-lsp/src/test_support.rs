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

//! Helpers shared by the handler unit tests.

use crate::cache::{DocumentFacts, FactMap};
use pory_facts::{
    keyword_commands, parse_commands, parse_constants, parse_symbols, MiscToken,
};

pub const RESOURCE: &str = "file:///data/maps/Route101/scripts.pory";

/// Facts for `content` as the cache would assemble them, with commands taken
/// from `command_source` followed by the keyword table.
pub fn facts(content: &str, command_source: &str, misc_tokens: Vec<MiscToken>) -> DocumentFacts {
    let mut commands = FactMap::new();
    for command in parse_commands(command_source)
        .into_iter()
        .chain(keyword_commands().iter().cloned())
    {
        commands.insert(command.name.clone(), command);
    }
    DocumentFacts {
        content: content.into(),
        commands,
        constants: parse_constants(content, RESOURCE)
            .into_iter()
            .map(|c| (c.name.clone(), c))
            .collect(),
        symbols: parse_symbols(content, RESOURCE)
            .into_iter()
            .map(|s| (s.name.clone(), s))
            .collect(),
        misc_tokens: misc_tokens
            .into_iter()
            .map(|t| (t.name.clone(), t))
            .collect(),
    }
}
