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

//! Go to definition.

use crate::cache::DocumentFacts;
use crate::convert::{constant_location, misc_token_location, symbol_location};
use crate::utils::cursor_column;
use pory_facts::token_at;
use tower_lsp::lsp_types::{Location, Position};
use tracing::debug;

/// Resolve the identifier under the cursor.
///
/// Constants of the document are searched first, then workspace symbols,
/// then misc tokens. The first hit wins.
pub fn get_definition(facts: &DocumentFacts, position: Position) -> Option<Location> {
    let column = cursor_column(&facts.content, position);
    let token = token_at(&facts.content, position.line as usize, column);
    if token.is_empty() {
        return None;
    }
    debug!("Resolving definition of {:?}", token);

    if let Some(constant) = facts.constants.get(token) {
        return constant_location(constant);
    }
    if let Some(symbol) = facts.symbols.get(token) {
        return symbol_location(symbol);
    }
    facts.misc_tokens.get(token).and_then(misc_token_location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{facts, RESOURCE};
    use pory_facts::{MiscToken, MiscTokenType, SourcePosition};

    const CONTENT: &str = "const FLAG_DONE = FLAG_TEMP_1
script Route101_Main {
    if (!flag(FLAG_DONE)) {
        call(Route101_Helper)
        special(HealPlayerParty)
    }
}
script Route101_Helper {
    end
}
";

    fn healer() -> MiscToken {
        MiscToken {
            name: "HealPlayerParty".to_string(),
            position: SourcePosition::new(2, 12),
            token_type: MiscTokenType::Special,
            resource: "file:///decomp/data/specials.inc".to_string(),
            value: None,
        }
    }

    #[test]
    fn test_constant_definition() {
        let facts = facts(CONTENT, "", vec![healer()]);
        let location = get_definition(&facts, Position::new(2, 15)).unwrap();
        assert_eq!(location.uri.as_str(), RESOURCE);
        assert_eq!(location.range.start, Position::new(0, 6));
        assert_eq!(location.range.end, Position::new(0, 15));
    }

    #[test]
    fn test_symbol_definition() {
        let facts = facts(CONTENT, "", vec![healer()]);
        let location = get_definition(&facts, Position::new(3, 20)).unwrap();
        assert_eq!(location.range.start, Position::new(7, 7));
    }

    #[test]
    fn test_misc_token_definition() {
        let facts = facts(CONTENT, "", vec![healer()]);
        let location = get_definition(&facts, Position::new(4, 16)).unwrap();
        assert_eq!(location.uri.as_str(), "file:///decomp/data/specials.inc");
        assert_eq!(location.range.start, Position::new(2, 12));
        assert_eq!(location.range.end, Position::new(2, 27));
    }

    #[test]
    fn test_cursor_right_after_token() {
        let facts = facts(CONTENT, "", Vec::new());
        // Column 15 is the space after `FLAG_DONE` on the declaration line.
        let location = get_definition(&facts, Position::new(0, 15)).unwrap();
        assert_eq!(location.range.start, Position::new(0, 6));
    }

    #[test]
    fn test_unknown_or_empty_token() {
        let facts = facts(CONTENT, "", Vec::new());
        assert!(get_definition(&facts, Position::new(2, 8)).is_none());
        assert!(get_definition(&facts, Position::new(0, 18)).is_none());
        assert!(get_definition(&facts, Position::new(40, 0)).is_none());
    }
}
