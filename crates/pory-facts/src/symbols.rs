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

//! Poryscript structural symbols: top-level blocks and labels.

use crate::comment::strip_comment;
use crate::position::SourcePosition;
use once_cell::sync::Lazy;
use regex::Regex;

/// The kind of block or label a symbol names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Script,
    MovementScript,
    Mart,
    Text,
    MapScripts,
    Label,
}

impl SymbolKind {
    /// Human-readable description shown next to the symbol.
    pub fn detail(self) -> &'static str {
        match self {
            SymbolKind::Script => "Script",
            SymbolKind::MovementScript => "Movement Script",
            SymbolKind::Mart => "Mart Items",
            SymbolKind::Text => "Text",
            SymbolKind::MapScripts => "Map Scripts",
            SymbolKind::Label => "Label",
        }
    }
}

/// A named Poryscript block or label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub name: String,
    /// Position of the first character of the name.
    pub position: SourcePosition,
    /// Resource the symbol was declared in.
    pub resource: String,
    pub kind: SymbolKind,
}

/// Extraction rules, applied in this order to every line.
static SYMBOL_RULES: Lazy<Vec<(Regex, SymbolKind)>> = Lazy::new(|| {
    [
        (r"\bscript\s+(\w+)\s*\{", SymbolKind::Script),
        (r"\bmovement\s+(\w+)\s*\{", SymbolKind::MovementScript),
        (r"\bmart\s+(\w+)\s*\{", SymbolKind::Mart),
        (r"\bmapscripts\s+(\w+)\s*\{", SymbolKind::MapScripts),
        (r"\btext\s+(\w+)\s*\{", SymbolKind::Text),
        (r"^\s*(\w+)\s*(\(\s*(local|global)\s*\))?\s*:", SymbolKind::Label),
    ]
    .into_iter()
    .map(|(pattern, kind)| (Regex::new(pattern).expect("valid symbol regex"), kind))
    .collect()
});

/// Parse the Poryscript symbols from the given file content.
///
/// All matches of all rules are reported. Within a line, symbols are grouped
/// by rule (scripts first, labels last) and then ordered by position.
pub fn parse_symbols(content: &str, resource: &str) -> Vec<Symbol> {
    let mut symbols = Vec::new();
    for (line_number, raw_line) in content.lines().enumerate() {
        let line = strip_comment(raw_line);
        for (re, kind) in SYMBOL_RULES.iter() {
            for caps in re.captures_iter(line) {
                let Some(name) = caps.get(1) else {
                    continue;
                };
                symbols.push(Symbol {
                    name: name.as_str().to_string(),
                    position: SourcePosition::from_indices(line_number, name.start()),
                    resource: resource.to_string(),
                    kind: *kind,
                });
            }
        }
    }
    symbols
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(name: &str, line: u32, character: u32, kind: SymbolKind) -> Symbol {
        Symbol {
            name: name.to_string(),
            position: SourcePosition::new(line, character),
            resource: "test.pory".to_string(),
            kind,
        }
    }

    #[test]
    fn test_parse_symbols() {
        let input = "
\tscript MyScript { // script nope {
\t\tlockall
\t}
text MyText { \"foo\" } text MyText2 {\"bar\"}
  \tmapscripts MyMapScripts {} movement MyMovement {}
\tmart MyMart {}
script MyScript2 {
\tswitch (var(VAR_1)) { case 1: }
MyLabel:
\tMyOtherLabel ( local ) :
\trelease
}";
        let results = parse_symbols(input, "test.pory");
        assert_eq!(
            results,
            vec![
                symbol("MyScript", 1, 8, SymbolKind::Script),
                symbol("MyText", 4, 5, SymbolKind::Text),
                symbol("MyText2", 4, 27, SymbolKind::Text),
                symbol("MyMovement", 5, 39, SymbolKind::MovementScript),
                symbol("MyMapScripts", 5, 14, SymbolKind::MapScripts),
                symbol("MyMart", 6, 6, SymbolKind::Mart),
                symbol("MyScript2", 7, 7, SymbolKind::Script),
                symbol("MyLabel", 9, 0, SymbolKind::Label),
                symbol("MyOtherLabel", 10, 1, SymbolKind::Label),
            ]
        );
    }

    #[test]
    fn test_parse_symbols_empty() {
        assert!(parse_symbols("", "test.pory").is_empty());
    }

    #[test]
    fn test_global_label() {
        let results = parse_symbols("Common_EventScript(global):\n", "test.pory");
        assert_eq!(results, vec![symbol("Common_EventScript", 0, 0, SymbolKind::Label)]);
    }

    #[test]
    fn test_symbol_details() {
        assert_eq!(SymbolKind::Script.detail(), "Script");
        assert_eq!(SymbolKind::MovementScript.detail(), "Movement Script");
        assert_eq!(SymbolKind::Mart.detail(), "Mart Items");
        assert_eq!(SymbolKind::Text.detail(), "Text");
        assert_eq!(SymbolKind::MapScripts.detail(), "Map Scripts");
        assert_eq!(SymbolKind::Label.detail(), "Label");
    }
}
