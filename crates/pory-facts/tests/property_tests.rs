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

//! Property-based tests for the extractors and cursor utilities.
//!
//! # Property Categories
//!
//! 1. **Word Boundaries**: `token_at` only ever returns maximal word runs
//! 2. **Crash Resistance**: No panics on arbitrary text and positions
//! 3. **Comment Stripping**: Stripped lines are prefixes and never contain a live marker
//! 4. **Extractor Invariants**: Positions point at the extracted names

use pory_facts::{
    command_call_parts_at, parse_constants, parse_macro_commands, parse_symbols, strip_comment,
    token_at, CommandParamKind,
};
use proptest::prelude::*;

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Check that `token` is the maximal word run of `line` that covers `column`
/// or the character just before it.
fn is_maximal_run_at(line: &str, column: usize, token: &str) -> bool {
    let bytes = line.as_bytes();
    for anchor in [Some(column), column.checked_sub(1)].into_iter().flatten() {
        if anchor >= bytes.len() || !is_word_char(bytes[anchor] as char) {
            continue;
        }
        let mut start = anchor;
        while start > 0 && is_word_char(bytes[start - 1] as char) {
            start -= 1;
        }
        let mut end = anchor;
        while end < bytes.len() && is_word_char(bytes[end] as char) {
            end += 1;
        }
        if &line[start..end] == token {
            return true;
        }
    }
    false
}

#[test]
fn token_at_boundary_law_on_reference_line() {
    let line = "FOO thing(BLAH) BAZ";
    for column in 0..=line.len() {
        let token = token_at(line, 0, column);
        assert!(
            token.is_empty() || is_maximal_run_at(line, column, token),
            "column {} returned {:?}",
            column,
            token
        );
    }
}

proptest! {
    #[test]
    fn prop_token_at_returns_maximal_word_run(
        line in "[A-Za-z0-9_ (),.=\t]{0,40}",
        column in 0usize..45,
    ) {
        let token = token_at(&line, 0, column);
        prop_assert!(token.is_empty() || is_maximal_run_at(&line, column, token));
    }

    #[test]
    fn prop_cursor_queries_never_panic(
        content in "\\PC{0,80}(\n\\PC{0,80}){0,4}",
        line in 0usize..8,
        column in 0usize..100,
    ) {
        let _ = token_at(&content, line, column);
        let _ = command_call_parts_at(&content, line, column);
    }

    #[test]
    fn prop_strip_comment_is_prefix(line in "\\PC{0,60}") {
        let stripped = strip_comment(&line);
        prop_assert!(line.starts_with(stripped));
        prop_assert!(strip_comment(stripped) == stripped);
    }

    #[test]
    fn prop_constant_positions_point_at_names(
        names in prop::collection::vec("[A-Z][A-Z0-9_]{0,10}", 1..5),
        indent in "[ \t]{0,4}",
    ) {
        let content: String = names
            .iter()
            .map(|name| format!("{}const {} = 1\n", indent, name))
            .collect();
        let constants = parse_constants(&content, "file:///p.pory");
        prop_assert_eq!(constants.len(), names.len());
        for (constant, line) in constants.iter().zip(content.lines()) {
            let start = constant.position.character as usize;
            prop_assert_eq!(&line[start..start + constant.name.len()], constant.name.as_str());
        }
    }

    #[test]
    fn prop_symbol_positions_point_at_names(name in "[A-Za-z_][A-Za-z0-9_]{0,12}") {
        let content = format!("script {} {{\n}}\n{}:\n", name, name);
        let symbols = parse_symbols(&content, "file:///p.pory");
        for symbol in &symbols {
            let line = content.lines().nth(symbol.position.line as usize).unwrap();
            let start = symbol.position.character as usize;
            prop_assert_eq!(&line[start..start + symbol.name.len()], symbol.name.as_str());
        }
    }

    #[test]
    fn prop_macro_param_kinds_ignore_whitespace(
        sep in "[ \t]*,[ \t]*|[ \t]+",
        lead in "[ \t]{0,3}",
    ) {
        let content = format!(
            "{}.macro  cmd{}a:req{}b=VALUE{}c{}d:vararg\n",
            lead, " ", sep, sep, sep
        );
        let commands = parse_macro_commands(&content);
        prop_assert_eq!(commands.len(), 1);
        let kinds: Vec<CommandParamKind> =
            commands[0].parameters.iter().map(|p| p.kind.clone()).collect();
        let expected = vec![
            CommandParamKind::Required,
            CommandParamKind::Default { value: "VALUE".to_string() },
            CommandParamKind::Optional,
            CommandParamKind::Vararg,
        ];
        prop_assert_eq!(kinds, expected);
    }
}
