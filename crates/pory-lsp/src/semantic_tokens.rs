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

//! Semantic highlighting.
//!
//! The document is scanned word by word. Comments, string literals and
//! backtick-delimited raw blocks are skipped, as are words starting with a
//! digit. Every remaining identifier is classified against the document's
//! facts:
//!
//! | Fact | Token type |
//! |------|------------|
//! | Macro command | `function` |
//! | Assembler or movement constant | `keyword` |
//! | Poryscript constant (not on its declaration line) | `enumMember` |
//! | `script` / `mapscripts` symbol | `function` |
//! | `movement` / `text` symbol | `variable` |
//! | `special` misc token | `function` |
//! | `define` misc token | `enumMember` |
//! | Other misc token | `keyword` |
//!
//! Categories are tried in the order of the table; the first that classifies
//! the identifier decides its type, so each identifier yields at most one
//! token. `switch` and `case` are language keywords that are also scripting
//! commands and are never classified as commands.

use crate::cache::DocumentFacts;
use crate::constants::{
    NO_MODIFIERS, TOKEN_TYPE_ENUM_MEMBER, TOKEN_TYPE_FUNCTION, TOKEN_TYPE_KEYWORD,
    TOKEN_TYPE_VARIABLE,
};
use crate::utils::utf16_column;
use pory_facts::{CommandKind, MiscTokenType, SemanticTokenBuilder, SymbolKind};
use tower_lsp::lsp_types::{
    SemanticToken, SemanticTokenType, SemanticTokens, SemanticTokensLegend,
};

/// The legend advertised in the server capabilities. Indices match the
/// `TOKEN_TYPE_*` constants.
pub fn legend() -> SemanticTokensLegend {
    SemanticTokensLegend {
        token_types: vec![
            SemanticTokenType::KEYWORD,
            SemanticTokenType::FUNCTION,
            SemanticTokenType::ENUM_MEMBER,
            SemanticTokenType::VARIABLE,
        ],
        token_modifiers: Vec::new(),
    }
}

/// An identifier found by [`scan_words`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a> {
    pub line: u32,
    /// Byte offset within the line.
    pub start: usize,
    pub text: &'a str,
    /// The full line the word is on.
    line_text: &'a str,
}

fn is_word_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Identifiers of `content` in document order, outside comments, strings
/// and raw blocks.
pub fn scan_words(content: &str) -> Vec<Word<'_>> {
    let mut words = Vec::new();
    let mut in_raw = false;
    for (line_number, line) in content.lines().enumerate() {
        let line_number = u32::try_from(line_number).unwrap_or(u32::MAX);
        let bytes = line.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if in_raw {
                match bytes[i..].iter().position(|&b| b == b'`') {
                    Some(offset) => {
                        in_raw = false;
                        i += offset + 1;
                    }
                    None => break,
                }
                continue;
            }
            let b = bytes[i];
            match b {
                b'#' => break,
                b'/' if bytes.get(i + 1) == Some(&b'/') => break,
                b'`' => {
                    in_raw = true;
                    i += 1;
                }
                b'"' => {
                    i += 1;
                    while i < bytes.len() && bytes[i] != b'"' {
                        i += if bytes[i] == b'\\' { 2 } else { 1 };
                    }
                    i += 1;
                }
                _ if is_word_byte(b) => {
                    let start = i;
                    while i < bytes.len() && is_word_byte(bytes[i]) {
                        i += 1;
                    }
                    if is_word_start(b) {
                        words.push(Word {
                            line: line_number,
                            start,
                            text: &line[start..i],
                            line_text: line,
                        });
                    }
                }
                _ => i += 1,
            }
        }
    }
    words
}

/// Token type of an identifier, if any fact classifies it.
fn classify(facts: &DocumentFacts, word: &Word<'_>) -> Option<u32> {
    let name = word.text;
    let from_command = || {
        if name == "switch" || name == "case" {
            return None;
        }
        match facts.commands.get(name)?.kind {
            CommandKind::Macro => Some(TOKEN_TYPE_FUNCTION),
            CommandKind::AssemblerConstant | CommandKind::MovementConstant => {
                Some(TOKEN_TYPE_KEYWORD)
            }
            CommandKind::Keyword => None,
        }
    };
    let from_constant = || {
        let constant = facts.constants.get(name)?;
        (constant.position.line != word.line).then_some(TOKEN_TYPE_ENUM_MEMBER)
    };
    let from_symbol = || match facts.symbols.get(name)?.kind {
        SymbolKind::Script | SymbolKind::MapScripts => Some(TOKEN_TYPE_FUNCTION),
        SymbolKind::MovementScript | SymbolKind::Text => Some(TOKEN_TYPE_VARIABLE),
        SymbolKind::Mart | SymbolKind::Label => None,
    };
    let from_misc_token = || match facts.misc_tokens.get(name)?.token_type {
        MiscTokenType::Special => Some(TOKEN_TYPE_FUNCTION),
        MiscTokenType::Define => Some(TOKEN_TYPE_ENUM_MEMBER),
        MiscTokenType::Other(_) => Some(TOKEN_TYPE_KEYWORD),
    };
    from_command()
        .or_else(from_constant)
        .or_else(from_symbol)
        .or_else(from_misc_token)
}

/// Delta-encoded semantic tokens for the whole document.
pub fn get_semantic_tokens(facts: &DocumentFacts) -> SemanticTokens {
    let mut builder = SemanticTokenBuilder::new();
    for word in scan_words(&facts.content) {
        if let Some(token_type) = classify(facts, &word) {
            let length = u32::try_from(word.text.len()).unwrap_or(u32::MAX);
            builder.push(
                word.line,
                utf16_column(word.line_text, word.start),
                length,
                token_type,
                NO_MODIFIERS,
            );
        }
    }
    let data = builder
        .build()
        .chunks_exact(5)
        .map(|chunk| SemanticToken {
            delta_line: chunk[0],
            delta_start: chunk[1],
            length: chunk[2],
            token_type: chunk[3],
            token_modifiers_bitset: chunk[4],
        })
        .collect();
    SemanticTokens {
        result_id: None,
        data,
    }
}
