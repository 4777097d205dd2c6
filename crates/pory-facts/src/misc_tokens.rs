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

//! Miscellaneous tokens captured by caller-supplied expressions.
//!
//! Projects configure pairs of `(expression, type)` per include file, e.g.
//! `^\s*def_special\s+(\w+)` with type `special` for `data/specials.inc`, or
//! `^\s*#define\s+(FLAG_\w+)\s+(.+)` with type `define` for a C header.
//! Capture group 1 is the token name; for `define` tokens capture group 2, if
//! present, is kept as the token's value.
//!
//! Lines are scanned raw. Comment syntax differs between the files these
//! expressions target, so the expression itself decides what to skip.

use crate::position::SourcePosition;
use regex::Regex;
use std::fmt;
use tracing::debug;

/// The configured type of a misc token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MiscTokenType {
    /// `special`: a special function callable with `special(...)`.
    Special,
    /// `define`: a preprocessor define with an associated value.
    Define,
    /// Any other configured tag.
    Other(String),
}

impl From<&str> for MiscTokenType {
    fn from(tag: &str) -> Self {
        match tag {
            "special" => MiscTokenType::Special,
            "define" => MiscTokenType::Define,
            other => MiscTokenType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for MiscTokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MiscTokenType::Special => f.write_str("special"),
            MiscTokenType::Define => f.write_str("define"),
            MiscTokenType::Other(tag) => f.write_str(tag),
        }
    }
}

/// A token included from an arbitrary project file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MiscToken {
    pub name: String,
    pub position: SourcePosition,
    pub token_type: MiscTokenType,
    /// Resource the token was found in.
    pub resource: String,
    /// Captured value, only for `define` tokens whose expression has a second group.
    pub value: Option<String>,
}

/// Parse the misc tokens matched by an already-compiled expression.
pub fn parse_misc_tokens(
    content: &str,
    expression: &Regex,
    token_type: &MiscTokenType,
    resource: &str,
) -> Vec<MiscToken> {
    let mut tokens = Vec::new();
    for (line_number, line) in content.lines().enumerate() {
        for caps in expression.captures_iter(line) {
            let Some(name) = caps.get(1) else {
                continue;
            };
            let value = match token_type {
                MiscTokenType::Define => caps.get(2).map(|value| value.as_str().to_string()),
                MiscTokenType::Special | MiscTokenType::Other(_) => None,
            };
            tokens.push(MiscToken {
                name: name.as_str().to_string(),
                position: SourcePosition::from_indices(line_number, name.start()),
                token_type: token_type.clone(),
                resource: resource.to_string(),
                value,
            });
        }
    }
    tokens
}

/// Compile `expression` and parse the misc tokens it matches.
///
/// An invalid expression yields no tokens rather than an error, so one bad
/// configuration entry disables itself without breaking anything else.
pub fn parse_misc_tokens_with_expression(
    content: &str,
    expression: &str,
    token_type: &MiscTokenType,
    resource: &str,
) -> Vec<MiscToken> {
    if content.is_empty() {
        return Vec::new();
    }
    match Regex::new(expression) {
        Ok(re) => parse_misc_tokens(content, &re, token_type, resource),
        Err(e) => {
            debug!("Ignoring invalid misc token expression {:?}: {}", expression, e);
            Vec::new()
        }
    }
}
