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

//! Delta encoding for semantic highlighting.
//!
//! The highlighting protocol sends every token as five integers:
//! `[delta_line, delta_start, length, token_type, token_modifiers]`, where the
//! deltas are relative to the previous token. `delta_start` is relative to the
//! previous token's start only when both are on the same line; otherwise it is
//! the absolute start character.
//!
//! The encoder gives no meaning to type and modifier codes. Classification is
//! the caller's job, as is supplying spans sorted by `(line, start)`.

/// A classified span of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemanticSpan {
    pub line: u32,
    pub start: u32,
    pub length: u32,
    pub token_type: u32,
    pub modifiers: u32,
}

impl SemanticSpan {
    pub fn new(line: u32, start: u32, length: u32, token_type: u32, modifiers: u32) -> Self {
        Self {
            line,
            start,
            length,
            token_type,
            modifiers,
        }
    }
}

/// Encode spans into the flat, delta-encoded integer sequence.
///
/// ```
/// use pory_facts::{encode_semantic_tokens, SemanticSpan};
///
/// let spans = [
///     SemanticSpan::new(0, 5, 3, 1, 0),
///     SemanticSpan::new(0, 9, 4, 0, 0),
///     SemanticSpan::new(2, 0, 3, 1, 0),
/// ];
/// assert_eq!(
///     encode_semantic_tokens(&spans),
///     vec![0, 5, 3, 1, 0, 0, 4, 4, 0, 0, 2, 0, 3, 1, 0]
/// );
/// ```
pub fn encode_semantic_tokens(spans: &[SemanticSpan]) -> Vec<u32> {
    let mut data = Vec::with_capacity(spans.len() * 5);
    let mut prev_line = 0u32;
    let mut prev_start = 0u32;
    for span in spans {
        let delta_line = span.line.saturating_sub(prev_line);
        let delta_start = if span.line == prev_line {
            span.start.saturating_sub(prev_start)
        } else {
            span.start
        };
        data.extend_from_slice(&[
            delta_line,
            delta_start,
            span.length,
            span.token_type,
            span.modifiers,
        ]);
        prev_line = span.line;
        prev_start = span.start;
    }
    data
}

/// Collects spans in document order and encodes them.
#[derive(Debug, Default)]
pub struct SemanticTokenBuilder {
    spans: Vec<SemanticSpan>,
}

impl SemanticTokenBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: u32, start: u32, length: u32, token_type: u32, modifiers: u32) {
        self.spans
            .push(SemanticSpan::new(line, start, length, token_type, modifiers));
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn build(&self) -> Vec<u32> {
        encode_semantic_tokens(&self.spans)
    }
}
