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

//! Cursor utilities: what identifier or call is under a position.
//!
//! Both queries work on a single comment-stripped line. Out-of-range
//! positions degrade to an empty answer instead of panicking.
//!
//! # Limitations
//!
//! [`command_call_parts_at`] only sees the cursor's own line and does not
//! track nesting, so `msgbox(format("a"), |)` resolves to `format` and calls
//! whose arguments span several lines are not recognised. Signature help is
//! line-local as a result.

use crate::comment::strip_comment;
use crate::error::CallSiteError;
use crate::position::SourcePosition;

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Get the comment-stripped text of line `line`, if it exists.
fn stripped_line(content: &str, line: usize) -> Option<&str> {
    content.lines().nth(line).map(strip_comment)
}

/// Get the full word (`[A-Za-z0-9_]+`) at the given position.
///
/// If the column sits on a non-word character, or at the end of the line, the
/// word ending just before it is returned instead, so a cursor placed right
/// after an identifier still finds it. Returns an empty string when there is
/// no word there or the position is out of range.
///
/// ```
/// use pory_facts::token_at;
///
/// let content = "FOO thing(BLAH) BAZ";
/// assert_eq!(token_at(content, 0, 6), "thing");
/// assert_eq!(token_at(content, 0, 9), "thing");
/// assert_eq!(token_at(content, 0, 10), "BLAH");
/// assert_eq!(token_at(content, 3, 0), "");
/// ```
pub fn token_at(content: &str, line: usize, column: usize) -> &str {
    let Some(text) = stripped_line(content, line) else {
        return "";
    };
    if column > text.len() {
        return "";
    }
    let (start, end) = word_bounds(text.as_bytes(), column);
    if start >= end {
        return "";
    }
    &text[start..end]
}

fn word_bounds(line: &[u8], column: usize) -> (usize, usize) {
    (word_start(line, column), word_end(line, column))
}

fn word_start(line: &[u8], column: usize) -> usize {
    let mut col = column;
    let on_non_word = line.get(col).map_or(true, |b| !is_word_byte(*b));
    if on_non_word {
        if col == 0 {
            return 0;
        }
        col -= 1;
    }
    loop {
        if !line.get(col).is_some_and(|b| is_word_byte(*b)) {
            return col + 1;
        }
        if col == 0 {
            return 0;
        }
        col -= 1;
    }
}

fn word_end(line: &[u8], column: usize) -> usize {
    let mut col = column;
    while line.get(col).is_some_and(|b| is_word_byte(*b)) {
        col += 1;
    }
    col
}

/// The pieces of a command call on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCallParts {
    /// Name of the command being called.
    pub command: String,
    pub open_paren: SourcePosition,
    pub close_paren: SourcePosition,
    /// Every comma between the parentheses, in order.
    pub commas: Vec<SourcePosition>,
}

/// Locate the command call surrounding the given position.
///
/// Scans backwards from the column for the nearest `(`, takes the word run
/// directly before it as the command name, then scans forwards for commas and
/// the first `)` on the same line.
pub fn command_call_parts_at(
    content: &str,
    line: usize,
    column: usize,
) -> Result<CommandCallParts, CallSiteError> {
    let text = stripped_line(content, line)
        .filter(|text| column <= text.len())
        .ok_or(CallSiteError::OutOfRange { line, column })?;
    let mut bytes = text.as_bytes().to_vec();
    bytes.push(b'\n');

    let open = (0..=column)
        .rev()
        .find(|&i| bytes[i] == b'(')
        .ok_or(CallSiteError::NoOpenParen { line })?;

    let name_start = (0..open)
        .rev()
        .take_while(|&i| is_word_byte(bytes[i]))
        .last()
        .ok_or(CallSiteError::NoCommandName { line })?;
    let command = text[name_start..open].to_string();

    let mut commas = Vec::new();
    let mut close = None;
    for (i, b) in bytes.iter().enumerate().skip(open) {
        match b {
            b')' => {
                close = Some(i);
                break;
            }
            b',' => commas.push(SourcePosition::from_indices(line, i)),
            _ => {}
        }
    }
    let close = close.ok_or(CallSiteError::NoCloseParen { line })?;

    Ok(CommandCallParts {
        command,
        open_paren: SourcePosition::from_indices(line, open),
        close_paren: SourcePosition::from_indices(line, close),
        commas,
    })
}
