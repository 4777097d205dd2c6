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

//! Column conversions between the protocol and the extractors.
//!
//! The protocol counts columns in UTF-16 code units; the extractors count
//! bytes. The two agree on ASCII lines, which is nearly every line of
//! Poryscript, but text strings may hold accented characters.

use tower_lsp::lsp_types::Position;

/// Text of line `line`, without its terminator.
pub fn line_text(content: &str, line: u32) -> Option<&str> {
    content.lines().nth(line as usize)
}

/// Byte offset of a UTF-16 column within `line`.
///
/// Columns past the end of the line map past the end as well, so range
/// checks downstream still see them as out of range.
pub fn byte_column(line: &str, utf16_column: u32) -> usize {
    let target = utf16_column as usize;
    let mut units = 0;
    for (offset, ch) in line.char_indices() {
        if units >= target {
            return offset;
        }
        units += ch.len_utf16();
    }
    line.len() + target.saturating_sub(units)
}

/// UTF-16 column of a byte offset within `line`.
pub fn utf16_column(line: &str, byte_column: usize) -> u32 {
    let prefix = line.get(..byte_column).unwrap_or(line);
    let units: usize = prefix.chars().map(char::len_utf16).sum();
    u32::try_from(units).unwrap_or(u32::MAX)
}

/// Byte column of a protocol cursor position in `content`.
pub fn cursor_column(content: &str, position: Position) -> usize {
    match line_text(content, position.line) {
        Some(line) => byte_column(line, position.character),
        None => position.character as usize,
    }
}
