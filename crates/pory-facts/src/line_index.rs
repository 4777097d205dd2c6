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

//! Line start offsets for a block of text.
//!
//! Built once per extraction pass so that extractors can walk lines by index
//! (forwards or backwards) without rescanning the content.

/// Byte offsets of the start of every line in a text.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    /// Index the lines of `text`.
    ///
    /// Lines are separated by `\n`; a trailing `\r` is not part of the line.
    /// A trailing newline does not start an extra empty line, and empty text
    /// has no lines at all.
    pub fn new(text: &'a str) -> Self {
        let mut starts = Vec::new();
        if !text.is_empty() {
            starts.push(0);
        }
        for (idx, byte) in text.bytes().enumerate() {
            if byte == b'\n' && idx + 1 < text.len() {
                starts.push(idx + 1);
            }
        }
        Self { text, starts }
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    /// Whether the text has no lines.
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Get the content of line `idx` without its line terminator.
    pub fn line(&self, idx: usize) -> Option<&'a str> {
        let start = *self.starts.get(idx)?;
        let end = self
            .starts
            .get(idx + 1)
            .map(|next| next - 1)
            .unwrap_or_else(|| {
                if self.text.ends_with('\n') {
                    self.text.len() - 1
                } else {
                    self.text.len()
                }
            });
        let line = &self.text[start..end];
        Some(line.strip_suffix('\r').unwrap_or(line))
    }

    /// Iterate over `(line_number, line)` pairs.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        (0..self.len()).filter_map(move |idx| self.line(idx).map(|line| (idx, line)))
    }
}
