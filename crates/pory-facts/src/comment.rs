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

//! Poryscript comment stripping.
//!
//! A comment starts at the first unescaped `#` or the first unescaped `//` and
//! runs to the end of the line. A lone `/` is division, not a comment, and a
//! backslash escapes the character that follows it.

/// Strip a trailing Poryscript comment from a single line.
///
/// The returned slice always starts at the beginning of `line`, so byte
/// offsets computed against it are also valid offsets into the original line.
///
/// ```
/// use pory_facts::strip_comment;
///
/// assert_eq!(strip_comment("last #"), "last ");
/// assert_eq!(strip_comment("/ not a comment"), "/ not a comment");
/// assert_eq!(strip_comment(""), "");
/// ```
pub fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b'#' => return &line[..i],
            b'/' if bytes.get(i + 1) == Some(&b'/') => return &line[..i],
            _ => {}
        }
        i += 1;
    }
    line
}
