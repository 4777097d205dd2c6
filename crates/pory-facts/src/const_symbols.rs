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

//! Poryscript `const` declarations.

use crate::comment::strip_comment;
use crate::position::SourcePosition;
use once_cell::sync::Lazy;
use regex::Regex;

static CONST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bconst\s+(\w+)\s*=").expect("valid const regex"));

/// A constant declared with `const NAME = ...`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstantSymbol {
    pub name: String,
    /// Position of the first character of the name.
    pub position: SourcePosition,
    /// Resource the constant was declared in.
    pub resource: String,
}

/// Parse the Poryscript constants from the given file content.
///
/// Every declaration on a line is reported, so `const A = 1 const B = 2`
/// yields two constants. Declarations inside comments are ignored.
pub fn parse_constants(content: &str, resource: &str) -> Vec<ConstantSymbol> {
    let mut constants = Vec::new();
    for (line_number, raw_line) in content.lines().enumerate() {
        let line = strip_comment(raw_line);
        for caps in CONST_RE.captures_iter(line) {
            let Some(name) = caps.get(1) else {
                continue;
            };
            constants.push(ConstantSymbol {
                name: name.as_str().to_string(),
                position: SourcePosition::from_indices(line_number, name.start()),
                resource: resource.to_string(),
            });
        }
    }
    constants
}
