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

//! Error types for cursor queries.

use thiserror::Error;

/// Why no command call could be found around a cursor position.
///
/// These are expected outcomes while the user is typing; callers usually log
/// them at debug level and answer with an empty result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallSiteError {
    /// The requested line is past the end of the content, or the column is
    /// past the end of the comment-stripped line.
    #[error("position {line}:{column} is outside the content")]
    OutOfRange { line: usize, column: usize },

    /// There is no `(` at or before the cursor on the line.
    #[error("line {line} has no open parenthesis before the cursor")]
    NoOpenParen { line: usize },

    /// The `(` is not directly preceded by a command name.
    #[error("line {line} has no command before the parenthesis")]
    NoCommandName { line: usize },

    /// There is no `)` after the `(` on the same line.
    #[error("line {line} has no closing parenthesis")]
    NoCloseParen { line: usize },
}
