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

//! Poryscript fact extraction.
//!
//! This crate is the analysis core behind the Poryscript language server. It
//! turns raw file content into typed, positioned facts without ever consulting
//! a full grammar:
//!
//! - **Commands**: `.macro` declarations, assembler `NAME = VALUE` constants,
//!   `create_movement_action` entries, and the fixed keyword table
//! - **Constants**: Poryscript `const NAME =` declarations
//! - **Symbols**: `script`, `movement`, `mart`, `mapscripts`, `text` blocks and labels
//! - **Misc tokens**: names captured by a caller-supplied expression (specials,
//!   `#define`s, anything a project wants completion for)
//!
//! It also provides the cursor utilities used to answer "what is under the
//! cursor" and the delta encoder for semantic highlighting.
//!
//! Every function in this crate is a deterministic pure function. No state is
//! retained between calls, so everything here is safe to call from any number
//! of threads at once.
//!
//! # Positions
//!
//! Positions are 0-based `(line, character)` pairs where `character` is a byte
//! offset into the *comment-stripped* line. A position never points inside a
//! trailing comment.
//!
//! # Example
//!
//! ```
//! use pory_facts::{parse_constants, parse_symbols, SymbolKind};
//!
//! let content = "const FOO = 4\nscript MyScript {\n    end\n}\n";
//!
//! let constants = parse_constants(content, "file:///main.pory");
//! assert_eq!(constants[0].name, "FOO");
//!
//! let symbols = parse_symbols(content, "file:///main.pory");
//! assert_eq!(symbols[0].kind, SymbolKind::Script);
//! ```

pub mod commands;
pub mod comment;
pub mod const_symbols;
pub mod cursor;
pub mod error;
pub mod keywords;
pub mod line_index;
pub mod misc_tokens;
pub mod position;
pub mod semantic;
pub mod symbols;

pub use commands::{
    parse_assembly_constants, parse_commands, parse_macro_commands, parse_movement_constants,
    Command, CommandKind, CommandParam, CommandParamKind, CommandSignature,
};
pub use comment::strip_comment;
pub use const_symbols::{parse_constants, ConstantSymbol};
pub use cursor::{command_call_parts_at, token_at, CommandCallParts};
pub use error::CallSiteError;
pub use keywords::keyword_commands;
pub use misc_tokens::{
    parse_misc_tokens, parse_misc_tokens_with_expression, MiscToken, MiscTokenType,
};
pub use position::SourcePosition;
pub use semantic::{encode_semantic_tokens, SemanticSpan, SemanticTokenBuilder};
pub use symbols::{parse_symbols, Symbol, SymbolKind};
