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

//! LSP constants and tunables.
//!
//! # Organization
//!
//! Constants are organized by category:
//! - **Memory Limits**: Open-document size constraints
//! - **Configuration**: Client settings section and defaults
//! - **Workspace**: Source file discovery
//! - **Semantic Tokens**: Legend indices

// ============================================================================
// Memory Limits
// ============================================================================

/// Bytes per megabyte (1024 * 1024).
pub const BYTES_PER_MEGABYTE: usize = 1024 * 1024;

/// Default maximum size of an open document buffer (64 MB).
///
/// **Rationale**: The largest generated script files in the decomp projects
/// are a few hundred kilobytes. Buffers over the limit are not stored and
/// reads fall back to the file on disk.
pub const DEFAULT_MAX_DOCUMENT_SIZE: usize = 64 * BYTES_PER_MEGABYTE;

// ============================================================================
// Configuration
// ============================================================================

/// Section requested from the client with `workspace/configuration`.
pub const SETTINGS_SECTION: &str = "languageServerPoryscript";

/// Files scanned for commands when the client supplies no settings.
pub const DEFAULT_COMMAND_INCLUDES: &[&str] = &["asm/macros/event.inc", "asm/macros/movement.inc"];

/// Location of the compiler's command configuration inside a project.
pub const DEFAULT_COMMAND_CONFIG_FILEPATH: &str = "tools/poryscript/command_config.json";

// ============================================================================
// Workspace
// ============================================================================

/// Extension of Poryscript source files, without the dot.
pub const SOURCE_FILE_EXTENSION: &str = "pory";

/// Files whose changes invalidate cached facts: sources, assembler includes
/// and C headers (where `#define`s usually live).
pub const WATCHED_FILES_GLOB: &str = "**/*.{pory,inc,h}";

// ============================================================================
// Semantic Tokens
// ============================================================================

/// Legend index of `keyword`.
pub const TOKEN_TYPE_KEYWORD: u32 = 0;
/// Legend index of `function`.
pub const TOKEN_TYPE_FUNCTION: u32 = 1;
/// Legend index of `enumMember`.
pub const TOKEN_TYPE_ENUM_MEMBER: u32 = 2;
/// Legend index of `variable`.
pub const TOKEN_TYPE_VARIABLE: u32 = 3;

/// No modifiers are ever set.
pub const NO_MODIFIERS: u32 = 0;
