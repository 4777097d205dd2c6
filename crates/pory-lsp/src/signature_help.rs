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

//! Signature help for command calls.
//!
//! Only calls that open and close on the cursor's line are recognised; see
//! [`pory_facts::command_call_parts_at`].

use crate::cache::DocumentFacts;
use crate::convert::signature_information;
use crate::utils::cursor_column;
use pory_facts::{command_call_parts_at, CommandParamKind};
use tower_lsp::lsp_types::{Position, SignatureHelp};
use tracing::debug;

/// Signature help for the call surrounding the cursor.
///
/// Returns `None` unless the call names a known command with parameters and
/// the cursor sits after its `(` and not after its `)`. The active parameter
/// is the number of commas left of the cursor, pinned to the last parameter
/// when that one is a vararg.
pub fn get_signature_help(facts: &DocumentFacts, position: Position) -> Option<SignatureHelp> {
    let column = cursor_column(&facts.content, position);
    let parts = match command_call_parts_at(&facts.content, position.line as usize, column) {
        Ok(parts) => parts,
        Err(e) => {
            debug!("No signature help at {}:{}: {}", position.line, position.character, e);
            return None;
        }
    };

    let command = facts.commands.get(&parts.command)?;
    if command.parameters.is_empty() {
        return None;
    }
    let open = parts.open_paren.character as usize;
    let close = parts.close_paren.character as usize;
    if column < open + 1 || column > close {
        return None;
    }

    let mut active = parts
        .commas
        .iter()
        .filter(|comma| column > comma.character as usize)
        .count();
    let last = command.parameters.len() - 1;
    if active > last && command.parameters[last].kind == CommandParamKind::Vararg {
        active = last;
    }

    Some(SignatureHelp {
        signatures: vec![signature_information(command)],
        active_signature: Some(0),
        active_parameter: Some(u32::try_from(active).unwrap_or(u32::MAX)),
    })
}
