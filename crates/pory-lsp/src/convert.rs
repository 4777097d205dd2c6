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

//! Conversions from facts to protocol types.
//!
//! Every fact becomes a completion item and, if it has a position, a location
//! spanning its name on one line.

use crate::uri::resource_url;
use pory_facts::{
    Command, CommandKind, ConstantSymbol, MiscToken, MiscTokenType, SourcePosition, Symbol,
    SymbolKind,
};
use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, Documentation, InsertTextFormat, Location,
    ParameterInformation, ParameterLabel, Position, Range, SignatureInformation,
};

pub fn to_lsp_position(position: SourcePosition) -> Position {
    Position::new(position.line, position.character)
}

/// Location of a fact named `name` declared at `position` in `resource`.
///
/// `None` when the resource is not a URI, e.g. an include path that could not
/// be resolved.
pub fn fact_location(resource: &str, position: SourcePosition, name: &str) -> Option<Location> {
    let uri = resource_url(resource)?;
    let end = position.offset_by(name.len());
    Some(Location::new(
        uri,
        Range::new(to_lsp_position(position), to_lsp_position(end)),
    ))
}

fn some_text(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

// ============================================================================
// Commands
// ============================================================================

pub fn command_completion_kind(kind: CommandKind) -> CompletionItemKind {
    match kind {
        CommandKind::Macro => CompletionItemKind::FUNCTION,
        CommandKind::AssemblerConstant | CommandKind::MovementConstant => {
            CompletionItemKind::CONSTANT
        }
        CommandKind::Keyword => CompletionItemKind::KEYWORD,
    }
}

pub fn command_completion(command: &Command) -> CompletionItem {
    let detail = match command.kind {
        CommandKind::Macro if command.detail.is_empty() && !command.parameters.is_empty() => {
            Some(command.signature().label)
        }
        _ => some_text(&command.detail),
    };
    CompletionItem {
        label: command.name.clone(),
        kind: Some(command_completion_kind(command.kind)),
        detail,
        documentation: some_text(&command.documentation).map(Documentation::String),
        insert_text: command.insert_text.clone(),
        insert_text_format: command
            .insert_text
            .as_ref()
            .map(|_| InsertTextFormat::SNIPPET),
        ..Default::default()
    }
}

/// Signature help entry for a command, with parameter labels given as
/// offsets into the signature label.
pub fn signature_information(command: &Command) -> SignatureInformation {
    let signature = command.signature();
    SignatureInformation {
        label: signature.label,
        documentation: some_text(&command.documentation).map(Documentation::String),
        parameters: Some(
            signature
                .parameter_ranges
                .into_iter()
                .map(|(start, end)| ParameterInformation {
                    label: ParameterLabel::LabelOffsets([start, end]),
                    documentation: None,
                })
                .collect(),
        ),
        active_parameter: None,
    }
}

// ============================================================================
// Constants and symbols
// ============================================================================

pub fn constant_completion(constant: &ConstantSymbol) -> CompletionItem {
    CompletionItem {
        label: constant.name.clone(),
        kind: Some(CompletionItemKind::CONSTANT),
        ..Default::default()
    }
}

pub fn constant_location(constant: &ConstantSymbol) -> Option<Location> {
    fact_location(&constant.resource, constant.position, &constant.name)
}

pub fn symbol_completion_kind(kind: SymbolKind) -> CompletionItemKind {
    match kind {
        SymbolKind::Script | SymbolKind::MapScripts | SymbolKind::Label => {
            CompletionItemKind::FUNCTION
        }
        SymbolKind::MovementScript | SymbolKind::Mart | SymbolKind::Text => {
            CompletionItemKind::FIELD
        }
    }
}

pub fn symbol_completion(symbol: &Symbol) -> CompletionItem {
    CompletionItem {
        label: symbol.name.clone(),
        kind: Some(symbol_completion_kind(symbol.kind)),
        detail: Some(symbol.kind.detail().to_string()),
        ..Default::default()
    }
}

pub fn symbol_location(symbol: &Symbol) -> Option<Location> {
    fact_location(&symbol.resource, symbol.position, &symbol.name)
}

// ============================================================================
// Misc tokens
// ============================================================================

pub fn misc_token_completion_kind(token_type: &MiscTokenType) -> CompletionItemKind {
    match token_type {
        MiscTokenType::Special => CompletionItemKind::FUNCTION,
        MiscTokenType::Define => CompletionItemKind::CONSTANT,
        MiscTokenType::Other(_) => CompletionItemKind::VALUE,
    }
}

fn misc_token_detail(token: &MiscToken) -> Option<String> {
    match &token.token_type {
        MiscTokenType::Special => Some("Special Function".to_string()),
        MiscTokenType::Define => token.value.clone(),
        MiscTokenType::Other(_) => None,
    }
}

pub fn misc_token_completion(token: &MiscToken) -> CompletionItem {
    CompletionItem {
        label: token.name.clone(),
        kind: Some(misc_token_completion_kind(&token.token_type)),
        detail: misc_token_detail(token),
        ..Default::default()
    }
}

pub fn misc_token_location(token: &MiscToken) -> Option<Location> {
    fact_location(&token.resource, token.position, &token.name)
}
