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

//! The fixed table of Poryscript keyword commands.
//!
//! These are not derived from any file. They are appended to every aggregated
//! command set so that completion always offers the language's own constructs,
//! each with a snippet that expands to the construct's usual shape.

use crate::commands::{Command, CommandKind};
use once_cell::sync::Lazy;

/// `(name, detail, snippet)` for every keyword.
const KEYWORDS: &[(&str, &str, &str)] = &[
    // Top-level blocks
    ("script", "Script block", "script ${1:MyScript} {\n\t$0\n}"),
    ("movement", "Movement block", "movement ${1:MyMovement} {\n\t$0\n}"),
    ("mart", "Mart block", "mart ${1:MyMart} {\n\t$0\n}"),
    ("mapscripts", "Map scripts block", "mapscripts ${1:MyMap_MapScripts} {\n\t$0\n}"),
    ("text", "Text block", "text ${1:MyText} {\n\t\"$0\"\n}"),
    ("raw", "Raw assembly block", "raw `\n\t$0\n`"),
    ("const", "Constant declaration", "const ${1:NAME} = ${0:value}"),
    // Control flow
    ("if", "If statement", "if (${1:condition}) {\n\t$0\n}"),
    ("elif", "Elif statement", "elif (${1:condition}) {\n\t$0\n}"),
    ("else", "Else statement", "else {\n\t$0\n}"),
    ("while", "While loop", "while (${1:condition}) {\n\t$0\n}"),
    ("do", "Do-while loop", "do {\n\t$0\n} while (${1:condition})"),
    ("switch", "Switch statement", "switch (var(${1:VAR_TEMP_0})) {\n\tcase ${2:0}:\n\t\t$0\n}"),
    ("case", "Switch case", "case ${1:0}:\n\t$0"),
    ("default", "Switch default case", "default:\n\t$0"),
    ("break", "Break out of loop or switch", "break"),
    ("continue", "Continue loop", "continue"),
    // Built-in call forms
    ("format", "Auto-format text", "format(\"$0\")"),
    ("var", "Variable value", "var(${1:VAR_TEMP_0})"),
    ("flag", "Flag value", "flag(${1:FLAG_TEMP_1})"),
    ("defeated", "Trainer defeated check", "defeated(${1:TRAINER})"),
    ("poryswitch", "Compile-time switch", "poryswitch(${1:GAME_VERSION}) {\n\t${2:RUBY}: $0\n}"),
    ("moves", "Inline movement list", "moves(\n\t$0\n)"),
];

static KEYWORD_COMMANDS: Lazy<Vec<Command>> = Lazy::new(|| {
    KEYWORDS
        .iter()
        .map(|(name, detail, snippet)| {
            let mut command = Command::new(*name, CommandKind::Keyword);
            command.detail = (*detail).to_string();
            command.insert_text = Some((*snippet).to_string());
            command
        })
        .collect()
});

/// The keyword commands, in a fixed order.
pub fn keyword_commands() -> &'static [Command] {
    &KEYWORD_COMMANDS
}
