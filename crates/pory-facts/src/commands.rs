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

//! Scripting command extraction.
//!
//! Commands are everything a Poryscript author can "call" or reference by name
//! that is defined outside Poryscript itself:
//!
//! - **Macros**: `.macro NAME PARAMS` declarations in the assembly include files
//! - **Assembler constants**: `NAME = VALUE` lines in the same files
//! - **Movement constants**: `create_movement_action NAME, VALUE` entries
//! - **Keywords**: the fixed table in [`crate::keywords`]
//!
//! # Macro Documentation
//!
//! The lines directly above a `.macro` declaration that start with `@` (the
//! assembler comment marker) form its documentation:
//!
//! ```text
//! @ Buffers the given text and calls the relevant standard message script.
//! .macro msgbox text:req, type=MSGBOX_DEFAULT
//! ```
//!
//! The scan stops at the first line that does not start with the marker, so a
//! blank line detaches a comment block from the macro below it.

use crate::line_index::LineIndex;
use once_cell::sync::Lazy;
use regex::Regex;

static MACRO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\.macro\s+(\w+)(.*)$").expect("valid macro regex"));
static ASSEMBLY_CONSTANT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\w+)\s*=\s*(\S.*?)\s*$").expect("valid assembly constant regex")
});
static MOVEMENT_CONSTANT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*create_movement_action\s+(\w+)(?:\s*,\s*(\w+))?")
        .expect("valid movement constant regex")
});
static PARAM_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s,]+").expect("valid parameter separator regex"));

/// Marker character that starts an assembler documentation comment.
const DOC_MARKER: char = '@';

/// What a command is, which drives how editors present it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// A `.macro` scripting command.
    Macro,
    /// An assembler `NAME = VALUE` constant.
    AssemblerConstant,
    /// A movement action declared with `create_movement_action`.
    MovementConstant,
    /// A reserved Poryscript construct.
    Keyword,
}

/// How a macro parameter must be supplied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommandParamKind {
    /// `name:req`
    Required,
    /// `name=value`
    Default {
        /// The value used when the argument is omitted.
        value: String,
    },
    /// Bare `name`
    Optional,
    /// `name:vararg`, only meaningful as the last parameter.
    Vararg,
}

/// A single macro parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandParam {
    pub name: String,
    pub kind: CommandParamKind,
}

impl CommandParam {
    /// Parse one parameter token such as `text:req` or `type=MSGBOX_DEFAULT`.
    fn parse(token: &str) -> Self {
        if let Some(name) = token.strip_suffix(":req") {
            return Self::new(name, CommandParamKind::Required);
        }
        if let Some(name) = token.strip_suffix(":vararg") {
            return Self::new(name, CommandParamKind::Vararg);
        }
        if let Some((name, value)) = token.split_once('=') {
            return Self::new(
                name,
                CommandParamKind::Default {
                    value: value.to_string(),
                },
            );
        }
        Self::new(token, CommandParamKind::Optional)
    }

    fn new(name: &str, kind: CommandParamKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }

    /// The default value, present only for [`CommandParamKind::Default`].
    pub fn default_value(&self) -> Option<&str> {
        match &self.kind {
            CommandParamKind::Default { value } => Some(value),
            CommandParamKind::Required | CommandParamKind::Optional | CommandParamKind::Vararg => {
                None
            }
        }
    }

    /// How the parameter reads inside a signature label.
    pub fn label(&self) -> String {
        match &self.kind {
            CommandParamKind::Required => self.name.clone(),
            CommandParamKind::Default { value } => format!("{}={}", self.name, value),
            CommandParamKind::Optional => format!("{}?", self.name),
            CommandParamKind::Vararg => format!("{}...", self.name),
        }
    }
}

/// A scripting command available to Poryscript files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub kind: CommandKind,
    /// Documentation gathered from the comment block above the declaration.
    pub documentation: String,
    /// Short detail text, e.g. the value of a constant.
    pub detail: String,
    /// Snippet inserted on completion, if the command has one.
    pub insert_text: Option<String>,
    pub parameters: Vec<CommandParam>,
}

/// A rendered call signature with the byte range of every parameter label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSignature {
    /// E.g. `msgbox(text, type=MSGBOX_DEFAULT)`.
    pub label: String,
    /// `[start, end)` offsets of each parameter inside `label`.
    pub parameter_ranges: Vec<(u32, u32)>,
}

impl Command {
    /// A command with no documentation, detail, snippet or parameters.
    pub fn new(name: impl Into<String>, kind: CommandKind) -> Self {
        Self {
            name: name.into(),
            kind,
            documentation: String::new(),
            detail: String::new(),
            insert_text: None,
            parameters: Vec::new(),
        }
    }

    /// Render the call signature used by signature help.
    pub fn signature(&self) -> CommandSignature {
        let mut label = format!("{}(", self.name);
        let mut parameter_ranges = Vec::with_capacity(self.parameters.len());
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                label.push_str(", ");
            }
            let start = label.len();
            label.push_str(&param.label());
            parameter_ranges.push((offset(start), offset(label.len())));
        }
        label.push(')');
        CommandSignature {
            label,
            parameter_ranges,
        }
    }
}

fn offset(idx: usize) -> u32 {
    u32::try_from(idx).unwrap_or(u32::MAX)
}

/// Parse every kind of file-defined command from the given content.
///
/// Macros come first, then assembler constants, then movement constants, each
/// group in file order. The keyword table is not included; it is merged in
/// once per aggregated result instead of once per file.
pub fn parse_commands(content: &str) -> Vec<Command> {
    let mut commands = parse_macro_commands(content);
    commands.extend(parse_assembly_constants(content));
    commands.extend(parse_movement_constants(content));
    commands
}

/// Parse the `.macro` declarations from the given content.
pub fn parse_macro_commands(content: &str) -> Vec<Command> {
    let index = LineIndex::new(content);
    let mut commands = Vec::new();
    for (line_number, line) in index.lines() {
        let Some(caps) = MACRO_RE.captures(line) else {
            continue;
        };
        let mut command = Command::new(&caps[1], CommandKind::Macro);
        command.parameters = caps
            .get(2)
            .map(|params| {
                PARAM_SEPARATOR_RE
                    .split(params.as_str())
                    .filter(|token| !token.is_empty())
                    .map(CommandParam::parse)
                    .collect()
            })
            .unwrap_or_default();
        command.documentation = command_documentation(&index, line_number);
        commands.push(command);
    }
    commands
}

/// Gather the documentation block directly above the line `decl_line`.
fn command_documentation(index: &LineIndex<'_>, decl_line: usize) -> String {
    let mut doc_lines = Vec::new();
    for line_number in (0..decl_line).rev() {
        let Some(line) = index.line(line_number) else {
            break;
        };
        let Some(text) = line
            .trim_start_matches([' ', '\t'])
            .strip_prefix(DOC_MARKER)
        else {
            break;
        };
        doc_lines.push(text.trim());
    }
    doc_lines.reverse();
    doc_lines.retain(|line| !line.is_empty());
    doc_lines.join(" ")
}

/// Parse the assembler `NAME = VALUE` constants from the given content.
pub fn parse_assembly_constants(content: &str) -> Vec<Command> {
    content
        .lines()
        .filter_map(|line| ASSEMBLY_CONSTANT_RE.captures(line))
        .map(|caps| {
            let mut command = Command::new(&caps[1], CommandKind::AssemblerConstant);
            command.detail = caps[2].to_string();
            command
        })
        .collect()
}

/// Parse the `create_movement_action` entries from the given content.
pub fn parse_movement_constants(content: &str) -> Vec<Command> {
    content
        .lines()
        .filter_map(|line| MOVEMENT_CONSTANT_RE.captures(line))
        .map(|caps| {
            let mut command = Command::new(&caps[1], CommandKind::MovementConstant);
            command.detail = caps
                .get(2)
                .map(|value| value.as_str().to_string())
                .unwrap_or_default();
            command
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str, kind: CommandParamKind) -> CommandParam {
        CommandParam {
            name: name.to_string(),
            kind,
        }
    }

    #[test]
    fn test_parse_macro_commands() {
        let input = "
@ Buffers the given text and calls the relevant standard message script (see gStdScripts).
.macro \t    msgbox text:req, type=MSGBOX_DEFAULT optarg
loadword 0, \\text
.endm

@ Gives 'amount' of the specified 'item' to the player and prints a message with fanfare.
@ If the player doesn't have space for all the items then as many are added as possible, the
.macro giveitem amount=1, \t item:req
setorcopyvar VAR_0x8000, \\item
.endm

.macro noop
.endm
";
        let results = parse_macro_commands(input);
        assert_eq!(results.len(), 3);

        assert_eq!(results[0].name, "msgbox");
        assert_eq!(results[0].kind, CommandKind::Macro);
        assert_eq!(
            results[0].documentation,
            "Buffers the given text and calls the relevant standard message script (see gStdScripts)."
        );
        assert_eq!(
            results[0].parameters,
            vec![
                param("text", CommandParamKind::Required),
                param(
                    "type",
                    CommandParamKind::Default {
                        value: "MSGBOX_DEFAULT".to_string()
                    }
                ),
                param("optarg", CommandParamKind::Optional),
            ]
        );

        assert_eq!(results[1].name, "giveitem");
        assert_eq!(
            results[1].documentation,
            "Gives 'amount' of the specified 'item' to the player and prints a message with fanfare. If the player doesn't have space for all the items then as many are added as possible, the"
        );
        assert_eq!(
            results[1].parameters,
            vec![
                param(
                    "amount",
                    CommandParamKind::Default {
                        value: "1".to_string()
                    }
                ),
                param("item", CommandParamKind::Required),
            ]
        );

        assert_eq!(results[2].name, "noop");
        assert_eq!(results[2].documentation, "");
        assert!(results[2].parameters.is_empty());
    }

    #[test]
    fn test_vararg_parameter() {
        let results = parse_macro_commands(".macro call_all first:req, rest:vararg\n");
        assert_eq!(
            results[0].parameters,
            vec![
                param("first", CommandParamKind::Required),
                param("rest", CommandParamKind::Vararg),
            ]
        );
    }

    #[test]
    fn test_command_documentation() {
        let input = "@ Single line
\t.macro macrofoo
\t
  @ \tThis has
\t@2 lines
\t.macro macrobar

\t.macro macrobaz

\t@ This line is not connected

\t@ This line is connected
@
\t@ to the macro
\t.macro macrotest
\t";
        let docs: Vec<(String, String)> = parse_macro_commands(input)
            .into_iter()
            .map(|c| (c.name, c.documentation))
            .collect();
        assert_eq!(
            docs,
            vec![
                ("macrofoo".to_string(), "Single line".to_string()),
                ("macrobar".to_string(), "This has 2 lines".to_string()),
                ("macrobaz".to_string(), "".to_string()),
                (
                    "macrotest".to_string(),
                    "This line is connected to the macro".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_documentation_is_stable_across_extractions() {
        let input = "@ Locks the player.\n.macro lock\n";
        let first = parse_macro_commands(input);
        let second = parse_macro_commands(input);
        assert_eq!(first, second);
        assert_eq!(first[0].documentation, "Locks the player.");
    }

    #[test]
    fn test_documentation_with_crlf_line_endings() {
        let input = "@ First\r\n@ Second\r\n.macro crlf arg:req\r\n";
        let results = parse_macro_commands(input);
        assert_eq!(results[0].documentation, "First Second");
        assert_eq!(results[0].parameters, vec![param("arg", CommandParamKind::Required)]);
    }

    #[test]
    fn test_parse_assembly_constants() {
        let input = "
\t.macro case condition:req, dest:req
\tcompare VAR_0x8000, \\condition
\tgoto_if_eq \\dest
\t.endm

\t@ Message box types
\tMSGBOX_NPC = 2
\tNO_MUSIC = FALSE
MSGBOX_DEFAULT = 4
  \t\tMSGBOX_YESNO = 5
\tYES = 1
NO  = 0";
        let results: Vec<(String, String)> = parse_assembly_constants(input)
            .into_iter()
            .inspect(|c| assert_eq!(c.kind, CommandKind::AssemblerConstant))
            .map(|c| (c.name, c.detail))
            .collect();
        let expected: Vec<(String, String)> = [
            ("MSGBOX_NPC", "2"),
            ("NO_MUSIC", "FALSE"),
            ("MSGBOX_DEFAULT", "4"),
            ("MSGBOX_YESNO", "5"),
            ("YES", "1"),
            ("NO", "0"),
        ]
        .iter()
        .map(|(n, d)| (n.to_string(), d.to_string()))
        .collect();
        assert_eq!(results, expected);
    }

    #[test]
    fn test_parse_movement_constants() {
        let input = "
\t.macro create_movement_action name:req, value:req
\t.macro \\name
\t.byte \\value
\t.endm
\t.endm

\tcreate_movement_action face_down, MOVEMENT_ACTION_FACE_DOWN
create_movement_action face_up, MOVEMENT_ACTION_FACE_UP
  \tcreate_movement_action face_left, MOVEMENT_ACTION_FACE_LEFT
create_movement_action step_end";
        let results: Vec<(String, String)> = parse_movement_constants(input)
            .into_iter()
            .inspect(|c| assert_eq!(c.kind, CommandKind::MovementConstant))
            .map(|c| (c.name, c.detail))
            .collect();
        assert_eq!(
            results,
            vec![
                ("face_down".to_string(), "MOVEMENT_ACTION_FACE_DOWN".to_string()),
                ("face_up".to_string(), "MOVEMENT_ACTION_FACE_UP".to_string()),
                ("face_left".to_string(), "MOVEMENT_ACTION_FACE_LEFT".to_string()),
                ("step_end".to_string(), "".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_commands_combines_all_sources() {
        let input = "\
.macro lock
.endm
LOCK_VALUE = 1
create_movement_action walk_up, MOVEMENT_ACTION_WALK_UP
";
        let names: Vec<(String, CommandKind)> = parse_commands(input)
            .into_iter()
            .map(|c| (c.name, c.kind))
            .collect();
        assert_eq!(
            names,
            vec![
                ("lock".to_string(), CommandKind::Macro),
                ("LOCK_VALUE".to_string(), CommandKind::AssemblerConstant),
                ("walk_up".to_string(), CommandKind::MovementConstant),
            ]
        );
    }

    #[test]
    fn test_signature_label_and_ranges() {
        let commands = parse_macro_commands(
            ".macro msgbox text:req, type=MSGBOX_DEFAULT, extra, rest:vararg\n",
        );
        let signature = commands[0].signature();
        assert_eq!(
            signature.label,
            "msgbox(text, type=MSGBOX_DEFAULT, extra?, rest...)"
        );
        let labels: Vec<&str> = signature
            .parameter_ranges
            .iter()
            .map(|(start, end)| &signature.label[*start as usize..*end as usize])
            .collect();
        assert_eq!(labels, vec!["text", "type=MSGBOX_DEFAULT", "extra?", "rest..."]);
    }

    #[test]
    fn test_default_value_only_for_default_kind() {
        assert_eq!(CommandParam::parse("type=X").default_value(), Some("X"));
        assert_eq!(CommandParam::parse("type:req").default_value(), None);
        assert_eq!(CommandParam::parse("type").default_value(), None);
        assert_eq!(CommandParam::parse("type:vararg").default_value(), None);
    }
}
