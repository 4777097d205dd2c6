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

//! Custom requests understood by the Poryscript editor extension.
//!
//! The VS Code extension answers these on behalf of the server, which lets it
//! read files the server cannot reach itself (remote workspaces, virtual
//! filesystems). The workspace provider only sends them after a local read
//! has failed.

use tower_lsp::lsp_types::request::Request;

/// Read a document by URI from the client's filesystem.
#[derive(Debug)]
pub enum ReadFs {}

impl Request for ReadFs {
    type Params = String;
    type Result = String;
    const METHOD: &'static str = "poryscript/readfs";
}

/// Read a project-relative include file.
#[derive(Debug)]
pub enum ReadFile {}

impl Request for ReadFile {
    type Params = String;
    type Result = String;
    const METHOD: &'static str = "poryscript/readfile";
}

/// Resolve a project-relative include file to its URI.
#[derive(Debug)]
pub enum GetFileUri {}

impl Request for GetFileUri {
    type Params = String;
    type Result = String;
    const METHOD: &'static str = "poryscript/getfileuri";
}

/// List the filesystem paths of every Poryscript file in the workspace.
#[derive(Debug)]
pub enum GetPoryscriptFiles {}

impl Request for GetPoryscriptFiles {
    type Params = ();
    type Result = Vec<String>;
    const METHOD: &'static str = "poryscript/getPoryscriptFiles";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_names() {
        assert_eq!(ReadFs::METHOD, "poryscript/readfs");
        assert_eq!(ReadFile::METHOD, "poryscript/readfile");
        assert_eq!(GetFileUri::METHOD, "poryscript/getfileuri");
        assert_eq!(GetPoryscriptFiles::METHOD, "poryscript/getPoryscriptFiles");
    }
}
