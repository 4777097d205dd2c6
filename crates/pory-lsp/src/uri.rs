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

//! Resource id normalisation.
//!
//! Editors may send the same document as `file:///a%20b.pory` in one message
//! and `file:///a b.pory` in another. Every cache key goes through
//! [`normalize_resource`] so both spellings land on the same entry.

use tower_lsp::lsp_types::Url;

/// Percent-decode a resource id.
///
/// Ids that do not decode to valid UTF-8 are used as given. `+` is left
/// alone; it is a literal character in URI paths.
pub fn normalize_resource(resource: &str) -> String {
    match urlencoding::decode(resource) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => resource.to_string(),
    }
}

/// Normalised resource id of a protocol URI.
pub fn resource_id(uri: &Url) -> String {
    normalize_resource(uri.as_str())
}

/// Rebuild the URI a resource id was decoded from.
///
/// `file://` ids are split into host and path segments and re-escaped, so a
/// segment like `A#1` stays part of the path. Other ids are parsed as given;
/// include paths such as `asm/macros/event.inc` are not URIs and give `None`.
pub fn resource_url(resource: &str) -> Option<Url> {
    let Some(rest) = resource.strip_prefix("file://") else {
        return Url::parse(resource).ok();
    };
    let (host, path) = match rest.find('/') {
        Some(slash) => rest.split_at(slash),
        None => (rest, ""),
    };
    let mut url = Url::parse(&format!("file://{}/", host)).ok()?;
    {
        let mut segments = url.path_segments_mut().ok()?;
        segments.clear();
        segments.extend(path.strip_prefix('/').unwrap_or(path).split('/'));
    }
    Some(url)
}

/// Whether the resource id names a file on disk by URI.
pub fn is_file_uri(resource: &str) -> bool {
    resource.starts_with("file://")
}
