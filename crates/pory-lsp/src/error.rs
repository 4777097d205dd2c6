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

//! Error types for the fact cache and its collaborators.

use thiserror::Error;

/// Errors raised while fetching content or settings for a resource.
///
/// None of these are fatal. Aggregating operations log them and skip the
/// failing input; only a failure to read the requested document itself
/// reaches the request boundary.
#[derive(Error, Debug)]
pub enum FactError {
    /// No content source could supply the resource.
    #[error("content unavailable for {resource}: {reason}")]
    ContentUnavailable { resource: String, reason: String },

    /// The resource was located but reading it failed.
    #[error("failed to read {resource}: {source}")]
    Io {
        resource: String,
        #[source]
        source: std::io::Error,
    },

    /// The client did not answer a configuration request usefully.
    #[error("settings unavailable for {resource}: {reason}")]
    SettingsUnavailable { resource: String, reason: String },

    /// Client settings did not have the expected shape.
    #[error("invalid settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for fact operations.
pub type FactResult<T> = Result<T, FactError>;

impl FactError {
    pub fn content_unavailable(resource: impl Into<String>, reason: impl ToString) -> Self {
        FactError::ContentUnavailable {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<FactError> for tower_lsp::jsonrpc::Error {
    fn from(err: FactError) -> Self {
        let mut error = tower_lsp::jsonrpc::Error::internal_error();
        error.message = err.to_string().into();
        error
    }
}
