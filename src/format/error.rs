// Copyright 2023 Greptime Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use thiserror::Error;

/// Failures of a format call.
///
/// A query the parser rejects is not an error: it is passed through
/// unchanged, since templated or partial queries are expected input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The formatted text no longer parses.
    #[error("formatted query is invalid: {reason}")]
    Validation { formatted: String, reason: String },
}

impl FormatError {
    /// The output that failed validation, for diagnosis.
    pub fn formatted(&self) -> &str {
        match self {
            FormatError::Validation { formatted, .. } => formatted,
        }
    }
}
