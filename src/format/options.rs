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

/// Spaces per indentation level.
pub const DEFAULT_INDENT: usize = 4;
/// Line width hint.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 80;

/// Layout settings for one format call.
///
/// `max_line_length` is carried for alternative styles; the multi-line
/// layout rules break lines by operator, not by width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "ser", serde(default, rename_all = "camelCase"))]
pub struct FormatOptions {
    pub indent: usize,
    pub max_line_length: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

impl FormatOptions {
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    /// leading whitespace of a line at `depth`
    pub(crate) fn indentation(&self, depth: usize) -> String {
        " ".repeat(depth * self.indent)
    }
}
