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

use lazy_static::lazy_static;
use regex::Regex;

mod matcher;

pub use matcher::{display_matcher, display_matchers, display_selector};

use crate::util::quote_string;

lazy_static! {
    static ref LABEL_NAME_RE: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap();
    static ref METRIC_NAME_RE: Regex = Regex::new(r"^[a-zA-Z_:][a-zA-Z0-9_:]*$").unwrap();
}

/// A label name as the lexer reads it back: bare when it is a plain
/// identifier, double quoted otherwise (`"service.name"`).
pub fn display_label(name: &str) -> String {
    if LABEL_NAME_RE.is_match(name) {
        name.to_string()
    } else {
        quote_string(name)
    }
}

/// Whether `name` can be written in front of the `{...}` block unquoted.
pub fn is_bare_metric_name(name: &str) -> bool {
    METRIC_NAME_RE.is_match(name)
}

/// join label names the way grouping and matching clauses print them.
pub fn join_labels(labels: &[String]) -> String {
    labels
        .iter()
        .map(|l| display_label(l))
        .collect::<Vec<_>>()
        .join(", ")
}
