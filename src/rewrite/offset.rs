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
use regex::{Captures, Regex};

lazy_static! {
    /// `op(func(selector[range])) by (labels) offset dur`, one level of nesting.
    static ref TRAILING_GROUPING_OFFSET_RE: Regex = Regex::new(
        r"(?x)
(?P<op>[a-zA-Z_][a-zA-Z0-9_]*)
\(
(?P<inner>[^()]+\([^()]+\[[^\]]+\](?:\s*\)+))
\)
\s+(?P<how>by|without)\s+\((?P<labels>[^)]+)\)
\s+offset\s+(?P<offset>[a-zA-Z0-9_$][a-zA-Z0-9_$]*)",
    )
    .unwrap();

    /// the last range bracket of an argument, with the parens closing after it
    static ref LAST_RANGE_RE: Regex =
        Regex::new(r"(?P<range>\[[^\]]+\])\s*(?P<close>\)+)?$").unwrap();

    /// `[range]` closed by parens and followed, possibly after a grouping
    /// clause, by `offset dur`.
    static ref TRAILING_OFFSET_RE: Regex = Regex::new(
        r"(?x)
(?:(?P<op>[a-zA-Z_][a-zA-Z0-9_]*)\()?
(?P<selector>[^{(]*\{[^}]*\})?
(?P<range>\[[^\]]+\])
(?P<close>\)+)
(?P<grouping>\s+(?:by|without)\s+\([^)]+\))?
\s+offset\s+(?P<offset>[a-zA-Z0-9_$][a-zA-Z0-9_$]*)",
    )
    .unwrap();
}

/// Moves `offset <duration>` clauses written after a closing parenthesis
/// group into the innermost range selector, where the grammar expects them.
///
/// Both rewrites are regular-expression heuristics: only one level of
/// nested calls is understood. Text without a misplaced offset is returned
/// unchanged.
///
/// ```
/// use promql_formatter::rewrite::reposition;
///
/// assert_eq!(
///     reposition(r#"sum by (region) (rate(m{s="x"}[1m])) offset 1d"#),
///     r#"sum by (region) (rate(m{s="x"}[1m] offset 1d))"#,
/// );
/// ```
pub fn reposition(query: &str) -> String {
    let query = TRAILING_GROUPING_OFFSET_RE.replace_all(query, |caps: &Captures| {
        let offset = &caps["offset"];
        let inner = LAST_RANGE_RE.replace(&caps["inner"], |range: &Captures| {
            format!(
                "{} offset {offset}{}",
                &range["range"],
                range.name("close").map_or("", |m| m.as_str())
            )
        });
        format!("{} {} ({}) ({inner})", &caps["op"], &caps["how"], &caps["labels"])
    });

    TRAILING_OFFSET_RE
        .replace_all(&query, |caps: &Captures| {
            let mut res = String::new();
            if let Some(op) = caps.name("op") {
                res.push_str(op.as_str());
                res.push('(');
            }
            if let Some(selector) = caps.name("selector") {
                res.push_str(selector.as_str());
            }
            res.push_str(&caps["range"]);
            res.push_str(" offset ");
            res.push_str(&caps["offset"]);
            res.push_str(&caps["close"]);
            if let Some(grouping) = caps.name("grouping") {
                res.push_str(grouping.as_str());
            }
            res
        })
        .into_owned()
}
