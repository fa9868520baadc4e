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

use promql_parser::label::{MatchOp, Matcher, Matchers, METRIC_NAME};

use crate::label::{display_label, is_bare_metric_name};
use crate::util::quote_string;

/// `name<op>"value"`, with the value re-quoted and the name quoted when it
/// is not a plain identifier.
pub fn display_matcher(matcher: &Matcher) -> String {
    format!(
        "{}{}{}",
        display_label(&matcher.name),
        matcher.op,
        quote_string(&matcher.value)
    )
}

fn op_rank(op: &MatchOp) -> u8 {
    match op {
        MatchOp::Equal => 0,
        MatchOp::NotEqual => 1,
        MatchOp::Re(_) => 2,
        MatchOp::NotRe(_) => 3,
    }
}

// the `__name__="foo"` matcher of `foo{...}` is already printed as the metric name
fn is_name_matcher(matcher: &Matcher, metric_name: Option<&str>) -> bool {
    matcher.name == METRIC_NAME
        && matches!(matcher.op, MatchOp::Equal)
        && metric_name == Some(matcher.value.as_str())
}

fn display_group(group: &[Matcher], metric_name: Option<&str>) -> String {
    let mut group: Vec<&Matcher> = group
        .iter()
        .filter(|m| !is_name_matcher(m, metric_name))
        .collect();
    group.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| op_rank(&a.op).cmp(&op_rank(&b.op)))
            .then_with(|| a.value.cmp(&b.value))
    });
    group
        .into_iter()
        .map(display_matcher)
        .collect::<Vec<_>>()
        .join(",")
}

fn display_groups(matchers: &Matchers, metric_name: Option<&str>) -> Vec<String> {
    let mut groups: Vec<&[Matcher]> = Vec::with_capacity(matchers.or_matchers.len() + 1);
    if !matchers.matchers.is_empty() {
        groups.push(&matchers.matchers);
    }
    groups.extend(matchers.or_matchers.iter().map(|g| g.as_slice()));

    groups
        .into_iter()
        .map(|g| display_group(g, metric_name))
        .filter(|g| !g.is_empty())
        .collect()
}

/// Renders the `{...}` part of a vector selector in canonical form: matchers
/// sorted by label name, `,` separated, `or` groups joined by ` or `.
/// Returns an empty string when nothing but the metric name is matched.
pub fn display_matchers(matchers: &Matchers, metric_name: Option<&str>) -> String {
    let rendered = display_groups(matchers, metric_name);
    if rendered.is_empty() {
        String::new()
    } else {
        format!("{{{}}}", rendered.join(" or "))
    }
}

/// A whole selector without modifiers. A metric name that is not a plain
/// identifier moves inside the braces as a quoted string: `{"http.requests",job="api"}`.
pub fn display_selector(metric_name: Option<&str>, matchers: &Matchers) -> String {
    match metric_name {
        None => display_matchers(matchers, None),
        Some(name) if is_bare_metric_name(name) => {
            format!("{name}{}", display_matchers(matchers, Some(name)))
        }
        Some(name) => {
            let mut parts = vec![quote_string(name)];
            parts.push(display_groups(matchers, Some(name)).join(" or "));
            parts.retain(|p| !p.is_empty());
            format!("{{{}}}", parts.join(","))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(op: MatchOp, name: &str, value: &str) -> Matcher {
        Matcher {
            op,
            name: name.into(),
            value: value.into(),
        }
    }

    #[test]
    fn test_display_matcher() {
        let cases = vec![
            (matcher(MatchOp::Equal, "job", "api"), r#"job="api""#),
            (matcher(MatchOp::NotEqual, "env", "dev"), r#"env!="dev""#),
            (matcher(MatchOp::Equal, "path", r#"a"b"#), r#"path="a\"b""#),
        ];

        for (m, expected) in cases {
            assert_eq!(expected, display_matcher(&m));
        }
    }

    #[test]
    fn test_display_matchers_sorted_by_name() {
        let matchers = Matchers {
            matchers: vec![
                matcher(MatchOp::Equal, "service", "example-service"),
                matcher(MatchOp::Equal, "env", "live"),
                matcher(MatchOp::NotEqual, "event_code", "7"),
            ],
            or_matchers: vec![],
        };
        assert_eq!(
            r#"{env="live",event_code!="7",service="example-service"}"#,
            display_matchers(&matchers, None)
        );
    }

    #[test]
    fn test_display_matchers_skips_metric_name() {
        let matchers = Matchers {
            matchers: vec![
                matcher(MatchOp::Equal, METRIC_NAME, "up"),
                matcher(MatchOp::Equal, "job", "node"),
            ],
            or_matchers: vec![],
        };
        assert_eq!(r#"{job="node"}"#, display_matchers(&matchers, Some("up")));

        let only_name = Matchers {
            matchers: vec![matcher(MatchOp::Equal, METRIC_NAME, "up")],
            or_matchers: vec![],
        };
        assert_eq!("", display_matchers(&only_name, Some("up")));
        assert_eq!(
            r#"{__name__="up"}"#,
            display_matchers(&only_name, None),
            "a bare __name__ matcher is kept when there is no metric name"
        );
    }

    #[test]
    fn test_display_quoted_names() {
        let matchers = Matchers {
            matchers: vec![
                matcher(MatchOp::Equal, "service.name", "api"),
                matcher(MatchOp::NotEqual, "env", "dev"),
            ],
            or_matchers: vec![],
        };
        assert_eq!(
            r#"{env!="dev","service.name"="api"}"#,
            display_matchers(&matchers, None)
        );
        assert_eq!(
            r#"m{env!="dev","service.name"="api"}"#,
            display_selector(Some("m"), &matchers)
        );
    }

    #[test]
    fn test_display_selector_with_quoted_metric_name() {
        let matchers = Matchers {
            matchers: vec![
                matcher(MatchOp::Equal, METRIC_NAME, "http.requests"),
                matcher(MatchOp::Equal, "job", "api"),
            ],
            or_matchers: vec![],
        };
        assert_eq!(
            r#"{"http.requests",job="api"}"#,
            display_selector(Some("http.requests"), &matchers)
        );

        let only_name = Matchers {
            matchers: vec![matcher(MatchOp::Equal, METRIC_NAME, "http.requests")],
            or_matchers: vec![],
        };
        assert_eq!(
            r#"{"http.requests"}"#,
            display_selector(Some("http.requests"), &only_name)
        );

        let empty = Matchers {
            matchers: vec![],
            or_matchers: vec![],
        };
        assert_eq!("up", display_selector(Some("up"), &empty));
    }

    #[test]
    fn test_display_or_matchers() {
        let matchers = Matchers {
            matchers: vec![],
            or_matchers: vec![
                vec![matcher(MatchOp::Equal, "b", "2"), matcher(MatchOp::Equal, "a", "1")],
                vec![matcher(MatchOp::Equal, "c", "3")],
            ],
        };
        assert_eq!(
            r#"{a="1",b="2" or c="3"}"#,
            display_matchers(&matchers, None)
        );
    }
}
