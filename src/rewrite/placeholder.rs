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
    /// `$name` and `$__name` dashboard variables.
    static ref VARIABLE_RE: Regex = Regex::new(r"\$(?:__)?[a-zA-Z0-9_]+").unwrap();
}

const PLACEHOLDER_PREFIX: &str = "VAR";

/// Placeholders handed out by one [`substitute`] call, keyed `<prefix><n>` with
/// `n` counting up from 0 in the order the variables appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMap {
    prefix: String,
    variables: Vec<String>,
}

impl PlaceholderMap {
    fn new(text: &str) -> Self {
        // the prefix must not occur in user text, so restoring never touches it
        let mut prefix = PLACEHOLDER_PREFIX.to_string();
        while text.contains(&prefix) {
            prefix.push('_');
        }
        Self {
            prefix,
            variables: vec![],
        }
    }

    fn insert(&mut self, variable: &str) -> String {
        let placeholder = format!("{}{}", self.prefix, self.variables.len());
        self.variables.push(variable.to_string());
        placeholder
    }

    /// The original variable text a placeholder stands for.
    pub fn get(&self, placeholder: &str) -> Option<&str> {
        let index: usize = placeholder.strip_prefix(&self.prefix)?.parse().ok()?;
        self.variables.get(index).map(String::as_str)
    }

    /// Every `(placeholder, variable)` pair in substitution order.
    pub fn iter(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        self.variables
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("{}{i}", self.prefix), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// Replaces every template variable occurrence, repeats included, with a
/// fresh identifier the PromQL parser accepts.
///
/// ```
/// use promql_formatter::rewrite::{restore, substitute};
///
/// let (text, map) = substitute(r#"rate(m{svc="$service"}[5m])"#);
/// assert_eq!(text, r#"rate(m{svc="VAR0"}[5m])"#);
/// assert_eq!(restore(&text, &map), r#"rate(m{svc="$service"}[5m])"#);
/// ```
pub fn substitute(text: &str) -> (String, PlaceholderMap) {
    let mut map = PlaceholderMap::new(text);
    let replaced = VARIABLE_RE
        .replace_all(text, |caps: &Captures| map.insert(&caps[0]))
        .into_owned();
    (replaced, map)
}

/// Puts the original variables back in a single left-to-right pass.
/// Restored text is never rescanned, and the longest run of digits after the
/// prefix decides the placeholder, so `VAR1` never matches inside `VAR10`.
pub fn restore(text: &str, map: &PlaceholderMap) -> String {
    if map.is_empty() {
        return text.to_string();
    }

    let mut res = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(&map.prefix) {
        let (head, tail) = rest.split_at(pos);
        res.push_str(head);

        let after_prefix = &tail[map.prefix.len()..];
        let digits = after_prefix
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(after_prefix.len());
        let token_len = map.prefix.len() + digits;

        match map.get(&tail[..token_len]) {
            Some(variable) => res.push_str(variable),
            None => res.push_str(&tail[..token_len]),
        }
        rest = &tail[token_len..];
    }
    res.push_str(rest);
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_every_occurrence() {
        let (text, map) = substitute("rate(m{a=\"$x\", b=\"$x\"}[$__interval])");
        assert_eq!(text, "rate(m{a=\"VAR0\", b=\"VAR1\"}[VAR2])");
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("VAR0"), Some("$x"));
        assert_eq!(map.get("VAR1"), Some("$x"));
        assert_eq!(map.get("VAR2"), Some("$__interval"));
        assert_eq!(map.get("VAR3"), None);
        assert_eq!(
            map.iter().collect::<Vec<_>>(),
            vec![
                ("VAR0".to_string(), "$x"),
                ("VAR1".to_string(), "$x"),
                ("VAR2".to_string(), "$__interval"),
            ]
        );
    }

    #[test]
    fn test_substitute_without_variables() {
        let (text, map) = substitute("sum(rate(http_requests_total[5m]))");
        assert_eq!(text, "sum(rate(http_requests_total[5m]))");
        assert!(map.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let cases = vec![
            "",
            "up",
            "$metric",
            r#"sum by (region) (rate(m{service="$service"}[1m])) offset $shift"#,
            "$a $b $c $d $e $f $g $h $i $j $k $l",
            "$__rate_interval$__range",
            "a$ $ $$x",
        ];
        for case in cases {
            let (text, map) = substitute(case);
            assert_eq!(case, restore(&text, &map), "round trip of {case:?}");
        }
    }

    #[test]
    fn test_restore_does_not_split_longer_placeholders() {
        let input = (0..12).map(|i| format!("$v{i}")).collect::<Vec<_>>().join("+");
        let (text, map) = substitute(&input);
        assert!(text.contains("VAR10"));
        assert_eq!(input, restore(&text, &map));
    }

    #[test]
    fn test_prefix_avoids_user_identifiers() {
        let input = r#"VAR0{job="$job"} + VAR_1"#;
        let (text, map) = substitute(input);
        assert_eq!(text, r#"VAR0{job="VAR__0"} + VAR_1"#);
        assert_eq!(map.get("VAR__0"), Some("$job"));
        assert_eq!(input, restore(&text, &map));
    }

    #[test]
    fn test_restore_is_idempotent() {
        let (text, map) = substitute("m{a=\"$x\"}");
        let once = restore(&text, &map);
        assert_eq!(once, restore(&once, &map));
    }
}
