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

//! Internal utilities for strings.

use std::fmt::Write;

/// Wraps an unescaped string value in double quotes, escaping it so that the
/// PromQL lexer unquotes it back to the same value. This is the inverse of
/// the parser's unquoting of `"..."` literals.
pub fn quote_string(s: &str) -> String {
    let mut res = String::with_capacity(s.len() + 2);
    res.push('"');
    for c in s.chars() {
        match c {
            '"' => res.push_str("\\\""),
            '\\' => res.push_str("\\\\"),
            '\n' => res.push_str("\\n"),
            '\r' => res.push_str("\\r"),
            '\t' => res.push_str("\\t"),
            '\x07' => res.push_str("\\a"),
            '\x08' => res.push_str("\\b"),
            '\x0b' => res.push_str("\\v"),
            '\x0c' => res.push_str("\\f"),
            c if c.is_control() => {
                // writing into a String never fails
                let _ = write!(res, "\\u{:04x}", c as u32);
            }
            c => res.push(c),
        }
    }
    res.push('"');
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_string_basic() {
        assert_eq!(quote_string("hello"), r#""hello""#);
        assert_eq!(quote_string(""), r#""""#);
        assert_eq!(quote_string("☺ unicode"), "\"☺ unicode\"");
    }

    #[test]
    fn test_quote_string_escapes() {
        let cases = vec![
            (r#"say "hi""#, r#""say \"hi\"""#),
            (r"a\.b", r#""a\\.b""#),
            ("line\nbreak", r#""line\nbreak""#),
            ("tab\there", r#""tab\there""#),
            ("bell\x07", r#""bell\a""#),
            ("nul\x00", r#""nul\u0000""#),
            ("single ' quote", r#""single ' quote""#),
        ];

        for (input, expected) in cases {
            assert_eq!(expected, quote_string(input), "quoting {input:?}");
        }
    }
}
