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

use promql_parser::parser;
use tracing::warn;

use crate::format::FormatError;
use crate::rewrite::substitute;

/// A grammar check run on formatted output.
pub trait Validator {
    fn validate(&self, query: &str) -> Result<(), String>;
}

impl<F> Validator for F
where
    F: Fn(&str) -> Result<(), String>,
{
    fn validate(&self, query: &str) -> Result<(), String> {
        self(query)
    }
}

/// Parses the output again from scratch with `promql-parser`.
///
/// This is the same grammar the input was parsed with, so it only rejects
/// output that grammar itself cannot read back. Plug a stricter grammar in
/// through [`Formatter::with_validator`](crate::Formatter::with_validator)
/// to check against another dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParserValidator;

impl Validator for ParserValidator {
    fn validate(&self, query: &str) -> Result<(), String> {
        parser::parse(query).map(|_| ())
    }
}

/// Substitutes placeholders again, with a map of its own, and hands the
/// result to `validator`. `formatted` is the text with variables restored.
pub fn round_trip(formatted: &str, validator: &dyn Validator) -> Result<(), FormatError> {
    let (query, _) = substitute(formatted);
    validator.validate(&query).map_err(|reason| {
        warn!(%reason, formatted, "formatted query failed validation");
        FormatError::Validation {
            formatted: formatted.to_string(),
            reason,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_accepts_valid_output() {
        let cases = vec![
            "up",
            "a\n/\nb",
            "(\n    a\n    -\nb\n)",
            r#"sum by (region) (rate(m{service="$service"}[1m] offset 1d))"#,
        ];
        for case in cases {
            assert_eq!(Ok(()), round_trip(case, &ParserValidator), "<{case:?}>");
        }
    }

    #[test]
    fn test_round_trip_rejects_invalid_output() {
        let formatted = "sum(rate(m[5m]";
        match round_trip(formatted, &ParserValidator) {
            Err(FormatError::Validation { formatted: got, reason }) => {
                assert_eq!(formatted, got);
                assert!(!reason.is_empty());
            }
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_parser_validator_agrees_with_parser() {
        let cases = vec![
            "up",
            r#"sum by ("foo.bar") (m)"#,
            "sum by (foo.bar) (m)",
            r#"m{"service.name"="api"}"#,
            "m{service.name=\"api\"}",
            "a / on(x.y) b",
        ];
        for case in cases {
            assert_eq!(
                parser::parse(case).is_ok(),
                ParserValidator.validate(case).is_ok(),
                "<{case:?}>"
            );
        }
    }

    #[test]
    fn test_round_trip_sees_substituted_text() {
        let seen = std::cell::RefCell::new(String::new());
        let validator = |query: &str| -> Result<(), String> {
            *seen.borrow_mut() = query.to_string();
            Ok(())
        };
        round_trip(r#"m{a="$x"}"#, &validator).unwrap();
        assert_eq!(r#"m{a="VAR0"}"#, seen.borrow().as_str());
    }

    #[test]
    fn test_error_message() {
        let reject = |_: &str| -> Result<(), String> { Err("unexpected end of input".into()) };
        let err = round_trip("a +", &reject).unwrap_err();
        assert_eq!(
            "formatted query is invalid: unexpected end of input",
            err.to_string()
        );
        assert_eq!("a +", err.formatted());
    }
}
