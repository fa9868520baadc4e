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

//! The formatting pipeline: offset repair, placeholder substitution,
//! parsing, layout and round-trip validation.

mod error;
mod layout;
mod options;
mod pretty;
mod validate;

use std::fmt;

use promql_parser::parser::{self, Expr};
use tracing::debug;

use crate::render;
use crate::rewrite::{reposition, restore, substitute};

pub use error::FormatError;
pub use layout::is_simple;
pub use options::{FormatOptions, DEFAULT_INDENT, DEFAULT_MAX_LINE_LENGTH};
pub use pretty::Pretty;
pub use validate::{round_trip, ParserValidator, Validator};

/// Formats PromQL queries with fixed options and a validator.
///
/// Every call owns its own placeholder state, so one `Formatter` can be
/// shared between threads.
pub struct Formatter {
    options: FormatOptions,
    validator: Box<dyn Validator + Send + Sync>,
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatter")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(FormatOptions::default())
    }
}

impl Formatter {
    pub fn new(options: FormatOptions) -> Self {
        Self {
            options,
            validator: Box::new(ParserValidator),
        }
    }

    /// Replaces the grammar the output is checked against.
    pub fn with_validator<V>(mut self, validator: V) -> Self
    where
        V: Validator + Send + Sync + 'static,
    {
        self.validator = Box::new(validator);
        self
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Formats `raw`.
    ///
    /// A query the parser rejects, even after offset repair and placeholder
    /// substitution, is returned exactly as given. An error is only returned
    /// when the formatted text itself fails validation.
    pub fn format_query(&self, raw: &str) -> Result<String, FormatError> {
        let repositioned = reposition(raw);
        if repositioned != raw {
            debug!(query = raw, repositioned = %repositioned, "moved offset into range selector");
        }

        let (substituted, placeholders) = substitute(&repositioned);
        let expr = match parser::parse(&substituted) {
            Ok(expr) => expr,
            Err(reason) => {
                debug!(query = raw, %reason, "query does not parse, passing it through");
                return Ok(raw.to_string());
            }
        };

        let formatted = restore(&self.format_expr(&expr), &placeholders);
        round_trip(&formatted, self.validator.as_ref())?;
        Ok(formatted)
    }

    /// Lays out an already parsed expression, without any text rewriting.
    pub fn format_expr(&self, expr: &Expr) -> String {
        if is_simple(expr) {
            render::expr(expr)
        } else {
            Pretty::new(&self.options).format(expr, 0)
        }
    }
}

/// Formats `raw` with default options, validating the output with
/// `promql-parser`.
///
/// ```
/// let formatted = promql_formatter::format_query("sum(rate(m[1m])) by (region)").unwrap();
/// assert_eq!(formatted, "sum by (region) (rate(m[1m]))");
/// ```
pub fn format_query(raw: &str) -> Result<String, FormatError> {
    Formatter::default().format_query(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_expr_picks_layout() {
        let formatter = Formatter::default();
        let simple = parser::parse("sum(rate(m[1m])) by (a)").unwrap();
        assert_eq!("sum by (a) (rate(m[1m]))", formatter.format_expr(&simple));

        let complex = parser::parse("a / b").unwrap();
        assert_eq!("a\n/\nb", formatter.format_expr(&complex));
    }

    #[test]
    fn test_validator_failure_is_reported() {
        let formatter =
            Formatter::default().with_validator(|_: &str| -> Result<(), String> {
                Err("rejected".into())
            });
        let err = formatter.format_query("a / b").unwrap_err();
        assert_eq!(
            FormatError::Validation {
                formatted: "a\n/\nb".into(),
                reason: "rejected".into(),
            },
            err
        );
    }

    #[test]
    fn test_validator_is_skipped_on_pass_through() {
        let formatter =
            Formatter::default().with_validator(|_: &str| -> Result<(), String> {
                Err("rejected".into())
            });
        assert_eq!(Ok("sum(".to_string()), formatter.format_query("sum("));
    }

    #[test]
    fn test_formatter_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Formatter>();
    }
}
