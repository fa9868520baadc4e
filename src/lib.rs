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

//! # PromQL Formatter
//!
//! Normalizes and pretty-prints PromQL queries. Awkwardly written queries,
//! including dashboard queries with template variables such as `$service` or
//! `$__interval` and with `offset` clauses placed after a grouping clause,
//! come out in a canonical multi-line layout.
//!
//! ## Example
//!
//! The entry point is [`format_query()`], which takes a string slice of PromQL
//! and returns the formatted query, or an error when the formatted output
//! would no longer parse. Queries the parser cannot handle are returned
//! unchanged.
//!
//! ``` rust
//! let promql = r#"sum by (region) (rate(m{s="x"}[1m])) offset 1d"#;
//!
//! match promql_formatter::format_query(promql) {
//!     Ok(formatted) => println!("{formatted}"),
//!     Err(err) => println!("Err: {err}"),
//! }
//! ```
//!
//! or run the demo in this repo:
//!
//! ``` shell
//! cargo run --example format
//! ```
//!
//! ## Pipeline
//!
//! 1. [`rewrite::reposition`] moves misplaced `offset` clauses into the range
//!    selector.
//! 2. [`rewrite::substitute`] replaces template variables with parseable
//!    placeholders.
//! 3. The query is parsed with [`promql_parser`].
//! 4. [`format::is_simple`] picks the single-line rendering of [`render`] or
//!    the multi-line layout of [`format::Pretty`].
//! 5. [`rewrite::restore`] puts the variables back and
//!    [`format::round_trip`] checks the result still parses.

pub mod format;
pub mod label;
pub mod render;
pub mod rewrite;
pub mod util;

pub use format::{format_query, FormatError, FormatOptions, Formatter};
