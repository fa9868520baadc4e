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

use promql_parser::parser::token::{T_DIV, T_EQLC, T_GTE, T_GTR, T_LAND, T_LOR, T_LSS, T_LTE, T_NEQ, T_SUB};
use promql_parser::parser::{BinaryExpr, Expr};

use crate::format::FormatOptions;
use crate::render;

/// Multi-line layout of an expression tree.
///
/// Depth grows by one inside parentheses and inside call arguments; binary
/// operands stay at the depth of their operator.
#[derive(Debug, Clone, Copy)]
pub struct Pretty<'a> {
    options: &'a FormatOptions,
}

impl<'a> Pretty<'a> {
    pub fn new(options: &'a FormatOptions) -> Self {
        Self { options }
    }

    pub fn format(&self, expr: &Expr, depth: usize) -> String {
        match expr {
            Expr::Binary(binary) => self.binary(binary, depth),
            Expr::Paren(paren) => format!(
                "(\n{}{}\n{})",
                self.options.indentation(depth + 1),
                self.format(&paren.expr, depth + 1),
                self.options.indentation(depth)
            ),
            Expr::Aggregate(agg) => render::aggregate(agg, &self.format(&agg.expr, depth)),
            Expr::Call(call) => render::call(call, |arg| self.format(arg, depth + 1)),
            other => render::expr(other),
        }
    }

    fn binary(&self, binary: &BinaryExpr, depth: usize) -> String {
        let lhs = self.format(&binary.lhs, depth);
        let rhs = self.format(&binary.rhs, depth);
        let indent = self.options.indentation(depth);

        match binary.op.id() {
            T_LAND | T_LOR => {
                let op = render::binary_operator(binary, false);
                let matching = binary
                    .modifier
                    .as_ref()
                    .and_then(render::vector_matching)
                    .map(|m| format!("\n\n{m}"))
                    .unwrap_or_default();
                format!("{lhs}\n\n{op}{matching}\n\n{rhs}")
            }
            T_DIV | T_SUB => {
                let op = render::binary_operator(binary, true);
                format!("{lhs}\n{indent}{op}\n{rhs}")
            }
            T_EQLC | T_NEQ | T_GTR | T_LSS | T_GTE | T_LTE => {
                let op = render::binary_operator(binary, true);
                format!("{lhs}\n{indent}{op} {rhs}")
            }
            _ => format!("{lhs} {} {rhs}", render::binary_operator(binary, true)),
        }
    }
}
