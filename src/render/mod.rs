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

//! Canonical single-line rendering of PromQL expressions.
//!
//! This is the default stringification used for every node the multi-line
//! formatter does not lay out itself: selectors and literals always, and
//! whole expressions the layout classifier considers simple.

use std::time::{SystemTime, UNIX_EPOCH};

use promql_parser::parser::{
    AggregateExpr, AtModifier, BinModifier, BinaryExpr, Call, Expr, LabelModifier,
    MatrixSelector, Offset, SubqueryExpr, VectorMatchCardinality, VectorSelector,
};

use crate::label::{display_selector, join_labels};
use crate::util::{display_duration, display_number, quote_string};

/// Renders `expr` on a single line.
///
/// ```
/// use promql_formatter::render;
///
/// let expr = promql_parser::parser::parse(r#"sum(rate(m{b="2",a="1"}[5m])) by (job)"#).unwrap();
/// assert_eq!(render::expr(&expr), r#"sum by (job) (rate(m{a="1",b="2"}[5m]))"#);
/// ```
pub fn expr(expr: &Expr) -> String {
    match expr {
        Expr::Aggregate(agg) => aggregate(agg, &self::expr(&agg.expr)),
        Expr::Unary(unary) => format!("-{}", self::expr(&unary.expr)),
        Expr::Binary(binary) => binary_line(binary),
        Expr::Paren(paren) => format!("({})", self::expr(&paren.expr)),
        Expr::Subquery(subquery) => self::subquery(subquery),
        Expr::NumberLiteral(lit) => display_number(lit.val),
        Expr::StringLiteral(lit) => quote_string(&lit.val),
        Expr::VectorSelector(vs) => vector_selector(vs),
        Expr::MatrixSelector(ms) => matrix_selector(ms),
        Expr::Call(call) => self::call(call, self::expr),
        #[allow(unreachable_patterns)]
        other => other.to_string(),
    }
}

/// `<op> by (<labels>) ([<param>, ]<inner>)` with an already rendered inner
/// expression. Without a grouping clause the form is `<op>([<param>, ]<inner>)`.
pub(crate) fn aggregate(agg: &AggregateExpr, inner: &str) -> String {
    let mut out = agg.op.to_string();
    if let Some(modifier) = &agg.modifier {
        out.push(' ');
        out.push_str(&grouping(modifier));
        out.push(' ');
    }
    out.push('(');
    if let Some(param) = &agg.param {
        out.push_str(&self::expr(param));
        out.push_str(", ");
    }
    out.push_str(inner);
    out.push(')');
    out
}

/// `by (a, b)` or `without (a, b)`, labels in source order.
pub(crate) fn grouping(modifier: &LabelModifier) -> String {
    match modifier {
        LabelModifier::Include(labels) => format!("by ({})", join_labels(&labels.labels)),
        LabelModifier::Exclude(labels) => format!("without ({})", join_labels(&labels.labels)),
    }
}

/// `name(arg0, arg1, ...)`, each argument rendered by `arg`.
pub(crate) fn call<F>(call: &Call, arg: F) -> String
where
    F: Fn(&Expr) -> String,
{
    let args = call
        .args
        .args
        .iter()
        .map(|a| arg(&**a))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}({args})", call.func.name)
}

/// `on(a, b)` or `ignoring(a, b)`. `ignoring()` matches like no clause at
/// all and is skipped.
pub(crate) fn vector_matching(modifier: &BinModifier) -> Option<String> {
    match modifier.matching.as_ref()? {
        LabelModifier::Include(labels) => Some(format!("on({})", join_labels(&labels.labels))),
        LabelModifier::Exclude(labels) if labels.labels.is_empty() => None,
        LabelModifier::Exclude(labels) => {
            Some(format!("ignoring({})", join_labels(&labels.labels)))
        }
    }
}

fn group_modifier(card: &VectorMatchCardinality) -> Option<String> {
    let (keyword, labels) = match card {
        VectorMatchCardinality::ManyToOne(labels) => ("group_left", labels),
        VectorMatchCardinality::OneToMany(labels) => ("group_right", labels),
        _ => return None,
    };
    if labels.labels.is_empty() {
        Some(keyword.to_string())
    } else {
        Some(format!("{keyword}({})", join_labels(&labels.labels)))
    }
}

/// The operator token of a binary expression followed by every modifier:
/// `bool`, the vector matching clause and `group_left`/`group_right`.
pub(crate) fn binary_operator(binary: &BinaryExpr, with_matching: bool) -> String {
    let mut op = binary.op.to_string();
    if let Some(modifier) = &binary.modifier {
        if modifier.return_bool {
            op.push_str(" bool");
        }
        if with_matching {
            if let Some(matching) = vector_matching(modifier) {
                op.push(' ');
                op.push_str(&matching);
            }
        }
        if let Some(group) = group_modifier(&modifier.card) {
            op.push(' ');
            op.push_str(&group);
        }
    }
    op
}

fn binary_line(binary: &BinaryExpr) -> String {
    format!(
        "{} {} {}",
        self::expr(&binary.lhs),
        binary_operator(binary, true),
        self::expr(&binary.rhs)
    )
}

fn at_modifier(at: &AtModifier) -> String {
    match at {
        AtModifier::Start => "@ start()".into(),
        AtModifier::End => "@ end()".into(),
        AtModifier::At(time) => format!("@ {:.3}", unix_secs(time)),
    }
}

fn unix_secs(time: &SystemTime) -> f64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => after.as_secs_f64(),
        Err(before) => -before.duration().as_secs_f64(),
    }
}

fn offset(offset: &Offset) -> String {
    match offset {
        Offset::Pos(d) => format!("offset {}", display_duration(d)),
        Offset::Neg(d) => format!("offset -{}", display_duration(d)),
    }
}

fn modifiers(at: &Option<AtModifier>, off: &Option<Offset>) -> String {
    let mut out = String::new();
    if let Some(at) = at {
        out.push(' ');
        out.push_str(&at_modifier(at));
    }
    if let Some(off) = off {
        out.push(' ');
        out.push_str(&offset(off));
    }
    out
}

// name and matchers only, modifiers are placed by the caller
fn selector_body(vs: &VectorSelector) -> String {
    display_selector(vs.name.as_deref(), &vs.matchers)
}

fn vector_selector(vs: &VectorSelector) -> String {
    format!("{}{}", selector_body(vs), modifiers(&vs.at, &vs.offset))
}

fn matrix_selector(ms: &MatrixSelector) -> String {
    format!(
        "{}[{}]{}",
        selector_body(&ms.vs),
        display_duration(&ms.range),
        modifiers(&ms.vs.at, &ms.vs.offset)
    )
}

fn subquery(sq: &SubqueryExpr) -> String {
    let step = sq.step.as_ref().map(display_duration).unwrap_or_default();
    format!(
        "{}[{}:{}]{}",
        self::expr(&sq.expr),
        display_duration(&sq.range),
        step,
        modifiers(&sq.at, &sq.offset)
    )
}
