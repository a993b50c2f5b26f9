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

//! Factories and builders for PromQL expressions.
//!
//! Expressions start from the free functions here ([`metric`], [`sum`],
//! [`rate`], ...) and grow by chaining; [`VectorOps`] adds the binary
//! operators to every vector-valued value. Rendering happens through
//! [`std::fmt::Display`] on the finished [`Expr`].

mod aggregate;
mod ast;
mod binary;
mod function;
mod ops;

pub use aggregate::{AggregateExpr, AggregateModifier};
pub use ast::{
    BinaryExpr, Expr, GroupModifier, MatrixExpr, NumberLiteral, ParenExpr, RangeLiteral,
    StringLiteral, VectorMatching, VectorSelector,
};
pub use binary::{BinaryBuilder, MatchingBuilder, VectorOps};
pub use function::{get_function, Call, Function, FunctionArgs, ValueType};
pub use ops::{AggregateOp, BinaryOp, GroupSide, MatchingOp, SortDirection};

/// Starts a selector for the given metric name, with no label filters.
pub fn metric(name: impl Into<String>) -> VectorSelector {
    VectorSelector::new(name)
}

/// Wraps the expression in parentheses to force grouping in the output.
pub fn parenthesis(expr: impl Into<Expr>) -> Expr {
    Expr::new_paren_expr(expr.into())
}

/// Annotates a vector expression with a time window: `expr[range]`.
///
/// The range may be raw text (`"5m"`, `"$__rate_interval"` — passed through
/// verbatim) or a [`std::time::Duration`].
pub fn with_range(expr: impl Into<Expr>, range: impl Into<RangeLiteral>) -> Expr {
    Expr::new_matrix_expr(expr.into(), range)
}

/// `sum(expr)`
pub fn sum(expr: impl Into<Expr>) -> AggregateExpr {
    AggregateExpr::new(AggregateOp::Sum, expr)
}

/// `avg(expr)`
pub fn avg(expr: impl Into<Expr>) -> AggregateExpr {
    AggregateExpr::new(AggregateOp::Avg, expr)
}

/// `max(expr)`
pub fn max(expr: impl Into<Expr>) -> AggregateExpr {
    AggregateExpr::new(AggregateOp::Max, expr)
}

/// `group(expr)`
pub fn group(expr: impl Into<Expr>) -> AggregateExpr {
    AggregateExpr::new(AggregateOp::Group, expr)
}

/// `count(expr)`
pub fn count(expr: impl Into<Expr>) -> AggregateExpr {
    AggregateExpr::new(AggregateOp::Count, expr)
}

/// `rate(range_expr)` — the argument is expected to be a range vector, most
/// often built with [`with_range`].
pub fn rate(range: impl Into<Expr>) -> Call {
    Call::new("rate", FunctionArgs::new_args(range))
}

/// `present_over_time(range_expr)`
pub fn present_over_time(range: impl Into<Expr>) -> Call {
    Call::new("present_over_time", FunctionArgs::new_args(range))
}

/// `sort(expr)` or `sort_desc(expr)` depending on the direction.
pub fn sort(direction: SortDirection, expr: impl Into<Expr>) -> Call {
    Call::new(direction.func_name(), FunctionArgs::new_args(expr))
}

/// `label_replace(expr, "dst_label", "replacement", "src_label", "regex")`
///
/// Parameters follow Prometheus's own argument order, so what is named is
/// exactly what is emitted.
pub fn label_replace(
    expr: impl Into<Expr>,
    dst_label: impl Into<String>,
    replacement: impl Into<String>,
    src_label: impl Into<String>,
    regex: impl Into<String>,
) -> Call {
    Call::new(
        "label_replace",
        FunctionArgs::new_args(expr)
            .append_args(dst_label.into())
            .append_args(replacement.into())
            .append_args(src_label.into())
            .append_args(regex.into()),
    )
}

/// Builds a call to any function in the signature registry, validating the
/// name, argument count and argument value types. Prefer the named factories
/// for the common functions; this is the escape hatch for the rest of the
/// built-in table.
pub fn call(name: &str, args: FunctionArgs) -> Result<Expr, String> {
    let func =
        get_function(name).ok_or_else(|| format!("unknown function with name {name:?}"))?;
    function::validate_call(func, &args)?;
    Ok(Expr::Call(Call::new(func.name, args)))
}
