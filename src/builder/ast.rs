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

use std::fmt::{self, Display};
use std::time::Duration;

use crate::builder::aggregate::AggregateExpr;
use crate::builder::function::{Call, ValueType};
use crate::builder::ops::{BinaryOp, GroupSide, MatchingOp};
use crate::label::{MatchOp, Matcher, Matchers};
use crate::util::{display_duration, f64_equals};

/// A metric selector with its label filters.
///
/// `name{label<op>"value",...}` — the braces are omitted while no filter is
/// present. Filters keep their first-insertion position; writing a label
/// again replaces the previous filter in place.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "ser", derive(serde::Serialize))]
pub struct VectorSelector {
    pub name: String,
    pub matchers: Matchers,
}

impl VectorSelector {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            matchers: Matchers::empty(),
        }
    }

    /// Upserts a label filter with an explicit match operator.
    pub fn with_label(
        mut self,
        name: impl Into<String>,
        op: MatchOp,
        value: impl Into<String>,
    ) -> Self {
        self.matchers = self.matchers.append(Matcher::new(op, name, value));
        self
    }

    /// Like [`with_label`](Self::with_label), a no-op when `cond` is false.
    pub fn with_label_if(
        self,
        cond: bool,
        name: impl Into<String>,
        op: MatchOp,
        value: impl Into<String>,
    ) -> Self {
        if cond {
            self.with_label(name, op, value)
        } else {
            self
        }
    }

    pub fn with_label_equals(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_label(name, MatchOp::Equal, value)
    }

    pub fn with_label_equals_if(
        self,
        cond: bool,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.with_label_if(cond, name, MatchOp::Equal, value)
    }

    pub fn with_label_not_equals(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_label(name, MatchOp::NotEqual, value)
    }

    pub fn with_label_not_equals_if(
        self,
        cond: bool,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.with_label_if(cond, name, MatchOp::NotEqual, value)
    }

    pub fn with_label_matches(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_label(name, MatchOp::Re, value)
    }

    pub fn with_label_matches_if(
        self,
        cond: bool,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.with_label_if(cond, name, MatchOp::Re, value)
    }

    pub fn with_label_not_matches(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_label(name, MatchOp::NotRe, value)
    }

    pub fn with_label_not_matches_if(
        self,
        cond: bool,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.with_label_if(cond, name, MatchOp::NotRe, value)
    }

    /// Merges a whole filter set into the selector, external entries
    /// overriding existing ones on conflict.
    pub fn with_labels(mut self, matchers: Matchers) -> Self {
        self.matchers = self.matchers.merge(matchers);
        self
    }
}

impl Display for VectorSelector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.name, self.matchers)
    }
}

/// Vector matching attached to a completed binary operation:
/// `on(l1,l2)` / `ignoring(l1)`, optionally followed by a group modifier.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "ser", derive(serde::Serialize))]
pub struct VectorMatching {
    pub op: MatchingOp,
    pub labels: Vec<String>,
    pub group: Option<GroupModifier>,
}

impl Display for VectorMatching {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self.op, self.labels.join(","))?;
        if let Some(group) = &self.group {
            write!(f, " {group}")?;
        }
        Ok(())
    }
}

/// `group_left(l1,l2)` / `group_right()` — the label list may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "ser", derive(serde::Serialize))]
pub struct GroupModifier {
    pub side: GroupSide,
    pub labels: Vec<String>,
}

impl Display for GroupModifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self.side, self.labels.join(","))
    }
}

/// A completed binary operation between two expressions.
///
/// Construction goes through [`BinaryBuilder`](crate::builder::BinaryBuilder)
/// (or the comparison shortcuts), so both operands are always present.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "ser", derive(serde::Serialize))]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
    pub matching: Option<VectorMatching>,
}

impl Display for BinaryExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.lhs, self.op)?;
        if let Some(matching) = &self.matching {
            write!(f, " {matching}")?;
        }
        write!(f, " {}", self.rhs)
    }
}

/// Paren wraps an expression so it cannot be disassembled as a consequence
/// of operator precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "ser", derive(serde::Serialize))]
pub struct ParenExpr {
    pub expr: Box<Expr>,
}

impl Display for ParenExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.expr)
    }
}

/// A vector expression annotated with a time window: `expr[range]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "ser", derive(serde::Serialize))]
pub struct MatrixExpr {
    pub expr: Box<Expr>,
    pub range: RangeLiteral,
}

impl Display for MatrixExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}[{}]", self.expr, self.range)
    }
}

/// The time window of a [`MatrixExpr`]: either raw text emitted verbatim
/// (`"5m"`, `"$__rate_interval"` — never validated) or a typed duration
/// formatted in Prometheus notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeLiteral {
    Raw(String),
    Duration(Duration),
}

impl Display for RangeLiteral {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RangeLiteral::Raw(text) => write!(f, "{text}"),
            RangeLiteral::Duration(d) => write!(f, "{}", display_duration(d)),
        }
    }
}

impl From<&str> for RangeLiteral {
    fn from(text: &str) -> Self {
        RangeLiteral::Raw(text.into())
    }
}

impl From<String> for RangeLiteral {
    fn from(text: String) -> Self {
        RangeLiteral::Raw(text)
    }
}

impl From<Duration> for RangeLiteral {
    fn from(d: Duration) -> Self {
        RangeLiteral::Duration(d)
    }
}

#[cfg(feature = "ser")]
impl serde::Serialize for RangeLiteral {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// A bare number. Renders `Inf`/`-Inf`/`NaN` the way PromQL spells them.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "ser", derive(serde::Serialize))]
pub struct NumberLiteral {
    pub val: f64,
}

impl NumberLiteral {
    pub fn new(val: f64) -> Self {
        Self { val }
    }
}

impl PartialEq for NumberLiteral {
    fn eq(&self, other: &Self) -> bool {
        f64_equals(self.val, other.val)
    }
}

impl Eq for NumberLiteral {}

impl Display for NumberLiteral {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.val.is_nan() {
            write!(f, "NaN")
        } else if self.val.is_infinite() {
            if self.val > 0.0 {
                write!(f, "Inf")
            } else {
                write!(f, "-Inf")
            }
        } else {
            write!(f, "{}", self.val)
        }
    }
}

/// A string argument. Renders double-quoted with the content verbatim:
/// the caller is responsible for supplying safe values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "ser", derive(serde::Serialize))]
pub struct StringLiteral {
    pub val: String,
}

impl Display for StringLiteral {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\"", self.val)
    }
}

/// The closed set of renderable PromQL expressions.
///
/// Every variant renders through [`Display`]; the dispatch is exhaustive, so
/// adding a variant without its rendering rule does not compile.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "ser", derive(serde::Serialize))]
#[cfg_attr(feature = "ser", serde(tag = "type", rename_all = "camelCase"))]
pub enum Expr {
    /// Aggregate represents an aggregation operation on a vector.
    Aggregate(AggregateExpr),

    /// Binary represents a binary expression between two child expressions.
    Binary(BinaryExpr),

    /// Paren wraps an expression so it cannot be disassembled as a
    /// consequence of operator precedence.
    Paren(ParenExpr),

    Matrix(MatrixExpr),

    NumberLiteral(NumberLiteral),

    StringLiteral(StringLiteral),

    VectorSelector(VectorSelector),

    /// Call represents a function call.
    Call(Call),
}

impl Expr {
    pub fn new_vector_selector(name: impl Into<String>, matchers: Matchers) -> Self {
        Expr::VectorSelector(VectorSelector {
            name: name.into(),
            matchers,
        })
    }

    pub fn new_binary_expr(
        op: BinaryOp,
        lhs: Expr,
        rhs: Expr,
        matching: Option<VectorMatching>,
    ) -> Self {
        Expr::Binary(BinaryExpr {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            matching,
        })
    }

    pub fn new_paren_expr(expr: Expr) -> Self {
        Expr::Paren(ParenExpr {
            expr: Box::new(expr),
        })
    }

    pub fn new_matrix_expr(expr: Expr, range: impl Into<RangeLiteral>) -> Self {
        Expr::Matrix(MatrixExpr {
            expr: Box::new(expr),
            range: range.into(),
        })
    }

    pub fn new_number_literal(val: f64) -> Self {
        Expr::NumberLiteral(NumberLiteral { val })
    }

    pub fn new_string_literal(val: impl Into<String>) -> Self {
        Expr::StringLiteral(StringLiteral { val: val.into() })
    }

    /// The PromQL value type this expression evaluates to, used when
    /// validating function arguments.
    pub fn value_type(&self) -> ValueType {
        match self {
            Expr::Aggregate(_) => ValueType::Vector,
            Expr::Binary(_) => ValueType::Vector,
            Expr::Paren(paren) => paren.expr.value_type(),
            Expr::Matrix(_) => ValueType::Matrix,
            Expr::NumberLiteral(_) => ValueType::Scalar,
            Expr::StringLiteral(_) => ValueType::String,
            Expr::VectorSelector(_) => ValueType::Vector,
            Expr::Call(_) => ValueType::Vector,
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Aggregate(agg) => write!(f, "{agg}"),
            Expr::Binary(binary) => write!(f, "{binary}"),
            Expr::Paren(paren) => write!(f, "{paren}"),
            Expr::Matrix(matrix) => write!(f, "{matrix}"),
            Expr::NumberLiteral(num) => write!(f, "{num}"),
            Expr::StringLiteral(s) => write!(f, "{s}"),
            Expr::VectorSelector(vs) => write!(f, "{vs}"),
            Expr::Call(call) => write!(f, "{call}"),
        }
    }
}

impl From<VectorSelector> for Expr {
    fn from(vs: VectorSelector) -> Self {
        Expr::VectorSelector(vs)
    }
}

impl From<AggregateExpr> for Expr {
    fn from(agg: AggregateExpr) -> Self {
        Expr::Aggregate(agg)
    }
}

impl From<Call> for Expr {
    fn from(call: Call) -> Self {
        Expr::Call(call)
    }
}

impl From<MatrixExpr> for Expr {
    fn from(matrix: MatrixExpr) -> Self {
        Expr::Matrix(matrix)
    }
}

impl From<f64> for Expr {
    fn from(val: f64) -> Self {
        Expr::new_number_literal(val)
    }
}

impl From<&str> for Expr {
    fn from(val: &str) -> Self {
        Expr::new_string_literal(val)
    }
}

impl From<String> for Expr {
    fn from(val: String) -> Self {
        Expr::new_string_literal(val)
    }
}
