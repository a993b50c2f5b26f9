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

//! Two-phase construction of binary operations.
//!
//! An operator call (`add`, `multiply`, `and`, ...) captures only the left
//! operand and returns a [`BinaryBuilder`]; qualifying it with `on`/`ignoring`
//! moves to a [`MatchingBuilder`]. Neither implements [`std::fmt::Display`] —
//! only attaching the right operand produces a renderable
//! [`Expr`], so a half-built operation can never leak into query text.

use crate::builder::ast::{Expr, GroupModifier, VectorMatching};
use crate::builder::ops::{BinaryOp, GroupSide, MatchingOp};

/// Chainable operator methods shared by every vector-valued expression.
pub trait VectorOps: Into<Expr> + Sized {
    fn add(self) -> BinaryBuilder {
        BinaryBuilder::new(BinaryOp::Add, self.into())
    }

    fn subtract(self) -> BinaryBuilder {
        BinaryBuilder::new(BinaryOp::Sub, self.into())
    }

    fn multiply(self) -> BinaryBuilder {
        BinaryBuilder::new(BinaryOp::Mul, self.into())
    }

    fn divide(self) -> BinaryBuilder {
        BinaryBuilder::new(BinaryOp::Div, self.into())
    }

    fn modulo(self) -> BinaryBuilder {
        BinaryBuilder::new(BinaryOp::Mod, self.into())
    }

    fn pow(self) -> BinaryBuilder {
        BinaryBuilder::new(BinaryOp::Pow, self.into())
    }

    fn and(self) -> BinaryBuilder {
        BinaryBuilder::new(BinaryOp::And, self.into())
    }

    fn or(self) -> BinaryBuilder {
        BinaryBuilder::new(BinaryOp::Or, self.into())
    }

    /// `self == value` — comparisons carry both operands up front, so the
    /// result is a finished expression, not a builder.
    fn equals(self, value: f64) -> Expr {
        Expr::new_binary_expr(BinaryOp::Eq, self.into(), Expr::from(value), None)
    }

    fn not_equals(self, value: f64) -> Expr {
        Expr::new_binary_expr(BinaryOp::Ne, self.into(), Expr::from(value), None)
    }

    fn greater_than(self, value: f64) -> Expr {
        Expr::new_binary_expr(BinaryOp::Gt, self.into(), Expr::from(value), None)
    }

    fn less_than(self, value: f64) -> Expr {
        Expr::new_binary_expr(BinaryOp::Lt, self.into(), Expr::from(value), None)
    }

    fn greater_or_equal(self, value: f64) -> Expr {
        Expr::new_binary_expr(BinaryOp::Ge, self.into(), Expr::from(value), None)
    }

    fn less_or_equal(self, value: f64) -> Expr {
        Expr::new_binary_expr(BinaryOp::Le, self.into(), Expr::from(value), None)
    }
}

impl<T: Into<Expr>> VectorOps for T {}

/// A binary operation that knows its operator and left operand and still
/// waits for the right one.
#[derive(Debug, Clone)]
pub struct BinaryBuilder {
    op: BinaryOp,
    lhs: Expr,
}

impl BinaryBuilder {
    pub(crate) fn new(op: BinaryOp, lhs: Expr) -> Self {
        Self { op, lhs }
    }

    /// Attaches the right operand. The finished pair is wrapped in
    /// parentheses so further chaining cannot rebind either side.
    pub fn with_expression(self, rhs: impl Into<Expr>) -> Expr {
        Expr::new_paren_expr(Expr::new_binary_expr(self.op, self.lhs, rhs.into(), None))
    }

    /// Attaches a number literal as the right operand: `(x * 100)`.
    pub fn with_scalar(self, value: f64) -> Expr {
        self.with_expression(Expr::from(value))
    }

    /// Qualifies the operation with `on(labels)` vector matching.
    pub fn on<S: Into<String>>(self, labels: impl IntoIterator<Item = S>) -> MatchingBuilder {
        self.matching(MatchingOp::On, labels)
    }

    /// Qualifies the operation with `ignoring(labels)` vector matching.
    pub fn ignoring<S: Into<String>>(
        self,
        labels: impl IntoIterator<Item = S>,
    ) -> MatchingBuilder {
        self.matching(MatchingOp::Ignoring, labels)
    }

    fn matching<S: Into<String>>(
        self,
        op: MatchingOp,
        labels: impl IntoIterator<Item = S>,
    ) -> MatchingBuilder {
        MatchingBuilder {
            op: self.op,
            lhs: self.lhs,
            matching: op,
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }
}

/// A binary operation qualified with vector matching (`on`/`ignoring`),
/// still waiting for its right operand or a group modifier.
#[derive(Debug, Clone)]
pub struct MatchingBuilder {
    op: BinaryOp,
    lhs: Expr,
    matching: MatchingOp,
    labels: Vec<String>,
}

impl MatchingBuilder {
    /// Completes the operation with `group_left(labels) rhs`.
    pub fn group_left<S: Into<String>>(
        self,
        labels: impl IntoIterator<Item = S>,
        rhs: impl Into<Expr>,
    ) -> Expr {
        self.grouped(GroupSide::Left, labels, rhs)
    }

    /// Completes the operation with `group_right(labels) rhs`.
    pub fn group_right<S: Into<String>>(
        self,
        labels: impl IntoIterator<Item = S>,
        rhs: impl Into<Expr>,
    ) -> Expr {
        self.grouped(GroupSide::Right, labels, rhs)
    }

    /// Completes the operation without a group modifier; like
    /// [`BinaryBuilder::with_expression`] the pair is parenthesized.
    pub fn with_expression(self, rhs: impl Into<Expr>) -> Expr {
        let matching = VectorMatching {
            op: self.matching,
            labels: self.labels,
            group: None,
        };
        Expr::new_paren_expr(Expr::new_binary_expr(
            self.op,
            self.lhs,
            rhs.into(),
            Some(matching),
        ))
    }

    fn grouped<S: Into<String>>(
        self,
        side: GroupSide,
        labels: impl IntoIterator<Item = S>,
        rhs: impl Into<Expr>,
    ) -> Expr {
        let matching = VectorMatching {
            op: self.matching,
            labels: self.labels,
            group: Some(GroupModifier {
                side,
                labels: labels.into_iter().map(Into::into).collect(),
            }),
        };
        Expr::new_binary_expr(self.op, self.lhs, rhs.into(), Some(matching))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::metric;

    #[test]
    fn test_with_expression_parenthesizes() {
        let expr = metric("a").add().with_expression(metric("b"));
        assert_eq!(expr.to_string(), "(a + b)");

        let expr = metric("node_memory_MemTotal_bytes")
            .with_label_equals("cluster", "$cluster")
            .subtract()
            .with_expression(
                metric("node_memory_MemAvailable_bytes").with_label_equals("cluster", "$cluster"),
            );
        assert_eq!(
            expr.to_string(),
            r#"(node_memory_MemTotal_bytes{cluster="$cluster"} - node_memory_MemAvailable_bytes{cluster="$cluster"})"#
        );
    }

    #[test]
    fn test_with_scalar() {
        let expr = metric("x").multiply().with_scalar(100.0);
        assert_eq!(expr.to_string(), "(x * 100)");
    }

    #[test]
    fn test_chaining_completed_pairs() {
        // a completed pair is itself a vector expression and chains further
        let expr = metric("a")
            .add()
            .with_expression(metric("b"))
            .divide()
            .with_scalar(2.0);
        assert_eq!(expr.to_string(), "((a + b) / 2)");
    }

    #[test]
    fn test_logical_operators() {
        let expr = metric("up").and().with_expression(metric("ready"));
        assert_eq!(expr.to_string(), "(up and ready)");

        let expr = metric("up").or().with_expression(metric("ready"));
        assert_eq!(expr.to_string(), "(up or ready)");
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(metric("z").equals(0.0).to_string(), "z == 0");
        assert_eq!(metric("z").not_equals(1.0).to_string(), "z != 1");
        assert_eq!(metric("z").greater_than(0.5).to_string(), "z > 0.5");
        assert_eq!(metric("z").less_than(10.0).to_string(), "z < 10");
        assert_eq!(metric("z").greater_or_equal(1.0).to_string(), "z >= 1");
        assert_eq!(metric("z").less_or_equal(1.0).to_string(), "z <= 1");
    }

    #[test]
    fn test_matching_with_group() {
        let expr = metric("a")
            .with_label_equals("l", "1")
            .multiply()
            .on(["l"])
            .group_left(["x"], metric("b").with_label_equals("l", "1"));
        assert_eq!(
            expr.to_string(),
            r#"a{l="1"} * on(l) group_left(x) b{l="1"}"#
        );

        let expr = metric("foo")
            .multiply()
            .ignoring(["alertstate"])
            .group_right(["alertstate"], metric("bar"));
        assert_eq!(
            expr.to_string(),
            "foo * ignoring(alertstate) group_right(alertstate) bar"
        );
    }

    #[test]
    fn test_matching_with_expression() {
        let expr = metric("a").add().on(["l"]).with_expression(metric("b"));
        assert_eq!(expr.to_string(), "(a + on(l) b)");
    }

    #[test]
    fn test_empty_group_labels() {
        let expr = metric("a")
            .divide()
            .on(["instance"])
            .group_left(Vec::<String>::new(), metric("b"));
        assert_eq!(expr.to_string(), "a / on(instance) group_left() b");
    }
}
