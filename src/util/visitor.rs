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

use crate::builder::{
    AggregateExpr, BinaryExpr, Call, Expr, MatrixExpr, ParenExpr,
};

/// Trait that implements the [Visitor pattern](https://en.wikipedia.org/wiki/Visitor_pattern)
/// for a depth first walk on an [Expr] tree. [`pre_visit`](ExprVisitor::pre_visit) is called
/// before any children are visited, and then [`post_visit`](ExprVisitor::post_visit) is called
/// after all children have been visited. Only [`pre_visit`](ExprVisitor::pre_visit) is required.
pub trait ExprVisitor {
    type Error;

    /// Called before any children are visited. Return `Ok(false)` to cut short the recursion
    /// (skip traversing and return).
    fn pre_visit(&mut self, expr: &Expr) -> Result<bool, Self::Error>;

    /// Called after all children are visited. Return `Ok(false)` to cut short the recursion
    /// (skip traversing and return).
    fn post_visit(&mut self, _expr: &Expr) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

/// A util function that traverses an [Expr] tree in depth-first order. Returns
/// `Ok(true)` if all nodes were visited, and `Ok(false)` if any call to
/// [`pre_visit`](ExprVisitor::pre_visit) or [`post_visit`](ExprVisitor::post_visit)
/// returned `Ok(false)` and may have cut short the recursion.
pub fn walk_expr<V: ExprVisitor>(visitor: &mut V, expr: &Expr) -> Result<bool, V::Error> {
    if !visitor.pre_visit(expr)? {
        return Ok(false);
    }

    let recurse = match expr {
        Expr::Aggregate(AggregateExpr { expr, .. }) => walk_expr(visitor, expr)?,
        Expr::Binary(BinaryExpr { lhs, rhs, .. }) => {
            walk_expr(visitor, lhs)? && walk_expr(visitor, rhs)?
        }
        Expr::Paren(ParenExpr { expr }) => walk_expr(visitor, expr)?,
        Expr::Matrix(MatrixExpr { expr, .. }) => walk_expr(visitor, expr)?,
        Expr::Call(Call { args, .. }) => {
            let mut keep_going = true;
            for arg in &args.args {
                if !walk_expr(visitor, arg)? {
                    keep_going = false;
                    break;
                }
            }
            keep_going
        }
        Expr::NumberLiteral(_) | Expr::StringLiteral(_) | Expr::VectorSelector(_) => true,
    };

    if !recurse {
        return Ok(false);
    }

    if !visitor.post_visit(expr)? {
        return Ok(false);
    }

    Ok(true)
}

/// Collects the metric names selected anywhere in the expression, in visit
/// order. Useful for hosts that need to know which series a built query
/// touches (e.g. dashboard variable discovery) without re-parsing the text.
pub fn metric_names(expr: &Expr) -> Vec<String> {
    struct Collector {
        names: Vec<String>,
    }

    impl ExprVisitor for Collector {
        type Error = ();

        fn pre_visit(&mut self, expr: &Expr) -> Result<bool, ()> {
            if let Expr::VectorSelector(vs) = expr {
                self.names.push(vs.name.clone());
            }
            Ok(true)
        }
    }

    let mut collector = Collector { names: vec![] };
    // an infallible visitor that never cuts the walk short
    let _ = walk_expr(&mut collector, expr);
    collector.names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{self, VectorOps};

    #[test]
    fn test_metric_names() {
        let expr: Expr = builder::sum(builder::rate(builder::with_range(
            builder::metric("http_requests_total"),
            "5m",
        )))
        .into();
        assert_eq!(metric_names(&expr), vec!["http_requests_total"]);

        let expr = builder::metric("a")
            .add()
            .with_expression(builder::metric("b"));
        assert_eq!(metric_names(&expr), vec!["a", "b"]);
    }

    #[test]
    fn test_walk_cut_short() {
        struct CountUntilBinary {
            visited: usize,
        }

        impl ExprVisitor for CountUntilBinary {
            type Error = ();

            fn pre_visit(&mut self, expr: &Expr) -> Result<bool, ()> {
                self.visited += 1;
                Ok(!matches!(expr, Expr::Binary(_)))
            }
        }

        // paren > binary, the walk stops before descending into the operands
        let expr = builder::metric("a")
            .add()
            .with_expression(builder::metric("b"));
        let mut visitor = CountUntilBinary { visited: 0 };
        assert_eq!(walk_expr(&mut visitor, &expr), Ok(false));
        assert_eq!(visitor.visited, 2);
    }
}
