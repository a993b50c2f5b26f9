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

use crate::builder::ast::Expr;
use crate::builder::ops::AggregateOp;
use crate::label::Matchers;
use crate::util::join_vector;

/// `<aggr-op>(<vector expression>) [by|without (...)]`
///
/// The grouping clause is attached after construction via
/// [`by`](Self::by) / [`without`](Self::without); at most one clause is
/// active, a later call replaces the earlier one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "ser", derive(serde::Serialize))]
pub struct AggregateExpr {
    pub op: AggregateOp,
    pub expr: Box<Expr>,
    pub modifier: Option<AggregateModifier>,
}

/// The trailing grouping clause of an aggregation.
///
/// `by` carries bare label names while `without` carries full label matchers;
/// the asymmetry is deliberate and mirrored in the rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "ser", derive(serde::Serialize))]
#[cfg_attr(feature = "ser", serde(rename_all = "lowercase"))]
pub enum AggregateModifier {
    By(Vec<String>),
    Without(Matchers),
}

impl AggregateExpr {
    pub fn new(op: AggregateOp, expr: impl Into<Expr>) -> Self {
        Self {
            op,
            expr: Box::new(expr.into()),
            modifier: None,
        }
    }

    /// Groups the aggregation `by` the given labels, replacing any grouping
    /// clause set before.
    pub fn by<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.modifier = Some(AggregateModifier::By(
            labels.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Groups the aggregation `without` the given label matchers, replacing
    /// any grouping clause set before.
    pub fn without(mut self, matchers: Matchers) -> Self {
        self.modifier = Some(AggregateModifier::Without(matchers));
        self
    }
}

impl Display for AggregateExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self.op, self.expr)?;
        if let Some(modifier) = &self.modifier {
            write!(f, "{modifier}")?;
        }
        Ok(())
    }
}

impl Display for AggregateModifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AggregateModifier::By(labels) => write!(f, " by ({})", labels.join(",")),
            AggregateModifier::Without(matchers) => {
                write!(f, " without ({})", join_vector(&matchers.matchers, ",", false))
            }
        }
    }
}
