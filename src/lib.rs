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

//! # PromQL Expression Builder
//!
//! The goal of this project is to assemble syntactically valid PromQL query
//! strings from composable, typed expression values, so that application code
//! never concatenates query text by hand.
//!
//! ## Example
//!
//! Expressions start from a factory in [`builder`] (most commonly
//! [`builder::metric()`]) and grow through chained calls. The finished tree
//! renders through [`std::fmt::Display`]:
//!
//! ``` rust
//! use promql_builder::builder::{self, VectorOps};
//!
//! let query = builder::sum(builder::rate(builder::with_range(
//!         builder::metric("http_requests_total").with_label_equals("job", "api"),
//!         "5m",
//!     )))
//!     .by(["status"])
//!     .to_string();
//!
//! assert_eq!(
//!     query,
//!     r#"sum(rate(http_requests_total{job="api"}[5m])) by (status)"#
//! );
//!
//! let ratio = builder::metric("errors_total")
//!     .divide()
//!     .with_expression(builder::metric("requests_total"))
//!     .to_string();
//!
//! assert_eq!(ratio, "(errors_total / requests_total)");
//! ```
//!
//! Binary operations are built in two steps. An operator call such as
//! [`VectorOps::multiply()`](builder::VectorOps::multiply) returns a
//! [`builder::BinaryBuilder`] that still waits for its right operand; only
//! completing it (`with_expression`, `with_scalar`, `group_left`, ...) yields
//! a renderable [`builder::Expr`]. Half-built operations therefore cannot
//! reach a query endpoint.
//!
//! ## PromQL compliance
//!
//! The rendered text targets [Prometheus Query][querying-prometheus] syntax.
//! This crate only constructs queries; it never parses, evaluates, or
//! transmits them. Label values and range literals pass through verbatim, so
//! dashboard template variables such as `$__rate_interval` survive untouched.
//!
//! [querying-prometheus]: https://prometheus.io/docs/prometheus/latest/querying/basics/

pub mod builder;
pub mod label;
pub mod util;
