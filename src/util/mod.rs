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

mod duration;
mod float;
mod visitor;

pub use duration::{display_duration, parse_duration};
pub use float::f64_equals;
pub use visitor::{metric_names, walk_expr, ExprVisitor};

use std::fmt::Display;

/// Joins the items with the separator, optionally wrapping the result in
/// curly braces. An empty slice renders as an empty string either way.
pub fn join_vector<T: Display>(v: &[T], separator: &str, braces: bool) -> String {
    if v.is_empty() {
        return String::new();
    }
    let joined = v
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(separator);
    if braces {
        format!("{{{joined}}}")
    } else {
        joined
    }
}
