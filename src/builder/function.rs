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

use std::collections::HashMap;
use std::fmt::{self, Display};

use lazy_static::lazy_static;

use crate::builder::ast::Expr;
use crate::util::join_vector;

/// The PromQL value types, used to describe function signatures and to
/// validate arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Vector,
    Scalar,
    Matrix,
    String,
}

impl Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ValueType::Scalar => write!(f, "scalar"),
            ValueType::String => write!(f, "string"),
            ValueType::Vector => write!(f, "instant vector"),
            ValueType::Matrix => write!(f, "range vector"),
        }
    }
}

/// Function describes the signature of a PromQL built-in.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: &'static str,
    pub arg_types: Vec<ValueType>,
    pub variadic: bool,
    pub return_type: ValueType,
}

lazy_static! {
    static ref FUNCTIONS: HashMap<&'static str, Function> = {
        use ValueType::*;

        let signatures: &[(&'static str, &[ValueType], bool, ValueType)] = &[
            ("abs", &[Vector], false, Vector),
            ("absent", &[Vector], false, Vector),
            ("absent_over_time", &[Matrix], false, Vector),
            ("acos", &[Vector], false, Vector),
            ("acosh", &[Vector], false, Vector),
            ("asin", &[Vector], false, Vector),
            ("asinh", &[Vector], false, Vector),
            ("atan", &[Vector], false, Vector),
            ("atanh", &[Vector], false, Vector),
            ("avg_over_time", &[Matrix], false, Vector),
            ("ceil", &[Vector], false, Vector),
            ("changes", &[Matrix], false, Vector),
            ("clamp", &[Vector, Scalar, Scalar], false, Vector),
            ("clamp_max", &[Vector, Scalar], false, Vector),
            ("clamp_min", &[Vector, Scalar], false, Vector),
            ("cos", &[Vector], false, Vector),
            ("cosh", &[Vector], false, Vector),
            ("count_over_time", &[Matrix], false, Vector),
            ("days_in_month", &[Vector], true, Vector),
            ("day_of_month", &[Vector], true, Vector),
            ("day_of_week", &[Vector], true, Vector),
            ("day_of_year", &[Vector], true, Vector),
            ("deg", &[Vector], false, Vector),
            ("delta", &[Matrix], false, Vector),
            ("deriv", &[Matrix], false, Vector),
            ("exp", &[Vector], false, Vector),
            ("floor", &[Vector], false, Vector),
            ("histogram_count", &[Vector], false, Vector),
            ("histogram_sum", &[Vector], false, Vector),
            ("histogram_fraction", &[Scalar, Scalar, Vector], false, Vector),
            ("histogram_quantile", &[Scalar, Vector], false, Vector),
            ("holt_winters", &[Matrix, Scalar, Scalar], false, Vector),
            ("hour", &[Vector], true, Vector),
            ("idelta", &[Matrix], false, Vector),
            ("increase", &[Matrix], false, Vector),
            ("irate", &[Matrix], false, Vector),
            (
                "label_replace",
                &[Vector, String, String, String, String],
                false,
                Vector,
            ),
            ("label_join", &[Vector, String, String, String], true, Vector),
            ("last_over_time", &[Matrix], false, Vector),
            ("ln", &[Vector], false, Vector),
            ("log10", &[Vector], false, Vector),
            ("log2", &[Vector], false, Vector),
            ("max_over_time", &[Matrix], false, Vector),
            ("min_over_time", &[Matrix], false, Vector),
            ("minute", &[Vector], true, Vector),
            ("month", &[Vector], true, Vector),
            ("pi", &[], false, Scalar),
            ("predict_linear", &[Matrix, Scalar], false, Vector),
            ("present_over_time", &[Matrix], false, Vector),
            ("quantile_over_time", &[Scalar, Matrix], false, Vector),
            ("rad", &[Vector], false, Vector),
            ("rate", &[Matrix], false, Vector),
            ("resets", &[Matrix], false, Vector),
            ("round", &[Vector, Scalar], true, Vector),
            ("scalar", &[Vector], false, Scalar),
            ("sgn", &[Vector], false, Vector),
            ("sin", &[Vector], false, Vector),
            ("sinh", &[Vector], false, Vector),
            ("sort", &[Vector], false, Vector),
            ("sort_desc", &[Vector], false, Vector),
            ("sqrt", &[Vector], false, Vector),
            ("stddev_over_time", &[Matrix], false, Vector),
            ("stdvar_over_time", &[Matrix], false, Vector),
            ("sum_over_time", &[Matrix], false, Vector),
            ("tan", &[Vector], false, Vector),
            ("tanh", &[Vector], false, Vector),
            ("time", &[], false, Scalar),
            ("timestamp", &[Vector], false, Vector),
            ("vector", &[Scalar], false, Vector),
            ("year", &[Vector], true, Vector),
        ];

        signatures
            .iter()
            .map(|(name, arg_types, variadic, return_type)| {
                (
                    *name,
                    Function {
                        name: *name,
                        arg_types: arg_types.to_vec(),
                        variadic: *variadic,
                        return_type: *return_type,
                    },
                )
            })
            .collect()
    };
}

/// get_function returns the predefined signature for the given name.
pub fn get_function(name: &str) -> Option<&'static Function> {
    FUNCTIONS.get(name)
}

/// An ordered function argument list. Arguments render comma-joined; string
/// arguments are [`StringLiteral`](crate::builder::StringLiteral)s and come
/// out double-quoted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "ser", derive(serde::Serialize))]
#[cfg_attr(feature = "ser", serde(transparent))]
pub struct FunctionArgs {
    pub args: Vec<Expr>,
}

impl FunctionArgs {
    pub fn new_args(expr: impl Into<Expr>) -> Self {
        Self {
            args: vec![expr.into()],
        }
    }

    pub fn append_args(mut self, expr: impl Into<Expr>) -> Self {
        self.args.push(expr.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }
}

impl Display for FunctionArgs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", join_vector(&self.args, ", ", false))
    }
}

/// A function call: `name(arg1, arg2)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "ser", derive(serde::Serialize))]
pub struct Call {
    pub name: String,
    pub args: FunctionArgs,
}

impl Call {
    pub fn new(name: impl Into<String>, args: FunctionArgs) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

impl Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self.name, self.args)
    }
}

/// Checks an argument list against a registered signature: argument count
/// first (variadic signatures may omit or repeat their last parameter), then
/// the value type of every argument.
pub(crate) fn validate_call(func: &Function, args: &FunctionArgs) -> Result<(), String> {
    let want = func.arg_types.len();
    if func.variadic {
        if args.len() + 1 < want {
            return Err(format!(
                "wrong number of arguments for {} provided, expected at least {}, got {}",
                func.name,
                want - 1,
                args.len()
            ));
        }
    } else if args.len() != want {
        return Err(format!(
            "wrong number of arguments for {} provided, expected {}, got {}",
            func.name,
            want,
            args.len()
        ));
    }

    for (i, arg) in args.args.iter().enumerate() {
        let expected = func.arg_types.get(i).or_else(|| func.arg_types.last());
        if let Some(expected) = expected {
            let got = arg.value_type();
            if got != *expected {
                return Err(format!(
                    "invalid argument type for {}: expected {}, got {}",
                    func.name, expected, got
                ));
            }
        }
    }

    Ok(())
}
