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

//! End-to-end rendering fixtures: every query text a host is expected to
//! assemble through the builder, checked byte for byte.

use std::time::Duration;

use promql_builder::builder::{self, Expr, SortDirection, VectorOps};
use promql_builder::label::{MatchOp, Matcher, Matchers};
use promql_builder::util;

fn assert_cases(cases: Vec<(Expr, &str)>) {
    for (expr, expected) in cases {
        assert_eq!(
            expr.to_string(),
            expected,
            "\n<render> {expected:?} not produced"
        );
    }
}

#[test]
fn test_selector_rendering() {
    let cases = vec![
        (builder::metric("up").into(), "up"),
        (
            builder::metric("up").with_label_equals("job", "node").into(),
            r#"up{job="node"}"#,
        ),
        (
            builder::metric("up")
                .with_label_equals("job", "node")
                .with_label_not_matches("env", "test.*")
                .into(),
            r#"up{job="node",env!~"test.*"}"#,
        ),
        (
            builder::metric("up")
                .with_label("path", MatchOp::Re, "/api/.*")
                .with_label("code", MatchOp::NotEqual, "200")
                .into(),
            r#"up{path=~"/api/.*",code!="200"}"#,
        ),
    ];
    assert_cases(cases);
}

#[test]
fn test_binary_rendering() {
    let cases = vec![
        (
            builder::metric("a").add().with_expression(builder::metric("b")),
            "(a + b)",
        ),
        (
            builder::metric("node_memory_MemTotal_bytes")
                .with_label_equals("cluster", "$cluster")
                .subtract()
                .with_expression(
                    builder::metric("node_memory_MemAvailable_bytes")
                        .with_label_equals("cluster", "$cluster"),
                ),
            r#"(node_memory_MemTotal_bytes{cluster="$cluster"} - node_memory_MemAvailable_bytes{cluster="$cluster"})"#,
        ),
        (
            builder::metric("x").multiply().with_scalar(100.0),
            "(x * 100)",
        ),
        (
            builder::metric("up").and().with_expression(builder::metric("ready")),
            "(up and ready)",
        ),
        (builder::metric("z").equals(0.0), "z == 0"),
    ];
    assert_cases(cases);
}

#[test]
fn test_matching_and_grouping() {
    let cases = vec![
        (
            builder::metric("a")
                .with_label_equals("l", "1")
                .multiply()
                .on(["l"])
                .group_left(["x"], builder::metric("b").with_label_equals("l", "1")),
            r#"a{l="1"} * on(l) group_left(x) b{l="1"}"#,
        ),
        (
            builder::metric("foo")
                .multiply()
                .ignoring(["alertstate"])
                .group_right(["alertstate"], builder::metric("bar")),
            "foo * ignoring(alertstate) group_right(alertstate) bar",
        ),
        (
            builder::metric("a")
                .add()
                .on(["instance", "job"])
                .with_expression(builder::metric("b")),
            "(a + on(instance,job) b)",
        ),
    ];
    assert_cases(cases);
}

#[test]
fn test_functions_and_aggregations() {
    let cases = vec![
        (
            builder::with_range(builder::metric("y"), "5m"),
            "y[5m]",
        ),
        (
            builder::with_range(builder::metric("y"), Duration::from_secs(300)),
            "y[5m]",
        ),
        (
            builder::sum(builder::rate(builder::with_range(
                builder::metric("http_requests_total").with_label_equals("job", "api"),
                "5m",
            )))
            .by(["status"])
            .into(),
            r#"sum(rate(http_requests_total{job="api"}[5m])) by (status)"#,
        ),
        (
            builder::sum(builder::metric("x")).by(["a", "b"]).into(),
            "sum(x) by (a,b)",
        ),
        (
            builder::avg(builder::metric("x"))
                .without(Matchers::one(Matcher::new(MatchOp::Equal, "l", "v")))
                .into(),
            r#"avg(x) without (l="v")"#,
        ),
        (
            builder::present_over_time(builder::with_range(
                builder::metric("config_reload"),
                "$__rate_interval",
            ))
            .into(),
            "present_over_time(config_reload[$__rate_interval])",
        ),
        (
            builder::sort(SortDirection::Desc, builder::metric("x")).into(),
            "sort_desc(x)",
        ),
        (
            builder::label_replace(builder::metric("up"), "dst", "$1", "src", "(.*)").into(),
            r#"label_replace(up, "dst", "$1", "src", "(.*)")"#,
        ),
    ];
    assert_cases(cases);
}

#[test]
fn test_render_is_idempotent() {
    let expr = builder::sum(builder::rate(builder::with_range(
        builder::metric("http_requests_total").with_label_equals("job", "api"),
        "5m",
    )))
    .by(["status"]);
    let expr: Expr = expr.into();

    let first = expr.to_string();
    let second = expr.to_string();
    assert_eq!(first, second);
}

#[test]
fn test_conditional_labels_are_noops() {
    let base = builder::metric("up").with_label_equals("job", "node");
    let conditioned = base
        .clone()
        .with_label_equals_if(false, "env", "prod")
        .with_label_not_equals_if(false, "region", "us")
        .with_label_matches_if(false, "zone", "a.*")
        .with_label_not_matches_if(false, "pod", "tmp-.*");

    assert_eq!(conditioned, base);
    assert_eq!(conditioned.to_string(), r#"up{job="node"}"#);

    let enabled = base.with_label_equals_if(true, "env", "prod");
    assert_eq!(enabled.to_string(), r#"up{job="node",env="prod"}"#);
}

#[test]
fn test_grouping_clauses_are_mutually_exclusive() {
    let by_wins = builder::sum(builder::metric("x"))
        .without(Matchers::one(Matcher::new(MatchOp::Equal, "l", "v")))
        .by(["a"]);
    assert_eq!(Expr::from(by_wins).to_string(), "sum(x) by (a)");

    let without_wins = builder::sum(builder::metric("x"))
        .by(["a"])
        .without(Matchers::one(Matcher::new(MatchOp::Equal, "l", "v")));
    assert_eq!(
        Expr::from(without_wins).to_string(),
        r#"sum(x) without (l="v")"#
    );
}

#[test]
fn test_label_upsert_order() {
    // the last write for a label wins without changing its render position
    let expr: Expr = builder::metric("up")
        .with_label_equals("job", "a")
        .with_label_equals("env", "prod")
        .with_label_matches("job", "node.*")
        .into();
    assert_eq!(expr.to_string(), r#"up{job=~"node.*",env="prod"}"#);
}

#[test]
fn test_generic_call_validation() {
    let ok = builder::call(
        "increase",
        builder::FunctionArgs::new_args(builder::with_range(builder::metric("x"), "1h")),
    )
    .unwrap();
    assert_eq!(ok.to_string(), "increase(x[1h])");

    assert!(builder::call(
        "not_a_promql_function",
        builder::FunctionArgs::new_args(builder::metric("x"))
    )
    .is_err());
    assert!(
        builder::call("rate", builder::FunctionArgs::new_args(builder::metric("x"))).is_err()
    );
}

#[test]
fn test_metric_name_discovery() {
    let expr = builder::metric("a")
        .with_label_equals("l", "1")
        .multiply()
        .on(["l"])
        .group_left(["x"], builder::metric("b").with_label_equals("l", "1"));
    assert_eq!(util::metric_names(&expr), vec!["a", "b"]);
}
