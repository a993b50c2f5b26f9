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

//! Prometheus duration notation, backing typed range literals.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::Write;
use std::time::Duration;

lazy_static! {
    static ref DURATION_RE: Regex = Regex::new(
        r"(?x)
^
((?P<y>[0-9]+)y)?
((?P<w>[0-9]+)w)?
((?P<d>[0-9]+)d)?
((?P<h>[0-9]+)h)?
((?P<m>[0-9]+)m)?
((?P<s>[0-9]+)s)?
((?P<ms>[0-9]+)ms)?
$",
    )
    .unwrap();
}

pub const MILLI_DURATION: Duration = Duration::from_millis(1);
pub const SECOND_DURATION: Duration = Duration::from_secs(1);
pub const MINUTE_DURATION: Duration = Duration::from_secs(60);
pub const HOUR_DURATION: Duration = Duration::from_secs(60 * 60);
pub const DAY_DURATION: Duration = Duration::from_secs(60 * 60 * 24);
pub const WEEK_DURATION: Duration = Duration::from_secs(60 * 60 * 24 * 7);
pub const YEAR_DURATION: Duration = Duration::from_secs(60 * 60 * 24 * 365);

const UNITS: [(&str, Duration); 7] = [
    ("y", YEAR_DURATION),
    ("w", WEEK_DURATION),
    ("d", DAY_DURATION),
    ("h", HOUR_DURATION),
    ("m", MINUTE_DURATION),
    ("s", SECOND_DURATION),
    ("ms", MILLI_DURATION),
];

/// parses a string in Prometheus duration notation into a [`Duration`],
/// assuming that a year always has 365d, a week always has 7d, and a day
/// always has 24h.
///
/// # Examples
///
/// Basic usage:
///
/// ```
/// use std::time::Duration;
/// use promql_builder::util;
///
/// assert_eq!(util::parse_duration("90s").unwrap(), Duration::from_secs(90));
/// assert_eq!(util::parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
/// ```
pub fn parse_duration(ds: &str) -> Result<Duration, String> {
    if ds.is_empty() {
        return Err("empty duration string".into());
    }

    let caps = DURATION_RE
        .captures(ds)
        .ok_or_else(|| format!("not a valid duration string: {ds}"))?;

    let mut total = Duration::ZERO;
    for (name, unit) in UNITS {
        if let Some(m) = caps.name(name) {
            let count: u32 = m
                .as_str()
                .parse()
                .map_err(|_| format!("not a valid duration string: {ds}"))?;
            let part = unit
                .checked_mul(count)
                .ok_or_else(|| String::from("duration overflowed"))?;
            total = total
                .checked_add(part)
                .ok_or_else(|| String::from("duration overflowed"))?;
        }
    }

    if total.is_zero() {
        return Err("duration must be greater than 0".into());
    }
    Ok(total)
}

/// display a [`Duration`] in Prometheus format
pub fn display_duration(duration: &Duration) -> String {
    if duration.is_zero() {
        return "0s".into();
    }

    let mut ms = duration.as_millis();
    let mut out = String::new();

    // years and weeks only when they divide evenly: 90d reads better than 12w6d
    let ladder: [(&str, u128, bool); 7] = [
        ("y", 1000 * 60 * 60 * 24 * 365, true),
        ("w", 1000 * 60 * 60 * 24 * 7, true),
        ("d", 1000 * 60 * 60 * 24, false),
        ("h", 1000 * 60 * 60, false),
        ("m", 1000 * 60, false),
        ("s", 1000, false),
        ("ms", 1, false),
    ];

    for (unit, mult, exact) in ladder {
        if exact && ms % mult != 0 {
            continue;
        }
        let v = ms / mult;
        if v > 0 {
            write!(out, "{v}{unit}").unwrap();
            ms -= v * mult;
        }
    }

    out
}
