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

use std::fmt;

use crate::util::join_vector;

/// Label matching operators usable in selector filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchOp {
    Equal,
    NotEqual,
    Re,
    NotRe,
}

impl MatchOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchOp::Equal => "=",
            MatchOp::NotEqual => "!=",
            MatchOp::Re => "=~",
            MatchOp::NotRe => "!~",
        }
    }
}

impl fmt::Display for MatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(feature = "ser")]
impl serde::Serialize for MatchOp {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Matcher models the matching of a label.
///
/// The value is carried verbatim: no escaping, quoting or regex compilation
/// happens here, so dashboard template variables such as `$cluster` and raw
/// regex text pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "ser", derive(serde::Serialize))]
pub struct Matcher {
    #[cfg_attr(feature = "ser", serde(rename = "type"))]
    pub op: MatchOp,
    pub name: String,
    pub value: String,
}

impl Matcher {
    pub fn new(op: MatchOp, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            op,
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}\"{}\"", self.name, self.op, self.value)
    }
}

/// An ordered set of label matchers holding at most one matcher per label
/// name. Render order is the order of first insertion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "ser", derive(serde::Serialize))]
#[cfg_attr(feature = "ser", serde(transparent))]
pub struct Matchers {
    pub matchers: Vec<Matcher>,
}

impl Matchers {
    pub fn empty() -> Self {
        Self { matchers: vec![] }
    }

    pub fn one(matcher: Matcher) -> Self {
        Self {
            matchers: vec![matcher],
        }
    }

    pub fn new(matchers: Vec<Matcher>) -> Self {
        matchers
            .into_iter()
            .fold(Self::empty(), |acc, m| acc.append(m))
    }

    /// Upserts a matcher: the last write for a given label name wins, and an
    /// overwritten matcher keeps its original position.
    pub fn append(mut self, matcher: Matcher) -> Self {
        match self.matchers.iter().position(|m| m.name == matcher.name) {
            Some(idx) => self.matchers[idx] = matcher,
            None => self.matchers.push(matcher),
        }
        self
    }

    /// Folds a whole matcher set in, entries of `other` overriding existing
    /// ones on conflict and appended otherwise.
    pub fn merge(self, other: Matchers) -> Self {
        other.matchers.into_iter().fold(self, |acc, m| acc.append(m))
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// find the matcher whose name equals the specified name.
    pub fn find(&self, name: &str) -> Option<&Matcher> {
        self.matchers.iter().find(|m| m.name == name)
    }
}

impl fmt::Display for Matchers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", join_vector(&self.matchers, ",", true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_op_display() {
        assert_eq!(MatchOp::Equal.to_string(), "=");
        assert_eq!(MatchOp::NotEqual.to_string(), "!=");
        assert_eq!(MatchOp::Re.to_string(), "=~");
        assert_eq!(MatchOp::NotRe.to_string(), "!~");
    }

    #[test]
    fn test_matcher_display() {
        assert_eq!(
            Matcher::new(MatchOp::Equal, "job", "node").to_string(),
            r#"job="node""#
        );
        assert_eq!(
            Matcher::new(MatchOp::NotRe, "env", "test.*").to_string(),
            r#"env!~"test.*""#
        );
        // values are carried verbatim, template variables included
        assert_eq!(
            Matcher::new(MatchOp::Equal, "cluster", "$cluster").to_string(),
            r#"cluster="$cluster""#
        );
    }

    #[test]
    fn test_matchers_display() {
        let matchers = Matchers::empty()
            .append(Matcher::new(MatchOp::Equal, "job", "node"))
            .append(Matcher::new(MatchOp::NotRe, "env", "test.*"));
        assert_eq!(matchers.to_string(), r#"{job="node",env!~"test.*"}"#);

        assert_eq!(Matchers::empty().to_string(), "");
    }

    #[test]
    fn test_append_upserts() {
        let matchers = Matchers::empty()
            .append(Matcher::new(MatchOp::Equal, "job", "node"))
            .append(Matcher::new(MatchOp::Equal, "env", "prod"))
            .append(Matcher::new(MatchOp::Re, "job", "node.*"));

        // last write wins, original position kept
        assert_eq!(matchers.matchers.len(), 2);
        assert_eq!(matchers.to_string(), r#"{job=~"node.*",env="prod"}"#);
    }

    #[test]
    fn test_merge_overrides() {
        let base = Matchers::empty()
            .append(Matcher::new(MatchOp::Equal, "job", "node"))
            .append(Matcher::new(MatchOp::Equal, "env", "prod"));
        let external = Matchers::empty()
            .append(Matcher::new(MatchOp::NotEqual, "env", "test"))
            .append(Matcher::new(MatchOp::Equal, "cluster", "eu-1"));

        let merged = base.merge(external);
        assert_eq!(
            merged.to_string(),
            r#"{job="node",env!="test",cluster="eu-1"}"#
        );
    }

    #[test]
    fn test_new_dedupes() {
        let matchers = Matchers::new(vec![
            Matcher::new(MatchOp::Equal, "a", "1"),
            Matcher::new(MatchOp::Equal, "a", "2"),
        ]);
        assert_eq!(matchers.to_string(), r#"{a="2"}"#);
    }

    #[test]
    fn test_find() {
        let matchers = Matchers::one(Matcher::new(MatchOp::Equal, "job", "api"));
        assert_eq!(matchers.find("job").map(|m| m.value.as_str()), Some("api"));
        assert!(matchers.find("env").is_none());
    }
}
