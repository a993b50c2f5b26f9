mod matcher;

pub use matcher::{MatchOp, Matcher, Matchers};
