use std::fmt::{self, Display};

/// Binary operators between two vector expressions: arithmetic, comparison
/// and set logic, each rendering as its PromQL symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    // comparison
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
    // set logic
    And,
    Or,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "^",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Gt => ">",
            BinaryOp::Lt => "<",
            BinaryOp::Ge => ">=",
            BinaryOp::Le => "<=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How labels are matched between the two sides of a binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchingOp {
    On,
    Ignoring,
}

impl MatchingOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchingOp::On => "on",
            MatchingOp::Ignoring => "ignoring",
        }
    }
}

impl Display for MatchingOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which side of a binary operation may carry multiple matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupSide {
    Left,
    Right,
}

impl GroupSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupSide::Left => "group_left",
            GroupSide::Right => "group_right",
        }
    }
}

impl Display for GroupSide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The aggregation operators this builder constructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOp {
    Sum,
    Avg,
    Max,
    Group,
    Count,
}

impl AggregateOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateOp::Sum => "sum",
            AggregateOp::Avg => "avg",
            AggregateOp::Max => "max",
            AggregateOp::Group => "group",
            AggregateOp::Count => "count",
        }
    }
}

impl Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort order, selecting between the `sort` and `sort_desc` functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn func_name(&self) -> &'static str {
        match self {
            SortDirection::Asc => "sort",
            SortDirection::Desc => "sort_desc",
        }
    }
}

#[cfg(feature = "ser")]
macro_rules! serialize_as_str {
    ($($ty:ty),+ $(,)?) => {$(
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    )+};
}

#[cfg(feature = "ser")]
serialize_as_str!(BinaryOp, MatchingOp, GroupSide, AggregateOp);
