use std::fmt;

/// Unit pool used when no override is configured. The particular units are
/// immaterial to the benchmarks; only their count and order matter.
pub const DEFAULT_UNITS: &[&str] = &["m", "g", "s", "mPERs", "mol", "gPERmol", "m2s2"];

/// Unit attached to the final result of a multiplication group when end
/// annotation is enabled.
pub const MULT_END_UNIT: &str = "m";

/// Namespace of a generated identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    /// Declared operands that seed an operation or comparison group.
    Starting,
    /// Intermediate and final results of operations.
    Result,
}

impl Namespace {
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Namespace::Starting => "starting",
            Namespace::Result => "result",
        }
    }
}

/// A generated variable name, unique within its namespace for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    pub namespace: Namespace,
    pub seq: u64,
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.namespace.prefix(), self.seq)
    }
}

/// Opaque unit token, emitted as `@<label>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitLabel(pub String);

impl UnitLabel {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UnitLabel {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[must_use]
pub fn default_units() -> Vec<UnitLabel> {
    DEFAULT_UNITS.iter().map(|u| UnitLabel::from(*u)).collect()
}

/// A single starting-variable declaration. The initializer is always `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDecl {
    pub ident: Identifier,
    pub unit: Option<UnitLabel>,
}

/// One operand of an operation or comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Literal one, prepended in corrected mode. Has no storage.
    Constant,
    Var(Identifier),
}

impl Operand {
    /// Comparison form: the constant is a plain `1` with no cast.
    #[must_use]
    pub fn bare(&self) -> String {
        match self {
            Operand::Constant => "1".to_string(),
            Operand::Var(id) => id.to_string(),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Constant => f.write_str("(@Dimensionless int) 1"),
            Operand::Var(id) => write!(f, "{id}"),
        }
    }
}
