//! Error types for opetope derivations.

use std::fmt;

/// A rejected construction or rule application.
///
/// Every precondition violation in the kernel surfaces as one of these:
/// dimension mismatches, unbound or already-bound variables, failed
/// grafting or substitution preconditions, and the boundary checks of the
/// `graft` rule. They are caller errors and always recoverable; evaluation
/// of a proof tree stops at the first one and hands it back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[{scope}] {message}")]
pub struct DerivationError {
    /// Which construction or rule rejected its input.
    pub scope: Scope,

    /// Description of the violation, including the offending values.
    pub message: String,
}

impl DerivationError {
    pub fn new(scope: Scope, message: impl Into<String>) -> Self {
        Self {
            scope,
            message: message.into(),
        }
    }
}

/// Where a derivation error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Variable,
    Term,
    Type,
    Typing,
    Context,
    Theory,
    Ocmt,
    Grafting,
    Substitution,
    PointRule,
    DegenRule,
    FillRule,
    GraftRule,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Variable => "variable declaration",
            Self::Term => "term construction",
            Self::Type => "type declaration",
            Self::Typing => "typing declaration",
            Self::Context => "context",
            Self::Theory => "equational theory",
            Self::Ocmt => "ocmt",
            Self::Grafting => "grafting",
            Self::Substitution => "substitution",
            Self::PointRule => "point rule",
            Self::DegenRule => "degen rule",
            Self::FillRule => "fill rule",
            Self::GraftRule => "graft rule",
        };
        f.write_str(label)
    }
}
