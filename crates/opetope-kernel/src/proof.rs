//! Proof trees.
//!
//! A [`RuleInstance`] is a tree of rule applications whose leaves are
//! `point`s. Variables are given by name only: their dimension is fixed at
//! evaluation time by the premise they are introduced against.
//!
//! ```text
//! Fill(Graft(Fill(Point(b), g), Fill(Point(a), f), b), α)
//!
//!   point b          point a
//!   ─────── fill g   ─────── fill f
//!    b ⊢ g            a ⊢ f
//!   ──────────────────────── graft-b
//!         ⊢ g(b ← f)
//!   ──────────────────────── fill α
//!    ⊢ α : g(b ← f) → a → ∅
//! ```

use crate::error::{DerivationError, Scope};
use crate::fingerprint::{Encoder, Fingerprint};
use crate::render::{Style, Tex};
use crate::rules;
use crate::sequent::Sequent;
use crate::variable::Variable;
use std::fmt;

/// A node of a proof tree.
pub trait Rule {
    /// Evaluate the subtree, returning its conclusion or the first error.
    fn eval(&self) -> Result<Sequent, DerivationError>;

    /// Append the bussproofs commands of the subtree to `out` and return its
    /// conclusion.
    fn write_tex(&self, out: &mut String, style: &Style) -> Result<Sequent, DerivationError>;

    /// The subtree as a complete `prooftree` environment.
    fn to_tex(&self, style: &Style) -> Result<String, DerivationError> {
        let mut body = String::new();
        self.write_tex(&mut body, style)?;
        Ok(format!("\\begin{{prooftree}}\n\t{body}\n\\end{{prooftree}}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    pub name: String,
}

impl Point {
    fn variable(&self) -> Result<Variable, DerivationError> {
        Variable::new(self.name.as_str(), 0)
    }
}

impl Rule for Point {
    fn eval(&self) -> Result<Sequent, DerivationError> {
        rules::point(&self.variable()?)
    }

    fn write_tex(&self, out: &mut String, style: &Style) -> Result<Sequent, DerivationError> {
        let seq = self.eval()?;
        out.push_str("\\AxiomC{}");
        unary(out, "point", &seq, style);
        Ok(seq)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Degen {
    pub premise: Box<RuleInstance>,
}

impl Rule for Degen {
    fn eval(&self) -> Result<Sequent, DerivationError> {
        rules::degen(&self.premise.eval()?)
    }

    fn write_tex(&self, out: &mut String, style: &Style) -> Result<Sequent, DerivationError> {
        let premise = self.premise.write_tex(out, style)?;
        let seq = rules::degen(&premise)?;
        unary(out, "degen", &seq, style);
        Ok(seq)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fill {
    pub premise: Box<RuleInstance>,
    pub name: String,
}

impl Rule for Fill {
    fn eval(&self) -> Result<Sequent, DerivationError> {
        let premise = self.premise.eval()?;
        rules::fill(&premise, &filler(&premise, &self.name)?)
    }

    fn write_tex(&self, out: &mut String, style: &Style) -> Result<Sequent, DerivationError> {
        let premise = self.premise.write_tex(out, style)?;
        let seq = rules::fill(&premise, &filler(&premise, &self.name)?)?;
        unary(out, "fill", &seq, style);
        Ok(seq)
    }
}

/// `Fill(Degen(premise), name)`, typeset as the two steps.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DegenFill {
    pub premise: Box<RuleInstance>,
    pub name: String,
}

impl Rule for DegenFill {
    fn eval(&self) -> Result<Sequent, DerivationError> {
        let premise = rules::degen(&self.premise.eval()?)?;
        rules::fill(&premise, &filler(&premise, &self.name)?)
    }

    fn write_tex(&self, out: &mut String, style: &Style) -> Result<Sequent, DerivationError> {
        let premise = self.premise.write_tex(out, style)?;
        let degenerate = rules::degen(&premise)?;
        unary(out, "degen", &degenerate, style);
        let seq = rules::fill(&degenerate, &filler(&degenerate, &self.name)?)?;
        unary(out, "fill", &seq, style);
        Ok(seq)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Graft {
    pub left: Box<RuleInstance>,
    pub right: Box<RuleInstance>,
    pub name: String,
}

impl Graft {
    fn variable(&self, left: &Sequent) -> Result<Variable, DerivationError> {
        let n = left.dimension();
        if n < 1 {
            return Err(DerivationError::new(
                Scope::GraftRule,
                format!(
                    "cannot graft at {}: the term grafted upon has dimension {n}",
                    self.name
                ),
            ));
        }
        Variable::new(self.name.as_str(), n - 1)
    }
}

impl Rule for Graft {
    fn eval(&self) -> Result<Sequent, DerivationError> {
        let left = self.left.eval()?;
        let right = self.right.eval()?;
        rules::graft(&left, &right, &self.variable(&left)?)
    }

    fn write_tex(&self, out: &mut String, style: &Style) -> Result<Sequent, DerivationError> {
        let left = self.left.write_tex(out, style)?;
        out.push_str("\n\t");
        let right = self.right.write_tex(out, style)?;
        let a = self.variable(&left)?;
        let seq = rules::graft(&left, &right, &a)?;
        out.push_str(&format!(
            "\n\t\\RightLabel{{\\texttt{{graft-}}${}$}}\n\t\\BinaryInfC{{${}$}}",
            a.to_tex(style),
            seq.to_tex(style)
        ));
        Ok(seq)
    }
}

fn filler(premise: &Sequent, name: &str) -> Result<Variable, DerivationError> {
    Variable::new(name, premise.dimension() + 1)
}

fn unary(out: &mut String, label: &str, seq: &Sequent, style: &Style) {
    out.push_str(&format!(
        "\n\t\\RightLabel{{\\texttt{{{label}}}}}\n\t\\UnaryInfC{{${}$}}",
        seq.to_tex(style)
    ));
}

/// A proof tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleInstance {
    Point(Point),
    Degen(Degen),
    Fill(Fill),
    DegenFill(DegenFill),
    Graft(Graft),
}

impl RuleInstance {
    pub fn point(name: impl Into<String>) -> Self {
        Self::Point(Point { name: name.into() })
    }

    pub fn degen(premise: RuleInstance) -> Self {
        Self::Degen(Degen {
            premise: Box::new(premise),
        })
    }

    pub fn fill(premise: RuleInstance, name: impl Into<String>) -> Self {
        Self::Fill(Fill {
            premise: Box::new(premise),
            name: name.into(),
        })
    }

    pub fn degen_fill(premise: RuleInstance, name: impl Into<String>) -> Self {
        Self::DegenFill(DegenFill {
            premise: Box::new(premise),
            name: name.into(),
        })
    }

    pub fn graft(left: RuleInstance, right: RuleInstance, name: impl Into<String>) -> Self {
        Self::Graft(Graft {
            left: Box::new(left),
            right: Box::new(right),
            name: name.into(),
        })
    }

    /// Hash of the canonical printing of the tree.
    pub fn fingerprint(&self) -> Fingerprint {
        Encoder::new().record("proof", self).finish()
    }

    fn as_rule(&self) -> &dyn Rule {
        match self {
            Self::Point(r) => r,
            Self::Degen(r) => r,
            Self::Fill(r) => r,
            Self::DegenFill(r) => r,
            Self::Graft(r) => r,
        }
    }
}

impl Rule for RuleInstance {
    fn eval(&self) -> Result<Sequent, DerivationError> {
        self.as_rule().eval()
    }

    fn write_tex(&self, out: &mut String, style: &Style) -> Result<Sequent, DerivationError> {
        self.as_rule().write_tex(out, style)
    }
}

impl fmt::Display for RuleInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point(r) => write!(f, "Point({})", r.name),
            Self::Degen(r) => write!(f, "Degen({})", r.premise),
            Self::Fill(r) => write!(f, "Fill({}, {})", r.premise, r.name),
            Self::DegenFill(r) => write!(f, "DegenFill({}, {})", r.premise, r.name),
            Self::Graft(r) => write!(f, "Graft({}, {}, {})", r.left, r.right, r.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrow(src: &str, name: &str) -> RuleInstance {
        RuleInstance::fill(RuleInstance::point(src), name)
    }

    #[test]
    fn names_take_dimension_from_premises() {
        let fg = RuleInstance::graft(arrow("b", "g"), arrow("a", "f"), "b");
        let alpha = RuleInstance::fill(fg, "α").eval().unwrap();
        assert_eq!(alpha.dimension(), 2);
        assert_eq!(alpha.typing().to_string(), "α : g(b ← f) → a → ∅");
    }

    #[test]
    fn errors_propagate_unchanged() {
        let bad = RuleInstance::degen(RuleInstance::degen(RuleInstance::point("x")));
        let direct = rules::degen(&rules::degen(&rules::point(&Variable::new("x", 0).unwrap()).unwrap()).unwrap());
        assert_eq!(bad.eval().unwrap_err(), direct.unwrap_err());
        let wrapped = RuleInstance::fill(bad, "y");
        assert_eq!(wrapped.eval().unwrap_err().scope, Scope::DegenRule);
    }

    #[test]
    fn graft_on_a_point_is_rejected() {
        let bad = RuleInstance::graft(RuleInstance::point("a"), RuleInstance::point("b"), "c");
        let err = bad.eval().unwrap_err();
        assert_eq!(err.scope, Scope::GraftRule);
    }

    #[test]
    fn degen_fill_matches_fill_of_degen() {
        let direct = RuleInstance::degen_fill(RuleInstance::point("a"), "ι");
        let spelled = RuleInstance::fill(RuleInstance::degen(RuleInstance::point("a")), "ι");
        assert_eq!(direct.eval().unwrap(), spelled.eval().unwrap());
        let style = Style::default();
        assert_eq!(direct.to_tex(&style).unwrap(), spelled.to_tex(&style).unwrap());
    }

    #[test]
    fn canonical_printing() {
        let p = RuleInstance::graft(
            arrow("b", "g"),
            RuleInstance::degen_fill(RuleInstance::point("b"), "x"),
            "b",
        );
        assert_eq!(p.to_string(), "Graft(Fill(Point(b), g), DegenFill(Point(b), x), b)");
    }

    #[test]
    fn point_tex() {
        let tex = RuleInstance::point("a")
            .to_tex(&Style {
                print_contexts: false,
            })
            .unwrap();
        assert_eq!(
            tex,
            "\\begin{prooftree}\n\
             \t\\AxiomC{}\n\
             \t\\RightLabel{\\texttt{point}}\n\
             \t\\UnaryInfC{$\\emptyset \\vdash_{0} a : \\emptyset$}\n\
             \\end{prooftree}"
        );
    }

    #[test]
    fn tex_stops_at_first_error() {
        let bad = RuleInstance::fill(RuleInstance::degen(RuleInstance::degen(RuleInstance::point("x"))), "y");
        assert!(bad.to_tex(&Style::default()).is_err());
    }
}
