//! Sequents `E ▷ Γ ⊢ t : T`.
//!
//! The conclusions of the inference rules. A sequent is an OCMT together
//! with the typing it derives; it is never modified once built, and every
//! rule produces a fresh one.

use crate::context::Context;
use crate::error::DerivationError;
use crate::fingerprint::{Encoder, Fingerprint};
use crate::ocmt::{Equation, Ocmt};
use crate::term::Term;
use crate::theory::EquationalTheory;
use crate::types::{Type, Typing};
use crate::variable::Variable;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequent {
    ocmt: Ocmt,
    typing: Typing,
}

impl Sequent {
    pub fn new(theory: EquationalTheory, context: Context, typing: Typing) -> Self {
        Self {
            ocmt: Ocmt::new(theory, context),
            typing,
        }
    }

    pub fn ocmt(&self) -> &Ocmt {
        &self.ocmt
    }

    pub fn theory(&self) -> &EquationalTheory {
        self.ocmt.theory()
    }

    pub fn context(&self) -> &Context {
        self.ocmt.context()
    }

    pub fn typing(&self) -> &Typing {
        &self.typing
    }

    /// The typed term.
    pub fn term(&self) -> &Term {
        self.typing.term()
    }

    /// The type of the typed term.
    pub fn ty(&self) -> &Type {
        self.typing.ty()
    }

    pub fn dimension(&self) -> isize {
        self.typing.dimension()
    }

    pub fn equal(&self, t: &Term, u: &Term) -> bool {
        self.ocmt.equal(t, u)
    }

    pub fn is_in(&self, v: &Variable, term: &Term) -> bool {
        self.ocmt.is_in(v, term)
    }

    pub fn source(&self, v: &Variable, k: isize) -> Result<Term, DerivationError> {
        self.ocmt.source(v, k)
    }

    pub fn type_of(&self, v: &Variable) -> Result<&Type, DerivationError> {
        self.ocmt.type_of(v)
    }

    pub fn target(&self, v: &Variable, k: usize) -> Result<Variable, DerivationError> {
        self.ocmt.target(v, k)
    }

    pub fn graft(&self, t: &Term, x: &Variable, u: &Term) -> Result<Term, DerivationError> {
        self.ocmt.graft(t, x, u)
    }

    pub fn substitute(
        &self,
        u: &Term,
        s: &Term,
        a: &Variable,
    ) -> Result<(Term, Option<Equation>), DerivationError> {
        self.ocmt.substitute(u, s, a)
    }

    /// Fingerprint of the theory, context and typing.
    ///
    /// Theories are compared as partitions: two derivations that reach the
    /// same classes through different merge orders fingerprint the same.
    pub fn fingerprint(&self) -> Fingerprint {
        Encoder::new()
            .theory(self.theory())
            .context(self.context())
            .typing(&self.typing)
            .finish()
    }
}

impl fmt::Display for Sequent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ⊢ {}", self.ocmt, self.typing)
    }
}
