//! Opetopic contexts modulo theory.
//!
//! An OCMT pairs an equational theory with a context. It carries the term
//! algorithms that need both: equality up to the theory, grafting
//! `t(x ← u)` and substitution `u[s/a]`.

use crate::context::Context;
use crate::error::{DerivationError, Scope};
use crate::term::Term;
use crate::theory::EquationalTheory;
use crate::types::Type;
use crate::variable::Variable;
use std::fmt;
use tracing::trace;

/// Prefix used to name iterated targets: the k-target of `x` is `t…tx`.
pub const TARGET_SYMBOL: &str = "t";

/// An equation forced by a substitution, to be folded into the theory.
pub type Equation = (Variable, Variable);

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Ocmt {
    theory: EquationalTheory,
    context: Context,
}

impl Ocmt {
    pub fn new(theory: EquationalTheory, context: Context) -> Self {
        Self { theory, context }
    }

    pub fn theory(&self) -> &EquationalTheory {
        &self.theory
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Structural equality of terms modulo the theory.
    ///
    /// Roots must be equal in the theory, degeneracy must agree, and the
    /// grafts must correspond key by key (keys compared in the theory) with
    /// equal values.
    pub fn equal(&self, t: &Term, u: &Term) -> bool {
        let (Some(rt), Some(ru)) = (t.root(), u.root()) else {
            return t.is_empty() && u.is_empty();
        };
        if t.is_degenerate() != u.is_degenerate() || !self.theory.equal(rt, ru) {
            return false;
        }
        let (Some(gt), Some(gu)) = (t.grafts(), u.grafts()) else {
            // Two degeneracies at equal variables.
            return true;
        };
        if gt.len() != gu.len() {
            return false;
        }
        gt.iter().all(|(kt, vt)| {
            gu.iter()
                .find(|(ku, _)| self.theory.equal(kt, ku))
                .is_some_and(|(_, vu)| self.equal(vt, vu))
        })
    }

    /// Whether `v` occurs in `term` modulo the theory.
    pub fn is_in(&self, v: &Variable, term: &Term) -> bool {
        self.theory.is_in(v, term)
    }

    pub fn source(&self, v: &Variable, k: isize) -> Result<Term, DerivationError> {
        self.context.source(v, k)
    }

    pub fn type_of(&self, v: &Variable) -> Result<&Type, DerivationError> {
        self.context.type_of(v)
    }

    /// The k-target of `v`, named by prefixing [`TARGET_SYMBOL`] k times.
    ///
    /// Nothing is looked up: this is the naming convention for the target
    /// variables introduced when a sequent is turned into an opetopic set.
    pub fn target(&self, v: &Variable, k: usize) -> Result<Variable, DerivationError> {
        if v.dimension() == 0 {
            return Err(DerivationError::new(
                Scope::Ocmt,
                format!("cannot compute the target of 0-dimensional variable {v}"),
            ));
        }
        let name = format!("{}{}", TARGET_SYMBOL.repeat(k), v.name());
        Variable::new(name, v.dimension() - k as isize).map_err(|_| {
            DerivationError::new(
                Scope::Ocmt,
                format!(
                    "cannot compute the {k}-target of {v}, which has dimension {}",
                    v.dimension()
                ),
            )
        })
    }

    /// Graft `u` on `t` at `x`, i.e. compute `t(x ← u)`.
    ///
    /// The graft lands at the root if `x` occurs (modulo the theory) in the
    /// first source of the root, and is pushed down into every existing
    /// graft otherwise.
    pub fn graft(&self, t: &Term, x: &Variable, u: &Term) -> Result<Term, DerivationError> {
        if let Some(grafts) = t.grafts()
            && grafts.keys().any(|k| self.theory.equal(k, x))
        {
            return Err(DerivationError::new(
                Scope::Grafting,
                format!("variable {x} in term {t} has already been used for a grafting"),
            ));
        }
        match t {
            Term::Empty => Err(DerivationError::new(
                Scope::Grafting,
                format!("cannot graft {u} at {x}: the term grafted onto is empty"),
            )),
            Term::Degenerate(y) if y == x => Ok(u.clone()),
            Term::Degenerate(y) => Err(DerivationError::new(
                Scope::Grafting,
                format!(
                    "incompatible graft: term {t} is degenerate, \
                     so the grafting variable must be {y} (is {x})"
                ),
            )),
            Term::Node { root, grafts } => {
                let mut grafts = grafts.clone();
                if self.is_in(x, &self.source(root, 1)?) {
                    trace!(root = %root, at = %x, term = %u, "graft at root");
                    grafts.insert(x.clone(), u.clone());
                } else {
                    for value in grafts.values_mut() {
                        *value = self.graft(value, x, u)?;
                    }
                }
                Ok(Term::Node {
                    root: root.clone(),
                    grafts,
                })
            }
        }
    }

    /// Substitute `s` for the variable `a` in `u`, i.e. compute `u[s/a]`.
    ///
    /// Substituting a degeneracy erases a cell from the tree; the equation
    /// recording that the erased boundary equals what remains is returned
    /// alongside the term.
    ///
    /// # Panics
    ///
    /// If the graft erased by a degenerate substitution carries more than
    /// one graft of its own. Terms built by the rules are globular and never
    /// trigger this.
    pub fn substitute(
        &self,
        u: &Term,
        s: &Term,
        a: &Variable,
    ) -> Result<(Term, Option<Equation>), DerivationError> {
        if s.is_empty() {
            return Err(DerivationError::new(
                Scope::Substitution,
                format!("cannot substitute the empty term for {a} in {u}"),
            ));
        }
        if u.is_empty() {
            return Err(DerivationError::new(
                Scope::Substitution,
                format!("cannot substitute {s} for {a} in the empty term"),
            ));
        }
        match s {
            Term::Degenerate(sv) => self.substitute_degenerate(u, sv, a),
            _ => Ok((self.substitute_term(u, s, a)?, None)),
        }
    }

    fn substitute_degenerate(
        &self,
        u: &Term,
        sv: &Variable,
        a: &Variable,
    ) -> Result<(Term, Option<Equation>), DerivationError> {
        let Term::Node { root, grafts } = u else {
            return Ok((u.clone(), None));
        };
        let grafted_at_root = grafts
            .iter()
            .find(|(_, value)| matches!(value, Term::Node { root, .. } if root == a));

        if let Some((ka, ta)) = grafted_at_root {
            let mut grafts = grafts.clone();
            let inner: Vec<&Term> = ta
                .grafts()
                .map(|g| g.values().collect())
                .unwrap_or_default();
            match inner.as_slice() {
                [] => {
                    grafts.remove(ka);
                }
                [only] => {
                    grafts.insert(ka.clone(), (*only).clone());
                }
                _ => panic!(
                    "term {u} was expected to be globular: {ta} grafted at {ka} \
                     carries more than one graft"
                ),
            }
            let equation = (sv.clone(), ka.clone());
            trace!(erased = %a, left = %equation.0, right = %equation.1, "degenerate substitution");
            return Ok((
                Term::Node {
                    root: root.clone(),
                    grafts,
                },
                Some(equation),
            ));
        }

        let mut equation = None;
        let mut out = grafts.clone();
        for value in out.values_mut() {
            let (substituted, emitted) = self.substitute(value, &Term::Degenerate(sv.clone()), a)?;
            *value = substituted;
            if equation.is_none() {
                equation = emitted;
            }
        }
        Ok((
            Term::Node {
                root: root.clone(),
                grafts: out,
            },
            equation,
        ))
    }

    fn substitute_term(&self, u: &Term, s: &Term, a: &Variable) -> Result<Term, DerivationError> {
        let Term::Node { root, grafts } = u else {
            return Ok(u.clone());
        };
        if self.theory.equal(root, a) {
            let mut res = s.clone();
            for (k, value) in grafts {
                res = self.graft(&res, k, value)?;
            }
            return Ok(res);
        }
        let mut out = grafts.clone();
        for value in out.values_mut() {
            *value = self.substitute(value, s, a)?.0;
        }
        Ok(Term::Node {
            root: root.clone(),
            grafts: out,
        })
    }
}

impl fmt::Display for Ocmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ▷ {}", self.theory, self.context)
    }
}
