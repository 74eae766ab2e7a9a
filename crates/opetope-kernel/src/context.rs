//! Variable contexts.
//!
//! A context is a finite set of typings `x : T`, one per declared variable.
//! Only bare variables are ever typed in a context, and no variable is typed
//! twice. Contexts are values: extending one returns a new context and
//! leaves the original untouched.

use crate::error::{DerivationError, Scope};
use crate::term::Term;
use crate::types::{Type, Typing};
use crate::variable::Variable;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Context {
    typings: BTreeMap<Variable, Type>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of this context extended with `typing`.
    ///
    /// Fails if the typed term is not a bare variable, or if that variable
    /// is already typed here.
    pub fn with_typing(&self, typing: Typing) -> Result<Self, DerivationError> {
        let term = typing.term();
        let Some(var) = term.root().filter(|_| term.is_variable()) else {
            return Err(DerivationError::new(
                Scope::Context,
                format!("context typings only type variables, and {term} is not one"),
            ));
        };
        if self.contains(var) {
            return Err(DerivationError::new(
                Scope::Context,
                format!("variable {var} is already typed in this context"),
            ));
        }
        let mut res = self.clone();
        res.typings.insert(var.clone(), typing.ty().clone());
        Ok(res)
    }

    /// Whether `v` is typed in this context.
    pub fn contains(&self, v: &Variable) -> bool {
        self.typings.contains_key(v)
    }

    pub fn type_of(&self, v: &Variable) -> Result<&Type, DerivationError> {
        self.typings.get(v).ok_or_else(|| {
            DerivationError::new(
                Scope::Context,
                format!(
                    "variable {v} of dimension {} is not typed in context, \
                     so its type cannot be computed",
                    v.dimension()
                ),
            )
        })
    }

    /// The k-source of `v`: `v` itself for k = 0, otherwise the (k−1)-th
    /// entry of its type. Valid indices are `0..=v.dimension() + 1`.
    pub fn source(&self, v: &Variable, k: isize) -> Result<Term, DerivationError> {
        if k < 0 || k > v.dimension() + 1 {
            return Err(DerivationError::new(
                Scope::Context,
                format!(
                    "source index out of bounds: {v} has dimension {}, \
                     so the index should be between 0 and {} (is {k})",
                    v.dimension(),
                    v.dimension() + 1
                ),
            ));
        }
        let ty = self.type_of(v)?;
        if k == 0 {
            Ok(Term::var(v.clone()))
        } else {
            Ok(ty.terms()[k as usize - 1].clone())
        }
    }

    /// The typings of this context whose variable is also typed in `other`.
    ///
    /// Variables are compared syntactically; equational theories play no
    /// part here.
    pub fn intersection(&self, other: &Context) -> Context {
        let typings = self
            .typings
            .iter()
            .filter(|(v, _)| other.contains(v))
            .map(|(v, ty)| (v.clone(), ty.clone()))
            .collect();
        Context { typings }
    }

    /// This context extended with every typing of `other` whose variable is
    /// not typed here yet.
    pub fn union(&self, other: &Context) -> Context {
        let mut res = self.clone();
        for (v, ty) in &other.typings {
            res.typings
                .entry(v.clone())
                .or_insert_with(|| ty.clone());
        }
        res
    }

    /// Every `(b, a)` such that `b ← a(…)` occurs in a type of this context.
    pub fn graft_tuples(&self) -> BTreeSet<(Variable, Variable)> {
        self.typings
            .values()
            .flat_map(|ty| ty.terms().iter())
            .flat_map(Term::graft_tuples)
            .collect()
    }

    /// All variables typed in this context.
    pub fn variables(&self) -> BTreeSet<Variable> {
        self.typings.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.typings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.typings.is_empty()
    }

    /// Iterate over `(variable, type)` pairs in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Type)> {
        self.typings.iter()
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (v, ty)) in self.typings.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v} : {ty}")?;
        }
        Ok(())
    }
}
