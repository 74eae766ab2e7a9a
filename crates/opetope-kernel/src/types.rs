//! Types and typings.
//!
//! An n-type is the list of iterated sources of an n-cell: n+1 terms of
//! dimensions n−1, n−2, …, −1. The last entry is therefore always `∅`.

use crate::error::{DerivationError, Scope};
use crate::term::Term;
use crate::variable::Variable;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Type {
    terms: Vec<Term>,
}

impl Type {
    /// Build a type, inferring its dimension from the number of terms.
    pub fn new(terms: Vec<Term>) -> Result<Self, DerivationError> {
        if terms.is_empty() {
            return Err(DerivationError::new(
                Scope::Type,
                "a type requires at least one term",
            ));
        }
        let dimension = terms.len() as isize - 1;
        for (i, term) in terms.iter().enumerate() {
            let expected = dimension - i as isize - 1;
            if term.dimension() != expected {
                return Err(DerivationError::new(
                    Scope::Type,
                    format!(
                        "term {i} ({term}) has dimension {}, should have {expected}",
                        term.dimension()
                    ),
                ));
            }
        }
        Ok(Self { terms })
    }

    pub fn dimension(&self) -> isize {
        self.terms.len() as isize - 1
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// The first source: the (n−1)-term at the head of the list.
    pub fn first(&self) -> &Term {
        &self.terms[0]
    }

    /// Whether `v` occurs in at least one term of the type.
    pub fn contains(&self, v: &Variable) -> bool {
        self.terms.iter().any(|t| t.contains(v))
    }

    /// All k-variables occurring in the terms of the type.
    pub fn variables(&self, k: isize) -> BTreeSet<Variable> {
        self.terms.iter().flat_map(|t| t.variables(k)).collect()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" → ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

/// An n-term together with an n-type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Typing {
    term: Term,
    ty: Type,
}

impl Typing {
    pub fn new(term: Term, ty: Type) -> Result<Self, DerivationError> {
        if term.dimension() != ty.dimension() {
            return Err(DerivationError::new(
                Scope::Typing,
                format!(
                    "dimension mismatch: term {term} has dimension {}, type {ty} has dimension {}",
                    term.dimension(),
                    ty.dimension()
                ),
            ));
        }
        Ok(Self { term, ty })
    }

    pub fn term(&self) -> &Term {
        &self.term
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn dimension(&self) -> isize {
        self.term.dimension()
    }
}

impl fmt::Display for Typing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.term, self.ty)
    }
}
