//! Equational theories over variables.
//!
//! A theory is a partition of a subset of all variables into classes of
//! provably equal variables. Variables outside every class are only equal
//! to themselves. Classes are kept as an explicit list, not as parent
//! pointers, so they stay enumerable and printable.

use crate::error::{DerivationError, Scope};
use crate::term::Term;
use crate::variable::Variable;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EquationalTheory {
    classes: Vec<BTreeSet<Variable>>,
}

impl EquationalTheory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of this theory with `a = b` added.
    pub fn with_equation(&self, a: Variable, b: Variable) -> Result<Self, DerivationError> {
        let mut res = self.clone();
        res.merge(a, b)?;
        Ok(res)
    }

    fn merge(&mut self, a: Variable, b: Variable) -> Result<(), DerivationError> {
        if a.dimension() != b.dimension() {
            return Err(DerivationError::new(
                Scope::Theory,
                format!(
                    "dimension mismatch in new equality {a} = {b}: \
                     respective dimensions are {} and {}",
                    a.dimension(),
                    b.dimension()
                ),
            ));
        }
        match (self.index_of(&a), self.index_of(&b)) {
            (None, None) => self.classes.push(BTreeSet::from([a, b])),
            (None, Some(ib)) => {
                self.classes[ib].insert(a);
            }
            (Some(ia), None) => {
                self.classes[ia].insert(b);
            }
            (Some(ia), Some(ib)) if ia != ib => {
                let absorbed = self.classes.remove(ib);
                let ia = if ib < ia { ia - 1 } else { ia };
                self.classes[ia].extend(absorbed);
            }
            (Some(_), Some(_)) => {}
        }
        Ok(())
    }

    /// The merge closure of both theories.
    pub fn union(&self, other: &EquationalTheory) -> Result<Self, DerivationError> {
        let mut res = self.clone();
        for class in &other.classes {
            let mut members = class.iter();
            let Some(first) = members.next() else {
                continue;
            };
            for member in members {
                res.merge(first.clone(), member.clone())?;
            }
        }
        Ok(res)
    }

    fn index_of(&self, v: &Variable) -> Option<usize> {
        self.classes.iter().position(|class| class.contains(v))
    }

    /// The class of `v`, or `{v}` if `v` is in no class.
    pub fn class_of(&self, v: &Variable) -> BTreeSet<Variable> {
        match self.index_of(v) {
            Some(i) => self.classes[i].clone(),
            None => BTreeSet::from([v.clone()]),
        }
    }

    /// Whether `a` and `b` are equal modulo the theory.
    pub fn equal(&self, a: &Variable, b: &Variable) -> bool {
        match self.index_of(a) {
            Some(i) => self.classes[i].contains(b),
            None => a == b,
        }
    }

    /// Whether some member of the class of `v` occurs in `term`.
    pub fn is_in(&self, v: &Variable, term: &Term) -> bool {
        match self.index_of(v) {
            Some(i) => self.classes[i].iter().any(|w| term.contains(w)),
            None => term.contains(v),
        }
    }

    pub fn classes(&self) -> &[BTreeSet<Variable>] {
        &self.classes
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl fmt::Display for EquationalTheory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.classes.is_empty() {
            return f.write_str("∅");
        }
        for (i, class) in self.classes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str("{")?;
            for (j, v) in class.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{v}")?;
            }
            f.write_str("}")?;
        }
        Ok(())
    }
}
