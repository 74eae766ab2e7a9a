//! Terms: labelled, possibly degenerate trees of variables.
//!
//! An n-term is either
//!
//! - the unique (−1)-term `∅`,
//! - the degeneracy `_x` at an (n−1)-variable `x`, or
//! - a root n-variable together with a map sending (n−1)-variables of the
//!   root's first source to the n-terms grafted there.
//!
//! `Term` is raw syntax. Whether a term is well formed (grafts sit on
//! genuine leaves of the root's source) is a property of the sequent that
//! contains it, enforced by the inference rules, not by this type.

use crate::error::{DerivationError, Scope};
use crate::variable::Variable;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// The unique term of dimension −1.
    Empty,

    /// The degeneracy at a variable, one dimension up.
    Degenerate(Variable),

    /// A root variable with terms grafted on its source variables.
    Node {
        root: Variable,
        grafts: BTreeMap<Variable, Term>,
    },
}

impl Term {
    /// The bare variable `v`.
    pub fn var(v: Variable) -> Self {
        Self::Node {
            root: v,
            grafts: BTreeMap::new(),
        }
    }

    /// The degeneracy at `v`.
    pub fn degenerate(v: Variable) -> Self {
        Self::Degenerate(v)
    }

    /// Attach `value` under `key` at the root of this term.
    ///
    /// The key must have dimension n−1 and the value dimension n, where n is
    /// the dimension of this term. Only nodes carry grafts. An existing
    /// entry under the same key is replaced.
    pub fn with_graft(self, key: Variable, value: Term) -> Result<Self, DerivationError> {
        match self {
            Self::Node { root, mut grafts } => {
                let n = root.dimension();
                if key.dimension() != n - 1 || value.dimension() != n {
                    return Err(DerivationError::new(
                        Scope::Term,
                        format!(
                            "cannot graft {value} (dimension {}) at {key} (dimension {}) \
                             on a term rooted at {root} (dimension {n})",
                            value.dimension(),
                            key.dimension()
                        ),
                    ));
                }
                grafts.insert(key, value);
                Ok(Self::Node { root, grafts })
            }
            other => Err(DerivationError::new(
                Scope::Term,
                format!("term {other} has no root to graft {value} onto"),
            )),
        }
    }

    /// Dimension of the term: −1 for `∅`, one more than the variable for a
    /// degeneracy, the root's dimension otherwise.
    pub fn dimension(&self) -> isize {
        match self {
            Self::Empty => -1,
            Self::Degenerate(v) => v.dimension() + 1,
            Self::Node { root, .. } => root.dimension(),
        }
    }

    /// The labelling variable: the root of a node, or the variable a
    /// degeneracy sits at. `None` for the empty term.
    pub fn root(&self) -> Option<&Variable> {
        match self {
            Self::Empty => None,
            Self::Degenerate(v) | Self::Node { root: v, .. } => Some(v),
        }
    }

    /// The graft map of a node. `None` for the empty term and degeneracies.
    pub fn grafts(&self) -> Option<&BTreeMap<Variable, Term>> {
        match self {
            Self::Node { grafts, .. } => Some(grafts),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate(_))
    }

    /// True iff the term is a single variable: a node without grafts.
    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Node { grafts, .. } if grafts.is_empty())
    }

    /// Whether `v` occurs in the term.
    ///
    /// Only variables of dimension n (roots) and n−1 (graft keys) can occur
    /// in an n-term. A degeneracy contains nothing.
    pub fn contains(&self, v: &Variable) -> bool {
        let Self::Node { root, grafts } = self else {
            return false;
        };
        let n = root.dimension();
        if v.dimension() == n - 1 {
            grafts.contains_key(v) || grafts.values().any(|t| t.contains(v))
        } else if v.dimension() == n {
            root == v || grafts.values().any(|t| t.contains(v))
        } else {
            false
        }
    }

    /// All k-variables occurring in the term.
    pub fn variables(&self, k: isize) -> BTreeSet<Variable> {
        let mut out = BTreeSet::new();
        self.collect_variables(k, &mut out);
        out
    }

    fn collect_variables(&self, k: isize, out: &mut BTreeSet<Variable>) {
        let Self::Node { root, grafts } = self else {
            return;
        };
        if root.dimension() == k {
            out.insert(root.clone());
        }
        for (key, value) in grafts {
            if key.dimension() == k {
                out.insert(key.clone());
            }
            value.collect_variables(k, out);
        }
    }

    /// Every pair `(b, a)` such that `b ← a(…)` occurs in the term.
    ///
    /// Degenerate graft values contribute nothing.
    ///
    /// # Panics
    ///
    /// If an empty term is grafted somewhere. Rules never build such terms.
    pub fn graft_tuples(&self) -> BTreeSet<(Variable, Variable)> {
        let mut out = BTreeSet::new();
        self.collect_graft_tuples(&mut out);
        out
    }

    fn collect_graft_tuples(&self, out: &mut BTreeSet<(Variable, Variable)>) {
        let Some(grafts) = self.grafts() else {
            return;
        };
        for (key, value) in grafts {
            match value {
                Self::Degenerate(_) => {}
                Self::Empty => panic!(
                    "empty term grafted at {key} in {self}; rules never produce this"
                ),
                Self::Node { root, .. } => {
                    out.insert((key.clone(), root.clone()));
                    value.collect_graft_tuples(out);
                }
            }
        }
    }
}

impl From<Variable> for Term {
    fn from(v: Variable) -> Self {
        Self::var(v)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("∅"),
            Self::Degenerate(v) => write!(f, "_{v}"),
            Self::Node { root, grafts } => {
                write!(f, "{root}")?;
                if grafts.is_empty() {
                    return Ok(());
                }
                f.write_str("(")?;
                for (i, (key, value)) in grafts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key} ← {value}")?;
                }
                f.write_str(")")
            }
        }
    }
}
